use aq_core::{
    decode_sites, Category, DataProvider, GeoPoint, Pollutant, Reading, Site, StaticProvider,
};
use aq_map::{
    activate, build_markers, dominant_categories, legend, render_node_html, render_popup_html,
    MarkerOptions, NodeType, PopupTheme,
};
use chrono::{TimeZone, Utc};
use std::cell::RefCell;

fn site(id: &str, location: Option<(f64, f64)>, value: Option<f64>) -> Site {
    Site {
        id: id.to_string(),
        name: format!("{id} monitor"),
        location: location.map(|(latitude, longitude)| GeoPoint {
            latitude,
            longitude,
        }),
        division: Some("Nakawa".to_string()),
        parish: Some("Kiswa".to_string()),
        latest: Some(Reading {
            site_id: id.to_string(),
            pollutant: Pollutant::Pm2_5,
            value,
            time: Some(Utc.with_ymd_and_hms(2024, 7, 15, 8, 0, 0).unwrap()),
        }),
    }
}

#[tokio::test]
async fn provider_snapshot_renders_all_placeable_sites() {
    let provider = StaticProvider::new(vec![
        site("a", Some((0.34, 32.6)), Some(4.0)),
        site("b", None, Some(80.0)),
        site("c", Some((0.31, 32.55)), Some(20.0)),
        site("d", Some((0.29, 32.57)), None),
    ]);

    let sites = provider.sites(Pollutant::Pm2_5).await.unwrap();
    let markers = build_markers(&sites, &MarkerOptions::default());

    assert_eq!(markers.len(), sites.len() - 1);
    let categories: Vec<Category> = markers.iter().map(|m| m.category).collect();
    assert_eq!(
        categories,
        vec![Category::Good, Category::Moderate, Category::Unknown]
    );

    // every marker category has a legend row
    let rows = legend(Pollutant::Pm2_5);
    for marker in &markers {
        assert!(rows.iter().any(|r| r.category == marker.category));
    }

    assert_eq!(
        dominant_categories(&markers),
        vec![Category::Moderate, Category::Good]
    );
}

#[test]
fn feed_to_html_pipeline() {
    let feed = r#"{
        "success": true,
        "measurements": [
            {
                "time": "2024-07-15T08:00:00Z",
                "pm2_5": { "value": 61.2 },
                "siteDetails": {
                    "_id": "kla-01",
                    "name": "Wandegeya",
                    "approximate_latitude": 0.33,
                    "approximate_longitude": 32.57,
                    "division": "Kawempe",
                    "parish": "Wandegeya"
                }
            },
            {
                "time": "2024-07-15T08:00:00Z",
                "pm2_5": { "value": 12.0 },
                "siteDetails": { "_id": "kla-02", "name": "Unplaced" }
            }
        ]
    }"#;

    let sites = decode_sites(feed, Pollutant::Pm2_5).unwrap();
    let markers = build_markers(&sites, &MarkerOptions::default());
    assert_eq!(markers.len(), 1);

    let marker = &markers[0];
    assert_eq!(marker.label, "61");
    assert_eq!(marker.category, Category::Unhealthy);

    let popup = render_popup_html(&marker.popup, &marker.color, PopupTheme::Light);
    assert!(popup.contains("Wandegeya"));
    assert!(popup.contains("Kawempe, Wandegeya"));
    assert!(popup.contains("July 15, 2024 08:00"));

    let node = render_node_html(marker, NodeType::Number, false, PopupTheme::Light);
    assert!(node.contains(r#"id="kla-01""#));
    assert!(node.contains("<p>61</p>"));

    let visited = RefCell::new(Vec::new());
    let navigator = |route: &str| visited.borrow_mut().push(route.to_owned());
    activate(marker, &navigator);
    assert_eq!(visited.into_inner(), vec!["/sites/kla-01".to_owned()]);
}

#[test]
fn marker_serializes_for_clients() {
    let markers = build_markers(
        &[site("x", Some((0.3, 32.5)), Some(9.1))],
        &MarkerOptions::default(),
    );
    let json = serde_json::to_value(&markers[0]).unwrap();
    assert_eq!(json["category"], "moderate");
    assert_eq!(json["color"]["css_class"], "aq-moderate");
    assert_eq!(json["label"], "9");
    assert_eq!(json["popup"]["last_refreshed"], "July 15, 2024 08:00");
    assert_eq!(json["position"]["latitude"], 0.3);
}
