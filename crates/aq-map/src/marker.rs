//! Marker construction from site snapshots

use aq_core::{classify, color_for, Category, ColorToken, GeoPoint, Pollutant, Site, ZeroReading};
use serde::Serialize;
use tracing::debug;

use crate::popup::Popup;

/// Settings shared by every marker in a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkerOptions {
    pub pollutant: Pollutant,
    pub zero_reading: ZeroReading,
}

/// A renderable marker for one site
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub site_id: String,
    pub position: GeoPoint,
    /// Rounded reading, blank whenever the category is unknown
    pub label: String,
    pub value: Option<f64>,
    pub category: Category,
    pub color: ColorToken,
    pub popup: Popup,
    /// Client-side route opened when the marker is activated
    pub route: String,
}

pub fn site_route(site_id: &str) -> String {
    format!("/sites/{site_id}")
}

/// Rounded display text for a value; blank for missing or invalid values.
pub fn display_label(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => format!("{}", v.round() as i64),
        _ => String::new(),
    }
}

/// Build the marker for one site, or `None` if the site has no location.
pub fn build_marker(site: &Site, options: &MarkerOptions) -> Option<Marker> {
    let Some(position) = site.location else {
        debug!(site_id = %site.id, "site has no location, marker skipped");
        return None;
    };

    // A reading for another pollutant says nothing about this one
    let value = site
        .latest
        .as_ref()
        .filter(|r| r.pollutant == options.pollutant)
        .and_then(|r| r.value);
    let value = options.zero_reading.apply(value);

    let category = classify(value, options.pollutant);
    // Overflow values and untabled pollutants carry no number next to "No Data"
    let label = if category.is_known() {
        display_label(value)
    } else {
        String::new()
    };
    let popup = Popup::for_site(site, options.pollutant, label.clone(), category);

    Some(Marker {
        site_id: site.id.clone(),
        position,
        label,
        value,
        category,
        color: color_for(category),
        popup,
        route: site_route(&site.id),
    })
}

/// Markers for every placeable site, in input order
pub fn build_markers(sites: &[Site], options: &MarkerOptions) -> Vec<Marker> {
    let markers: Vec<Marker> = sites
        .iter()
        .filter_map(|site| build_marker(site, options))
        .collect();
    debug!(
        sites = sites.len(),
        markers = markers.len(),
        pollutant = %options.pollutant,
        "markers built"
    );
    markers
}
