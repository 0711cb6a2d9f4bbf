//! Popup payload and its HTML card

use aq_core::{Category, ColorToken, Pollutant, Site};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::html::escape;

/// Format used for the "last refreshed" line
pub const TIMESTAMP_FORMAT: &str = "%B %d, %Y %H:%M";

/// Data shown when a marker is hovered or opened
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub site_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parish: Option<String>,
    /// `None` when the site has no reading
    pub last_refreshed: Option<String>,
    pub pollutant: Pollutant,
    /// Rounded value, blank when missing
    pub label: String,
    pub category: Category,
}

impl Popup {
    pub fn for_site(site: &Site, pollutant: Pollutant, label: String, category: Category) -> Self {
        Self {
            site_name: site.name.clone(),
            division: site.division.clone(),
            parish: site.parish.clone(),
            last_refreshed: site
                .latest
                .as_ref()
                .and_then(|r| r.time.as_ref())
                .map(format_timestamp),
            pollutant,
            label,
            category,
        }
    }

    /// "division, parish" with empty parts left out
    pub fn location_line(&self) -> Option<String> {
        let parts: Vec<&str> = [self.division.as_deref(), self.parish.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Color scheme of the popup card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopupTheme {
    #[default]
    Light,
    Dark,
}

impl PopupTheme {
    /// (background, text, border)
    fn palette(self) -> (&'static str, &'static str, &'static str) {
        match self {
            PopupTheme::Light => ("#f9fafb", "#1e293b", "#e5e7eb"),
            PopupTheme::Dark => ("#23272f", "#fff", "#334155"),
        }
    }
}

pub fn render_popup_html(popup: &Popup, color: &ColorToken, theme: PopupTheme) -> String {
    let (background, text, border) = theme.palette();

    let refreshed = popup
        .last_refreshed
        .as_deref()
        .map(|t| format!("Last refreshed: {}", escape(t)))
        .unwrap_or_else(|| "No recent data".to_string());

    let location = popup
        .location_line()
        .map(|l| format!(r#"<div class="aq-popup-location">{}</div>"#, escape(&l)))
        .unwrap_or_default();

    let value = if popup.label.is_empty() {
        "--".to_string()
    } else {
        escape(&popup.label)
    };

    format!(
        concat!(
            r#"<div class="aq-popup {css}" style="background: {background}; color: {text}; border: 1px solid {border};">"#,
            r#"<div class="aq-popup-refreshed">{refreshed}</div>"#,
            r#"<div class="aq-popup-site">{site}</div>"#,
            "{location}",
            r#"<div class="aq-popup-reading"><span class="aq-popup-pollutant">{pollutant}</span> "#,
            r#"<span class="aq-popup-value">{value}</span> <span class="aq-popup-unit">{unit}</span></div>"#,
            r#"<div class="aq-popup-category" style="color: {hex};">{category}</div>"#,
            "</div>"
        ),
        css = color.css_class,
        background = background,
        text = text,
        border = border,
        refreshed = refreshed,
        site = escape(&popup.site_name),
        location = location,
        pollutant = popup.pollutant.label(),
        value = value,
        unit = popup.pollutant.unit(),
        hex = color.hex,
        category = popup.category.label(),
    )
}
