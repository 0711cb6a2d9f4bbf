//! Marker body HTML for the map surface

use aq_core::Category;
use serde::{Deserialize, Serialize};

use crate::html::escape;
use crate::marker::Marker;
use crate::popup::PopupTheme;

/// Directory holding the per-category marker icons
pub const ICON_BASE: &str = "/icons/aq";

/// Marker body style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Category icon
    #[default]
    Emoji,
    /// Colored bubble with the rounded value
    Number,
    /// Plain colored dot
    Node,
}

/// Vertical popup offset in pixels so the popup clears the marker body
pub fn popup_offset(node_type: NodeType) -> u32 {
    match node_type {
        NodeType::Emoji => 58,
        NodeType::Number => 42,
        NodeType::Node => 35,
    }
}

/// Clustering radius in pixels used by the map surface
pub fn cluster_radius(node_type: NodeType) -> u32 {
    match node_type {
        NodeType::Emoji => 40,
        NodeType::Number => 80,
        NodeType::Node => 60,
    }
}

pub fn icon_url(category: Category) -> String {
    format!("{ICON_BASE}/{}.svg", category.icon())
}

pub fn render_node_html(marker: &Marker, node_type: NodeType, selected: bool, theme: PopupTheme) -> String {
    let mut classes = match node_type {
        NodeType::Emoji => String::from("aq-node aq-node-emoji"),
        NodeType::Number => String::from("aq-node aq-node-number"),
        NodeType::Node => String::from("aq-node aq-node-dot"),
    };
    classes.push(' ');
    classes.push_str(marker.color.css_class);
    if selected {
        classes.push_str(" active");
    }
    if theme == PopupTheme::Dark {
        classes.push_str(" dark-marker");
    }

    let id = escape(&marker.site_id);
    let hex = marker.color.hex;

    match node_type {
        NodeType::Emoji => format!(
            r#"<div id="{id}" class="{classes}"><img src="{src}" alt="{alt}" /><span class="arrow"></span></div>"#,
            src = icon_url(marker.category),
            alt = marker.category.label(),
        ),
        NodeType::Number => format!(
            r#"<div id="{id}" class="{classes}" style="background: {hex}; width: 40px; height: 40px;"><p>{label}</p><span class="arrow"></span></div>"#,
            label = escape(&marker.label),
        ),
        NodeType::Node => format!(
            r#"<div id="{id}" class="{classes}" style="background: {hex}; width: 30px; height: 30px;"><span class="arrow"></span></div>"#,
        ),
    }
}
