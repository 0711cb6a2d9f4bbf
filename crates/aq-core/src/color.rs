//! Category palette

use crate::category::Category;
use serde::Serialize;

/// Display color for a category: a hex value and the matching CSS class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorToken {
    pub hex: &'static str,
    pub css_class: &'static str,
}

/// Color for a category.
///
/// The match has no wildcard arm so a new category fails to compile until it
/// is given a color.
pub fn color_for(category: Category) -> ColorToken {
    let (hex, css_class) = match category {
        Category::Good => ("#34C759", "aq-good"),
        Category::Moderate => ("#ECAA06", "aq-moderate"),
        Category::UnhealthyForSensitiveGroups => ("#FF851F", "aq-unhealthy-sensitive-groups"),
        Category::Unhealthy => ("#F7453C", "aq-unhealthy"),
        Category::VeryUnhealthy => ("#AC5CD9", "aq-very-unhealthy"),
        Category::Hazardous => ("#D95BA3", "aq-hazardous"),
        Category::Unknown => ("#6B7280", "aq-no-value"),
    };
    ColorToken { hex, css_class }
}
