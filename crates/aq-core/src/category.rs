//! Air-quality categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete severity bucket for a pollutant concentration.
///
/// Variants are declared in severity order so the derived `Ord` ranks them;
/// `Unknown` sorts after `Hazardous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "good")]
    Good,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "unhealthy-sensitive-groups")]
    UnhealthyForSensitiveGroups,
    #[serde(rename = "unhealthy")]
    Unhealthy,
    #[serde(rename = "very-unhealthy")]
    VeryUnhealthy,
    #[serde(rename = "hazardous")]
    Hazardous,
    #[serde(rename = "no-value")]
    Unknown,
}

impl Category {
    /// Every category, in severity order
    pub const ALL: [Category; 7] = [
        Category::Good,
        Category::Moderate,
        Category::UnhealthyForSensitiveGroups,
        Category::Unhealthy,
        Category::VeryUnhealthy,
        Category::Hazardous,
        Category::Unknown,
    ];

    /// Stable identifier (`good`, `unhealthy-sensitive-groups`, `no-value`, ...)
    pub fn slug(self) -> &'static str {
        match self {
            Category::Good => "good",
            Category::Moderate => "moderate",
            Category::UnhealthyForSensitiveGroups => "unhealthy-sensitive-groups",
            Category::Unhealthy => "unhealthy",
            Category::VeryUnhealthy => "very-unhealthy",
            Category::Hazardous => "hazardous",
            Category::Unknown => "no-value",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Moderate => "Moderate",
            Category::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Category::Unhealthy => "Unhealthy",
            Category::VeryUnhealthy => "Very Unhealthy",
            Category::Hazardous => "Hazardous",
            Category::Unknown => "No Data",
        }
    }

    /// Name of the marker icon asset for this category
    pub fn icon(self) -> &'static str {
        match self {
            Category::Good => "GoodAir",
            Category::Moderate => "ModerateAir",
            Category::UnhealthyForSensitiveGroups => "UnhealthyForSensitiveGroups",
            Category::Unhealthy => "Unhealthy",
            Category::VeryUnhealthy => "VeryUnhealthy",
            Category::Hazardous => "Hazardous",
            Category::Unknown => "Invalid",
        }
    }

    pub fn is_known(self) -> bool {
        self != Category::Unknown
    }

    /// Lenient parse of an `aqi_category` string coming from the API.
    ///
    /// Case, spaces and punctuation are ignored. Anything unrecognised is
    /// `Unknown`.
    pub fn from_api_label(raw: &str) -> Category {
        let normalized: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "good" | "goodair" => Category::Good,
            "moderate" | "moderateair" => Category::Moderate,
            "unhealthyforsensitivegroups"
            | "unhealthyforsensitivegroup"
            | "unhealthyforsensitive"
            | "unhealthysensitivegroups" => Category::UnhealthyForSensitiveGroups,
            "unhealthy" => Category::Unhealthy,
            "veryunhealthy" | "veryunhealthyair" => Category::VeryUnhealthy,
            "hazardous" => Category::Hazardous,
            _ => Category::Unknown,
        }
    }

    /// Health advice for this category over `period` ("today", "this week", ...)
    pub fn advice(self, period: &str) -> String {
        let weekly = period.eq_ignore_ascii_case("this week");
        match self {
            Category::Good => {
                "Enjoy the day with confidence in the clean air around you.".to_string()
            }
            Category::Moderate if weekly => "This week is a great time to be outdoors.".to_string(),
            Category::Moderate => format!(
                "{} is a great day for an outdoor activity.",
                capitalize(period)
            ),
            Category::UnhealthyForSensitiveGroups => {
                "Reduce the intensity of your outdoor activities.".to_string()
            }
            Category::Unhealthy => format!(
                "Avoid activities that make you breathe more rapidly. {} is the perfect time to spend indoors reading.",
                capitalize(period)
            ),
            Category::VeryUnhealthy => "Reduce the intensity of your outdoor activities. Try to stay indoors until the air quality improves.".to_string(),
            Category::Hazardous => "If you have to spend a lot of time outside, disposable masks like the N95 are helpful.".to_string(),
            Category::Unknown => String::new(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
