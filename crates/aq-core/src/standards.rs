//! WHO and NEMA guideline tables
//!
//! These tables describe each category against an organisation's guideline
//! values. They feed labels, descriptions and chart reference lines; the
//! classifier itself always uses the canonical tables in [`crate::classify`].

use crate::category::Category;
use crate::classify::classify;
use crate::color::{color_for, ColorToken};
use crate::types::Pollutant;
use serde::{Deserialize, Serialize};

/// Standards organisation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Organization {
    #[default]
    #[serde(rename = "WHO", alias = "who")]
    Who,
    #[serde(rename = "NEMA", alias = "nema")]
    Nema,
}

impl Organization {
    pub fn label(self) -> &'static str {
        match self {
            Organization::Who => "WHO (World Health Organization)",
            Organization::Nema => "NEMA (Uganda)",
        }
    }
}

/// One category row of a guideline table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standard {
    pub category: Category,
    pub min: f64,
    /// `None` means unbounded
    pub max: Option<f64>,
    pub color: &'static str,
    pub description: &'static str,
}

const GOOD: &str = "#10B981";
const MODERATE: &str = "#F59E0B";
const USG: &str = "#EF4444";
const UNHEALTHY: &str = "#8B5CF6";
const VERY_UNHEALTHY: &str = "#DC2626";
const HAZARDOUS: &str = "#7C2D12";

const fn row(
    category: Category,
    min: f64,
    max: Option<f64>,
    color: &'static str,
    description: &'static str,
) -> Standard {
    Standard {
        category,
        min,
        max,
        color,
        description,
    }
}

pub static WHO_PM2_5: [Standard; 6] = [
    row(Category::Good, 0.0, Some(5.0), GOOD, "WHO 2021 Annual guideline (5 µg/m³) - Minimal health risk"),
    row(Category::Moderate, 5.0, Some(15.0), MODERATE, "Above WHO annual but within 24-hour guideline (15 µg/m³)"),
    row(Category::UnhealthyForSensitiveGroups, 15.0, Some(25.0), USG, "Above WHO 24-hour guideline - sensitive groups may experience health effects"),
    row(Category::Unhealthy, 25.0, Some(35.0), UNHEALTHY, "Everyone may experience health effects"),
    row(Category::VeryUnhealthy, 35.0, Some(75.0), VERY_UNHEALTHY, "Health warnings - emergency conditions"),
    row(Category::Hazardous, 75.0, None, HAZARDOUS, "Health alert - serious risk to everyone"),
];

pub static WHO_PM10: [Standard; 6] = [
    row(Category::Good, 0.0, Some(15.0), GOOD, "WHO 2021 Annual guideline (15 µg/m³) - Minimal health risk"),
    row(Category::Moderate, 15.0, Some(45.0), MODERATE, "Above WHO annual but within 24-hour guideline (45 µg/m³)"),
    row(Category::UnhealthyForSensitiveGroups, 45.0, Some(75.0), USG, "Above WHO 24-hour guideline - sensitive groups may experience health effects"),
    row(Category::Unhealthy, 75.0, Some(150.0), UNHEALTHY, "Everyone may experience health effects"),
    row(Category::VeryUnhealthy, 150.0, Some(250.0), VERY_UNHEALTHY, "Health warnings - emergency conditions"),
    row(Category::Hazardous, 250.0, None, HAZARDOUS, "Health alert - serious risk to everyone"),
];

pub static NEMA_PM2_5: [Standard; 6] = [
    row(Category::Good, 0.0, Some(12.0), GOOD, "Well below NEMA annual limit - Good air quality"),
    row(Category::Moderate, 12.0, Some(25.0), MODERATE, "Within NEMA annual limit (25 µg/m³) - Acceptable"),
    row(Category::UnhealthyForSensitiveGroups, 25.0, Some(35.0), USG, "Above NEMA annual but below 24-hour limit"),
    row(Category::Unhealthy, 35.0, Some(50.0), UNHEALTHY, "Above NEMA 24-hour limit (35 µg/m³)"),
    row(Category::VeryUnhealthy, 50.0, Some(100.0), VERY_UNHEALTHY, "Significantly above NEMA limits"),
    row(Category::Hazardous, 100.0, None, HAZARDOUS, "Extremely high - Health emergency"),
];

pub static NEMA_PM10: [Standard; 6] = [
    row(Category::Good, 0.0, Some(20.0), GOOD, "Well below NEMA annual limit - Good air quality"),
    row(Category::Moderate, 20.0, Some(40.0), MODERATE, "Within NEMA annual limit (40 µg/m³) - Acceptable"),
    row(Category::UnhealthyForSensitiveGroups, 40.0, Some(60.0), USG, "Above NEMA annual but within 24-hour limit"),
    row(Category::Unhealthy, 60.0, Some(100.0), UNHEALTHY, "Above NEMA 24-hour limit (60 µg/m³)"),
    row(Category::VeryUnhealthy, 100.0, Some(200.0), VERY_UNHEALTHY, "Significantly above NEMA limits"),
    row(Category::Hazardous, 200.0, None, HAZARDOUS, "Extremely high - Health emergency"),
];

/// Guideline table for an organisation and pollutant, if one exists
pub fn standards(organization: Organization, pollutant: Pollutant) -> Option<&'static [Standard]> {
    match (organization, pollutant) {
        (Organization::Who, Pollutant::Pm2_5) => Some(&WHO_PM2_5),
        (Organization::Who, Pollutant::Pm10) => Some(&WHO_PM10),
        (Organization::Nema, Pollutant::Pm2_5) => Some(&NEMA_PM2_5),
        (Organization::Nema, Pollutant::Pm10) => Some(&NEMA_PM10),
        _ => None,
    }
}

pub fn threshold_for(
    category: Category,
    organization: Organization,
    pollutant: Pollutant,
) -> Option<&'static Standard> {
    standards(organization, pollutant)?
        .iter()
        .find(|s| s.category == category)
}

/// Display label of a category under an organisation's table, `"No Data"` if absent
pub fn label_for(category: Category, organization: Organization, pollutant: Pollutant) -> &'static str {
    threshold_for(category, organization, pollutant)
        .map(|s| s.category.label())
        .unwrap_or("No Data")
}

/// Annual and 24-hour guideline values used for chart reference lines
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceLines {
    pub pm2_5_annual: f64,
    pub pm2_5_24hr: f64,
    pub pm10_annual: f64,
    pub pm10_24hr: f64,
}

pub fn reference_lines(organization: Organization) -> ReferenceLines {
    match organization {
        Organization::Who => ReferenceLines {
            pm2_5_annual: 5.0,
            pm2_5_24hr: 15.0,
            pm10_annual: 15.0,
            pm10_24hr: 45.0,
        },
        Organization::Nema => ReferenceLines {
            pm2_5_annual: 25.0,
            pm2_5_24hr: 35.0,
            pm10_annual: 40.0,
            pm10_24hr: 60.0,
        },
    }
}

pub fn annual_limit(organization: Organization, pollutant: Pollutant) -> Option<f64> {
    let lines = reference_lines(organization);
    match pollutant {
        Pollutant::Pm2_5 => Some(lines.pm2_5_annual),
        Pollutant::Pm10 => Some(lines.pm10_annual),
        _ => None,
    }
}

/// Everything a badge needs to show for a value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityInfo {
    pub category: Category,
    pub label: &'static str,
    pub color: ColorToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

pub fn info_for(value: Option<f64>, pollutant: Pollutant, organization: Organization) -> AirQualityInfo {
    let category = classify(value, pollutant);
    AirQualityInfo {
        category,
        label: label_for(category, organization, pollutant),
        color: color_for(category),
        description: threshold_for(category, organization, pollutant).map(|s| s.description),
    }
}
