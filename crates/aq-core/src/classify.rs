//! Threshold tables and the concentration classifier

use crate::category::Category;
use crate::types::{Pollutant, Reading};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// What a threshold band resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Category(Category),
    /// Above the highest defined band; readings here are treated as invalid
    Overflow,
}

/// Lower bound of a band, inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdBand {
    pub lower_bound: f64,
    pub band: Band,
}

const fn band(lower_bound: f64, category: Category) -> ThresholdBand {
    ThresholdBand {
        lower_bound,
        band: Band::Category(category),
    }
}

const fn overflow(lower_bound: f64) -> ThresholdBand {
    ThresholdBand {
        lower_bound,
        band: Band::Overflow,
    }
}

/// PM2.5 bands in µg/m³, highest first
pub const PM2_5_BANDS: [ThresholdBand; 7] = [
    overflow(500.5),
    band(225.5, Category::Hazardous),
    band(125.5, Category::VeryUnhealthy),
    band(55.5, Category::Unhealthy),
    band(35.5, Category::UnhealthyForSensitiveGroups),
    band(9.1, Category::Moderate),
    band(0.0, Category::Good),
];

/// PM10 bands in µg/m³, highest first
pub const PM10_BANDS: [ThresholdBand; 7] = [
    overflow(604.1),
    band(424.1, Category::Hazardous),
    band(354.1, Category::VeryUnhealthy),
    band(254.1, Category::Unhealthy),
    band(154.1, Category::UnhealthyForSensitiveGroups),
    band(54.1, Category::Moderate),
    band(0.0, Category::Good),
];

/// How a reading of exactly zero is interpreted.
///
/// Some dashboards historically blanked zero readings. `Missing` reproduces
/// that; `Valid` classifies zero as `Good`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroReading {
    #[default]
    Valid,
    Missing,
}

impl ZeroReading {
    /// Apply the policy to a raw value
    pub fn apply(self, value: Option<f64>) -> Option<f64> {
        match (self, value) {
            (ZeroReading::Missing, Some(v)) if v == 0.0 => None,
            (_, value) => value,
        }
    }
}

/// Threshold bands for a pollutant, highest first. Empty when no table exists.
pub fn bands(pollutant: Pollutant) -> &'static [ThresholdBand] {
    match pollutant {
        Pollutant::Pm2_5 => &PM2_5_BANDS,
        Pollutant::Pm10 => &PM10_BANDS,
        Pollutant::No2 | Pollutant::O3 | Pollutant::Co | Pollutant::So2 => &[],
    }
}

/// Classify a concentration.
///
/// Missing, negative, NaN and overflowing values are `Unknown`.
pub fn classify(value: Option<f64>, pollutant: Pollutant) -> Category {
    let Some(value) = value else {
        return Category::Unknown;
    };
    // Also rejects NaN
    if !(value >= 0.0) {
        return Category::Unknown;
    }

    bands(pollutant)
        .iter()
        .find(|b| value >= b.lower_bound)
        .map(|b| match b.band {
            Band::Category(category) => category,
            Band::Overflow => Category::Unknown,
        })
        .unwrap_or(Category::Unknown)
}

/// Classify a reading, honouring the zero-reading policy
pub fn classify_reading(reading: &Reading, zero: ZeroReading) -> Category {
    classify(zero.apply(reading.value), reading.pollutant)
}

/// Half-open `[lower, upper)` interval a category occupies in a table
pub fn band_range(category: Category, pollutant: Pollutant) -> Option<Range<f64>> {
    let table = bands(pollutant);
    let idx = table
        .iter()
        .position(|b| b.band == Band::Category(category))?;
    // The overflow band always sits above the highest category
    let upper = table.get(idx.checked_sub(1)?)?.lower_bound;
    Some(table[idx].lower_bound..upper)
}
