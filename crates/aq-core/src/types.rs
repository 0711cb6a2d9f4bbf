//! Core data types for monitoring sites and their readings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pollutant parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PollutantParseError {
    #[error("Unknown pollutant: {0}")]
    UnknownPollutant(String),
}

/// Measured pollutant.
///
/// Only PM2.5 and PM10 carry threshold tables; the gases are accepted so
/// that feeds carrying them still decode, but they classify as unknown.
/// Deserialization goes through [`FromStr`], so config files and query
/// strings accept the same spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum Pollutant {
    #[default]
    #[serde(rename = "pm2_5")]
    Pm2_5,
    #[serde(rename = "pm10")]
    Pm10,
    #[serde(rename = "no2")]
    No2,
    #[serde(rename = "o3")]
    O3,
    #[serde(rename = "co")]
    Co,
    #[serde(rename = "so2")]
    So2,
}

impl Pollutant {
    /// Key used by the measurements API (`pm2_5`, `pm10`, ...)
    pub fn api_key(self) -> &'static str {
        match self {
            Pollutant::Pm2_5 => "pm2_5",
            Pollutant::Pm10 => "pm10",
            Pollutant::No2 => "no2",
            Pollutant::O3 => "o3",
            Pollutant::Co => "co",
            Pollutant::So2 => "so2",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            Pollutant::Pm2_5 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::No2 => "NO2",
            Pollutant::O3 => "O3",
            Pollutant::Co => "CO",
            Pollutant::So2 => "SO2",
        }
    }

    /// Concentration unit shown next to values
    pub fn unit(self) -> &'static str {
        match self {
            Pollutant::Co => "mg/m³",
            _ => "µg/m³",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_key())
    }
}

impl FromStr for Pollutant {
    type Err = PollutantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pm2_5" | "pm25" | "pm2.5" => Ok(Pollutant::Pm2_5),
            "pm10" => Ok(Pollutant::Pm10),
            "no2" => Ok(Pollutant::No2),
            "o3" => Ok(Pollutant::O3),
            "co" => Ok(Pollutant::Co),
            "so2" => Ok(Pollutant::So2),
            _ => Err(PollutantParseError::UnknownPollutant(s.to_string())),
        }
    }
}

impl TryFrom<String> for Pollutant {
    type Error = PollutantParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Geographic position of a site
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single pollutant reading for a site.
///
/// `value` is `None` when the site reported no data. A value of `0.0` is a
/// real measurement. `time` is `None` when the feed omitted the timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub site_id: String,
    pub pollutant: Pollutant,
    pub value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

/// Snapshot of a monitoring site with its most recent reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parish: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<Reading>,
}
