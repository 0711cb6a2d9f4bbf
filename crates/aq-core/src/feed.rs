//! Decoding of the map-readings measurement feed

use crate::types::{GeoPoint, Pollutant, Reading, Site};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

/// Feed decoding error
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Feed reported failure: {0}")]
    Unsuccessful(String),
}

/// Top-level measurements response
#[derive(Debug, Clone, Deserialize)]
pub struct MeasurementsResponse {
    #[serde(default = "default_success")]
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,

    /// Raw entries, decoded one by one so a malformed entry only drops itself
    #[serde(default)]
    pub measurements: Vec<serde_json::Value>,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct Measurement {
    #[serde(default)]
    pub site_id: Option<String>,

    #[serde(default)]
    pub time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub pm2_5: Option<PollutantValue>,

    #[serde(default)]
    pub pm10: Option<PollutantValue>,

    #[serde(default)]
    pub no2: Option<PollutantValue>,

    #[serde(default, rename = "siteDetails")]
    pub site_details: Option<SiteDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollutantValue {
    #[serde(default)]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteDetails {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub formatted_name: Option<String>,

    #[serde(default)]
    pub approximate_latitude: Option<f64>,

    #[serde(default)]
    pub approximate_longitude: Option<f64>,

    #[serde(default)]
    pub division: Option<String>,

    #[serde(default)]
    pub parish: Option<String>,
}

impl Measurement {
    fn value_of(&self, pollutant: Pollutant) -> Option<f64> {
        let slot = match pollutant {
            Pollutant::Pm2_5 => self.pm2_5.as_ref(),
            Pollutant::Pm10 => self.pm10.as_ref(),
            Pollutant::No2 => self.no2.as_ref(),
            Pollutant::O3 | Pollutant::Co | Pollutant::So2 => None,
        };
        slot.and_then(|v| v.value)
    }

    /// Convert to a site snapshot. Entries without site details yield `None`.
    pub fn to_site(&self, pollutant: Pollutant) -> Option<Site> {
        let details = self.site_details.as_ref()?;

        let location = match (details.approximate_latitude, details.approximate_longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        };

        let value = self.value_of(pollutant);
        let latest = (value.is_some() || self.time.is_some()).then(|| Reading {
            site_id: details.id.clone(),
            pollutant,
            value,
            time: self.time,
        });

        let name = details
            .name
            .clone()
            .or_else(|| details.formatted_name.clone())
            .unwrap_or_else(|| details.id.clone());

        Some(Site {
            id: details.id.clone(),
            name,
            location,
            division: details.division.clone(),
            parish: details.parish.clone(),
            latest,
        })
    }
}

impl MeasurementsResponse {
    /// Site snapshots for `pollutant`, dropping malformed entries and
    /// entries with no site details
    pub fn into_sites(self, pollutant: Pollutant) -> Result<Vec<Site>, FeedError> {
        if !self.success {
            return Err(FeedError::Unsuccessful(
                self.message.unwrap_or_else(|| "no message".to_string()),
            ));
        }

        let total = self.measurements.len();
        let mut malformed = 0usize;
        let mut sites = Vec::with_capacity(total);
        for entry in self.measurements {
            match serde_json::from_value::<Measurement>(entry) {
                Ok(m) => sites.extend(m.to_site(pollutant)),
                Err(e) => {
                    malformed += 1;
                    debug!(error = %e, "malformed measurement");
                }
            }
        }

        if sites.len() < total {
            warn!(
                dropped = total - sites.len(),
                malformed,
                total,
                "measurements dropped"
            );
        }
        Ok(sites)
    }
}

/// Decode a measurements payload into site snapshots
pub fn decode_sites(json: &str, pollutant: Pollutant) -> Result<Vec<Site>, FeedError> {
    let response: MeasurementsResponse = serde_json::from_str(json)?;
    response.into_sites(pollutant)
}
