use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::{decode_sites, Pollutant, Site};

/// Source of site snapshots handed to the renderers
#[async_trait::async_trait]
pub trait DataProvider: Send + Sync {
    /// Current snapshot, with each site's latest reading for `pollutant`
    /// where the source can select one
    async fn sites(&self, pollutant: Pollutant) -> Result<Vec<Site>>;
}

/// Fixed, in-memory snapshot
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    sites: Vec<Site>,
}

impl StaticProvider {
    pub fn new(sites: Vec<Site>) -> Self {
        Self { sites }
    }
}

#[async_trait::async_trait]
impl DataProvider for StaticProvider {
    async fn sites(&self, _pollutant: Pollutant) -> Result<Vec<Site>> {
        Ok(self.sites.clone())
    }
}

/// Reads a measurements feed saved to disk, re-reading on every call
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl DataProvider for FileProvider {
    async fn sites(&self, pollutant: Pollutant) -> Result<Vec<Site>> {
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let sites = decode_sites(&raw, pollutant)
            .with_context(|| format!("failed to decode {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), count = sites.len(), "loaded sites");
        Ok(sites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_provider_returns_snapshot() {
        let site = Site {
            id: "s1".into(),
            name: "Nakawa".into(),
            location: None,
            division: None,
            parish: None,
            latest: None,
        };
        let provider = StaticProvider::new(vec![site.clone()]);
        assert_eq!(provider.sites(Pollutant::Pm10).await.unwrap(), vec![site]);
    }

    #[tokio::test]
    async fn file_provider_reads_feed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sites.json");
        std::fs::write(
            &path,
            r#"{"measurements":[{"time":"2024-05-01T12:00:00Z","pm2_5":{"value":7.5},
                "siteDetails":{"_id":"s9","name":"Bugolobi"}}]}"#,
        )
        .unwrap();

        let provider = FileProvider::new(&path);
        let sites = provider.sites(Pollutant::Pm2_5).await.unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].latest.as_ref().unwrap().value, Some(7.5));
    }

    #[tokio::test]
    async fn file_provider_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileProvider::new(dir.path().join("absent.json"));
        let err = provider.sites(Pollutant::Pm2_5).await.unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
