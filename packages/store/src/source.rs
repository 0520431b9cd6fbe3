// ABOUTME: LeadSource trait and implementations for loading the lead collection
// ABOUTME: Seed, JSON file, and static sources behind one async interface

use crate::seed::example_leads;
use async_trait::async_trait;
use chrono::Utc;
use leadstage_core::Lead;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read leads from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse leads from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Lead source unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// Supplies the full lead collection to the store
#[async_trait]
pub trait LeadSource: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    async fn load_leads(&self) -> Result<Vec<Lead>>;
}

/// Curated example leads returned after a simulated network delay
#[derive(Debug, Clone)]
pub struct SeedSource {
    delay: Duration,
}

impl SeedSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SeedSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(leadstage_core::DEFAULT_FETCH_DELAY_MS))
    }
}

#[async_trait]
impl LeadSource for SeedSource {
    fn name(&self) -> &'static str {
        "seed"
    }

    async fn load_leads(&self) -> Result<Vec<Lead>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(example_leads(Utc::now()))
    }
}

/// Leads read from a JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LeadSource for JsonFileSource {
    fn name(&self) -> &'static str {
        "json-file"
    }

    async fn load_leads(&self) -> Result<Vec<Lead>> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;

        let leads: Vec<Lead> =
            serde_json::from_str(&contents).map_err(|source| SourceError::Parse {
                path: self.path.clone(),
                source,
            })?;

        debug!("Read {} leads from {}", leads.len(), self.path.display());
        Ok(leads)
    }
}

/// Fixed, in-memory collection
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    leads: Vec<Lead>,
}

impl StaticSource {
    pub fn new(leads: Vec<Lead>) -> Self {
        Self { leads }
    }
}

#[async_trait]
impl LeadSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn load_leads(&self) -> Result<Vec<Lead>> {
        Ok(self.leads.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadstage_core::{Stage, StageGroup};
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_seed_source_returns_examples() {
        let source = SeedSource::new(Duration::ZERO);
        let leads = assert_ok!(source.load_leads().await);
        assert_eq!(leads.len(), 12);
        assert_eq!(leads[0].name, "Bryan Bayless");
    }

    #[tokio::test(start_paused = true)]
    async fn test_seed_source_waits_for_delay() {
        let source = SeedSource::new(Duration::from_millis(100));
        let started = tokio::time::Instant::now();
        source.load_leads().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_json_file_source_reads_leads() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": 1, "name": "Bryan Bayless", "emails": ["bayless.b@excellence.io"],
                  "leadStage": "NOT_INTERESTED", "leadStageGroup": "NEW"}},
                {{"id": 2, "name": "David Pierce"}}
            ]"#
        )
        .unwrap();

        let source = JsonFileSource::new(file.path());
        let leads = assert_ok!(source.load_leads().await);
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].stage(), Stage::NotInterested);
        // Group always follows the stage, whatever the file says
        assert_eq!(leads[0].stage_group(), StageGroup::Closed);
        assert_eq!(leads[1].stage(), Stage::New);
    }

    #[tokio::test]
    async fn test_json_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("missing.json"));
        let err = assert_err!(source.load_leads().await);
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn test_json_file_source_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"leads\": []}}").unwrap();
        let err = JsonFileSource::new(file.path()).load_leads().await.unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticSource::new(vec![Lead::new(42, "Olivia Bennett")]);
        let leads = source.load_leads().await.unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].id, 42);
        assert_eq!(source.name(), "static");
    }
}
