use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::upload::UploadConfig;
use analyze::AnalysisConfig;
use detect::HttpClientConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub detector: HttpClientConfig,
    pub analysis: AnalysisConfig,
    pub upload: UploadConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            detector: HttpClientConfig::default(),
            analysis: AnalysisConfig::default(),
            upload: UploadConfig::default(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the JSON file named by `TEXTLENS_CONFIG`, then
    /// `TEXTLENS_*` environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var("TEXTLENS_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.analysis.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("TEXTLENS_BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(url) = lookup("TEXTLENS_DETECTOR_URL") {
            self.detector.base_url = url;
        }
        if let Some(raw) = lookup("TEXTLENS_MAX_CONCURRENCY") {
            self.analysis.max_concurrency = raw
                .parse()
                .with_context(|| format!("Invalid TEXTLENS_MAX_CONCURRENCY: {raw}"))?;
        }
        if let Some(raw) = lookup("TEXTLENS_BATCH_TIMEOUT_MS") {
            let ms: u64 = raw
                .parse()
                .with_context(|| format!("Invalid TEXTLENS_BATCH_TIMEOUT_MS: {raw}"))?;
            self.analysis.batch_timeout_ms = Some(ms);
        }
        if let Some(raw) = lookup("TEXTLENS_INCLUDE_PII") {
            self.analysis.include_pii = raw
                .parse()
                .with_context(|| format!("Invalid TEXTLENS_INCLUDE_PII: {raw}"))?;
        }
        Ok(())
    }
}
