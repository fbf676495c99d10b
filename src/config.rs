//! Configuration for trigram extraction, model loading and detection.
//!
//! Every struct has serde-backed defaults so a partial JSON document only
//! needs to name the fields it overrides.

use crate::error::{LingramError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum number of trigrams kept per profile.
pub const MAX_TRIGRAMS: usize = 2500;

/// Code points strictly below this bound count as Latin-range.
pub const LATIN_UPPER_BOUND: u32 = 0x024F;

/// Master configuration for a detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Language returned when the input shares no trigram with any model.
    pub default_language: String,
    /// Trigram extraction parameters.
    pub extractor: ExtractorConfig,
    /// Directory of `<tag>.model` files.
    pub model_dir: Option<PathBuf>,
    /// Location of the index snapshot; no caching when unset.
    pub cache_path: Option<PathBuf>,
    /// Tags to load when `model_dir` cannot be listed.
    pub fallback_languages: Option<Vec<String>>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            extractor: ExtractorConfig::default(),
            model_dir: None,
            cache_path: None,
            fallback_languages: None,
        }
    }
}

impl DetectorConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| LingramError::Serialization(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| LingramError::Serialization(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_language.trim().is_empty() {
            return Err(LingramError::Configuration(
                "default_language must not be empty".into(),
            ));
        }
        if self.extractor.max_trigrams == 0 {
            return Err(LingramError::Configuration(
                "extractor.max_trigrams must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Parameters of the trigram extraction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Top-K cap on retained trigrams.
    pub max_trigrams: usize,
    /// Exclusive upper code point of the Latin range.
    pub latin_upper_bound: u32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_trigrams: MAX_TRIGRAMS,
            latin_upper_bound: LATIN_UPPER_BOUND,
        }
    }
}
