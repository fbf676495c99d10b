//! Where language models come from.

use crate::error::{LingramError, Result};
use crate::model::{LanguageModel, MODEL_EXTENSION};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Tags shipped with the reference model set.
pub const DEFAULT_LANGUAGES: &[&str] = &[
    "ar", "bg", "ca", "cs", "da", "de", "el", "en", "eo", "es", "fa", "fi", "fr", "hr", "hu",
    "in", "it", "iw", "ja", "ko", "lt", "nl", "no", "pt", "ro", "ru", "sk", "sl", "sr", "th",
    "tr", "uk", "vi", "zh",
];

/// A collection of language models addressable by tag.
pub trait ModelSource: Send + Sync {
    /// Tags this source can provide, in load order.
    fn languages(&self) -> Result<Vec<String>>;

    /// Load the model for one tag.
    fn load(&self, language: &str) -> Result<LanguageModel>;

    /// Load every model listed by [`ModelSource::languages`]. The first
    /// failure aborts.
    fn load_all(&self) -> Result<Vec<LanguageModel>> {
        self.languages()?
            .iter()
            .map(|language| self.load(language))
            .collect()
    }
}

/// A directory of `<tag>.model` files.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    fallback: Option<Vec<String>>,
}

impl DirectorySource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            fallback: None,
        }
    }

    /// Tags to use when the directory cannot be listed.
    pub fn with_fallback<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn scan(&self) -> std::io::Result<Vec<String>> {
        let mut tags = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(MODEL_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                tags.push(stem.to_string());
            }
        }
        tags.sort();
        Ok(tags)
    }
}

impl ModelSource for DirectorySource {
    fn languages(&self) -> Result<Vec<String>> {
        match self.scan() {
            Ok(tags) => {
                debug!(dir = %self.dir.display(), count = tags.len(), "model directory scanned");
                Ok(tags)
            }
            Err(e) => match &self.fallback {
                Some(tags) => {
                    warn!(
                        dir = %self.dir.display(),
                        error = %e,
                        "model directory unreadable, using static language list"
                    );
                    Ok(tags.clone())
                }
                None => Err(LingramError::Configuration(format!(
                    "cannot list model directory {}: {}",
                    self.dir.display(),
                    e
                ))),
            },
        }
    }

    fn load(&self, language: &str) -> Result<LanguageModel> {
        LanguageModel::load(language, LanguageModel::path_in(&self.dir, language))
    }
}

/// Models held in memory, e.g. built from corpora or synthetic test data.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    models: Vec<LanguageModel>,
}

impl MemorySource {
    pub fn new(models: Vec<LanguageModel>) -> Self {
        Self { models }
    }

    pub fn push(&mut self, model: LanguageModel) {
        self.models.push(model);
    }
}

impl ModelSource for MemorySource {
    fn languages(&self) -> Result<Vec<String>> {
        Ok(self.models.iter().map(|m| m.language().to_string()).collect())
    }

    fn load(&self, language: &str) -> Result<LanguageModel> {
        self.models
            .iter()
            .find(|m| m.language() == language)
            .cloned()
            .ok_or_else(|| {
                LingramError::Configuration(format!("no model for language '{}'", language))
            })
    }

    // Duplicate tags must reach the index builder unchanged
    fn load_all(&self) -> Result<Vec<LanguageModel>> {
        Ok(self.models.clone())
    }
}
