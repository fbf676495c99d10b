//! Per-language reference models.
//!
//! A model is the normalized profile of the most frequent trigrams of one
//! language. Models are generated from a training corpus once, persisted as
//! `<tag>.model` files and loaded back without re-running extraction.

pub mod codec;
pub mod source;

pub use source::{DirectorySource, MemorySource, ModelSource, DEFAULT_LANGUAGES};

use crate::error::{LingramError, Result};
use crate::trigram::{normalize, TrigramExtractor, TrigramVector};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension of persisted models.
pub const MODEL_EXTENSION: &str = "model";

/// One language's reference trigram profile.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageModel {
    language: String,
    trigrams: TrigramVector,
    normalized: bool,
}

impl LanguageModel {
    /// Wrap raw weights; call [`LanguageModel::normalize`] before indexing
    /// unless they are already unit length.
    pub fn new(language: impl Into<String>, trigrams: TrigramVector) -> Self {
        Self {
            language: language.into(),
            trigrams,
            normalized: false,
        }
    }

    /// Wrap weights that are known to be normalized, e.g. read from disk.
    pub fn from_normalized(language: impl Into<String>, trigrams: TrigramVector) -> Self {
        Self {
            language: language.into(),
            trigrams,
            normalized: true,
        }
    }

    /// Generate a model from a training corpus.
    pub fn from_text(language: impl Into<String>, corpus: &str, extractor: &TrigramExtractor) -> Self {
        Self::from_normalized(language, extractor.extract(corpus))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn trigrams(&self) -> &TrigramVector {
        &self.trigrams
    }

    pub fn len(&self) -> usize {
        self.trigrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trigrams.is_empty()
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// L2-normalize the weights. No-op after the first call.
    pub fn normalize(&mut self) {
        if self.normalized {
            return;
        }
        normalize(&mut self.trigrams);
        self.normalized = true;
    }

    pub fn into_parts(self) -> (String, TrigramVector) {
        (self.language, self.trigrams)
    }

    /// Path of the model file for `language` inside `dir`.
    pub fn path_in(dir: &Path, language: &str) -> PathBuf {
        dir.join(format!("{}.{}", language, MODEL_EXTENSION))
    }

    /// Parse a persisted model from a reader.
    pub fn read_from<R: Read>(language: &str, mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        let trigrams = codec::decode(language, &data)?;
        debug!(language, trigrams = trigrams.len(), "model decoded");
        Ok(Self::from_normalized(language, trigrams))
    }

    /// Load a model file. A missing or unreadable file is a configuration
    /// error.
    pub fn load<P: AsRef<Path>>(language: &str, path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            LingramError::Configuration(format!(
                "cannot open model '{}' at {}: {}",
                language,
                path.display(),
                e
            ))
        })?;
        Self::read_from(language, file)
    }

    /// Serialize this model; normalizes first if needed.
    pub fn write_to<W: Write>(&mut self, writer: W) -> Result<()> {
        self.normalize();
        let mut writer = BufWriter::new(writer);
        codec::encode(&self.trigrams, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write `<dir>/<tag>.model` and return its path.
    pub fn save<P: AsRef<Path>>(&mut self, dir: P) -> Result<PathBuf> {
        let path = Self::path_in(dir.as_ref(), &self.language);
        let file = File::create(&path)?;
        self.write_to(file)?;
        debug!(language = %self.language, path = %path.display(), "model saved");
        Ok(path)
    }
}
