//! Language detection against a built index.
//!
//! Scoring is a sparse dot product between the input profile and every
//! reference profile that shares at least one trigram with it. Both sides are
//! unit length, so the score is their cosine similarity.

use crate::config::DetectorConfig;
use crate::error::{LingramError, Result};
use crate::index::{LanguageIndex, SharedIndex};
use crate::model::DirectorySource;
use crate::trigram::{sorted_entries, TrigramExtractor};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{trace, warn};

/// Outcome of one detection call.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Winning language tag.
    pub language: String,
    /// Accumulated dot product of the winner; 0.0 on fallback.
    pub score: f64,
    /// True when no input trigram matched and the default was returned.
    pub fallback: bool,
}

impl Detection {
    fn fallback(language: &str) -> Self {
        Self {
            language: language.to_string(),
            score: 0.0,
            fallback: true,
        }
    }
}

/// Detects languages using a shared, read-only index.
#[derive(Debug, Clone)]
pub struct Detector {
    index: Arc<LanguageIndex>,
    extractor: TrigramExtractor,
    default_language: String,
}

/// Build the index described by `cfg`: models from `cfg.model_dir`, reusing
/// the snapshot at `cfg.cache_path` when valid.
pub fn load_index(cfg: &DetectorConfig) -> Result<LanguageIndex> {
    cfg.validate()?;
    let dir = cfg.model_dir.as_ref().ok_or_else(|| {
        LingramError::Configuration("model_dir is required to build an index".into())
    })?;
    let mut source = DirectorySource::new(dir);
    if let Some(tags) = &cfg.fallback_languages {
        source = source.with_fallback(tags.iter().cloned());
    }
    LanguageIndex::load_or_build(&source, cfg.cache_path.as_deref())
}

impl Detector {
    pub fn new(index: Arc<LanguageIndex>, cfg: &DetectorConfig) -> Self {
        if !index.contains_language(&cfg.default_language) {
            warn!(
                default_language = %cfg.default_language,
                "default language has no model in the index"
            );
        }
        Self {
            index,
            extractor: TrigramExtractor::new(cfg.extractor),
            default_language: cfg.default_language.clone(),
        }
    }

    /// Load models (or a snapshot) per `cfg` and wrap them in a detector.
    pub fn from_config(cfg: &DetectorConfig) -> Result<Self> {
        let index = load_index(cfg)?;
        Ok(Self::new(Arc::new(index), cfg))
    }

    /// Like [`Detector::from_config`], but the index is built only on the
    /// first call for a given `shared` holder.
    pub fn from_shared(shared: &SharedIndex, cfg: &DetectorConfig) -> Result<Self> {
        let index = shared.get_or_try_init(|| load_index(cfg))?;
        Ok(Self::new(index, cfg))
    }

    pub fn index(&self) -> &Arc<LanguageIndex> {
        &self.index
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Per-language scores; `None` for languages with no shared trigram.
    fn accumulate(&self, text: &str) -> Vec<Option<f64>> {
        let mut scores: Vec<Option<f64>> = vec![None; self.index.languages().len()];
        let profile = self.extractor.extract(text);
        // Fixed summation order keeps scores bit-identical across calls
        for (trigram, weight) in sorted_entries(&profile) {
            for (id, reference) in self.index.postings_for(trigram).raw() {
                let slot = scores[*id as usize].get_or_insert(0.0);
                *slot += reference * weight;
            }
        }
        scores
    }

    /// Scores of every language sharing at least one trigram with `text`.
    pub fn scores(&self, text: &str) -> BTreeMap<String, f64> {
        self.accumulate(text)
            .into_iter()
            .enumerate()
            .filter_map(|(id, s)| s.map(|s| (self.index.languages()[id].clone(), s)))
            .collect()
    }

    /// Detect the language of `text`.
    ///
    /// Ties go to the lexicographically lowest tag. Input without any known
    /// trigram yields the default language.
    pub fn detect(&self, text: &str) -> Detection {
        let mut best: Option<(usize, f64)> = None;
        // Ids ascend in tag order; strict `>` keeps the lowest tag on ties
        for (id, score) in self.accumulate(text).into_iter().enumerate() {
            let Some(score) = score else { continue };
            match best {
                Some((_, b)) if score <= b => {}
                _ => best = Some((id, score)),
            }
        }

        match best {
            Some((id, score)) => {
                let language = self.index.languages()[id].clone();
                trace!(language = %language, score, "detected");
                Detection {
                    language,
                    score,
                    fallback: false,
                }
            }
            None => {
                trace!(default = %self.default_language, "no trigram overlap, using default");
                Detection::fallback(&self.default_language)
            }
        }
    }

    /// Winning tag only.
    pub fn detect_language(&self, text: &str) -> String {
        self.detect(text).language
    }

    /// Detect many texts in parallel; results keep input order.
    pub fn detect_batch<S>(&self, texts: &[S]) -> Vec<Detection>
    where
        S: AsRef<str> + Sync,
    {
        texts.par_iter().map(|t| self.detect(t.as_ref())).collect()
    }
}
