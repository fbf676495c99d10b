//! Inverted trigram → language index.
//!
//! Built once from a complete model set and immutable afterwards. Language
//! tags are interned in sorted order, so a language id doubles as its rank
//! in lexicographic tag order.

pub mod cache;
pub mod shared;

pub use shared::SharedIndex;

use crate::error::{LingramError, Result};
use crate::model::{LanguageModel, ModelSource};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

/// Interned language id; index into [`LanguageIndex::languages`].
pub type LanguageId = u32;

/// Inverted index over all reference models.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageIndex {
    languages: Vec<String>,
    postings: HashMap<String, Vec<(LanguageId, f64)>>,
}

/// The languages that contain one trigram, with their reference weights.
#[derive(Debug, Clone, Copy)]
pub struct Postings<'a> {
    languages: &'a [String],
    entries: &'a [(LanguageId, f64)],
}

impl<'a> Postings<'a> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, language: &str) -> Option<f64> {
        self.iter().find(|(l, _)| *l == language).map(|(_, w)| w)
    }

    /// (tag, weight) pairs in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        let (languages, entries) = (self.languages, self.entries);
        entries
            .iter()
            .map(move |(id, w)| (languages[*id as usize].as_str(), *w))
    }

    pub(crate) fn raw(&self) -> &'a [(LanguageId, f64)] {
        self.entries
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.iter().map(|(l, w)| (l.to_string(), w)).collect()
    }
}

impl LanguageIndex {
    /// Invert a model set. Each tag must appear exactly once; models are
    /// normalized if they are not already.
    pub fn build<I>(models: I) -> Result<Self>
    where
        I: IntoIterator<Item = LanguageModel>,
    {
        let mut models: Vec<LanguageModel> = models.into_iter().collect();
        if models.is_empty() {
            return Err(LingramError::Configuration(
                "cannot build an index from an empty model set".into(),
            ));
        }

        let mut seen = HashSet::new();
        for model in &models {
            if !seen.insert(model.language().to_string()) {
                return Err(LingramError::DuplicateLanguage(model.language().to_string()));
            }
        }

        models.sort_by(|a, b| a.language().cmp(b.language()));
        let mut languages = Vec::with_capacity(models.len());
        let mut postings: HashMap<String, Vec<(LanguageId, f64)>> = HashMap::new();
        for (id, mut model) in models.into_iter().enumerate() {
            model.normalize();
            let (language, trigrams) = model.into_parts();
            debug!(language = %language, trigrams = trigrams.len(), "indexing model");
            for (trigram, weight) in trigrams {
                postings
                    .entry(trigram)
                    .or_default()
                    .push((id as LanguageId, weight));
            }
            languages.push(language);
        }

        let index = Self { languages, postings };
        info!(
            languages = index.languages.len(),
            trigrams = index.postings.len(),
            "language index built"
        );
        Ok(index)
    }

    /// Load every model of `source` and build. Any load failure aborts.
    pub fn from_source(source: &dyn ModelSource) -> Result<Self> {
        Self::build(source.load_all()?)
    }

    /// Postings of one trigram; empty when no language contains it.
    pub fn postings_for(&self, trigram: &str) -> Postings<'_> {
        Postings {
            languages: &self.languages,
            entries: self.postings.get(trigram).map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    /// Indexed tags in ascending order.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn language(&self, id: LanguageId) -> &str {
        &self.languages[id as usize]
    }

    pub fn contains_language(&self, language: &str) -> bool {
        self.languages.binary_search_by(|l| l.as_str().cmp(language)).is_ok()
    }

    /// Number of distinct trigrams.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Every (trigram, language, weight) triple, sorted by trigram then tag.
    pub fn triples(&self) -> Vec<(String, String, f64)> {
        let mut out: Vec<(String, String, f64)> = self
            .postings
            .iter()
            .flat_map(|(trigram, entries)| {
                entries
                    .iter()
                    .map(move |(id, w)| (trigram.clone(), self.language(*id).to_string(), *w))
            })
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        out
    }

    /// Rebuild from triples, e.g. a decoded snapshot. `languages` must be the
    /// full sorted tag list.
    pub(crate) fn from_triples(
        languages: Vec<String>,
        triples: Vec<(String, String, f64)>,
    ) -> Result<Self> {
        if languages.is_empty() {
            return Err(LingramError::Snapshot("language list is empty".into()));
        }
        if languages.windows(2).any(|w| w[0] >= w[1]) {
            return Err(LingramError::Snapshot(
                "language list is not sorted and unique".into(),
            ));
        }
        let mut postings: HashMap<String, Vec<(LanguageId, f64)>> = HashMap::new();
        for (trigram, language, weight) in triples {
            let id = languages
                .binary_search(&language)
                .map_err(|_| LingramError::Snapshot(format!("unknown language '{}'", language)))?;
            let entries = postings.entry(trigram).or_default();
            if entries.iter().any(|(l, _)| *l as usize == id) {
                return Err(LingramError::DuplicateLanguage(language));
            }
            entries.push((id as LanguageId, weight));
        }
        for entries in postings.values_mut() {
            entries.sort_by_key(|(id, _)| *id);
        }
        Ok(Self { languages, postings })
    }
}
