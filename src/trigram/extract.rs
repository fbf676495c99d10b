//! Trigram extraction from raw text.

use crate::config::ExtractorConfig;
use crate::trigram::{normalize, TrigramVector};
use std::collections::HashMap;

/// Turns text into a capped, L2-normalized trigram profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrigramExtractor {
    cfg: ExtractorConfig,
}

/// Character classification totals gathered while scanning windows.
///
/// Every character is counted once per window it appears in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptBalance {
    pub latin: usize,
    pub non_latin: usize,
}

impl ScriptBalance {
    pub fn non_latin_dominant(&self) -> bool {
        self.non_latin > self.latin
    }
}

impl TrigramExtractor {
    pub fn new(cfg: ExtractorConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.cfg
    }

    #[inline]
    fn is_latin(&self, c: char) -> bool {
        (c as u32) < self.cfg.latin_upper_bound
    }

    /// Extract the normalized profile of `text`.
    ///
    /// The result is either empty or has unit norm and at most
    /// `max_trigrams` entries.
    pub fn extract(&self, text: &str) -> TrigramVector {
        let (mut counts, balance) = self.count(text);

        if balance.non_latin_dominant() {
            counts.retain(|(trigram, _)| !trigram.chars().any(|c| self.is_latin(c)));
        }

        // Stable: equal counts keep first-seen order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(self.cfg.max_trigrams);

        let mut vector: TrigramVector = counts
            .into_iter()
            .map(|(trigram, count)| (trigram.to_string(), count as f64))
            .collect();
        normalize(&mut vector);
        vector
    }

    /// Raw window counts in first-seen order, plus the script balance.
    pub fn count<'t>(&self, text: &'t str) -> (Vec<(&'t str, u32)>, ScriptBalance) {
        // Byte offset of every char boundary, including the end of the text
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = bounds.len() - 1;
        let mut balance = ScriptBalance::default();
        if char_count < 3 {
            return (Vec::new(), balance);
        }

        let mut slots: HashMap<&'t str, usize> = HashMap::new();
        let mut counts: Vec<(&'t str, u32)> = Vec::new();
        for start in 0..=char_count - 3 {
            let trigram = &text[bounds[start]..bounds[start + 3]];
            match slots.get(trigram) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    slots.insert(trigram, counts.len());
                    counts.push((trigram, 1));
                }
            }
            for c in trigram.chars() {
                if self.is_latin(c) {
                    balance.latin += 1;
                } else {
                    balance.non_latin += 1;
                }
            }
        }
        (counts, balance)
    }
}
