//! Character trigram profiles.
//!
//! A profile is a sparse vector keyed by 3-code-point strings. Both input
//! texts and reference models are reduced to unit-length profiles so a plain
//! dot product acts as cosine similarity.

pub mod extract;

pub use extract::TrigramExtractor;

use std::collections::HashMap;

/// Sparse trigram → weight vector.
pub type TrigramVector = HashMap<String, f64>;

/// Euclidean norm of a trigram vector.
///
/// Squares are summed in ascending order, so the result does not depend on
/// the map's iteration order.
pub fn l2_norm(vector: &TrigramVector) -> f64 {
    let mut squares: Vec<f64> = vector.values().map(|w| w * w).collect();
    squares.sort_by(f64::total_cmp);
    squares.iter().sum::<f64>().sqrt()
}

/// Entries ordered by trigram.
pub fn sorted_entries(vector: &TrigramVector) -> Vec<(&str, f64)> {
    let mut entries: Vec<(&str, f64)> = vector.iter().map(|(k, w)| (k.as_str(), *w)).collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    entries
}

/// Scale the vector to unit length in place. Empty and all-zero vectors are
/// left untouched.
pub fn normalize(vector: &mut TrigramVector) {
    let norm = l2_norm(vector);
    if norm == 0.0 || !norm.is_finite() {
        return;
    }
    for w in vector.values_mut() {
        *w /= norm;
    }
}
