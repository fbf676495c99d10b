//! Character-trigram language identification.
//!
//! Texts are reduced to normalized trigram profiles and compared against
//! per-language reference profiles through an inverted index. See
//! [`detect::Detector`] for the entry point.

pub mod config;
pub mod detect;
pub mod error;
pub mod index;
pub mod locale;
pub mod logging;
pub mod model;
pub mod trigram;

pub use config::{DetectorConfig, ExtractorConfig};
pub use detect::{load_index, Detection, Detector};
pub use error::{LingramError, Result};
pub use index::{LanguageIndex, Postings, SharedIndex};
pub use model::{DirectorySource, LanguageModel, MemorySource, ModelSource};
pub use trigram::{TrigramExtractor, TrigramVector};
