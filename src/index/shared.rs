//! Initialize-once holder for a language index.

use crate::error::Result;
use crate::index::LanguageIndex;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Holds an index that is built at most once and then shared read-only.
///
/// Concurrent first callers block until the single builder finishes. A
/// failed build leaves the cell empty and the next caller builds again.
#[derive(Debug, Default)]
pub struct SharedIndex {
    cell: OnceCell<Arc<LanguageIndex>>,
}

impl SharedIndex {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// A holder that is already initialized.
    pub fn with_index(index: LanguageIndex) -> Self {
        Self {
            cell: OnceCell::with_value(Arc::new(index)),
        }
    }

    pub fn get_or_try_init<F>(&self, build: F) -> Result<Arc<LanguageIndex>>
    where
        F: FnOnce() -> Result<LanguageIndex>,
    {
        self.cell
            .get_or_try_init(|| build().map(Arc::new))
            .map(Arc::clone)
    }

    pub fn get(&self) -> Option<Arc<LanguageIndex>> {
        self.cell.get().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}
