//! Query and Searcher traits
//!
//! Provides the core abstractions for building and consuming ranked-match
//! cursors over a reader snapshot.

use crate::reader::SearchReader;
use crate::{Ordinal, Result};

use super::DocumentMatch;

/// Options applied when a query builds its searcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearcherOptions {
    /// Attach a score explanation to every match.
    pub explain: bool,
}

/// A search query, producible into a [`Searcher`] against a reader snapshot.
pub trait Query: Send + Sync {
    /// Build a searcher for this query against the given snapshot.
    fn searcher(
        &self,
        reader: &SearchReader,
        options: SearcherOptions,
    ) -> Result<Box<dyn Searcher>>;
}

impl Query for Box<dyn Query> {
    fn searcher(
        &self,
        reader: &SearchReader,
        options: SearcherOptions,
    ) -> Result<Box<dyn Searcher>> {
        (**self).searcher(reader, options)
    }
}

/// A cursor over ranked matches in ascending ordinal order.
///
/// Resources held by a searcher are released when it is dropped; wrappers own
/// their inner searcher, so dropping the outermost layer releases the whole
/// chain.
pub trait Searcher: Send {
    /// Advance to the next match, or `None` when exhausted.
    fn next(&mut self) -> Result<Option<DocumentMatch>>;

    /// Skip ahead to the first match at or after `target`.
    ///
    /// The cursor only moves forward; a target at or behind the current
    /// position behaves like [`Searcher::next`].
    fn advance(&mut self, target: Ordinal) -> Result<Option<DocumentMatch>>;

    /// Estimated number of candidate matches.
    fn count(&self) -> u64;

    /// Minimum-match hint for upstream optimizers.
    fn min(&self) -> usize;

    /// Structural memory estimate in bytes.
    fn size(&self) -> usize;

    /// Match-object pooling hint.
    fn document_match_pool_size(&self) -> usize;
}

/// Searcher over an empty match set.
pub struct EmptySearcher;

impl Searcher for EmptySearcher {
    fn next(&mut self) -> Result<Option<DocumentMatch>> {
        Ok(None)
    }

    fn advance(&mut self, _target: Ordinal) -> Result<Option<DocumentMatch>> {
        Ok(None)
    }

    fn count(&self) -> u64 {
        0
    }

    fn min(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        std::mem::size_of::<Self>()
    }

    fn document_match_pool_size(&self) -> usize {
        0
    }
}
