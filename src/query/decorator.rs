//! Score decorator query - rewrites match scores via a caller-supplied
//! transformation
//!
//! The decorator presents the same cursor contract as the query it wraps.
//! Structural accessors pass through untouched; only the two result-producing
//! operations are intercepted, so decorators stack and each layer sees the
//! previous layer's rewritten matches.

use std::sync::Arc;

use crate::reader::SearchReader;
use crate::{Error, Ordinal, Result};

use super::{DocumentMatch, Query, Searcher, SearcherOptions};

/// Transformation applied to every match a decorated searcher produces.
///
/// Invoked with `None` on exhaustion as well, so implementations must be
/// null-safe and preserve `None` in, `None` out.
pub type ScoreTransform = dyn Fn(Option<DocumentMatch>) -> Option<DocumentMatch> + Send + Sync;

/// Wraps an inner query so that its searcher rewrites every match.
pub struct ScoreDecoratorQuery {
    inner: Box<dyn Query>,
    transform: Arc<ScoreTransform>,
}

impl ScoreDecoratorQuery {
    pub fn new<Q, F>(inner: Q, transform: F) -> Self
    where
        Q: Query + 'static,
        F: Fn(Option<DocumentMatch>) -> Option<DocumentMatch> + Send + Sync + 'static,
    {
        Self {
            inner: Box::new(inner),
            transform: Arc::new(transform),
        }
    }
}

impl Query for ScoreDecoratorQuery {
    fn searcher(
        &self,
        reader: &SearchReader,
        options: SearcherOptions,
    ) -> Result<Box<dyn Searcher>> {
        let inner = self
            .inner
            .searcher(reader, options)
            .map_err(|err| Error::WrapSearcher(Box::new(err)))?;
        Ok(Box::new(ScoreDecoratorSearcher::new(
            inner,
            Arc::clone(&self.transform),
        )))
    }
}

/// Searcher that passes every pulled match through a transformation.
pub struct ScoreDecoratorSearcher {
    inner: Box<dyn Searcher>,
    transform: Arc<ScoreTransform>,
}

impl ScoreDecoratorSearcher {
    pub fn new(inner: Box<dyn Searcher>, transform: Arc<ScoreTransform>) -> Self {
        Self { inner, transform }
    }
}

impl Searcher for ScoreDecoratorSearcher {
    fn next(&mut self) -> Result<Option<DocumentMatch>> {
        // Inner errors propagate untouched; the transformation only ever
        // sees successfully pulled results, including the exhaustion signal.
        let matched = self.inner.next()?;
        Ok((self.transform)(matched))
    }

    fn advance(&mut self, target: Ordinal) -> Result<Option<DocumentMatch>> {
        let matched = self.inner.advance(target)?;
        Ok((self.transform)(matched))
    }

    fn count(&self) -> u64 {
        self.inner.count()
    }

    fn min(&self) -> usize {
        self.inner.min()
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn document_match_pool_size(&self) -> usize {
        self.inner.document_match_pool_size()
    }
}
