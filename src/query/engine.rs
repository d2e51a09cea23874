//! Engine query adapter
//!
//! Bridges the external engine's query execution into the crate's
//! [`Query`]/[`Searcher`] capabilities. The searcher walks the snapshot's
//! segments in order, so matches come out in ascending global ordinal order.

use tantivy::query::{EnableScoring, QueryClone, Scorer, Weight};
use tantivy::schema::IndexRecordOption;
use tantivy::{DocId, DocSet, Term, TERMINATED};

use crate::explanation::Explanation;
use crate::reader::SearchReader;
use crate::{Ordinal, Result, Score};

use super::{DocumentMatch, Query, Searcher, SearcherOptions};

/// Adapts any engine query into the [`Query`] capability.
pub struct EngineQuery {
    inner: Box<dyn tantivy::query::Query>,
}

impl Clone for EngineQuery {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.box_clone(),
        }
    }
}

impl EngineQuery {
    pub fn new(inner: Box<dyn tantivy::query::Query>) -> Self {
        Self { inner }
    }

    /// Term query over a text field.
    ///
    /// Term frequencies are requested from the postings so that scores
    /// reflect how often the term occurs, not just that it occurs.
    pub fn term(field: tantivy::schema::Field, text: &str) -> Self {
        Self::new(Box::new(tantivy::query::TermQuery::new(
            Term::from_field_text(field, text),
            IndexRecordOption::WithFreqs,
        )))
    }
}

impl Query for EngineQuery {
    fn searcher(
        &self,
        reader: &SearchReader,
        options: SearcherOptions,
    ) -> Result<Box<dyn Searcher>> {
        let weight = self
            .inner
            .weight(EnableScoring::enabled_from_searcher(reader.engine()))?;
        Ok(Box::new(EngineSearcher::open(
            reader.clone(),
            weight,
            options,
        )?))
    }
}

/// Cursor over an engine weight's matches across all segments.
struct EngineSearcher {
    reader: SearchReader,
    weight: Box<dyn Weight>,
    explain: bool,
    /// Global ordinal of each segment's first document.
    bases: Vec<Ordinal>,
    count_estimate: u64,
    segment_ord: usize,
    scorer: Option<Box<dyn Scorer>>,
    /// Whether the current scorer has already emitted its current doc.
    positioned: bool,
}

impl EngineSearcher {
    fn open(
        reader: SearchReader,
        weight: Box<dyn Weight>,
        options: SearcherOptions,
    ) -> Result<Self> {
        let mut bases = Vec::new();
        let mut base: Ordinal = 0;
        let mut count_estimate: u64 = 0;
        for segment in reader.engine().segment_readers() {
            bases.push(base);
            base += Ordinal::from(segment.max_doc());
            count_estimate += u64::from(weight.count(segment)?);
        }
        Ok(Self {
            reader,
            weight,
            explain: options.explain,
            bases,
            count_estimate,
            segment_ord: 0,
            scorer: None,
            positioned: false,
        })
    }

    /// Build the current segment's scorer if needed; false once all segments
    /// are exhausted.
    fn ensure_scorer(&mut self) -> Result<bool> {
        if self.segment_ord >= self.reader.engine().segment_readers().len() {
            return Ok(false);
        }
        if self.scorer.is_none() {
            let segment = &self.reader.engine().segment_readers()[self.segment_ord];
            self.scorer = Some(self.weight.scorer(segment, 1.0)?);
            self.positioned = false;
        }
        Ok(true)
    }

    fn next_segment(&mut self) {
        self.scorer = None;
        self.positioned = false;
        self.segment_ord += 1;
    }

    fn segment_end(&self, segment_ord: usize) -> Ordinal {
        let segment = &self.reader.engine().segment_readers()[segment_ord];
        self.bases[segment_ord] + Ordinal::from(segment.max_doc())
    }

    fn make_match(&self, doc: DocId, score: Score) -> Result<DocumentMatch> {
        let ordinal = self.bases[self.segment_ord] + Ordinal::from(doc);
        let explanation = if self.explain {
            let segment = &self.reader.engine().segment_readers()[self.segment_ord];
            Some(Explanation::from_engine(&self.weight.explain(segment, doc)?)?)
        } else {
            None
        };
        Ok(DocumentMatch {
            ordinal,
            score,
            explanation,
        })
    }
}

impl Searcher for EngineSearcher {
    fn next(&mut self) -> Result<Option<DocumentMatch>> {
        loop {
            if !self.ensure_scorer()? {
                return Ok(None);
            }
            let (doc, score) = {
                let Some(scorer) = self.scorer.as_mut() else {
                    return Ok(None);
                };
                let doc = if self.positioned {
                    scorer.advance()
                } else {
                    scorer.doc()
                };
                self.positioned = true;
                if doc == TERMINATED {
                    (doc, 0.0)
                } else {
                    (doc, scorer.score())
                }
            };
            if doc == TERMINATED {
                self.next_segment();
                continue;
            }
            return self.make_match(doc, score).map(Some);
        }
    }

    fn advance(&mut self, target: Ordinal) -> Result<Option<DocumentMatch>> {
        loop {
            if !self.ensure_scorer()? {
                return Ok(None);
            }
            if target >= self.segment_end(self.segment_ord) {
                self.next_segment();
                continue;
            }
            let local = target.saturating_sub(self.bases[self.segment_ord]) as DocId;
            let (doc, score) = {
                let Some(scorer) = self.scorer.as_mut() else {
                    return Ok(None);
                };
                let doc = if !self.positioned {
                    let first = scorer.doc();
                    if first == TERMINATED || local <= first {
                        first
                    } else {
                        scorer.seek(local)
                    }
                } else if local > scorer.doc() {
                    scorer.seek(local)
                } else {
                    scorer.advance()
                };
                self.positioned = true;
                if doc == TERMINATED {
                    (doc, 0.0)
                } else {
                    (doc, scorer.score())
                }
            };
            if doc == TERMINATED {
                self.next_segment();
                continue;
            }
            return self.make_match(doc, score).map(Some);
        }
    }

    fn count(&self) -> u64 {
        self.count_estimate
    }

    fn min(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        std::mem::size_of::<Self>()
    }

    fn document_match_pool_size(&self) -> usize {
        1
    }
}
