//! Snapshot reader - search execution and stored field access
//!
//! A [`SearchReader`] is an isolated point-in-time view of the index. It is
//! cheap to clone, and every clone sees the same segment set, so
//! transformations may capture a clone and read stored fields while a search
//! over the same snapshot is running.

use tantivy::schema::Value;
use tantivy::{DocAddress, DocId, Index, TantivyDocument};
use tracing::debug;

use crate::query::{DocumentMatchIterator, Query, SearcherOptions, TopNCollector};
use crate::{Error, Ordinal, Result};

/// Point-in-time snapshot of an index, for searching and stored-field reads.
#[derive(Clone)]
pub struct SearchReader {
    searcher: tantivy::Searcher,
}

impl SearchReader {
    /// Open a snapshot of the index as it is currently committed.
    pub fn open(index: &Index) -> Result<Self> {
        let reader = index.reader()?;
        Ok(Self {
            searcher: reader.searcher(),
        })
    }

    pub(crate) fn engine(&self) -> &tantivy::Searcher {
        &self.searcher
    }

    /// Execute a top-n search, driving the query's searcher to exhaustion.
    ///
    /// Matches are ranked by score descending, ties broken by ascending
    /// ordinal. Iteration errors surface here, not from the returned
    /// iterator.
    pub fn search(&self, request: &TopNRequest<'_>) -> Result<DocumentMatchIterator> {
        let options = SearcherOptions {
            explain: request.explain,
        };
        let mut searcher = request.query.searcher(self, options)?;
        let mut collector = TopNCollector::new(request.size);
        let mut seen: u64 = 0;
        while let Some(matched) = searcher.next()? {
            seen += 1;
            collector.collect(matched);
        }
        debug!(candidates = seen, "search complete");
        Ok(DocumentMatchIterator::new(collector.into_sorted_matches()))
    }

    /// Visit the stored fields of the document at `ordinal`.
    ///
    /// The visitor receives `(field_name, raw_bytes)` pairs; string values
    /// are visited as their UTF-8 bytes. Returning `false` stops the
    /// visitation.
    pub fn visit_stored_fields<V>(&self, ordinal: Ordinal, mut visit: V) -> Result<()>
    where
        V: FnMut(&str, &[u8]) -> bool,
    {
        let (segment_ord, doc_id) = self.locate(ordinal)?;
        let doc: TantivyDocument = self.searcher.doc(DocAddress::new(segment_ord, doc_id))?;
        let schema = self.searcher.schema();
        for (field, entry) in schema.fields() {
            if !entry.is_stored() {
                continue;
            }
            for value in doc.get_all(field) {
                let keep = if let Some(bytes) = value.as_bytes() {
                    visit(entry.name(), bytes)
                } else if let Some(text) = value.as_str() {
                    visit(entry.name(), text.as_bytes())
                } else {
                    true
                };
                if !keep {
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    /// Map a global ordinal to its segment and local doc id.
    fn locate(&self, ordinal: Ordinal) -> Result<(u32, DocId)> {
        let mut base: Ordinal = 0;
        for (segment_ord, segment) in self.searcher.segment_readers().iter().enumerate() {
            let end = base + Ordinal::from(segment.max_doc());
            if ordinal < end {
                return Ok((segment_ord as u32, (ordinal - base) as DocId));
            }
            base = end;
        }
        Err(Error::DocumentNotFound(ordinal))
    }
}

/// A top-n search request: result limit, root query, explanation toggle.
pub struct TopNRequest<'q> {
    size: usize,
    query: &'q dyn Query,
    explain: bool,
}

impl<'q> TopNRequest<'q> {
    pub fn new(size: usize, query: &'q dyn Query) -> Self {
        Self {
            size,
            query,
            explain: false,
        }
    }

    /// Toggle score explanations on the produced matches.
    pub fn explain_scores(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }
}

#[cfg(test)]
mod tests {
    use tantivy::schema::{Schema, STORED, STRING, TEXT};
    use tantivy::IndexWriter;

    use crate::boost::{encode_boost, BOOST_FIELD};
    use crate::query::EngineQuery;

    use super::*;

    fn two_doc_index() -> (Index, tantivy::schema::Field) {
        let mut schema_builder = Schema::builder();
        let id = schema_builder.add_text_field("id", STRING | STORED);
        let desc = schema_builder.add_text_field("desc", TEXT);
        let boost = schema_builder.add_bytes_field(BOOST_FIELD, STORED);
        let schema = schema_builder.build();

        let index = Index::create_in_ram(schema);
        let mut writer: IndexWriter = index
            .writer_with_num_threads(1, 15_000_000)
            .expect("writer");
        let mut doc_a = TantivyDocument::new();
        doc_a.add_text(id, "a");
        doc_a.add_text(desc, "cat cat cat");
        doc_a.add_bytes(boost, encode_boost(1.0).to_vec());
        writer.add_document(doc_a).expect("index doc a");
        let mut doc_b = TantivyDocument::new();
        doc_b.add_text(id, "b");
        doc_b.add_text(desc, "cat");
        doc_b.add_bytes(boost, encode_boost(2.0).to_vec());
        writer.add_document(doc_b).expect("index doc b");
        writer.commit().expect("commit");
        (index, desc)
    }

    #[test]
    fn visits_stored_fields_with_names() {
        let (index, _desc) = two_doc_index();
        let reader = SearchReader::open(&index).expect("reader");
        let mut fields = Vec::new();
        reader
            .visit_stored_fields(0, |field, value| {
                fields.push((field.to_string(), value.to_vec()));
                true
            })
            .expect("visit");
        assert!(fields.iter().any(|(f, v)| f == "id" && v == b"a"));
        assert!(fields
            .iter()
            .any(|(f, v)| f == BOOST_FIELD && v.as_slice() == encode_boost(1.0)));
        // desc is indexed but not stored
        assert!(!fields.iter().any(|(f, _)| f == "desc"));
    }

    #[test]
    fn visitor_flag_stops_visitation() {
        let (index, _desc) = two_doc_index();
        let reader = SearchReader::open(&index).expect("reader");
        let mut calls = 0;
        reader
            .visit_stored_fields(0, |_field, _value| {
                calls += 1;
                false
            })
            .expect("visit");
        assert_eq!(calls, 1);
    }

    #[test]
    fn unknown_ordinal_is_an_error() {
        let (index, _desc) = two_doc_index();
        let reader = SearchReader::open(&index).expect("reader");
        let err = reader
            .visit_stored_fields(99, |_field, _value| true)
            .unwrap_err();
        assert!(matches!(err, Error::DocumentNotFound(99)));
    }

    #[test]
    fn search_ranks_by_score_descending() {
        let (index, desc) = two_doc_index();
        let reader = SearchReader::open(&index).expect("reader");
        let query = EngineQuery::term(desc, "cat");
        let request = TopNRequest::new(10, &query);
        let matches: Vec<_> = reader.search(&request).expect("search").collect();
        assert_eq!(matches.len(), 2);
        assert!(matches[0].score > matches[1].score);
    }

    #[test]
    fn search_honors_result_limit() {
        let (index, desc) = two_doc_index();
        let reader = SearchReader::open(&index).expect("reader");
        let query = EngineQuery::term(desc, "cat");
        let request = TopNRequest::new(1, &query);
        let matches: Vec<_> = reader.search(&request).expect("search").collect();
        assert_eq!(matches.len(), 1);
    }
}
