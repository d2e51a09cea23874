//! Document-boost score rewriting on top of the tantivy search engine
//!
//! The engine supplies indexing, tokenization, and term scoring; this crate
//! decorates its query execution with caller-supplied score transformations:
//! - `Query` / `Searcher` capability traits over a reader snapshot
//! - `EngineQuery` adapting any engine query into that capability
//! - `ScoreDecoratorQuery` / `ScoreDecoratorSearcher` passing every match
//!   through a transformation before it reaches the caller
//! - A stored-field boost encoding (8-byte big-endian doubles) plus the
//!   ready-made transformation that multiplies it into match scores

pub mod boost;
pub mod error;
pub mod explanation;
pub mod query;
pub mod reader;

pub use boost::{boost_transform, decode_boost, encode_boost, BOOST_FIELD};
pub use error::{Error, Result};
pub use explanation::Explanation;
pub use query::{
    DocumentMatch, DocumentMatchIterator, EmptySearcher, EngineQuery, Query, ScoreDecoratorQuery,
    ScoreDecoratorSearcher, ScoreTransform, Searcher, SearcherOptions,
};
pub use reader::{SearchReader, TopNRequest};

/// Global document position across a snapshot's segments.
pub type Ordinal = u64;
/// Relevance score, shared with the engine.
pub type Score = f32;
