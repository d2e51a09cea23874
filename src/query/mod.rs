//! Query types and search execution

mod collector;
mod decorator;
mod engine;
mod traits;


pub use collector::{DocumentMatch, DocumentMatchIterator};
pub use decorator::{ScoreDecoratorQuery, ScoreDecoratorSearcher, ScoreTransform};
pub use engine::EngineQuery;
pub use traits::{EmptySearcher, Query, Searcher, SearcherOptions};

pub(crate) use collector::TopNCollector;
