//! Error types for rescore

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("engine error: {0}")]
    Engine(#[from] tantivy::TantivyError),

    #[error("error wrapping searcher: {0}")]
    WrapSearcher(#[source] Box<Error>),

    #[error("document not found: {0}")]
    DocumentNotFound(u64),

    #[error("explanation error: {0}")]
    Explanation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
