//! Error taxonomy for the knowledge retriever.
//!
//! Two families: [`IndexInitError`] is fatal — the retriever never reaches a
//! usable state — while [`QueryError`] is recoverable by the caller, which
//! typically substitutes a neutral "no information available" string in the
//! downstream prompt instead of aborting the whole pipeline.

use thiserror::Error;

/// Failure while opening the store or building the index.
///
/// Any variant means the retriever cannot serve queries; there is no partial
/// operation without an index.
#[derive(Debug, Error)]
pub enum IndexInitError {
    #[error("failed to open or create the index store: {0}")]
    Store(#[from] sqlx::Error),

    #[error("failed to read or seed the knowledge directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("embedding provider unavailable during ingest: {0}")]
    Provider(anyhow::Error),

    #[error("invalid knowledge source configuration: {0}")]
    Source(anyhow::Error),
}

/// Failure while answering a similarity query against a ready index.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("query text must not be empty")]
    EmptyQuery,

    #[error("the index contains no chunks; run ingest first")]
    EmptyIndex,

    #[error("embedding provider unavailable at query time: {0}")]
    Provider(anyhow::Error),

    #[error("failed to read from the index store: {0}")]
    Store(#[from] sqlx::Error),
}
