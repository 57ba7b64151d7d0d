//! Core types, configuration, and error handling for the pagesift workspace.
//!
//! This crate provides the shared foundation used by all other pagesift crates:
//! - [`SiftError`] — unified error type using `thiserror`
//! - [`SiftConfig`] — configuration loaded from `.pagesift.toml`
//! - Shared types: [`Chunk`], [`SearchFilter`], [`RankedChunk`], [`Distance`],
//!   [`ScoreOrder`], [`OutputFormat`]

mod config;
mod error;
mod types;

pub use config::{EmbeddingConfig, IndexConfig, IngestConfig, SiftConfig, EMBED_API_KEY_ENV};
pub use error::SiftError;
pub use types::{
    Chunk, Distance, OutputFormat, RankedChunk, ScoreOrder, SearchFilter, SearchResults,
    CONTENT_UNAVAILABLE,
};
