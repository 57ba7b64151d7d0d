//! Vector and lexical search over stored chunks.
//!
//! An OpenAI-compatible embedding client turns text into vectors, a SQLite
//! index holds those vectors (plus an FTS5 table for lexical queries), and
//! the [`Retriever`] façade ties index, embedder, and chunk store together.

pub mod embedding;
pub mod index;
pub mod retrieve;

pub use embedding::{Embedder, EmbeddingClient};
pub use index::SearchIndex;
pub use retrieve::{BuildReport, Retriever};
