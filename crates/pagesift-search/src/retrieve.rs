//! Retrieval façade tying together embedder, index, and chunk store.

use pagesift_core::{
    RankedChunk, ScoreOrder, SearchFilter, SearchResults, SiftError, CONTENT_UNAVAILABLE,
};
use pagesift_store::ChunkStore;

use crate::embedding::Embedder;
use crate::index::{ScoredPoint, SearchIndex};

/// How many chunks are embedded per request during a bulk build.
const BUILD_BATCH: usize = 100;

/// Outcome of a bulk index build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    /// Chunks embedded and indexed.
    pub indexed: usize,
    /// Malformed store lines skipped during the load.
    pub skipped_records: usize,
}

/// Search façade over an index, an embedder, and the chunk store.
///
/// Hits come back in the order the index ranked them, with the index's score
/// convention attached; the façade never re-sorts or sign-flips. Hits whose
/// ordinal no longer resolves against the store keep their rank and carry
/// [`CONTENT_UNAVAILABLE`] as content.
pub struct Retriever {
    index: SearchIndex,
    embedder: Box<dyn Embedder>,
    store: ChunkStore,
}

impl Retriever {
    /// Assemble a retriever from its three collaborators.
    pub fn new(index: SearchIndex, embedder: Box<dyn Embedder>, store: ChunkStore) -> Self {
        Self {
            index,
            embedder,
            store,
        }
    }

    /// The underlying index.
    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Embed `query` and run a filtered similarity search.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Embedding`] if the query cannot be embedded,
    /// [`SiftError::Index`] on index failure, or [`SiftError::Io`] if the
    /// store cannot be read.
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
        filter: &SearchFilter,
    ) -> Result<SearchResults, SiftError> {
        let query_embedding = self.embedder.embed_query(query).await?;
        let points = self.index.vector_search(&query_embedding, top_k, filter)?;
        let order = self.index.distance()?.score_order();
        Ok(SearchResults {
            order,
            hits: self.resolve(points)?,
        })
    }

    /// Filtered full-text search; no embedding round-trip.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Index`] on index failure, or [`SiftError::Io`]
    /// if the store cannot be read.
    pub fn lexical(
        &self,
        query: &str,
        top_k: usize,
        filter: &SearchFilter,
    ) -> Result<SearchResults, SiftError> {
        let points = self.index.lexical_search(query, top_k, filter)?;
        Ok(SearchResults {
            order: ScoreOrder::Descending,
            hits: self.resolve(points)?,
        })
    }

    /// Resolve index hits through the store, preserving their order.
    fn resolve(&self, points: Vec<ScoredPoint>) -> Result<Vec<RankedChunk>, SiftError> {
        if points.is_empty() {
            return Ok(Vec::new());
        }

        // One pass over the store covers every hit.
        let records: Vec<_> = self.store.load_all()?.collect();

        let hits = points
            .into_iter()
            .map(|point| {
                let chunk = records.get(point.ordinal as usize);
                match chunk {
                    Some(chunk) => RankedChunk {
                        ordinal: point.ordinal,
                        score: point.score,
                        page: chunk.page.clone(),
                        header_path: chunk.header_path.clone(),
                        content: chunk.content.clone(),
                    },
                    None => RankedChunk {
                        ordinal: point.ordinal,
                        score: point.score,
                        page: point.page,
                        header_path: split_rendered_path(&point.header_path),
                        content: CONTENT_UNAVAILABLE.to_string(),
                    },
                }
            })
            .collect();

        Ok(hits)
    }

    /// Embed every store record and rebuild the index from scratch.
    ///
    /// `progress(done, total)` is called after each batch. Stops on the
    /// first unrecoverable embedding or index error.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Io`] if the store cannot be read,
    /// [`SiftError::Embedding`] on embedding failure, or
    /// [`SiftError::Index`] on index failure.
    pub async fn build_index<F>(&self, mut progress: F) -> Result<BuildReport, SiftError>
    where
        F: FnMut(usize, usize),
    {
        let mut records = self.store.load_all()?;
        let chunks: Vec<_> = records.by_ref().collect();
        let skipped_records = records.skipped();
        let total = chunks.len();

        self.index.clear()?;

        let mut done = 0usize;
        for batch in chunks.chunks(BUILD_BATCH) {
            let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
            let embeddings = self.embedder.embed_batch(&texts).await?;
            if embeddings.len() != batch.len() {
                return Err(SiftError::Embedding(format!(
                    "got {} embeddings for {} chunks",
                    embeddings.len(),
                    batch.len()
                )));
            }
            for (chunk, embedding) in batch.iter().zip(&embeddings) {
                self.index.upsert(done as u64, chunk, embedding)?;
                done += 1;
            }
            progress(done, total);
        }

        Ok(BuildReport {
            indexed: done,
            skipped_records,
        })
    }
}

/// Undo the ` > ` rendering used for the index payload, for hits that no
/// longer resolve against the store.
fn split_rendered_path(rendered: &str) -> Vec<String> {
    if rendered.is_empty() || rendered == "(no header)" {
        return Vec::new();
    }
    rendered.split(" > ").map(str::to_string).collect()
}
