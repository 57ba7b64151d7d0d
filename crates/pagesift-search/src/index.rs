//! SQLite + FTS5 search index for chunk embeddings and plain text.
//!
//! Embeddings are stored as little-endian f32 BLOBs keyed by chunk ordinal;
//! similarity is computed in Rust. An FTS5 table over the plain text serves
//! lexical queries. A metadata table pins the embedding dimensions and the
//! distance convention the index was built with.

use std::path::Path;

use pagesift_core::{Chunk, Distance, SearchFilter, SiftError};
use rusqlite::{params, Connection};

const DIMENSIONS_KEY: &str = "embedding_dimensions";
const DISTANCE_KEY: &str = "distance";

/// One hit from the index, before store resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPoint {
    /// Chunk ordinal (position in the store file).
    pub ordinal: u64,
    /// Score under the index's pinned [`Distance`], or a positive lexical
    /// relevance score for FTS hits.
    pub score: f64,
    /// Page title stored alongside the vector.
    pub page: String,
    /// Rendered header path stored alongside the vector.
    pub header_path: String,
}

/// SQLite-backed index with BLOB-stored embeddings and FTS5 lexical search.
///
/// # Examples
///
/// ```
/// use pagesift_search::SearchIndex;
///
/// let index = SearchIndex::in_memory().unwrap();
/// assert_eq!(index.len().unwrap(), 0);
/// ```
pub struct SearchIndex {
    conn: Connection,
}

impl SearchIndex {
    /// Open or create an index database at the given path.
    ///
    /// Creates tables (and parent directories) if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Index`] if the database cannot be opened.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use pagesift_search::SearchIndex;
    ///
    /// let index = SearchIndex::open(Path::new(".pagesift/index.db")).unwrap();
    /// ```
    pub fn open(path: &Path) -> Result<Self, SiftError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SiftError::Index(format!("failed to create index directory: {e}")))?;
            }
        }
        let conn = Connection::open(path)
            .map_err(|e| SiftError::Index(format!("failed to open database: {e}")))?;

        let index = Self { conn };
        index.init_schema()?;
        Ok(index)
    }

    /// Create an in-memory index (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Index`] if schema creation fails.
    pub fn in_memory() -> Result<Self, SiftError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| SiftError::Index(format!("failed to create in-memory database: {e}")))?;

        let index = Self { conn };
        index.init_schema()?;
        Ok(index)
    }

    fn init_schema(&self) -> Result<(), SiftError> {
        self.conn
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS metadata (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS points (
                    id INTEGER PRIMARY KEY,
                    page TEXT NOT NULL,
                    page_id TEXT,
                    header_path TEXT NOT NULL,
                    embedding BLOB NOT NULL
                );

                CREATE VIRTUAL TABLE IF NOT EXISTS points_fts USING fts5(
                    plain, page UNINDEXED, header_path UNINDEXED
                );
                ",
            )
            .map_err(|e| SiftError::Index(format!("failed to create schema: {e}")))?;

        Ok(())
    }

    /// Pin embedding dimensions and distance convention in the metadata table.
    ///
    /// If values are already stored and match, this is a no-op. A mismatch is
    /// an error suggesting a rebuild, never a silent re-interpretation of the
    /// stored vectors.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Index`] if `dimensions` or `distance` conflict
    /// with an existing index.
    pub fn pin_shape(&self, dimensions: usize, distance: Distance) -> Result<(), SiftError> {
        if let Some(stored) = self.get_metadata(DIMENSIONS_KEY)? {
            let stored_dims: usize = stored.parse().map_err(|_| {
                SiftError::Index(format!("corrupted dimension metadata in index: '{stored}'"))
            })?;
            if stored_dims != dimensions {
                return Err(SiftError::Index(format!(
                    "index was created with {stored_dims} dimensions but config specifies \
                     {dimensions}; run setup --force to rebuild"
                )));
            }
        } else {
            self.set_metadata(DIMENSIONS_KEY, &dimensions.to_string())?;
        }

        if let Some(stored) = self.get_metadata(DISTANCE_KEY)? {
            let stored_distance: Distance = stored
                .parse()
                .map_err(|_| SiftError::Index(format!("corrupted distance metadata: '{stored}'")))?;
            if stored_distance != distance {
                return Err(SiftError::Index(format!(
                    "index was created with distance '{stored_distance}' but config specifies \
                     '{distance}'; run setup --force to rebuild"
                )));
            }
        } else {
            self.set_metadata(DISTANCE_KEY, &distance.to_string())?;
        }

        Ok(())
    }

    /// Embedding dimensions stored in metadata, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Index`] on query failure.
    pub fn dimensions(&self) -> Result<Option<usize>, SiftError> {
        match self.get_metadata(DIMENSIONS_KEY)? {
            Some(v) => {
                let dims: usize = v.parse().map_err(|_| {
                    SiftError::Index(format!("corrupted dimension metadata in index: '{v}'"))
                })?;
                Ok(Some(dims))
            }
            None => Ok(None),
        }
    }

    /// Distance convention the index was built with; cosine if unset.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Index`] on query failure or corrupt metadata.
    pub fn distance(&self) -> Result<Distance, SiftError> {
        match self.get_metadata(DISTANCE_KEY)? {
            Some(v) => v
                .parse()
                .map_err(|_| SiftError::Index(format!("corrupted distance metadata: '{v}'"))),
            None => Ok(Distance::Cosine),
        }
    }

    fn get_metadata(&self, key: &str) -> Result<Option<String>, SiftError> {
        let result = self.conn.query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(SiftError::Index(format!(
                "failed to get metadata '{key}': {e}"
            ))),
        }
    }

    fn set_metadata(&self, key: &str, value: &str) -> Result<(), SiftError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(|e| SiftError::Index(format!("failed to set metadata '{key}': {e}")))?;
        Ok(())
    }

    /// Remove every point and lexical row; metadata stays.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Index`] on delete failure.
    pub fn clear(&self) -> Result<(), SiftError> {
        self.conn
            .execute_batch("DELETE FROM points; DELETE FROM points_fts;")
            .map_err(|e| SiftError::Index(format!("failed to clear index: {e}")))?;
        Ok(())
    }

    /// Store one chunk's embedding and lexical text under its ordinal.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Index`] if the vector length does not match the
    /// pinned dimensions, or on insert failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagesift_core::Chunk;
    /// use pagesift_search::SearchIndex;
    ///
    /// let index = SearchIndex::in_memory().unwrap();
    /// let chunk = Chunk {
    ///     page: "Notes".into(),
    ///     page_id: None,
    ///     chunk_id: 1,
    ///     header_path: vec!["Intro".into()],
    ///     content: "# Intro\nhello".into(),
    ///     plain_text: Some("Intro\nhello".into()),
    /// };
    /// index.upsert(0, &chunk, &[0.1, 0.2, 0.3]).unwrap();
    /// assert_eq!(index.len().unwrap(), 1);
    /// ```
    pub fn upsert(&self, ordinal: u64, chunk: &Chunk, embedding: &[f32]) -> Result<(), SiftError> {
        if let Some(dims) = self.dimensions()? {
            if embedding.len() != dims {
                return Err(SiftError::Index(format!(
                    "embedding has {} dimensions, index expects {dims}",
                    embedding.len()
                )));
            }
        }

        let header_path = chunk.header_path_text();
        let plain = chunk.plain_text.as_deref().unwrap_or(&chunk.content);

        self.conn
            .execute(
                "INSERT OR REPLACE INTO points (id, page, page_id, header_path, embedding)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    ordinal as i64,
                    chunk.page,
                    chunk.page_id,
                    header_path,
                    floats_to_bytes(embedding),
                ],
            )
            .map_err(|e| SiftError::Index(format!("failed to insert point: {e}")))?;

        // FTS5 has no conflict clause; replace is delete + insert.
        self.conn
            .execute(
                "DELETE FROM points_fts WHERE rowid = ?1",
                params![ordinal as i64],
            )
            .map_err(|e| SiftError::Index(format!("failed to replace lexical row: {e}")))?;
        self.conn
            .execute(
                "INSERT INTO points_fts (rowid, plain, page, header_path) VALUES (?1, ?2, ?3, ?4)",
                params![ordinal as i64, plain, chunk.page, header_path],
            )
            .map_err(|e| SiftError::Index(format!("failed to insert lexical row: {e}")))?;

        Ok(())
    }

    /// Number of indexed points.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Index`] on query failure.
    pub fn len(&self) -> Result<usize, SiftError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM points", [], |row| row.get(0))
            .map_err(|e| SiftError::Index(format!("failed to count points: {e}")))?;
        Ok(count as usize)
    }

    /// Whether the index holds no points.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Index`] on query failure.
    pub fn is_empty(&self) -> Result<bool, SiftError> {
        Ok(self.len()? == 0)
    }

    /// Similarity search under the pinned distance convention.
    ///
    /// Filters are applied in SQL before scoring: `page` matches the title
    /// exactly, `header` matches the rendered header path as a substring.
    /// Results come back sorted — descending for cosine, ascending for L2 —
    /// and truncated to `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Index`] on query failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagesift_core::SearchFilter;
    /// use pagesift_search::SearchIndex;
    ///
    /// let index = SearchIndex::in_memory().unwrap();
    /// let hits = index.vector_search(&[0.1, 0.2], 5, &SearchFilter::default()).unwrap();
    /// assert!(hits.is_empty());
    /// ```
    pub fn vector_search(
        &self,
        query_embedding: &[f32],
        limit: usize,
        filter: &SearchFilter,
    ) -> Result<Vec<ScoredPoint>, SiftError> {
        let distance = self.distance()?;

        let mut sql =
            String::from("SELECT id, page, header_path, embedding FROM points");
        let mut clauses: Vec<&str> = Vec::new();
        let mut bind: Vec<String> = Vec::new();
        if let Some(page) = &filter.page {
            clauses.push("page = ?");
            bind.push(page.clone());
        }
        if let Some(header) = &filter.header {
            clauses.push("header_path LIKE '%' || ? || '%'");
            bind.push(header.clone());
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| SiftError::Index(format!("failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(rusqlite::params_from_iter(bind.iter()), |row| {
                let id: i64 = row.get(0)?;
                let page: String = row.get(1)?;
                let header_path: String = row.get(2)?;
                let embedding_bytes: Vec<u8> = row.get(3)?;
                let embedding = bytes_to_floats(&embedding_bytes);
                let score = match distance {
                    Distance::Cosine => cosine_similarity(query_embedding, &embedding),
                    Distance::L2 => l2_distance(query_embedding, &embedding),
                };
                Ok(ScoredPoint {
                    ordinal: id as u64,
                    score,
                    page,
                    header_path,
                })
            })
            .map_err(|e| SiftError::Index(format!("failed to query points: {e}")))?;

        let mut scored = Vec::new();
        for row in rows {
            scored.push(row.map_err(|e| SiftError::Index(format!("failed to read row: {e}")))?);
        }

        match distance {
            Distance::Cosine => scored.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            Distance::L2 => scored.sort_by(|a, b| {
                a.score
                    .partial_cmp(&b.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
        }
        scored.truncate(limit);

        Ok(scored)
    }

    /// Full-text search via FTS5, same filters as [`vector_search`].
    ///
    /// FTS5 rank is negative (more negative = more relevant); scores are
    /// flipped to positive, so higher is better.
    ///
    /// [`vector_search`]: SearchIndex::vector_search
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Index`] on query failure.
    pub fn lexical_search(
        &self,
        query: &str,
        limit: usize,
        filter: &SearchFilter,
    ) -> Result<Vec<ScoredPoint>, SiftError> {
        let safe_query = sanitize_fts_query(query);
        if safe_query.is_empty() {
            return Ok(Vec::new());
        }

        let mut sql = String::from(
            "SELECT rowid, page, header_path, rank FROM points_fts WHERE points_fts MATCH ?",
        );
        let mut bind: Vec<String> = vec![safe_query];
        if let Some(page) = &filter.page {
            sql.push_str(" AND page = ?");
            bind.push(page.clone());
        }
        if let Some(header) = &filter.header {
            sql.push_str(" AND header_path LIKE '%' || ? || '%'");
            bind.push(header.clone());
        }
        sql.push_str(" ORDER BY rank LIMIT ?");

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| SiftError::Index(format!("failed to prepare FTS query: {e}")))?;

        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        for value in bind {
            params.push(Box::new(value));
        }
        params.push(Box::new(limit as i64));

        let rows = stmt
            .query_map(
                rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
                |row| {
                    let id: i64 = row.get(0)?;
                    let page: String = row.get(1)?;
                    let header_path: String = row.get(2)?;
                    let rank: f64 = row.get(3)?;
                    Ok(ScoredPoint {
                        ordinal: id as u64,
                        score: (-rank).max(0.0),
                        page,
                        header_path,
                    })
                },
            )
            .map_err(|e| SiftError::Index(format!("FTS query failed: {e}")))?;

        let mut hits = Vec::new();
        for row in rows {
            hits.push(row.map_err(|e| SiftError::Index(format!("failed to read FTS row: {e}")))?);
        }

        Ok(hits)
    }
}

fn floats_to_bytes(floats: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(floats.len() * 4);
    for f in floats {
        bytes.extend_from_slice(&f.to_le_bytes());
    }
    bytes
}

fn bytes_to_floats(bytes: &[u8]) -> Vec<f32> {
    let mut floats = Vec::with_capacity(bytes.len() / 4);
    for chunk in bytes.chunks_exact(4) {
        let arr: [u8; 4] = [chunk[0], chunk[1], chunk[2], chunk[3]];
        floats.push(f32::from_le_bytes(arr));
    }
    floats
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for i in 0..a.len() {
        let ai = a[i] as f64;
        let bi = b[i] as f64;
        dot += ai * bi;
        norm_a += ai * ai;
        norm_b += bi * bi;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }

    dot / denom
}

fn l2_distance(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return f64::INFINITY;
    }

    let mut sum = 0.0f64;
    for i in 0..a.len() {
        let d = a[i] as f64 - b[i] as f64;
        sum += d * d;
    }
    sum.sqrt()
}

fn sanitize_fts_query(query: &str) -> String {
    // Split into words, wrap each in quotes for exact matching
    let words: Vec<String> = query
        .split_whitespace()
        .filter(|w| !w.is_empty())
        .map(|w| {
            // Remove FTS5 special chars
            let clean: String = w
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            format!("\"{clean}\"")
        })
        .filter(|w| w != "\"\"")
        .collect();
    words.join(" OR ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(page: &str, header: &str, text: &str) -> Chunk {
        Chunk {
            page: page.into(),
            page_id: None,
            chunk_id: 1,
            header_path: vec![header.to_string()],
            content: format!("# {header}\n{text}"),
            plain_text: Some(format!("{header}\n{text}")),
        }
    }

    fn seeded_index() -> SearchIndex {
        let index = SearchIndex::in_memory().unwrap();
        index.pin_shape(3, Distance::Cosine).unwrap();
        index
            .upsert(0, &chunk("Alpha", "Intro", "login and auth"), &[1.0, 0.0, 0.0])
            .unwrap();
        index
            .upsert(1, &chunk("Beta", "Setup", "install the tool"), &[0.0, 1.0, 0.0])
            .unwrap();
        index
            .upsert(2, &chunk("Alpha", "Deploy", "ship to prod"), &[0.9, 0.1, 0.0])
            .unwrap();
        index
    }

    #[test]
    fn upsert_and_count() {
        let index = seeded_index();
        assert_eq!(index.len().unwrap(), 3);
        assert!(!index.is_empty().unwrap());
    }

    #[test]
    fn cosine_search_ranks_closest_first() {
        let index = seeded_index();
        let hits = index
            .vector_search(&[1.0, 0.0, 0.0], 2, &SearchFilter::default())
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].ordinal, 0);
        assert_eq!(hits[1].ordinal, 2);
        assert!(hits[0].score >= hits[1].score);
    }

    #[test]
    fn l2_search_ranks_ascending() {
        let index = SearchIndex::in_memory().unwrap();
        index.pin_shape(2, Distance::L2).unwrap();
        index.upsert(0, &chunk("P", "A", "near"), &[0.0, 0.0]).unwrap();
        index.upsert(1, &chunk("P", "B", "far"), &[3.0, 4.0]).unwrap();

        let hits = index
            .vector_search(&[0.0, 0.0], 2, &SearchFilter::default())
            .unwrap();
        assert_eq!(hits[0].ordinal, 0);
        assert_eq!(hits[1].ordinal, 1);
        assert!((hits[1].score - 5.0).abs() < 1e-9);
    }

    #[test]
    fn page_filter_restricts_candidates() {
        let index = seeded_index();
        let filter = SearchFilter {
            page: Some("Alpha".into()),
            header: None,
        };
        let hits = index.vector_search(&[0.0, 1.0, 0.0], 10, &filter).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.page == "Alpha"));
    }

    #[test]
    fn header_filter_matches_substring() {
        let index = seeded_index();
        let filter = SearchFilter {
            page: None,
            header: Some("Dep".into()),
        };
        let hits = index.vector_search(&[1.0, 0.0, 0.0], 10, &filter).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].header_path, "Deploy");
    }

    #[test]
    fn filters_combine_conjunctively() {
        let index = seeded_index();
        let filter = SearchFilter {
            page: Some("Alpha".into()),
            header: Some("Setup".into()),
        };
        let hits = index.vector_search(&[1.0, 0.0, 0.0], 10, &filter).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn lexical_search_finds_by_text() {
        let index = seeded_index();
        let hits = index
            .lexical_search("install", 5, &SearchFilter::default())
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].ordinal, 1);
        assert!(hits[0].score >= 0.0);
    }

    #[test]
    fn lexical_search_respects_page_filter() {
        let index = seeded_index();
        let filter = SearchFilter {
            page: Some("Beta".into()),
            header: None,
        };
        assert_eq!(index.lexical_search("auth", 5, &filter).unwrap().len(), 0);
        assert_eq!(index.lexical_search("install", 5, &filter).unwrap().len(), 1);
    }

    #[test]
    fn lexical_search_survives_special_characters() {
        let index = seeded_index();
        let hits = index
            .lexical_search("install\" OR \"", 5, &SearchFilter::default())
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!(index
            .lexical_search("\"(*)\"", 5, &SearchFilter::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn upsert_replaces_existing_ordinal() {
        let index = seeded_index();
        index
            .upsert(0, &chunk("Alpha", "Rewritten", "new text"), &[0.0, 0.0, 1.0])
            .unwrap();
        assert_eq!(index.len().unwrap(), 3);

        let hits = index
            .vector_search(&[0.0, 0.0, 1.0], 1, &SearchFilter::default())
            .unwrap();
        assert_eq!(hits[0].ordinal, 0);
        assert_eq!(hits[0].header_path, "Rewritten");
    }

    #[test]
    fn clear_removes_points_keeps_metadata() {
        let index = seeded_index();
        index.clear().unwrap();
        assert!(index.is_empty().unwrap());
        assert_eq!(index.dimensions().unwrap(), Some(3));
    }

    #[test]
    fn pin_shape_stores_and_validates() {
        let index = SearchIndex::in_memory().unwrap();
        assert_eq!(index.dimensions().unwrap(), None);
        assert_eq!(index.distance().unwrap(), Distance::Cosine);

        index.pin_shape(384, Distance::L2).unwrap();
        assert_eq!(index.dimensions().unwrap(), Some(384));
        assert_eq!(index.distance().unwrap(), Distance::L2);

        // Same shape is a no-op, different shape errors.
        index.pin_shape(384, Distance::L2).unwrap();
        assert!(index.pin_shape(768, Distance::L2).is_err());
        assert!(index.pin_shape(384, Distance::Cosine).is_err());
    }

    #[test]
    fn upsert_rejects_wrong_dimensions() {
        let index = SearchIndex::in_memory().unwrap();
        index.pin_shape(3, Distance::Cosine).unwrap();
        let err = index
            .upsert(0, &chunk("P", "H", "text"), &[0.1, 0.2])
            .unwrap_err();
        assert!(err.to_string().contains("dimensions"));
    }

    #[test]
    fn cosine_similarity_correct() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn l2_distance_correct() {
        assert!((l2_distance(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-9);
        assert_eq!(l2_distance(&[1.0], &[1.0, 2.0]), f64::INFINITY);
    }

    #[test]
    fn floats_bytes_roundtrip() {
        let floats = vec![0.25f32, -1.5, 3.75];
        assert_eq!(bytes_to_floats(&floats_to_bytes(&floats)), floats);
    }

    #[test]
    fn sanitize_strips_fts_operators() {
        assert_eq!(sanitize_fts_query("hello world"), "\"hello\" OR \"world\"");
        assert_eq!(sanitize_fts_query("a-b c*"), "\"ab\" OR \"c\"");
        assert_eq!(sanitize_fts_query("(((("), "");
    }
}
