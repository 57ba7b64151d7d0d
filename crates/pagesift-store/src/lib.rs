//! JSON Lines chunk store.
//!
//! One UTF-8 file, one serialized [`Chunk`] per line, in ingestion order. The
//! line position of a record (its ordinal) is the identifier the search
//! indexes use, so loads always iterate in file order and rebuilds replace
//! the whole file atomically.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::{Path, PathBuf};

use pagesift_core::{Chunk, SiftError};

/// Handle to a chunk store file.
///
/// Creating the handle touches nothing on disk; every operation opens the
/// file fresh, so iteration is restartable.
///
/// # Examples
///
/// ```no_run
/// use pagesift_store::ChunkStore;
///
/// let store = ChunkStore::new("chunks.jsonl");
/// let mut records = store.load_all().unwrap();
/// for chunk in records.by_ref() {
///     println!("{}: {}", chunk.page, chunk.header_path_text());
/// }
/// println!("skipped {} malformed lines", records.skipped());
/// ```
#[derive(Debug, Clone)]
pub struct ChunkStore {
    path: PathBuf,
}

impl ChunkStore {
    /// A store handle at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the store file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Replace the store contents with `chunks`, atomically.
    ///
    /// Writes a temp file next to the target, then renames over it, so a
    /// concurrent reader sees either the old file or the new one, never a
    /// half-written mix. Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Io`] on filesystem failure, or
    /// [`SiftError::Serialization`] if a chunk cannot be encoded.
    pub fn rebuild(&self, chunks: &[Chunk]) -> Result<(), SiftError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Temp file in the same directory so the rename stays on one filesystem.
        let tmp = self.path.with_extension("jsonl.tmp");
        {
            let file = File::create(&tmp)?;
            let mut writer = ChunkWriter::new(BufWriter::new(file));
            for chunk in chunks {
                writer.append(chunk)?;
            }
            writer.into_inner().flush()?;
        }
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Lazily iterate every record in file order.
    ///
    /// Malformed lines are skipped, not fatal; the iterator counts them so
    /// callers can surface the damage.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Io`] if the file cannot be opened.
    pub fn load_all(&self) -> Result<ChunkIter, SiftError> {
        let file = File::open(&self.path)?;
        Ok(ChunkIter {
            lines: BufReader::new(file).lines(),
            skipped: 0,
        })
    }

    /// Resolve the record at position `ordinal` (0-based, file order).
    ///
    /// Returns `Ok(None)` when the file holds fewer records; malformed lines
    /// do not occupy ordinals.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Io`] if the file cannot be opened.
    pub fn lookup(&self, ordinal: u64) -> Result<Option<Chunk>, SiftError> {
        let mut records = self.load_all()?;
        Ok(records.nth(ordinal as usize))
    }
}

/// Appends chunk records to any writer, one JSON object per line.
#[derive(Debug)]
pub struct ChunkWriter<W: Write> {
    inner: W,
}

impl<W: Write> ChunkWriter<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Write one chunk as a single line.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Serialization`] if encoding fails, or
    /// [`SiftError::Io`] on write failure.
    pub fn append(&mut self, chunk: &Chunk) -> Result<(), SiftError> {
        serde_json::to_writer(&mut self.inner, chunk)?;
        self.inner.write_all(b"\n")?;
        Ok(())
    }

    /// Unwrap the underlying writer, e.g. to flush it.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Lazy iterator over store records in file order.
///
/// Lines that fail to parse are counted and skipped; I/O failure mid-file
/// ends the iteration.
#[derive(Debug)]
pub struct ChunkIter {
    lines: Lines<BufReader<File>>,
    skipped: usize,
}

impl ChunkIter {
    /// Number of malformed lines skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for ChunkIter {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        loop {
            let line = match self.lines.next()? {
                Ok(l) => l,
                Err(_) => return None,
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Chunk>(&line) {
                Ok(chunk) => return Some(chunk),
                Err(_) => self.skipped += 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write as _};

    fn chunk(page: &str, chunk_id: u32) -> Chunk {
        Chunk {
            page: page.into(),
            page_id: None,
            chunk_id,
            header_path: vec!["H".into()],
            content: format!("# H\n{page} body {chunk_id}"),
            plain_text: Some(format!("H\n{page} body {chunk_id}")),
        }
    }

    fn store_with(chunks: &[Chunk]) -> (tempfile::TempDir, ChunkStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ChunkStore::new(dir.path().join("chunks.jsonl"));
        store.rebuild(chunks).unwrap();
        (dir, store)
    }

    #[test]
    fn rebuild_then_load_roundtrips_in_order() {
        let chunks = vec![chunk("A", 1), chunk("A", 2), chunk("B", 1)];
        let (_dir, store) = store_with(&chunks);

        let loaded: Vec<Chunk> = store.load_all().unwrap().collect();
        assert_eq!(loaded, chunks);
    }

    #[test]
    fn rebuild_replaces_previous_contents() {
        let (_dir, store) = store_with(&[chunk("A", 1), chunk("A", 2)]);
        store.rebuild(&[chunk("B", 1)]).unwrap();

        let loaded: Vec<Chunk> = store.load_all().unwrap().collect();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].page, "B");
        // No temp file left behind.
        assert!(!store.path().with_extension("jsonl.tmp").exists());
    }

    #[test]
    fn rebuild_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChunkStore::new(dir.path().join("nested/deep/chunks.jsonl"));
        store.rebuild(&[chunk("A", 1)]).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn one_record_per_line() {
        let (_dir, store) = store_with(&[chunk("A", 1), chunk("B", 1)]);
        let mut text = String::new();
        File::open(store.path())
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text.lines().count(), 2);
        for line in text.lines() {
            assert!(serde_json::from_str::<Chunk>(line).is_ok());
        }
    }

    #[test]
    fn malformed_lines_are_skipped_and_counted() {
        let (_dir, store) = store_with(&[chunk("A", 1), chunk("B", 1)]);
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(store.path())
            .unwrap();
        writeln!(file, "{{not json").unwrap();
        writeln!(file, "{}", serde_json::to_string(&chunk("C", 1)).unwrap()).unwrap();

        let mut records = store.load_all().unwrap();
        let loaded: Vec<Chunk> = records.by_ref().collect();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[2].page, "C");
        assert_eq!(records.skipped(), 1);
    }

    #[test]
    fn lookup_resolves_by_file_position() {
        let (_dir, store) = store_with(&[chunk("A", 1), chunk("B", 1), chunk("C", 1)]);
        assert_eq!(store.lookup(0).unwrap().unwrap().page, "A");
        assert_eq!(store.lookup(2).unwrap().unwrap().page, "C");
        assert!(store.lookup(3).unwrap().is_none());
    }

    #[test]
    fn load_all_is_restartable() {
        let (_dir, store) = store_with(&[chunk("A", 1), chunk("B", 1)]);
        let first: Vec<Chunk> = store.load_all().unwrap().collect();
        let second: Vec<Chunk> = store.load_all().unwrap().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_file_errors_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChunkStore::new(dir.path().join("absent.jsonl"));
        assert!(!store.exists());
        assert!(store.load_all().is_err());
    }
}
