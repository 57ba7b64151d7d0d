//! Header-path tracking across a page.

/// Maintains the breadcrumb of currently-open headers while a page streams by.
///
/// Entering a header at level `n` closes every header at level `n` or deeper
/// and opens the new one. A level jump (e.g. `#` straight to `###`) simply
/// appends; no placeholder entries are invented for the skipped levels.
///
/// # Examples
///
/// ```
/// use pagesift_chunk::HeaderTracker;
///
/// let mut tracker = HeaderTracker::new();
/// tracker.on_header(1, "Guide");
/// tracker.on_header(2, "Install");
/// tracker.on_header(2, "Usage");
/// assert_eq!(tracker.current(), vec!["Guide".to_string(), "Usage".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeaderTracker {
    path: Vec<String>,
}

impl HeaderTracker {
    /// An empty tracker; the path stays empty until the first header arrives.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a header at `level` (1..=6), replacing everything at that depth
    /// or below.
    pub fn on_header(&mut self, level: u8, title: &str) {
        let depth = usize::from(level.clamp(1, 6));
        self.path.truncate(depth - 1);
        self.path.push(title.trim().to_string());
    }

    /// Snapshot of the current path, outermost header first.
    pub fn current(&self) -> Vec<String> {
        self.path.clone()
    }
}
