use std::path::PathBuf;

/// Errors that can occur across the pagesift pipeline.
///
/// Each variant wraps a specific failure domain. Library crates use this type
/// directly; the binary crate converts to `miette` diagnostics at the boundary.
///
/// # Examples
///
/// ```
/// use pagesift_core::SiftError;
///
/// let err = SiftError::Config("missing base_url".into());
/// assert!(err.to_string().contains("missing base_url"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SiftError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The export folder to ingest does not exist.
    #[error("input folder not found: {}", .0.display())]
    InputMissing(PathBuf),

    /// Embedding API or response error.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Search index (SQLite) failure.
    #[error("index error: {0}")]
    Index(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SiftError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn config_error_displays_message() {
        let err = SiftError::Config("bad value".into());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn input_missing_shows_path() {
        let err = SiftError::InputMissing(PathBuf::from("/tmp/export"));
        assert!(err.to_string().contains("/tmp/export"));
    }
}
