//! Resource store for crawled HTML
//!
//! Accepted pages are written under a single resource folder, one file per
//! page. Filenames are the only addressable handle to saved pages; nothing
//! else indexes them. A file written by a prior call is never overwritten.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;
use tokio::fs;

/// Identifiers longer than this are truncated before the timestamp suffix
const MAX_IDENTIFIER_CHARS: usize = 80;

/// Error type for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Folder creation or file write failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Append-only store writing HTML files under a base folder
#[derive(Debug, Clone)]
pub struct ResourceStore {
    base_path: PathBuf,
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceStore {
    /// Create a store rooted at the default `./resource` folder
    pub fn new() -> Self {
        Self {
            base_path: PathBuf::from("./resource"),
        }
    }

    /// Create a store rooted at a custom folder
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Folder the store writes into
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Map an identifier to a filesystem-safe filename stem
    fn sanitize(identifier: &str) -> String {
        let safe: String = identifier
            .chars()
            .take(MAX_IDENTIFIER_CHARS)
            .map(|c| {
                if c.is_alphanumeric() || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        if safe.is_empty() {
            "page".to_string()
        } else {
            safe
        }
    }

    /// Write HTML under a sanitized, timestamped filename and return the path
    ///
    /// Collisions get a counter suffix, so two calls with the same identifier
    /// in the same second still produce two distinct files.
    pub async fn save(&self, identifier: &str, html: &str) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.base_path).await?;

        let stem = format!(
            "{}_{}",
            Self::sanitize(identifier),
            Local::now().format("%Y%m%d%H%M%S")
        );

        let mut path = self.base_path.join(format!("{stem}.html"));
        let mut counter = 1u32;
        while fs::try_exists(&path).await? {
            path = self.base_path.join(format!("{stem}_{counter}.html"));
            counter += 1;
        }

        fs::write(&path, html).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sanitize_replaces_disallowed_characters() {
        assert_eq!(
            ResourceStore::sanitize("climate_sea-level rise/ipcc.ch"),
            "climate_sea-level_rise_ipcc_ch"
        );
    }

    #[test]
    fn test_sanitize_keeps_non_ascii_alphanumerics() {
        assert_eq!(ResourceStore::sanitize("search_해수면상승"), "search_해수면상승");
    }

    #[test]
    fn test_sanitize_caps_length() {
        let long = "x".repeat(200);
        assert_eq!(ResourceStore::sanitize(&long).chars().count(), MAX_IDENTIFIER_CHARS);
    }

    #[test]
    fn test_sanitize_empty_identifier() {
        assert_eq!(ResourceStore::sanitize(""), "page");
    }

    #[tokio::test]
    async fn test_save_creates_folder_and_writes() {
        let dir = tempdir().unwrap();
        let store = ResourceStore::with_base_path(dir.path().join("resource"));

        let path = store.save("climate_temperature_nasa", "<html></html>").await.unwrap();

        assert!(path.exists());
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, "<html></html>");
    }

    #[tokio::test]
    async fn test_save_never_overwrites_on_colliding_identifiers() {
        let dir = tempdir().unwrap();
        let store = ResourceStore::with_base_path(dir.path());

        let first = store.save("same_id", "first").await.unwrap();
        let second = store.save("same_id", "second").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(tokio::fs::read_to_string(&first).await.unwrap(), "first");
        assert_eq!(tokio::fs::read_to_string(&second).await.unwrap(), "second");
    }
}
