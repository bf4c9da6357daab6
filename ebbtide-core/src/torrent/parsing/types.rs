//! Core types and structures for torrent parsing

use std::path::Path;

use async_trait::async_trait;

use super::super::TorrentError;

/// Summary metadata for one torrent.
///
/// Derived once per decode from the `info` dictionary; read-only.
/// Persistence of torrent state, if any, belongs to the session layer
/// consuming these summaries, not to this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentSummary {
    pub name: String,
    pub total_size: u64,
    pub file_count: usize,
}

impl TorrentSummary {
    /// Format total size in human-readable form.
    pub fn format_size(&self) -> String {
        const GB: u64 = 1024 * 1024 * 1024;
        const MB: u64 = 1024 * 1024;

        if self.total_size >= GB {
            format!("{:.1} GB", self.total_size as f64 / GB as f64)
        } else if self.total_size >= MB {
            format!("{:.1} MB", self.total_size as f64 / MB as f64)
        } else {
            format!("{:.1} KB", self.total_size as f64 / 1024.0)
        }
    }

    /// File count with unit, e.g. "1 file" or "12 files".
    pub fn file_count_label(&self) -> String {
        if self.file_count == 1 {
            "1 file".to_string()
        } else {
            format!("{} files", self.file_count)
        }
    }
}

/// Abstract torrent parsing interface for multiple implementations.
///
/// Provides a unified interface for deriving torrent summaries from
/// various sources. Implementations handle format-specific details
/// while maintaining consistent error handling.
#[async_trait]
pub trait TorrentParser: Send + Sync {
    /// Parses summary metadata from raw bencode bytes.
    ///
    /// Decodes the buffer into a typed value tree and extracts name,
    /// total content size, and file count from the `info` dictionary.
    ///
    /// # Errors
    ///
    /// - `TorrentError::Decode` - Malformed bencode data
    /// - `TorrentError::Extract` - Decoded tree is not a torrent dictionary
    /// - `TorrentError::FileTooLarge` - Buffer exceeds the configured limit
    async fn parse_torrent_data(&self, data: &[u8]) -> Result<TorrentSummary, TorrentError>;

    /// Parses a torrent file from a filesystem path.
    ///
    /// Reads the file from disk and delegates to `parse_torrent_data`.
    /// Convenience method for the file-import flow.
    ///
    /// # Errors
    ///
    /// - `TorrentError::Io` - File could not be read
    async fn parse_torrent_file(&self, path: &Path) -> Result<TorrentSummary, TorrentError>;
}
