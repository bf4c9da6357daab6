//! Main torrent parser implementation

use std::path::Path;

use async_trait::async_trait;

use super::super::TorrentError;
use super::types::{TorrentParser, TorrentSummary};
use super::{bencode, summary};
use crate::config::ParsingConfig;

/// Reference implementation over the in-tree bencode decoder.
///
/// Applies the configured size and nesting limits, decodes the buffer
/// into a typed value tree, and extracts the summary from it.
#[derive(Debug, Default)]
pub struct BencodeTorrentParser {
    config: ParsingConfig,
}

impl BencodeTorrentParser {
    /// Creates a parser with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with explicit limits.
    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl TorrentParser for BencodeTorrentParser {
    async fn parse_torrent_data(&self, data: &[u8]) -> Result<TorrentSummary, TorrentError> {
        let size = data.len() as u64;
        if size > self.config.max_torrent_bytes {
            return Err(TorrentError::FileTooLarge {
                size,
                limit: self.config.max_torrent_bytes,
            });
        }

        let value = bencode::decode_with_depth_limit(data, self.config.max_nesting_depth)?;
        let summary = summary::extract_summary(&value)?;

        tracing::debug!(
            "parsed torrent: name={}, total_size={}, file_count={}",
            summary.name,
            summary.total_size,
            summary.file_count
        );

        Ok(summary)
    }

    async fn parse_torrent_file(&self, path: &Path) -> Result<TorrentSummary, TorrentError> {
        let file_contents = tokio::fs::read(path).await?;

        self.parse_torrent_data(&file_contents).await
    }
}
