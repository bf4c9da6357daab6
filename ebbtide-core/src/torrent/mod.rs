//! Torrent metainfo decoding and summary extraction.

pub mod parsing;

pub use parsing::{
    BencodeTorrentParser, BencodeValue, DecodeError, ExtractError, TorrentParser, TorrentSummary,
};

/// Errors that can occur while turning torrent file bytes into a summary.
///
/// Decode and extraction failures are disjoint taxonomies surfaced as
/// explicit values; any failure means the whole summary is unavailable.
#[derive(Debug, thiserror::Error)]
pub enum TorrentError {
    #[error("bencode decoding failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("metadata extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("torrent file is {size} bytes, limit is {limit}")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TorrentError {
    /// Returns a user-friendly error message suitable for display.
    ///
    /// Every variant reads as "could not determine torrent metadata";
    /// callers must not substitute zero-valued summaries on failure.
    pub fn user_message(&self) -> String {
        match self {
            TorrentError::Decode(_) | TorrentError::Extract(_) => {
                "Could not read torrent file. The file may be corrupted.".to_string()
            }
            TorrentError::FileTooLarge { .. } => "Torrent file is too large to open.".to_string(),
            TorrentError::Io(_) => "Could not open torrent file.".to_string(),
        }
    }
}
