//! Ebbtide Core - torrent metainfo decoding and summary extraction
//!
//! This crate is the data-format core of Ebbtide: a general bencode
//! decoder and the metadata extraction that derives a torrent's display
//! name, total content size, and file count from its `info` dictionary.
//! The remote session client, credential storage, and presentation
//! layers consume these summaries but live outside this crate; nothing
//! here performs network calls or touches persisted state.

pub mod config;
pub mod torrent;

// Re-export main types for convenient access
pub use config::ParsingConfig;
pub use torrent::{
    BencodeTorrentParser, BencodeValue, DecodeError, ExtractError, TorrentError, TorrentParser,
    TorrentSummary,
};

pub type Result<T> = std::result::Result<T, TorrentError>;
