//! Torrent metainfo parsing.
//!
//! In-tree bencode decoding plus structural metadata extraction.
//! The decoder produces a typed value tree; the extractor walks that
//! tree to derive a [`TorrentSummary`]. Callers supply the byte buffer
//! and consume the summary; they never see the intermediate tree.

pub mod bencode;
pub mod parser;
pub mod summary;
pub mod types;
pub mod value;

// Re-export public API
pub use bencode::{DEFAULT_MAX_DEPTH, DecodeError, decode, decode_with_depth_limit};
pub use parser::BencodeTorrentParser;
pub use summary::{ExtractError, extract_summary};
pub use types::{TorrentParser, TorrentSummary};
pub use value::BencodeValue;
