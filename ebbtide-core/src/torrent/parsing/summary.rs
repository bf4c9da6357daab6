//! Summary extraction from decoded torrent metainfo.
//!
//! Walks the decoded `info` dictionary structurally instead of scanning
//! raw bytes for key patterns. Length-prefixed byte strings (piece
//! hashes in particular) can contain any byte sequence, so a pattern
//! search for `5:files` or `6:lengthi` misclassifies torrents; a typed
//! tree lookup cannot.

use std::collections::BTreeMap;

use bytes::Bytes;

use super::types::TorrentSummary;
use super::value::BencodeValue;

/// Errors from summary extraction over a decoded value tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("top-level value is not a dictionary")]
    NotADictionary,

    #[error("missing or invalid 'info' dictionary")]
    MissingInfoDictionary,

    #[error("missing or invalid 'name' field")]
    MissingName,

    #[error("missing or negative 'length' field")]
    InvalidLength,

    #[error("malformed 'files' entry: {reason}")]
    InvalidFileEntry { reason: String },
}

/// Derives a [`TorrentSummary`] from a decoded metainfo dictionary.
///
/// Handles both layouts: single-file torrents carry `length` directly
/// in `info`, multi-file torrents carry a `files` list of per-file
/// dictionaries. A malformed file entry fails the whole extraction;
/// there is no partial summary.
///
/// # Errors
///
/// - `ExtractError::NotADictionary` - Top-level value is not a dictionary
/// - `ExtractError::MissingInfoDictionary` - No `info` dictionary present
/// - `ExtractError::MissingName` - `name` missing or not a byte string
/// - `ExtractError::InvalidLength` - Single-file `length` missing or negative
/// - `ExtractError::InvalidFileEntry` - Malformed element in the `files` list
pub fn extract_summary(value: &BencodeValue) -> Result<TorrentSummary, ExtractError> {
    let root = value.as_dict().ok_or(ExtractError::NotADictionary)?;
    let info = root
        .get(b"info".as_slice())
        .and_then(BencodeValue::as_dict)
        .ok_or(ExtractError::MissingInfoDictionary)?;

    let name = info
        .get(b"name".as_slice())
        .and_then(BencodeValue::as_bytes)
        .ok_or(ExtractError::MissingName)?;
    // Torrent names are conventionally UTF-8 but nothing enforces it.
    let name = String::from_utf8_lossy(name).into_owned();

    let (total_size, file_count) = match info.get(b"files".as_slice()) {
        None => (single_file_length(info)?, 1),
        Some(files) => multi_file_lengths(files)?,
    };

    Ok(TorrentSummary {
        name,
        total_size,
        file_count,
    })
}

fn single_file_length(info: &BTreeMap<Bytes, BencodeValue>) -> Result<u64, ExtractError> {
    info.get(b"length".as_slice())
        .and_then(BencodeValue::as_integer)
        .and_then(|length| u64::try_from(length).ok())
        .ok_or(ExtractError::InvalidLength)
}

fn multi_file_lengths(files: &BencodeValue) -> Result<(u64, usize), ExtractError> {
    let entries = files
        .as_list()
        .ok_or_else(|| ExtractError::InvalidFileEntry {
            reason: "'files' is not a list".to_string(),
        })?;

    let mut total_size: u64 = 0;
    for (index, entry) in entries.iter().enumerate() {
        let file = entry.as_dict().ok_or_else(|| ExtractError::InvalidFileEntry {
            reason: format!("entry {index} is not a dictionary"),
        })?;

        let length = file
            .get(b"length".as_slice())
            .and_then(BencodeValue::as_integer)
            .and_then(|length| u64::try_from(length).ok())
            .ok_or_else(|| ExtractError::InvalidFileEntry {
                reason: format!("entry {index} has a missing or negative 'length'"),
            })?;

        total_size = total_size
            .checked_add(length)
            .ok_or_else(|| ExtractError::InvalidFileEntry {
                reason: format!("entry {index} overflows the total size"),
            })?;
    }

    Ok((total_size, entries.len()))
}

#[cfg(test)]
mod tests {
    use super::super::bencode::decode;
    use super::*;

    fn summarize(data: &[u8]) -> Result<TorrentSummary, ExtractError> {
        extract_summary(&decode(data).unwrap())
    }

    #[test]
    fn test_single_file_summary() {
        let summary = summarize(b"d4:infod6:lengthi104857600e4:name5:a.isoee").unwrap();

        assert_eq!(summary.name, "a.iso");
        assert_eq!(summary.total_size, 104_857_600);
        assert_eq!(summary.file_count, 1);
    }

    #[test]
    fn test_multi_file_summary() {
        let summary =
            summarize(b"d4:infod5:filesld6:lengthi100eed6:lengthi250eee4:name4:packee").unwrap();

        assert_eq!(summary.name, "pack");
        assert_eq!(summary.total_size, 350);
        assert_eq!(summary.file_count, 2);
    }

    #[test]
    fn test_multi_file_empty_list() {
        let summary = summarize(b"d4:infod5:filesle4:name4:packee").unwrap();

        assert_eq!(summary.total_size, 0);
        assert_eq!(summary.file_count, 0);
    }

    #[test]
    fn test_root_not_a_dictionary() {
        assert_eq!(summarize(b"l4:spame"), Err(ExtractError::NotADictionary));
        assert_eq!(summarize(b"i42e"), Err(ExtractError::NotADictionary));
    }

    #[test]
    fn test_missing_info_dictionary() {
        assert_eq!(
            summarize(b"d3:fooi1ee"),
            Err(ExtractError::MissingInfoDictionary)
        );
        // Present but not a dictionary.
        assert_eq!(
            summarize(b"d4:infoi1ee"),
            Err(ExtractError::MissingInfoDictionary)
        );
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(
            summarize(b"d4:infod6:lengthi1eee"),
            Err(ExtractError::MissingName)
        );
        // Present but not a byte string.
        assert_eq!(
            summarize(b"d4:infod6:lengthi1e4:namei5eee"),
            Err(ExtractError::MissingName)
        );
    }

    #[test]
    fn test_name_with_invalid_utf8_is_lossy() {
        let mut data = Vec::from(&b"d4:infod6:lengthi1e4:name4:"[..]);
        data.extend_from_slice(&[0xFF, 0xFE, b'a', b'b']);
        data.extend_from_slice(b"ee");

        let summary = extract_summary(&decode(&data).unwrap()).unwrap();
        assert!(summary.name.contains('\u{FFFD}'));
        assert!(summary.name.ends_with("ab"));
    }

    #[test]
    fn test_single_file_missing_length() {
        assert_eq!(
            summarize(b"d4:infod4:name1:aee"),
            Err(ExtractError::InvalidLength)
        );
    }

    #[test]
    fn test_single_file_negative_length() {
        assert_eq!(
            summarize(b"d4:infod6:lengthi-5e4:name1:aee"),
            Err(ExtractError::InvalidLength)
        );
    }

    #[test]
    fn test_single_file_length_wrong_type() {
        assert_eq!(
            summarize(b"d4:infod6:length3:abc4:name1:aee"),
            Err(ExtractError::InvalidLength)
        );
    }

    #[test]
    fn test_files_not_a_list() {
        assert!(matches!(
            summarize(b"d4:infod5:filesi3e4:name1:aee"),
            Err(ExtractError::InvalidFileEntry { .. })
        ));
    }

    #[test]
    fn test_file_entry_not_a_dictionary() {
        assert!(matches!(
            summarize(b"d4:infod5:filesli5ee4:name1:aee"),
            Err(ExtractError::InvalidFileEntry { .. })
        ));
    }

    #[test]
    fn test_file_entry_missing_length() {
        // Malformed entries fail the whole extraction, never skipped.
        assert!(matches!(
            summarize(b"d4:infod5:filesld4:pathl1:aeee4:name1:aee"),
            Err(ExtractError::InvalidFileEntry { .. })
        ));
    }

    #[test]
    fn test_file_entry_negative_length() {
        assert!(matches!(
            summarize(b"d4:infod5:filesld6:lengthi-1eee4:name1:aee"),
            Err(ExtractError::InvalidFileEntry { .. })
        ));
    }

    #[test]
    fn test_opaque_pieces_bytes_cannot_masquerade_as_keys() {
        // Single-file torrent whose piece-hash blob happens to contain
        // the literal bytes `5:files` and `6:lengthi`. A byte-pattern
        // scan would misclassify this as multi-file; the structural
        // decode consumes the blob as one opaque string.
        let mut data = Vec::from(&b"d4:infod6:lengthi104857600e4:name5:a.iso6:pieces20:"[..]);
        data.extend_from_slice(b"5:files6:lengthi9");
        data.extend_from_slice(&[0xDE, 0xAD, 0xBE]);
        data.extend_from_slice(b"ee");

        let summary = extract_summary(&decode(&data).unwrap()).unwrap();
        assert_eq!(summary.name, "a.iso");
        assert_eq!(summary.total_size, 104_857_600);
        assert_eq!(summary.file_count, 1);
    }
}
