//! Recursive-descent bencode decoder.
//!
//! Decodes exactly one top-level value from an in-memory byte buffer
//! with one byte of lookahead and a byte-offset cursor. Decoding is a
//! pure function: no I/O, no global state, deterministic, and safe to
//! run concurrently over independent buffers.
//!
//! Dictionary handling is permissive: keys are accepted out of order,
//! and on a duplicate key the first occurrence wins. The replacement
//! value is still fully decoded and validated before being dropped, so
//! malformed bytes cannot hide behind a duplicate.

use std::collections::BTreeMap;

use bytes::Bytes;

use super::value::BencodeValue;

/// Maximum container nesting the decoder follows unless overridden.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Errors that can occur while decoding bencode data.
///
/// Positions are byte offsets into the input buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unexpected end of input at byte {position}")]
    UnexpectedEof { position: usize },

    #[error("invalid token {byte:#04x} at byte {position}")]
    InvalidToken { position: usize, byte: u8 },

    #[error("integer at byte {position} does not fit in 64 bits")]
    IntegerOverflow { position: usize },

    #[error("container nesting exceeds {max_depth} levels")]
    NestingTooDeep { max_depth: usize },

    #[error("trailing data after top-level value at byte {position}")]
    TrailingData { position: usize },
}

/// Decodes exactly one bencode value from `data`.
///
/// Bytes remaining after the first value fail the decode; a well-formed
/// `.torrent` file is a single top-level dictionary, but any value type
/// is accepted at the top level.
///
/// # Errors
///
/// - `DecodeError::UnexpectedEof` - Input ended where a value or more bytes were expected
/// - `DecodeError::InvalidToken` - Malformed token at the reported offset
/// - `DecodeError::IntegerOverflow` - Integer or length prefix out of 64-bit range
/// - `DecodeError::NestingTooDeep` - Containers nest deeper than [`DEFAULT_MAX_DEPTH`]
/// - `DecodeError::TrailingData` - Bytes remain after the first value
pub fn decode(data: &[u8]) -> Result<BencodeValue, DecodeError> {
    decode_with_depth_limit(data, DEFAULT_MAX_DEPTH)
}

/// Decodes one bencode value, bounding container nesting at `max_depth`.
///
/// A `max_depth` of zero still decodes scalars; the first list or
/// dictionary fails.
///
/// # Errors
///
/// Same as [`decode`], with `DecodeError::NestingTooDeep` raised at the
/// given bound instead of the default.
pub fn decode_with_depth_limit(
    data: &[u8],
    max_depth: usize,
) -> Result<BencodeValue, DecodeError> {
    let mut pos = 0;
    let value = decode_value(data, &mut pos, 0, max_depth)?;

    if pos != data.len() {
        return Err(DecodeError::TrailingData { position: pos });
    }

    Ok(value)
}

fn decode_value(
    data: &[u8],
    pos: &mut usize,
    depth: usize,
    max_depth: usize,
) -> Result<BencodeValue, DecodeError> {
    match data.get(*pos).copied() {
        None => Err(DecodeError::UnexpectedEof { position: *pos }),
        Some(b'i') => decode_integer(data, pos),
        Some(b'l') => decode_list(data, pos, depth, max_depth),
        Some(b'd') => decode_dict(data, pos, depth, max_depth),
        Some(b'0'..=b'9') => decode_bytes(data, pos),
        Some(byte) => Err(DecodeError::InvalidToken {
            position: *pos,
            byte,
        }),
    }
}

fn decode_integer(data: &[u8], pos: &mut usize) -> Result<BencodeValue, DecodeError> {
    *pos += 1; // consume 'i'

    let start = *pos;
    while *pos < data.len() && data[*pos] != b'e' {
        *pos += 1;
    }
    if *pos >= data.len() {
        return Err(DecodeError::UnexpectedEof { position: *pos });
    }

    let digits = &data[start..*pos];
    let negative = digits.first() == Some(&b'-');
    let unsigned_start = if negative { start + 1 } else { start };
    let unsigned = &data[unsigned_start..*pos];

    // `0`, or a non-zero digit followed by more digits; `i03e` and
    // `i-0e` are not well-formed bencode.
    let malformed = unsigned.is_empty()
        || (unsigned.len() > 1 && unsigned[0] == b'0')
        || (negative && unsigned == b"0");
    if malformed {
        return Err(DecodeError::InvalidToken {
            position: start,
            byte: data[start],
        });
    }
    if let Some(offset) = unsigned.iter().position(|b| !b.is_ascii_digit()) {
        return Err(DecodeError::InvalidToken {
            position: unsigned_start + offset,
            byte: unsigned[offset],
        });
    }

    // Accumulate toward i64::MIN so the full negative range parses.
    let mut value: i64 = 0;
    for &b in unsigned {
        let digit = i64::from(b - b'0');
        value = value
            .checked_mul(10)
            .and_then(|v| {
                if negative {
                    v.checked_sub(digit)
                } else {
                    v.checked_add(digit)
                }
            })
            .ok_or(DecodeError::IntegerOverflow { position: start })?;
    }

    *pos += 1; // consume 'e'
    Ok(BencodeValue::Integer(value))
}

fn decode_bytes(data: &[u8], pos: &mut usize) -> Result<BencodeValue, DecodeError> {
    let start = *pos;
    while *pos < data.len() && data[*pos].is_ascii_digit() {
        *pos += 1;
    }
    if *pos >= data.len() {
        return Err(DecodeError::UnexpectedEof { position: *pos });
    }
    if data[*pos] != b':' {
        return Err(DecodeError::InvalidToken {
            position: *pos,
            byte: data[*pos],
        });
    }

    let digits = &data[start..*pos];
    if digits.len() > 1 && digits[0] == b'0' {
        return Err(DecodeError::InvalidToken {
            position: start,
            byte: b'0',
        });
    }

    let mut length: u64 = 0;
    for &b in digits {
        length = length
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .ok_or(DecodeError::IntegerOverflow { position: start })?;
    }

    *pos += 1; // consume ':'

    let remaining = (data.len() - *pos) as u64;
    if length > remaining {
        return Err(DecodeError::UnexpectedEof {
            position: data.len(),
        });
    }

    let length = length as usize;
    let bytes = Bytes::copy_from_slice(&data[*pos..*pos + length]);
    *pos += length;

    Ok(BencodeValue::Bytes(bytes))
}

fn decode_list(
    data: &[u8],
    pos: &mut usize,
    depth: usize,
    max_depth: usize,
) -> Result<BencodeValue, DecodeError> {
    if depth >= max_depth {
        return Err(DecodeError::NestingTooDeep { max_depth });
    }

    *pos += 1; // consume 'l'
    let mut items = Vec::new();

    while *pos < data.len() && data[*pos] != b'e' {
        items.push(decode_value(data, pos, depth + 1, max_depth)?);
    }
    if *pos >= data.len() {
        return Err(DecodeError::UnexpectedEof { position: *pos });
    }

    *pos += 1; // consume 'e'
    Ok(BencodeValue::List(items))
}

fn decode_dict(
    data: &[u8],
    pos: &mut usize,
    depth: usize,
    max_depth: usize,
) -> Result<BencodeValue, DecodeError> {
    if depth >= max_depth {
        return Err(DecodeError::NestingTooDeep { max_depth });
    }

    *pos += 1; // consume 'd'
    let mut entries: BTreeMap<Bytes, BencodeValue> = BTreeMap::new();

    while *pos < data.len() && data[*pos] != b'e' {
        let key_pos = *pos;
        let key = match decode_value(data, pos, depth + 1, max_depth)? {
            BencodeValue::Bytes(key) => key,
            _ => {
                return Err(DecodeError::InvalidToken {
                    position: key_pos,
                    byte: data[key_pos],
                });
            }
        };

        let value = decode_value(data, pos, depth + 1, max_depth)?;
        entries.entry(key).or_insert(value);
    }
    if *pos >= data.len() {
        return Err(DecodeError::UnexpectedEof { position: *pos });
    }

    *pos += 1; // consume 'e'
    Ok(BencodeValue::Dict(entries))
}
