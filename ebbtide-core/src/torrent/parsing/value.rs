//! Typed value tree produced by the bencode decoder.

use std::collections::BTreeMap;

use bytes::Bytes;

/// A single decoded bencode value.
///
/// Bencode has four data types: integers, byte strings, lists, and
/// dictionaries. Byte strings are kept as raw bytes because torrent
/// fields (piece hashes in particular) are not guaranteed to be valid
/// UTF-8. Trees are immutable once produced and exclusively owned by
/// the caller that received them from the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BencodeValue {
    /// Signed 64-bit integer.
    Integer(i64),
    /// Length-prefixed byte string.
    Bytes(Bytes),
    /// Ordered list of values.
    List(Vec<BencodeValue>),
    /// Dictionary with byte-string keys, iterated in lexicographic key order.
    Dict(BTreeMap<Bytes, BencodeValue>),
}

impl BencodeValue {
    /// Returns the value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            BencodeValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as raw bytes, if it is a byte string.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            BencodeValue::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the value as a string slice, if it is a byte string
    /// holding valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BencodeValue::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    /// Returns the value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[BencodeValue]> {
        match self {
            BencodeValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the value as a dictionary, if it is one.
    pub fn as_dict(&self) -> Option<&BTreeMap<Bytes, BencodeValue>> {
        match self {
            BencodeValue::Dict(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a dictionary.
    ///
    /// Returns `None` if the value is not a dictionary or the key is
    /// not present.
    pub fn get(&self, key: &[u8]) -> Option<&BencodeValue> {
        self.as_dict()?.get(key)
    }
}
