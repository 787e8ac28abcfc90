//! On-disk record types and key encoding
//!
//! Both trees are keyed by a big-endian `u64`, so sled's byte ordering is
//! also insertion order. Values are bincode-encoded records.
//!
//! # Types
//!
//! - **`RecordKey`**: id wrapper convertible to and from the 8-byte tree key
//! - **`SnippetRecord`**: value stored in the `snippets` tree
//! - **`LanguageRecord`**: value stored in the `languages` tree

use super::error::DbError;
use bincode::{Decode, Encode};

/// Wrapper for a record id that converts to a fixed-width tree key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordKey(pub u64);

impl RecordKey {
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// # Errors
    ///
    /// Returns `DbError::InvalidKey` if the key is not exactly 8 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DbError> {
        let raw: [u8; 8] = bytes
            .try_into()
            .map_err(|_| DbError::InvalidKey(bytes.len()))?;
        Ok(Self(u64::from_be_bytes(raw)))
    }
}

/// Persisted form of a snippet
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct SnippetRecord {
    pub title: String,
    pub description: String,
    pub code: String,
    pub keywords: String,
    pub usage_count: u64,
    pub last_used: i64,
    pub created_at: i64,
    pub language_id: Option<u64>,
}

/// Persisted form of a language
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct LanguageRecord {
    pub name: String,
    pub description: String,
    pub formatters: Vec<String>,
}

pub(super) fn encode<T: Encode>(value: &T) -> Result<Vec<u8>, DbError> {
    Ok(bincode::encode_to_vec(value, bincode::config::standard())?)
}

pub(super) fn decode<T: Decode<()>>(bytes: &[u8]) -> Result<T, DbError> {
    let (value, _): (T, usize) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_key_orders_like_ids() {
        let low = RecordKey(2).to_bytes();
        let high = RecordKey(300).to_bytes();
        assert!(low < high);
    }

    #[test]
    fn test_record_key_rejects_wrong_width() {
        let err = RecordKey::from_bytes(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, DbError::InvalidKey(3)));
    }

    #[test]
    fn test_record_key_from_bytes() {
        let key = RecordKey::from_bytes(&RecordKey(77).to_bytes()).unwrap();
        assert_eq!(key, RecordKey(77));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result: Result<SnippetRecord, DbError> = decode(&[0xff]);
        assert!(result.is_err());
    }
}
