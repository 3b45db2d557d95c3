//! Data models for dialog records and frequency tables
//!
//! This module contains the record type produced at ingestion and the
//! counting structures the accumulators own.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::{ChatStatsError, Result};

/// Message payload, decided once when the row is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    /// Plain text message
    Text {
        /// Message body
        body: String,
    },
    /// Voice note
    Voice {
        /// Length in whole seconds
        duration: u64,
    },
    /// Photo attachment
    Photo,
    /// Video attachment
    Video {
        /// Length in whole seconds
        duration: u64,
    },
    /// Any other `type` value, kept verbatim
    Other(String),
}

impl MessageKind {
    /// Name of the kind as it appears in the `type` column
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text { .. } => "text",
            Self::Voice { .. } => "voice",
            Self::Photo => "photo",
            Self::Video { .. } => "video",
            Self::Other(raw) => raw,
        }
    }
}

/// One row of an exported dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    /// Timestamp exactly as exported
    pub date: String,
    /// Typed payload
    pub kind: MessageKind,
    /// True when `fwd_from` was non-empty
    pub forwarded: bool,
    /// Sender identifier (`id` column)
    pub sender: String,
}

impl MessageRecord {
    /// Build a record from a header-keyed row.
    ///
    /// `date`, `type` and `id` are required for every row; `message` for text
    /// and `duration` for voice and video.
    pub fn from_row(row: &HashMap<String, String>) -> Result<Self> {
        let raw_kind = row.get("type").cloned().unwrap_or_default();
        let field = |name: &'static str| {
            row.get(name).cloned().ok_or_else(|| ChatStatsError::MissingField {
                field: name,
                kind: raw_kind.clone(),
            })
        };

        let kind = match raw_kind.as_str() {
            "text" => MessageKind::Text {
                body: field("message")?,
            },
            "voice" => MessageKind::Voice {
                duration: parse_duration(&field("duration")?)?,
            },
            "photo" => MessageKind::Photo,
            "video" => MessageKind::Video {
                duration: parse_duration(&field("duration")?)?,
            },
            _ => MessageKind::Other(field("type")?),
        };

        Ok(Self {
            date: field("date")?,
            forwarded: row.get("fwd_from").is_some_and(|v| !v.is_empty()),
            sender: field("id")?,
            kind,
        })
    }
}

/// Parse a media duration; decimals are truncated to whole seconds.
pub fn parse_duration(raw: &str) -> Result<u64> {
    let trimmed = raw.trim();
    if let Ok(secs) = trimmed.parse::<u64>() {
        return Ok(secs);
    }
    match trimmed.parse::<f64>() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs.trunc() as u64),
        _ => Err(ChatStatsError::InvalidDuration(raw.to_string())),
    }
}

/// One-hour slot of the day, displayed as `"h-(h+1)"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourSlot(pub u64);

impl fmt::Display for HourSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, u128::from(self.0) + 1)
    }
}

/// Key -> running count, remembering the order keys were first seen.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, u64)>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `key`
    pub fn increment(&mut self, key: K) {
        self.add(key, 1);
    }

    /// Add `amount` occurrences of `key`. A zero amount still registers the key.
    pub fn add(&mut self, key: K, amount: u64) {
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 += amount;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, amount));
        }
    }

    /// Count recorded for `key`, zero if never seen
    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map_or(0, |&slot| self.entries[slot].1)
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    #[must_use]
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }
}

impl<K: Eq + Hash + Clone> FromIterator<(K, u64)> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, amount) in iter {
            table.add(key, amount);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_text_record_from_row() {
        let record = MessageRecord::from_row(&row(&[
            ("date", "2023-01-01 5:30"),
            ("type", "text"),
            ("message", "hello"),
            ("fwd_from", ""),
            ("id", "u1"),
        ]))
        .unwrap();

        assert_eq!(record.kind, MessageKind::Text { body: "hello".to_string() });
        assert!(!record.forwarded);
        assert_eq!(record.sender, "u1");
    }

    #[test]
    fn test_voice_record_needs_duration() {
        let result = MessageRecord::from_row(&row(&[
            ("date", "2023-01-01 5:30"),
            ("type", "voice"),
            ("id", "u1"),
        ]));
        assert!(matches!(
            result,
            Err(ChatStatsError::MissingField { field: "duration", .. })
        ));
    }

    #[test]
    fn test_unknown_type_is_kept() {
        let record = MessageRecord::from_row(&row(&[
            ("date", "2023-01-01 5:30"),
            ("type", "sticker"),
            ("fwd_from", "channel"),
            ("id", "u2"),
        ]))
        .unwrap();
        assert_eq!(record.kind.as_str(), "sticker");
        assert!(record.forwarded);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("12").unwrap(), 12);
        assert_eq!(parse_duration(" 7.9 ").unwrap(), 7);
        assert!(parse_duration("").is_err());
        assert!(parse_duration("-3").is_err());
    }

    #[test]
    fn test_hour_slot_display() {
        assert_eq!(HourSlot(5).to_string(), "5-6");
        assert_eq!(HourSlot(23).to_string(), "23-24");
        assert_eq!(HourSlot(u64::MAX).to_string(), "18446744073709551615-18446744073709551616");
    }

    #[test]
    fn test_frequency_table_keeps_first_seen_order() {
        let mut table = FrequencyTable::new();
        table.increment("b");
        table.increment("a");
        table.add("b", 4);

        let entries: Vec<_> = table.iter().map(|(k, v)| (*k, v)).collect();
        assert_eq!(entries, vec![("b", 5), ("a", 1)]);
        assert_eq!(table.get("a"), 1);
        assert_eq!(table.get("z"), 0);
        assert_eq!(table.total(), 6);
    }
}
