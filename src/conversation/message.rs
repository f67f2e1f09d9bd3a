//! Transcript entries and their identifiers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who wrote a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing into the widget
    User,
    /// The remote assistant, or the widget speaking on its behalf
    Ai,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Ai => write!(f, "ai"),
        }
    }
}

/// A single transcript entry
///
/// Messages are immutable once created: fields are only readable, and the
/// transcript only ever appends them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    id: String,
    text: String,
    sender: Sender,
    source: Option<String>,
    created_at: DateTime<Utc>,
}

impl Message {
    pub(crate) fn new(
        id: String,
        text: impl Into<String>,
        sender: Sender,
        source: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
            source,
            created_at,
        }
    }

    /// Session-unique identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Body text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Author of the entry
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Citation URL attached to an ai answer
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Creation time
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Generator for session-unique, creation-ordered message ids
///
/// An id is `<millis>-<seq>`: the creation timestamp in milliseconds plus a
/// per-session counter. The counter keeps ids distinct when several messages
/// share a millisecond, and the timestamp never moves backwards even if the
/// wall clock does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageIdSequence {
    next_seq: u64,
    last_millis: i64,
}

impl MessageIdSequence {
    /// Produce the next id for a message created at `at`
    ///
    /// # Examples
    ///
    /// ```
    /// use chatbubble::conversation::MessageIdSequence;
    /// use chrono::Utc;
    ///
    /// let mut ids = MessageIdSequence::default();
    /// let now = Utc::now();
    /// assert_ne!(ids.next_id(now), ids.next_id(now));
    /// ```
    pub fn next_id(&mut self, at: DateTime<Utc>) -> String {
        self.last_millis = self.last_millis.max(at.timestamp_millis());
        let seq = self.next_seq;
        self.next_seq += 1;
        format!("{}-{}", self.last_millis, seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut ids = MessageIdSequence::default();
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let generated: Vec<String> = (0..5).map(|_| ids.next_id(at)).collect();
        let mut deduped = generated.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), 5);
        assert_eq!(generated[0], "1700000000000-0");
        assert_eq!(generated[4], "1700000000000-4");
    }

    #[test]
    fn test_timestamp_component_never_goes_backwards() {
        let mut ids = MessageIdSequence::default();
        let later = Utc.timestamp_millis_opt(2_000).unwrap();
        let earlier = Utc.timestamp_millis_opt(1_000).unwrap();
        assert_eq!(ids.next_id(later), "2000-0");
        assert_eq!(ids.next_id(earlier), "2000-1");
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::Ai).unwrap(), "\"ai\"");
        assert_eq!(Sender::User.to_string(), "user");
    }
}
