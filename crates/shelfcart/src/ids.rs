//! Newtype IDs for type-safe identifiers.
//!
//! The catalog backend hands out numeric ids while some screens pass them
//! around as strings, so every id deserializes from either form and is kept
//! as a string internally.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Wire forms accepted for an identifier.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Unsigned(n) => n.to_string(),
            RawId::Signed(n) => n.to_string(),
        }
    }
}

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }

            /// An id with no visible characters identifies nothing.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(n.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(BookId);
define_id!(RequestId);

impl RequestId {
    /// Generate a new request id from the clock and a process-local counter.
    pub fn generate() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};

        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let millis = chrono::Utc::now().timestamp_millis();
        let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("req-{millis:x}-{counter:04x}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = BookId::new("bk-123");
        assert_eq!(id.as_str(), "bk-123");
    }

    #[test]
    fn test_id_from_number() {
        let id: BookId = 42u64.into();
        assert_eq!(id, BookId::new("42"));
    }

    #[test]
    fn test_deserialize_string_or_number() {
        let from_num: BookId = serde_json::from_str("7").unwrap();
        let from_str: BookId = serde_json::from_str(r#""7""#).unwrap();
        let negative: BookId = serde_json::from_str("-3").unwrap();
        assert_eq!(from_num, from_str);
        assert_eq!(negative.as_str(), "-3");
    }

    #[test]
    fn test_deserialize_rejects_other_shapes() {
        assert!(serde_json::from_str::<BookId>("null").is_err());
        assert!(serde_json::from_str::<BookId>("1.5").is_err());
        assert!(serde_json::from_str::<BookId>("[1]").is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let id = BookId::from(9u64);
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""9""#);
    }

    #[test]
    fn test_blank() {
        assert!(BookId::new("").is_blank());
        assert!(BookId::new("  ").is_blank());
        assert!(!BookId::new("1").is_blank());
    }

    #[test]
    fn test_request_id_generation() {
        let a = RequestId::generate();
        let b = RequestId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("req-"));
    }
}
