//! Cart entry type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CartError;
use crate::ids::BookId;

/// Keys the entry interprets itself; passthrough fields may not reuse them.
pub const RESERVED_FIELDS: [&str; 2] = ["id", "title"];

/// A book waiting in the borrowing cart.
///
/// Only `id` and `title` are interpreted. Everything else the catalog sent
/// along (author, category, cover, ...) is kept as passthrough fields and
/// written back to storage untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Catalog book identifier.
    pub id: BookId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Passthrough display fields. Never holds a reserved key.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl CartEntry {
    /// Create an entry with no passthrough fields.
    ///
    /// Whitespace around the id is dropped.
    pub fn new(id: impl Into<BookId>, title: impl Into<String>) -> Self {
        let id: BookId = id.into();
        Self {
            id: BookId::new(id.as_str().trim()),
            title: title.into(),
            extra: Map::new(),
        }
    }

    /// Attach a passthrough field.
    ///
    /// `id` and `title` are reserved and ignored here; set them through the
    /// entry's own fields.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if is_reserved(&key) {
            tracing::debug!(key = %key, "ignoring reserved passthrough field");
            return self;
        }
        self.extra.insert(key, value.into());
        self
    }

    /// Build an entry from a raw catalog payload.
    ///
    /// The payload must be an object whose `id` is a non-blank string or an
    /// integer. `title` may be missing. A string id is trimmed.
    pub fn from_value(value: Value) -> Result<Self, CartError> {
        let Value::Object(mut fields) = value else {
            return Err(CartError::Validation("catalog item is not an object".to_string()));
        };

        let trimmed_id = match fields.get("id") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::Number(n)) if n.is_i64() || n.is_u64() => None,
            Some(_) => {
                return Err(CartError::Validation("book id is not usable".to_string()));
            }
            None => return Err(CartError::Validation("book id is missing".to_string())),
        };
        if let Some(id) = trimmed_id {
            fields.insert("id".to_string(), Value::String(id));
        }

        if !matches!(fields.get("title"), None | Some(Value::String(_))) {
            return Err(CartError::Validation("title is not a string".to_string()));
        }

        serde_json::from_value(Value::Object(fields))
            .map_err(|e| CartError::Validation(e.to_string()))
    }

    /// Passthrough fields, without `id` and `title`.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Passthrough field as a string, if present.
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }

    pub fn author(&self) -> Option<&str> {
        self.field_str("author")
    }

    pub fn category(&self) -> Option<&str> {
        self.field_str("category")
    }

    /// Title for messages; falls back to the id when the catalog sent none.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            self.id.as_str()
        } else {
            &self.title
        }
    }
}

/// Whether `key` names a field the entry interprets itself.
pub fn is_reserved(key: &str) -> bool {
    RESERVED_FIELDS.contains(&key)
}
