//! Comment types.
//!
//! `text` and `author` are tri-state: absent (`None`), explicitly null
//! (`Some(None)`) or a string (`Some(Some(_))`). The API never rejects a
//! body that leaves a field out or sets it to null; an absent field is not
//! stored and not serialized, a null one is stored and echoed as `null`.

use crate::store::{Document, Fields, StoreError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Deserializes a present field, keeping an explicit `null` as `Some(None)`.
/// Absent fields fall back to `None` through `#[serde(default)]`.
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<Option<String>>,
}

impl Comment {
    /// The text, if stored as a string.
    pub fn text(&self) -> Option<&str> {
        self.text.as_ref().and_then(|t| t.as_deref())
    }

    /// The author, if stored as a string.
    pub fn author(&self) -> Option<&str> {
        self.author.as_ref().and_then(|a| a.as_deref())
    }
}

impl TryFrom<Document> for Comment {
    type Error = StoreError;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        Ok(serde_json::from_value(doc.into_value())?)
    }
}

/// Request body for creating or updating a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommentInput {
    #[serde(default, deserialize_with = "explicit_null")]
    pub text: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub author: Option<Option<String>>,
}

impl CommentInput {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: Some(Some(text.into())),
            author: Some(Some(author.into())),
        }
    }

    /// Converts the input into document fields, leaving out absent values
    /// and storing explicit nulls as `null`.
    pub fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        if let Some(text) = self.text {
            fields.insert("text".to_string(), text.map_or(Value::Null, Value::String));
        }
        if let Some(author) = self.author {
            fields.insert("author".to_string(), author.map_or(Value::Null, Value::String));
        }
        fields
    }
}
