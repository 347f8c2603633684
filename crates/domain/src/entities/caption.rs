//! Caption entity - a record presented to the user for rating.

use serde::{Deserialize, Serialize};

use crate::CaptionId;

/// A caption row as stored in the backing table.
///
/// Captions are immutable from the application's perspective: they are
/// fetched once per session and only ever read. Columns beyond `id` and
/// `content` are carried opaquely so the table can grow without breaking
/// deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caption {
    pub id: CaptionId,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Caption {
    pub fn new(id: impl Into<CaptionId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: Some(content.into()),
            extra: serde_json::Map::new(),
        }
    }

    /// A caption whose content column is NULL.
    pub fn empty(id: impl Into<CaptionId>) -> Self {
        Self {
            id: id.into(),
            content: None,
            extra: serde_json::Map::new(),
        }
    }
}
