use serde::{Deserialize, Serialize};
use tracing::warn;

/// Stable identity of a cell, assigned by the editor on first submission.
pub type Fragment = i64;

/// One unit of user-submitted source.
///
/// `fragment` is the identity, `position` the current place in the
/// notebook. They are separate because the user can reorder cells while
/// the fragment stays fixed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cell {
    #[serde(rename = "Fragment", alias = "fragment")]
    pub fragment: Fragment,
    #[serde(rename = "Index", alias = "position", alias = "index")]
    pub position: i64,
    #[serde(rename = "Contents", alias = "content", alias = "contents")]
    pub content: String,
    #[serde(rename = "Executing", alias = "executing")]
    pub executing: bool,
    #[serde(rename = "Filename", alias = "documentId", alias = "filename")]
    pub document: String,
}

impl Cell {
    pub fn new(fragment: Fragment, position: i64, content: impl Into<String>) -> Self {
        Self {
            fragment,
            position,
            content: content.into(),
            executing: false,
            document: String::new(),
        }
    }

    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = document.into();
        self
    }

    /// Decode a submission body.
    ///
    /// Malformed input degrades to an empty cell instead of failing the
    /// request; the caller sees an empty run.
    pub fn decode(body: &[u8]) -> Self {
        match serde_json::from_slice::<Cell>(body) {
            Ok(cell) => cell,
            Err(e) => {
                warn!(error = %e, bytes = body.len(), "undecodable cell payload, using empty cell");
                Cell::default()
            }
        }
    }

    /// Ordering key: position first, fragment breaks ties.
    pub fn order_key(&self) -> (i64, Fragment) {
        (self.position, self.fragment)
    }
}
