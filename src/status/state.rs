//! Status State
//!
//! The snapshot folded by the reducer.

use super::model::Status;
use serde::Serialize;

/// Page cursors read from the `link` response header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PageLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<i64>,
}

impl PageLinks {
    /// Links of a session that has not fetched anything yet: `{ next: 0 }`
    pub fn initial() -> Self {
        Self {
            next: Some(0),
            ..Self::default()
        }
    }

    /// Record the page for a `rel` name; unknown names are ignored
    pub fn set(&mut self, rel: &str, page: i64) {
        match rel {
            "first" => self.first = Some(page),
            "prev" => self.prev = Some(page),
            "next" => self.next = Some(page),
            "last" => self.last = Some(page),
            other => tracing::trace!("Ignoring link rel {:?}", other),
        }
    }
}

/// Server-reported total, or `NotANumber` when the header could not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TotalItems {
    Count(i64),
    /// Serialized as `null`
    NotANumber,
}

impl TotalItems {
    pub fn count(&self) -> Option<i64> {
        match self {
            Self::Count(n) => Some(*n),
            Self::NotANumber => None,
        }
    }
}

/// One immutable snapshot of the status slice
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusState {
    /// A list or detail fetch is in flight
    pub loading: bool,
    /// A create/update/patch/delete is in flight
    pub updating: bool,
    /// The most recently completed mutation succeeded
    pub update_success: bool,
    pub error_message: Option<String>,
    /// Loaded list pages, in page order
    pub entities: Vec<Status>,
    /// Currently loaded or edited record
    pub entity: Status,
    pub links: PageLinks,
    pub total_items: TotalItems,
}

impl StatusState {
    /// The fixed snapshot a session starts from and `Reset` returns to
    pub fn initial() -> Self {
        Self {
            loading: false,
            updating: false,
            update_success: false,
            error_message: None,
            entities: Vec::new(),
            entity: Status::default(),
            links: PageLinks::initial(),
            total_items: TotalItems::Count(0),
        }
    }
}

impl Default for StatusState {
    fn default() -> Self {
        Self::initial()
    }
}
