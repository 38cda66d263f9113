//! Status Actions
//!
//! Every transition of the status slice is one `StatusAction`. Network
//! operations go through three phases: pending when the request starts,
//! then fulfilled or rejected when it settles.

use super::model::Status;

pub const FETCH_STATUS_LIST: &str = "status/FETCH_STATUS_LIST";
pub const FETCH_STATUS: &str = "status/FETCH_STATUS";
pub const CREATE_STATUS: &str = "status/CREATE_STATUS";
pub const UPDATE_STATUS: &str = "status/UPDATE_STATUS";
pub const PARTIAL_UPDATE_STATUS: &str = "status/PARTIAL_UPDATE_STATUS";
pub const DELETE_STATUS: &str = "status/DELETE_STATUS";
pub const RESET: &str = "status/RESET";

/// Network operations of the slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchList,
    Fetch,
    Create,
    Update,
    PartialUpdate,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Self::FetchList,
        Self::Fetch,
        Self::Create,
        Self::Update,
        Self::PartialUpdate,
        Self::Delete,
    ];

    /// Action type identifier of this operation
    pub fn action_type(&self) -> &'static str {
        match self {
            Self::FetchList => FETCH_STATUS_LIST,
            Self::Fetch => FETCH_STATUS,
            Self::Create => CREATE_STATUS,
            Self::Update => UPDATE_STATUS,
            Self::PartialUpdate => PARTIAL_UPDATE_STATUS,
            Self::Delete => DELETE_STATUS,
        }
    }

    /// Reads drive `loading`, writes drive `updating`
    pub fn is_read(&self) -> bool {
        matches!(self, Self::FetchList | Self::Fetch)
    }
}

/// A list page as returned by the server, headers still unparsed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListPage {
    pub data: Vec<Status>,
    /// Raw `link` header
    pub link: Option<String>,
    /// Raw `x-total-count` header
    pub total_count: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusAction {
    Pending(Operation),
    FetchListFulfilled(ListPage),
    FetchFulfilled(Status),
    CreateFulfilled(Status),
    UpdateFulfilled(Status),
    PartialUpdateFulfilled(Status),
    DeleteFulfilled,
    Rejected { operation: Operation, message: String },
    Reset,
    /// An action type owned by some other slice
    Other(String),
}

impl StatusAction {
    /// Operation this action belongs to, if any
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Pending(op) | Self::Rejected { operation: op, .. } => Some(*op),
            Self::FetchListFulfilled(_) => Some(Operation::FetchList),
            Self::FetchFulfilled(_) => Some(Operation::Fetch),
            Self::CreateFulfilled(_) => Some(Operation::Create),
            Self::UpdateFulfilled(_) => Some(Operation::Update),
            Self::PartialUpdateFulfilled(_) => Some(Operation::PartialUpdate),
            Self::DeleteFulfilled => Some(Operation::Delete),
            Self::Reset | Self::Other(_) => None,
        }
    }

    /// Display name, e.g. `status/CREATE_STATUS_FULFILLED`
    pub fn type_name(&self) -> String {
        match self {
            Self::Pending(op) => format!("{}_PENDING", op.action_type()),
            Self::Rejected { operation, .. } => format!("{}_REJECTED", operation.action_type()),
            Self::Reset => RESET.to_string(),
            Self::Other(name) => name.clone(),
            fulfilled => match fulfilled.operation() {
                Some(op) => format!("{}_FULFILLED", op.action_type()),
                None => String::new(),
            },
        }
    }
}
