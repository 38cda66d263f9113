//! Status resource slice
//!
//! State, actions and reducer for the `status` REST resource, plus the
//! request builders and the slice that runs them.
//!
//! # Module Structure
//!
//! - [`model`] - the `Status` entity and request body cleaning
//! - [`state`] - the `StatusState` snapshot
//! - [`action`] - action types and the `StatusAction` enum
//! - [`reducer`] - the pure `(state, action) -> state` function
//! - [`pagination`] - `link` / `x-total-count` header handling
//! - [`creators`] - one request builder per operation
//! - [`slice`] - runs requests and dispatches their actions
//!
//! # Example
//!
//! ```ignore
//! use seastatus::{api::ApiClient, status::StatusSlice, store::Store};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ApiClient::new("http://localhost:8080/", None)?;
//!     let slice = StatusSlice::new(client, Store::new());
//!     let snapshot = slice.get_entities(0, 20, Some("id,asc")).await?;
//!     println!("{} statuses", snapshot.state.entities.len());
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod creators;
pub mod model;
pub mod pagination;
pub mod reducer;
pub mod slice;
pub mod state;

pub use action::{ListPage, Operation, StatusAction};
pub use model::{clean_entity, Status};
pub use reducer::reduce;
pub use slice::StatusSlice;
pub use state::{PageLinks, StatusState, TotalItems};
