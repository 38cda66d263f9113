//! Status Slice
//!
//! Runs the request builders against the API and feeds their actions into
//! the store. Every network operation is a two-step protocol: `Pending` is
//! dispatched synchronously when the operation starts, and the fulfilled or
//! rejected action is dispatched whenever the HTTP call settles. Overlapping
//! operations settle in completion order, and nothing is cancelled.

use super::action::{Operation, StatusAction};
use super::creators::{self, StatusRequest};
use super::model::Status;
use crate::api::{format_api_error, ApiClient};
use crate::store::{Snapshot, Store};
use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct StatusSlice {
    client: ApiClient,
    store: Store,
}

impl StatusSlice {
    pub fn new(client: ApiClient, store: Store) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Fetch a list page.
    ///
    /// The pending transition is applied before this returns; the call
    /// settles on a spawned task. Must be called inside a Tokio runtime.
    pub fn get_entities(&self, page: u32, size: u32, sort: Option<&str>) -> JoinHandle<Snapshot> {
        self.spawn_read(creators::get_entities(page, size, sort))
    }

    /// Fetch one status. Settles in the background like [`Self::get_entities`].
    pub fn get_entity(&self, id: i64) -> JoinHandle<Snapshot> {
        self.spawn_read(creators::get_entity(id))
    }

    /// Create a status and return it as stored by the server
    pub async fn create_entity(&self, entity: &Status) -> Result<Status> {
        self.run_write(creators::create_entity(entity)).await
    }

    /// Replace a status and return the server's copy.
    ///
    /// A status without an id is rejected without sending a request:
    /// `Pending` and `Rejected` are still dispatched and the error is returned.
    pub async fn update_entity(&self, entity: &Status) -> Result<Status> {
        match creators::update_entity(entity) {
            Ok(request) => self.run_write(request).await,
            Err(e) => self.reject_locally(Operation::Update, e),
        }
    }

    /// Patch a status and return the server's copy.
    ///
    /// Like [`Self::update_entity`], a status without an id is rejected
    /// locally and no request is sent.
    pub async fn partial_update(&self, entity: &Status) -> Result<Status> {
        match creators::partial_update(entity) {
            Ok(request) => self.run_write(request).await,
            Err(e) => self.reject_locally(Operation::PartialUpdate, e),
        }
    }

    /// Delete a status. Resolves to the empty object on success.
    pub async fn delete_entity(&self, id: i64) -> Result<Status> {
        self.run_write(creators::delete_entity(id)).await
    }

    /// Back to the initial snapshot. In-flight requests still settle.
    pub fn reset(&self) -> Snapshot {
        self.store.dispatch(&StatusAction::Reset)
    }

    fn spawn_read(&self, request: StatusRequest) -> JoinHandle<Snapshot> {
        let span = request_span(&request);
        self.store.dispatch(&StatusAction::Pending(request.operation));

        let slice = self.clone();
        tokio::spawn(
            async move {
                let (_, snapshot) = slice.settle(request).await;
                snapshot
            }
            .instrument(span),
        )
    }

    async fn run_write(&self, request: StatusRequest) -> Result<Status> {
        let span = request_span(&request);
        async move {
            self.store.dispatch(&StatusAction::Pending(request.operation));
            let (action, _) = self.settle(request).await;

            match action {
                StatusAction::CreateFulfilled(entity)
                | StatusAction::UpdateFulfilled(entity)
                | StatusAction::PartialUpdateFulfilled(entity) => Ok(entity),
                StatusAction::DeleteFulfilled => Ok(Status::default()),
                StatusAction::Rejected { message, .. } => Err(anyhow::anyhow!(message)),
                other => Err(anyhow::anyhow!(
                    "Unexpected settle action: {}",
                    other.type_name()
                )),
            }
        }
        .instrument(span)
        .await
    }

    async fn settle(&self, request: StatusRequest) -> (StatusAction, Snapshot) {
        let outcome = self.client.send(&request.request).await;
        match &outcome {
            Ok(response) => tracing::debug!(
                "{} settled with HTTP {}",
                request.operation.action_type(),
                response.status
            ),
            Err(e) => tracing::warn!("{} failed: {}", request.operation.action_type(), e),
        }

        let action = creators::settle(request.operation, outcome);
        let snapshot = self.store.dispatch(&action);
        (action, snapshot)
    }

    /// A write that cannot be sent still goes through pending and rejected
    fn reject_locally(&self, operation: Operation, error: anyhow::Error) -> Result<Status> {
        let message = format_api_error(&error);
        self.store.dispatch(&StatusAction::Pending(operation));
        self.store.dispatch(&StatusAction::Rejected {
            operation,
            message,
        });
        Err(error)
    }
}

fn request_span(request: &StatusRequest) -> tracing::Span {
    tracing::debug_span!(
        "status_request",
        request_id = %Uuid::new_v4(),
        action = request.operation.action_type(),
        method = %request.request.method,
    )
}
