//! Status Reducer
//!
//! Pure state transition function of the status slice.

use super::action::{ListPage, StatusAction};
use super::model::Status;
use super::pagination::{merge_page, parse_link_header, parse_total_count};
use super::state::{PageLinks, StatusState};

/// Compute the next snapshot from the current one and an action.
///
/// Never fails: unreadable headers end up as data in the snapshot.
pub fn reduce(state: &StatusState, action: &StatusAction) -> StatusState {
    match action {
        StatusAction::Pending(op) if op.is_read() => StatusState {
            error_message: None,
            update_success: false,
            loading: true,
            ..state.clone()
        },
        StatusAction::Pending(_) => StatusState {
            error_message: None,
            update_success: false,
            updating: true,
            ..state.clone()
        },
        StatusAction::Rejected { message, .. } => StatusState {
            loading: false,
            updating: false,
            update_success: false,
            error_message: Some(message.clone()),
            ..state.clone()
        },
        StatusAction::FetchListFulfilled(page) => reduce_list_page(state, page),
        StatusAction::FetchFulfilled(entity) => StatusState {
            loading: false,
            entity: entity.clone(),
            ..state.clone()
        },
        StatusAction::CreateFulfilled(entity)
        | StatusAction::UpdateFulfilled(entity)
        | StatusAction::PartialUpdateFulfilled(entity) => StatusState {
            updating: false,
            update_success: true,
            entity: entity.clone(),
            ..state.clone()
        },
        StatusAction::DeleteFulfilled => StatusState {
            updating: false,
            update_success: true,
            entity: Status::default(),
            ..state.clone()
        },
        StatusAction::Reset => StatusState::initial(),
        StatusAction::Other(_) => state.clone(),
    }
}

fn reduce_list_page(state: &StatusState, page: &ListPage) -> StatusState {
    let links = page
        .link
        .as_deref()
        .map(parse_link_header)
        .unwrap_or_else(PageLinks::default);

    StatusState {
        loading: false,
        entities: merge_page(&state.entities, page.data.clone(), &links),
        links,
        total_items: parse_total_count(page.total_count.as_deref()),
        ..state.clone()
    }
}
