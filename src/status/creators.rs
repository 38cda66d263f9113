//! Status Request Builders
//!
//! One builder per operation. Each returns a [`StatusRequest`]: the operation
//! tag plus the HTTP call that carries it. [`settle`] turns the outcome of
//! that call into the fulfilled or rejected action.

use super::action::{ListPage, Operation, StatusAction};
use super::model::{clean_entity, Status};
use crate::api::{format_api_error, ApiRequest, ApiResponse};
use anyhow::{Context, Result};

pub const API_URL: &str = "api/statuses";

#[derive(Debug, Clone, PartialEq)]
pub struct StatusRequest {
    pub operation: Operation,
    pub request: ApiRequest,
}

/// Current cache-buster value (epoch milliseconds)
pub fn cache_buster() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// List request. Paging parameters are only sent together with a sort.
pub fn get_entities(page: u32, size: u32, sort: Option<&str>) -> StatusRequest {
    get_entities_at(page, size, sort, cache_buster())
}

/// [`get_entities`] with an explicit cache-buster
pub fn get_entities_at(
    page: u32,
    size: u32,
    sort: Option<&str>,
    cache_buster: i64,
) -> StatusRequest {
    let path = match sort {
        Some(sort) => format!(
            "{}?page={}&size={}&sort={}&cacheBuster={}",
            API_URL, page, size, sort, cache_buster
        ),
        None => format!("{}?cacheBuster={}", API_URL, cache_buster),
    };

    StatusRequest {
        operation: Operation::FetchList,
        request: ApiRequest::get(path),
    }
}

pub fn get_entity(id: i64) -> StatusRequest {
    StatusRequest {
        operation: Operation::Fetch,
        request: ApiRequest::get(entity_path(id)),
    }
}

pub fn create_entity(entity: &Status) -> StatusRequest {
    StatusRequest {
        operation: Operation::Create,
        request: ApiRequest::post(API_URL.to_string(), clean_entity(entity)),
    }
}

/// Full replacement; the entity must carry its id
pub fn update_entity(entity: &Status) -> Result<StatusRequest> {
    let id = entity.id.context("Cannot update a status without an id")?;
    Ok(StatusRequest {
        operation: Operation::Update,
        request: ApiRequest::put(entity_path(id), clean_entity(entity)),
    })
}

/// Merge-patch of the fields present on the entity; it must carry its id
pub fn partial_update(entity: &Status) -> Result<StatusRequest> {
    let id = entity.id.context("Cannot patch a status without an id")?;
    Ok(StatusRequest {
        operation: Operation::PartialUpdate,
        request: ApiRequest::patch(entity_path(id), clean_entity(entity)),
    })
}

pub fn delete_entity(id: i64) -> StatusRequest {
    StatusRequest {
        operation: Operation::Delete,
        request: ApiRequest::delete(entity_path(id)),
    }
}

fn entity_path(id: i64) -> String {
    format!("{}/{}", API_URL, id)
}

/// Turn the outcome of an operation's HTTP call into its settle action.
///
/// A body that does not decode counts as a failed request.
pub fn settle(operation: Operation, outcome: Result<ApiResponse>) -> StatusAction {
    match outcome.and_then(|response| fulfilled(operation, response)) {
        Ok(action) => action,
        Err(e) => StatusAction::Rejected {
            operation,
            message: format_api_error(&e),
        },
    }
}

fn fulfilled(operation: Operation, response: ApiResponse) -> Result<StatusAction> {
    let action = match operation {
        Operation::FetchList => StatusAction::FetchListFulfilled(ListPage {
            data: decode(response.body)?,
            link: response.link,
            total_count: response.total_count,
        }),
        Operation::Fetch => StatusAction::FetchFulfilled(decode(response.body)?),
        Operation::Create => StatusAction::CreateFulfilled(decode(response.body)?),
        Operation::Update => StatusAction::UpdateFulfilled(decode(response.body)?),
        Operation::PartialUpdate => StatusAction::PartialUpdateFulfilled(decode(response.body)?),
        Operation::Delete => StatusAction::DeleteFulfilled,
    };
    Ok(action)
}

fn decode<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> Result<T> {
    serde_json::from_value(body).context("Unexpected response body")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use serde_json::json;

    fn response(body: serde_json::Value) -> ApiResponse {
        ApiResponse {
            status: 200,
            link: None,
            total_count: None,
            body,
        }
    }

    #[test]
    fn test_list_url_with_sort() {
        let req = get_entities_at(0, 20, Some("id,asc"), 1700000000000);
        assert_eq!(req.operation, Operation::FetchList);
        assert_eq!(req.request.method, Method::GET);
        assert_eq!(
            req.request.path,
            "api/statuses?page=0&size=20&sort=id,asc&cacheBuster=1700000000000"
        );
    }

    #[test]
    fn test_list_url_without_sort() {
        let req = get_entities_at(3, 50, None, 1700000000000);
        assert_eq!(req.request.path, "api/statuses?cacheBuster=1700000000000");
    }

    #[test]
    fn test_cache_buster_is_current() {
        let before = chrono::Utc::now().timestamp_millis();
        let req = get_entities(0, 20, None);
        let after = chrono::Utc::now().timestamp_millis();

        let value: i64 = req
            .request
            .path
            .rsplit('=')
            .next()
            .and_then(|v| v.parse().ok())
            .unwrap();
        assert!(value >= before && value <= after);
    }

    #[test]
    fn test_entity_requests() {
        assert_eq!(get_entity(4).request.path, "api/statuses/4");

        let delete = delete_entity(4);
        assert_eq!(delete.request.method, Method::DELETE);
        assert_eq!(delete.request.path, "api/statuses/4");
        assert_eq!(delete.request.body, None);
    }

    #[test]
    fn test_create_sends_cleaned_body() {
        let mut status = Status::named("A");
        status.extra.insert("port".to_string(), json!({"id": ""}));

        let req = create_entity(&status);
        assert_eq!(req.request.method, Method::POST);
        assert_eq!(req.request.path, "api/statuses");
        assert_eq!(req.request.body, Some(json!({"name": "A"})));
    }

    #[test]
    fn test_update_requires_id() {
        assert!(update_entity(&Status::named("A")).is_err());
        assert!(partial_update(&Status::named("A")).is_err());

        let status = Status {
            id: Some(8),
            ..Status::named("A")
        };
        let put = update_entity(&status).unwrap();
        assert_eq!(put.request.method, Method::PUT);
        assert_eq!(put.request.path, "api/statuses/8");

        let patch = partial_update(&status).unwrap();
        assert_eq!(patch.request.method, Method::PATCH);
        assert_eq!(patch.request.path, "api/statuses/8");
    }

    #[test]
    fn test_settle_list() {
        let outcome = Ok(ApiResponse {
            status: 200,
            link: Some("<x?page=0>; rel=\"first\"".to_string()),
            total_count: Some("1".to_string()),
            body: json!([{"id": 1, "name": "DOCKED"}]),
        });
        match settle(Operation::FetchList, outcome) {
            StatusAction::FetchListFulfilled(page) => {
                assert_eq!(page.data.len(), 1);
                assert_eq!(page.total_count.as_deref(), Some("1"));
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_settle_delete_ignores_body() {
        let action = settle(Operation::Delete, Ok(response(serde_json::Value::Null)));
        assert_eq!(action, StatusAction::DeleteFulfilled);
    }

    #[test]
    fn test_settle_error() {
        let action = settle(
            Operation::Fetch,
            Err(anyhow::anyhow!("Request failed with status code 404")),
        );
        assert_eq!(
            action,
            StatusAction::Rejected {
                operation: Operation::Fetch,
                message: "Request failed with status code 404".to_string()
            }
        );
    }

    #[test]
    fn test_settle_malformed_body_is_rejected() {
        let action = settle(Operation::Create, Ok(response(json!("not an object"))));
        assert!(matches!(
            action,
            StatusAction::Rejected {
                operation: Operation::Create,
                ..
            }
        ));
    }
}
