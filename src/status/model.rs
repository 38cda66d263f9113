//! Status Entity
//!
//! The `status` resource as exchanged with the REST API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A status record.
///
/// Only `id` and `name` are typed; every other server field is kept verbatim
/// in `extra` so that round-tripping an entity through the client never drops
/// data the server sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Status {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Status {
    /// Create a new, unsaved status with the given name
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// True for the empty object (no id, no name, no other fields)
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none() && self.extra.is_empty()
    }
}

/// Build the request body for a status, dropping unset relationships.
///
/// A field is dropped when its value is an object whose `id` is `""` or `-1`,
/// which is how an unselected relationship is represented in a form.
pub fn clean_entity(entity: &Status) -> Value {
    let mut body: Map<String, Value> = entity
        .extra
        .iter()
        .filter(|(_, v)| !is_unset_relationship(v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    if let Some(id) = entity.id {
        body.insert("id".to_string(), Value::from(id));
    }
    if let Some(name) = &entity.name {
        body.insert("name".to_string(), Value::String(name.clone()));
    }

    Value::Object(body)
}

fn is_unset_relationship(value: &Value) -> bool {
    match value.get("id") {
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_i64() == Some(-1),
        _ => false,
    }
}
