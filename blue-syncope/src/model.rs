//! Wire representation of the Syncope user endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::SyncopeError;

/// Class tag Syncope expects on status patches
const STATUS_PATCH_TYPE: &str = "org.apache.syncope.common.lib.types.StatusPatchType";

/// A user as returned by `GET /syncope/rest/users/{key}`.
///
/// The object is kept exactly as the server sent it; edits touch only the
/// fields they name, so a PUT writes every other member back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserResource(Map<String, Value>);

impl UserResource {
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    /// Resource assignments, as sent by the server
    pub fn resources(&self) -> Value {
        match self.0.get("resources") {
            Some(Value::Null) | None => Value::Array(Vec::new()),
            Some(resources) => resources.clone(),
        }
    }

    /// Overwrite the first value of every plain attribute named `schema`.
    /// An attribute without values gets `value` as its only one.
    pub fn set_first_value(&mut self, schema: &str, value: &str) {
        let attrs = match self.0.get_mut("plainAttrs").and_then(Value::as_array_mut) {
            Some(attrs) => attrs,
            None => return,
        };

        for attr in attrs.iter_mut().filter_map(Value::as_object_mut) {
            if attr.get("schema").and_then(Value::as_str) != Some(schema) {
                continue;
            }
            match attr.get_mut("values").and_then(Value::as_array_mut) {
                Some(values) if !values.is_empty() => values[0] = Value::String(value.to_string()),
                Some(values) => values.push(Value::String(value.to_string())),
                None => {
                    let values = vec![Value::String(value.to_string())];
                    attr.insert("values".to_string(), Value::Array(values));
                }
            }
        }
    }

    pub fn set_must_change_password(&mut self, must_change_password: bool) {
        self.0.insert("mustChangePassword".to_string(), Value::Bool(must_change_password));
    }

    #[cfg(test)]
    pub(crate) fn first_value(&self, schema: &str) -> Option<&Value> {
        self.0.get("plainAttrs")?
            .as_array()?
            .iter()
            .find(|attr| attr.get("schema").and_then(Value::as_str) == Some(schema))?
            .get("values")?
            .get(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusType {
    Suspend,
    Activate,
    Reactivate,
}

impl StatusType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusType::Suspend => "SUSPEND",
            StatusType::Activate => "ACTIVATE",
            StatusType::Reactivate => "REACTIVATE",
        }
    }
}

impl fmt::Display for StatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusType {
    type Err = SyncopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUSPEND" => Ok(StatusType::Suspend),
            "ACTIVATE" => Ok(StatusType::Activate),
            "REACTIVATE" => Ok(StatusType::Reactivate),
            other => Err(SyncopeError::InvalidArgument {
                name: "newStatus",
                value: other.to_string(),
            }),
        }
    }
}

/// Body of `POST /syncope/rest/users/{key}/status`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusChangeRequest {
    pub operation: &'static str,
    pub value: &'static str,
    #[serde(rename = "onSyncope")]
    pub on_syncope: String,
    pub key: String,
    #[serde(rename = "type")]
    pub status: StatusType,
    pub resources: Value,
}

impl StatusChangeRequest {
    pub fn new(key: &str, status: StatusType, on_syncope: &str, user: &UserResource) -> Self {
        Self {
            operation: "ADD_REPLACE",
            value: STATUS_PATCH_TYPE,
            on_syncope: on_syncope.to_string(),
            key: key.to_string(),
            status,
            resources: user.resources(),
        }
    }
}
