use serde::Serialize;
use serde_json::{json, Value};

pub const CHANGE_STATUS_FAILED: &str = "Error while changing status";
pub const RETRIEVE_USER_FAILED: &str = "Error while retrieving user";
pub const MODIFY_USER_FAILED: &str = "Error while modifying user";
pub const MUST_CHANGE_PASSWORD_FAILED: &str = "Error while setting must change password";
pub const CHECK_MODE_SUCCESS: &str = "The operation can be executed successfully";

/// Result of one operation, built once at the end of its execution path.
///
/// `changed` is only ever true when a POST/PUT was sent and answered with 200.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationOutcome {
    ok: bool,
    changed: bool,
    message: Value,
}

impl OperationOutcome {
    /// The server accepted the mutation; `body` is its reply
    pub fn succeeded(body: Value) -> Self {
        Self { ok: true, changed: true, message: body }
    }

    /// Check mode: the mutation would be sent but was not
    pub fn predicted() -> Self {
        Self { ok: true, changed: false, message: Value::String(CHECK_MODE_SUCCESS.to_string()) }
    }

    pub fn failed(message: &str) -> Self {
        Self { ok: false, changed: false, message: Value::String(message.to_string()) }
    }

    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn message(&self) -> &Value {
        &self.message
    }

    /// Map to the module result: `{changed, message}` on success, a failure
    /// carrying the message otherwise.
    pub fn into_report(self) -> blue_core::Result<Value> {
        if self.ok {
            Ok(json!({
                "changed": self.changed,
                "message": self.message,
            }))
        } else {
            let message = match self.message {
                Value::String(s) => s,
                other => other.to_string(),
            };
            Err(blue_core::Error::Module(message))
        }
    }
}
