use serde_json::Value;

use crate::client::UserStateClient;
use crate::connection::{bool_arg, required_str};
use crate::edits::AttributeEdit;
use crate::error::{Result, SyncopeError};
use crate::model::StatusType;
use crate::outcome::OperationOutcome;

/// One invocation of the module, decoded from the method path and its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ChangeStatus {
        user: String,
        status: StatusType,
        on_syncope: String,
    },
    ModifyUser {
        user: String,
        edits: Vec<AttributeEdit>,
    },
    MustChangePassword {
        user: String,
        must_change_password: bool,
    },
}

impl Action {
    pub fn from_call(path: &[&str], args: &Value) -> Result<Self> {
        let user = || required_str(args, "syncopeUser").map(str::to_string);

        match path {
            ["change", "status"] => Ok(Action::ChangeStatus {
                user: user()?,
                status: required_str(args, "newStatus")?.parse()?,
                on_syncope: flag_string(args, "changeStatusOnSyncope")?,
            }),
            ["modify", "user"] => Ok(Action::ModifyUser {
                user: user()?,
                edits: AttributeEdit::parse_all(required_str(args, "newAttributeValue")?),
            }),
            ["must", "change", "password"] => Ok(Action::MustChangePassword {
                user: user()?,
                must_change_password: bool_arg(args, "mustChangePassword")?
                    .ok_or(SyncopeError::MissingArgument("mustChangePassword"))?,
            }),
            _ => Err(blue_core::Error::MethodNotFound(path.join(" ")).into()),
        }
    }

    pub fn user(&self) -> &str {
        match self {
            Action::ChangeStatus { user, .. }
            | Action::ModifyUser { user, .. }
            | Action::MustChangePassword { user, .. } => user,
        }
    }

    pub async fn run(
        &self,
        client: &UserStateClient,
        check_mode: bool,
    ) -> Result<OperationOutcome> {
        match self {
            Action::ChangeStatus { user, status, on_syncope } => {
                client.apply_status_change(user, *status, on_syncope, check_mode).await
            }
            Action::ModifyUser { user, edits } => {
                client.apply_attribute_edits(user, edits, check_mode).await
            }
            Action::MustChangePassword { user, must_change_password } => {
                client
                    .apply_must_change_password_flag(user, *must_change_password, check_mode)
                    .await
            }
        }
    }
}

/// `changeStatusOnSyncope` travels as a string; booleans are spelled out
fn flag_string(args: &Value, name: &'static str) -> Result<String> {
    match args.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(Value::Null) | None => Err(SyncopeError::MissingArgument(name)),
        Some(other) => Err(SyncopeError::InvalidArgument { name, value: other.to_string() }),
    }
}
