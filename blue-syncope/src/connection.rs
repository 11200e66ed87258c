use serde_json::Value;
use std::fmt;

use crate::error::{Result, SyncopeError};

/// Where and as whom to talk to Syncope, fixed for one invocation
#[derive(Clone)]
pub struct ConnectionContext {
    pub server_address: String,
    pub admin_user: String,
    pub admin_password: String,
}

impl ConnectionContext {
    pub fn new(
        server_address: impl Into<String>,
        admin_user: impl Into<String>,
        admin_password: impl Into<String>,
    ) -> Self {
        Self {
            server_address: server_address.into(),
            admin_user: admin_user.into(),
            admin_password: admin_password.into(),
        }
    }

    pub fn from_args(args: &Value) -> Result<Self> {
        Ok(Self::new(
            required_str(args, "serverName")?,
            required_str(args, "adminUser")?,
            required_str(args, "adminPwd")?,
        ))
    }

    /// `{server}/syncope/rest/users/{key}`
    pub fn user_url(&self, key: &str) -> String {
        format!("{}/syncope/rest/users/{}", self.server_address.trim_end_matches('/'), key)
    }
}

impl fmt::Debug for ConnectionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionContext")
            .field("server_address", &self.server_address)
            .field("admin_user", &self.admin_user)
            .field("admin_password", &"<redacted>")
            .finish()
    }
}

pub(crate) fn required_str<'a>(args: &'a Value, name: &'static str) -> Result<&'a str> {
    args.get(name)
        .and_then(|v| v.as_str())
        .ok_or(SyncopeError::MissingArgument(name))
}

/// Accept both JSON booleans and the strings "true"/"false"
pub(crate) fn bool_arg(args: &Value, name: &'static str) -> Result<Option<bool>> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::String(s)) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" => Ok(Some(true)),
            "false" | "no" => Ok(Some(false)),
            _ => Err(SyncopeError::InvalidArgument { name, value: s.clone() }),
        },
        Some(other) => Err(SyncopeError::InvalidArgument { name, value: other.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn password_is_not_printed() {
        let connection = ConnectionContext::new("https://syncope.example.org", "admin", "s3cret");
        let printed = format!("{:?}", connection);
        assert!(!printed.contains("s3cret"));
        assert!(printed.contains("admin"));
    }

    #[test]
    fn user_url_tolerates_trailing_slash() {
        let connection = ConnectionContext::new("http://localhost:9080/", "admin", "pwd");
        assert_eq!(connection.user_url("id"), "http://localhost:9080/syncope/rest/users/id");
    }

    #[test]
    fn from_args_requires_credentials() {
        let args = json!({"serverName": "url", "adminUser": "admin"});
        assert!(matches!(
            ConnectionContext::from_args(&args),
            Err(SyncopeError::MissingArgument("adminPwd"))
        ));
    }

    #[test]
    fn bool_arg_accepts_strings_and_booleans() {
        let args = json!({"a": true, "b": "False", "c": "maybe"});
        assert_eq!(bool_arg(&args, "a").unwrap(), Some(true));
        assert_eq!(bool_arg(&args, "b").unwrap(), Some(false));
        assert_eq!(bool_arg(&args, "missing").unwrap(), None);
        assert!(bool_arg(&args, "c").is_err());
    }
}
