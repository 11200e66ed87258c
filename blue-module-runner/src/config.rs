use blue_core::prelude::*;
use serde::Deserialize;
use std::path::Path;

/// Runner configuration file.
///
/// ```toml
/// [connection]
/// server_name = "https://syncope.example.org"
/// admin_user = "admin"
/// admin_password = "password"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct RunnerConfig {
    #[serde(default)]
    pub connection: ConnectionDefaults,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConnectionDefaults {
    pub server_name: Option<String>,
    pub admin_user: Option<String>,
    pub admin_password: Option<String>,
}

impl RunnerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Module(format!("Failed to read config {}: {}", path.as_ref().display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Module(format!("Failed to parse config: {}", e)))
    }

    /// Fill connection arguments the caller did not pass explicitly
    pub fn apply_defaults(&self, args: &mut Value) {
        let map = match args.as_object_mut() {
            Some(map) => map,
            None => return,
        };

        let defaults = [
            ("serverName", &self.connection.server_name),
            ("adminUser", &self.connection.admin_user),
            ("adminPwd", &self.connection.admin_password),
        ];
        for (name, value) in defaults {
            if let Some(value) = value {
                map.entry(name).or_insert_with(|| Value::String(value.clone()));
            }
        }
    }
}
