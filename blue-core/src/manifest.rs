use serde::{Serialize, Deserialize};
use serde_json::Value;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleManifest {
    pub module: ModuleInfo,
    #[serde(default)]
    pub methods: Vec<MethodInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
    pub namespace: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub path: Vec<String>,
    pub description: String,
    pub args_schema: Option<Value>,
    pub return_schema: Option<Value>,
    _non_exhaustive: (),
}

impl MethodInfo {
    fn parse_json_field(field: &Option<String>) -> Option<Value> {
        field.as_ref().and_then(|s| serde_json::from_str(s).ok())
    }

    /// Presence check of `args` against the method's `args_schema`.
    ///
    /// Only two rules are enforced: every name under `required` must be present
    /// and non-null, and a string value for a property declaring `enum` must be
    /// one of the listed choices. Anything else is left to the method itself.
    pub fn validate_args(&self, args: &Value) -> Result<()> {
        let schema = match &self.args_schema {
            Some(schema) => schema,
            None => return Ok(()),
        };

        let missing: Vec<&str> = schema.get("required")
            .and_then(|v| v.as_array())
            .map(|names| names.iter()
                .filter_map(|v| v.as_str())
                .filter(|name| args.get(*name).map_or(true, Value::is_null))
                .collect())
            .unwrap_or_default();

        if !missing.is_empty() {
            return Err(Error::Schema(format!(
                "{} is missing required arguments: {}",
                self.path.join(" "),
                missing.join(", ")
            )));
        }

        if let Some(properties) = schema.get("properties").and_then(|v| v.as_object()) {
            for (name, property) in properties {
                let choices = match property.get("enum").and_then(|v| v.as_array()) {
                    Some(choices) => choices,
                    None => continue,
                };
                if let Some(value) = args.get(name).and_then(|v| v.as_str()) {
                    if !choices.iter().any(|c| c.as_str() == Some(value)) {
                        let allowed: Vec<&str> = choices.iter().filter_map(|c| c.as_str()).collect();
                        return Err(Error::Schema(format!(
                            "value of {} must be one of: {}, got: {}",
                            name,
                            allowed.join(", "),
                            value
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename = "MethodInfo")]
struct MethodInfoHelper {
    path: Vec<String>,
    description: String,
    #[serde(default)]
    args_schema: Option<String>,
    #[serde(default)]
    return_schema: Option<String>,
}

impl<'de> Deserialize<'de> for MethodInfo {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = MethodInfoHelper::deserialize(deserializer)?;
        Ok(MethodInfo {
            path: helper.path,
            description: helper.description,
            args_schema: Self::parse_json_field(&helper.args_schema),
            return_schema: Self::parse_json_field(&helper.return_schema),
            _non_exhaustive: (),
        })
    }
}

impl Serialize for MethodInfo {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("MethodInfo", 4)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("args_schema", &self.args_schema)?;
        state.serialize_field("return_schema", &self.return_schema)?;
        state.end()
    }
}

impl ModuleManifest {
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Manifest(format!("Failed to read manifest: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse a manifest embedded in the module binary
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Manifest(format!("Failed to parse manifest: {}", e)))
    }

    pub fn find_method(&self, path: &[&str]) -> Option<&MethodInfo> {
        self.methods.iter().find(|method| {
            method.path.iter().map(String::as_str).collect::<Vec<_>>() == path
        })
    }

    /// Look up the method and check `args` against it in one go
    pub fn resolve(&self, path: &[&str], args: &Value) -> Result<&MethodInfo> {
        let method = self.find_method(path)
            .ok_or_else(|| Error::MethodNotFound(path.join(" ")))?;
        method.validate_args(args)?;
        Ok(method)
    }
}
