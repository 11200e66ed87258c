use serde_json::Value;
use std::io::Write;
use crate::error::Result;
use crate::manifest::ModuleManifest;

/// Core interface for all modules
pub trait Module: Send + Sync {
    /// Get the name of the module
    fn name(&self) -> &str;

    /// Get the module's manifest
    fn manifest(&self) -> &ModuleManifest;

    /// Call a method on this module.
    ///
    /// The method path doubles as the action discriminator: `["change", "status"]`
    /// is the `change status` action. Unknown paths fail with
    /// [`Error::MethodNotFound`](crate::Error::MethodNotFound) before any work is done.
    fn call(&mut self, path: &[&str], args: Value, stdout: Option<&mut dyn Write>, stderr: Option<&mut dyn Write>) -> Result<Value>;
}
