mod error;
mod manifest;
pub mod module;

pub use error::{Error, Result};
pub use manifest::{ModuleManifest, ModuleInfo, MethodInfo};
pub use module::Module;
pub use std::io::Write;

/// Re-export common types used in method calls
pub use serde_json::Value;

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::{
        Error,
        Result,
        Module,
        ModuleManifest,
        ModuleInfo,
        MethodInfo,
        Value,
        Write,
    };
}
