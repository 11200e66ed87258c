//! Apache Syncope user handler module.
//!
//! Reads a user through the Syncope REST API, applies a status change, plain
//! attribute edits or the must-change-password flag, and writes it back.

mod action;
mod client;
mod connection;
mod edits;
mod error;
mod model;
mod outcome;

pub use action::Action;
pub use client::UserStateClient;
pub use connection::ConnectionContext;
pub use edits::AttributeEdit;
pub use error::{Result as SyncopeResult, SyncopeError};
pub use model::{StatusChangeRequest, StatusType, UserResource};
pub use outcome::{
    OperationOutcome, CHANGE_STATUS_FAILED, CHECK_MODE_SUCCESS, MODIFY_USER_FAILED,
    MUST_CHANGE_PASSWORD_FAILED, RETRIEVE_USER_FAILED,
};

use blue_core::prelude::*;
use connection::bool_arg;

const MANIFEST: &str = include_str!("../manifest.toml");

pub struct SyncopeModule {
    manifest: ModuleManifest,
}

impl SyncopeModule {
    pub fn new() -> Result<Self> {
        let manifest = ModuleManifest::from_toml(MANIFEST)?;
        Ok(Self { manifest })
    }

    fn execute(&self, path: &[&str], args: Value) -> SyncopeResult<OperationOutcome> {
        // Presence checks first so bad input never reaches the network
        self.manifest.resolve(path, &args)?;
        let action = Action::from_call(path, &args)?;
        let check_mode = bool_arg(&args, "check_mode")?.unwrap_or(false);
        let client = UserStateClient::new(ConnectionContext::from_args(&args)?)?;

        tracing::debug!(
            "Running {} for user {} (check mode: {})",
            path.join(" "),
            action.user(),
            check_mode
        );

        tokio::runtime::Runtime::new()?
            .block_on(action.run(&client, check_mode))
    }
}

impl Module for SyncopeModule {
    fn name(&self) -> &str {
        &self.manifest.module.name
    }

    fn manifest(&self) -> &ModuleManifest {
        &self.manifest
    }

    fn call(
        &mut self,
        path: &[&str],
        args: Value,
        _stdout: Option<&mut dyn Write>,
        _stderr: Option<&mut dyn Write>,
    ) -> Result<Value> {
        self.execute(path, args)?.into_report()
    }
}

#[no_mangle]
pub fn create_module() -> Box<dyn Module> {
    Box::new(SyncopeModule::new().expect("Failed to create syncope module"))
}
