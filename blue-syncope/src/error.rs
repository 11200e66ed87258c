use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncopeError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid value for {name}: {value}")]
    InvalidArgument { name: &'static str, value: String },

    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Failed to create runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("Core error: {0}")]
    Core(#[from] blue_core::Error),
}

impl From<SyncopeError> for blue_core::Error {
    fn from(err: SyncopeError) -> Self {
        match err {
            SyncopeError::Core(inner) => inner,
            SyncopeError::MissingArgument(_) | SyncopeError::InvalidArgument { .. } => {
                blue_core::Error::Schema(err.to_string())
            }
            other => blue_core::Error::Module(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncopeError>;
