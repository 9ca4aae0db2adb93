//! Errors at the JSON boundary. The layout itself cannot fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid profile list: {0}")]
    InvalidProfiles(#[source] serde_json::Error),
    #[error("invalid layout config: {0}")]
    InvalidConfig(#[source] serde_json::Error),
}
