//! Provisioning error types

use thiserror::Error;

/// Errors surfaced by a [`crate::CloudClient`] describe call
///
/// The two variants are the complete classification contract: concrete
/// clients map their vendor errors onto one of them, so the provisioner
/// never matches on error strings.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The control plane reports that the stack identity does not exist
    #[error("stack not found: {0}")]
    NotFound(String),

    /// Any other failure: network, throttling, permissions, malformed
    /// response
    #[error("control plane error: {message}")]
    Operational {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ClientError {
    pub fn operational(message: impl Into<String>) -> Self {
        Self::Operational {
            message: message.into(),
            source: None,
        }
    }

    pub fn operational_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Operational {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Errors returned by a provisioning pass
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// The referenced stack does not exist in the external control plane.
    /// Not retried automatically; the stack has to be created before it
    /// can be referenced.
    #[error("stack '{stack_name}' does not exist to reference as resource '{resource}'")]
    NotFound { resource: String, stack_name: String },

    /// Any other failure contacting the control plane. Whether to retry on
    /// a later reconciliation pass is the scheduler's decision.
    #[error("error reading stack for resource '{resource}': {source}")]
    Operational {
        resource: String,
        #[source]
        source: ClientError,
    },

    /// The pass was cancelled before the describe call completed. The
    /// resource is left in-progress, not failed.
    #[error("provisioning of resource '{resource}' was cancelled")]
    Cancelled { resource: String },
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
