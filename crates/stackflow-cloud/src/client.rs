//! Cloud client capability trait

use crate::description::StackDescription;
use crate::error::ClientError;
use async_trait::async_trait;

/// Read capability against the external control plane
///
/// One client instance is owned per resource (or per credential/region
/// context); it is never shared mutable state across unrelated resources.
/// Implementations classify their vendor errors into [`ClientError`] at
/// this boundary using the vendor's structured error codes, so callers
/// never have to inspect error strings.
#[async_trait]
pub trait CloudClient: Send + Sync {
    /// Describe the stack addressed by `stack_name`
    ///
    /// Returns [`ClientError::NotFound`] when the control plane reports
    /// that the identity does not exist, including the case where a
    /// non-error response carries zero stack records.
    async fn describe(&self, stack_name: &str) -> Result<StackDescription, ClientError>;
}

/// Pass-through for shared clients
#[async_trait]
impl<T: CloudClient + ?Sized> CloudClient for std::sync::Arc<T> {
    async fn describe(&self, stack_name: &str) -> Result<StackDescription, ClientError> {
        (**self).describe(stack_name).await
    }
}
