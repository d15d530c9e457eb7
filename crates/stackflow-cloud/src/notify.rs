//! Notification sink trait

use async_trait::async_trait;
use stackflow_core::{Lifecycle, StackOutput};

/// Sink for resource state transitions and published configuration
///
/// Owned by the host, consumed by the provisioner. `publish_properties`
/// must be idempotent (replaying the same snapshot is harmless) and the
/// snapshot must be visible to configuration readers before the call
/// returns.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Publish the resource's output snapshot as named configuration
    /// properties, in order
    async fn publish_properties(&self, resource: &str, outputs: &[StackOutput]);

    /// Record a lifecycle transition for the resource
    async fn record_state(&self, resource: &str, lifecycle: Lifecycle);
}

/// Pass-through for shared sinks
#[async_trait]
impl<T: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<T> {
    async fn publish_properties(&self, resource: &str, outputs: &[StackOutput]) {
        (**self).publish_properties(resource, outputs).await;
    }

    async fn record_state(&self, resource: &str, lifecycle: Lifecycle) {
        (**self).record_state(resource, lifecycle).await;
    }
}
