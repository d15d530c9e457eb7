//! Provisioner state machine
//!
//! Drives one stack resource from not-started (or stale) to ready or
//! failed, once per reconciliation pass. The scheduler decides when a pass
//! runs and whether a failed resource is retried on a later pass; the
//! provisioner itself never loops.

use crate::client::CloudClient;
use crate::error::{ClientError, ProvisionError};
use crate::notify::NotificationSink;
use crate::outputs::extract_outputs;
use stackflow_core::{Lifecycle, StackResource};
use tokio_util::sync::CancellationToken;

/// Provisioner for externally-managed stack resources
///
/// The cloud client and notification sink are injected at construction;
/// there is no ambient registry to resolve them from.
pub struct Provisioner<C, S> {
    client: C,
    sink: S,
}

impl<C, S> Provisioner<C, S>
where
    C: CloudClient,
    S: NotificationSink,
{
    pub fn new(client: C, sink: S) -> Self {
        Self { client, sink }
    }

    /// Run one provisioning pass for `resource`
    ///
    /// At most one pass per resource may be in flight at a time; the
    /// caller owns that discipline and a violation trips the resource's
    /// pass guard. Cancellation aborts the describe call and leaves the
    /// resource in-progress, since cancellation is not a failure
    /// classification.
    pub async fn provision(
        &self,
        resource: &StackResource,
        cancel: &CancellationToken,
    ) -> crate::error::Result<()> {
        let _pass = resource.begin_pass();

        resource.set_lifecycle(Lifecycle::InProgress);
        self.sink
            .record_state(resource.name(), Lifecycle::InProgress)
            .await;

        tracing::debug!(
            "Describing stack {} for resource {}",
            resource.stack_name(),
            resource.name()
        );

        let described = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(
                    "Provisioning pass for resource {} cancelled",
                    resource.name()
                );
                return Err(ProvisionError::Cancelled {
                    resource: resource.name().to_string(),
                });
            }
            result = self.client.describe(resource.stack_name()) => result,
        };

        let description = match described {
            Ok(description) => description,
            Err(ClientError::NotFound(_)) => {
                tracing::error!(
                    "Stack {} does not exist to reference as resource {}",
                    resource.stack_name(),
                    resource.name()
                );
                resource.set_lifecycle(Lifecycle::Failed);
                self.sink
                    .record_state(resource.name(), Lifecycle::Failed)
                    .await;
                return Err(ProvisionError::NotFound {
                    resource: resource.name().to_string(),
                    stack_name: resource.stack_name().to_string(),
                });
            }
            Err(err) => {
                tracing::error!(
                    "Error reading stack {} for resource {}: {err}",
                    resource.stack_name(),
                    resource.name()
                );
                resource.set_lifecycle(Lifecycle::Failed);
                self.sink
                    .record_state(resource.name(), Lifecycle::Failed)
                    .await;
                return Err(ProvisionError::Operational {
                    resource: resource.name().to_string(),
                    source: err,
                });
            }
        };

        let outputs = extract_outputs(&description);
        tracing::info!(
            "Stack {} has {} output parameters",
            resource.stack_name(),
            outputs.len()
        );
        for output in &outputs {
            tracing::info!("Output {}", output);
        }

        // Single pointer swap: readers see either the previous snapshot
        // or this one, never a mix.
        resource.replace_outputs(outputs);

        self.sink
            .publish_properties(resource.name(), &resource.outputs())
            .await;
        resource.set_lifecycle(Lifecycle::Ready);
        self.sink
            .record_state(resource.name(), Lifecycle::Ready)
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{RawOutput, StackDescription};
    use async_trait::async_trait;
    use stackflow_core::StackOutput;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    enum Script {
        Describe(StackDescription),
        NotFound,
        Operational(&'static str),
        Hang,
    }

    struct MockClient {
        script: Script,
        calls: Arc<AtomicUsize>,
    }

    impl MockClient {
        fn new(script: Script) -> Self {
            Self {
                script,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn call_counter(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.calls)
        }
    }

    #[async_trait]
    impl CloudClient for MockClient {
        async fn describe(&self, stack_name: &str) -> Result<StackDescription, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.script {
                Script::Describe(description) => Ok(description.clone()),
                Script::NotFound => Err(ClientError::NotFound(stack_name.to_string())),
                Script::Operational(message) => Err(ClientError::operational(*message)),
                Script::Hang => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        published: Mutex<Vec<(String, Vec<StackOutput>)>>,
        states: Mutex<Vec<(String, Lifecycle)>>,
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn publish_properties(&self, resource: &str, outputs: &[StackOutput]) {
            self.published
                .lock()
                .unwrap()
                .push((resource.to_string(), outputs.to_vec()));
        }

        async fn record_state(&self, resource: &str, lifecycle: Lifecycle) {
            self.states
                .lock()
                .unwrap()
                .push((resource.to_string(), lifecycle));
        }
    }

    fn web_stack_description() -> StackDescription {
        StackDescription::new("stack-x").with_outputs(vec![
            RawOutput::new("Url", "http://x"),
            RawOutput::new("Port", "8080"),
        ])
    }

    #[tokio::test]
    async fn successful_pass_publishes_outputs_and_reaches_ready() {
        let sink = Arc::new(RecordingSink::default());
        let provisioner = Provisioner::new(
            MockClient::new(Script::Describe(web_stack_description())),
            Arc::clone(&sink),
        );
        let resource = StackResource::new("web", "stack-x");

        provisioner
            .provision(&resource, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(resource.lifecycle(), Lifecycle::Ready);
        assert_eq!(
            *resource.outputs(),
            vec![
                StackOutput::new("Url", "http://x"),
                StackOutput::new("Port", "8080"),
            ]
        );

        let published = sink.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, "web");
        assert_eq!(published[0].1, *resource.outputs());

        let states = sink.states.lock().unwrap();
        assert_eq!(
            *states,
            vec![
                ("web".to_string(), Lifecycle::InProgress),
                ("web".to_string(), Lifecycle::Ready),
            ]
        );
    }

    #[tokio::test]
    async fn missing_stack_fails_with_not_found() {
        let sink = Arc::new(RecordingSink::default());
        let provisioner = Provisioner::new(MockClient::new(Script::NotFound), Arc::clone(&sink));
        let resource = StackResource::new("web", "stack-y");

        let err = provisioner
            .provision(&resource, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::NotFound { .. }));
        assert_eq!(resource.lifecycle(), Lifecycle::Failed);
        assert!(resource.outputs().is_empty());
        assert!(sink.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn not_found_keeps_outputs_from_a_prior_pass() {
        let sink = Arc::new(RecordingSink::default());
        let provisioner = Provisioner::new(MockClient::new(Script::NotFound), Arc::clone(&sink));
        let resource = StackResource::new("web", "stack-y");
        resource.replace_outputs(vec![StackOutput::new("Url", "http://old")]);

        provisioner
            .provision(&resource, &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(resource.output_value("Url"), Some("http://old".to_string()));
    }

    #[tokio::test]
    async fn operational_errors_keep_their_cause() {
        let sink = Arc::new(RecordingSink::default());
        let provisioner = Provisioner::new(
            MockClient::new(Script::Operational("throttled")),
            Arc::clone(&sink),
        );
        let resource = StackResource::new("web", "stack-z");

        let err = provisioner
            .provision(&resource, &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            ProvisionError::Operational { resource, source } => {
                assert_eq!(resource, "web");
                assert!(source.to_string().contains("throttled"));
            }
            other => panic!("expected operational error, got {other}"),
        }
        assert_eq!(resource.lifecycle(), Lifecycle::Failed);
    }

    #[tokio::test]
    async fn generic_timeout_is_classified_as_operational() {
        let sink = Arc::new(RecordingSink::default());
        let provisioner = Provisioner::new(
            MockClient::new(Script::Operational("connection timed out")),
            Arc::clone(&sink),
        );
        let resource = StackResource::new("web", "stack-z");

        let err = provisioner
            .provision(&resource, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisionError::Operational { .. }));
    }

    #[tokio::test]
    async fn repeated_passes_are_idempotent() {
        let sink = Arc::new(RecordingSink::default());
        let client = MockClient::new(Script::Describe(web_stack_description()));
        let calls = client.call_counter();
        let provisioner = Provisioner::new(client, Arc::clone(&sink));
        let resource = StackResource::new("web", "stack-x");
        let cancel = CancellationToken::new();

        provisioner.provision(&resource, &cancel).await.unwrap();
        let first = resource.outputs();
        provisioner.provision(&resource, &cancel).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(*first, *resource.outputs());
        let published = sink.published.lock().unwrap();
        assert_eq!(published.len(), 2);
        assert_eq!(published[0].1, published[1].1);
    }

    #[tokio::test]
    async fn cancellation_before_describe_leaves_resource_in_progress() {
        let sink = Arc::new(RecordingSink::default());
        let provisioner = Provisioner::new(
            MockClient::new(Script::Describe(web_stack_description())),
            Arc::clone(&sink),
        );
        let resource = StackResource::new("web", "stack-x");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = provisioner.provision(&resource, &cancel).await.unwrap_err();

        assert!(matches!(err, ProvisionError::Cancelled { .. }));
        assert_eq!(resource.lifecycle(), Lifecycle::InProgress);
        assert!(sink.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cancellation_aborts_an_in_flight_describe() {
        let sink = Arc::new(RecordingSink::default());
        let provisioner = Provisioner::new(MockClient::new(Script::Hang), Arc::clone(&sink));
        let resource = StackResource::new("web", "stack-x");
        let cancel = CancellationToken::new();

        let pass = provisioner.provision(&resource, &cancel);
        tokio::pin!(pass);

        // Let the pass reach the describe call, then cancel it
        assert!(
            tokio::time::timeout(std::time::Duration::from_millis(10), pass.as_mut())
                .await
                .is_err()
        );
        cancel.cancel();

        let err = pass.await.unwrap_err();
        assert!(matches!(err, ProvisionError::Cancelled { .. }));
        assert_eq!(resource.lifecycle(), Lifecycle::InProgress);
    }

    #[tokio::test]
    #[should_panic(expected = "concurrent provisioning pass")]
    async fn second_concurrent_pass_trips_the_guard() {
        let sink = Arc::new(RecordingSink::default());
        let provisioner = Provisioner::new(
            MockClient::new(Script::Describe(web_stack_description())),
            Arc::clone(&sink),
        );
        let resource = StackResource::new("web", "stack-x");

        let _in_flight = resource.begin_pass();
        let _ = provisioner
            .provision(&resource, &CancellationToken::new())
            .await;
    }
}
