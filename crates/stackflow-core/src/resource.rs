//! Stack resource descriptor
//!
//! A [`StackResource`] is the local record of one externally-managed stack.
//! It is created once when the application graph is built and lives for the
//! lifetime of the host process. The provisioner is the only writer of
//! `lifecycle` and `outputs`; dependents read the output snapshot after the
//! resource reaches [`Lifecycle::Ready`].

use crate::output::StackOutput;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Lifecycle state of a stack resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// No provisioning pass has run yet
    NotStarted,
    /// A provisioning pass is in flight
    InProgress,
    /// The stack was described and its outputs are published
    Ready,
    /// The last provisioning pass failed
    Failed,
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lifecycle::NotStarted => write!(f, "not-started"),
            Lifecycle::InProgress => write!(f, "in-progress"),
            Lifecycle::Ready => write!(f, "ready"),
            Lifecycle::Failed => write!(f, "failed"),
        }
    }
}

/// Descriptor for one externally-managed stack resource
pub struct StackResource {
    /// Graph-unique, operator-assigned resource name
    name: String,

    /// Identity of the stack in the external control plane; may differ
    /// from `name`
    stack_name: String,

    /// Opaque configuration supplied at declaration time, never touched
    /// by the provisioner
    desired_state: serde_json::Value,

    lifecycle: RwLock<Lifecycle>,

    /// Current output snapshot. Replaced wholesale with a fresh `Arc` on
    /// every successful pass so readers never see a mix of two passes.
    outputs: RwLock<Arc<Vec<StackOutput>>>,

    /// Set while a provisioning pass holds the [`PassGuard`]
    in_flight: AtomicBool,
}

impl StackResource {
    pub fn new(name: impl Into<String>, stack_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stack_name: stack_name.into(),
            desired_state: serde_json::Value::Null,
            lifecycle: RwLock::new(Lifecycle::NotStarted),
            outputs: RwLock::new(Arc::new(Vec::new())),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_desired_state(mut self, desired_state: serde_json::Value) -> Self {
        self.desired_state = desired_state;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    pub fn desired_state(&self) -> &serde_json::Value {
        &self.desired_state
    }

    pub fn lifecycle(&self) -> Lifecycle {
        *self.lifecycle.read().expect("lifecycle lock poisoned")
    }

    /// Current output snapshot
    ///
    /// The returned `Arc` is immutable; a later pass swaps in a new one
    /// instead of mutating it.
    pub fn outputs(&self) -> Arc<Vec<StackOutput>> {
        Arc::clone(&self.outputs.read().expect("outputs lock poisoned"))
    }

    /// Look up a single output value by key in the current snapshot
    pub fn output_value(&self, key: &str) -> Option<String> {
        self.outputs()
            .iter()
            .find(|o| o.key == key)
            .and_then(|o| o.value.clone())
    }

    /// Begin a provisioning pass, asserting the single-writer contract
    ///
    /// The scheduler must never run two passes for the same resource at
    /// once; a second concurrent call trips this assertion instead of
    /// corrupting the snapshot.
    pub fn begin_pass(&self) -> PassGuard<'_> {
        let claimed = self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok();
        assert!(
            claimed,
            "concurrent provisioning pass for stack resource '{}'",
            self.name
        );
        PassGuard { resource: self }
    }

    /// Record a lifecycle transition. Written only by the provisioner.
    pub fn set_lifecycle(&self, lifecycle: Lifecycle) {
        *self.lifecycle.write().expect("lifecycle lock poisoned") = lifecycle;
    }

    /// Replace the output snapshot wholesale. Written only by the
    /// provisioner; partial or merged updates are forbidden so that a
    /// renamed or removed output cannot survive a pass.
    pub fn replace_outputs(&self, outputs: Vec<StackOutput>) {
        *self.outputs.write().expect("outputs lock poisoned") = Arc::new(outputs);
    }
}

impl std::fmt::Debug for StackResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackResource")
            .field("name", &self.name)
            .field("stack_name", &self.stack_name)
            .field("lifecycle", &self.lifecycle())
            .field("outputs", &self.outputs())
            .finish()
    }
}

/// RAII guard for one provisioning pass
///
/// Dropping the guard ends the pass and allows the next one to begin.
pub struct PassGuard<'a> {
    resource: &'a StackResource,
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.resource.in_flight.store(false, Ordering::Release);
    }
}
