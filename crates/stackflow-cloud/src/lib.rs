//! Stackflow cloud provisioning
//!
//! This crate drives externally-managed cloud stacks to a ready state and
//! propagates their runtime outputs into the configuration of dependent
//! application components.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │           scheduler (external caller)            │
//! │     one provision() pass per resource            │
//! └───────────────────┬──────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────┐
//! │                 Provisioner                      │
//! │  describe → classify → extract → publish         │
//! └───────┬──────────────────────────────┬───────────┘
//!         │                              │
//! ┌───────▼───────┐              ┌───────▼───────┐
//! │  CloudClient  │              │ Notification  │
//! │  (describe)   │              │     Sink      │
//! └───────────────┘              └───────────────┘
//! ```
//!
//! Concrete control-plane clients (e.g. CloudFormation) live in their own
//! crates and implement [`CloudClient`]; error classification happens at
//! that boundary so this crate never inspects vendor error content.

pub mod client;
pub mod description;
pub mod error;
pub mod notify;
pub mod outputs;
pub mod provisioner;

// Re-exports
pub use client::CloudClient;
pub use description::{RawOutput, StackDescription};
pub use error::{ClientError, ProvisionError, Result};
pub use notify::NotificationSink;
pub use outputs::extract_outputs;
pub use provisioner::Provisioner;
