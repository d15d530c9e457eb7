//! Stackflow core resource model
//!
//! Defines the application-side representation of an externally-managed
//! cloud stack: the resource descriptor, its lifecycle state and the
//! output snapshot that dependent components read their configuration from.

pub mod output;
pub mod resource;

// Re-exports
pub use output::StackOutput;
pub use resource::{Lifecycle, PassGuard, StackResource};
