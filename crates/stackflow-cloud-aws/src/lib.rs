//! AWS CloudFormation client for Stackflow
//!
//! Implements the [`stackflow_cloud::CloudClient`] capability over the
//! CloudFormation `DescribeStacks` API. Vendor error classification lives
//! entirely in this crate: CloudFormation signals a missing stack with a
//! `ValidationError` error code, and that code is mapped to
//! [`stackflow_cloud::ClientError::NotFound`] here so the provisioner core
//! never inspects SDK error content.

pub mod client;
pub mod config;

// Re-exports
pub use client::CloudFormationClient;
pub use config::AwsSdkConfig;
