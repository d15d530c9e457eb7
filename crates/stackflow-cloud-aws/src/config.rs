//! AWS SDK configuration for stack resources
//!
//! Selects the credential profile and region used when constructing SDK
//! clients. Credential resolution itself is left to the SDK's default
//! provider chain.

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Profile and region selection for the AWS SDK
#[derive(Debug, Clone, Default)]
pub struct AwsSdkConfig {
    profile: Option<String>,
    region: Option<String>,
}

impl AwsSdkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a named credential profile instead of the default chain entry
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Pin the region instead of resolving it from the environment
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Resolve the SDK configuration through the default provider chain
    pub async fn load(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        loader.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_records_profile_and_region() {
        let config = AwsSdkConfig::new()
            .with_profile("deploy")
            .with_region("us-west-2");
        assert_eq!(config.profile(), Some("deploy"));
        assert_eq!(config.region(), Some("us-west-2"));
    }

    #[test]
    fn defaults_leave_resolution_to_the_sdk() {
        let config = AwsSdkConfig::new();
        assert_eq!(config.profile(), None);
        assert_eq!(config.region(), None);
    }
}
