//! Configuration builders for tests.
//!
//! Use [`TestConfigBuilder`] to create customised [`AppConfig`] values
//! without repeating boilerplate across crate boundaries.

use nrfdocs_config::AppConfig;

/// Fluent builder for [`AppConfig`] in tests.
///
/// # Example
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .model("sonar-pro")
///     .base_url("http://localhost:8080")
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: AppConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn model(mut self, model: &str) -> Self {
        self.config.upstream.model = model.to_string();
        self
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.config.upstream.base_url = url.to_string();
        self
    }

    pub fn api_key_env(mut self, var: &str) -> Self {
        self.config.upstream.api_key_env = var.to_string();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.upstream.timeout_secs = secs;
        self
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.config.logging.level = level.to_string();
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
