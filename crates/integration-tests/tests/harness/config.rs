//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use birdid_config::{Config, CorsConfig, HealthConfig, ServerConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder with no credentials configured
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Point both upstream services at a mock with test credentials
    pub fn with_upstream(self, base_url: &str) -> Self {
        self.with_transcription(base_url, "stt-test-key")
            .with_gateway(base_url, "gateway-test-key")
    }

    pub fn with_transcription(mut self, base_url: &str, api_key: &str) -> Self {
        self.config.stt.base_url = base_url.parse().expect("valid URL");
        self.config.stt.api_key = Some(SecretString::from(api_key));
        self
    }

    pub fn with_gateway(mut self, base_url: &str, api_key: &str) -> Self {
        self.config.llm.base_url = base_url.parse().expect("valid URL");
        self.config.llm.api_key = Some(SecretString::from(api_key));
        self
    }

    /// Mount the identification routes under a prefix
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.config.server.base_path = base_path.to_owned();
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = config;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
