use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result. Missing credentials are not an
    /// error here: the relay still starts and reports them per request.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded = crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;
        config.warn_missing_credentials();

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if route paths are malformed or the sampling rate is
    /// out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_paths()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_paths(&self) -> anyhow::Result<()> {
        let base_path = &self.server.base_path;

        if !base_path.is_empty() && (!base_path.starts_with('/') || base_path.ends_with('/')) {
            anyhow::bail!("server.base_path must start with '/' and must not end with '/', got '{base_path}'");
        }

        if self.server.health.enabled && !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }

    fn validate_telemetry(&self) -> anyhow::Result<()> {
        let Some(rate) = self
            .telemetry
            .as_ref()
            .and_then(|t| t.tracing.as_ref())
            .map(|t| t.sampling_rate)
        else {
            return Ok(());
        };

        if !(0.0..=1.0).contains(&rate) {
            anyhow::bail!("telemetry.tracing.sampling_rate must be between 0 and 1, got {rate}");
        }

        Ok(())
    }

    fn warn_missing_credentials(&self) {
        if self.stt.credential().is_none() {
            tracing::warn!("stt.api_key is not set, audio identification requests will fail");
        }

        if self.llm.credential().is_none() {
            tracing::warn!("llm.api_key is not set, identification requests will fail");
        }
    }
}
