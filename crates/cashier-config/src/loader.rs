use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable expansion, TOML parsing, or
    /// validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded = crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// A missing secret key is deliberately not an error here: it is
    /// reported by each payment operation when it runs.
    ///
    /// # Errors
    ///
    /// Returns an error if processor settings are invalid or a field map
    /// declares an empty name
    pub fn validate(&self) -> anyhow::Result<()> {
        self.processor.validate().map_err(|e| anyhow::anyhow!(e))?;
        self.validate_fields()?;

        if self.processor.secret_key().is_none() {
            tracing::warn!(
                mode = self.processor.mode.as_str(),
                "no secret key configured for the active mode, payment operations will fail"
            );
        }

        Ok(())
    }

    /// Reject field maps with empty local names or path segments
    fn validate_fields(&self) -> anyhow::Result<()> {
        for (kind, spec) in self.fields.iter() {
            for (local, path) in spec.iter() {
                if local.trim().is_empty() {
                    anyhow::bail!("fields.{kind} declares an empty local field name");
                }

                if path.segments().iter().any(|segment| segment.trim().is_empty()) {
                    anyhow::bail!("fields.{kind}.{local} has an empty path segment");
                }
            }
        }

        Ok(())
    }
}
