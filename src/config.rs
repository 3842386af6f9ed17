//! Digestion configuration.
//!
//! Defaults match the instrument's usual setup; a TOML file can override
//! them and CLI flags override the file. Example `digest.toml`:
//!
//! ```toml
//! length_factor = 0.1
//! acquisition_rate_hz = 1000.0
//! ```

use serde::Deserialize;
use std::path::Path;

/// Default central-region width as a fraction of the full stroke amplitude.
pub const DEFAULT_LENGTH_FACTOR: f64 = 0.1;

/// Tunable parameters for a digestion run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DigestConfig {
    /// Fraction of the wear track length kept by the central-region filter.
    #[serde(default = "default_length_factor")]
    pub length_factor: f64,

    /// HSD acquisition rate in Hz. When absent it is extracted from the
    /// first burst file's `High speed data ... Hz` line.
    #[serde(default)]
    pub acquisition_rate_hz: Option<f64>,
}

fn default_length_factor() -> f64 {
    DEFAULT_LENGTH_FACTOR
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            length_factor: DEFAULT_LENGTH_FACTOR,
            acquisition_rate_hz: None,
        }
    }
}

impl DigestConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Validate parameter ranges. Called once at startup.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.length_factor) || !self.length_factor.is_finite() {
            anyhow::bail!(
                "length_factor must be within [0.0, 1.0], got {}",
                self.length_factor
            );
        }
        if let Some(rate) = self.acquisition_rate_hz {
            if !rate.is_finite() || rate <= 0.0 {
                anyhow::bail!("acquisition_rate_hz must be positive, got {}", rate);
            }
        }
        Ok(())
    }
}
