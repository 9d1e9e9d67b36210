//! Provider configuration for the geomap binaries
//!
//! Renderers never read configuration themselves; the CLI and REST server
//! load a [`GeomapConfig`] and hand each provider its options through
//! [`RendererRegistry::from_config`](crate::renderer::RendererRegistry::from_config).
//!
//! ```toml
//! default_provider = "google"
//!
//! [providers.google]
//! api_key = "..."
//!
//! [providers.bing]
//! api_key = "..."
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::renderer::{ProviderKind, ProviderOptions};
use crate::{GeomapError, Result};

/// Environment variable consulted for the config path when no flag is given
pub const CONFIG_ENV: &str = "GEOMAP_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeomapConfig {
    /// Provider used when a request does not name one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,
    /// Options per provider key
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderOptions>,
}

impl GeomapConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: GeomapConfig = toml_edit::de::from_str(source)
            .map_err(|e| GeomapError::ConfigError(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            GeomapError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "loading configuration");
        Self::from_toml_str(&source)
    }

    /// Options configured for a provider key (case-insensitive), if any
    pub fn options_for(&self, provider: &str) -> Option<&ProviderOptions> {
        self.providers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(provider))
            .map(|(_, options)| options)
    }

    /// Provider key to fall back on, defaulting to `google`
    pub fn default_provider(&self) -> &str {
        self.default_provider
            .as_deref()
            .unwrap_or_else(|| ProviderKind::Google.name())
    }

    /// Check provider keys and option names against the built-in providers
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.default_provider {
            if ProviderKind::from_name(name).is_none() {
                return Err(GeomapError::ConfigError(format!(
                    "default_provider '{}' is not a known provider",
                    name
                )));
            }
        }

        for (provider, options) in &self.providers {
            let kind = ProviderKind::from_name(provider).ok_or_else(|| {
                GeomapError::ConfigError(format!("Unknown provider section '{}'", provider))
            })?;
            let recognized = kind.recognized_options();
            if let Some(unknown) = options
                .names()
                .find(|name| !recognized.iter().any(|r| r == name))
            {
                return Err(GeomapError::ConfigError(format!(
                    "Option '{}' is not valid for provider '{}'. Valid options: {}",
                    unknown,
                    provider,
                    recognized.join(", ")
                )));
            }
        }

        Ok(())
    }
}
