//! Map renderers for JavaScript mapping providers
//!
//! A renderer turns a [`MapDescription`] into the container markup and the
//! initialization script for one provider's client library.
//!
//! # Architecture
//!
//! - `Renderer`: the public contract every provider satisfies
//! - `MapStatements`: the provider-specific statement builders
//! - `pipeline::render_map`: the shared render order, driven by `MapStatements`
//! - `ProviderKind`: enum of built-in providers for lookup and configuration
//! - `RendererRegistry`: provider key -> shared renderer instance
//!
//! # Example
//!
//! ```rust
//! use geomap::map::MapDescription;
//! use geomap::renderer::RendererRegistry;
//!
//! let registry = RendererRegistry::with_defaults();
//! let bing = registry.get("bing").unwrap();
//!
//! let map = MapDescription::new("map1", "mapA").with_auto_zoom(true);
//! let html = bing.render(&map);
//! assert!(html.contains("LocationRect.fromLocations(mapAPins)"));
//! ```

mod bing;
mod google;
pub mod html;
mod pipeline;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::GeomapConfig;
use crate::map::{Coordinate, MapDescription, Marker};
use crate::{GeomapError, Result};

pub use bing::BingRenderer;
pub use google::GoogleRenderer;
pub use pipeline::render_map;

/// Option carrying the provider credential
pub const API_KEY_OPTION: &str = "api_key";

// ============================================================================
// Provider options
// ============================================================================

/// Construction-time options for a renderer (credentials and the like)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderOptions(BTreeMap<String, String>);

impl ProviderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options holding only an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        let mut options = Self::new();
        options.insert(API_KEY_OPTION, api_key);
        options
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.get(API_KEY_OPTION)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProviderOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ============================================================================
// Renderer Trait
// ============================================================================

/// Contract shared by all provider renderers
///
/// Both operations are total: any well-formed description renders, and
/// nothing about the description is validated. Implementations hold only
/// immutable construction-time options, so a single instance can be shared
/// across threads.
pub trait Renderer: std::fmt::Debug + Send + Sync {
    /// Provider key this renderer is registered under
    fn name(&self) -> &'static str;

    /// `<script>` tag(s) loading the provider's client library
    ///
    /// Rendered once per page regardless of how many maps it holds.
    fn render_javascript_includes(&self) -> String;

    /// Container markup plus initialization script for one map
    fn render(&self, map: &MapDescription) -> String;
}

/// Provider-specific statement builders used by [`render_map`]
///
/// Every method returns complete JavaScript statements (terminated with
/// `;`). The order in which they are emitted is fixed by the pipeline, not
/// by the provider.
pub trait MapStatements {
    /// Statements creating the native map object bound to `map.var_name`
    fn construct_map(&self, map: &MapDescription) -> Vec<String>;

    /// Empty bounds accumulator (auto-zoom only)
    fn init_bounds(&self, map: &MapDescription) -> String;

    /// Native marker at the marker's coordinate, attached to the map
    fn add_marker(&self, map: &MapDescription, marker: &Marker) -> String;

    /// Grow the bounds accumulator by one coordinate (auto-zoom only)
    fn extend_bounds(&self, map: &MapDescription, coordinate: &Coordinate) -> String;

    /// Fit the viewport to the accumulated bounds (auto-zoom only)
    fn fit_bounds(&self, map: &MapDescription) -> String;

    fn set_zoom(&self, map: &MapDescription, zoom: u32) -> String;

    fn set_center(&self, map: &MapDescription, center: &Coordinate) -> String;
}

// ============================================================================
// Provider lookup
// ============================================================================

/// Built-in providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Google,
    Bing,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Google, ProviderKind::Bing];

    /// Canonical provider key
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::Bing => "bing",
        }
    }

    /// Look up a provider by key (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Options this provider understands
    pub fn recognized_options(&self) -> &'static [&'static str] {
        match self {
            ProviderKind::Google | ProviderKind::Bing => &[API_KEY_OPTION],
        }
    }

    /// Build a renderer for this provider
    pub fn build(&self, options: ProviderOptions) -> Arc<dyn Renderer> {
        match self {
            ProviderKind::Google => Arc::new(GoogleRenderer::new(options)),
            ProviderKind::Bing => Arc::new(BingRenderer::new(options)),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Provider key -> renderer lookup
#[derive(Debug, Clone, Default)]
pub struct RendererRegistry {
    renderers: BTreeMap<String, Arc<dyn Renderer>>,
}

impl RendererRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in provider and no options
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for kind in ProviderKind::ALL {
            registry.register(kind.build(ProviderOptions::new()));
        }
        registry
    }

    /// Registry with every built-in provider, configured from `config`
    ///
    /// Providers without a section in the config get empty options.
    pub fn from_config(config: &GeomapConfig) -> Self {
        let mut registry = Self::new();
        for kind in ProviderKind::ALL {
            let options = config.options_for(kind.name()).cloned().unwrap_or_default();
            registry.register(kind.build(options));
        }
        registry
    }

    /// Register a renderer under its own name, returning any renderer it replaces
    pub fn register(&mut self, renderer: Arc<dyn Renderer>) -> Option<Arc<dyn Renderer>> {
        tracing::debug!(provider = renderer.name(), "registering renderer");
        self.renderers.insert(renderer.name().to_string(), renderer)
    }

    /// Look up a renderer by provider key (case-insensitive)
    pub fn get(&self, provider: &str) -> Result<Arc<dyn Renderer>> {
        self.renderers
            .get(&provider.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| {
                GeomapError::UnknownProvider(format!(
                    "'{}' (available: {})",
                    provider,
                    self.providers().collect::<Vec<_>>().join(", ")
                ))
            })
    }

    /// Registered provider keys, sorted
    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.renderers.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

/// Render a full page fragment: library includes once, then every map in order
pub fn render_page(renderer: &dyn Renderer, maps: &[MapDescription]) -> String {
    let mut html = renderer.render_javascript_includes();
    for map in maps {
        html.push_str(&renderer.render(map));
    }
    html
}
