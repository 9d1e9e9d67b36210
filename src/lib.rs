/*!
# geomap - provider-agnostic map widget rendering

geomap turns one abstract map description into the HTML container and
initialization script that a specific JavaScript mapping API needs.

## Example

```rust
use geomap::map::{Coordinate, MapDescription};
use geomap::renderer::{GoogleRenderer, Renderer};

let map = MapDescription::new("map1", "mapA")
    .with_size("400", "300")
    .with_zoom(5)
    .with_center(Coordinate::new(40.7, -74.0));

let renderer = GoogleRenderer::default();
let html = renderer.render(&map);
assert!(html.contains("mapA.setZoom(5);"));
```

## Core Components

- [`map`] - Provider-agnostic map model (coordinates, markers, descriptions)
- [`renderer`] - Renderer trait, shared markup helpers and provider renderers
- [`config`] - Provider option loading for the CLI and REST binaries
*/

pub mod config;
pub mod map;
pub mod renderer;

pub use map::{Coordinate, MapDescription, MapType, Marker};
pub use renderer::{ProviderOptions, Renderer, RendererRegistry};

/// Version of the geomap crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main error type for geomap operations
///
/// Rendering itself never fails; these variants cover the surfaces around it
/// (provider lookup, configuration, decoding caller input).
#[derive(thiserror::Error, Debug)]
pub enum GeomapError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Input error: {0}")]
    InputError(String),
}

pub type Result<T> = std::result::Result<T, GeomapError>;
