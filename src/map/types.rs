//! Core value types for map descriptions

use serde::{Deserialize, Serialize};

/// A (latitude, longitude) pair in decimal degrees
///
/// No range validation is performed; coordinates are passed through to the
/// provider script verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// A single marker placed on a map
///
/// In serialized form the coordinate fields sit next to the metadata:
/// `{"lat": 10.0, "lng": 20.0, "metadata": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    /// Caller data carried along with the marker (not rendered)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Marker {
    pub fn new(coordinate: impl Into<Coordinate>) -> Self {
        Self {
            coordinate: coordinate.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Abstract base map type
///
/// Renderers translate this to their native constant. `Other` absorbs any
/// value this crate does not know about and is rendered like `Road`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    #[default]
    #[serde(alias = "roadmap")]
    Road,
    #[serde(alias = "aerial")]
    Satellite,
    Hybrid,
    Terrain,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for MapType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MapType::Road => "road",
            MapType::Satellite => "satellite",
            MapType::Hybrid => "hybrid",
            MapType::Terrain => "terrain",
            MapType::Other => "other",
        };
        write!(f, "{}", s)
    }
}

fn default_width() -> String {
    "100%".to_string()
}

fn default_height() -> String {
    "400".to_string()
}

fn default_zoom() -> u32 {
    1
}

/// Everything needed to render one map instance
///
/// `var_name` is the base of every script-scope identifier the renderers
/// emit (`{var_name}Markers`, `{var_name}Bounds`, `{var_name}Pins`), so it
/// must be unique among all maps rendered onto the same page. `container_id`
/// carries the same requirement for the DOM. Neither is checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapDescription {
    /// DOM id of the container element
    pub container_id: String,
    /// Base JavaScript variable name for this map
    pub var_name: String,
    /// CSS width; a bare number is treated as pixels
    #[serde(default = "default_width")]
    pub width: String,
    /// CSS height; a bare number is treated as pixels
    #[serde(default = "default_height")]
    pub height: String,
    /// Zoom level, ignored when `auto_zoom` is set
    #[serde(default = "default_zoom")]
    pub zoom: u32,
    /// Map center, ignored when `auto_zoom` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Coordinate>,
    #[serde(default)]
    pub map_type: MapType,
    /// Fit the viewport to the markers instead of using zoom/center
    #[serde(default)]
    pub auto_zoom: bool,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

impl MapDescription {
    /// Create a description with default size, zoom and map type
    pub fn new(container_id: impl Into<String>, var_name: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            var_name: var_name.into(),
            width: default_width(),
            height: default_height(),
            zoom: default_zoom(),
            center: None,
            map_type: MapType::default(),
            auto_zoom: false,
            markers: Vec::new(),
        }
    }

    pub fn with_size(mut self, width: impl Into<String>, height: impl Into<String>) -> Self {
        self.width = width.into();
        self.height = height.into();
        self
    }

    pub fn with_zoom(mut self, zoom: u32) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_center(mut self, center: impl Into<Coordinate>) -> Self {
        self.center = Some(center.into());
        self
    }

    pub fn with_map_type(mut self, map_type: MapType) -> Self {
        self.map_type = map_type;
        self
    }

    pub fn with_auto_zoom(mut self, auto_zoom: bool) -> Self {
        self.auto_zoom = auto_zoom;
        self
    }

    pub fn with_marker(mut self, marker: impl Into<Marker>) -> Self {
        self.markers.push(marker.into());
        self
    }

    pub fn with_markers<I, M>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Marker>,
    {
        self.markers.extend(markers.into_iter().map(Into::into));
        self
    }

    /// Decode a description from JSON
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| crate::GeomapError::InputError(format!("Invalid map description: {}", e)))
    }
}

impl From<Coordinate> for Marker {
    fn from(coordinate: Coordinate) -> Self {
        Marker::new(coordinate)
    }
}

impl From<(f64, f64)> for Marker {
    fn from(pair: (f64, f64)) -> Self {
        Marker::new(pair)
    }
}
