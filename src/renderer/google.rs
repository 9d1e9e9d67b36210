//! Google Maps JavaScript API renderer
//!
//! # Statement Mapping
//!
//! - map -> `google.maps.Map` with a JSON options object
//! - marker -> `google.maps.Marker`, kept in `{var}Markers`
//! - bounds -> `google.maps.LatLngBounds` in `{var}Bounds`, applied with `fitBounds`
//! - zoom/center -> `setZoom` / `setCenter`

use serde_json::json;

use super::html::{bounds_var, js_string, lat_lng_args, markers_var};
use super::{render_map, MapStatements, ProviderOptions, Renderer};
use crate::map::{Coordinate, MapDescription, MapType, Marker};

const SCRIPT_URL: &str = "https://maps.googleapis.com/maps/api/js?sensor=false";

/// Renderer for the Google Maps JavaScript API
#[derive(Debug, Clone, Default)]
pub struct GoogleRenderer {
    options: ProviderOptions,
}

impl GoogleRenderer {
    /// Create a renderer; the `api_key` option is added to the library URL
    pub fn new(options: ProviderOptions) -> Self {
        Self { options }
    }

    /// Native `google.maps.MapTypeId` value
    fn map_type_id(map_type: MapType) -> &'static str {
        match map_type {
            MapType::Satellite => "satellite",
            MapType::Hybrid => "hybrid",
            MapType::Terrain => "terrain",
            _ => "roadmap",
        }
    }

    fn lat_lng(coordinate: &Coordinate) -> String {
        format!("new google.maps.LatLng({})", lat_lng_args(coordinate))
    }
}

impl MapStatements for GoogleRenderer {
    fn construct_map(&self, map: &MapDescription) -> Vec<String> {
        let options = json!({ "mapTypeId": Self::map_type_id(map.map_type) });
        vec![
            format!(
                "var {} = new google.maps.Map(document.getElementById({}), {});",
                map.var_name,
                js_string(&map.container_id),
                options
            ),
            format!("var {} = [];", markers_var(map)),
        ]
    }

    fn init_bounds(&self, map: &MapDescription) -> String {
        format!("var {} = new google.maps.LatLngBounds();", bounds_var(map))
    }

    fn add_marker(&self, map: &MapDescription, marker: &Marker) -> String {
        format!(
            "{}.push(new google.maps.Marker({{ position: {}, map: {} }}));",
            markers_var(map),
            Self::lat_lng(&marker.coordinate),
            map.var_name
        )
    }

    fn extend_bounds(&self, map: &MapDescription, coordinate: &Coordinate) -> String {
        format!("{}.extend({});", bounds_var(map), Self::lat_lng(coordinate))
    }

    fn fit_bounds(&self, map: &MapDescription) -> String {
        format!("{}.fitBounds({});", map.var_name, bounds_var(map))
    }

    fn set_zoom(&self, map: &MapDescription, zoom: u32) -> String {
        format!("{}.setZoom({});", map.var_name, zoom)
    }

    fn set_center(&self, map: &MapDescription, center: &Coordinate) -> String {
        format!("{}.setCenter({});", map.var_name, Self::lat_lng(center))
    }
}

impl Renderer for GoogleRenderer {
    fn name(&self) -> &'static str {
        "google"
    }

    fn render_javascript_includes(&self) -> String {
        // The key is form-encoded and the separator escaped for the attribute
        let src = match self.options.api_key() {
            Some(key) => {
                let key: String = url::form_urlencoded::byte_serialize(key.as_bytes()).collect();
                format!("{}&amp;key={}", SCRIPT_URL, key)
            }
            None => SCRIPT_URL.to_string(),
        };
        format!(r#"<script type="text/javascript" src="{}"></script>"#, src)
    }

    fn render(&self, map: &MapDescription) -> String {
        render_map(self, map)
    }
}
