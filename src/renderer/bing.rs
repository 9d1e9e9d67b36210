//! Bing Maps AJAX Control (v7) renderer
//!
//! Bing has no incremental bounds object, so auto-zoom collects every pin
//! location in a `{var}Pins` array and builds a `LocationRect` from it at
//! the end. Zoom and center both go through `setView`.

use super::html::{js_string, lat_lng_args, pins_var};
use super::{render_map, MapStatements, ProviderOptions, Renderer};
use crate::map::{Coordinate, MapDescription, MapType, Marker};

const SCRIPT_URL: &str = "https://ecn.dev.virtualearth.net/mapcontrol/mapcontrol.ashx?v=7.0";

/// Renderer for the Bing Maps AJAX Control
#[derive(Debug, Clone, Default)]
pub struct BingRenderer {
    options: ProviderOptions,
}

impl BingRenderer {
    /// Create a renderer; the `api_key` option becomes the map credentials
    pub fn new(options: ProviderOptions) -> Self {
        Self { options }
    }

    fn map_type_id(map_type: MapType) -> &'static str {
        match map_type {
            MapType::Satellite | MapType::Hybrid => "Microsoft.Maps.MapTypeId.aerial",
            _ => "Microsoft.Maps.MapTypeId.road",
        }
    }

    fn location(coordinate: &Coordinate) -> String {
        format!("new Microsoft.Maps.Location({})", lat_lng_args(coordinate))
    }
}

impl MapStatements for BingRenderer {
    fn construct_map(&self, map: &MapDescription) -> Vec<String> {
        vec![format!(
            "var {} = new Microsoft.Maps.Map(document.getElementById({}), {{ credentials: {}, mapTypeId: {} }});",
            map.var_name,
            js_string(&map.container_id),
            js_string(self.options.api_key().unwrap_or_default()),
            Self::map_type_id(map.map_type)
        )]
    }

    fn init_bounds(&self, map: &MapDescription) -> String {
        format!("var {} = [];", pins_var(map))
    }

    fn add_marker(&self, map: &MapDescription, marker: &Marker) -> String {
        format!(
            "{}.entities.push(new Microsoft.Maps.Pushpin({}));",
            map.var_name,
            Self::location(&marker.coordinate)
        )
    }

    fn extend_bounds(&self, map: &MapDescription, coordinate: &Coordinate) -> String {
        format!("{}.push({});", pins_var(map), Self::location(coordinate))
    }

    fn fit_bounds(&self, map: &MapDescription) -> String {
        format!(
            "{}.setView({{ bounds: Microsoft.Maps.LocationRect.fromLocations({}) }});",
            map.var_name,
            pins_var(map)
        )
    }

    fn set_zoom(&self, map: &MapDescription, zoom: u32) -> String {
        format!("{}.setView({{ zoom: {} }});", map.var_name, zoom)
    }

    fn set_center(&self, map: &MapDescription, center: &Coordinate) -> String {
        format!(
            "{}.setView({{ center: {} }});",
            map.var_name,
            Self::location(center)
        )
    }
}

impl Renderer for BingRenderer {
    fn name(&self) -> &'static str {
        "bing"
    }

    fn render_javascript_includes(&self) -> String {
        format!(
            r#"<script charset="UTF-8" type="text/javascript" src="{}"></script>"#,
            SCRIPT_URL
        )
    }

    fn render(&self, map: &MapDescription) -> String {
        render_map(self, map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed() -> BingRenderer {
        BingRenderer::new(ProviderOptions::with_api_key("BKEY"))
    }

    #[test]
    fn test_includes() {
        let tags = keyed().render_javascript_includes();
        assert!(tags.starts_with(r#"<script charset="UTF-8" type="text/javascript""#));
        assert!(tags.contains("mapcontrol.ashx?v=7.0"));
        // credentials are passed at construction, not in the URL
        assert!(!tags.contains("BKEY"));
    }

    #[test]
    fn test_map_type_translation() {
        assert_eq!(
            BingRenderer::map_type_id(MapType::Satellite),
            "Microsoft.Maps.MapTypeId.aerial"
        );
        assert_eq!(
            BingRenderer::map_type_id(MapType::Hybrid),
            "Microsoft.Maps.MapTypeId.aerial"
        );
        for map_type in [MapType::Road, MapType::Terrain, MapType::Other] {
            assert_eq!(
                BingRenderer::map_type_id(map_type),
                "Microsoft.Maps.MapTypeId.road"
            );
        }
    }

    #[test]
    fn test_render_fixed_viewport() {
        let map = MapDescription::new("map1", "mapA")
            .with_size("400", "300")
            .with_zoom(5)
            .with_center((40.7, -74.0));

        assert_eq!(
            keyed().render(&map),
            concat!(
                r#"<div id="map1" style="position: relative; width: 400px; height: 300px;"></div>"#,
                r#"<script type="text/javascript">"#,
                r#"var mapA = new Microsoft.Maps.Map(document.getElementById("map1"), { credentials: "BKEY", mapTypeId: Microsoft.Maps.MapTypeId.road });"#,
                "mapA.setView({ zoom: 5 });",
                "mapA.setView({ center: new Microsoft.Maps.Location(40.7, -74) });",
                "</script>"
            )
        );
    }

    #[test]
    fn test_render_auto_zoom() {
        let map = MapDescription::new("map1", "mapA")
            .with_size("400", "300")
            .with_auto_zoom(true)
            .with_markers(vec![(10.0, 20.0), (30.0, 40.0)]);

        assert_eq!(
            keyed().render(&map),
            concat!(
                r#"<div id="map1" style="position: relative; width: 400px; height: 300px;"></div>"#,
                r#"<script type="text/javascript">"#,
                r#"var mapA = new Microsoft.Maps.Map(document.getElementById("map1"), { credentials: "BKEY", mapTypeId: Microsoft.Maps.MapTypeId.road });"#,
                "var mapAPins = [];",
                "mapA.entities.push(new Microsoft.Maps.Pushpin(new Microsoft.Maps.Location(10, 20)));",
                "mapAPins.push(new Microsoft.Maps.Location(10, 20));",
                "mapA.entities.push(new Microsoft.Maps.Pushpin(new Microsoft.Maps.Location(30, 40)));",
                "mapAPins.push(new Microsoft.Maps.Location(30, 40));",
                "mapA.setView({ bounds: Microsoft.Maps.LocationRect.fromLocations(mapAPins) });",
                "</script>"
            )
        );
    }

    #[test]
    fn test_missing_api_key_renders_empty_credentials() {
        let html = BingRenderer::default().render(&MapDescription::new("map1", "mapA"));
        assert!(html.contains(r#"credentials: """#));
    }
}
