//! Render order shared by every provider

use super::html::{render_container, wrap_script};
use super::MapStatements;
use crate::map::MapDescription;

/// Render a map with the given provider's statements
///
/// Output is the container followed by one script block holding, in order:
/// map construction, bounds init (auto-zoom), one marker statement per
/// marker each followed by its bounds extension (auto-zoom), then either the
/// fit statement (auto-zoom) or zoom and, when a center is set, center.
pub fn render_map<S>(provider: &S, map: &MapDescription) -> String
where
    S: MapStatements + ?Sized,
{
    tracing::debug!(
        var_name = %map.var_name,
        markers = map.markers.len(),
        auto_zoom = map.auto_zoom,
        "rendering map"
    );

    let mut statements = provider.construct_map(map);

    if map.auto_zoom {
        statements.push(provider.init_bounds(map));
    }

    for marker in &map.markers {
        statements.push(provider.add_marker(map, marker));
        if map.auto_zoom {
            statements.push(provider.extend_bounds(map, &marker.coordinate));
        }
    }

    if map.auto_zoom {
        // Also emitted with no markers; the provider decides what an empty fit does
        statements.push(provider.fit_bounds(map));
    } else {
        statements.push(provider.set_zoom(map, map.zoom));
        if let Some(center) = &map.center {
            statements.push(provider.set_center(map, center));
        }
    }

    let mut html = render_container(map);
    html.push_str(&wrap_script(&statements));
    html
}
