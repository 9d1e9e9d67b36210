//! Markup and naming helpers shared by every provider renderer

use std::borrow::Cow;

use crate::map::{Coordinate, MapDescription};

pub(crate) const SCRIPT_OPEN: &str = r#"<script type="text/javascript">"#;
pub(crate) const SCRIPT_CLOSE: &str = "</script>";

/// Append `px` to a dimension whose last character is a digit
///
/// Anything else (`"100%"`, `"50vh"`, `"auto"`, `""`) already carries its
/// unit or is passed through as given.
pub fn infer_unit(dimension: &str) -> Cow<'_, str> {
    match dimension.chars().last() {
        Some(c) if c.is_ascii_digit() => Cow::Owned(format!("{}px", dimension)),
        _ => Cow::Borrowed(dimension),
    }
}

/// Render the container element for a map
///
/// `position: relative` is always set so providers that stack absolutely
/// positioned children inside the container get a positioning context.
pub fn render_container(map: &MapDescription) -> String {
    format!(
        r#"<div id="{}" style="position: relative; width: {}; height: {};"></div>"#,
        map.container_id,
        infer_unit(&map.width),
        infer_unit(&map.height)
    )
}

/// Wrap already-rendered statements in a single script block
pub fn wrap_script(statements: &[String]) -> String {
    let mut html = String::from(SCRIPT_OPEN);
    for statement in statements {
        html.push_str(statement);
    }
    html.push_str(SCRIPT_CLOSE);
    html
}

/// Name of the per-map array holding native marker objects
pub fn markers_var(map: &MapDescription) -> String {
    format!("{}Markers", map.var_name)
}

/// Name of the per-map bounds accumulator
pub fn bounds_var(map: &MapDescription) -> String {
    format!("{}Bounds", map.var_name)
}

/// Name of the per-map array of pin locations used for view fitting
pub fn pins_var(map: &MapDescription) -> String {
    format!("{}Pins", map.var_name)
}

/// Format a coordinate as `lat, lng` for use as constructor arguments
pub fn lat_lng_args(coordinate: &Coordinate) -> String {
    format!("{}, {}", coordinate.lat, coordinate.lng)
}

/// Encode a string as a JavaScript string literal (with quotes)
pub fn js_string(value: &str) -> String {
    // JSON string literals are valid JavaScript string literals
    serde_json::Value::from(value).to_string()
}
