//! GeoJSON reading and export
//!
//! Only the geometry is read. Styling is up to the front end.

use serde_json::{json, Value};

use super::{GeoError, LatLng};

/// How a path should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// A single position
    Point,
    /// An open line (collection route, road)
    Line,
    /// A closed polygon ring (property boundary)
    Ring,
}

/// One drawable piece of a GeoJSON geometry
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPath {
    pub kind: PathKind,
    pub points: Vec<LatLng>,
}

/// Accept GeoJSON either as an object or as a JSON-encoded string
pub fn parse_geojson(value: &Value) -> Result<Value, GeoError> {
    match value {
        Value::String(text) => {
            serde_json::from_str(text).map_err(|e| GeoError::InvalidGeoJson(e.to_string()))
        }
        Value::Object(_) => Ok(value.clone()),
        other => Err(GeoError::InvalidGeoJson(format!(
            "expected object or string, got {}",
            type_name(other)
        ))),
    }
}

/// Flatten any GeoJSON value into drawable paths.
///
/// Positions that are not `[lon, lat, ...]` number arrays are skipped.
pub fn geojson_paths(value: &Value) -> Vec<GeoPath> {
    let mut paths = Vec::new();
    collect(value, &mut paths);
    paths
}

fn collect(value: &Value, out: &mut Vec<GeoPath>) {
    let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
    let coords = value.get("coordinates");

    match kind {
        "FeatureCollection" => {
            for feature in array(value.get("features")) {
                collect(feature, out);
            }
        }
        "Feature" => {
            if let Some(geometry) = value.get("geometry") {
                collect(geometry, out);
            }
        }
        "GeometryCollection" => {
            for geometry in array(value.get("geometries")) {
                collect(geometry, out);
            }
        }
        "Point" => {
            if let Some(p) = coords.and_then(position) {
                out.push(GeoPath {
                    kind: PathKind::Point,
                    points: vec![p],
                });
            }
        }
        "MultiPoint" => {
            for p in array(coords).iter().filter_map(position) {
                out.push(GeoPath {
                    kind: PathKind::Point,
                    points: vec![p],
                });
            }
        }
        "LineString" => push_path(out, PathKind::Line, coords),
        "MultiLineString" => {
            for line in array(coords) {
                push_path(out, PathKind::Line, Some(line));
            }
        }
        "Polygon" => {
            for ring in array(coords) {
                push_path(out, PathKind::Ring, Some(ring));
            }
        }
        "MultiPolygon" => {
            for polygon in array(coords) {
                for ring in array(Some(polygon)) {
                    push_path(out, PathKind::Ring, Some(ring));
                }
            }
        }
        other => {
            tracing::debug!(geometry_type = other, "Skipping unsupported GeoJSON type");
        }
    }
}

fn push_path(out: &mut Vec<GeoPath>, kind: PathKind, coords: Option<&Value>) {
    let points: Vec<LatLng> = array(coords).iter().filter_map(position).collect();
    if !points.is_empty() {
        out.push(GeoPath { kind, points });
    }
}

fn array(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// GeoJSON positions are `[lon, lat]`
fn position(value: &Value) -> Option<LatLng> {
    let pair = value.as_array()?;
    let lon = pair.first()?.as_f64()?;
    let lat = pair.get(1)?.as_f64()?;
    Some(LatLng::new(lat, lon))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build a FeatureCollection of point features
pub fn feature_collection(markers: impl IntoIterator<Item = (LatLng, Value)>) -> Value {
    let features: Vec<Value> = markers
        .into_iter()
        .map(|(p, properties)| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [p.lon, p.lat],
                },
                "properties": properties,
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_feature() {
        let value = json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[151.0, -33.0], [151.1, -33.0], [151.1, -33.1], [151.0, -33.0]]]
            },
            "properties": {}
        });

        let paths = geojson_paths(&value);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].kind, PathKind::Ring);
        assert_eq!(paths[0].points.len(), 4);
        assert_eq!(paths[0].points[0], LatLng::new(-33.0, 151.0));
    }

    #[test]
    fn test_feature_collection_mixed() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[151.0, -33.0], [151.2, -33.2]]}},
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [150.5, -34.0]}},
                {"type": "Feature", "geometry": null}
            ]
        });

        let paths = geojson_paths(&value);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].kind, PathKind::Line);
        assert_eq!(paths[1].kind, PathKind::Point);
        assert_eq!(paths[1].points, vec![LatLng::new(-34.0, 150.5)]);
    }

    #[test]
    fn test_multipolygon_and_bad_positions() {
        let value = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[151.0, -33.0], ["x", -33.0], [151.1, -33.1]]],
                [[[152.0, -34.0], [152.1, -34.1]]]
            ]
        });

        let paths = geojson_paths(&value);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].points.len(), 2);
    }

    #[test]
    fn test_parse_string_geojson() {
        let text = Value::String(r#"{"type":"Point","coordinates":[151.0,-33.0]}"#.to_string());
        let parsed = parse_geojson(&text).unwrap();
        assert_eq!(geojson_paths(&parsed).len(), 1);

        let bad = Value::String("{not json".to_string());
        assert!(matches!(parse_geojson(&bad), Err(GeoError::InvalidGeoJson(_))));
        assert!(parse_geojson(&json!(42)).is_err());
    }

    #[test]
    fn test_feature_collection_export() {
        let fc = feature_collection(vec![(LatLng::new(-33.0, 151.0), json!({"title": "DA-1"}))]);
        assert_eq!(fc["type"], "FeatureCollection");
        assert_eq!(fc["features"][0]["geometry"]["coordinates"][0], 151.0);
        assert_eq!(fc["features"][0]["geometry"]["coordinates"][1], -33.0);
        assert_eq!(fc["features"][0]["properties"]["title"], "DA-1");
    }
}
