use anyhow::{Context, Result, anyhow, bail};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

/// One raw feature out of a FeatureCollection: its properties object and its
/// parsed geometry. Property normalization happens in the atlas, not here.
pub(crate) struct RawFeature<'a> {
    pub properties: Option<&'a Value>,
    pub geometry: MultiPolygon<f64>,
}

/// Parse a GeoJSON FeatureCollection, keeping features with Polygon or
/// MultiPolygon geometry. Features with other geometry types are skipped.
pub(crate) fn parse_feature_collection(value: &Value) -> Result<Vec<RawFeature<'_>>> {
    if value["type"].as_str() != Some("FeatureCollection") {
        bail!("Expected a GeoJSON FeatureCollection");
    }
    let features = value["features"]
        .as_array()
        .context("FeatureCollection has no features array")?;

    let mut parsed = Vec::with_capacity(features.len());
    for feature in features {
        let geometry = &feature["geometry"];
        let multipolygon = match geometry["type"].as_str() {
            Some("MultiPolygon") => {
                let coords = geometry["coordinates"]
                    .as_array()
                    .context("MultiPolygon has no coordinates")?;
                parse_multipolygon_coords(coords)?
            }
            Some("Polygon") => {
                let coords = geometry["coordinates"]
                    .as_array()
                    .context("Polygon has no coordinates")?;
                MultiPolygon(vec![parse_polygon_coords(coords)?])
            }
            _ => continue,
        };
        parsed.push(RawFeature {
            properties: feature.get("properties"),
            geometry: multipolygon,
        });
    }
    Ok(parsed)
}

/// Read a numeric property under any of the given keys. Accepts JSON numbers
/// and numeric strings, since datasets are inconsistent about both the key
/// casing and the value type.
pub(crate) fn property_number(properties: Option<&Value>, keys: &[&str]) -> Option<u8> {
    let properties = properties?.as_object()?;
    for key in keys {
        if let Some(value) = properties.get(*key) {
            if let Some(n) = value.as_u64() {
                return u8::try_from(n).ok();
            }
            if let Some(s) = value.as_str() {
                if let Ok(n) = s.trim().parse::<u8>() {
                    return Some(n);
                }
            }
        }
    }
    None
}

/// Read a string property under any of the given keys.
pub(crate) fn property_string<'a>(properties: Option<&'a Value>, keys: &[&str]) -> Option<&'a str> {
    let properties = properties?.as_object()?;
    for key in keys {
        if let Some(s) = properties.get(*key).and_then(Value::as_str) {
            return Some(s);
        }
    }
    None
}

/// Parse GeoJSON MultiPolygon coordinates: an array of polygons, each an
/// array of rings (exterior first).
fn parse_multipolygon_coords(coords: &[Value]) -> Result<MultiPolygon<f64>> {
    let mut polygons = Vec::with_capacity(coords.len());
    for polygon_coords in coords {
        let rings = polygon_coords
            .as_array()
            .ok_or_else(|| anyhow!("Invalid MultiPolygon: polygon is not an array"))?;
        polygons.push(parse_polygon_coords(rings)?);
    }
    Ok(MultiPolygon(polygons))
}

/// Parse GeoJSON Polygon coordinates: an array of rings, exterior first,
/// holes after.
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let exterior = rings
        .first()
        .and_then(|v| v.as_array())
        .ok_or_else(|| anyhow!("Invalid Polygon: missing exterior ring"))?;
    let exterior = parse_ring_coords(exterior)?;

    let mut interiors = Vec::new();
    for ring in &rings[1..] {
        let ring = ring
            .as_array()
            .ok_or_else(|| anyhow!("Invalid Polygon: interior ring is not an array"))?;
        interiors.push(parse_ring_coords(ring)?);
    }
    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring (exterior or interior) from GeoJSON coordinates.
/// Format: [[x, y], [x, y], ...]
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len());
    for coord_pair in coords {
        if let Some(coord_array) = coord_pair.as_array() {
            if coord_array.len() >= 2 {
                let x = coord_array[0]
                    .as_f64()
                    .ok_or_else(|| anyhow!("Invalid coordinate: x must be a number"))?;
                let y = coord_array[1]
                    .as_f64()
                    .ok_or_else(|| anyhow!("Invalid coordinate: y must be a number"))?;
                points.push(Coord { x, y });
            }
        }
    }

    // Ensure ring is closed (first point == last point)
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn square(x: f64, y: f64) -> Value {
        json!([[[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0], [x, y]]])
    }

    #[test]
    fn parses_polygon_and_multipolygon_members() {
        let collection = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Polygon", "coordinates": square(0.0, 0.0) },
                    "properties": { "Province": 1 }
                },
                {
                    "type": "Feature",
                    "geometry": { "type": "MultiPolygon", "coordinates": [square(2.0, 0.0), square(4.0, 0.0)] },
                    "properties": { "Province": 2 }
                },
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
                    "properties": {}
                }
            ]
        });

        let features = parse_feature_collection(&collection).unwrap();
        assert_eq!(features.len(), 2); // the Point is skipped
        assert_eq!(features[0].geometry.0.len(), 1);
        assert_eq!(features[1].geometry.0.len(), 2);
    }

    #[test]
    fn rejects_non_collections() {
        let value = json!({ "type": "Feature" });
        assert!(parse_feature_collection(&value).is_err());
    }

    #[test]
    fn closes_open_rings() {
        let open = json!([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        let ring = parse_ring_coords(open.as_array().unwrap()).unwrap();
        assert_eq!(ring.0.first(), ring.0.last());
        assert_eq!(ring.0.len(), 5);
    }

    #[test]
    fn property_number_accepts_numbers_and_numeric_strings() {
        let props = json!({ "PROVINCE": "3" });
        assert_eq!(property_number(Some(&props), &["Province", "PROVINCE"]), Some(3));

        let props = json!({ "Province": 5 });
        assert_eq!(property_number(Some(&props), &["Province", "PROVINCE"]), Some(5));

        let props = json!({ "Province": "many" });
        assert_eq!(property_number(Some(&props), &["Province"]), None);
        assert_eq!(property_number(None, &["Province"]), None);
    }

    #[test]
    fn property_string_checks_keys_in_order() {
        let props = json!({ "NAME": "Kaski", "DISTRICT": "Kathmandu" });
        assert_eq!(property_string(Some(&props), &["DISTRICT", "NAME"]), Some("Kathmandu"));
        assert_eq!(property_string(Some(&props), &["MISSING", "NAME"]), Some("Kaski"));
        assert_eq!(property_string(Some(&props), &["MISSING"]), None);
    }
}
