use std::fs;
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use anyhow::{Context, Result, anyhow};
use geo::{BoundingRect, Rect};
use serde_json::Value;

use super::feature::{DistrictFeature, ProvinceFeature};
use super::geojson::{parse_feature_collection, property_number, property_string};
use crate::geography::ProvinceId;

/// Number keys seen in the wild for the province property, in lookup order.
const PROVINCE_KEYS: &[&str] = &["Province", "PROVINCE", "province"];
/// Name keys for district features, in lookup order.
const DISTRICT_KEYS: &[&str] = &["DISTRICT", "NAME"];

/// The geography data provider: one country-wide province dataset plus one
/// district dataset per province, loaded synchronously at startup and
/// normalized into typed records at this boundary.
#[derive(Debug)]
pub struct Atlas {
    provinces: Vec<ProvinceFeature>,
    districts: AHashMap<ProvinceId, Vec<DistrictFeature>>,
}

impl Atlas {
    /// Load an atlas from a directory holding `provinces.geojson` and
    /// `province_1.geojson` .. `province_7.geojson`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let provinces = read_json(&dir.join("provinces.geojson"))?;
        let mut districts = Vec::with_capacity(7);
        for n in 1..=7u8 {
            let value = read_json(&dir.join(format!("province_{n}.geojson")))?;
            districts.push((ProvinceId(n), value));
        }
        let districts: Vec<(ProvinceId, &Value)> =
            districts.iter().map(|(id, v)| (*id, v)).collect();
        Self::from_values(&provinces, &districts)
    }

    /// Build an atlas from in-memory GeoJSON values. `districts` pairs each
    /// dataset with the province that owns it.
    pub fn from_values(provinces: &Value, districts: &[(ProvinceId, &Value)]) -> Result<Self> {
        let mut province_features = Vec::new();
        for feature in parse_feature_collection(provinces)? {
            let id = property_number(feature.properties, PROVINCE_KEYS)
                .ok_or_else(|| anyhow!("Province feature has no usable province number"))?;
            let bounds = feature
                .geometry
                .bounding_rect()
                .ok_or_else(|| anyhow!("Province {id} feature has no extent"))?;
            province_features.push(ProvinceFeature {
                id: ProvinceId(id),
                geometry: feature.geometry,
                bounds,
            });
        }

        let mut district_index: AHashMap<ProvinceId, Vec<DistrictFeature>> = AHashMap::new();
        for (owner, value) in districts {
            let mut set = Vec::new();
            for feature in parse_feature_collection(value)
                .with_context(|| format!("District dataset for province {owner}"))?
            {
                let name: Arc<str> = property_string(feature.properties, DISTRICT_KEYS)
                    .unwrap_or("Unknown District")
                    .into();
                let province = property_number(feature.properties, PROVINCE_KEYS)
                    .map(ProvinceId)
                    .unwrap_or(*owner);
                let bounds = feature.geometry.bounding_rect().ok_or_else(|| {
                    anyhow!("District {name} in province {owner} has no extent")
                })?;
                set.push(DistrictFeature {
                    name,
                    province,
                    geometry: feature.geometry,
                    bounds,
                });
            }
            district_index.insert(*owner, set);
        }

        Ok(Self {
            provinces: province_features,
            districts: district_index,
        })
    }

    pub fn provinces(&self) -> &[ProvinceFeature] {
        &self.provinces
    }

    pub fn province(&self, id: ProvinceId) -> Option<&ProvinceFeature> {
        self.provinces.iter().find(|p| p.id == id)
    }

    /// District set of a province; empty for provinces the atlas has no
    /// dataset for (an unknown id is not an error here).
    pub fn districts(&self, id: ProvinceId) -> &[DistrictFeature] {
        self.districts.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Union of all province bounds, `None` for an empty atlas.
    pub fn country_bounds(&self) -> Option<Rect<f64>> {
        let mut bounds: Option<Rect<f64>> = None;
        for province in &self.provinces {
            bounds = Some(match bounds {
                None => province.bounds,
                Some(acc) => union(acc, province.bounds),
            });
        }
        bounds
    }
}

fn union(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        geo::Coord {
            x: a.min().x.min(b.min().x),
            y: a.min().y.min(b.min().y),
        },
        geo::Coord {
            x: a.max().x.max(b.max().x),
            y: a.max().y.max(b.max().y),
        },
    )
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn feature(props: Value, x: f64, y: f64) -> Value {
        json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0], [x, y]]]
            },
            "properties": props
        })
    }

    fn collection(features: Vec<Value>) -> Value {
        json!({ "type": "FeatureCollection", "features": features })
    }

    #[test]
    fn normalizes_property_key_variants() {
        let provinces = collection(vec![
            feature(json!({ "Province": 1 }), 0.0, 0.0),
            feature(json!({ "PROVINCE": "2" }), 2.0, 0.0),
        ]);
        let d1 = collection(vec![feature(json!({ "DISTRICT": "Morang" }), 0.0, 0.0)]);
        let d2 = collection(vec![feature(json!({ "NAME": "Siraha", "PROVINCE": 2 }), 2.0, 0.0)]);
        let atlas = Atlas::from_values(
            &provinces,
            &[(ProvinceId(1), &d1), (ProvinceId(2), &d2)],
        )
        .unwrap();

        assert_eq!(atlas.provinces().len(), 2);
        assert!(atlas.province(ProvinceId(2)).is_some());

        let morang = &atlas.districts(ProvinceId(1))[0];
        assert_eq!(&*morang.name, "Morang");
        assert_eq!(morang.province, ProvinceId(1)); // owning province fallback

        let siraha = &atlas.districts(ProvinceId(2))[0];
        assert_eq!(&*siraha.name, "Siraha");
        assert_eq!(siraha.province, ProvinceId(2));
    }

    #[test]
    fn district_without_name_gets_placeholder() {
        let provinces = collection(vec![feature(json!({ "Province": 1 }), 0.0, 0.0)]);
        let d1 = collection(vec![feature(json!({}), 0.0, 0.0)]);
        let atlas = Atlas::from_values(&provinces, &[(ProvinceId(1), &d1)]).unwrap();
        assert_eq!(&*atlas.districts(ProvinceId(1))[0].name, "Unknown District");
    }

    #[test]
    fn province_without_number_fails_fast() {
        let provinces = collection(vec![feature(json!({ "name": "nameless" }), 0.0, 0.0)]);
        assert!(Atlas::from_values(&provinces, &[]).is_err());
    }

    #[test]
    fn unknown_province_has_empty_district_slice() {
        let provinces = collection(vec![feature(json!({ "Province": 1 }), 0.0, 0.0)]);
        let atlas = Atlas::from_values(&provinces, &[]).unwrap();
        assert!(atlas.districts(ProvinceId(9)).is_empty());
    }

    #[test]
    fn country_bounds_is_the_union_of_province_bounds() {
        let provinces = collection(vec![
            feature(json!({ "Province": 1 }), 0.0, 0.0),
            feature(json!({ "Province": 2 }), 4.0, 3.0),
        ]);
        let atlas = Atlas::from_values(&provinces, &[]).unwrap();
        let bounds = atlas.country_bounds().unwrap();
        assert_eq!(bounds.min(), geo::Coord { x: 0.0, y: 0.0 });
        assert_eq!(bounds.max(), geo::Coord { x: 5.0, y: 4.0 });
    }
}
