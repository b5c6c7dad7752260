use std::sync::Arc;

use geo::{MultiPolygon, Rect};

use crate::geography::ProvinceId;

/// A province boundary, normalized at load time. The display name and fill
/// color are derived from the id through the lookup tables, not stored.
#[derive(Debug, Clone)]
pub struct ProvinceFeature {
    pub id: ProvinceId,
    pub geometry: MultiPolygon<f64>,
    pub bounds: Rect<f64>,
}

/// A district boundary, normalized at load time: the name is resolved from
/// whichever property the source dataset used, and the parent province is
/// always present (falling back to the dataset's owning province).
#[derive(Debug, Clone)]
pub struct DistrictFeature {
    pub name: Arc<str>,
    pub province: ProvinceId,
    pub geometry: MultiPolygon<f64>,
    pub bounds: Rect<f64>,
}
