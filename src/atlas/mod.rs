mod atlas;
mod feature;
mod geojson;

pub use atlas::Atlas;
pub use feature::{DistrictFeature, ProvinceFeature};
