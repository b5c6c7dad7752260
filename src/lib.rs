#![doc = "Nepal Atlas public API"]
mod atlas;
mod geography;
mod surface;
mod view;

pub mod cli;
pub mod commands;

#[doc(inline)]
pub use atlas::{Atlas, DistrictFeature, ProvinceFeature};

#[doc(inline)]
pub use geography::{
    FALLBACK_FILL, ProvinceId, district_headquarters, province_capital, province_color,
    province_display_name, province_fill, province_name,
};

#[doc(inline)]
pub use surface::{MapEvent, MapSurface, ShapeId, ShapeSeed, ShapeStyle, SvgSurface};

#[doc(inline)]
pub use view::{
    CountryStats, DistrictFacts, MapViewController, NullPanel, PanelSink, PanelView,
    ProvinceFacts, Selection, ViewLevel,
};
