mod district;
mod province;

pub use district::district_headquarters;
pub use province::{
    FALLBACK_FILL, ProvinceId, province_capital, province_color, province_display_name,
    province_fill, province_name,
};
