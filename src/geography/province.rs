use std::fmt;

use serde::Serialize;

/// Identifier of a first-level administrative division (1..=7 for the seven
/// federal provinces). Ids outside that range are still representable; every
/// lookup below stays total for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProvinceId(pub u8);

impl fmt::Display for ProvinceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Official name of a province, `None` outside 1..=7.
pub fn province_name(id: ProvinceId) -> Option<&'static str> {
    match id.0 {
        1 => Some("Province 1"),
        2 => Some("Madhesh Province"),
        3 => Some("Bagmati Province"),
        4 => Some("Gandaki Province"),
        5 => Some("Lumbini Province"),
        6 => Some("Karnali Province"),
        7 => Some("Sudurpashchim Province"),
        _ => None,
    }
}

/// Display name with the `"Province {n}"` fallback for unknown ids.
pub fn province_display_name(id: ProvinceId) -> String {
    match province_name(id) {
        Some(name) => name.to_owned(),
        None => format!("Province {id}"),
    }
}

/// Choropleth fill color of a province, `None` outside 1..=7.
pub fn province_color(id: ProvinceId) -> Option<&'static str> {
    match id.0 {
        1 => Some("red"),
        2 => Some("green"),
        3 => Some("blue"),
        4 => Some("lightblue"),
        5 => Some("lightgreen"),
        6 => Some("yellow"),
        7 => Some("orange"),
        _ => None,
    }
}

/// Fill color used for shapes of unknown provinces.
pub const FALLBACK_FILL: &str = "skyblue";

/// Fill color with the fallback applied.
pub fn province_fill(id: ProvinceId) -> &'static str {
    province_color(id).unwrap_or(FALLBACK_FILL)
}

/// Capital city of a province, `None` outside 1..=7. The "Unknown"
/// placeholder is applied where facts are rendered, not here.
pub fn province_capital(id: ProvinceId) -> Option<&'static str> {
    match id.0 {
        1 => Some("Biratnagar"),
        2 => Some("Janakpur"),
        3 => Some("Hetauda"),
        4 => Some("Pokhara"),
        5 => Some("Deukhuri"),
        6 => Some("Birendranagar"),
        7 => Some("Godawari"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_cover_all_seven_provinces() {
        for n in 1..=7 {
            assert!(province_name(ProvinceId(n)).is_some());
        }
        assert_eq!(province_name(ProvinceId(3)), Some("Bagmati Province"));
        assert_eq!(province_name(ProvinceId(7)), Some("Sudurpashchim Province"));
    }

    #[test]
    fn display_name_falls_back_to_number() {
        assert_eq!(province_display_name(ProvinceId(2)), "Madhesh Province");
        assert_eq!(province_display_name(ProvinceId(0)), "Province 0");
        assert_eq!(province_display_name(ProvinceId(9)), "Province 9");
    }

    #[test]
    fn colors_cover_all_seven_provinces() {
        for n in 1..=7 {
            assert!(province_color(ProvinceId(n)).is_some());
        }
        assert_eq!(province_fill(ProvinceId(1)), "red");
        assert_eq!(province_fill(ProvinceId(9)), FALLBACK_FILL);
    }

    #[test]
    fn capitals_are_optional_outside_range() {
        assert_eq!(province_capital(ProvinceId(3)), Some("Hetauda"));
        assert_eq!(province_capital(ProvinceId(5)), Some("Deukhuri"));
        assert_eq!(province_capital(ProvinceId(8)), None);
    }
}
