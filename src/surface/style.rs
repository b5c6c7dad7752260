/// Stroke and fill of one shape. All values come from the three fixed styles
/// below; fills vary only by province color.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub weight: f64,
    pub color: &'static str,
    pub dash_array: &'static str,
    pub fill_opacity: f64,
    pub fill_color: &'static str,
}

impl ShapeStyle {
    /// Default choropleth style, filled with the owning province's color.
    pub fn base(fill_color: &'static str) -> Self {
        Self {
            weight: 2.0,
            color: "#FFF",
            dash_array: "1",
            fill_opacity: 0.7,
            fill_color,
        }
    }

    /// Hover emphasis for province shapes.
    pub fn province_highlight() -> Self {
        Self {
            weight: 2.0,
            color: "black",
            dash_array: "",
            fill_opacity: 0.7,
            fill_color: "#fff",
        }
    }

    /// Hover emphasis for district shapes.
    pub fn district_highlight() -> Self {
        Self {
            weight: 2.0,
            color: "#667eea",
            dash_array: "",
            fill_opacity: 0.6,
            fill_color: "#e8f4f8",
        }
    }
}
