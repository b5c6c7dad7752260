mod style;
mod svg;

use std::sync::Arc;

use geo::{MultiPolygon, Rect};

pub use style::ShapeStyle;
pub use svg::SvgSurface;

use crate::geography::ProvinceId;

/// Handle to one shape on the map, at either administrative level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShapeId {
    Province(ProvinceId),
    District(Arc<str>),
}

/// Interaction events a frontend delivers to the view controller, carrying
/// the originating shape.
#[derive(Debug, Clone)]
pub enum MapEvent {
    HoverEnter(ShapeId),
    HoverLeave(ShapeId),
    Click(ShapeId),
}

/// Everything the surface needs to materialize one shape. A label, when
/// given, is bound permanent and starts open.
#[derive(Debug, Clone)]
pub struct ShapeSeed {
    pub id: ShapeId,
    pub geometry: MultiPolygon<f64>,
    pub style: ShapeStyle,
    pub label: Option<String>,
}

/// The rendering-engine contract the view controller drives. The engine owns
/// the viewport and the shapes; the controller addresses shapes by id and
/// never sees geometry again after seeding a layer.
pub trait MapSurface {
    /// Install the country-wide province layer. Called once at startup.
    fn set_province_layer(&mut self, shapes: Vec<ShapeSeed>);

    /// Replace the district layer wholesale. The layer sits above the
    /// province layer.
    fn replace_district_layer(&mut self, shapes: Vec<ShapeSeed>);

    fn clear_district_layer(&mut self);

    fn district_count(&self) -> usize;

    /// Fit the viewport to the given lon/lat bounds.
    fn fit_bounds(&mut self, bounds: Rect<f64>);

    fn set_style(&mut self, id: &ShapeId, style: ShapeStyle);

    /// Raise a shape above its layer siblings.
    fn bring_to_front(&mut self, id: &ShapeId);

    /// Engines that mishandle reordering return false and the controller
    /// skips `bring_to_front` on hover.
    fn supports_reordering(&self) -> bool {
        true
    }

    fn open_label(&mut self, id: &ShapeId);

    fn close_label(&mut self, id: &ShapeId);

    /// Show or hide the return-to-overview control.
    fn set_reset_visible(&mut self, visible: bool);
}
