use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use geo::{BoundingRect, Centroid, Coord, LineString, Rect};

use super::{MapSurface, ShapeId, ShapeSeed, ShapeStyle};

#[derive(Debug)]
struct Label {
    text: String,
    open: bool,
}

#[derive(Debug)]
struct Shape {
    id: ShapeId,
    geometry: geo::MultiPolygon<f64>,
    style: ShapeStyle,
    label: Option<Label>,
}

impl Shape {
    fn new(seed: ShapeSeed) -> Self {
        Self {
            id: seed.id,
            geometry: seed.geometry,
            style: seed.style,
            label: seed.label.map(|text| Label { text, open: true }),
        }
    }
}

/// A `MapSurface` that retains shapes and renders the current view to an SVG
/// file on demand. Z-order within a layer follows insertion order;
/// `bring_to_front` moves a shape to the end of its layer.
#[derive(Debug)]
pub struct SvgSurface {
    provinces: Vec<Shape>,
    districts: Vec<Shape>,
    viewport: Option<Rect<f64>>,
    reset_visible: bool,
    width: f64,
    margin: f64,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::with_size(1200, 10)
    }

    pub fn with_size(width: i32, margin: i32) -> Self {
        Self {
            provinces: Vec::new(),
            districts: Vec::new(),
            viewport: None,
            reset_visible: false,
            width: width as f64,
            margin: margin as f64,
        }
    }

    pub fn reset_visible(&self) -> bool {
        self.reset_visible
    }

    /// Render the current view. The canvas covers the fitted viewport, or
    /// the extent of every shape when nothing has been fitted yet.
    pub fn to_svg(&self, path: &Path) -> Result<()> {
        let bounds = self
            .viewport
            .or_else(|| self.scene_bounds())
            .ok_or_else(|| anyhow!("[to_svg] Could not determine bounds; nothing to draw."))?;
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(anyhow!("[to_svg] Degenerate bounds; nothing to draw."));
        }

        let margin = self.margin;
        let width = self.width;
        let scale = (width - 2.0 * margin) / bounds.width();
        let height = bounds.height() * scale + 2.0 * margin;

        // lon/lat -> SVG coords (Y down)
        let project = move |coord: &Coord<f64>| -> (f64, f64) {
            let x = margin + (coord.x - bounds.min().x) * scale;
            let y = margin + (bounds.max().y - coord.y) * scale;
            (x, y)
        };

        let mut writer = SvgWriter::new(path)?;
        writer.write_header(width, height, &bounds)?;
        writer.write_styles()?;

        for shape in self.provinces.iter().chain(self.districts.iter()) {
            let mut d = String::new();
            for polygon in shape.geometry.0.iter() {
                ring_to_path(polygon.exterior(), &project, &mut d);
                for hole in polygon.interiors() {
                    ring_to_path(hole, &project, &mut d);
                }
            }
            writeln!(
                writer,
                r#"<path class="shape" fill-rule="evenodd" style="{}" d="{d}"/>"#,
                style_attr(&shape.style),
            )?;
        }

        for shape in self.provinces.iter().chain(self.districts.iter()) {
            let Some(label) = shape.label.as_ref().filter(|l| l.open) else {
                continue;
            };
            let anchor = shape
                .geometry
                .centroid()
                .map(|p| p.0)
                .or_else(|| shape.geometry.bounding_rect().map(|r| r.center()));
            if let Some(anchor) = anchor {
                let (x, y) = project(&anchor);
                writeln!(
                    writer,
                    r#"<text class="label" x="{x:.2}" y="{y:.2}" text-anchor="middle">{}</text>"#,
                    label.text,
                )?;
            }
        }

        writer.write_footer()?;
        writer.flush()?;
        Ok(())
    }

    fn scene_bounds(&self) -> Option<Rect<f64>> {
        let mut bounds: Option<Rect<f64>> = None;
        for shape in self.provinces.iter().chain(self.districts.iter()) {
            let Some(rect) = shape.geometry.bounding_rect() else {
                continue;
            };
            bounds = Some(match bounds {
                None => rect,
                Some(acc) => Rect::new(
                    Coord {
                        x: acc.min().x.min(rect.min().x),
                        y: acc.min().y.min(rect.min().y),
                    },
                    Coord {
                        x: acc.max().x.max(rect.max().x),
                        y: acc.max().y.max(rect.max().y),
                    },
                ),
            });
        }
        bounds
    }

    fn find_mut(&mut self, id: &ShapeId) -> Option<&mut Shape> {
        self.districts
            .iter_mut()
            .chain(self.provinces.iter_mut())
            .find(|shape| shape.id == *id)
    }
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface for SvgSurface {
    fn set_province_layer(&mut self, shapes: Vec<ShapeSeed>) {
        self.provinces = shapes.into_iter().map(Shape::new).collect();
    }

    fn replace_district_layer(&mut self, shapes: Vec<ShapeSeed>) {
        self.districts = shapes.into_iter().map(Shape::new).collect();
    }

    fn clear_district_layer(&mut self) {
        self.districts.clear();
    }

    fn district_count(&self) -> usize {
        self.districts.len()
    }

    fn fit_bounds(&mut self, bounds: Rect<f64>) {
        self.viewport = Some(bounds);
    }

    fn set_style(&mut self, id: &ShapeId, style: ShapeStyle) {
        if let Some(shape) = self.find_mut(id) {
            shape.style = style;
        }
    }

    fn bring_to_front(&mut self, id: &ShapeId) {
        for layer in [&mut self.provinces, &mut self.districts] {
            if let Some(pos) = layer.iter().position(|shape| shape.id == *id) {
                let shape = layer.remove(pos);
                layer.push(shape);
                return;
            }
        }
    }

    fn open_label(&mut self, id: &ShapeId) {
        if let Some(label) = self.find_mut(id).and_then(|s| s.label.as_mut()) {
            label.open = true;
        }
    }

    fn close_label(&mut self, id: &ShapeId) {
        if let Some(label) = self.find_mut(id).and_then(|s| s.label.as_mut()) {
            label.open = false;
        }
    }

    fn set_reset_visible(&mut self, visible: bool) {
        self.reset_visible = visible;
    }
}

fn style_attr(style: &ShapeStyle) -> String {
    let mut attr = format!(
        "fill:{};fill-opacity:{};stroke:{};stroke-width:{}",
        style.fill_color, style.fill_opacity, style.color, style.weight,
    );
    if !style.dash_array.is_empty() {
        attr.push_str(";stroke-dasharray:");
        attr.push_str(style.dash_array);
    }
    attr
}

fn ring_to_path(ring: &LineString<f64>, project: &impl Fn(&Coord<f64>) -> (f64, f64), out: &mut String) {
    for (i, coord) in ring.coords().enumerate() {
        let (x, y) = project(coord);
        let op = if i == 0 { 'M' } else { 'L' };
        out.push_str(&format!("{op}{x:.2} {y:.2} "));
    }
    out.push_str("Z ");
}

struct SvgWriter {
    writer: BufWriter<File>,
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for SvgWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.writer.write_all(buf)
    }
}

impl SvgWriter {
    fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("[to_svg] Failed to create {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    fn write_header(&mut self, width: f64, height: f64, bounds: &Rect<f64>) -> Result<()> {
        writeln!(self, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
        writeln!(
            self,
            r##"<svg xmlns="http://www.w3.org/2000/svg"
            width="{width}" height="{height:.2}"
            viewBox="0 0 {width} {height:.2}"
            data-lon-min="{lon_min}" data-lon-max="{lon_max}"
            data-lat-min="{lat_min}" data-lat-max="{lat_max}">"##,
            lon_min = bounds.min().x,
            lon_max = bounds.max().x,
            lat_min = bounds.min().y,
            lat_max = bounds.max().y,
        )?;
        writeln!(self, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
        Ok(())
    }

    fn write_styles(&mut self) -> Result<()> {
        writeln!(
            self,
            r##"<defs>
<style>
    .shape {{ vector-effect: non-scaling-stroke; }}
    .label {{ font: 12px sans-serif; fill: #111827; paint-order: stroke; stroke: #ffffff; stroke-width: 3px; }}
</style>
</defs>"##
        )?;
        Ok(())
    }

    fn write_footer(&mut self) -> Result<()> {
        writeln!(self, "</svg>")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use geo::{MultiPolygon, Polygon, polygon};

    use super::*;

    fn square(x: f64, y: f64) -> MultiPolygon<f64> {
        let poly: Polygon<f64> = polygon![
            (x: x, y: y),
            (x: x + 1.0, y: y),
            (x: x + 1.0, y: y + 1.0),
            (x: x, y: y + 1.0),
        ];
        MultiPolygon(vec![poly])
    }

    fn seed(id: ShapeId, fill: &'static str, label: Option<&str>, x: f64) -> ShapeSeed {
        ShapeSeed {
            id,
            geometry: square(x, 0.0),
            style: ShapeStyle::base(fill),
            label: label.map(str::to_owned),
        }
    }

    fn province_id(n: u8) -> ShapeId {
        ShapeId::Province(crate::geography::ProvinceId(n))
    }

    #[test]
    fn renders_shapes_and_open_labels() {
        let mut surface = SvgSurface::with_size(100, 2);
        surface.set_province_layer(vec![
            seed(province_id(1), "red", Some("Province 1"), 0.0),
            seed(province_id(2), "green", Some("Madhesh Province"), 2.0),
        ]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.svg");
        surface.to_svg(&path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("fill:red"));
        assert!(svg.contains("fill:green"));
        assert!(svg.contains(">Province 1</text>"));
        assert!(svg.contains(">Madhesh Province</text>"));
    }

    #[test]
    fn closed_labels_are_not_rendered() {
        let mut surface = SvgSurface::with_size(100, 2);
        surface.set_province_layer(vec![seed(province_id(1), "red", Some("Province 1"), 0.0)]);
        surface.close_label(&province_id(1));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.svg");
        surface.to_svg(&path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(!svg.contains("</text>"));
    }

    #[test]
    fn bring_to_front_reorders_within_the_layer() {
        let mut surface = SvgSurface::with_size(100, 2);
        surface.set_province_layer(vec![
            seed(province_id(1), "red", None, 0.0),
            seed(province_id(2), "green", None, 2.0),
        ]);
        surface.bring_to_front(&province_id(1));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.svg");
        surface.to_svg(&path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        let red = svg.find("fill:red").unwrap();
        let green = svg.find("fill:green").unwrap();
        assert!(green < red, "front shape must be drawn last");
    }

    #[test]
    fn district_layer_is_replaced_wholesale() {
        let mut surface = SvgSurface::new();
        surface.replace_district_layer(vec![
            seed(ShapeId::District("Kathmandu".into()), "blue", None, 0.0),
            seed(ShapeId::District("Lalitpur".into()), "blue", None, 2.0),
        ]);
        assert_eq!(surface.district_count(), 2);

        surface.replace_district_layer(vec![seed(
            ShapeId::District("Kaski".into()),
            "lightblue",
            None,
            0.0,
        )]);
        assert_eq!(surface.district_count(), 1);

        surface.clear_district_layer();
        assert_eq!(surface.district_count(), 0);
    }

    #[test]
    fn empty_surface_refuses_to_render() {
        let surface = SvgSurface::new();
        let dir = tempfile::tempdir().unwrap();
        assert!(surface.to_svg(&dir.path().join("map.svg")).is_err());
    }
}
