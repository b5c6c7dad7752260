use std::sync::Arc;

use crate::atlas::{Atlas, DistrictFeature};
use crate::geography::{self, ProvinceId};
use crate::surface::{MapEvent, MapSurface, ShapeId, ShapeSeed, ShapeStyle};

use super::panel::{self, CountryStats, DistrictFacts, PanelSink, PanelView, ProvinceFacts};

/// Which administrative level the map currently shows. Always exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewLevel {
    CountryOverview,
    ProvinceDetail(ProvinceId),
}

/// The region the user most recently selected, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Province(ProvinceId),
    District { name: Arc<str>, province: ProvinceId },
}

/// Single owner of all view state: the current level and selection, the
/// last-clicked province, the data provider, the rendering surface and the
/// info-panel sink. Every interaction callback goes through one of its
/// methods and runs to completion, so the at-most-one-district-layer
/// invariant holds by construction.
pub struct MapViewController<S: MapSurface, P: PanelSink> {
    atlas: Atlas,
    surface: S,
    panel: P,
    level: ViewLevel,
    selection: Option<Selection>,
    last_clicked: Option<ProvinceId>,
}

impl<S: MapSurface, P: PanelSink> MapViewController<S, P> {
    /// Install the province layer with permanent labels, fit the country
    /// bounds and show the welcome summary.
    pub fn new(atlas: Atlas, mut surface: S, mut panel: P) -> Self {
        let seeds: Vec<ShapeSeed> = atlas
            .provinces()
            .iter()
            .map(|province| ShapeSeed {
                id: ShapeId::Province(province.id),
                geometry: province.geometry.clone(),
                style: ShapeStyle::base(geography::province_fill(province.id)),
                label: Some(geography::province_display_name(province.id)),
            })
            .collect();
        surface.set_province_layer(seeds);
        if let Some(bounds) = atlas.country_bounds() {
            surface.fit_bounds(bounds);
        }
        surface.set_reset_visible(false);
        panel.replace_content(panel::render(&PanelView::Welcome(CountryStats::default())));

        Self {
            atlas,
            surface,
            panel,
            level: ViewLevel::CountryOverview,
            selection: None,
            last_clicked: None,
        }
    }

    pub fn level(&self) -> ViewLevel {
        self.level
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Dispatch one interaction event. Runs synchronously to completion.
    pub fn handle(&mut self, event: MapEvent) {
        match event {
            MapEvent::Click(ShapeId::Province(id)) => self.select_province(id),
            MapEvent::Click(ShapeId::District(name)) => self.select_district(&name),
            MapEvent::HoverEnter(id) => self.hover_enter(&id),
            MapEvent::HoverLeave(id) => self.hover_leave(&id),
        }
    }

    /// Zoom into a province and load its districts. Valid from any state;
    /// unknown ids degrade to an empty district set and still transition.
    pub fn select_province(&mut self, id: ProvinceId) {
        // Durable hide for the clicked province's label only; every other
        // province keeps its label.
        let province_ids: Vec<ProvinceId> =
            self.atlas.provinces().iter().map(|p| p.id).collect();
        for pid in province_ids {
            let shape = ShapeId::Province(pid);
            if pid == id {
                self.surface.close_label(&shape);
            } else {
                self.surface.open_label(&shape);
            }
        }

        let bounds = self.atlas.province(id).map(|p| p.bounds);
        if let Some(bounds) = bounds {
            self.surface.fit_bounds(bounds);
        }

        self.surface.clear_district_layer();
        self.surface.set_reset_visible(true);

        let facts = ProvinceFacts {
            name: geography::province_display_name(id),
            number: id,
            capital: geography::province_capital(id),
            color: geography::province_fill(id),
        };
        self.panel
            .replace_content(panel::render(&PanelView::Province(facts)));

        let seeds: Vec<ShapeSeed> = self
            .atlas
            .districts(id)
            .iter()
            .map(district_seed)
            .collect();
        self.surface.replace_district_layer(seeds);

        // If another province was clicked before, its label comes back.
        if let Some(previous) = self.last_clicked {
            if previous != id {
                self.surface.open_label(&ShapeId::Province(previous));
            }
        }

        self.last_clicked = Some(id);
        self.level = ViewLevel::ProvinceDetail(id);
        self.selection = Some(Selection::Province(id));
    }

    /// Show a district's facts in the panel. Only meaningful inside a
    /// province detail view; silently ignored at the country overview.
    /// Changes neither the level nor any layer.
    pub fn select_district(&mut self, name: &str) {
        let ViewLevel::ProvinceDetail(current) = self.level else {
            return;
        };
        let province = self.loaded_district_province(name).unwrap_or(current);
        let facts = DistrictFacts {
            name: name.to_owned(),
            province: geography::province_display_name(province),
            province_number: province,
            headquarters: geography::district_headquarters(name).to_owned(),
            color: geography::province_fill(province),
        };
        self.panel
            .replace_content(panel::render(&PanelView::District(facts)));
        self.selection = Some(Selection::District {
            name: name.into(),
            province,
        });
    }

    /// Return to the country overview: discard districts, restore all
    /// province labels, hide the reset control, show the welcome summary.
    pub fn reset(&mut self) {
        self.surface.clear_district_layer();
        if let Some(bounds) = self.atlas.country_bounds() {
            self.surface.fit_bounds(bounds);
        }
        let province_ids: Vec<ProvinceId> =
            self.atlas.provinces().iter().map(|p| p.id).collect();
        for pid in province_ids {
            self.surface.open_label(&ShapeId::Province(pid));
        }
        self.surface.set_reset_visible(false);
        self.panel
            .replace_content(panel::render(&PanelView::Welcome(CountryStats::default())));
        self.level = ViewLevel::CountryOverview;
        self.selection = None;
    }

    fn hover_enter(&mut self, id: &ShapeId) {
        match id {
            ShapeId::Province(_) => {
                self.surface.set_style(id, ShapeStyle::province_highlight());
                if self.surface.supports_reordering() {
                    self.surface.bring_to_front(id);
                }
                // Transient reveal, even for a label hidden by a click.
                self.surface.open_label(id);
            }
            ShapeId::District(_) => {
                self.surface.set_style(id, ShapeStyle::district_highlight());
            }
        }
    }

    fn hover_leave(&mut self, id: &ShapeId) {
        match id {
            ShapeId::Province(pid) => {
                self.surface
                    .set_style(id, ShapeStyle::base(geography::province_fill(*pid)));
                // With no districts loaded the map is in full view and
                // labels stay shown; otherwise the transient reveal ends.
                if self.surface.district_count() == 0 {
                    self.surface.open_label(id);
                } else {
                    self.surface.close_label(id);
                }
            }
            ShapeId::District(name) => {
                let fill = match self.level {
                    ViewLevel::ProvinceDetail(current) => geography::province_fill(
                        self.loaded_district_province(name).unwrap_or(current),
                    ),
                    ViewLevel::CountryOverview => geography::FALLBACK_FILL,
                };
                self.surface.set_style(id, ShapeStyle::base(fill));
            }
        }
    }

    /// Parent province of a district in the currently loaded set.
    fn loaded_district_province(&self, name: &str) -> Option<ProvinceId> {
        let ViewLevel::ProvinceDetail(current) = self.level else {
            return None;
        };
        self.atlas
            .districts(current)
            .iter()
            .find(|d| &*d.name == name)
            .map(|d| d.province)
    }
}

fn district_seed(district: &DistrictFeature) -> ShapeSeed {
    ShapeSeed {
        id: ShapeId::District(district.name.clone()),
        geometry: district.geometry.clone(),
        style: ShapeStyle::base(geography::province_fill(district.province)),
        label: Some(district.name.to_string()),
    }
}
