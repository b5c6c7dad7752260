mod controller;
pub mod panel;

pub use controller::{MapViewController, Selection, ViewLevel};
pub use panel::{CountryStats, DistrictFacts, NullPanel, PanelSink, PanelView, ProvinceFacts};
