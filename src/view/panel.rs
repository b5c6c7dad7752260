use serde::Serialize;

use crate::geography::ProvinceId;

/// Country-level summary shown when nothing is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryStats {
    pub provinces: u32,
    pub districts: u32,
    pub municipalities: u32,
    pub wards: u32,
}

impl Default for CountryStats {
    fn default() -> Self {
        Self {
            provinces: 7,
            districts: 77,
            municipalities: 753,
            wards: 6743,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvinceFacts {
    pub name: String,
    pub number: ProvinceId,
    pub capital: Option<&'static str>,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistrictFacts {
    pub name: String,
    pub province: String,
    pub province_number: ProvinceId,
    pub headquarters: String,
    pub color: &'static str,
}

/// What the info panel should currently describe.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelView {
    Welcome(CountryStats),
    Province(ProvinceFacts),
    District(DistrictFacts),
}

/// Where rendered panel content goes. The panel has no state of its own;
/// every update replaces the previous content wholesale.
pub trait PanelSink {
    fn replace_content(&mut self, content: String);
}

impl PanelSink for String {
    fn replace_content(&mut self, content: String) {
        *self = content;
    }
}

/// Sink for environments without a panel target: drops content silently.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPanel;

impl PanelSink for NullPanel {
    fn replace_content(&mut self, _content: String) {}
}

/// Produce the full panel content for a view. Pure; the only fallback applied
/// here is the "Unknown" capital placeholder.
pub fn render(view: &PanelView) -> String {
    match view {
        PanelView::Welcome(stats) => format!(
            "<div class=\"welcome-info\">\n\
             <h5>Welcome to Nepal</h5>\n\
             <p>Explore Nepal's administrative divisions by clicking on provinces to see districts.</p>\n\
             <div class=\"stats-grid\">\n\
             {}{}{}{}</div>\n\
             </div>\n",
            stat_card(stats.provinces, "Provinces"),
            stat_card(stats.districts, "Districts"),
            stat_card(stats.municipalities, "Municipalities"),
            stat_card(stats.wards, "Wards"),
        ),
        PanelView::Province(facts) => format!(
            "<div class=\"province-info\">\n\
             <div class=\"info-title\" style=\"background: {color};\">\n\
             <h5>{name}</h5>\n\
             <small>Province {number}</small>\n\
             </div>\n\
             {capital}{province}\
             <p class=\"instruction\">Click on districts within this province to see detailed information</p>\n\
             </div>\n",
            color = facts.color,
            name = facts.name,
            number = facts.number,
            capital = detail_item("Capital", facts.capital.unwrap_or("Unknown")),
            province = detail_item("Province", &format!("Province {}", facts.number)),
        ),
        PanelView::District(facts) => format!(
            "<div class=\"district-info\">\n\
             <div class=\"info-title\" style=\"background: {color};\">\n\
             <h5>{name} District</h5>\n\
             <small>{province}</small>\n\
             </div>\n\
             {headquarters}{province_item}{number}\
             </div>\n",
            color = facts.color,
            name = facts.name,
            province = facts.province,
            headquarters = detail_item("Headquarters", &facts.headquarters),
            province_item = detail_item("Province", &facts.province),
            number = detail_item("Province No", &facts.province_number.to_string()),
        ),
    }
}

fn stat_card(value: u32, label: &str) -> String {
    format!(
        "<div class=\"stat-card\"><div class=\"stat-number\">{}</div><div class=\"stat-label\">{label}</div></div>\n",
        group_thousands(value),
    )
}

fn detail_item(label: &str, value: &str) -> String {
    format!(
        "<div class=\"detail-item\"><span class=\"label\">{label}:</span> <span class=\"value\">{value}</span></div>\n",
    )
}

/// "6743" -> "6,743"
fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_panel_carries_the_literal_country_stats() {
        let html = render(&PanelView::Welcome(CountryStats::default()));
        assert!(html.contains("Welcome to Nepal"));
        for stat in [">7<", ">77<", ">753<", ">6,743<"] {
            assert!(html.contains(stat), "missing {stat}");
        }
    }

    #[test]
    fn province_panel_shows_name_capital_and_number() {
        let html = render(&PanelView::Province(ProvinceFacts {
            name: "Bagmati Province".into(),
            number: ProvinceId(3),
            capital: Some("Hetauda"),
            color: "blue",
        }));
        assert!(html.contains("Bagmati Province"));
        assert!(html.contains("Hetauda"));
        assert!(html.contains("Province 3"));
        assert!(html.contains("background: blue"));
    }

    #[test]
    fn missing_capital_renders_the_unknown_placeholder() {
        let html = render(&PanelView::Province(ProvinceFacts {
            name: "Province 9".into(),
            number: ProvinceId(9),
            capital: None,
            color: "skyblue",
        }));
        assert!(html.contains("Unknown"));
        assert!(html.contains("Province 9"));
    }

    #[test]
    fn district_panel_shows_headquarters_and_parent_province() {
        let html = render(&PanelView::District(DistrictFacts {
            name: "Chitwan".into(),
            province: "Bagmati Province".into(),
            province_number: ProvinceId(3),
            headquarters: "Bharatpur".into(),
            color: "blue",
        }));
        assert!(html.contains("Chitwan District"));
        assert!(html.contains("Bharatpur"));
        assert!(html.contains("Bagmati Province"));
        assert!(html.contains("Province No"));
    }

    #[test]
    fn string_sink_is_replaced_wholesale() {
        let mut sink = String::from("old content");
        sink.replace_content("new".to_owned());
        assert_eq!(sink, "new");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(7), "7");
        assert_eq!(group_thousands(753), "753");
        assert_eq!(group_thousands(6743), "6,743");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
