use anyhow::Result;

use crate::cli::{Cli, InfoArgs};
use crate::geography::{self, ProvinceId};
use crate::view::panel::{self, DistrictFacts, PanelView, ProvinceFacts};

pub fn run(cli: &Cli, args: &InfoArgs) -> Result<()> {
    let id = ProvinceId(args.province);
    if cli.verbose > 0 {
        eprintln!("[info] province={id} district={:?}", args.district);
    }

    let view = match &args.district {
        Some(district) => PanelView::District(DistrictFacts {
            name: district.clone(),
            province: geography::province_display_name(id),
            province_number: id,
            headquarters: geography::district_headquarters(district).to_owned(),
            color: geography::province_fill(id),
        }),
        None => PanelView::Province(ProvinceFacts {
            name: geography::province_display_name(id),
            number: id,
            capital: geography::province_capital(id),
            color: geography::province_fill(id),
        }),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", panel::render(&view));
    }
    Ok(())
}
