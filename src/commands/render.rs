use anyhow::{Result, bail};

use crate::atlas::Atlas;
use crate::cli::{Cli, RenderArgs};
use crate::geography::ProvinceId;
use crate::surface::SvgSurface;
use crate::view::MapViewController;

pub fn run(cli: &Cli, args: &RenderArgs) -> Result<()> {
    if args.out.exists() && !args.force {
        bail!(
            "Output file already exists: {} (use --force to overwrite)",
            args.out.display()
        );
    }

    let atlas = Atlas::from_dir(&args.data)?;
    if cli.verbose > 0 {
        eprintln!(
            "[render] loaded {} provinces from {}",
            atlas.provinces().len(),
            args.data.display()
        );
    }

    let mut controller = MapViewController::new(atlas, SvgSurface::new(), String::new());
    if let Some(n) = args.province {
        controller.select_province(ProvinceId(n));
        if let Some(district) = &args.district {
            controller.select_district(district);
        }
    }

    controller.surface().to_svg(&args.out)?;
    if cli.verbose > 0 {
        eprintln!("[render] wrote {}", args.out.display());
    }

    // The info panel describes whatever the rendered view selected.
    println!("{}", controller.panel());
    Ok(())
}
