use anyhow::{bail, Result};
use console::style;
use filmgrain_core::convert;
use filmgrain_core::Lens;

use crate::context::AppContext;

pub fn run_add(make: &str, model: &str, focal_length: &str, serial: &str) -> Result<()> {
    let lens = Lens {
        make: make.to_string(),
        model: model.to_string(),
        focal_length: convert::parse_focal_length(focal_length)?,
        serial: serial.to_string(),
    };

    let ctx = AppContext::resolve()?;
    let mut db = ctx.database()?;
    if db.lenses().contains(&lens) {
        bail!("lens preset '{}' already exists", lens.display_name());
    }

    let line = lens.to_string();
    db.add_lens(lens);
    db.save()?;

    eprintln!("Added lens {line}");
    Ok(())
}

pub fn run_remove(make: &str, model: &str, serial: &str) -> Result<()> {
    // Focal length is not part of lens identity, so removal does not ask for it.
    let lens = Lens {
        make: make.to_string(),
        model: model.to_string(),
        focal_length: Vec::new(),
        serial: serial.to_string(),
    };

    let ctx = AppContext::resolve()?;
    let mut db = ctx.database()?;
    if !db.lenses().contains(&lens) {
        bail!("no lens preset matching '{}'", lens.display_name());
    }

    db.remove_lens(&lens);
    db.save()?;

    eprintln!("Removed lens {}", lens.display_name());
    Ok(())
}

pub fn run_list() -> Result<()> {
    let ctx = AppContext::resolve()?;
    let db = ctx.database()?;

    if db.lenses().is_empty() {
        eprintln!("No lens presets stored");
        return Ok(());
    }

    for lens in db.lenses() {
        println!(
            "  {} {}",
            style(lens.display_name()).bold(),
            style(lens_details(lens)).dim()
        );
    }

    Ok(())
}

fn lens_details(lens: &Lens) -> String {
    let mut details = String::new();
    if !lens.focal_length.is_empty() {
        details.push_str(&format!("{}mm", lens.focal_length_text()));
    }
    if !lens.serial.is_empty() {
        if !details.is_empty() {
            details.push_str(", ");
        }
        details.push_str(&format!("serial {}", lens.serial));
    }
    details
}
