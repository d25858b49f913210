use anyhow::{bail, Result};
use console::style;
use filmgrain_core::validate;
use filmgrain_core::{Camera, CropFactor};

use crate::context::AppContext;

/// Build the identity value for a camera named on the command line.
fn parse_camera(make: &str, model: &str, crop: &str, serial: &str) -> Result<Camera> {
    if !validate::crop_valid(crop) {
        bail!("invalid crop factor '{crop}'");
    }
    Ok(Camera {
        make: make.to_string(),
        model: model.to_string(),
        crop: crop.parse()?,
        serial: serial.to_string(),
    })
}

pub fn run_add(make: &str, model: &str, crop: &str, serial: &str) -> Result<()> {
    let camera = parse_camera(make, model, crop, serial)?;

    let ctx = AppContext::resolve()?;
    let mut db = ctx.database()?;
    if db.cameras().contains(&camera) {
        bail!("camera preset '{}' already exists", camera.display_name());
    }

    let line = camera.to_string();
    db.add_camera(camera);
    db.save()?;

    eprintln!("Added camera {line}");
    Ok(())
}

pub fn run_remove(make: &str, model: &str, crop: &str, serial: &str) -> Result<()> {
    let camera = parse_camera(make, model, crop, serial)?;

    let ctx = AppContext::resolve()?;
    let mut db = ctx.database()?;
    if !db.cameras().contains(&camera) {
        bail!("no camera preset matching '{camera}'");
    }

    db.remove_camera(&camera);
    db.save()?;

    eprintln!("Removed camera {}", camera.display_name());
    Ok(())
}

pub fn run_list() -> Result<()> {
    let ctx = AppContext::resolve()?;
    let db = ctx.database()?;

    if db.cameras().is_empty() {
        eprintln!("No camera presets stored");
        return Ok(());
    }

    for camera in db.cameras() {
        let crop_label = CropFactor::from_f64(camera.crop).map_or_else(
            || format!("crop {}", camera.crop),
            |factor| format!("crop {factor}"),
        );
        let serial_label = if camera.serial.is_empty() {
            String::new()
        } else {
            format!(", serial {}", camera.serial)
        };
        println!(
            "  {} {}",
            style(camera.display_name()).bold(),
            style(format!("{crop_label}{serial_label}")).dim()
        );
    }

    Ok(())
}
