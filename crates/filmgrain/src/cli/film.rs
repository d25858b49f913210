use anyhow::{bail, Result};
use console::style;
use filmgrain_core::validate;
use filmgrain_core::{Film, FilmFormat};

use crate::context::AppContext;

/// Build the identity value for a film named on the command line.
fn parse_film(make: &str, name: &str, iso: &str, format: Option<String>) -> Result<Film> {
    if !validate::iso_valid(iso) {
        bail!("invalid ISO '{iso}'");
    }
    Ok(Film {
        make: make.to_string(),
        name: name.to_string(),
        iso: iso.parse()?,
        format,
    })
}

pub fn run_add(make: &str, name: &str, iso: &str, format: Option<&str>) -> Result<()> {
    let format = format
        .map(str::parse::<FilmFormat>)
        .transpose()?
        .map(|format| format.as_str().to_string());
    let film = parse_film(make, name, iso, format)?;

    let ctx = AppContext::resolve()?;
    let mut db = ctx.database()?;
    if db.films().contains(&film) {
        bail!("film preset '{}' already exists", film.display_name());
    }

    let line = film.to_string();
    db.add_film(film);
    db.save()?;

    eprintln!("Added film {line}");
    Ok(())
}

pub fn run_remove(make: &str, name: &str, iso: &str) -> Result<()> {
    let film = parse_film(make, name, iso, None)?;

    let ctx = AppContext::resolve()?;
    let mut db = ctx.database()?;
    if !db.films().contains(&film) {
        bail!("no film preset matching '{film}'");
    }

    db.remove_film(&film);
    db.save()?;

    eprintln!("Removed film {}", film.display_name());
    Ok(())
}

pub fn run_list() -> Result<()> {
    let ctx = AppContext::resolve()?;
    let db = ctx.database()?;

    if db.films().is_empty() {
        eprintln!("No film presets stored");
        return Ok(());
    }

    for film in db.films() {
        println!(
            "  {} {}",
            style(film.display_name()).bold(),
            style(format!("ISO {}", film.iso)).dim()
        );
    }

    Ok(())
}
