use anyhow::Result;
use clap::Args;
use filmgrain_core::{Camera, Database, Film, Lens, MetadataRecord};

use crate::context::AppContext;

#[derive(Args)]
pub struct WriteArgs {
    /// Image files
    pub files: Vec<String>,

    /// Fill film fields from a stored preset ("Make Name")
    #[arg(long)]
    pub film: Option<String>,
    /// Fill camera fields from a stored preset ("Make Model")
    #[arg(long)]
    pub camera: Option<String>,
    /// Fill lens fields from a stored preset ("Make Model")
    #[arg(long)]
    pub lens: Option<String>,

    /// Film manufacturer
    #[arg(long)]
    pub film_make: Option<String>,
    /// Film name
    #[arg(long)]
    pub film_name: Option<String>,
    /// Film box speed
    #[arg(long)]
    pub film_iso: Option<String>,
    /// Film format (e.g. 135, 120)
    #[arg(long)]
    pub film_format: Option<String>,

    /// Camera manufacturer
    #[arg(long)]
    pub camera_make: Option<String>,
    /// Camera model
    #[arg(long)]
    pub camera_model: Option<String>,
    /// Camera crop factor relative to 35mm
    #[arg(long)]
    pub camera_crop: Option<String>,
    /// Camera body serial number
    #[arg(long)]
    pub camera_serial: Option<String>,

    /// Lens manufacturer
    #[arg(long)]
    pub lens_make: Option<String>,
    /// Lens model
    #[arg(long)]
    pub lens_model: Option<String>,
    /// Lens focal length or zoom range (e.g. 50mm, 24-70mm)
    #[arg(long)]
    pub lens_focal_length: Option<String>,
    /// Lens serial number
    #[arg(long)]
    pub lens_serial: Option<String>,

    /// Photographer name
    #[arg(long)]
    pub author: Option<String>,
    /// Copyright notice
    #[arg(long)]
    pub copyright: Option<String>,
    /// City
    #[arg(long)]
    pub city: Option<String>,
    /// Sublocation within the city
    #[arg(long)]
    pub sublocation: Option<String>,
    /// Country name
    #[arg(long)]
    pub country: Option<String>,
    /// GPS latitude in decimal degrees
    #[arg(long)]
    pub latitude: Option<String>,
    /// GPS longitude in decimal degrees
    #[arg(long)]
    pub longitude: Option<String>,
    /// Capture time as "YYYY:MM:DD HH:MM:SS"
    #[arg(long)]
    pub date_taken: Option<String>,

    /// Aperture f-number
    #[arg(long)]
    pub aperture: Option<String>,
    /// Shutter speed ("2.5" or "1/250")
    #[arg(long)]
    pub shutter_speed: Option<String>,
    /// Exposure ISO
    #[arg(long)]
    pub iso: Option<String>,
    /// Flash mode (one of the tool's printable Flash values)
    #[arg(long)]
    pub flash: Option<String>,

    /// Image description
    #[arg(long)]
    pub description: Option<String>,
    /// Free-form comment
    #[arg(long)]
    pub comment: Option<String>,
    /// Generated comment appended after the free-form one
    #[arg(long)]
    pub auto_comment: Option<String>,

    /// Pixel density in dots per inch
    #[arg(long)]
    pub resolution: Option<String>,
    /// Extra tag assignments, comma-separated, passed through verbatim
    #[arg(long)]
    pub tags: Option<String>,
}

pub fn run(args: &WriteArgs) -> Result<()> {
    let ctx = AppContext::resolve()?;
    let mut record = record_from_flags(args);

    if args.film.is_some() || args.camera.is_some() || args.lens.is_some() {
        let db = ctx.database()?;
        if let Some(name) = args.film.as_deref() {
            apply_film(&mut record, find_film(&db, name)?);
        }
        if let Some(name) = args.camera.as_deref() {
            apply_camera(&mut record, find_camera(&db, name)?);
        }
        if let Some(name) = args.lens.as_deref() {
            apply_lens(&mut record, find_lens(&db, name)?);
        }
    }

    if record.origin_author.is_none() {
        record.origin_author.clone_from(&ctx.config.author);
    }
    if record.origin_country.is_none() {
        record.origin_country.clone_from(&ctx.config.country);
    }

    let outcome = ctx.exiftool().add_metadata(&args.files, &record)?;
    eprintln!("{}", outcome.message);
    Ok(())
}

fn record_from_flags(args: &WriteArgs) -> MetadataRecord {
    MetadataRecord {
        film_make: args.film_make.clone(),
        film_name: args.film_name.clone(),
        film_iso: args.film_iso.clone(),
        film_format: args.film_format.clone(),
        camera_make: args.camera_make.clone(),
        camera_model: args.camera_model.clone(),
        camera_crop: args.camera_crop.clone(),
        camera_serial: args.camera_serial.clone(),
        lens_make: args.lens_make.clone(),
        lens_model: args.lens_model.clone(),
        lens_focal_length: args.lens_focal_length.clone(),
        lens_serial: args.lens_serial.clone(),
        origin_author: args.author.clone(),
        origin_copyright: args.copyright.clone(),
        origin_city: args.city.clone(),
        origin_sublocation: args.sublocation.clone(),
        origin_country: args.country.clone(),
        origin_gps_latitude: args.latitude.clone(),
        origin_gps_longitude: args.longitude.clone(),
        origin_date_taken: args.date_taken.clone(),
        exposure_aperture: args.aperture.clone(),
        exposure_shutter_speed: args.shutter_speed.clone(),
        exposure_iso: args.iso.clone(),
        exposure_flash: args.flash.clone(),
        comments_description: args.description.clone(),
        comments_user_comment: args.comment.clone(),
        comments_auto_comment: args.auto_comment.clone(),
        other_resolution: args.resolution.clone(),
        other_tags: args.tags.clone(),
    }
}

fn find_film<'a>(db: &'a Database, name: &str) -> Result<&'a Film> {
    db.films()
        .iter()
        .find(|film| film.display_name() == name)
        .ok_or_else(|| anyhow::anyhow!("no film preset matching '{name}'"))
}

fn find_camera<'a>(db: &'a Database, name: &str) -> Result<&'a Camera> {
    db.cameras()
        .iter()
        .find(|camera| camera.display_name() == name)
        .ok_or_else(|| anyhow::anyhow!("no camera preset matching '{name}'"))
}

fn find_lens<'a>(db: &'a Database, name: &str) -> Result<&'a Lens> {
    db.lenses()
        .iter()
        .find(|lens| lens.display_name() == name)
        .ok_or_else(|| anyhow::anyhow!("no lens preset matching '{name}'"))
}

fn apply_film(record: &mut MetadataRecord, film: &Film) {
    fill(&mut record.film_make, &film.make);
    fill(&mut record.film_name, &film.name);
    fill(&mut record.film_iso, &film.iso.to_string());
    if let Some(ref format) = film.format {
        fill(&mut record.film_format, format);
    }
}

fn apply_camera(record: &mut MetadataRecord, camera: &Camera) {
    fill(&mut record.camera_make, &camera.make);
    fill(&mut record.camera_model, &camera.model);
    fill(&mut record.camera_crop, &camera.crop.to_string());
    if !camera.serial.is_empty() {
        fill(&mut record.camera_serial, &camera.serial);
    }
}

fn apply_lens(record: &mut MetadataRecord, lens: &Lens) {
    fill(&mut record.lens_make, &lens.make);
    fill(&mut record.lens_model, &lens.model);
    if !lens.focal_length.is_empty() {
        fill(&mut record.lens_focal_length, &lens.focal_length_text());
    }
    if !lens.serial.is_empty() {
        fill(&mut record.lens_serial, &lens.serial);
    }
}

/// Explicit flags win over preset and config fills.
fn fill(field: &mut Option<String>, value: &str) {
    if field.is_none() {
        *field = Some(value.to_string());
    }
}
