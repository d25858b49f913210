//! Translation of a metadata record into the tool's argument list. The
//! mirroring below follows the MWG guidance on keeping EXIF, IPTC, and XMP
//! in agreement: <https://exiftool.org/TagNames/MWG.html>

use crate::convert::{self, EXIF_DATE_TIME_FORMAT};
use crate::countries::country_codes;
use crate::error::ValidationError;
use crate::types::{present, MetadataRecord};
use crate::validate;

/// Global flag put first on every write so IPTC text is stored as UTF-8.
pub(crate) const CHARSET_UTF8: &str = "-iptc:CodedCharacterSet=UTF8";

/// The flash descriptions exiftool accepts for `EXIF:Flash`.
pub static FLASH_VALUES: &[&str] = &[
    "No Flash",
    "Fired",
    "Fired, Return not detected",
    "Fired, Return detected",
    "On, Did not fire",
    "On, Fired",
    "On, Return not detected",
    "On, Return detected",
    "Off, Did not fire",
    "Off, Did not fire, Return not detected",
    "Auto, Did not fire",
    "Auto, Fired",
    "Auto, Fired, Return not detected",
    "Auto, Fired, Return detected",
    "No flash function",
    "Off, No flash function",
    "Fired, Red-eye reduction",
    "Fired, Red-eye reduction, Return not detected",
    "Fired, Red-eye reduction, Return detected",
    "On, Red-eye reduction",
    "On, Red-eye reduction, Return not detected",
    "On, Red-eye reduction, Return detected",
    "Off, Red-eye reduction",
    "Auto, Did not fire, Red-eye reduction",
    "Auto, Fired, Red-eye reduction",
    "Auto, Fired, Red-eye reduction, Return not detected",
    "Auto, Fired, Red-eye reduction, Return detected",
];

/// Builds the tag assignments for one write, validating every populated
/// field. Fails on the first bad field; a partial argument list never
/// reaches the tool.
pub(crate) fn build_write_args(record: &MetadataRecord) -> Result<Vec<String>, ValidationError> {
    if record.is_empty() {
        return Err(ValidationError::NothingToWrite);
    }

    let mut args = vec![CHARSET_UTF8.to_string()];

    if let Some(author) = present(&record.origin_author) {
        args.push(format!("-EXIF:Artist={author}"));
        args.push(format!("-IPTC:By-line={}", convert::to_ascii(author)));
        args.push(format!("-XMP-dc:Creator={author}"));
    }

    if let Some(copyright) = present(&record.origin_copyright) {
        args.push(format!("-EXIF:Copyright={copyright}"));
        args.push(format!("-IPTC:CopyrightNotice={copyright}"));
        args.push(format!("-XMP-dc:Rights={copyright}"));
        args.push("-XMP-xmpRights:Marked=True".to_string());
    }

    if let Some(date_taken) = present(&record.origin_date_taken) {
        let (iptc_date, iptc_time) =
            convert::exif_date_time_to_iptc(date_taken, EXIF_DATE_TIME_FORMAT)?;
        args.push(format!("-EXIF:DateTimeOriginal={date_taken}"));
        args.push(format!("-XMP-photoshop:DateCreated={date_taken}"));
        args.push(format!("-IPTC:DateCreated={iptc_date}"));
        args.push(format!("-IPTC:TimeCreated={iptc_time}"));
    }

    if let Some(country) = present(&record.origin_country) {
        let (name, alpha2, alpha3) = country_codes(country);
        args.push(format!("-IPTC:Country-PrimaryLocationName={name}"));
        args.push(format!("-XMP-photoshop:Country={name}"));
        args.push(format!("-XMP-iptcExt:LocationShownCountryName={name}"));
        if !alpha3.is_empty() {
            args.push(format!("-IPTC:Country-PrimaryLocationCode={alpha3}"));
        }
        if !alpha2.is_empty() {
            args.push(format!("-XMP-iptcCore:CountryCode={alpha2}"));
            args.push(format!("-XMP-iptcExt:LocationCreatedCountryCode={alpha2}"));
        }
    }

    if let Some(latitude) = present(&record.origin_gps_latitude) {
        if !validate::latitude_valid(latitude) {
            return Err(invalid_field("latitude", latitude));
        }
        let value: f64 = latitude
            .parse()
            .map_err(|_| invalid_field("latitude", latitude))?;
        let reference = if value < 0.0 { "S" } else { "N" };
        args.push(format!("-EXIF:GPSLatitudeRef={reference}"));
        args.push(format!("-EXIF:GPSLatitude={value}"));
    }

    if let Some(longitude) = present(&record.origin_gps_longitude) {
        if !validate::longitude_valid(longitude) {
            return Err(invalid_field("longitude", longitude));
        }
        let value: f64 = longitude
            .parse()
            .map_err(|_| invalid_field("longitude", longitude))?;
        let reference = if value < 0.0 { "W" } else { "E" };
        args.push(format!("-EXIF:GPSLongitudeRef={reference}"));
        args.push(format!("-EXIF:GPSLongitude={value}"));
    }

    if let Some(city) = present(&record.origin_city) {
        args.push(format!("-IPTC:City={city}"));
        args.push(format!("-XMP-photoshop:City={city}"));
        args.push(format!("-XMP-iptcExt:LocationShownCity={city}"));
    }

    if let Some(sublocation) = present(&record.origin_sublocation) {
        args.push(format!("-IPTC:Sub-location={sublocation}"));
        args.push(format!("-XMP-iptcCore:Location={sublocation}"));
        args.push(format!("-XMP-iptcExt:LocationShownSublocation={sublocation}"));
    }

    let mut xmp_description_parts: Vec<String> = Vec::new();
    if let Some(description) = present(&record.comments_description) {
        args.push(format!("-EXIF:ImageDescription={description}"));
        args.push(format!("-IPTC:Caption-Abstract={description}"));
        xmp_description_parts.push(description.to_string());
    }

    let user_comment = present(&record.comments_user_comment);
    let auto_comment = present(&record.comments_auto_comment);
    if user_comment.is_some() || auto_comment.is_some() {
        let comment = [user_comment, auto_comment]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("\n\n");
        args.push(format!("-EXIF:UserComment={}", convert::to_ascii(&comment)));
        xmp_description_parts.push(comment);
    }

    if !xmp_description_parts.is_empty() {
        args.push(format!(
            "-XMP-dc:Description={}",
            xmp_description_parts.join("\n\n")
        ));
    }

    if let Some(make) = present(&record.camera_make) {
        args.push(format!("-EXIF:Make={make}"));
    }

    if let Some(model) = present(&record.camera_model) {
        args.push(format!("-EXIF:Model={model}"));
    }

    if let Some(serial) = present(&record.camera_serial) {
        args.push(format!("-EXIF:CameraSerialNumber={serial}"));
    }

    let lens_make = present(&record.lens_make);
    if let Some(make) = lens_make {
        args.push(format!("-EXIF:LensMake={make}"));
    }

    if let Some(model) = present(&record.lens_model) {
        let full_model = match lens_make {
            Some(make) => format!("{make} {model}"),
            None => model.to_string(),
        };
        args.push(format!("-EXIF:LensModel={full_model}"));
    }

    if let Some(serial) = present(&record.lens_serial) {
        args.push(format!("-EXIF:LensSerialNumber={serial}"));
    }

    if let Some(focal_length) = present(&record.lens_focal_length) {
        let values = convert::parse_focal_length(focal_length)?;
        args.push(format!("-EXIF:FocalLength={}", values[0]));

        // The crop factor only matters once a focal length is known.
        if let Some(crop) = present(&record.camera_crop) {
            let crop_value: f64 = crop
                .parse()
                .map_err(|_| invalid_field("camera crop", crop))?;
            let effective = values[0] * crop_value;
            args.push(format!("-EXIF:FocalLengthIn35mmFormat={}", effective.round()));
        }
    }

    if let Some(iso) = present(&record.exposure_iso) {
        if !validate::iso_valid(iso) {
            return Err(invalid_field("ISO", iso));
        }
        args.push(format!("-EXIF:ISO={iso}"));
    }

    if let Some(aperture) = present(&record.exposure_aperture) {
        if !validate::aperture_valid(aperture) {
            return Err(invalid_field("aperture", aperture));
        }
        args.push(format!("-EXIF:FNumber={aperture}"));
    }

    if let Some(shutter_speed) = present(&record.exposure_shutter_speed) {
        let (_, fraction) = convert::parse_shutter_speed(shutter_speed)?;
        args.push(format!("-EXIF:ExposureTime={fraction}"));
    }

    if let Some(flash) = present(&record.exposure_flash) {
        if !FLASH_VALUES.contains(&flash) {
            return Err(invalid_field("flash mode", flash));
        }
        args.push(format!("-EXIF:Flash={flash}"));
    }

    if let Some(resolution) = present(&record.other_resolution) {
        if !validate::resolution_valid(resolution) {
            return Err(invalid_field("resolution", resolution));
        }
        args.push(format!("-EXIF:XResolution={resolution}"));
        args.push(format!("-EXIF:YResolution={resolution}"));
        args.push("-EXIF:ResolutionUnit#=2".to_string());
    }

    if let Some(tags) = present(&record.other_tags) {
        for tag in tags.trim().split(',') {
            args.push(tag.to_string());
        }
    }

    Ok(args)
}

fn invalid_field(field: &'static str, value: &str) -> ValidationError {
    ValidationError::Field {
        field,
        value: value.to_string(),
    }
}
