use serde::{Deserialize, Serialize};

/// Flat metadata supplied by a caller for one write operation. Every field is
/// independent; empty strings and absent fields mean the same thing.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataRecord {
    pub film_make: Option<String>,
    pub film_name: Option<String>,
    pub film_iso: Option<String>,
    pub film_format: Option<String>,
    pub camera_make: Option<String>,
    pub camera_model: Option<String>,
    pub camera_crop: Option<String>,
    pub camera_serial: Option<String>,
    pub lens_make: Option<String>,
    pub lens_model: Option<String>,
    pub lens_focal_length: Option<String>,
    pub lens_serial: Option<String>,
    pub origin_author: Option<String>,
    pub origin_copyright: Option<String>,
    pub origin_city: Option<String>,
    pub origin_sublocation: Option<String>,
    pub origin_country: Option<String>,
    pub origin_gps_latitude: Option<String>,
    pub origin_gps_longitude: Option<String>,
    pub origin_date_taken: Option<String>,
    pub exposure_aperture: Option<String>,
    pub exposure_shutter_speed: Option<String>,
    pub exposure_iso: Option<String>,
    pub exposure_flash: Option<String>,
    pub comments_description: Option<String>,
    pub comments_user_comment: Option<String>,
    pub comments_auto_comment: Option<String>,
    pub other_resolution: Option<String>,
    pub other_tags: Option<String>,
}

impl MetadataRecord {
    /// True when no field carries a usable value. A record in this state is
    /// rejected before any subprocess is started.
    pub fn is_empty(&self) -> bool {
        [
            &self.film_make,
            &self.film_name,
            &self.film_iso,
            &self.film_format,
            &self.camera_make,
            &self.camera_model,
            &self.camera_crop,
            &self.camera_serial,
            &self.lens_make,
            &self.lens_model,
            &self.lens_focal_length,
            &self.lens_serial,
            &self.origin_author,
            &self.origin_copyright,
            &self.origin_city,
            &self.origin_sublocation,
            &self.origin_country,
            &self.origin_gps_latitude,
            &self.origin_gps_longitude,
            &self.origin_date_taken,
            &self.exposure_aperture,
            &self.exposure_shutter_speed,
            &self.exposure_iso,
            &self.exposure_flash,
            &self.comments_description,
            &self.comments_user_comment,
            &self.comments_auto_comment,
            &self.other_resolution,
            &self.other_tags,
        ]
        .into_iter()
        .all(|field| present(field).is_none())
    }
}

/// A populated field, or `None` when the field is absent or empty.
pub(crate) fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// What one tool invocation produced, after the per-operation parse step.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub succeeded: bool,
    /// Operation summary for display. The JSON report for reads, the tool's
    /// diagnostic line for exports and imports.
    pub message: String,
    pub raw_stdout: String,
    pub raw_stderr: String,
}
