//! Predicates over raw field values. Each one accepts any string and simply
//! answers whether the value is usable; callers skip blank fields before
//! asking.

use crate::convert::{self, EXIF_DATE_TIME_FORMAT};

pub fn iso_valid(value: &str) -> bool {
    value.parse::<u32>().is_ok_and(|iso| iso > 0)
}

pub fn crop_valid(value: &str) -> bool {
    positive_float(value)
}

pub fn aperture_valid(value: &str) -> bool {
    positive_float(value)
}

pub fn resolution_valid(value: &str) -> bool {
    positive_float(value)
}

pub fn focal_length_valid(value: &str) -> bool {
    convert::parse_focal_length(value).is_ok()
}

pub fn shutter_speed_valid(value: &str) -> bool {
    convert::parse_shutter_speed(value).is_ok()
}

pub fn date_taken_valid(value: &str) -> bool {
    convert::exif_date_time_to_iptc(value, EXIF_DATE_TIME_FORMAT).is_ok()
}

pub fn latitude_valid(value: &str) -> bool {
    value
        .parse::<f64>()
        .is_ok_and(|degrees| (-90.0..=90.0).contains(&degrees))
}

pub fn longitude_valid(value: &str) -> bool {
    value
        .parse::<f64>()
        .is_ok_and(|degrees| (-180.0..=180.0).contains(&degrees))
}

fn positive_float(value: &str) -> bool {
    value.parse::<f64>().is_ok_and(|parsed| parsed > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_requires_positive_integer() {
        assert!(iso_valid("400"));
        assert!(iso_valid("50"));
        assert!(!iso_valid("0"));
        assert!(!iso_valid("-100"));
        assert!(!iso_valid("abc"));
        assert!(!iso_valid("100.5"));
        assert!(!iso_valid(""));
    }

    #[test]
    fn aperture_accepts_floats() {
        assert!(aperture_valid("2.8"));
        assert!(aperture_valid("11"));
        assert!(!aperture_valid("0"));
        assert!(!aperture_valid("f/2.8"));
    }

    #[test]
    fn crop_accepts_floats() {
        assert!(crop_valid("1.5"));
        assert!(!crop_valid("0.0"));
        assert!(!crop_valid("-0.62"));
    }

    #[test]
    fn resolution_accepts_floats() {
        assert!(resolution_valid("300"));
        assert!(resolution_valid("72.0"));
        assert!(!resolution_valid("dpi"));
    }

    #[test]
    fn focal_length_delegates_to_converter() {
        assert!(focal_length_valid("50mm"));
        assert!(focal_length_valid("24-70"));
        assert!(!focal_length_valid("10-5"));
        assert!(!focal_length_valid("zoom"));
    }

    #[test]
    fn shutter_speed_delegates_to_converter() {
        assert!(shutter_speed_valid("1/250"));
        assert!(shutter_speed_valid("2.5"));
        assert!(!shutter_speed_valid("1/0"));
        assert!(!shutter_speed_valid("fast"));
    }

    #[test]
    fn date_taken_requires_exif_layout() {
        assert!(date_taken_valid("2024:06:01 13:37:09"));
        assert!(!date_taken_valid("2024-06-01 13:37:09"));
        assert!(!date_taken_valid("yesterday"));
    }

    #[test]
    fn latitude_bounds() {
        assert!(latitude_valid("-44.67"));
        assert!(latitude_valid("90"));
        assert!(latitude_valid("-90"));
        assert!(!latitude_valid("90.01"));
        assert!(!latitude_valid("north"));
    }

    #[test]
    fn longitude_bounds() {
        assert!(longitude_valid("170.5"));
        assert!(longitude_valid("-180"));
        assert!(!longitude_valid("180.1"));
        assert!(!longitude_valid(""));
    }
}
