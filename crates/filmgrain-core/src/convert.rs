use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Datetime layout exiftool expects in `DateTimeOriginal`.
pub const EXIF_DATE_TIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Largest denominator considered when reducing a decimal shutter speed to a
/// fraction.
const MAX_DENOMINATOR: u128 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Invalid shutter speed format: {0}")]
    ShutterSpeed(String),

    #[error("Invalid focal length format: {0}")]
    FocalLength(String),

    #[error("Invalid date time format: {0}")]
    DateTime(String),
}

static SHUTTER_SPEED: OnceLock<Regex> = OnceLock::new();

fn shutter_speed_pattern() -> &'static Regex {
    SHUTTER_SPEED.get_or_init(|| Regex::new(r"^(\d+(?:\.\d+)?)$|^(1/\d+)$").unwrap())
}

/// Parses a shutter speed written either as a decimal number of seconds or
/// as a `1/N` fraction. Returns the duration in seconds together with the
/// fraction string that goes into the exposure tag.
pub fn parse_shutter_speed(input: &str) -> Result<(f64, String), FormatError> {
    let invalid = || FormatError::ShutterSpeed(input.to_string());
    let captures = shutter_speed_pattern()
        .captures(input)
        .ok_or_else(invalid)?;

    if let Some(decimal) = captures.get(1) {
        let seconds: f64 = decimal.as_str().parse().map_err(|_| invalid())?;
        let (numerator, denominator) =
            decimal_as_fraction(decimal.as_str()).ok_or_else(invalid)?;
        let normalized = if denominator == 1 {
            numerator.to_string()
        } else {
            format!("{numerator}/{denominator}")
        };
        Ok((seconds, normalized))
    } else {
        let denominator: u32 = input[2..].parse().map_err(|_| invalid())?;
        if denominator == 0 {
            return Err(invalid());
        }
        Ok((1.0 / f64::from(denominator), input.to_string()))
    }
}

/// Parses a focal length such as `"50mm"` or `"24-70"`, returning one value
/// for a prime lens or the ascending pair for a zoom.
pub fn parse_focal_length(input: &str) -> Result<Vec<f64>, FormatError> {
    let invalid = || FormatError::FocalLength(input.to_string());
    let cleaned = input
        .replace([' ', '\u{a0}'], "")
        .replace("mm", "")
        .replace(['\u{2013}', '\u{2014}'], "-");

    let parts: Vec<&str> = cleaned.split('-').collect();
    match parts.as_slice() {
        [value] => {
            let value: f64 = value.parse().map_err(|_| invalid())?;
            if value <= 0.0 {
                return Err(invalid());
            }
            Ok(vec![value])
        }
        [start, end] => {
            let start: f64 = start.parse().map_err(|_| invalid())?;
            let end: f64 = end.parse().map_err(|_| invalid())?;
            if !(0.0 < start && start < end) {
                return Err(invalid());
            }
            Ok(vec![start, end])
        }
        _ => Err(invalid()),
    }
}

/// Splits an EXIF datetime into the separate date and time strings IPTC
/// wants (`YYYYMMDD` and `HHMMSS`).
pub fn exif_date_time_to_iptc(
    value: &str,
    format: &str,
) -> Result<(String, String), FormatError> {
    let parsed = NaiveDateTime::parse_from_str(value, format)
        .map_err(|_| FormatError::DateTime(value.to_string()))?;
    Ok((
        parsed.format("%Y%m%d").to_string(),
        parsed.format("%H%M%S").to_string(),
    ))
}

/// Folds text to plain ASCII via compatibility decomposition, dropping
/// whatever has no ASCII form. Legacy IPTC fields and EXIF user comments
/// cannot be trusted to carry UTF-8.
pub fn to_ascii(value: &str) -> String {
    value.nfkd().filter(char::is_ascii).collect()
}

// Exact reduction of the decimal digits; long tails fall back to the closest
// fraction with a denominator within MAX_DENOMINATOR.
fn decimal_as_fraction(digits: &str) -> Option<(u128, u128)> {
    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
    // 18 significant digits keep every intermediate product inside u128
    if whole.len() + frac.len() > 18 {
        return None;
    }
    let numerator: u128 = format!("{whole}{frac}").parse().ok()?;
    let denominator = 10u128.checked_pow(u32::try_from(frac.len()).ok()?)?;

    let divisor = gcd(numerator, denominator);
    let (numerator, denominator) = (numerator / divisor, denominator / divisor);
    if denominator <= MAX_DENOMINATOR {
        return Some((numerator, denominator));
    }
    Some(limit_denominator(numerator, denominator))
}

// Best rational approximation with a bounded denominator, walking the
// continued-fraction convergents of n/d.
fn limit_denominator(n: u128, d: u128) -> (u128, u128) {
    let (mut p0, mut q0, mut p1, mut q1) = (0u128, 1u128, 1u128, 0u128);
    let (mut num, mut den) = (n, d);

    loop {
        let a = num / den;
        let q2 = q0 + a * q1;
        if q2 > MAX_DENOMINATOR {
            break;
        }
        (p0, q0, p1, q1) = (p1, q1, p0 + a * p1, q2);
        let next = num - a * den;
        num = den;
        den = next;
        if den == 0 {
            return (p1, q1);
        }
    }

    let k = (MAX_DENOMINATOR - q0) / q1;
    let first = (p0 + k * p1, q0 + k * q1);
    let second = (p1, q1);

    // |n/d - p/q| compared via cross-multiplication, so no float noise
    let err_first = (n * first.1).abs_diff(first.0 * d);
    let err_second = (n * second.1).abs_diff(second.0 * d);
    if err_second * first.1 <= err_first * second.1 {
        second
    } else {
        first
    }
}

const fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let next = a % b;
        a = b;
        b = next;
    }
    a
}
