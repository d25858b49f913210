use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A camera body preset. All four fields make up the identity; the crop
/// factor compares bitwise so that `Eq`, `Ord`, and `Hash` agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub make: String,
    pub model: String,
    pub crop: f64,
    pub serial: String,
}

impl Camera {
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

impl PartialEq for Camera {
    fn eq(&self, other: &Self) -> bool {
        self.make == other.make
            && self.model == other.model
            && self.crop.to_bits() == other.crop.to_bits()
            && self.serial == other.serial
    }
}

impl Eq for Camera {}

impl Ord for Camera {
    fn cmp(&self, other: &Self) -> Ordering {
        self.make
            .cmp(&other.make)
            .then_with(|| self.model.cmp(&other.model))
            .then_with(|| self.crop.total_cmp(&other.crop))
            .then_with(|| self.serial.cmp(&other.serial))
    }
}

impl PartialOrd for Camera {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Camera {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.make.hash(state);
        self.model.hash(state);
        self.crop.to_bits().hash(state);
        self.serial.hash(state);
    }
}

impl std::fmt::Display for Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}, crop ", self.make, self.model)?;
        match CropFactor::from_f64(self.crop) {
            Some(factor) => write!(f, "{factor}")?,
            None => write!(f, "{}", self.crop)?,
        }
        if !self.serial.is_empty() {
            write!(f, ", serial {}", self.serial)?;
        }
        Ok(())
    }
}

/// Crop factors of the common film frame sizes, relative to the 35mm frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropFactor {
    FullFrame,
    HalfFrame,
    Medium645,
    Medium66,
    Medium67,
    Medium69,
}

impl CropFactor {
    pub const ALL: [CropFactor; 6] = [
        Self::FullFrame,
        Self::HalfFrame,
        Self::Medium645,
        Self::Medium66,
        Self::Medium67,
        Self::Medium69,
    ];

    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::FullFrame => 1.0,
            Self::HalfFrame => 1.44,
            Self::Medium645 => 0.62,
            Self::Medium66 => 0.55,
            Self::Medium67 => 0.48,
            Self::Medium69 => 0.43,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FullFrame => "35mm",
            Self::HalfFrame => "Half frame",
            Self::Medium645 => "Medium format 6 x 4.5",
            Self::Medium66 => "Medium format 6 x 6",
            Self::Medium67 => "Medium format 6 x 7",
            Self::Medium69 => "Medium format 6 x 9",
        }
    }

    /// Looks up the factor a stored crop value corresponds to, rounding to
    /// two decimals first.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<CropFactor> {
        let rounded = (value * 100.0).round() / 100.0;
        Self::ALL
            .into_iter()
            .find(|factor| (factor.as_f64() - rounded).abs() < 1e-9)
    }
}

impl std::fmt::Display for CropFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} ({})", self.as_f64(), self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fm2(crop: f64, serial: &str) -> Camera {
        Camera {
            make: "Nikon".to_string(),
            model: "FM2".to_string(),
            crop,
            serial: serial.to_string(),
        }
    }

    #[test]
    fn identity_includes_crop_and_serial() {
        assert_eq!(fm2(1.0, ""), fm2(1.0, ""));
        assert_ne!(fm2(1.0, ""), fm2(0.62, ""));
        assert_ne!(fm2(1.0, "8273645"), fm2(1.0, ""));
    }

    #[test]
    fn ordering_breaks_ties_on_crop() {
        let mut cameras = vec![fm2(1.44, ""), fm2(0.62, ""), fm2(1.0, "")];
        cameras.sort();
        assert_eq!(cameras[0].crop, 0.62);
        assert_eq!(cameras[2].crop, 1.44);
    }

    #[test]
    fn crop_factor_lookup() {
        assert_eq!(CropFactor::from_f64(1.0), Some(CropFactor::FullFrame));
        assert_eq!(CropFactor::from_f64(0.62), Some(CropFactor::Medium645));
        assert_eq!(CropFactor::from_f64(0.6201), Some(CropFactor::Medium645));
        assert_eq!(CropFactor::from_f64(1.5), None);
        assert_eq!(CropFactor::from_f64(0.0), None);
    }

    #[test]
    fn crop_factor_display() {
        assert_eq!(CropFactor::FullFrame.to_string(), "1.00 (35mm)");
        assert_eq!(
            CropFactor::Medium645.to_string(),
            "0.62 (Medium format 6 x 4.5)"
        );
    }

    #[test]
    fn display_line() {
        assert_eq!(fm2(1.0, "").to_string(), "Nikon FM2, crop 1.00 (35mm)");
        assert_eq!(
            fm2(1.3, "8273645").to_string(),
            "Nikon FM2, crop 1.3, serial 8273645"
        );
    }

    #[test]
    fn serde_requires_every_field() {
        let decoded: Camera = serde_json::from_str(
            r#"{"make": "Nikon", "model": "FM2", "crop": 1.0, "serial": ""}"#,
        )
        .unwrap();
        assert_eq!(decoded, fm2(1.0, ""));

        let missing = serde_json::from_str::<Camera>(r#"{"make": "Nikon", "model": "FM2"}"#);
        assert!(missing.is_err());
    }
}
