use std::cmp::Ordering;
use std::fmt::Write as _;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A lens preset. The focal length range is descriptive only and stays out
/// of the identity, so two entries for the same lens cannot drift apart over
/// a re-measured range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lens {
    pub make: String,
    pub model: String,
    pub focal_length: Vec<f64>,
    pub serial: String,
}

impl Lens {
    /// Identity and ordering key: make, model, and serial.
    #[must_use]
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.make, &self.model, &self.serial)
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    /// The focal length range as entered, `"50"` or `"24-70"`.
    #[must_use]
    pub fn focal_length_text(&self) -> String {
        let mut text = String::new();
        for (index, value) in self.focal_length.iter().enumerate() {
            if index > 0 {
                text.push('-');
            }
            let _ = write!(text, "{value}");
        }
        text
    }
}

impl PartialEq for Lens {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Lens {}

impl Ord for Lens {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Lens {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Lens {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl std::fmt::Display for Lens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.make, self.model)?;
        if !self.focal_length.is_empty() {
            write!(f, ", {}mm", self.focal_length_text())?;
        }
        if !self.serial.is_empty() {
            write!(f, ", serial {}", self.serial)?;
        }
        Ok(())
    }
}
