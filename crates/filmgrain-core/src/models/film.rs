use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A film stock preset. The `format` is a loading aid for the caller and is
/// not part of the film's identity; it is also dropped when the store is
/// written out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Film {
    pub make: String,
    pub name: String,
    pub iso: u32,
    #[serde(default, skip_serializing)]
    pub format: Option<String>,
}

impl Film {
    /// Identity and ordering key. Two films are the same stock when make,
    /// name, and ISO agree, whatever format they were loaded as.
    #[must_use]
    pub fn key(&self) -> (&str, &str, u32) {
        (&self.make, &self.name, self.iso)
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.name)
    }
}

impl PartialEq for Film {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Film {}

impl Ord for Film {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Film {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Film {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl std::fmt::Display for Film {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} (ISO {}", self.make, self.name, self.iso)?;
        if let Some(format) = &self.format {
            write!(f, ", {format}")?;
        }
        f.write_str(")")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown film format: {0}")]
pub struct UnknownFilmFormat(pub String);

/// Standard roll and cartridge formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmFormat {
    F135,
    F120,
    F220,
    Aps,
    F116,
    F616,
    F127,
    F828,
    F620,
    F126,
    F110,
    Mm16,
    Mm8,
}

impl FilmFormat {
    pub const ALL: [FilmFormat; 13] = [
        Self::F135,
        Self::F120,
        Self::F220,
        Self::Aps,
        Self::F116,
        Self::F616,
        Self::F127,
        Self::F828,
        Self::F620,
        Self::F126,
        Self::F110,
        Self::Mm16,
        Self::Mm8,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::F135 => "135",
            Self::F120 => "120",
            Self::F220 => "220",
            Self::Aps => "APS",
            Self::F116 => "116",
            Self::F616 => "616",
            Self::F127 => "127",
            Self::F828 => "828",
            Self::F620 => "620",
            Self::F126 => "126",
            Self::F110 => "110",
            Self::Mm16 => "16mm",
            Self::Mm8 => "8mm",
        }
    }
}

impl std::fmt::Display for FilmFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FilmFormat {
    type Err = UnknownFilmFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| UnknownFilmFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hp5(format: Option<&str>) -> Film {
        Film {
            make: "Ilford".to_string(),
            name: "HP5 Plus".to_string(),
            iso: 400,
            format: format.map(str::to_string),
        }
    }

    #[test]
    fn identity_ignores_format() {
        assert_eq!(hp5(None), hp5(Some("120")));
        assert_eq!(hp5(Some("135")).cmp(&hp5(Some("120"))), Ordering::Equal);
    }

    #[test]
    fn ordering_by_make_name_iso() {
        let mut films = vec![
            hp5(None),
            Film {
                make: "Ilford".to_string(),
                name: "Delta".to_string(),
                iso: 3200,
                format: None,
            },
            Film {
                make: "Fomapan".to_string(),
                name: "Action".to_string(),
                iso: 400,
                format: None,
            },
        ];
        films.sort();
        assert_eq!(films[0].make, "Fomapan");
        assert_eq!(films[1].name, "Delta");
        assert_eq!(films[2].name, "HP5 Plus");
    }

    #[test]
    fn format_not_serialized() {
        let encoded = serde_json::to_string(&hp5(Some("120"))).unwrap();
        assert!(!encoded.contains("format"));

        let decoded: Film = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.format, None);
        assert_eq!(decoded, hp5(Some("120")));
    }

    #[test]
    fn format_read_when_present() {
        let decoded: Film = serde_json::from_str(
            r#"{"make": "Kodak", "name": "Portra", "iso": 160, "format": "220"}"#,
        )
        .unwrap();
        assert_eq!(decoded.format.as_deref(), Some("220"));
    }

    #[test]
    fn display_line() {
        assert_eq!(hp5(None).to_string(), "Ilford HP5 Plus (ISO 400)");
        assert_eq!(hp5(Some("120")).to_string(), "Ilford HP5 Plus (ISO 400, 120)");
        assert_eq!(hp5(None).display_name(), "Ilford HP5 Plus");
    }

    #[test]
    fn film_format_roundtrip() {
        for format in FilmFormat::ALL {
            let parsed: FilmFormat = format.to_string().parse().unwrap();
            assert_eq!(parsed, format);
        }
    }

    #[test]
    fn film_format_invalid() {
        assert!("118".parse::<FilmFormat>().is_err());
        assert!("".parse::<FilmFormat>().is_err());
    }
}
