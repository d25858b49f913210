use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::{Camera, Film, Lens};

#[derive(Serialize, Deserialize)]
struct StoreDocument {
    films: Vec<Film>,
    cameras: Vec<Camera>,
    lenses: Vec<Lens>,
}

/// JSON-backed preset store. Collections are kept sorted and free of
/// duplicates; `save` writes the file and then reloads from it, so memory
/// always reflects what a fresh open would see.
#[derive(Debug)]
pub struct Database {
    filepath: PathBuf,
    films: Vec<Film>,
    cameras: Vec<Camera>,
    lenses: Vec<Lens>,
}

impl Database {
    pub fn open(filepath: impl Into<PathBuf>) -> Result<Database, StoreError> {
        let mut database = Database {
            filepath: filepath.into(),
            films: Vec::new(),
            cameras: Vec::new(),
            lenses: Vec::new(),
        };
        database.load()?;
        Ok(database)
    }

    #[must_use]
    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    #[must_use]
    pub fn films(&self) -> &[Film] {
        &self.films
    }

    #[must_use]
    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    #[must_use]
    pub fn lenses(&self) -> &[Lens] {
        &self.lenses
    }

    pub fn add_film(&mut self, film: Film) {
        // An equal entry already in the store wins; the incoming one is dropped.
        if let Err(position) = self.films.binary_search(&film) {
            self.films.insert(position, film);
        }
    }

    pub fn add_camera(&mut self, camera: Camera) {
        if let Err(position) = self.cameras.binary_search(&camera) {
            self.cameras.insert(position, camera);
        }
    }

    pub fn add_lens(&mut self, lens: Lens) {
        if let Err(position) = self.lenses.binary_search(&lens) {
            self.lenses.insert(position, lens);
        }
    }

    pub fn remove_film(&mut self, film: &Film) {
        self.films.retain(|item| item != film);
    }

    pub fn remove_camera(&mut self, camera: &Camera) {
        self.cameras.retain(|item| item != camera);
    }

    pub fn remove_lens(&mut self, lens: &Lens) {
        self.lenses.retain(|item| item != lens);
    }

    pub fn save(&mut self) -> Result<(), StoreError> {
        let document = StoreDocument {
            films: self.films.clone(),
            cameras: self.cameras.clone(),
            lenses: self.lenses.clone(),
        };
        let text = serde_json::to_string_pretty(&document).map_err(StoreError::Encode)?;
        fs::write(&self.filepath, text).map_err(|source| StoreError::Write {
            path: self.filepath.clone(),
            source,
        })?;
        self.load()
    }

    fn load(&mut self) -> Result<(), StoreError> {
        self.films.clear();
        self.cameras.clear();
        self.lenses.clear();

        let text = match fs::read_to_string(&self.filepath) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.filepath.clone(),
                    source,
                })
            }
        };

        let Some(document) = parse_store_document(&self.filepath, &text)? else {
            tracing::warn!(
                "Ignoring malformed preset store at {}",
                self.filepath.display()
            );
            return Ok(());
        };

        self.films = document.films;
        self.cameras = document.cameras;
        self.lenses = document.lenses;
        self.films.sort();
        self.films.dedup();
        self.cameras.sort();
        self.cameras.dedup();
        self.lenses.sort();
        self.lenses.dedup();

        tracing::debug!(
            "Loaded {} films, {} cameras, {} lenses from {}",
            self.films.len(),
            self.cameras.len(),
            self.lenses.len(),
            self.filepath.display()
        );
        Ok(())
    }
}

// A document counts as a store only when all three keys are present and
// array-typed; anything else reads as empty. A conforming document with an
// undecodable element is an error, not an empty store.
fn parse_store_document(path: &Path, text: &str) -> Result<Option<StoreDocument>, StoreError> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(text) else {
        return Ok(None);
    };
    let Some(document) = value.as_object() else {
        return Ok(None);
    };
    let conforming = ["films", "cameras", "lenses"]
        .iter()
        .all(|key| document.get(*key).is_some_and(serde_json::Value::is_array));
    if !conforming {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film(make: &str, name: &str, iso: u32, format: Option<&str>) -> Film {
        Film {
            make: make.to_string(),
            name: name.to_string(),
            iso,
            format: format.map(str::to_string),
        }
    }

    fn store_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("database.json")
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let database = Database::open(store_path(&dir)).unwrap();
        assert!(database.films().is_empty());
        assert!(database.cameras().is_empty());
        assert!(database.lenses().is_empty());
    }

    #[test]
    fn malformed_json_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);
        fs::write(&path, "{not json").unwrap();
        let database = Database::open(&path).unwrap();
        assert!(database.films().is_empty());
    }

    #[test]
    fn wrong_shape_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);
        for text in [
            "[]",
            r#"{"films": []}"#,
            r#"{"films": [], "cameras": [], "lenses": {}}"#,
            "42",
        ] {
            fs::write(&path, text).unwrap();
            let database = Database::open(&path).unwrap();
            assert!(database.films().is_empty(), "accepted {text}");
        }
    }

    #[test]
    fn bad_element_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);
        fs::write(
            &path,
            r#"{"films": [{"make": "Ilford"}], "cameras": [], "lenses": []}"#,
        )
        .unwrap();
        let err = Database::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[test]
    fn add_film_dedups_on_identity() {
        let dir = tempfile::tempdir().unwrap();
        let mut database = Database::open(store_path(&dir)).unwrap();
        database.add_film(film("Ilford", "HP5 Plus", 400, Some("135")));
        database.add_film(film("Ilford", "HP5 Plus", 400, Some("120")));
        assert_eq!(database.films().len(), 1);
        // the first entry won; the second add was dropped
        assert_eq!(database.films()[0].format.as_deref(), Some("135"));
    }

    #[test]
    fn add_keeps_collections_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let mut database = Database::open(store_path(&dir)).unwrap();
        database.add_film(film("Kodak", "Portra", 160, None));
        database.add_film(film("Fomapan", "Action", 400, None));
        database.add_film(film("Ilford", "HP5 Plus", 400, None));
        let makes: Vec<&str> = database.films().iter().map(|f| f.make.as_str()).collect();
        assert_eq!(makes, ["Fomapan", "Ilford", "Kodak"]);
    }

    #[test]
    fn remove_matches_on_identity() {
        let dir = tempfile::tempdir().unwrap();
        let mut database = Database::open(store_path(&dir)).unwrap();
        database.add_film(film("Ilford", "HP5 Plus", 400, Some("135")));
        database.remove_film(&film("Ilford", "HP5 Plus", 400, None));
        assert!(database.films().is_empty());
    }

    #[test]
    fn save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);

        let mut database = Database::open(&path).unwrap();
        database.add_film(film("Ilford", "HP5 Plus", 400, None));
        database.add_camera(Camera {
            make: "Nikon".to_string(),
            model: "FM2".to_string(),
            crop: 1.0,
            serial: String::new(),
        });
        database.add_lens(Lens {
            make: "Nikon".to_string(),
            model: "Nikkor 50mm f/1.8".to_string(),
            focal_length: vec![50.0],
            serial: String::new(),
        });
        database.save().unwrap();

        let reopened = Database::open(&path).unwrap();
        assert_eq!(reopened.films(), database.films());
        assert_eq!(reopened.cameras(), database.cameras());
        assert_eq!(reopened.lenses(), database.lenses());
    }

    #[test]
    fn save_drops_film_format() {
        let dir = tempfile::tempdir().unwrap();
        let mut database = Database::open(store_path(&dir)).unwrap();
        database.add_film(film("Ilford", "HP5 Plus", 400, Some("120")));
        database.save().unwrap();
        // the reload after writing reflects the file, which has no format
        assert_eq!(database.films()[0].format, None);
    }

    #[test]
    fn load_sorts_and_dedups_file_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);
        fs::write(
            &path,
            r#"{
                "films": [
                    {"make": "Kodak", "name": "Portra", "iso": 160},
                    {"make": "Ilford", "name": "HP5 Plus", "iso": 400},
                    {"make": "Ilford", "name": "HP5 Plus", "iso": 400}
                ],
                "cameras": [],
                "lenses": []
            }"#,
        )
        .unwrap();
        let database = Database::open(&path).unwrap();
        assert_eq!(database.films().len(), 2);
        assert_eq!(database.films()[0].make, "Ilford");
    }
}
