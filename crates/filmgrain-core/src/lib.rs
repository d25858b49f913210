pub mod config;
pub mod convert;
pub mod countries;
pub mod database;
pub mod error;
pub mod exiftool;
pub mod models;
pub mod types;
pub mod validate;

pub use config::{Config, ConfigError};
pub use convert::FormatError;
pub use database::Database;
pub use error::{Error, ExecutionError, Result, StoreError, ValidationError};
pub use exiftool::{ExifTool, SystemRunner, ToolOutput, ToolRunner, FLASH_VALUES};
pub use models::{Camera, CropFactor, Film, FilmFormat, Lens, UnknownFilmFormat};
pub use types::{MetadataRecord, RunOutcome};
