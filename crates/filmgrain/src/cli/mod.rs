pub mod camera;
pub mod export;
pub mod film;
pub mod lens;
pub mod show;
pub mod strip;
pub mod write;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fgrn",
    about = "Photographic metadata writing for analog photography",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write metadata tags to image files
    Write(write::WriteArgs),
    /// Clear metadata tags on image files
    Strip {
        /// Image files
        files: Vec<String>,
        /// Tag to clear, repeatable (e.g. EXIF:Artist)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Print a JSON metadata report
    Show {
        /// Image files
        files: Vec<String>,
    },
    /// Export metadata to a JSON report file
    Export {
        /// Image files
        files: Vec<String>,
        /// Report destination
        #[arg(long)]
        out: PathBuf,
    },
    /// Apply metadata from a JSON report file
    Import {
        /// Image files
        files: Vec<String>,
        /// Previously exported report
        #[arg(long)]
        from: PathBuf,
    },
    /// Manage film presets
    Film {
        #[command(subcommand)]
        command: FilmCommands,
    },
    /// Manage camera presets
    Camera {
        #[command(subcommand)]
        command: CameraCommands,
    },
    /// Manage lens presets
    Lens {
        #[command(subcommand)]
        command: LensCommands,
    },
}

#[derive(Subcommand)]
pub enum FilmCommands {
    /// Store a film preset
    Add {
        /// Manufacturer
        make: String,
        /// Film name
        name: String,
        /// Box speed
        iso: String,
        /// Film format (e.g. 135, 120)
        #[arg(long)]
        format: Option<String>,
    },
    /// Delete a film preset
    Remove {
        /// Manufacturer
        make: String,
        /// Film name
        name: String,
        /// Box speed
        iso: String,
    },
    /// List stored film presets
    List,
}

#[derive(Subcommand)]
pub enum CameraCommands {
    /// Store a camera preset
    Add {
        /// Manufacturer
        make: String,
        /// Model name
        model: String,
        /// Crop factor relative to 35mm
        crop: String,
        /// Body serial number
        #[arg(long, default_value = "")]
        serial: String,
    },
    /// Delete a camera preset
    Remove {
        /// Manufacturer
        make: String,
        /// Model name
        model: String,
        /// Crop factor relative to 35mm
        crop: String,
        /// Body serial number
        #[arg(long, default_value = "")]
        serial: String,
    },
    /// List stored camera presets
    List,
}

#[derive(Subcommand)]
pub enum LensCommands {
    /// Store a lens preset
    Add {
        /// Manufacturer
        make: String,
        /// Model name
        model: String,
        /// Focal length or zoom range (e.g. 50mm, 24-70mm)
        focal_length: String,
        /// Lens serial number
        #[arg(long, default_value = "")]
        serial: String,
    },
    /// Delete a lens preset
    Remove {
        /// Manufacturer
        make: String,
        /// Model name
        model: String,
        /// Lens serial number
        #[arg(long, default_value = "")]
        serial: String,
    },
    /// List stored lens presets
    List,
}
