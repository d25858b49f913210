use anyhow::Result;
use clap::Parser;

use filmgrain::cli::{CameraCommands, Cli, Commands, FilmCommands, LensCommands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    dispatch(cli.command)
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Write(args) => filmgrain::cli::write::run(&args),
        Commands::Strip { files, tags } => filmgrain::cli::strip::run(&files, &tags),
        Commands::Show { files } => filmgrain::cli::show::run(&files),
        Commands::Export { files, out } => filmgrain::cli::export::run_export(&files, &out),
        Commands::Import { files, from } => filmgrain::cli::export::run_import(&files, &from),
        Commands::Film { command } => dispatch_film(command),
        Commands::Camera { command } => dispatch_camera(command),
        Commands::Lens { command } => dispatch_lens(command),
    }
}

fn dispatch_film(command: FilmCommands) -> Result<()> {
    match command {
        FilmCommands::Add {
            make,
            name,
            iso,
            format,
        } => filmgrain::cli::film::run_add(&make, &name, &iso, format.as_deref()),
        FilmCommands::Remove { make, name, iso } => {
            filmgrain::cli::film::run_remove(&make, &name, &iso)
        }
        FilmCommands::List => filmgrain::cli::film::run_list(),
    }
}

fn dispatch_camera(command: CameraCommands) -> Result<()> {
    match command {
        CameraCommands::Add {
            make,
            model,
            crop,
            serial,
        } => filmgrain::cli::camera::run_add(&make, &model, &crop, &serial),
        CameraCommands::Remove {
            make,
            model,
            crop,
            serial,
        } => filmgrain::cli::camera::run_remove(&make, &model, &crop, &serial),
        CameraCommands::List => filmgrain::cli::camera::run_list(),
    }
}

fn dispatch_lens(command: LensCommands) -> Result<()> {
    match command {
        LensCommands::Add {
            make,
            model,
            focal_length,
            serial,
        } => filmgrain::cli::lens::run_add(&make, &model, &focal_length, &serial),
        LensCommands::Remove {
            make,
            model,
            serial,
        } => filmgrain::cli::lens::run_remove(&make, &model, &serial),
        LensCommands::List => filmgrain::cli::lens::run_list(),
    }
}
