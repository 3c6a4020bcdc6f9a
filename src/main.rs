use clap::Parser;
use log::info;
use std::path::PathBuf;

use photos2folders::config::{load_config, FileConfig, Overrides, RunConfig};
use photos2folders::{extract_sessions, sort_photos, AppointmentTableParser};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Sort photos into client folders based on sessions extracted from PDF schedules"
)]
struct Args {
    /// Use only the person's name for the main folder
    #[arg(long)]
    name_only: bool,

    /// Path to config file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base directory for the default schedule/photos/output folders
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Folder containing PDF schedules (overrides config file)
    #[arg(long)]
    schedule_dir: Option<PathBuf>,

    /// Folder of unsorted photos (overrides config file)
    #[arg(long)]
    photo_dir: Option<PathBuf>,

    /// Destination folder for sorted photos (overrides config file)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };
    let overrides = Overrides {
        schedule_dir: args.schedule_dir,
        photo_dir: args.photo_dir,
        output_dir: args.output_dir,
        name_only: args.name_only,
    };
    let config = RunConfig::resolve(&args.root, file_config, overrides);

    info!("Reading schedules from {}", config.schedule_dir.display());
    let parser = AppointmentTableParser::new();
    let sessions = extract_sessions(&config.schedule_dir, &parser)?;
    info!("Found {} sessions", sessions.len());

    info!(
        "Sorting photos from {} into {}",
        config.photo_dir.display(),
        config.output_dir.display()
    );
    let report = sort_photos(
        &config.photo_dir,
        &sessions,
        &config.output_dir,
        config.naming,
    )?;

    println!();
    print!("{}", report);

    Ok(())
}
