use anyhow::{bail, Result};
use clap::Parser;
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Apply photo-export sidecar metadata to media files using ExifTool.
#[derive(Debug, Parser)]
#[command(name = "apply_sidecars", version)]
pub struct Args {
    /// Directory containing media files and .json/.JSON sidecars (scanned recursively)
    pub directory: PathBuf,

    /// Delete JSON sidecars after applying metadata
    #[arg(long)]
    pub delete_sidecars: bool,

    /// Program used to write metadata
    #[arg(long, value_name = "PROGRAM", default_value = "exiftool")]
    pub exiftool: String,

    /// Do not show a progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Increase log output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Parse command line arguments and validate the input directory
    pub fn parse_and_validate() -> Result<Self> {
        let args = Args::parse();
        validate_directory(&args.directory)?;
        Ok(args)
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

/// Validate that the input directory exists and is a directory
pub fn validate_directory(dir: &Path) -> Result<()> {
    if !dir.exists() {
        bail!("Input directory does not exist: {}", dir.display());
    }
    if !dir.is_dir() {
        bail!("Input path is not a directory: {}", dir.display());
    }
    Ok(())
}
