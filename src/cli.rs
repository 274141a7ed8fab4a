use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "strutscan")]
#[command(about = "Structural census of legacy Struts-era web applications")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Scan root directory (overrides the configuration file)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Report output path (overrides the configuration file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
