use clap::{Parser, Subcommand};
use reelsort::rename::LinkAction;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reelsort")]
#[command(author, version, about = "Organize movies and TV episodes into a templated library")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rename every movie and episode found under a directory into the library
    Rename {
        /// Directory to scan for media
        #[arg(required = true)]
        root: PathBuf,

        /// How files are placed: copy, move, symlink or hardlink
        #[arg(short, long)]
        action: Option<LinkAction>,

        /// Abort on the first failed item
        #[arg(long)]
        strict: bool,

        /// Replace existing files in the library
        #[arg(long)]
        force: bool,

        /// Show what would be done without touching the filesystem
        #[arg(long)]
        dry_run: bool,
    },

    /// List media found under a directory
    Scan {
        /// Directory to scan
        #[arg(required = true)]
        root: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the tags extracted from a release name
    Parse {
        /// Release name, with or without extension
        #[arg(required = true)]
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
