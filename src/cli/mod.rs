use crate::arch::Vocabulary;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "multiarch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the platforms a container image supports
    Resolve {
        /// Image reference (e.g., quay.io/fedora/fedora:latest)
        image: String,

        /// Pull secret (auth.json or Docker config.json)
        #[arg(long, env = "REGISTRY_AUTH_FILE")]
        authfile: Option<PathBuf>,

        /// Architecture names to accept
        #[arg(long, value_enum)]
        vocabulary: Option<Vocabulary>,

        /// Leave out platforms outside the vocabulary instead of failing
        #[arg(long)]
        skip_unknown: bool,

        /// Print JSON instead of one platform per line
        #[arg(long)]
        json: bool,

        /// Fail unless the image runs on this machine's platform
        #[arg(long)]
        require_host: bool,
    },

    /// Show both spellings of architecture names
    Arch {
        /// Architecture names in either spelling (e.g., amd64, aarch64)
        #[arg(required = true)]
        names: Vec<String>,

        /// Architecture names to accept
        #[arg(long, value_enum)]
        vocabulary: Option<Vocabulary>,
    },

    /// Show version information
    Version,
}
