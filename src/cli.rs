use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::convert::DEFAULT_CONVERTER;

/// Paver - incremental build tool for mod content
#[derive(Parser, Debug)]
#[command(name = "paver")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the source tree, copy/convert what changed, remove stale outputs
    Build {
        /// Path to the source directory
        #[arg(short, long, default_value = "./source")]
        source: PathBuf,

        /// Path to the output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Path to the image converter executable
        #[arg(long, default_value = DEFAULT_CONVERTER)]
        converter: PathBuf,

        /// Skip interactive prompts (auto-confirm stale-file removal)
        #[arg(short, long)]
        yes: bool,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove outputs with no corresponding source file; touch nothing else
    Clean {
        /// Path to the source directory
        #[arg(short, long, default_value = "./source")]
        source: PathBuf,

        /// Path to the output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Skip interactive prompts (auto-confirm stale-file removal)
        #[arg(short, long)]
        yes: bool,

        /// Dry run - show what would be deleted
        #[arg(long)]
        dry_run: bool,
    },
}
