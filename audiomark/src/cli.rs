//! Command-line interface definitions for audiomark

use crate::pipeline::DEFAULT_SEPARATOR;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for both subcommands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Bookmarks grouped under chapter headings with deep links
    #[default]
    Markdown,
    /// Parsed bookmark records as JSON, for inspecting the source listing
    Json,
}

/// CLI structure for the audiomark application
#[derive(Parser)]
#[command(name = "audiomark")]
#[command(version)]
#[command(about = "Audiobook bookmark listings to Markdown", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for audiomark
#[derive(Subcommand)]
pub enum Commands {
    /// Render a combined payload: "<base-link><sep><chapters><sep><bookmarks>"
    ///
    /// This is the launcher-workflow contract: three clipboard items pasted
    /// into one argument, oldest copy first.
    Render {
        /// The combined payload
        input: String,

        /// Token separating the three sections
        #[arg(long, default_value = DEFAULT_SEPARATOR)]
        separator: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: OutputFormat,

        /// Log skipped records and chapter assignments to stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Build from the three listings stored in separate files
    Build {
        /// File holding the raw chapter listing
        #[arg(long)]
        chapters: PathBuf,

        /// File holding the raw bookmark listing
        #[arg(long)]
        bookmarks: PathBuf,

        /// File holding the base link template
        #[arg(long)]
        link: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: OutputFormat,

        /// Log skipped records and chapter assignments to stderr
        #[arg(short, long)]
        verbose: bool,
    },
}
