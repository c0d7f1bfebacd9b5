//! audiomark - Audiobook bookmark listings to Markdown
//!
//! Takes the chapter listing, bookmark listing and deep-link template
//! copied out of an audiobook player and produces one Markdown document
//! with bookmarks grouped under chapter headings, each one a clickable
//! timestamped link back into the player.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(dead_code)]

mod cli;
mod markdown_exporter;
mod pipeline;
mod source_model;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use std::path::Path;

/// Main entry point for the audiomark CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            separator,
            format,
            verbose,
        } => {
            init_logging(verbose);
            handle_render_command(&input, &separator, format)?;
        }

        Commands::Build {
            chapters,
            bookmarks,
            link,
            output,
            format,
            verbose,
        } => {
            init_logging(verbose);
            handle_build_command(&chapters, &bookmarks, &link, output.as_deref(), format)?;
        }
    }

    Ok(())
}

/// Initialize logging; --verbose raises the filter to debug
fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// Handle the render command (combined single-argument payload)
fn handle_render_command(input: &str, separator: &str, format: OutputFormat) -> Result<()> {
    let sections = pipeline::split_input(input, separator)
        .context("input payload does not have the expected shape")?;

    let rendered = render_sections(&sections, format)?;
    println!("{}", rendered);

    Ok(())
}

/// Handle the build command (three listing files)
fn handle_build_command(
    chapters: &Path,
    bookmarks: &Path,
    link: &Path,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let chapters_text = read_listing(chapters)?;
    let bookmarks_text = read_listing(bookmarks)?;
    let base_link = read_listing(link)?;

    let sections = pipeline::RawSections {
        base_link: base_link.trim(),
        chapters: chapters_text.trim(),
        bookmarks: bookmarks_text.trim(),
    };

    let rendered = render_sections(&sections, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", rendered))
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("✓ Successfully wrote: {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Run the pipeline over split sections and format the result
fn render_sections(sections: &pipeline::RawSections<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(pipeline::process(sections)),
        OutputFormat::Json => {
            let chapters = pipeline::parse_chapters(sections.chapters);
            let bookmarks = pipeline::parse_bookmarks(sections.bookmarks, &chapters);
            serde_json::to_string_pretty(&bookmarks).context("failed to serialize bookmarks")
        }
    }
}

/// Read one listing file
fn read_listing(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
