//! PanelDeck command-line tool.
//!
//! Creates, validates, and summarizes layout documents, and manages the
//! recent-layouts list in the local data directory.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use paneldeck_core::document::Document;
use paneldeck_core::registry::TypeRegistry;
use paneldeck_core::storage::{FileKv, KvStore, RecentEntry, RecentLayouts};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser)]
#[command(name = "paneldeck")]
#[command(about = "Create and inspect PanelDeck layout documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty layout document
    New {
        /// Output file path
        output: PathBuf,

        /// Display width in pixels
        #[arg(long, default_value = "280")]
        width: f64,

        /// Display height in pixels
        #[arg(long, default_value = "240")]
        height: f64,
    },

    /// Check that a file parses as a layout document
    Validate {
        /// Layout JSON file
        file: PathBuf,
    },

    /// Summarize a layout document
    Info {
        /// Layout JSON file
        file: PathBuf,
    },

    /// List layouts recently touched by this tool
    Recent {
        /// Forget all recent layouts
        #[arg(long)]
        clear: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::New { output, width, height } => cmd_new(&output, width, height),
        Commands::Validate { file } => cmd_validate(&file),
        Commands::Info { file } => cmd_info(&file),
        Commands::Recent { clear } => cmd_recent(clear),
    }
}

fn cmd_new(output: &Path, width: f64, height: f64) -> Result<()> {
    let mut document = Document::new();
    document.display.width = width;
    document.display.height = height;

    fs::write(output, document.to_json()?)
        .with_context(|| format!("could not write {}", output.display()))?;
    record_recent(output, &document);

    println!("created {} ({width}x{height})", output.display());
    Ok(())
}

fn cmd_validate(file: &Path) -> Result<()> {
    let document = load_document(file)?;

    let registry = TypeRegistry::with_stock_types();
    let mut host_typed = 0;
    for element in &document.elements {
        if !registry.contains(&element.type_id) {
            println!(
                "note: element {} uses host-defined type {:?}",
                element.id, element.type_id
            );
            host_typed += 1;
        }
    }
    println!(
        "ok: {} elements ({host_typed} with host-defined types)",
        document.len()
    );
    Ok(())
}

fn cmd_info(file: &Path) -> Result<()> {
    let document = load_document(file)?;
    record_recent(file, &document);

    let display = &document.display;
    println!(
        "display: {}x{}, corner radius {}, background {}",
        display.width, display.height, display.corner_radius, display.bg_color
    );
    println!("elements: {}", document.len());
    for element in &document.elements {
        let b = element.bounds();
        println!(
            "  #{:<4} {:<16} {:<24} ({}, {}) {}x{}{}{}",
            element.id,
            element.type_id,
            element.name,
            b.x0,
            b.y0,
            b.width(),
            b.height(),
            if element.locked { " [locked]" } else { "" },
            if element.visible { "" } else { " [hidden]" },
        );
    }
    Ok(())
}

fn cmd_recent(clear: bool) -> Result<()> {
    let store: Arc<dyn KvStore> = Arc::new(FileKv::default_location()?);
    let recents = RecentLayouts::new(store);

    if clear {
        recents.clear()?;
        println!("cleared recent layouts");
        return Ok(());
    }

    let entries = recents.list()?;
    if entries.is_empty() {
        println!("no recent layouts");
        return Ok(());
    }
    for entry in entries {
        println!(
            "{:<48} {:>4} elements  {}",
            entry.id, entry.element_count, entry.display_size
        );
    }
    Ok(())
}

fn load_document(file: &Path) -> Result<Document> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("could not read {}", file.display()))?;
    Document::from_json(&raw)
        .with_context(|| format!("{} is not a valid layout document", file.display()))
}

/// Best effort; a broken data directory should never fail the command.
fn record_recent(path: &Path, document: &Document) {
    let store: Arc<dyn KvStore> = match FileKv::default_location() {
        Ok(store) => Arc::new(store),
        Err(err) => {
            log::warn!("recent layouts unavailable: {err}");
            return;
        }
    };
    let entry = RecentEntry::for_document(path.to_string_lossy(), document, now_ms());
    if let Err(err) = RecentLayouts::new(store).add(entry) {
        log::warn!("could not record recent layout: {err}");
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
