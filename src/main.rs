//! Command-line importer.
//!
//! Walks every note in the default Apple Notes account, converts each
//! exported body to blocks, and writes one JSON page document per note.
//! Locked notes and notes with empty bodies are skipped; a note that
//! fails mid-import is logged and the run continues.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use env_logger::Env;

use notelift::{
    AppConfig, AppleNotes, JsonPageStore, MemoryStore, NoteSource, PageBuilder, PageStore,
};

/// Import Apple Notes into JSON page documents.
#[derive(Debug, Parser)]
#[command(name = "notelift", version, about = "Import Apple Notes into JSON page documents")]
struct Cli {
    /// Path to a YAML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory to write page documents into
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Append note metadata to each page as a YAML code block
    #[arg(long)]
    meta: bool,

    /// Append the raw exported HTML to each page as a code block
    #[arg(long)]
    html: bool,

    /// Keep the first element instead of dropping it as a title duplicate
    #[arg(long)]
    title: bool,

    /// Convert every note without writing anything to disk
    #[arg(long)]
    dry_run: bool,

    /// More logging (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Errors only
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            AppConfig::load(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => AppConfig::default(),
    };

    init_logging(&cli, &config);

    let source = AppleNotes::new();
    if cli.dry_run {
        let builder = configure(PageBuilder::new(MemoryStore::new(), &config.parent), &cli, &config);
        let imported = run(&source, builder)?;
        log::info!("dry run complete; {} page(s) built", imported);
    } else {
        let output_dir = cli.output.clone().unwrap_or_else(|| config.output_dir.clone());
        let builder = configure(
            PageBuilder::new(JsonPageStore::new(&output_dir), &config.parent),
            &cli,
            &config,
        );
        let imported = run(&source, builder)?;
        log::info!("imported {} page(s) into {}", imported, output_dir.display());
    }
    Ok(())
}

fn init_logging(cli: &Cli, config: &AppConfig) {
    let filter = if cli.quiet {
        "error".to_string()
    } else {
        match cli.verbose {
            0 => config
                .log_filter
                .clone()
                .unwrap_or_else(|| "info".to_string()),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(filter)).init();
}

/// Flags only ever turn behavior on; the config file sets the baseline.
fn configure<S: PageStore>(builder: PageBuilder<S>, cli: &Cli, config: &AppConfig) -> PageBuilder<S> {
    builder
        .with_skip_title(config.skip_title && !cli.title)
        .with_include_meta(config.include_meta || cli.meta)
        .with_include_html(config.include_html || cli.html)
}

fn run<S: PageStore>(source: &impl NoteSource, mut builder: PageBuilder<S>) -> Result<usize> {
    let note_ids = source.note_ids().context("listing notes")?;
    log::info!("found {} note(s)", note_ids.len());

    let mut imported = 0usize;
    for note_id in note_ids {
        let note = match source.fetch(&note_id) {
            Ok(Some(note)) => note,
            Ok(None) => {
                log::warn!("empty note; skipping");
                continue;
            }
            Err(err) => {
                log::error!("failed to load note {}: {:#}", note_id, err);
                continue;
            }
        };

        if note.meta.locked {
            log::warn!("LOCKED - {}", note.meta.name);
            continue;
        }

        log::info!("Processing - {}", note.meta.name);
        match builder.build(&note) {
            Ok(page) => {
                log::info!(":: {} => {}", note.meta.name, page.url);
                imported += 1;
            }
            Err(err) => log::error!("failed to import '{}': {:#}", note.meta.name, err),
        }
    }
    Ok(imported)
}
