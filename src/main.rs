//! tscatalog command-line tool
//!
//! Inspects and rewrites Qt Linguist `.ts` files.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context as _};
use clap::{Parser, Subcommand};
use tracing::info;

use tscatalog::{
    catalog::Catalog,
    config::Settings,
    i18n::Translations,
    utils::{helpers::catalog_path, logging},
};

#[derive(Parser, Debug)]
#[command(name = "tscatalog", version, about = "Inspect and rewrite Qt Linguist translation files")]
struct Cli {
    /// Settings file (defaults to `config.*` in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use this `.ts` file instead of the configured translations directory
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Locale to resolve in the translations directory (e.g. `da_DK`)
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate one string; `\n` in SOURCE stands for a line break
    Lookup { context: String, source: String },
    /// List context names
    Contexts,
    /// Show translation coverage
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Parse the file and verify it is written back unchanged
    Check,
    /// Write the catalog back in canonical layout
    Normalize { output: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::from_path(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::new()?,
    };
    settings.validate()?;

    // Initialize logging
    let _guard = logging::init_logging(&settings.logging)?;
    info!("Starting {}", tscatalog::info());

    let (path, catalog) = match open_catalog(&cli, &settings).await {
        Ok(opened) => opened,
        Err(e) => {
            logging::log_catalog_error(&e, "load");
            return Err(e.into());
        }
    };

    match cli.command {
        Command::Lookup { context, source } => {
            let source = source.replace("\\n", "\n");
            println!("{}", catalog.lookup(&context, &source));
        }
        Command::Contexts => {
            for name in catalog.contexts() {
                println!("{}", name);
            }
        }
        Command::Stats { json } => {
            let stats = catalog.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!(
                    "{}: {}/{} translated",
                    stats.language.as_deref().unwrap_or("?"),
                    stats.translated,
                    stats.total
                );
                for context in &stats.contexts {
                    println!(
                        "  {:<16} {:>4}/{:<4} unfinished {:<4} same as source {}",
                        context.name, context.translated, context.total, context.unfinished, context.identical
                    );
                }
            }
        }
        Command::Check => {
            let original = tokio::fs::read_to_string(&path).await?;
            let written = catalog.to_ts_string();
            match first_difference(&original, &written) {
                None => println!("{}: ok, {} messages, canonical layout", path.display(), catalog.len()),
                Some(offset) => bail!(
                    "{}: parsed {} messages but re-serialization differs at byte {}",
                    path.display(),
                    catalog.len(),
                    offset
                ),
            }
        }
        Command::Normalize { output } => {
            catalog.write(&output)?;
            println!("{}", output.display());
        }
    }

    Ok(())
}

/// Load the catalog named by `--file`, or resolve `--locale` through the registry
async fn open_catalog(cli: &Cli, settings: &Settings) -> tscatalog::Result<(PathBuf, Arc<Catalog>)> {
    if let Some(file) = &cli.file {
        let catalog = Catalog::load_async(file).await?;
        return Ok((file.clone(), Arc::new(catalog)));
    }

    let mut translations = Translations::new(&settings.catalog);
    translations.load_translations().await?;

    let locale = translations.resolve_locale(cli.locale.as_deref());
    let catalog = translations.require(Some(&locale))?;
    let path = translations
        .catalog_file(&locale)
        .map(PathBuf::from)
        .unwrap_or_else(|| catalog_path(&settings.catalog.translations_dir, &locale));
    Ok((path, catalog))
}

/// Byte offset of the first difference, `None` when equal
fn first_difference(a: &str, b: &str) -> Option<usize> {
    if a == b {
        return None;
    }
    let common = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    Some(common)
}
