//! Converse catalog tool - main entry point
//!
//! Read-only maintenance commands over Linguist `.ts` catalogs: validate a
//! file, resolve a message the way the UI would, print entry statistics, or
//! rewrite a catalog in canonical form.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use converse_i18n::format as substitute;
use converse_i18n::{
    serialize, DuplicatePolicy, LoadOptions, Translation, TranslationCatalog, TranslationStatus,
    TsDocument,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect and query Linguist translation catalogs", long_about = None)]
struct Args {
    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a catalog and report whether it is usable
    Validate {
        /// Catalog file to check
        file: PathBuf,
        /// Reject duplicate (context, source) pairs instead of keeping the last one
        #[arg(long)]
        strict: bool,
    },
    /// Resolve a single message the way the UI would
    Query {
        /// Catalog file to query
        file: PathBuf,
        /// Context the message belongs to
        #[arg(long)]
        context: String,
        /// Source text of the message
        #[arg(long)]
        source: String,
        /// Plural count, for numerus messages
        #[arg(long)]
        count: Option<i64>,
        /// Values substituted for %1..%9
        args: Vec<String>,
    },
    /// Print entry statistics for a catalog
    Stats {
        /// Catalog file to inspect
        file: PathBuf,
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Rewrite a catalog in canonical form
    Export {
        /// Catalog file to read
        file: PathBuf,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct CatalogStats {
    language: String,
    contexts: usize,
    messages: usize,
    plural_messages: usize,
    obsolete: usize,
    unfinished: usize,
    per_context: BTreeMap<String, usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match args.command {
        Command::Validate { file, strict } => validate(&file, strict),
        Command::Query {
            file,
            context,
            source,
            count,
            args,
        } => query(&file, &context, &source, count, &args),
        Command::Stats { file, json } => stats(&file, json),
        Command::Export { file, output } => export(&file, &output),
    }
}

fn load_document(file: &Path) -> Result<TsDocument> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    TsDocument::parse(&content).with_context(|| format!("failed to parse {}", file.display()))
}

fn validate(file: &Path, strict: bool) -> Result<()> {
    let doc = load_document(file)?;
    let options = LoadOptions {
        duplicates: if strict {
            DuplicatePolicy::Strict
        } else {
            DuplicatePolicy::LastWins
        },
    };
    let catalog = TranslationCatalog::from_document(&doc, &options)
        .with_context(|| format!("{} failed validation", file.display()))?;

    println!(
        "{}: ok ({} active entries in {} contexts, {} obsolete)",
        file.display(),
        catalog.len(),
        catalog.contexts().len(),
        catalog.obsolete_entries().len()
    );
    Ok(())
}

fn query(file: &Path, context: &str, source: &str, count: Option<i64>, args: &[String]) -> Result<()> {
    let doc = load_document(file)?;
    let catalog = TranslationCatalog::from_document(&doc, &LoadOptions::default())?;

    let resolved = match count {
        Some(n) => catalog.translate_plural(context, source, n),
        None => catalog.translate(context, source).to_string(),
    };
    let resolved = if args.is_empty() {
        resolved
    } else {
        let values: Vec<&str> = args.iter().map(String::as_str).collect();
        substitute(&resolved, &values)
    };

    println!("{resolved}");
    Ok(())
}

fn stats(file: &Path, json: bool) -> Result<()> {
    let doc = load_document(file)?;
    let stats = collect_stats(&doc);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("language: {}", stats.language);
        println!(
            "{} messages in {} contexts ({} plural, {} obsolete, {} unfinished)",
            stats.messages, stats.contexts, stats.plural_messages, stats.obsolete, stats.unfinished
        );
        for (context, count) in &stats.per_context {
            println!("  {context}: {count}");
        }
    }
    Ok(())
}

fn export(file: &Path, output: &Path) -> Result<()> {
    let doc = load_document(file)?;
    fs::write(output, serialize(&doc))
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("Wrote canonical catalog to {}", output.display());
    Ok(())
}

fn collect_stats(doc: &TsDocument) -> CatalogStats {
    let mut stats = CatalogStats {
        language: doc.language.clone(),
        contexts: doc.contexts.len(),
        messages: 0,
        plural_messages: 0,
        obsolete: 0,
        unfinished: 0,
        per_context: BTreeMap::new(),
    };
    for context in &doc.contexts {
        stats.messages += context.messages.len();
        stats
            .per_context
            .insert(context.name.clone(), context.messages.len());
        for message in &context.messages {
            if matches!(message.translation, Translation::Plural(_)) {
                stats.plural_messages += 1;
            }
            match message.status {
                TranslationStatus::Obsolete => stats.obsolete += 1,
                TranslationStatus::Unfinished => stats.unfinished += 1,
                TranslationStatus::Finished => {}
            }
        }
    }
    stats
}
