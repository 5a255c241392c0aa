//! skilldb CLI - rebuilds data/skills.db from data/skills.json

use anyhow::Context;
use clap::Parser;
use skilldb::config;
use skilldb::storage::{SchemaVariant, SkillStore};
use skilldb::{LoadOptions, Loader};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "skilldb")]
#[command(version)]
#[command(about = "Rebuild the skill catalog database from its JSON source")]
#[command(long_about = r#"
Reads data/skills.json, removes any existing data/skills.db and writes a
fresh `skills` table with one row per record.

Example usage:
  skilldb
  skilldb --root ./site --stats
  skilldb --variant monolingual -o build/skills-en.db
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Deployment root that data/ paths are relative to (defaults to the current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Input JSON file (defaults to <root>/data/skills.json)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output database file (defaults to <root>/data/skills.db)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Column set to write: bilingual or monolingual
    #[arg(long)]
    variant: Option<SchemaVariant>,

    /// Config file (defaults to <root>/skilldb.toml, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print catalog statistics after loading
    #[arg(long)]
    stats: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the status line
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let options = resolve_options(&cli)?;
    tracing::debug!("Loading with {:?}", options);

    let report = Loader::new(options.clone())
        .run()
        .with_context(|| format!("failed to build {}", options.output.display()))?;

    println!("{}", report);

    if cli.stats {
        let store = SkillStore::open(&report.output)?;
        let stats = store.stats()?;
        skilldb::ui::section("Catalog");
        println!("{}", skilldb::ui::stats_table(&stats));
        println!("{}", skilldb::ui::dim(&format!("schema: {}", store.variant())));
    }

    Ok(())
}

fn resolve_options(cli: &Cli) -> anyhow::Result<LoadOptions> {
    let root = cli.root.clone().unwrap_or_default();
    let root = root.as_path();
    let mut options = LoadOptions::in_root(root);

    let config_path = cli
        .config
        .as_deref()
        .map(|p| config::resolve_in(root, p))
        .unwrap_or_else(|| config::default_config_path_in(root));
    if let Some(cfg) = config::load_config(&config_path)
        .with_context(|| format!("invalid config {}", config_path.display()))?
    {
        tracing::debug!("Using config {}", config_path.display());
        options = options.with_config(root, &cfg);
    }

    if let Some(input) = &cli.input {
        options.input = config::resolve_in(root, input);
    }
    if let Some(output) = &cli.output {
        options.output = config::resolve_in(root, output);
    }
    if let Some(variant) = cli.variant {
        options.variant = variant;
    }

    Ok(options)
}
