#![deny(unsafe_code)]

//! jsongen CLI — runs the export pipeline and inspects its stages.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use jsongen_config::{EntryType, GroupConfig};
use jsongen_core::build_info::LONG_VERSION;
use jsongen_core::grouping::{fallback_for, to_entry_values};
use jsongen_core::{
    EffectAssigner, ExportReport, Exporter, GroupingEngine, RegistrySnapshot, RngStrength,
    StrengthSource,
};

/// jsongen: groups registry entries and generates per-item effect JSON.
#[derive(Parser)]
#[command(name = "jsongen", version, long_version = LONG_VERSION, about, long_about = None)]
struct Cli {
    /// Path to the group configuration file.
    #[arg(short, long, default_value = "json-generator/group_config.json")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full export and write every artifact.
    Export {
        /// Registry snapshot JSON document.
        #[arg(long)]
        registry: PathBuf,

        /// Output root; defaults to the configured output directory.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Seed for reproducible effect strengths.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the grouping of one entry type.
    Classify {
        #[arg(long)]
        registry: PathBuf,

        /// Entry type to classify (items, effects, blocks).
        #[arg(long = "type")]
        entry_type: EntryType,

        #[arg(long, value_enum, default_value_t = Mode::Group)]
        mode: Mode,

        /// Put unmatched entries in `Uncategorized` instead of using the
        /// type's fallback classifier.
        #[arg(long)]
        no_fallback: bool,
    },

    /// Print the item → effect assignment.
    Assign {
        #[arg(long)]
        registry: PathBuf,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate, display, or create the configuration.
    Config {
        /// Print the resolved configuration.
        #[arg(long)]
        show: bool,

        /// Print as TOML instead of JSON.
        #[arg(long, requires = "show")]
        toml: bool,

        /// Write the packaged default configuration.
        #[arg(long, conflicts_with = "show")]
        init: bool,
    },
}

/// Output shape of `classify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Group name → members.
    Group,
    /// Category → group → members.
    Category,
    /// Namespace → path → tags.
    Namespace,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Export {
            registry,
            output,
            seed,
        } => {
            let report = cmd_export(&cli.config, &registry, output, seed).await?;
            println!("Export finished: {report}");
            for failure in &report.failed {
                eprintln!("  failed {}: {}", failure.path.display(), failure.error);
            }
        }
        Commands::Classify {
            registry,
            entry_type,
            mode,
            no_fallback,
        } => {
            let json = cmd_classify(&cli.config, &registry, entry_type, mode, no_fallback).await?;
            println!("{json}");
        }
        Commands::Assign { registry, seed } => {
            println!("{}", cmd_assign(&cli.config, &registry, seed).await?);
        }
        Commands::Config { show, toml, init } => {
            println!("{}", cmd_config(&cli.config, show, toml, init).await?);
        }
    }

    Ok(())
}

fn strength_source(seed: Option<u64>) -> Box<dyn StrengthSource> {
    match seed {
        Some(seed) => {
            info!(seed, "Using seeded effect strengths");
            Box::new(RngStrength::seeded(seed))
        }
        None => Box::new(RngStrength::thread()),
    }
}

async fn load_registry(path: &Path) -> Result<RegistrySnapshot> {
    let registry = RegistrySnapshot::load(path)
        .await
        .with_context(|| format!("cannot read registry snapshot '{}'", path.display()))?;
    info!(path = %path.display(), entries = registry.len(), "Loaded registry snapshot");
    Ok(registry)
}

async fn load_config(path: &Path) -> Result<GroupConfig> {
    GroupConfig::load_or_init(path)
        .await
        .with_context(|| format!("cannot load config '{}'", path.display()))
}

async fn cmd_export(
    config_path: &Path,
    registry_path: &Path,
    output: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<ExportReport> {
    let config = load_config(config_path).await?;
    let registry = load_registry(registry_path).await?;
    let output = output.unwrap_or_else(|| PathBuf::from(&config.output.dir));

    info!(output = %output.display(), "Starting export");
    let exporter = Exporter::new(config, output);
    let mut strength = strength_source(seed);
    let report = exporter.run(&registry, strength.as_mut()).await;
    if !report.is_complete() {
        warn!(%report, "Export finished with problems");
    }
    Ok(report)
}

async fn cmd_classify(
    config_path: &Path,
    registry_path: &Path,
    entry_type: EntryType,
    mode: Mode,
    no_fallback: bool,
) -> Result<String> {
    let config = load_config(config_path).await?;
    let registry = load_registry(registry_path).await?;
    let engine = GroupingEngine::new(&config);
    let entries = registry.entries(entry_type);
    let fallback = if no_fallback {
        None
    } else {
        fallback_for(entry_type)
    };

    let json = match mode {
        Mode::Group => serde_json::to_string_pretty(&engine.classify(entries, fallback))?,
        Mode::Category => {
            serde_json::to_string_pretty(&engine.classify_nested(entries, fallback))?
        }
        Mode::Namespace => {
            serde_json::to_string_pretty(&engine.tag_by_namespace(entries, entry_type))?
        }
    };
    Ok(json)
}

async fn cmd_assign(config_path: &Path, registry_path: &Path, seed: Option<u64>) -> Result<String> {
    let config = load_config(config_path).await?;
    let registry = load_registry(registry_path).await?;
    let engine = GroupingEngine::new(&config);

    let values = |entry_type| {
        to_entry_values(&engine.tag_by_namespace(registry.entries(entry_type), entry_type))
    };
    let items = values(EntryType::Items);
    let effects = values(EntryType::Effects);

    let assigner = EffectAssigner::from_config(&config.assignment);
    let mut strength = strength_source(seed);
    let assignment = assigner.assign(&items, &effects, strength.as_mut());
    Ok(serde_json::to_string_pretty(&assignment)?)
}

async fn cmd_config(config_path: &Path, show: bool, as_toml: bool, init: bool) -> Result<String> {
    if init {
        if config_path.exists() {
            bail!("'{}' already exists", config_path.display());
        }
        GroupConfig::write_default(config_path).await?;
        return Ok(format!("Wrote default configuration to '{}'.", config_path.display()));
    }

    let config = GroupConfig::load(config_path)
        .await
        .with_context(|| format!("invalid config '{}'", config_path.display()))?;
    if !show {
        return Ok(format!("Configuration at '{}' is valid.", config_path.display()));
    }
    if as_toml {
        toml::to_string_pretty(&config).map_err(|e| anyhow::anyhow!("TOML error: {e}"))
    } else {
        Ok(config.to_json_pretty()?)
    }
}
