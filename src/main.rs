//! objtab CLI - inspect and load object entry catalogs.
//!
//! Catalogs are read as already-decoded chunk bodies: one 16-byte entry per
//! slot of the flat index space.

mod resolver;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use objtab::prelude::*;
use objtab::Error;

use crate::resolver::DirectoryResolver;

/// objtab - object entry catalog tool
#[derive(Parser)]
#[command(name = "objtab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Group configuration JSON (defaults to the standard table)
    #[arg(short, long, global = true, env = "OBJTAB_GROUPS")]
    groups: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the present entries of a catalog
    Inspect {
        /// Decoded catalog file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Only show entries of this type code (0-10)
        #[arg(short = 't', long)]
        object_type: Option<u8>,
    },

    /// Load every object a catalog requires from a directory of .DAT files
    Load {
        /// Decoded catalog file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Directory holding object definition files
        #[arg(short, long, env = "OBJTAB_OBJECTS")]
        objects: PathBuf,

        /// Bitmask of installed expansions (bit n = source code n)
        #[arg(short, long, default_value_t = 0)]
        expansions: u16,
    },

    /// Print the group configuration
    Groups {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.groups.as_deref())?;

    match cli.command {
        Commands::Inspect { catalog, object_type } => {
            cmd_inspect(&config, &catalog, object_type)?;
        }
        Commands::Load {
            catalog,
            objects,
            expansions,
        } => {
            cmd_load(config, &catalog, &objects, expansions)?;
        }
        Commands::Groups { json } => {
            cmd_groups(&config, json)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GroupConfig> {
    let Some(path) = path else {
        return Ok(GroupConfig::standard());
    };
    debug!(path = %path.display(), "reading group configuration");
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read group configuration {}", path.display()))?;
    GroupConfig::from_json(&json).context("Failed to parse group configuration")
}

fn read_catalog(config: &GroupConfig, path: &Path) -> Result<Vec<ObjectEntry>> {
    let data = fs::read(path).context("Failed to read catalog")?;
    decode_entries(&data, config.total_capacity()).context("Failed to decode catalog")
}

fn cmd_inspect(config: &GroupConfig, catalog: &Path, object_type: Option<u8>) -> Result<()> {
    let filter = match object_type {
        Some(code) => Some(
            ObjectType::from_code(code)
                .with_context(|| format!("Unknown object type code {code}"))?,
        ),
        None => None,
    };

    let entries = read_catalog(config, catalog)?;

    let mut count = 0;
    for ((flat_index, entry), (ty, slot)) in entries.iter().enumerate().zip(config.positions()) {
        if !entry.is_present() || filter.is_some_and(|f| f != ty) {
            continue;
        }

        println!(
            "{:>5} {:<18} {:>3} {}",
            flat_index,
            ty.name(),
            slot,
            entry.identifier()
        );
        count += 1;
    }

    println!("\nTotal: {} of {} slots in use", count, entries.len());

    Ok(())
}

fn cmd_load(config: GroupConfig, catalog: &Path, objects: &Path, expansions: u16) -> Result<()> {
    let entries = read_catalog(&config, catalog)?;
    let mut resolver = DirectoryResolver::open(objects)
        .with_context(|| format!("Failed to open object directory {}", objects.display()))?;
    println!("Indexed {} object definitions in {}", resolver.len(), objects.display());

    let present = entries.iter().filter(|e| e.is_present()).count();
    let pb = ProgressBar::new(present as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut table: ObjectTable<Vec<u8>> = ObjectTable::new(config);
    let result = table.load_entries(
        &entries,
        |ty: ObjectType, entry: &ObjectEntry, encoding: ChunkEncoding| {
            pb.set_message(entry.name_str());
            let payload = resolver.resolve(ty, entry, encoding);
            pb.inc(1);
            payload
        },
    );
    pb.finish_and_clear();

    match result {
        Ok(summary) => {
            println!(
                "Loaded {} objects in {:?} ({} empty slots)",
                summary.loaded,
                start.elapsed(),
                summary.skipped
            );
            for spec in table.config().groups() {
                let loaded = table
                    .iter_loaded()
                    .filter(|o| o.object_type == spec.object_type)
                    .count();
                if loaded > 0 {
                    println!("  {:<18} {:>3}/{}", spec.object_type.name(), loaded, spec.capacity);
                }
            }
            Ok(())
        }
        Err(Error::LoadFailed { failures }) => {
            for failure in &failures {
                eprintln!(
                    "{:>5} {:<18} {} ({})",
                    failure.flat_index,
                    failure.object_type.name(),
                    failure.reason(expansions),
                    failure.error
                );
            }
            anyhow::bail!("{} required objects could not be loaded", failures.len())
        }
        Err(e) => Err(e).context("Failed to load catalog"),
    }
}

fn cmd_groups(config: &GroupConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    for spec in config.groups() {
        let offset = config.group_offset(spec.object_type);
        println!(
            "{:>2} {:<18} {:>4} {:>4}..{:<4} {:?} {:?}",
            spec.object_type.code(),
            spec.object_type.name(),
            spec.capacity,
            offset,
            offset + spec.capacity,
            spec.encoding,
            spec.match_rule
        );
    }
    println!("\nTotal: {} slots", config.total_capacity());

    Ok(())
}
