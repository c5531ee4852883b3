//! affix_sim - Seeded loot batch simulator
//!
//! Generates a batch of items from a content pool and base catalog, then
//! prints a summary or the rolled items as JSON.
//!
//! ```text
//! affix_sim [--pool FILE] [--bases FILE] [--constants FILE]
//!           [--seed N] [--count N] [--level N] [--rarity normal|magic|rare] [--json]
//! ```

mod simulation;

use affix_core::config::{
    default_bases, default_pool, load_bases, load_pool, load_toml, ConfigError, GenerationConstants,
};
use affix_core::generate::{RarityRoll, TargetRarity};
use affix_core::types::Rarity;
use clap::{Parser, ValueEnum};
use simulation::LootSimulation;
use std::path::PathBuf;
use thiserror::Error;

/// Command line error
#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Seeded loot batch simulator
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "affix_sim")]
#[command(about = "Generate seeded loot batches from an affix pool", long_about = None)]
#[command(version)]
struct Args {
    /// Affix pool TOML (bundled pool if omitted)
    #[arg(long)]
    pool: Option<PathBuf>,

    /// Base catalog TOML (bundled catalog if omitted)
    #[arg(long)]
    bases: Option<PathBuf>,

    /// Generation constants TOML
    #[arg(long)]
    constants: Option<PathBuf>,

    /// Run seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of items to generate
    #[arg(long, default_value_t = 100)]
    count: u32,

    /// Item level
    #[arg(long, default_value_t = 50)]
    level: u32,

    /// Force a rarity instead of rolling one
    #[arg(long, value_enum)]
    rarity: Option<RarityArg>,

    /// Print the generated items as JSON
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum RarityArg {
    Normal,
    Magic,
    Rare,
}

impl From<RarityArg> for TargetRarity {
    fn from(arg: RarityArg) -> Self {
        match arg {
            RarityArg::Normal => TargetRarity::Normal,
            RarityArg::Magic => TargetRarity::Magic,
            RarityArg::Rare => TargetRarity::Rare,
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let pool = match &args.pool {
        Some(path) => load_pool(path)?,
        None => default_pool(),
    };
    let catalog = match &args.bases {
        Some(path) => load_bases(path)?,
        None => default_bases(),
    };
    let constants = match &args.constants {
        Some(path) => {
            let constants: GenerationConstants = load_toml(path)?;
            constants.validate()?;
            constants
        }
        None => GenerationConstants::default(),
    };

    log::info!(
        "Loaded {} affix templates and {} bases",
        pool.len(),
        catalog.len()
    );

    let rarity_roll = match args.rarity {
        Some(target) => RarityRoll::Forced(target.into()),
        None => RarityRoll::from(constants.rarity),
    };

    let (summary, items) = LootSimulation::run(
        &pool,
        &constants,
        &catalog.bases,
        args.level,
        rarity_roll,
        args.count,
        args.seed,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    println!("Generated {} items at level {} (seed {})", summary.item_count, args.level, args.seed);
    for rarity in [Rarity::Normal, Rarity::Magic, Rarity::Rare] {
        println!(
            "  {:<8} {:>5}  ({:.1}%)",
            rarity.name(),
            summary.rarity_counts.get(&rarity).copied().unwrap_or(0),
            summary.rarity_rate(rarity)
        );
    }
    println!("Average affixes per item: {:.2}", summary.avg_affixes());
    println!("Unfilled slots: {}", summary.unfilled_slots);
    println!("Most common affixes:");
    for (name, count) in summary.top_affixes(10) {
        println!("  {:<24} {}", name, count);
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("affix_sim").chain(list.iter().copied()))
    }

    #[test]
    fn test_default_args() {
        let parsed = args(&[]).unwrap();
        assert_eq!(parsed.seed, 0);
        assert_eq!(parsed.count, 100);
        assert_eq!(parsed.level, 50);
        assert_eq!(parsed.rarity, None);
        assert!(parsed.pool.is_none());
        assert!(!parsed.json);
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["--seed", "7", "--count", "20", "--level", "68", "--rarity", "rare", "--json"]).unwrap();
        assert_eq!(parsed.seed, 7);
        assert_eq!(parsed.count, 20);
        assert_eq!(parsed.level, 68);
        assert_eq!(parsed.rarity, Some(RarityArg::Rare));
        assert_eq!(TargetRarity::from(RarityArg::Rare), TargetRarity::Rare);
        assert!(parsed.json);

        let parsed = args(&["--pool", "pool.toml"]).unwrap();
        assert_eq!(parsed.pool, Some(PathBuf::from("pool.toml")));
    }

    #[test]
    fn test_parse_equals_form() {
        let parsed = args(&["--seed=7", "--rarity=magic"]).unwrap();
        assert_eq!(parsed.seed, 7);
        assert_eq!(parsed.rarity, Some(RarityArg::Magic));
    }

    #[test]
    fn test_help_is_generated() {
        let err = args(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_parse_errors() {
        assert!(args(&["--seed"]).is_err());
        assert_eq!(args(&["--count", "many"]).unwrap_err().kind(), ErrorKind::ValueValidation);
        assert_eq!(args(&["--rarity", "unique"]).unwrap_err().kind(), ErrorKind::InvalidValue);
        assert_eq!(args(&["--verbose"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_missing_pool_file() {
        let parsed = args(&["--pool", "does/not/exist.toml"]).unwrap();
        assert!(matches!(run(parsed), Err(CliError::Config(ConfigError::IoError(_)))));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
