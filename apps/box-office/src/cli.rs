//! # Command Line Interface
//!
//! ```text
//! box-office [--config <path>] demo    [--output xml|json]
//! box-office [--config <path>] reserve --performance 1 --customer 1
//!                                      --seats 4 --category standard
//!                                      [--output xml|json]
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use encore_core::{CustomerId, PerformanceId, ZoneCategory};

use crate::config::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "box-office", version, about = "Theater seat reservations")]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = "ENCORE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay the demo evening: two bookings for the premiere, one for the preview
    Demo {
        /// Receipt format (defaults to the configured one)
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// Reserve seats for a seeded performance
    Reserve(ReserveArgs),
}

#[derive(Debug, Args)]
pub struct ReserveArgs {
    /// Performance id (1, 2 or 3 in the seeded venue)
    #[arg(long)]
    pub performance: PerformanceId,

    #[arg(long)]
    pub customer: CustomerId,

    /// Number of contiguous seats
    #[arg(long)]
    pub seats: usize,

    /// standard or premium
    #[arg(long, value_parser = parse_category, default_value = "standard")]
    pub category: ZoneCategory,

    /// Receipt format (defaults to the configured one)
    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,
}

fn parse_category(s: &str) -> Result<ZoneCategory, String> {
    s.parse().map_err(|e: encore_core::ValidationError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reserve() {
        let cli = Cli::try_parse_from([
            "box-office",
            "reserve",
            "--performance",
            "1",
            "--customer",
            "7",
            "--seats",
            "4",
            "--category",
            "Premium",
            "--output",
            "json",
        ])
        .unwrap();

        match cli.command {
            Command::Reserve(args) => {
                assert_eq!(args.performance, 1);
                assert_eq!(args.customer, 7);
                assert_eq!(args.seats, 4);
                assert_eq!(args.category, ZoneCategory::Premium);
                assert_eq!(args.output, Some(OutputFormat::Json));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_category_defaults_to_standard() {
        let cli = Cli::try_parse_from([
            "box-office", "reserve", "--performance", "2", "--customer", "1", "--seats", "2",
        ])
        .unwrap();
        let Command::Reserve(args) = cli.command else {
            panic!("expected reserve");
        };
        assert_eq!(args.category, ZoneCategory::Standard);
    }

    #[test]
    fn test_rejects_unknown_category() {
        let result = Cli::try_parse_from([
            "box-office", "reserve", "--performance", "1", "--customer", "1", "--seats", "2",
            "--category", "balcony",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["box-office", "demo", "--config", "/tmp/encore.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/encore.toml")));
        assert!(matches!(cli.command, Command::Demo { output: None }));
    }
}
