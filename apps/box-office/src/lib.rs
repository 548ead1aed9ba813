//! # Encore Box Office
//!
//! Reservation orchestrator, configuration and receipts for the box office,
//! plus the `box-office` command line entry point.
//!
//! ## Module Organization
//! ```text
//! box_office/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap command definitions
//! ├── config.rs       ◄─── BoxOfficeConfig (TOML + ENCORE_* overrides)
//! ├── service.rs      ◄─── TheaterService (reserve, cancel, find)
//! ├── render.rs       ◄─── XML / JSON receipts
//! └── error.rs        ◄─── ServiceError, AppError
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse command line (clap)                                           │
//! │  2. Initialize logging: tracing-subscriber → stderr,                    │
//! │     RUST_LOG or debug for the encore crates                             │
//! │  3. Load configuration: defaults ◄ TOML file ◄ ENCORE_* variables       │
//! │  4. Seed seating plans, wire catalogues into TheaterService            │
//! │  5. Run the command, receipts on stdout                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod service;

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use encore_core::ZoneCategory;
use encore_store::{seed, ReservationStore, RoomStore};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, ReserveArgs};
use config::{BoxOfficeConfig, OutputFormat};
use error::{AppError, AppResult};
use service::TheaterService;

pub use service::ReservationOutcome;

/// Runs the command line application.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    init_tracing();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Box office failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> AppResult<()> {
    let config = BoxOfficeConfig::load(cli.config)?;
    let service = build_service(&config)?;

    info!(
        performances = ?service.rooms().performance_ids()?,
        "Box office open"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Demo { output } => {
            for receipt in run_demo(&service, &config, output.unwrap_or(config.output))? {
                writeln!(out, "{}", receipt)?;
            }
        }
        Command::Reserve(args) => {
            let receipt = run_reserve(&service, &config, &args)?;
            writeln!(out, "{}", receipt)?;
        }
    }

    Ok(())
}

/// Builds a box office over the demo venue, wired from `config`.
pub fn build_service(config: &BoxOfficeConfig) -> AppResult<TheaterService> {
    let rooms = Arc::new(RoomStore::new());
    seed::seed_rooms(&rooms)?;

    let service = TheaterService::new(
        rooms,
        Arc::new(ReservationStore::with_id_floor(config.reservation_id_floor)),
        Arc::new(config.price_catalog()),
        config.voucher_program(),
        Arc::new(config.subscribers()),
    )
    .with_pricing_policy(config.pricing_policy());

    Ok(service)
}

/// Replays the demo evening and returns one receipt per reservation.
pub fn run_demo(
    service: &TheaterService,
    config: &BoxOfficeConfig,
    format: OutputFormat,
) -> AppResult<Vec<String>> {
    let premiere = seed::performance_cicd();
    let preview = seed::performance_scala();

    [(&premiere, 4), (&premiere, 5), (&preview, 4)]
        .into_iter()
        .map(|(performance, seats)| {
            let outcome = service.reserve(1, seats, ZoneCategory::Standard, performance)?;
            render::render(&outcome, format, &config.currency_symbol)
        })
        .collect()
}

/// Runs one reservation from the command line against the seeded venue.
pub fn run_reserve(
    service: &TheaterService,
    config: &BoxOfficeConfig,
    args: &ReserveArgs,
) -> AppResult<String> {
    let performance = seed::demo_performance(args.performance)
        .ok_or(AppError::UnknownPerformance(args.performance))?;

    let outcome = service.reserve(args.customer, args.seats, args.category, &performance)?;
    render::render(
        &outcome,
        args.output.unwrap_or(config.output),
        &config.currency_symbol,
    )
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=encore_store=trace` - Trace the stores only
/// - Default: INFO, DEBUG for the box office crates
///
/// Logs go to stderr so receipts on stdout stay machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,encore_core=debug,encore_store=debug,box_office=debug")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
