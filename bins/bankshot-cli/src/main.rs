//! bankshot-cli — Command-line tournament payout calculator.
//!
//! Prints the payout table for a field, the same schedule as JSON, or the
//! column of cells the scoreboard spreadsheet shows.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use bankshot_core::constants::MIN_PLAYERS;
use bankshot_core::error::PayoutError;
use bankshot_core::display::{fee_rejection_cells, payout_table, sheet_cells, sheet_error_cells};
use bankshot_core::money::parse_usd;
use bankshot_core::traits::PayoutCalculator;
use bankshot_core::types::{PayoutRequest, PayoutSchedule};
use bankshot_payout::{is_canonical_fee, PayoutEngine};

/// Bankshot tournament payout calculator.
#[derive(Parser)]
#[command(name = "bankshot-cli")]
#[command(version, about = "Tournament prize payouts in the bills players paid with.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the payout table for a field.
    Payouts(PayoutsArgs),
    /// Print spreadsheet cells, one per line.
    Sheet(SheetArgs),
}

#[derive(Args, Debug)]
struct FieldArgs {
    /// Entry fee in dollars ("20", "$12.50").
    #[arg(short, long, value_parser = parse_dollars)]
    entry_fee: u64,

    /// Number of players in the field.
    #[arg(short, long)]
    players: u32,

    /// Added money in dollars.
    #[arg(short, long, value_parser = parse_dollars, default_value = "0")]
    added: u64,

    /// Smallest field that gets paid.
    #[arg(long, default_value_t = MIN_PLAYERS)]
    min_players: u32,

    /// Accept entry fees that are not multiples of $5.
    #[arg(long)]
    lenient: bool,
}

impl FieldArgs {
    fn request(&self) -> PayoutRequest {
        PayoutRequest::new(self.entry_fee, self.players).with_added_money(self.added)
    }

    fn engine(&self) -> PayoutEngine {
        PayoutEngine::with_min_players(self.min_players)
    }
}

#[derive(Args, Debug)]
struct PayoutsArgs {
    #[command(flatten)]
    field: FieldArgs,

    /// Emit the schedule as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct SheetArgs {
    #[command(flatten)]
    field: FieldArgs,

    /// Number of payout cells in the sheet column.
    #[arg(short, long, default_value_t = 7)]
    rows: usize,
}

fn parse_dollars(s: &str) -> Result<u64, String> {
    parse_usd(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Payouts(args) => render_payouts(&args)?,
        Commands::Sheet(args) => render_sheet(&args).join("\n"),
    };
    println!("{output}");
    Ok(())
}

fn compute(field: &FieldArgs) -> Result<PayoutSchedule> {
    if field.entry_fee == 0 {
        bail!("Entry fee must be greater than 0");
    }
    if !field.lenient && !is_canonical_fee(field.entry_fee) {
        bail!("Entry fee must be divisible by $5 (pass --lenient to allow it)");
    }
    let request = field.request();
    debug!(?request, "Computing payouts");
    field
        .engine()
        .compute(&request)
        .with_context(|| format!("No payouts for {} players", field.players))
}

/// Payout table or JSON for the `payouts` subcommand.
fn render_payouts(args: &PayoutsArgs) -> Result<String> {
    let schedule = compute(&args.field)?;
    if args.json {
        serde_json::to_string_pretty(&schedule).context("Failed to encode schedule")
    } else {
        Ok(payout_table(&schedule))
    }
}

/// Sheet cells for the `sheet` subcommand. Refusals become notice cells
/// instead of errors, as the spreadsheet shows them: a missing fee clears the
/// column, a short field wins over an odd fee.
fn render_sheet(args: &SheetArgs) -> Vec<String> {
    let field = &args.field;
    if field.entry_fee == 0 {
        return sheet_error_cells(&PayoutError::InvalidEntryFee { entry_fee: 0 }, args.rows);
    }
    let engine = field.engine();
    if field.players < engine.min_players() {
        let short = PayoutError::InsufficientPlayers {
            player_count: field.players,
            minimum: engine.min_players(),
        };
        return sheet_error_cells(&short, args.rows);
    }
    if !field.lenient && !is_canonical_fee(field.entry_fee) {
        return fee_rejection_cells(args.rows);
    }
    match engine.compute(&field.request()) {
        Ok(schedule) => sheet_cells(&schedule, args.rows),
        Err(e) => sheet_error_cells(&e, args.rows),
    }
}
