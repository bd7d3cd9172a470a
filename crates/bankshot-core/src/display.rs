//! Human-facing renderings of a payout schedule: ordinal labels, the text
//! table printed by the CLI, and the fixed cell layout written to the
//! tournament spreadsheet.

use crate::constants::{BPS_PRECISION, FEE_STEP};
use crate::error::PayoutError;
use crate::money::format_usd;
use crate::types::PayoutSchedule;

const RULE_WIDTH: usize = 50;

/// English ordinal for a place number: `1st`, `2nd`, `3rd`, `11th`, `32nd`.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Share of the pool taken by one group, as `"40.00%"`.
pub fn pool_percent(group_total: u64, total_pool: u64) -> String {
    if total_pool == 0 {
        return "0.00%".to_string();
    }
    let bps = (u128::from(group_total) * u128::from(BPS_PRECISION) / u128::from(total_pool)) as u64;
    format!("{}.{:02}%", bps / 100, bps % 100)
}

/// Plain-text payout table with pool summary and reconciliation footer.
pub fn payout_table(schedule: &PayoutSchedule) -> String {
    let req = &schedule.request;
    let mut out = String::new();
    out.push_str("Tournament Payout Structure\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!("Players: {}\n", req.player_count));
    out.push_str(&format!("Entry Fee: {}\n", format_usd(req.entry_fee)));
    if req.added_money > 0 {
        let entry_pool = schedule.total_pool.saturating_sub(req.added_money);
        out.push_str(&format!("Entry Pool: {}\n", format_usd(entry_pool)));
        out.push_str(&format!("Added Money: {}\n", format_usd(req.added_money)));
    }
    out.push_str(&format!("Total Prize Pool: {}\n", format_usd(schedule.total_pool)));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push_str("\n\n");

    for payout in &schedule.groups {
        let label = if payout.group.is_tie() {
            format!("{} (tie)", payout.group.label())
        } else {
            payout.group.label()
        };
        out.push_str(&format!(
            "{:<25} {:<12} ({:>7})\n",
            label,
            format_usd(payout.amount),
            pool_percent(payout.group_total(), schedule.total_pool)
        ));
    }

    let total = schedule.total();
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!("{:<25} {}\n", "TOTAL:", format_usd(total)));
    out.push_str(&format!("{:<25} {}\n", "Expected:", format_usd(schedule.total_pool)));
    out.push_str(&format!(
        "{:<25} {}\n",
        "Difference:",
        format_usd(schedule.total_pool.abs_diff(total))
    ));
    out
}

/// One spreadsheet cell per tie group, top down, padded to `rows`.
///
/// Single places render as `"$160.00"`, ties as `"$20.00 (5th-6th)"`.
/// Groups beyond `rows` are not shown.
pub fn sheet_cells(schedule: &PayoutSchedule, rows: usize) -> Vec<String> {
    let cells = schedule
        .groups
        .iter()
        .map(|payout| {
            if payout.group.is_tie() {
                format!("{} ({})", format_usd(payout.amount), payout.group.label())
            } else {
                format_usd(payout.amount)
            }
        })
        .collect();
    padded(cells, rows)
}

/// Cells shown instead of payouts when the engine refuses a request.
///
/// A short field gets a "Need N+ players" notice; any other error clears
/// the payout cells.
pub fn sheet_error_cells(err: &PayoutError, rows: usize) -> Vec<String> {
    match err {
        PayoutError::InsufficientPlayers { minimum, .. } => {
            padded(vec![format!("Need {minimum}+ players")], rows)
        }
        PayoutError::InvalidEntryFee { .. } | PayoutError::ArithmeticOverflow => {
            padded(Vec::new(), rows)
        }
    }
}

/// Cells shown when a fee is refused for not being a multiple of $5.
pub fn fee_rejection_cells(rows: usize) -> Vec<String> {
    padded(
        vec![
            "Entry fee must".to_string(),
            "be divisible".to_string(),
            format!("by {}", format_usd(FEE_STEP).trim_end_matches(".00")),
        ],
        rows,
    )
}

fn padded(mut cells: Vec<String>, rows: usize) -> Vec<String> {
    cells.truncate(rows);
    cells.resize(rows, String::new());
    cells
}
