//! Constraint enforcement over allocated group amounts.
//!
//! Applied in order:
//! 1. Floor: no paid place below the entry fee.
//! 2. Strict descent: a group that does not pay less than the one above it
//!    drops to one denomination below it, clamped to the floor.
//! 3. Dynamic cutoff: the first group still not below its predecessor (it
//!    hit the floor) and everything after it stop being paid.
//! 4. Reconciliation: first place takes whatever the other groups leave,
//!    so the schedule sums to the pool exactly.
//! 5. First-place margin: first place must beat second by
//!    [`FIRST_PLACE_MARGIN_BPS`]. Otherwise the other groups are scaled down
//!    and steps 1–4 rerun, for at most [`MAX_REPAIR_PASSES`] passes before the
//!    last paid group is dropped.
//!
//! Invariant on return: sum == pool, every amount ≥ entry fee, amounts
//! strictly decrease from group to group.

use bankshot_core::constants::{BPS_PRECISION, FIRST_PLACE_MARGIN_BPS, MAX_REPAIR_PASSES};
use bankshot_core::error::PayoutError;
use bankshot_core::types::{GroupPayout, TieGroup};

use crate::rounding::round_down_to_denomination;

/// Raise every amount to at least `floor`.
pub fn apply_floor(amounts: &mut [u64], floor: u64) {
    for amount in amounts.iter_mut() {
        *amount = (*amount).max(floor);
    }
}

/// Walk top to bottom, pushing any group that does not pay strictly less
/// than its predecessor down to `predecessor - denomination` (not below `floor`).
pub fn enforce_descent(amounts: &mut [u64], floor: u64, denomination: u64) {
    for i in 1..amounts.len() {
        if amounts[i] >= amounts[i - 1] {
            amounts[i] = amounts[i - 1].saturating_sub(denomination).max(floor);
        }
    }
}

/// Number of leading groups to keep: everything before the first group
/// that does not pay strictly less than its predecessor.
pub fn cutoff(amounts: &[u64]) -> usize {
    amounts
        .windows(2)
        .position(|pair| pair[1] >= pair[0])
        .map(|i| i + 1)
        .unwrap_or(amounts.len())
}

/// Steps 1–3: floor, descent, cutoff.
fn settle(amounts: &mut Vec<u64>, floor: u64, denomination: u64) {
    apply_floor(amounts, floor);
    enforce_descent(amounts, floor, denomination);
    let keep = cutoff(amounts);
    amounts.truncate(keep);
}

/// Total paid to every place except first.
fn others_total(amounts: &[u64], groups: &[TieGroup]) -> Result<u64, PayoutError> {
    amounts
        .iter()
        .zip(groups)
        .skip(1)
        .try_fold(0u64, |acc, (&amount, group)| {
            amount
                .checked_mul(u64::from(group.size()))
                .and_then(|cost| acc.checked_add(cost))
                .ok_or(PayoutError::ArithmeticOverflow)
        })
}

/// First-place amount that makes the schedule sum to `total_pool`.
///
/// `None` when the other groups already consume the whole pool.
pub fn reconcile_first_place(
    amounts: &[u64],
    groups: &[TieGroup],
    total_pool: u64,
) -> Result<Option<u64>, PayoutError> {
    let others = others_total(amounts, groups)?;
    Ok(total_pool.checked_sub(others).filter(|&first| first > 0))
}

/// Whether `first` beats `second` strictly and by the required margin.
pub fn has_margin(first: u64, second: u64) -> bool {
    first > second
        && u128::from(first) * u128::from(BPS_PRECISION)
            >= u128::from(second) * u128::from(FIRST_PLACE_MARGIN_BPS)
}

/// Scale every group below first by `pool / (margin * second + others)`,
/// rounding down to the denomination.
///
/// With no rounding or floor interference this leaves exactly enough for
/// first place to clear the margin over the scaled second place.
fn scale_others(
    amounts: &mut [u64],
    groups: &[TieGroup],
    total_pool: u64,
    denomination: u64,
) -> Result<(), PayoutError> {
    if amounts.len() < 2 {
        return Ok(());
    }
    let others = u128::from(others_total(amounts, groups)?);
    let divisor = u128::from(amounts[1])
        .checked_mul(u128::from(FIRST_PLACE_MARGIN_BPS))
        .and_then(|m| others.checked_mul(u128::from(BPS_PRECISION)).and_then(|o| m.checked_add(o)))
        .ok_or(PayoutError::ArithmeticOverflow)?;
    if divisor == 0 {
        return Ok(());
    }
    let scale = u128::from(total_pool) * u128::from(BPS_PRECISION);

    for amount in amounts.iter_mut().skip(1) {
        let scaled = u128::from(*amount)
            .checked_mul(scale)
            .ok_or(PayoutError::ArithmeticOverflow)?
            / divisor;
        *amount = round_down_to_denomination(scaled as u64, denomination);
    }
    Ok(())
}

fn pair_up(groups: &[TieGroup], amounts: &[u64]) -> Vec<GroupPayout> {
    groups
        .iter()
        .zip(amounts)
        .map(|(&group, &amount)| GroupPayout { group, amount })
        .collect()
}

/// Turn allocated amounts into a schedule that satisfies every payout
/// invariant. `raw[i]` is the per-place amount for `groups[i]`.
///
/// Terminates for any input: each group count gets at most
/// [`MAX_REPAIR_PASSES`] passes, and a lone first place taking the whole
/// pool is always valid.
pub fn enforce(
    raw: &[u64],
    groups: &[TieGroup],
    total_pool: u64,
    entry_fee: u64,
    denomination: u64,
) -> Result<Vec<GroupPayout>, PayoutError> {
    let Some(&top) = groups.first() else {
        return Ok(Vec::new());
    };

    let mut settled: Vec<u64> = raw.iter().copied().take(groups.len()).collect();
    settle(&mut settled, entry_fee, denomination);

    for paid in (2..=settled.len()).rev() {
        let mut amounts = settled[..paid].to_vec();
        for _ in 0..MAX_REPAIR_PASSES {
            settle(&mut amounts, entry_fee, denomination);
            if amounts.len() < 2 {
                break;
            }
            if let Some(first) = reconcile_first_place(&amounts, groups, total_pool)? {
                if has_margin(first, amounts[1]) {
                    amounts[0] = first;
                    return Ok(pair_up(groups, &amounts));
                }
            }
            scale_others(&mut amounts, groups, total_pool, denomination)?;
        }
    }

    Ok(vec![GroupPayout {
        group: top,
        amount: total_pool,
    }])
}
