//! Shared helpers for the integration tests.

use bankshot_core::constants::DOLLAR;
use bankshot_core::types::{PayoutRequest, PayoutSchedule};

/// Whole dollars to cents.
pub fn dollars(n: u64) -> u64 {
    n * DOLLAR
}

/// Request in whole dollars.
pub fn request(fee: u64, players: u32, added: u64) -> PayoutRequest {
    PayoutRequest::new(dollars(fee), players).with_added_money(dollars(added))
}

/// Check every payout invariant, returning the first violation.
///
/// - conservation: places sum to the pool
/// - floor: every paid place gets at least the entry fee
/// - monotonicity: each group pays strictly less than the one above
/// - top margin: first place beats second by 15%
/// - ties: places in one group are paid identically
/// - structure: groups start at 1st and are contiguous
pub fn check_invariants(schedule: &PayoutSchedule) -> Result<(), String> {
    let fee = schedule.request.entry_fee;
    let groups = &schedule.groups;

    if groups.is_empty() {
        return Err("empty schedule".into());
    }
    if groups[0].group.start != 1 {
        return Err(format!("first group starts at {}", groups[0].group.start));
    }
    for pair in groups.windows(2) {
        if pair[1].group.start != pair[0].group.end + 1 {
            return Err(format!("gap between {:?} and {:?}", pair[0].group, pair[1].group));
        }
        if pair[1].amount >= pair[0].amount {
            return Err(format!(
                "{} pays {} but {} pays {}",
                pair[1].group.label(),
                pair[1].amount,
                pair[0].group.label(),
                pair[0].amount
            ));
        }
    }

    let places: Vec<(u32, u64)> = schedule.places().collect();
    let sum: u64 = places.iter().map(|(_, amount)| amount).sum();
    if sum != schedule.total_pool {
        return Err(format!("sum {} != pool {}", sum, schedule.total_pool));
    }
    if let Some((place, amount)) = places.iter().find(|(_, amount)| *amount < fee) {
        return Err(format!("place {place} pays {amount} below fee {fee}"));
    }
    for g in groups {
        for place in g.group.start..=g.group.end {
            if schedule.amount_for(place) != Some(g.amount) {
                return Err(format!("place {place} differs from its tie group"));
            }
        }
    }
    if groups.len() >= 2 {
        let (first, second) = (u128::from(groups[0].amount), u128::from(groups[1].amount));
        if first * 100 < second * 115 {
            return Err(format!("first {first} lacks 15% margin over second {second}"));
        }
    }
    Ok(())
}
