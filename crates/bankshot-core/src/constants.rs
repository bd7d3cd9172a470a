//! Engine constants. All monetary values in cents (1 dollar = 100 cents).

pub const DOLLAR: u64 = 100;

/// Minimum field size that pays out at all.
pub const MIN_PLAYERS: u32 = 8;

/// Minimum field size used by the older four-player payout sheets.
pub const LEGACY_MIN_PLAYERS: u32 = 4;

/// Highest place any tier can pay.
pub const MAX_PAID_PLACE: u32 = 256;

/// Bracket tie points as inclusive `(start, end)` place ranges, top down.
///
/// Every place inside one range finishes tied and receives the same amount.
pub const TIE_GROUP_BOUNDS: [(u32, u32); 15] = [
    (1, 1),
    (2, 2),
    (3, 3),
    (4, 4),
    (5, 6),
    (7, 8),
    (9, 12),
    (13, 16),
    (17, 24),
    (25, 32),
    (33, 48),
    (49, 64),
    (65, 96),
    (97, 128),
    (129, 256),
];

/// Field-size tiers as `(max_players, max_place_paid)`.
///
/// Pays roughly a quarter to a third of the field, always ending on a
/// bracket tie point. Fields above the last tier pay [`MAX_PAID_PLACE`].
pub const PAYOUT_TIERS: [(u32, u32); 12] = [
    (15, 3),
    (19, 4),
    (27, 6),
    (35, 8),
    (51, 12),
    (67, 16),
    (99, 24),
    (131, 32),
    (195, 48),
    (259, 64),
    (387, 96),
    (515, 128),
];

/// Fixed-point denominator for group weights (parts-per-billion).
pub const WEIGHT_PRECISION: u64 = 1_000_000_000;

/// Per-group weight decay for small structures (≤ [`STEEP_DECAY_MAX_GROUPS`]).
pub const DECAY_STEEP_PPB: u64 = 600_000_000;

/// Per-group weight decay for structures with many tie groups.
pub const DECAY_SHALLOW_PPB: u64 = 550_000_000;

/// Largest group count that still uses [`DECAY_STEEP_PPB`].
pub const STEEP_DECAY_MAX_GROUPS: usize = 8;

pub const BPS_PRECISION: u64 = 10_000;

/// First place must pay at least this multiple of second place (1.15×).
pub const FIRST_PLACE_MARGIN_BPS: u64 = 11_500;

/// Proportional redistribution passes attempted before the last paid group
/// is dropped.
pub const MAX_REPAIR_PASSES: usize = 4;

/// Canonical entry fees are whole multiples of this amount.
pub const FEE_STEP: u64 = 5 * DOLLAR;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_groups_are_contiguous() {
        assert_eq!(TIE_GROUP_BOUNDS[0].0, 1);
        for pair in TIE_GROUP_BOUNDS.windows(2) {
            assert_eq!(pair[1].0, pair[0].1 + 1, "gap after {:?}", pair[0]);
        }
        assert_eq!(TIE_GROUP_BOUNDS[TIE_GROUP_BOUNDS.len() - 1].1, MAX_PAID_PLACE);
    }

    #[test]
    fn every_tier_ends_on_a_tie_point() {
        for (_, max_place) in PAYOUT_TIERS {
            assert!(
                TIE_GROUP_BOUNDS.iter().any(|&(_, end)| end == max_place),
                "tier place {max_place} splits a tie group"
            );
        }
    }

    #[test]
    fn tiers_strictly_increase() {
        for pair in PAYOUT_TIERS.windows(2) {
            assert!(pair[1].0 > pair[0].0);
            assert!(pair[1].1 > pair[0].1);
        }
    }

    #[test]
    fn margin_exceeds_parity() {
        assert!(FIRST_PLACE_MARGIN_BPS > BPS_PRECISION);
    }
}
