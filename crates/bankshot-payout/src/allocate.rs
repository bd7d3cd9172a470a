//! Weight allocation: a geometric split of the pool across tie groups.
//!
//! Group `i` (0 = first place) weighs `decay^i` in parts-per-billion. Its
//! share of the pool is `pool * w_i / Σw`, split evenly over the group's
//! tied places and rounded to the denomination. Nothing here guarantees the
//! floor, ordering or exact total; [`crate::enforce`] restores those.

use bankshot_core::constants::{
    DECAY_SHALLOW_PPB, DECAY_STEEP_PPB, STEEP_DECAY_MAX_GROUPS, WEIGHT_PRECISION,
};
use bankshot_core::types::TieGroup;

use crate::rounding::round_to_denomination;

/// Per-group decay factor in parts-per-billion.
///
/// Small structures decay faster so the money concentrates at the top.
pub fn decay_ppb(group_count: usize) -> u64 {
    if group_count > STEEP_DECAY_MAX_GROUPS {
        DECAY_SHALLOW_PPB
    } else {
        DECAY_STEEP_PPB
    }
}

/// Fixed-point weights `decay^i` for `i in 0..group_count`.
pub fn group_weights(group_count: usize) -> Vec<u64> {
    let decay = decay_ppb(group_count);
    let mut weights = Vec::with_capacity(group_count);
    let mut weight = WEIGHT_PRECISION;
    for _ in 0..group_count {
        weights.push(weight);
        // Max product 1e9 * 6e8 = 6e17, fits u64.
        weight = weight * decay / WEIGHT_PRECISION;
    }
    weights
}

/// Unrounded share of the pool for each group, in cents.
pub fn group_shares(group_count: usize, total_pool: u64) -> Vec<u64> {
    let weights = group_weights(group_count);
    let total_weight: u128 = weights.iter().map(|&w| u128::from(w)).sum();
    if total_weight == 0 {
        return Vec::new();
    }
    weights
        .iter()
        // pool < 2^64 and weight < 2^30, so the product fits u128.
        .map(|&w| (u128::from(total_pool) * u128::from(w) / total_weight) as u64)
        .collect()
}

/// Rounded per-place amount for each group, top group first.
pub fn allocate(groups: &[TieGroup], total_pool: u64, denomination: u64) -> Vec<u64> {
    group_shares(groups.len(), total_pool)
        .into_iter()
        .zip(groups)
        .map(|(share, group)| {
            let per_place = share / u64::from(group.size());
            round_to_denomination(per_place, denomination)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankshot_core::constants::MIN_PLAYERS;
    use proptest::prelude::*;

    use crate::structure::resolve;

    #[test]
    fn steep_decay_up_to_eight_groups() {
        assert_eq!(decay_ppb(1), DECAY_STEEP_PPB);
        assert_eq!(decay_ppb(8), DECAY_STEEP_PPB);
        assert_eq!(decay_ppb(9), DECAY_SHALLOW_PPB);
        assert_eq!(decay_ppb(15), DECAY_SHALLOW_PPB);
    }

    #[test]
    fn weights_are_exact_powers() {
        assert_eq!(
            group_weights(5),
            vec![1_000_000_000, 600_000_000, 360_000_000, 216_000_000, 129_600_000]
        );
        assert!(group_weights(0).is_empty());
    }

    #[test]
    fn shares_sum_to_at_most_pool() {
        let shares = group_shares(6, 90_000);
        let sum: u64 = shares.iter().sum();
        assert!(sum <= 90_000);
        assert!(90_000 - sum < 6, "truncation lost {}", 90_000 - sum);
    }

    #[test]
    fn twenty_player_allocation() {
        // $20 x 20 = $400, groups 1,2,3,4,5-6, rounding to $20.
        let groups = resolve(20, MIN_PLAYERS);
        let raw = allocate(&groups, 40_000, 2_000);
        assert_eq!(raw, vec![18_000, 10_000, 6_000, 4_000, 2_000]);
    }

    #[test]
    fn tie_groups_split_their_share() {
        // 5th-6th share is ~$48.94 of a $900 pool -> ~$24.47 each -> $25.
        let groups = resolve(32, MIN_PLAYERS);
        let raw = allocate(&groups, 90_000, 500);
        assert_eq!(raw, vec![38_000, 22_500, 13_500, 8_000, 2_500, 1_500]);
    }

    #[test]
    fn empty_groups_allocate_nothing() {
        assert!(allocate(&[], 10_000, 500).is_empty());
    }

    proptest! {
        #[test]
        fn weights_strictly_decrease(count in 1usize..=15) {
            let weights = group_weights(count);
            for pair in weights.windows(2) {
                prop_assert!(pair[1] < pair[0]);
            }
        }

        #[test]
        fn per_place_amounts_non_increasing(players in MIN_PLAYERS..1_000u32, fee_fives in 1u64..40) {
            let fee = fee_fives * 500;
            let groups = resolve(players, MIN_PLAYERS);
            let pool = fee * u64::from(players);
            let raw = allocate(&groups, pool, crate::rounding::select_denomination(fee));
            for pair in raw.windows(2) {
                prop_assert!(pair[1] <= pair[0]);
            }
        }

        #[test]
        fn allocation_lands_on_denomination(players in MIN_PLAYERS..1_000u32, fee_fives in 1u64..40) {
            let fee = fee_fives * 500;
            let d = crate::rounding::select_denomination(fee);
            let groups = resolve(players, MIN_PLAYERS);
            for amount in allocate(&groups, fee * u64::from(players), d) {
                prop_assert_eq!(amount % d, 0);
            }
        }
    }
}
