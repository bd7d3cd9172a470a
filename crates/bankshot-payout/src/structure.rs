//! Place structure: which places get paid and how they tie.

use bankshot_core::constants::{MAX_PAID_PLACE, PAYOUT_TIERS, TIE_GROUP_BOUNDS};
use bankshot_core::types::TieGroup;

/// Last paid place for a field of `player_count`.
///
/// Ignores the minimum field size; see [`resolve`].
pub fn max_place_paid(player_count: u32) -> u32 {
    PAYOUT_TIERS
        .iter()
        .find(|(max_players, _)| player_count <= *max_players)
        .map(|(_, max_place)| *max_place)
        .unwrap_or(MAX_PAID_PLACE)
}

/// Tie groups paid for a field, top group first.
///
/// Returns an empty list when `player_count < min_players`.
pub fn resolve(player_count: u32, min_players: u32) -> Vec<TieGroup> {
    if player_count < min_players {
        return Vec::new();
    }
    let max_place = max_place_paid(player_count);
    TIE_GROUP_BOUNDS
        .iter()
        .take_while(|(_, end)| *end <= max_place)
        .map(|&(start, end)| TieGroup::new(start, end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankshot_core::constants::{LEGACY_MIN_PLAYERS, MIN_PLAYERS};
    use proptest::prelude::*;

    #[test]
    fn tier_boundaries() {
        let cases = [
            (8, 3), (15, 3), (16, 4), (19, 4), (20, 6), (27, 6), (28, 8),
            (35, 8), (36, 12), (51, 12), (52, 16), (67, 16), (68, 24),
            (99, 24), (100, 32), (131, 32), (132, 48), (195, 48), (196, 64),
            (259, 64), (260, 96), (387, 96), (388, 128), (515, 128),
            (516, 256), (10_000, 256),
        ];
        for (players, expected) in cases {
            assert_eq!(max_place_paid(players), expected, "players = {players}");
        }
    }

    #[test]
    fn below_minimum_is_empty() {
        assert!(resolve(7, MIN_PLAYERS).is_empty());
        assert!(resolve(0, MIN_PLAYERS).is_empty());
    }

    #[test]
    fn eight_players_pay_three_singles() {
        let groups = resolve(8, MIN_PLAYERS);
        assert_eq!(
            groups,
            vec![TieGroup::new(1, 1), TieGroup::new(2, 2), TieGroup::new(3, 3)]
        );
    }

    #[test]
    fn legacy_minimum_admits_small_fields() {
        assert_eq!(resolve(4, LEGACY_MIN_PLAYERS).len(), 3);
        assert!(resolve(3, LEGACY_MIN_PLAYERS).is_empty());
    }

    #[test]
    fn twenty_players_end_on_five_six_tie() {
        let groups = resolve(20, MIN_PLAYERS);
        assert_eq!(groups.len(), 5);
        assert_eq!(groups.last(), Some(&TieGroup::new(5, 6)));
    }

    #[test]
    fn largest_field_uses_full_catalogue() {
        let groups = resolve(600, MIN_PLAYERS);
        assert_eq!(groups.len(), TIE_GROUP_BOUNDS.len());
        assert_eq!(groups.last(), Some(&TieGroup::new(129, 256)));
    }

    proptest! {
        #[test]
        fn groups_cover_one_to_max_place(players in MIN_PLAYERS..2_000u32) {
            let groups = resolve(players, MIN_PLAYERS);
            prop_assert_eq!(groups[0].start, 1);
            for pair in groups.windows(2) {
                prop_assert_eq!(pair[1].start, pair[0].end + 1);
            }
            prop_assert_eq!(groups.last().unwrap().end, max_place_paid(players));
        }

        #[test]
        fn never_pays_half_the_field(players in MIN_PLAYERS..2_000u32) {
            prop_assert!(max_place_paid(players) * 2 <= players);
        }

        #[test]
        fn max_place_monotonic(a in 0u32..2_000, b in 0u32..2_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(max_place_paid(lo) <= max_place_paid(hi));
        }
    }
}
