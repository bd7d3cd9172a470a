//! Payout engine implementing the [`PayoutCalculator`] trait.
//!
//! Wires the pipeline together: structure, denomination, allocation and
//! constraint enforcement. Integer cents throughout.

use bankshot_core::constants::MIN_PLAYERS;
use bankshot_core::error::PayoutError;
use bankshot_core::traits::PayoutCalculator;
use bankshot_core::types::{PayoutRequest, PayoutSchedule};

use crate::allocate::allocate;
use crate::enforce::enforce;
use crate::rounding::select_denomination;
use crate::structure::resolve;

/// The production payout calculator.
///
/// Holds only the minimum field size, so it is cheap to clone and safe to
/// share across request handlers.
#[derive(Debug, Clone)]
pub struct PayoutEngine {
    min_players: u32,
}

impl Default for PayoutEngine {
    fn default() -> Self {
        Self {
            min_players: MIN_PLAYERS,
        }
    }
}

impl PayoutEngine {
    /// Engine with the standard minimum of [`MIN_PLAYERS`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a custom minimum field size (at least 1).
    pub fn with_min_players(min_players: u32) -> Self {
        Self {
            min_players: min_players.max(1),
        }
    }

    pub fn min_players(&self) -> u32 {
        self.min_players
    }
}

impl PayoutCalculator for PayoutEngine {
    fn compute(&self, request: &PayoutRequest) -> Result<PayoutSchedule, PayoutError> {
        if request.entry_fee == 0 {
            return Err(PayoutError::InvalidEntryFee {
                entry_fee: request.entry_fee,
            });
        }

        let groups = resolve(request.player_count, self.min_players);
        if groups.is_empty() {
            return Err(PayoutError::InsufficientPlayers {
                player_count: request.player_count,
                minimum: self.min_players,
            });
        }

        let total_pool = request.total_pool()?;
        let denomination = select_denomination(request.entry_fee);
        let raw = allocate(&groups, total_pool, denomination);
        let groups = enforce(&raw, &groups, total_pool, request.entry_fee, denomination)?;

        Ok(PayoutSchedule {
            request: *request,
            total_pool,
            denomination,
            groups,
        })
    }
}

/// Compute a schedule with the default engine.
pub fn compute_payouts(request: &PayoutRequest) -> Result<PayoutSchedule, PayoutError> {
    PayoutEngine::new().compute(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankshot_core::constants::{DOLLAR, LEGACY_MIN_PLAYERS};
    use bankshot_core::types::TieGroup;
    use proptest::prelude::*;

    fn amounts(schedule: &PayoutSchedule) -> Vec<u64> {
        schedule.groups.iter().map(|g| g.amount).collect()
    }

    #[test]
    fn twenty_dollar_twenty_players() {
        let s = compute_payouts(&PayoutRequest::new(20 * DOLLAR, 20)).unwrap();
        assert_eq!(s.total_pool, 40_000);
        assert_eq!(s.denomination, 2_000);
        assert_eq!(amounts(&s), vec![16_000, 10_000, 6_000, 4_000, 2_000]);
        assert_eq!(s.max_place(), 6);
        assert_eq!(s.amount_for(6), Some(2_000));
        assert_eq!(s.total(), 40_000);
    }

    #[test]
    fn added_money_and_floor_cutoff() {
        let request = PayoutRequest::new(25 * DOLLAR, 32).with_added_money(100 * DOLLAR);
        let s = compute_payouts(&request).unwrap();
        assert_eq!(s.total_pool, 90_000);
        assert_eq!(s.denomination, 500);
        assert_eq!(amounts(&s), vec![41_000, 22_500, 13_500, 8_000, 2_500]);
        assert_eq!(s.groups.last().unwrap().group, TieGroup::new(5, 6));
        assert_eq!(s.places_paid(), 5);
        assert_eq!(s.max_place(), 6);
    }

    #[test]
    fn minimum_field() {
        let s = compute_payouts(&PayoutRequest::new(15 * DOLLAR, 8)).unwrap();
        assert_eq!(amounts(&s), vec![6_500, 3_500, 2_000]);
    }

    #[test]
    fn one_short_of_minimum() {
        let err = compute_payouts(&PayoutRequest::new(15 * DOLLAR, 7)).unwrap_err();
        assert_eq!(
            err,
            PayoutError::InsufficientPlayers {
                player_count: 7,
                minimum: MIN_PLAYERS
            }
        );
    }

    #[test]
    fn zero_fee_rejected() {
        let err = compute_payouts(&PayoutRequest::new(0, 20)).unwrap_err();
        assert_eq!(err, PayoutError::InvalidEntryFee { entry_fee: 0 });
    }

    #[test]
    fn odd_fee_falls_back_to_fee_denomination() {
        let s = compute_payouts(&PayoutRequest::new(7 * DOLLAR, 16)).unwrap();
        assert_eq!(s.denomination, 7 * DOLLAR);
        assert_eq!(s.total(), 112 * DOLLAR);
        for g in &s.groups[1..] {
            assert_eq!(g.amount % (7 * DOLLAR), 0);
        }
    }

    #[test]
    fn legacy_minimum_pays_four_player_field() {
        let engine = PayoutEngine::with_min_players(LEGACY_MIN_PLAYERS);
        let s = engine.compute(&PayoutRequest::new(10 * DOLLAR, 4)).unwrap();
        assert_eq!(s.total(), 4_000);
        assert!(s.groups.iter().all(|g| g.amount >= 10 * DOLLAR));
    }

    #[test]
    fn min_players_clamped_to_one() {
        assert_eq!(PayoutEngine::with_min_players(0).min_players(), 1);
    }

    #[test]
    fn usable_as_trait_object() {
        let engine: &dyn PayoutCalculator = &PayoutEngine::new();
        let places = engine.place_amounts(&PayoutRequest::new(20 * DOLLAR, 20)).unwrap();
        assert_eq!(places.len(), 6);
        assert_eq!(places[&5], places[&6]);
    }

    #[test]
    fn deterministic() {
        let request = PayoutRequest::new(35 * DOLLAR, 77).with_added_money(250 * DOLLAR);
        assert_eq!(compute_payouts(&request), compute_payouts(&request));
    }

    #[test]
    fn overflowing_pool_is_an_error() {
        let request = PayoutRequest::new(u64::MAX, 100);
        assert_eq!(
            compute_payouts(&request).unwrap_err(),
            PayoutError::ArithmeticOverflow
        );
    }

    proptest! {
        #[test]
        fn schedule_sums_to_pool(
            players in MIN_PLAYERS..800u32,
            fee_fives in 1u64..40,
            added_dollars in 0u64..2_000,
        ) {
            let request = PayoutRequest::new(fee_fives * 5 * DOLLAR, players)
                .with_added_money(added_dollars * DOLLAR);
            let s = compute_payouts(&request).unwrap();
            prop_assert_eq!(s.total(), s.total_pool);
        }

        #[test]
        fn every_place_clears_the_fee(players in MIN_PLAYERS..800u32, fee_fives in 1u64..40) {
            let fee = fee_fives * 5 * DOLLAR;
            let s = compute_payouts(&PayoutRequest::new(fee, players)).unwrap();
            for (place, amount) in s.places() {
                prop_assert!(amount >= fee, "place {} pays {} < {}", place, amount, fee);
            }
        }

        #[test]
        fn groups_strictly_descend(players in MIN_PLAYERS..800u32, fee_fives in 1u64..40) {
            let s = compute_payouts(&PayoutRequest::new(fee_fives * 5 * DOLLAR, players)).unwrap();
            for pair in s.groups.windows(2) {
                prop_assert!(pair[1].amount < pair[0].amount);
            }
        }

        #[test]
        fn lower_groups_on_denomination(players in MIN_PLAYERS..800u32, fee_fives in 1u64..40) {
            let s = compute_payouts(&PayoutRequest::new(fee_fives * 5 * DOLLAR, players)).unwrap();
            for g in s.groups.iter().skip(1) {
                prop_assert_eq!(g.amount % s.denomination, 0);
            }
        }
    }
}
