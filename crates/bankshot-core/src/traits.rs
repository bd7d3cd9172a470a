//! Trait interfaces for the Bankshot payout engine.
//!
//! - [`PayoutCalculator`] — prize distribution (bankshot-payout implements)

use std::collections::BTreeMap;

use crate::error::PayoutError;
use crate::types::{PayoutRequest, PayoutSchedule};

/// Pure computation of a tournament payout schedule.
///
/// Implementations must be deterministic and free of I/O so one instance
/// can serve concurrent callers without coordination.
pub trait PayoutCalculator: Send + Sync {
    /// Full schedule for a request, or the reason none can be paid.
    fn compute(&self, request: &PayoutRequest) -> Result<PayoutSchedule, PayoutError>;

    /// `place → amount` view of [`compute`](Self::compute).
    fn place_amounts(&self, request: &PayoutRequest) -> Result<BTreeMap<u32, u64>, PayoutError> {
        Ok(self.compute(request)?.to_place_map())
    }
}
