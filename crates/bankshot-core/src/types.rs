//! Request and schedule types shared by the engine and its callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::display::ordinal;
use crate::error::PayoutError;

/// Inputs to a payout computation. All amounts in cents.
///
/// # Examples
///
/// ```
/// use bankshot_core::types::PayoutRequest;
/// let req = PayoutRequest::new(2_000, 20).with_added_money(10_000);
/// assert_eq!(req.total_pool().unwrap(), 50_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayoutRequest {
    /// Buy-in per player. Also the minimum any paid place receives.
    pub entry_fee: u64,
    /// Number of players (or teams) in the field.
    pub player_count: u32,
    /// Sponsor or house money on top of the entry fees.
    #[serde(default)]
    pub added_money: u64,
}

impl PayoutRequest {
    pub fn new(entry_fee: u64, player_count: u32) -> Self {
        Self {
            entry_fee,
            player_count,
            added_money: 0,
        }
    }

    pub fn with_added_money(mut self, added_money: u64) -> Self {
        self.added_money = added_money;
        self
    }

    /// Money collected from entries alone.
    pub fn entry_pool(&self) -> Result<u64, PayoutError> {
        self.entry_fee
            .checked_mul(u64::from(self.player_count))
            .ok_or(PayoutError::ArithmeticOverflow)
    }

    /// `entry_fee * player_count + added_money`.
    pub fn total_pool(&self) -> Result<u64, PayoutError> {
        self.entry_pool()?
            .checked_add(self.added_money)
            .ok_or(PayoutError::ArithmeticOverflow)
    }
}

/// An inclusive range of finishing places paid one identical amount.
///
/// Deserialization rejects ranges that do not satisfy `1 <= start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawTieGroup")]
pub struct TieGroup {
    pub start: u32,
    pub end: u32,
}

#[derive(Deserialize)]
struct RawTieGroup {
    start: u32,
    end: u32,
}

impl TryFrom<RawTieGroup> for TieGroup {
    type Error = String;

    fn try_from(raw: RawTieGroup) -> Result<Self, Self::Error> {
        if raw.start == 0 || raw.start > raw.end {
            return Err(format!("invalid tie group {}-{}", raw.start, raw.end));
        }
        Ok(Self { start: raw.start, end: raw.end })
    }
}

impl TieGroup {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start >= 1 && start <= end, "bad tie group {start}-{end}");
        Self { start, end }
    }

    /// Number of places sharing the group's amount.
    pub fn size(&self) -> u32 {
        self.end.saturating_sub(self.start) + 1
    }

    pub fn is_tie(&self) -> bool {
        self.end > self.start
    }

    pub fn contains(&self, place: u32) -> bool {
        (self.start..=self.end).contains(&place)
    }

    /// Display label: `"3rd"` for a single place, `"25th-32nd"` for a tie.
    ///
    /// # Examples
    ///
    /// ```
    /// use bankshot_core::types::TieGroup;
    /// assert_eq!(TieGroup::new(1, 1).label(), "1st");
    /// assert_eq!(TieGroup::new(5, 6).label(), "5th-6th");
    /// assert_eq!(TieGroup::new(97, 128).label(), "97th-128th");
    /// ```
    pub fn label(&self) -> String {
        if self.is_tie() {
            format!("{}-{}", ordinal(self.start), ordinal(self.end))
        } else {
            ordinal(self.start)
        }
    }
}

/// One tie group and the amount each of its places receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPayout {
    pub group: TieGroup,
    /// Per-place amount in cents.
    pub amount: u64,
}

impl GroupPayout {
    /// What the whole group costs: `amount * size`.
    pub fn group_total(&self) -> u64 {
        self.amount * u64::from(self.group.size())
    }
}

/// A complete payout schedule, top group first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutSchedule {
    pub request: PayoutRequest,
    pub total_pool: u64,
    /// Rounding step used for every amount except first place's residual.
    pub denomination: u64,
    pub groups: Vec<GroupPayout>,
}

impl PayoutSchedule {
    /// Every paid place in order as `(place, amount)`.
    pub fn places(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.groups
            .iter()
            .flat_map(|g| (g.group.start..=g.group.end).map(move |place| (place, g.amount)))
    }

    pub fn amount_for(&self, place: u32) -> Option<u64> {
        self.groups
            .iter()
            .find(|g| g.group.contains(place))
            .map(|g| g.amount)
    }

    /// Last paid place, or 0 for an empty schedule.
    pub fn max_place(&self) -> u32 {
        self.groups.last().map(|g| g.group.end).unwrap_or(0)
    }

    /// Number of distinct payout lines (tied places count once).
    pub fn places_paid(&self) -> usize {
        self.groups.len()
    }

    /// Sum over every paid place.
    pub fn total(&self) -> u64 {
        self.groups.iter().map(GroupPayout::group_total).sum()
    }

    pub fn to_place_map(&self) -> BTreeMap<u32, u64> {
        self.places().collect()
    }

    /// Label of the group containing `place`, if paid.
    pub fn label_for(&self, place: u32) -> Option<String> {
        self.groups
            .iter()
            .find(|g| g.group.contains(place))
            .map(|g| g.group.label())
    }
}
