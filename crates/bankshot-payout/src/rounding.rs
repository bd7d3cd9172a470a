//! Rounding policy: payouts are paid in the same bills as the entry fee.
//!
//! A $15 or $25 fee means players hand over fives, so payouts round to $5.
//! A $10, $30 or $50 fee rounds to $10; a $20, $40 or $100 fee rounds to $20.
//! Fees that are not whole multiples of $5 round to the fee itself.

use bankshot_core::constants::{DOLLAR, FEE_STEP};

/// Rounding denomination in cents for an entry fee in cents.
///
/// # Examples
///
/// ```
/// use bankshot_payout::select_denomination;
/// assert_eq!(select_denomination(1_500), 500);
/// assert_eq!(select_denomination(3_000), 1_000);
/// assert_eq!(select_denomination(2_000), 2_000);
/// assert_eq!(select_denomination(700), 700);
/// ```
pub fn select_denomination(entry_fee: u64) -> u64 {
    if entry_fee % DOLLAR != 0 {
        return entry_fee;
    }
    let dollars = entry_fee / DOLLAR;
    match dollars % 10 {
        5 => 5 * DOLLAR,
        0 if (dollars / 10) % 2 == 1 => 10 * DOLLAR,
        0 => 20 * DOLLAR,
        _ => entry_fee,
    }
}

/// Whether `entry_fee` is a positive whole multiple of $5.
pub fn is_canonical_fee(entry_fee: u64) -> bool {
    entry_fee > 0 && entry_fee % FEE_STEP == 0
}

/// Round half up to the nearest multiple of `denomination`.
///
/// A zero denomination leaves the amount untouched.
pub fn round_to_denomination(amount: u64, denomination: u64) -> u64 {
    if denomination == 0 {
        return amount;
    }
    amount.saturating_add(denomination / 2) / denomination * denomination
}

/// Round down to a multiple of `denomination`.
pub fn round_down_to_denomination(amount: u64, denomination: u64) -> u64 {
    if denomination == 0 {
        return amount;
    }
    amount / denomination * denomination
}
