//! # bankshot-core
//! Foundation types and traits for the Bankshot payout engine.
//!
//! All monetary values are integer cents (`1 dollar = 100 cents`).

pub mod constants;
pub mod display;
pub mod error;
pub mod money;
pub mod traits;
pub mod types;

pub use error::{MoneyError, PayoutError};
pub use traits::PayoutCalculator;
pub use types::{GroupPayout, PayoutRequest, PayoutSchedule, TieGroup};
