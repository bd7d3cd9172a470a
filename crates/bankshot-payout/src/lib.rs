//! # bankshot-payout — Tournament prize distribution engine.
//!
//! All calculations use integer cents and fixed-point weights for determinism.
//!
//! A computation runs four steps:
//! - **Place structure**: the field size picks a tier, the tier picks the last
//!   paid place, and the bracket tie points between 1 and that place become
//!   tie groups.
//! - **Rounding policy**: the entry fee picks a $5, $10 or $20 denomination so
//!   payouts can be handed over in the same bills players paid with.
//! - **Weight allocation**: each group gets a geometric share of the pool
//!   (`decay^i`), split across its tied places and rounded.
//! - **Constraint enforcement**: floor at the entry fee, strict descent,
//!   dynamic cutoff, exact-total reconciliation into first place and a
//!   minimum first-place margin.

pub mod allocate;
pub mod engine;
pub mod enforce;
pub mod rounding;
pub mod structure;

pub use engine::{compute_payouts, PayoutEngine};
pub use rounding::{is_canonical_fee, select_denomination};
pub use structure::{max_place_paid, resolve};
