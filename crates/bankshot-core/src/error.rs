//! Error types for the Bankshot payout engine.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayoutError {
    #[error("insufficient players: {player_count} < {minimum}")] InsufficientPlayers { player_count: u32, minimum: u32 },
    #[error("invalid entry fee: {entry_fee} cents")] InvalidEntryFee { entry_fee: u64 },
    #[error("arithmetic overflow")] ArithmeticOverflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("empty amount")] Empty,
    #[error("negative amount: {0}")] Negative(String),
    #[error("more than two decimal places: {0}")] TooPrecise(String),
    #[error("invalid amount: {0}")] Invalid(String),
    #[error("amount overflow: {0}")] Overflow(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_insufficient_players() {
        let e = PayoutError::InsufficientPlayers { player_count: 7, minimum: 8 };
        assert_eq!(e.to_string(), "insufficient players: 7 < 8");
    }

    #[test]
    fn display_invalid_entry_fee() {
        let e = PayoutError::InvalidEntryFee { entry_fee: 0 };
        assert_eq!(e.to_string(), "invalid entry fee: 0 cents");
    }

    #[test]
    fn display_money_errors() {
        assert_eq!(MoneyError::Empty.to_string(), "empty amount");
        assert_eq!(
            MoneyError::Negative("-5".into()).to_string(),
            "negative amount: -5"
        );
    }

    #[test]
    fn clone_and_eq() {
        let e1 = PayoutError::ArithmeticOverflow;
        let e2 = e1.clone();
        assert_eq!(e1, e2);
    }
}
