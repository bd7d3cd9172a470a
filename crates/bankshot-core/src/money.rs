//! Dollar/cent conversion and formatting.
//!
//! Amounts travel through the engine as integer cents. These helpers sit at
//! the edges: parsing what a person typed or a JSON client sent, and
//! rendering results as `$1,234.50`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::constants::DOLLAR;
use crate::error::MoneyError;

/// Parse a dollar amount such as `"20"`, `"12.5"`, `"$1,250.00"` into cents.
///
/// At most two significant decimal places are accepted; extra trailing
/// zeros (`"20.000"`) are tolerated. Negative amounts are rejected.
pub fn parse_usd(input: &str) -> Result<u64, MoneyError> {
    let trimmed = input.trim();
    if trimmed.starts_with('-') {
        return Err(MoneyError::Negative(trimmed.to_string()));
    }
    let cleaned: String = trimmed
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return Err(MoneyError::Empty);
    }

    let (whole, frac) = match cleaned.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (cleaned.as_str(), ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(MoneyError::Invalid(trimmed.to_string()));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(MoneyError::Invalid(trimmed.to_string()));
    }

    let significant = frac.trim_end_matches('0');
    if significant.len() > 2 {
        return Err(MoneyError::TooPrecise(trimmed.to_string()));
    }
    let frac_cents = match frac.len().min(2) {
        0 => 0,
        1 => frac[..1].parse::<u64>().map(|d| d * 10).unwrap_or(0),
        _ => frac[..2].parse::<u64>().unwrap_or(0),
    };

    let dollars = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u64>()
            .map_err(|_| MoneyError::Overflow(trimmed.to_string()))?
    };

    dollars
        .checked_mul(DOLLAR)
        .and_then(|c| c.checked_add(frac_cents))
        .ok_or_else(|| MoneyError::Overflow(trimmed.to_string()))
}

/// Render cents as `$1,234.50`.
pub fn format_usd(cents: u64) -> String {
    format!("${}", format_amount(cents))
}

/// Render cents as `1,234.50` (no currency sign).
pub fn format_amount(cents: u64) -> String {
    let dollars = (cents / DOLLAR).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped}.{:02}", cents % DOLLAR)
}

/// Dollars as a float, for JSON consumers that want plain numbers.
pub fn cents_to_dollars(cents: u64) -> f64 {
    cents as f64 / DOLLAR as f64
}

/// Read a cent amount from a JSON number or string.
pub fn cents_from_json(value: &Value) -> Result<u64, MoneyError> {
    match value {
        Value::Number(n) => parse_usd(&n.to_string()),
        Value::String(s) => parse_usd(s),
        other => Err(MoneyError::Invalid(other.to_string())),
    }
}

/// Serde adapters for dollar fields stored as cents.
///
/// ```
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Entry {
///     #[serde(deserialize_with = "bankshot_core::money::cents::deserialize")]
///     fee: u64,
/// }
///
/// let e: Entry = serde_json::from_str(r#"{"fee": "12.50"}"#).unwrap();
/// assert_eq!(e.fee, 1250);
/// ```
pub mod cents {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        cents_from_json(&value).map_err(serde::de::Error::custom)
    }

    /// Like [`deserialize`] but maps `null` to `None`. Pair with `#[serde(default)]`.
    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => cents_from_json(&value)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
