//! Tournament view: the kiosk's current event plus its payout list.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::warn;

use bankshot_core::error::MoneyError;
use bankshot_core::money::{cents_from_json, format_usd};
use bankshot_core::traits::PayoutCalculator;
use bankshot_core::types::PayoutRequest;
use bankshot_payout::PayoutEngine;

use crate::payouts::count_from_json;

/// Read `tournament_data.json`. `Ok(None)` when the file does not exist.
pub async fn load(path: &Path) -> Result<Option<Value>> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };
    let data: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid tournament data in {}", path.display()))?;
    anyhow::ensure!(
        data.is_object(),
        "Tournament data in {} is not a JSON object",
        path.display()
    );
    Ok(Some(data))
}

/// Reply when no tournament has been configured.
pub fn no_tournament() -> Value {
    json!({
        "success": false,
        "display_tournament": false,
        "player_count": 0,
    })
}

/// Tournament data as stored, flagged successful, with a one-line-per-group
/// `payouts` list when the event is on display and has a payable field.
///
/// Payouts already supplied by the bracket site
/// (`has_digital_pool_payouts: true`) are passed through untouched.
pub fn tournament_view(engine: &PayoutEngine, mut data: Value) -> Value {
    if !data.is_object() {
        return no_tournament();
    }
    let supplied = data["has_digital_pool_payouts"].as_bool() == Some(true)
        && data["payouts"].is_array();

    if !supplied {
        if let Some(payouts) = computed_payouts(engine, &data) {
            data["payouts"] = payouts;
        }
    }
    data["success"] = json!(true);
    data
}

fn computed_payouts(engine: &PayoutEngine, data: &Value) -> Option<Value> {
    if data["display_tournament"].as_bool() != Some(true) {
        return None;
    }
    let entry_fee = cents_from_json(&data["entry_fee"]).ok()?;
    let player_count = count_from_json(&data["player_count"])?;
    let added_money = match cents_from_json(&data["added_money"]) {
        Ok(added) => added,
        Err(MoneyError::Empty) => 0,
        Err(_) if data["added_money"].is_null() => 0,
        Err(e) => {
            warn!(error = %e, "Skipping payouts: malformed added_money in tournament data");
            return None;
        }
    };

    let request = PayoutRequest::new(entry_fee, player_count).with_added_money(added_money);
    let schedule = engine.compute(&request).ok()?;

    let lines: Vec<Value> = schedule
        .groups
        .iter()
        .map(|g| json!({"place": g.group.label(), "amount": format_usd(g.amount)}))
        .collect();
    Some(Value::Array(lines))
}
