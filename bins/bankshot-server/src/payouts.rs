//! Payout API: request parsing and response shaping.
//!
//! Amounts arrive in dollars (JSON numbers or strings) and leave as dollar
//! floats alongside `$X.XX` strings. Everything in between is cents.

use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use bankshot_core::error::{MoneyError, PayoutError};
use bankshot_core::money::{cents_from_json, cents_to_dollars, format_usd};
use bankshot_core::traits::PayoutCalculator;
use bankshot_core::types::{PayoutRequest, PayoutSchedule};
use bankshot_payout::{is_canonical_fee, PayoutEngine};

/// Raw parameters from a query string or JSON body.
#[derive(Debug, Default, Deserialize)]
pub struct PayoutParams {
    pub entry_fee: Option<Value>,
    pub player_count: Option<Value>,
    pub added_money: Option<Value>,
}

/// Read a player count from a JSON number or numeric string.
pub fn count_from_json(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|c| u32::try_from(c).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Value) {
    (status, json!({"success": false, "error": message.into()}))
}

/// Validate parameters, run the engine and shape the JSON reply.
pub fn payout_response(
    engine: &PayoutEngine,
    params: &PayoutParams,
    strict_fees: bool,
) -> (StatusCode, Value) {
    let (Some(fee_value), Some(count_value)) = (&params.entry_fee, &params.player_count) else {
        return error(
            StatusCode::BAD_REQUEST,
            "Missing required parameters: entry_fee and player_count",
        );
    };

    let entry_fee = match cents_from_json(fee_value) {
        Ok(0) | Err(MoneyError::Negative(_)) => {
            return error(StatusCode::BAD_REQUEST, "Entry fee must be greater than 0");
        }
        Ok(fee) => fee,
        Err(e) => return error(StatusCode::BAD_REQUEST, format!("Invalid entry_fee: {e}")),
    };

    let Some(player_count) = count_from_json(count_value) else {
        return error(
            StatusCode::BAD_REQUEST,
            "Invalid player_count: expected a non-negative integer",
        );
    };

    let added_money = match params.added_money.as_ref().filter(|v| !v.is_null()) {
        None => 0,
        Some(v) => match cents_from_json(v) {
            Ok(added) => added,
            Err(e) => return error(StatusCode::BAD_REQUEST, format!("Invalid added_money: {e}")),
        },
    };

    let request = PayoutRequest::new(entry_fee, player_count).with_added_money(added_money);

    if player_count < engine.min_players() {
        return insufficient(&request, engine.min_players());
    }

    if strict_fees && !is_canonical_fee(entry_fee) {
        return (
            StatusCode::BAD_REQUEST,
            json!({
                "success": false,
                "error": "Entry fee must be divisible by $5",
                "entry_fee": cents_to_dollars(entry_fee),
            }),
        );
    }

    match engine.compute(&request) {
        Ok(schedule) => (StatusCode::OK, schedule_json(&schedule)),
        Err(PayoutError::InsufficientPlayers { minimum, .. }) => insufficient(&request, minimum),
        Err(PayoutError::InvalidEntryFee { .. }) => {
            error(StatusCode::BAD_REQUEST, "Entry fee must be greater than 0")
        }
        Err(PayoutError::ArithmeticOverflow) => {
            error(StatusCode::BAD_REQUEST, "Amounts too large to compute")
        }
    }
}

/// Not enough players is a valid question with a negative answer: 200.
fn insufficient(request: &PayoutRequest, minimum: u32) -> (StatusCode, Value) {
    let Ok(total_pool) = request.total_pool() else {
        return error(StatusCode::BAD_REQUEST, "Amounts too large to compute");
    };
    (
        StatusCode::OK,
        json!({
            "success": false,
            "error": format!("Minimum {minimum} players required for payouts"),
            "entry_fee": cents_to_dollars(request.entry_fee),
            "player_count": request.player_count,
            "added_money": cents_to_dollars(request.added_money),
            "total_pot": cents_to_dollars(total_pool),
        }),
    )
}

/// Successful reply body for a computed schedule.
pub fn schedule_json(schedule: &PayoutSchedule) -> Value {
    let payouts: Map<String, Value> = schedule
        .places()
        .map(|(place, amount)| (place.to_string(), json!(cents_to_dollars(amount))))
        .collect();

    let formatted: Map<String, Value> = schedule
        .groups
        .iter()
        .map(|g| (g.group.label(), json!(format_usd(g.amount))))
        .collect();

    let groups: Vec<Value> = schedule
        .groups
        .iter()
        .map(|g| {
            json!({
                "label": g.group.label(),
                "start": g.group.start,
                "end": g.group.end,
                "amount": cents_to_dollars(g.amount),
                "formatted": format_usd(g.amount),
            })
        })
        .collect();

    json!({
        "success": true,
        "entry_fee": cents_to_dollars(schedule.request.entry_fee),
        "player_count": schedule.request.player_count,
        "added_money": cents_to_dollars(schedule.request.added_money),
        "total_pot": cents_to_dollars(schedule.total_pool),
        "denomination": cents_to_dollars(schedule.denomination),
        "places_paid": schedule.places_paid(),
        "max_place": schedule.max_place(),
        "payouts": payouts,
        "formatted_payouts": formatted,
        "groups": groups,
        "timestamp": chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}
