//! Axum router and HTTP handlers.

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::payouts::{payout_response, PayoutParams};
use crate::qr::QrClient;
use crate::{media, tournament, AppState};

// ---------------------------------------------------------------------------
// Error helper
// ---------------------------------------------------------------------------

struct ApiError(anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(error = %self.0, "Request failed");
        let body = json!({"success": false, "error": format!("{:#}", self.0)});
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(e: E) -> Self {
        ApiError(e.into())
    }
}

type ApiResult<T> = Result<T, ApiError>;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Videos for the display loop run well past axum's 2 MiB default.
const MAX_UPLOAD_BYTES: usize = 512 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/payouts", get(payouts_get).post(payouts_post))
        .route("/api/tournament", get(tournament_data))
        .route("/api/qr", get(tournament_qr))
        .route("/api/media", get(media_list))
        .route(
            "/api/media/upload",
            post(media_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/media/delete", post(media_delete))
        .with_state(state)
        .layer(cors)
}

// ---------------------------------------------------------------------------
// Payouts
// ---------------------------------------------------------------------------

/// `GET /api/payouts?entry_fee=20&player_count=16[&added_money=100]`
async fn payouts_get(
    State(state): State<AppState>,
    Query(params): Query<PayoutParams>,
) -> impl IntoResponse {
    respond_payouts(&state, &params)
}

/// `POST /api/payouts` with the same fields as a JSON body.
async fn payouts_post(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    match serde_json::from_slice::<PayoutParams>(&body) {
        Ok(params) => respond_payouts(&state, &params),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": format!("Invalid JSON body: {e}")})),
        ),
    }
}

fn respond_payouts(state: &AppState, params: &PayoutParams) -> (StatusCode, Json<Value>) {
    let (status, body) = payout_response(&state.engine, params, state.config.strict_fees);
    info!(
        status = status.as_u16(),
        success = body["success"].as_bool().unwrap_or(false),
        "Payout request"
    );
    (status, Json(body))
}

// ---------------------------------------------------------------------------
// Tournament
// ---------------------------------------------------------------------------

/// `GET /api/tournament`: stored event data plus computed payouts.
async fn tournament_data(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let body = match tournament::load(&state.config.tournament_file()).await? {
        Some(data) => tournament::tournament_view(&state.engine, data),
        None => tournament::no_tournament(),
    };
    Ok(Json(body))
}

/// `GET /api/qr`: PNG linking to the current tournament's bracket.
async fn tournament_qr(State(state): State<AppState>) -> ApiResult<Response> {
    let url = tournament::load(&state.config.tournament_file())
        .await?
        .and_then(|data| data["tournament_url"].as_str().map(str::to_owned))
        .filter(|url| !url.trim().is_empty());

    let Some(url) = url else {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "error": "No tournament URL configured"})),
        )
            .into_response());
    };

    let target = QrClient::bracket_url(url.trim());
    let png = match state.qr.fetch(&target).await {
        Ok(png) => png,
        Err(e) => {
            let detail = format!("{e:#}");
            warn!(error = %detail, %target, "QR generation failed");
            return Ok((
                StatusCode::BAD_GATEWAY,
                Json(json!({"success": false, "error": format!("QR generation failed: {e}")})),
            )
                .into_response());
        }
    };

    let path = state.config.qr_file();
    if let Err(e) = save(&path, &png).await {
        warn!(error = %e, path = %path.display(), "Failed to store QR image");
    } else {
        info!(%target, path = %path.display(), "QR code generated");
    }

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

async fn save(path: &std::path::Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

/// `GET /api/media`
async fn media_list(State(state): State<AppState>) -> Json<Value> {
    Json(media::load_config(&state.config.media_config_file()).await)
}

/// `POST /api/media/upload` with a multipart `file` field.
async fn media_upload(State(state): State<AppState>, mut multipart: Multipart) -> Json<Value> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Json(media::failure("No file uploaded")),
            Err(e) => return Json(media::failure(format!("Upload error: {e}"))),
        };
        if field.name() != Some("file") {
            continue;
        }
        let original = field.file_name().unwrap_or_default().to_string();
        return match field.bytes().await {
            Ok(bytes) => Json(media::upload(&state.config.media_dir, &original, &bytes).await),
            Err(e) => Json(media::failure(format!("Upload error: {e}"))),
        };
    }
}

#[derive(Deserialize)]
struct DeleteRequest {
    #[serde(default)]
    path: String,
}

/// `POST /api/media/delete` with `{"path": "/media/file.jpg"}`.
async fn media_delete(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    let requested = serde_json::from_slice::<DeleteRequest>(&body)
        .map(|r| r.path)
        .unwrap_or_default();
    Json(media::delete(&state.config.media_dir, &requested).await)
}
