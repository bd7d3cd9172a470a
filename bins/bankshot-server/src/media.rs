//! Kiosk media library: configuration listing, uploads and confined deletes.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tracing::{info, warn};

/// Media items from `media_config.json`, or `[]` when the file is missing,
/// unreadable or not a JSON array.
pub async fn load_config(path: &Path) -> Value {
    let Ok(raw) = tokio::fs::read_to_string(path).await else {
        return json!([]);
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(items @ Value::Array(_)) => items,
        Ok(_) => json!([]),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring malformed media config");
            json!([])
        }
    }
}

/// Map a client path (`/media/a.jpg`, `media/a.jpg` or `a.jpg`) onto the
/// media directory. Not yet canonicalised.
pub fn candidate_path(media_dir: &Path, requested: &str) -> PathBuf {
    let relative = requested.trim_start_matches('/');
    let relative = relative.strip_prefix("media/").unwrap_or(relative);
    media_dir.join(relative)
}

pub fn failure(message: impl Into<String>) -> Value {
    json!({"success": false, "message": message.into()})
}

/// Extensions the display loop can play.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "mp4", "webm", "mov", "avi"];

/// Name an upload is stored under: `<timestamp>_<basename>` with the
/// basename reduced to `[A-Za-z0-9._-]`. `None` for disallowed extensions.
pub fn stored_name(original: &str, timestamp: i64) -> Option<String> {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let (_, ext) = base.rsplit_once('.')?;
    if !ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
        return None;
    }
    let clean: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    Some(format!("{timestamp}_{clean}"))
}

/// Store an uploaded file in `media_dir`, creating the directory if needed.
pub async fn upload(media_dir: &Path, original: &str, bytes: &[u8]) -> Value {
    let Some(name) = stored_name(original, chrono::Utc::now().timestamp()) else {
        warn!(original, "Rejected media upload");
        return failure("Invalid file type");
    };
    if let Err(e) = tokio::fs::create_dir_all(media_dir).await {
        warn!(dir = %media_dir.display(), error = %e, "Cannot create media directory");
        return failure("Failed to save file");
    }

    let target = media_dir.join(&name);
    match tokio::fs::write(&target, bytes).await {
        Ok(()) => {
            info!(path = %target.display(), size = bytes.len(), "Stored media upload");
            json!({
                "success": true,
                "filename": name,
                "path": format!("/media/{name}"),
            })
        }
        Err(e) => {
            warn!(path = %target.display(), error = %e, "Media upload failed");
            failure("Failed to save file")
        }
    }
}

/// Delete `requested` if, after resolving symlinks and `..`, it is a regular
/// file inside `media_dir`.
pub async fn delete(media_dir: &Path, requested: &str) -> Value {
    if requested.trim().is_empty() {
        return failure("No file path provided");
    }

    let Ok(root) = tokio::fs::canonicalize(media_dir).await else {
        return failure("Media directory not found");
    };
    let Ok(target) = tokio::fs::canonicalize(candidate_path(media_dir, requested)).await else {
        return failure(format!("File not found: {requested}"));
    };

    if !target.starts_with(&root) || target == root {
        warn!(requested, resolved = %target.display(), "Rejected delete outside media directory");
        return failure("Invalid file path - must be in media directory");
    }

    match tokio::fs::metadata(&target).await {
        Ok(meta) if meta.is_file() => {}
        _ => return failure("Not a valid file"),
    }

    match tokio::fs::remove_file(&target).await {
        Ok(()) => {
            info!(path = %target.display(), "Deleted media file");
            json!({
                "success": true,
                "message": "File deleted successfully",
                "path": requested,
            })
        }
        Err(e) => {
            warn!(path = %target.display(), error = %e, "Media delete failed");
            failure("Failed to delete file - check permissions")
        }
    }
}
