//! Server configuration loaded from environment variables.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bankshot_core::constants::MIN_PLAYERS;

pub const DEFAULT_QR_API: &str = "https://api.qrserver.com/v1/create-qr-code/";

#[derive(Clone, Debug)]
pub struct Config {
    /// Address to bind the HTTP server.
    pub bind_addr: String,
    /// Holds `tournament_data.json` and the generated QR image.
    pub data_dir: PathBuf,
    /// Root of the kiosk media library.
    pub media_dir: PathBuf,
    /// QR code generation service.
    pub qr_api: String,
    /// QR image edge length in pixels.
    pub qr_size: u32,
    /// Smallest field that gets paid.
    pub min_players: u32,
    /// Reject entry fees that are not whole multiples of $5.
    pub strict_fees: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = var("BANKSHOT_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let data_dir = var("BANKSHOT_DATA_DIR").map(PathBuf::from).unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".bankshot")
        });

        let media_dir = var("BANKSHOT_MEDIA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("media"));

        let qr_api = var("BANKSHOT_QR_API").unwrap_or_else(|| DEFAULT_QR_API.to_string());

        let qr_size: u32 = var("BANKSHOT_QR_SIZE")
            .unwrap_or_else(|| "300".to_string())
            .parse()
            .context("BANKSHOT_QR_SIZE must be a positive integer")?;

        let min_players: u32 = var("BANKSHOT_MIN_PLAYERS")
            .unwrap_or_else(|| MIN_PLAYERS.to_string())
            .parse()
            .context("BANKSHOT_MIN_PLAYERS must be a positive integer")?;

        let strict_fees = match var("BANKSHOT_STRICT_FEES") {
            None => true,
            Some(v) => parse_bool(&v)
                .with_context(|| format!("BANKSHOT_STRICT_FEES must be true or false, got {v:?}"))?,
        };

        Ok(Config {
            bind_addr,
            data_dir,
            media_dir,
            qr_api,
            qr_size,
            min_players,
            strict_fees,
        })
    }

    pub fn tournament_file(&self) -> PathBuf {
        self.data_dir.join("tournament_data.json")
    }

    pub fn qr_file(&self) -> PathBuf {
        self.data_dir.join("tournament_qr.png")
    }

    pub fn media_config_file(&self) -> PathBuf {
        self.media_dir.join("media_config.json")
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");
        assert!(cfg.data_dir.ends_with(".bankshot"));
        assert_eq!(cfg.media_dir, cfg.data_dir.join("media"));
        assert_eq!(cfg.qr_api, DEFAULT_QR_API);
        assert_eq!(cfg.qr_size, 300);
        assert_eq!(cfg.min_players, MIN_PLAYERS);
        assert!(cfg.strict_fees);
    }

    #[test]
    fn overrides() {
        let cfg = load(&[
            ("BANKSHOT_BIND_ADDR", "127.0.0.1:9000"),
            ("BANKSHOT_DATA_DIR", "/srv/kiosk"),
            ("BANKSHOT_QR_SIZE", "200"),
            ("BANKSHOT_MIN_PLAYERS", "4"),
            ("BANKSHOT_STRICT_FEES", "off"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
        assert_eq!(cfg.tournament_file(), PathBuf::from("/srv/kiosk/tournament_data.json"));
        assert_eq!(cfg.qr_file(), PathBuf::from("/srv/kiosk/tournament_qr.png"));
        assert_eq!(cfg.media_config_file(), PathBuf::from("/srv/kiosk/media/media_config.json"));
        assert_eq!(cfg.qr_size, 200);
        assert_eq!(cfg.min_players, 4);
        assert!(!cfg.strict_fees);
    }

    #[test]
    fn separate_media_dir() {
        let cfg = load(&[("BANKSHOT_DATA_DIR", "/a"), ("BANKSHOT_MEDIA_DIR", "/b")]).unwrap();
        assert_eq!(cfg.media_dir, PathBuf::from("/b"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(load(&[("BANKSHOT_QR_SIZE", "big")]).is_err());
        assert!(load(&[("BANKSHOT_MIN_PLAYERS", "-1")]).is_err());
        assert!(load(&[("BANKSHOT_STRICT_FEES", "maybe")]).is_err());
    }
}
