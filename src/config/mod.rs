use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_api_url: String,
    pub youtube_api_url: String,
    pub youtube_api_key: Option<String>,
    pub gemini_api_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub mpv_path: String,
    pub search_debounce_ms: u64,
    pub http_timeout_secs: u64,
    pub log_file: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv().ok(); // .env is optional, plain environment variables work too

        Ok(Config {
            catalog_api_url: var_or("CATALOG_API_URL", "https://saavn.dev/api"),
            youtube_api_url: var_or("YOUTUBE_API_URL", "https://www.googleapis.com/youtube/v3"),
            youtube_api_key: non_empty_var("YOUTUBE_API_KEY"),
            gemini_api_url: var_or(
                "GEMINI_API_URL",
                "https://generativelanguage.googleapis.com/v1beta",
            ),
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            gemini_model: var_or("GEMINI_MODEL", "gemini-1.5-flash"),
            mpv_path: var_or("MPV_PATH", "mpv"),
            search_debounce_ms: parse_var("SEARCH_DEBOUNCE_MS", 500)?,
            http_timeout_secs: parse_var("HTTP_TIMEOUT_SECS", 10)?,
            log_file: var_or("MOODWAVE_LOG", "/tmp/moodwave.log").into(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_api_url: "https://saavn.dev/api".to_string(),
            youtube_api_url: "https://www.googleapis.com/youtube/v3".to_string(),
            youtube_api_key: None,
            gemini_api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            gemini_api_key: None,
            gemini_model: "gemini-1.5-flash".to_string(),
            mpv_path: "mpv".to_string(),
            search_debounce_ms: 500,
            http_timeout_secs: 10,
            log_file: PathBuf::from("/tmp/moodwave.log"),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| default.to_string())
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(val) if !val.trim().is_empty() => val
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a whole number, got {val:?}")),
        _ => Ok(default),
    }
}
