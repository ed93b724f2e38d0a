use std::path::PathBuf;

/// Cookbook service configuration loaded from environment variables.
#[derive(Debug)]
pub struct CookbookConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3220). Env var: `COOKBOOK_PORT`.
    pub cookbook_port: u16,
    /// Public base URL used in media and share links. Env var: `BASE_URL`.
    pub base_url: String,
    /// Root directory for stored image assets (default `media`). Env var: `MEDIA_ROOT`.
    pub media_root: PathBuf,
}

impl CookbookConfig {
    pub fn from_env() -> Self {
        let cookbook_port = std::env::var("COOKBOOK_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3220);
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            cookbook_port,
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{cookbook_port}")),
            media_root: std::env::var("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("media")),
        }
    }
}
