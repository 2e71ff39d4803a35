use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding `data.json`, `categories.json` and `settings.json`.
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: env::var("TALLY_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("TALLY_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5001),
            data_dir: env::var("TALLY_DATA_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
