use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::db::data_path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("HOST is not in the correct format: {0}")]
    InvalidHost(String),

    #[error("PORT is not the correct format: {0}")]
    InvalidPort(String),
}

/// Server settings, read from `.env` and the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: Ipv4Addr,
    pub port: u16,
    pub data_dir: PathBuf,
    pub game_log_file: String,
    pub player_summary_file: String,
    pub league_average_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::LOCALHOST,
            port: 5000,
            data_dir: PathBuf::from("data"),
            game_log_file: "mlb_full.csv".to_string(),
            player_summary_file: "mlb_player_averages.csv".to_string(),
            league_average_file: "mlb_rate_stat_averages.csv".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(host) = lookup("HOST") {
            config.host = host
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost(host))?;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port))?;
        }
        if let Some(dir) = lookup("DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup("GAME_LOG_FILE") {
            config.game_log_file = file;
        }
        if let Some(file) = lookup("PLAYER_SUMMARY_FILE") {
            config.player_summary_file = file;
        }
        if let Some(file) = lookup("LEAGUE_AVERAGE_FILE") {
            config.league_average_file = file;
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }

    pub fn game_log_path(&self) -> PathBuf {
        data_path(&self.data_dir, &self.game_log_file)
    }

    pub fn player_summary_path(&self) -> PathBuf {
        data_path(&self.data_dir, &self.player_summary_file)
    }

    pub fn league_average_path(&self) -> PathBuf {
        data_path(&self.data_dir, &self.league_average_file)
    }
}
