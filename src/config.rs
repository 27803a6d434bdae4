use log::LevelFilter;
use serde::Deserialize;
use std::{
    env,
    fs::read_to_string,
    net::{IpAddr, Ipv4Addr},
    path::{Path, PathBuf},
};

/// The server version extracted from the Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable key to load the config from
const CONFIG_ENV_KEY: &str = "QR_CONFIG_JSON";

/// Config file loaded when the environment variable is not set
const CONFIG_FILE: &str = "config.json";

/// Loads the config from the `QR_CONFIG_JSON` env variable, falling back
/// to `config.json` in the working directory. [None] means the defaults
/// should be used
pub fn load_config() -> Option<Config> {
    if let Ok(data) = env::var(CONFIG_ENV_KEY) {
        return parse_config(CONFIG_ENV_KEY, &data);
    }

    let file = Path::new(CONFIG_FILE);
    if !file.exists() {
        return None;
    }

    match read_to_string(file) {
        Ok(data) => parse_config(CONFIG_FILE, &data),
        Err(err) => {
            eprintln!("Failed to read {} (Using defaults): {:?}", CONFIG_FILE, err);
            None
        }
    }
}

/// Parses config JSON loaded from `source`. The logger isn't running yet
/// so failures go to stderr
fn parse_config(source: &str, data: &str) -> Option<Config> {
    serde_json::from_str(data)
        .map_err(|err| eprintln!("Invalid config in {} (Using defaults): {}", source, err))
        .ok()
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// File the ranking is persisted to
    pub ranking_file: PathBuf,
    /// Directory static files are served from for any non API paths
    pub public_dir: PathBuf,
    /// Whether to attach CORS headers to API responses
    pub cors: bool,
    pub logging: LevelFilter,
    pub logging_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            ranking_file: PathBuf::from("quiz_ranking.json"),
            public_dir: PathBuf::from("."),
            cors: false,
            logging: LevelFilter::Info,
            logging_dir: PathBuf::from("data/logs"),
        }
    }
}
