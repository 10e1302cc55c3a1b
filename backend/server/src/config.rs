use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use menu::models::{DEFAULT_API_BASE, DEFAULT_LOCATION_ID};
use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub api_base: String,
    pub location_id: String,
    pub timeout: Duration,
    pub protein_goal: f64,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "3001"),
            api_base: try_load("DINING_API_BASE", DEFAULT_API_BASE),
            location_id: try_load("DINING_LOCATION_ID", DEFAULT_LOCATION_ID),
            timeout: Duration::from_secs(try_load("DINING_TIMEOUT_SECS", "30")),
            protein_goal: try_load("PROTEIN_GOAL", "145"),
            static_dir: try_load("STATIC_DIR", "dist"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
