use std::env;

use crate::preferences::ColorScheme;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub foreign_keys: bool,
    pub preferences_path: String,
    pub seed_demo_data: bool,
    pub system_color_scheme: ColorScheme,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        Ok(Self {
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "ecommerce.db".to_string()),
            foreign_keys: parse_bool("FOREIGN_KEYS", true)?,
            preferences_path: env::var("PREFERENCES_PATH")
                .unwrap_or_else(|_| "preferences.json".to_string()),
            seed_demo_data: parse_bool("SEED_DEMO_DATA", false)?,
            system_color_scheme: match env::var("SYSTEM_COLOR_SCHEME") {
                Ok(value) => value
                    .parse()
                    .map_err(|_| ConfigError::InvalidColorScheme(value))?,
                Err(_) => ColorScheme::Light,
            },
        })
    }
}

fn parse_bool(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidBool { name, value }),
        },
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a boolean, got {value:?}")]
    InvalidBool { name: &'static str, value: String },

    #[error("SYSTEM_COLOR_SCHEME must be light or dark, got {0:?}")]
    InvalidColorScheme(String),
}
