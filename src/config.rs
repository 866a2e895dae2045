use std::env;
use std::fmt;

/// Which document store backs the API
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    MongoDB { uri: String, database: Option<String> },
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => write!(f, "invalid {}: {:?}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Reads HOST, PORT, STORE_BACKEND, DATABASE_URL and MONGODB_DATABASE
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            None => 3000,
        };

        let backend = lookup("STORE_BACKEND").unwrap_or_else(|| "mongodb".to_string());
        let store = match backend.to_lowercase().as_str() {
            "mongodb" | "mongo" => StoreBackend::MongoDB {
                uri: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
                database: lookup("MONGODB_DATABASE").filter(|name| !name.is_empty()),
            },
            "memory" => StoreBackend::Memory,
            _ => {
                return Err(ConfigError::Invalid {
                    key: "STORE_BACKEND",
                    value: backend,
                })
            }
        };

        Ok(Config { host, port, store })
    }
}
