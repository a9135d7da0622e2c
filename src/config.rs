use derive_more::Display;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum ConfigError {
    #[display(fmt = "{} must be set", _0)]
    Missing(&'static str),

    #[display(fmt = "{} has an invalid value: {}", name, value)]
    Invalid { name: &'static str, value: String },
}

impl std::error::Error for ConfigError {}

/// Runtime settings, read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub app_name: String,
    pub app_env: String,
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: String::from("todo-api"),
            app_env: String::from("development"),
            database_url: None,
            host: String::from("0.0.0.0"),
            port: 3000,
            workers: None,
        }
    }
}

impl Config {
    /// Expects `.env` to be loaded already
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source, empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let port = match get("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => defaults.port,
        };

        let workers = match get("WORKERS") {
            Some(value) => match value.parse::<usize>() {
                Ok(n) if n > 0 => Some(n),
                _ => return Err(ConfigError::Invalid { name: "WORKERS", value }),
            },
            None => None,
        };

        Ok(Config {
            app_name: get("APP_NAME").unwrap_or(defaults.app_name),
            app_env: get("APP_ENV").unwrap_or(defaults.app_env),
            database_url: get("DATABASE_URL"),
            host: get("HOST").unwrap_or(defaults.host),
            port,
            workers,
        })
    }

    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::Missing("DATABASE_URL"))
    }

    pub fn bind_address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
