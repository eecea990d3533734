//! Process configuration: built-in defaults, optional `config/default` file,
//! then `STOCKBOOK__*` environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use stockbook_ledger::DEFAULT_NAMESPACE;
use stockbook_observability::LogFormat;

const CONFIG_FILE: &str = "config/default";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_WHATSAPP_PHONE: &str = "+212760834914";
const DEFAULT_RESTAURANT_NAME: &str = "مطعم لندن فود";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite URL, e.g. `sqlite://stockbook.db`. In-memory storage when unset.
    #[serde(default)]
    pub database_url: Option<String>,
    /// Prefix of the persisted collection keys.
    pub namespace: String,
    /// Recipient used when a report request names none.
    pub whatsapp_phone: String,
    pub restaurant_name: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            whatsapp_phone: DEFAULT_WHATSAPP_PHONE.to_string(),
            restaurant_name: DEFAULT_RESTAURANT_NAME.to_string(),
            log_format: LogFormat::Json,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Environment::with_prefix("STOCKBOOK").separator("__"))
    }

    fn load_from(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", DEFAULT_PORT as i64)?
            .set_default("namespace", DEFAULT_NAMESPACE)?
            .set_default("whatsapp_phone", DEFAULT_WHATSAPP_PHONE)?
            .set_default("restaurant_name", DEFAULT_RESTAURANT_NAME)?
            .set_default("log_format", "json")?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
