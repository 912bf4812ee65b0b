//! Settings of the `eventhub` binary.
//!
//! Values are read from an optional `settings.toml` in the working directory
//! and can be overridden with `EVENTHUB__<SECTION>__<KEY>` environment
//! variables, e.g. `EVENTHUB__AUTH__JWT_SECRET`.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize)]
pub struct PostalCode {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Option<Server>,
    pub auth: Auth,
    pub postal_code: PostalCode,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("postal_code.base_url", engine::postal_code::DEFAULT_BASE_URL)?
            .set_default(
                "postal_code.timeout_secs",
                engine::postal_code::DEFAULT_TIMEOUT.as_secs(),
            )?
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("EVENTHUB").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
