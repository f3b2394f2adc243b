use serde_derive::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Config {
    pub(crate) listener_address: SocketAddr,
    pub(crate) metrics_listener_address: Option<SocketAddr>,
    #[serde(default = "default_redirect_url")]
    pub(crate) redirect_url: String,
    pub(crate) teachers: TeachersConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct TeachersConfig {
    pub(crate) path: PathBuf,
    /// Keeps the parsed credential file around instead of re-reading it on
    /// every authentication attempt.
    #[serde(default, with = "humantime_serde")]
    pub(crate) cache_ttl: Option<Duration>,
}

fn default_redirect_url() -> String {
    "/static/index.html".to_owned()
}

pub(crate) fn load() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::with_name("activities").required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize::<Config>()
}
