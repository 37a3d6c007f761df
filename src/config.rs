use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use tracing::info;

use crate::auth::AuthConfig;
use crate::dynamodb::DynamoDBConfig;
use crate::serving::ServingConfig;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub dynamodb: DynamoDBConfig,
    pub serving: ServingConfig,
    pub auth: AuthConfig,
}

pub fn load() -> Result<Config> {
    let config = Figment::new()
        .merge(Toml::file("App.toml"))
        .merge(Env::prefixed("APP_").split("__"))
        .extract()?;
    info!("Configuration loaded from App.toml");
    Ok(config)
}
