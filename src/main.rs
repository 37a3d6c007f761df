use anyhow::Result;
use tracing::subscriber::set_global_default;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::auth::JwtService;
use crate::dynamodb::DynamoTable;

mod auth;
mod config;
mod dynamodb;
mod graphql;
mod serving;

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = init_telemetry()?;

    let config = config::load()?;
    let dynamodb = DynamoTable::load(&config.dynamodb).await?;
    let jwt = JwtService::new(&config.auth.secret);

    serving::run_and_serve(config.serving, dynamodb, jwt).await;
    Ok(())
}

fn init_telemetry() -> Result<WorkerGuard> {
    LogTracer::init()?;
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new("chat-server".into(), writer));
    set_global_default(subscriber)?;
    Ok(guard)
}
