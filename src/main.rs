mod config;
mod discord;
mod health;
mod logging;
mod rcon;
mod util;

use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::rcon::RconSession;

pub struct Data {
    pub config: AppConfig,
    pub rcon: Arc<RconSession>,
}

pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

type Context<'a> = poise::Context<'a, Data, Error>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cfg = config::load_config()?;
    logging::init(&cfg)?;
    info!("Logging initialised. Connecting to Minecraft server");

    let rcon = match RconSession::connect(&cfg.minecraft).await {
        Ok(session) => Arc::new(session),
        Err(e) => {
            error!(error = %e, "Could not connect to Minecraft server. Is it up?");
            return Err(e.into());
        }
    };

    health::spawn();

    let token = cfg.bot_token.clone();
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: discord::commands(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("c+".to_string()),
                additional_prefixes: vec![poise::Prefix::Literal("C+")],
                case_insensitive_commands: true,
                ..Default::default()
            },
            on_error: |error| Box::pin(discord::on_error(error)),
            ..Default::default()
        })
        .setup(move |_ctx, _ready, _framework| {
            Box::pin(async move { Ok(Data { config: cfg, rcon }) })
        })
        .build();

    let intents =
        serenity::GatewayIntents::GUILD_MESSAGES | serenity::GatewayIntents::MESSAGE_CONTENT;
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Received shutdown signal - closing Discord session");
        shard_manager.shutdown_all().await;
    });

    info!("Setup complete. Starting client listener");
    client.start().await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    let mut terminate = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        .expect("SIGTERM handler must be installable");
    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate.recv() => {}
    }
}
