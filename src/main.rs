mod cache;
mod commands;
mod error;
mod format;
mod graphing;
mod logging;
mod model;
mod settings;
mod stat_bot;
mod stat_manager;
mod stats;
mod testaustime;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serenity::all::{ActivityData, GatewayIntents};
use serenity::Client;

use crate::cache::SystemClock;
use crate::error::Result;
use crate::settings::{Secrets, Settings};
use crate::stat_bot::StatBot;
use crate::stat_manager::StatManager;
use crate::testaustime::Testaustime;

#[derive(Parser)]
struct Opts {
    #[clap(short = 's', long = "settings-file")]
    settings_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let opts: Opts = Opts::parse();

    let settings = Settings::load(&opts.settings_file)?;
    logging::init(&settings.log_level);
    settings.validate()?;

    let secrets = Secrets::from_env()?;

    let mut api = Testaustime::new(settings.api_host.as_deref())?;
    api.login(&secrets.testaustime_user, &secrets.testaustime_pass)
        .await?;

    let refresh_interval = chrono::Duration::seconds(settings.refresh_interval_secs as i64);
    let stat_man = Arc::new(
        StatManager::connect(api, &settings.leaderboard, refresh_interval, Arc::new(SystemClock))
            .await?,
    );

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&secrets.discord_token, intents)
        .activity(ActivityData::playing("you code"))
        .event_handler(StatBot::new(settings, stat_man))
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted, shutting down");
            shard_manager.shutdown_all().await;
        }
    });

    client.start().await?;

    Ok(())
}
