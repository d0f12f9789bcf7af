use tracing::error;

use crate::{Data, Error};

mod discord_helper;
mod misc_commands;
mod reconnect_command;
mod whitelist_command;

pub(crate) fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        whitelist_command::whitelist(),
        reconnect_command::reconnect(),
        misc_commands::help(),
        misc_commands::ping(),
    ]
}

/// Framework-level error hook. Cooldown violations get the fixed rate-limit
/// reply; everything else is logged and handed to poise's default handler.
pub(crate) async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::CooldownHit { ctx, .. } => {
            if let Err(e) =
                discord_helper::reply(&ctx, "You are being rate limited!".to_string()).await
            {
                error!(error = %e, "Could not send rate limit reply");
            }
        }
        other => {
            error!(error = %other, "Command framework error");
            if let Err(e) = poise::builtins::on_error(other).await {
                error!(error = ?e, "Error while handling error");
            }
        }
    }
}
