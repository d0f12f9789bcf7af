use tracing::{error, info, warn};

use crate::discord::discord_helper;
use crate::{Context, Error};

/// Re-dials the Minecraft RCON endpoint and swaps in the fresh session.
/// Silent in chat on success; the previous session stays active on failure.
#[poise::command(prefix_command, user_cooldown = 5)]
pub async fn reconnect(ctx: Context<'_>) -> Result<(), Error> {
    info!(user = %ctx.author().tag(), "Reconnect requested");
    match ctx.data().rcon.reconnect().await {
        Ok(()) => {
            warn!("Reconnected to Minecraft server");
        }
        Err(e) => {
            error!(error = %e, "Could not reconnect to Minecraft server");
            discord_helper::reply(&ctx, "Could not reconnect to server.".to_string()).await?;
        }
    }
    Ok(())
}
