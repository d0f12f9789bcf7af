use poise::serenity_prelude::RoleId;
use poise::{CreateReply, ReplyHandle};
use tracing::{error, info};

use crate::{Context, Error};

/// Sends `content` as a reply to the triggering message in its channel.
pub(crate) async fn reply<'a>(ctx: &Context<'a>, content: String) -> Result<ReplyHandle<'a>, Error> {
    info!(content = content.as_str(), "Sending reply");
    Ok(ctx
        .send(CreateReply::default().content(content).reply(true))
        .await?)
}

/// Whether the invoking user holds `role_id` in the guild the message was
/// posted in. A failed member lookup is logged and treated as not holding
/// the role.
pub(crate) async fn has_role(ctx: &Context<'_>, role_id: u64) -> bool {
    match ctx.author_member().await {
        Some(member) => member.roles.contains(&RoleId::new(role_id)),
        None => {
            error!(user = %ctx.author().tag(), "Could not resolve guild member for role check");
            false
        }
    }
}
