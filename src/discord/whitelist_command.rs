use tracing::{info, warn};

use crate::discord::discord_helper;
use crate::rcon::{whitelist, CommandSender};
use crate::{fmt, Context, Error};

const MISSING_USERNAME: &str = "Missing username.";

/// Whitelist management for the Minecraft server.
#[poise::command(prefix_command, aliases("wl"), user_cooldown = 5)]
pub async fn whitelist(
    ctx: Context<'_>,
    verb: Option<String>,
    username: Option<String>,
    #[rest] rest: Option<String>,
) -> Result<(), Error> {
    let data = ctx.data();

    // The role lookup is only needed (and only attempted) for removals.
    let authorized = match verb.as_deref() {
        Some("remove") | Some("rm") => {
            discord_helper::has_role(&ctx, data.config.authorized_role_id).await
        }
        _ => false,
    };

    let invocation = WhitelistInvocation {
        verb: verb.as_deref(),
        username: username.as_deref(),
        raw: raw_arguments(&verb, &username, &rest),
        invoker: ctx.author().tag(),
        authorized,
    };

    let reply = run(data.rcon.as_ref(), &invocation).await;
    discord_helper::reply(&ctx, reply).await?;
    Ok(())
}

/// One parsed whitelist invocation, dispatched on the verb token.
pub(crate) struct WhitelistInvocation<'a> {
    pub verb: Option<&'a str>,
    pub username: Option<&'a str>,
    pub raw: String,
    pub invoker: String,
    pub authorized: bool,
}

pub(crate) async fn run<S: CommandSender>(
    rcon: &S,
    invocation: &WhitelistInvocation<'_>,
) -> String {
    let user = invocation.invoker.as_str();
    match invocation.verb {
        Some("add") => {
            let Some(username) = invocation.username else {
                return MISSING_USERNAME.to_string();
            };
            info!(user, username, "Add user requested");
            match whitelist::add_user(rcon, username).await {
                Ok(_) => fmt!("Whitelisted `{username}`."),
                Err(_) => fmt!("Could not whitelist `{username}`. Server appears down."),
            }
        }
        Some("remove") | Some("rm") => {
            let Some(username) = invocation.username else {
                return MISSING_USERNAME.to_string();
            };
            if !invocation.authorized {
                warn!(user, username, "Unauthorized whitelist removal attempt");
                return fmt!("You are not allowed to remove `{username}` from the whitelist.");
            }
            info!(user, username, "Remove user requested");
            match whitelist::remove_user(rcon, username).await {
                Ok(_) => fmt!("Removed `{username}` from whitelist."),
                Err(_) => fmt!("Could not remove `{username}` from whitelist. Server appears down."),
            }
        }
        Some("ls") | Some("list") => {
            info!(user, "List users requested");
            match whitelist::list_users(rcon).await {
                Ok(response) => response,
                Err(_) => "Error: could not list users.".to_string(),
            }
        }
        _ => {
            warn!(user, arguments = invocation.raw.as_str(), "Unrecognized whitelist command");
            "I don't recognize that command!".to_string()
        }
    }
}

fn raw_arguments(
    verb: &Option<String>,
    username: &Option<String>,
    rest: &Option<String>,
) -> String {
    [verb, username, rest]
        .iter()
        .filter_map(|token| token.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
}
