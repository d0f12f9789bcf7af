use tracing::{error, info};

use super::{CommandSender, RconError};
use crate::fmt;

/// Sends `whitelist add` followed by a best-effort `whitelist reload`.
///
/// The reload is only issued once the add succeeded, and its own outcome is
/// ignored.
pub async fn add_user<S: CommandSender>(rcon: &S, username: &str) -> Result<String, RconError> {
    match rcon.send_command(&fmt!("whitelist add {username}")).await {
        Ok(response) => {
            rcon.send_command("whitelist reload").await.ok();
            info!(response = response.as_str(), "Whitelist add response");
            Ok(response)
        }
        Err(e) => {
            error!(username, error = %e, "Could not add user to whitelist");
            Err(e)
        }
    }
}

/// Sends `whitelist remove` followed by a best-effort `whitelist reload`.
pub async fn remove_user<S: CommandSender>(rcon: &S, username: &str) -> Result<String, RconError> {
    match rcon.send_command(&fmt!("whitelist remove {username}")).await {
        Ok(response) => {
            rcon.send_command("whitelist reload").await.ok();
            info!(response = response.as_str(), "Whitelist remove response");
            Ok(response)
        }
        Err(e) => {
            error!(username, error = %e, "Could not remove user from whitelist");
            Err(e)
        }
    }
}

/// Sends `whitelist list` and returns the server's response verbatim.
pub async fn list_users<S: CommandSender>(rcon: &S) -> Result<String, RconError> {
    match rcon.send_command("whitelist list").await {
        Ok(response) => Ok(response),
        Err(e) => {
            error!(error = %e, "Could not list whitelisted users");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::FakeRcon;
    use super::*;

    #[tokio::test]
    async fn test_add_sends_add_then_reload() {
        let rcon = FakeRcon::replying("Added Steve to the whitelist");
        let response = add_user(&rcon, "Steve").await.unwrap();
        assert_eq!(response, "Added Steve to the whitelist");
        assert_eq!(rcon.sent(), vec!["whitelist add Steve", "whitelist reload"]);
    }

    #[tokio::test]
    async fn test_add_failure_skips_reload() {
        let rcon = FakeRcon::down();
        assert!(add_user(&rcon, "Steve").await.is_err());
        assert_eq!(rcon.sent(), vec!["whitelist add Steve"]);
    }

    #[tokio::test]
    async fn test_reload_failure_keeps_add_success() {
        let rcon = FakeRcon::failing_from(1, "Added Steve to the whitelist");
        let response = add_user(&rcon, "Steve").await.unwrap();
        assert_eq!(response, "Added Steve to the whitelist");
        assert_eq!(rcon.sent(), vec!["whitelist add Steve", "whitelist reload"]);
    }

    #[tokio::test]
    async fn test_remove_sends_remove_then_reload() {
        let rcon = FakeRcon::replying("Removed Steve from the whitelist");
        let response = remove_user(&rcon, "Steve").await.unwrap();
        assert_eq!(response, "Removed Steve from the whitelist");
        assert_eq!(
            rcon.sent(),
            vec!["whitelist remove Steve", "whitelist reload"]
        );
    }

    #[tokio::test]
    async fn test_list_passes_response_through() {
        let rcon = FakeRcon::replying("There are 2 whitelisted players: Steve, Alex");
        let response = list_users(&rcon).await.unwrap();
        assert_eq!(response, "There are 2 whitelisted players: Steve, Alex");
        assert_eq!(rcon.sent(), vec!["whitelist list"]);
    }

    #[tokio::test]
    async fn test_list_failure_is_single_call() {
        let rcon = FakeRcon::down();
        assert!(list_users(&rcon).await.is_err());
        assert_eq!(rcon.sent(), vec!["whitelist list"]);
    }
}
