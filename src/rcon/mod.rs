use std::time::Duration;

use async_trait::async_trait;
use rcon::Connection;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::debug;

use crate::config::MinecraftConfig;
use crate::fmt;

pub mod whitelist;

/// Upper bound on a single command round trip.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(5);
/// Upper bound on dialing and authenticating a fresh connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum RconError {
    #[error("could not reach rcon endpoint {0}: {1}")]
    Connect(String, #[source] rcon::Error),
    #[error("rcon command failed: {0}")]
    Command(#[source] rcon::Error),
    #[error("rcon round trip timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// One line of text to the game server, one line back.
#[async_trait]
pub trait CommandSender: Send + Sync {
    async fn send_command(&self, line: &str) -> Result<String, RconError>;
}

/// The process-wide RCON session.
///
/// The live connection sits behind a mutex so a send holds it for exactly one
/// round trip. `reconnect` dials the replacement before taking the lock and
/// swaps it in only on success, so a failed reconnect never disturbs the
/// active connection.
pub struct RconSession {
    endpoint: MinecraftConfig,
    conn: Mutex<Connection<TcpStream>>,
}

impl RconSession {
    pub async fn connect(endpoint: &MinecraftConfig) -> Result<Self, RconError> {
        let conn = dial(endpoint).await?;
        Ok(Self {
            endpoint: endpoint.clone(),
            conn: Mutex::new(conn),
        })
    }

    pub async fn reconnect(&self) -> Result<(), RconError> {
        let fresh = dial(&self.endpoint).await?;
        *self.conn.lock().await = fresh;
        Ok(())
    }
}

#[async_trait]
impl CommandSender for RconSession {
    async fn send_command(&self, line: &str) -> Result<String, RconError> {
        let mut conn = self.conn.lock().await;
        debug!(line, "Sending rcon command");
        timeout(COMMAND_TIMEOUT, conn.cmd(line))
            .await
            .map_err(|_| RconError::Timeout(COMMAND_TIMEOUT))?
            .map_err(RconError::Command)
    }
}

async fn dial(endpoint: &MinecraftConfig) -> Result<Connection<TcpStream>, RconError> {
    let address = fmt!("{}:{}", endpoint.host, endpoint.port);
    debug!(address = address.as_str(), "Dialing rcon endpoint");
    timeout(
        CONNECT_TIMEOUT,
        <Connection<TcpStream>>::builder()
            .enable_minecraft_quirks(true)
            .connect(address.as_str(), &endpoint.password),
    )
    .await
    .map_err(|_| RconError::Timeout(CONNECT_TIMEOUT))?
    .map_err(|e| RconError::Connect(address, e))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{CommandSender, RconError};

    /// Records every line sent; optionally fails from the nth call onward.
    pub(crate) struct FakeRcon {
        sent: Mutex<Vec<String>>,
        response: String,
        fail_from: Option<usize>,
    }

    impl FakeRcon {
        pub(crate) fn replying(response: &str) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                response: response.to_string(),
                fail_from: None,
            }
        }

        pub(crate) fn down() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                response: String::new(),
                fail_from: Some(0),
            }
        }

        pub(crate) fn failing_from(call: usize, response: &str) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                response: response.to_string(),
                fail_from: Some(call),
            }
        }

        pub(crate) fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandSender for FakeRcon {
        async fn send_command(&self, line: &str) -> Result<String, RconError> {
            let mut sent = self.sent.lock().unwrap();
            let call = sent.len();
            sent.push(line.to_string());
            match self.fail_from {
                Some(first_failing) if call >= first_failing => {
                    Err(RconError::Timeout(Duration::from_secs(5)))
                }
                _ => Ok(self.response.clone()),
            }
        }
    }
}
