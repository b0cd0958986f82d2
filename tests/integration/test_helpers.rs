// tests/integration/test_helpers.rs

//! A scripted DICT server on a loopback socket for end-to-end tests.

use dictclient::ClientConfig;
use std::collections::HashMap;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub const GREETING: &str = "220 dict.example.org dictd 1.13.0 <auth.mime> <123@dict.example.org>";

pub const SHOW_DB_REPLY: &str = "110 2 databases present\r\n\
wn \"WordNet (r) 3.0 (2006)\"\r\n\
gcide \"The Collaborative International Dictionary of English v.0.48\"\r\n\
.\r\n\
250 ok\r\n";

pub const SHOW_STRAT_REPLY: &str = "111 2 strategies available\r\n\
exact \"Match headwords exactly\"\r\n\
prefix \"Match prefixes\"\r\n\
.\r\n\
250 ok\r\n";

/// FakeServer answers each command line with a canned reply and records
/// every line it received.
pub struct FakeServer {
    pub port: u16,
    handle: JoinHandle<Vec<String>>,
}

impl FakeServer {
    /// Binds to an ephemeral port and serves a single session.
    pub async fn start(greeting: &str, replies: &[(&str, &str)]) -> Self {
        init_tracing();

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake server");
        let port = listener.local_addr().expect("No local address").port();
        let greeting = format!("{greeting}\r\n");
        let replies: HashMap<String, String> = replies
            .iter()
            .map(|(command, reply)| (command.to_string(), reply.to_string()))
            .collect();

        let handle = tokio::spawn(async move {
            let mut received = Vec::new();
            let Ok((socket, _)) = listener.accept().await else {
                return received;
            };
            let (reader, mut writer) = socket.into_split();
            if writer.write_all(greeting.as_bytes()).await.is_err() {
                return received;
            }

            let mut lines = BufReader::new(reader).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                received.push(line.clone());
                let reply = if line == "QUIT" {
                    "221 bye\r\n".to_string()
                } else {
                    replies
                        .get(&line)
                        .cloned()
                        .unwrap_or_else(|| "500 Syntax error, command not recognized\r\n".to_string())
                };
                if writer.write_all(reply.as_bytes()).await.is_err() || line == "QUIT" {
                    break;
                }
            }
            received
        });

        Self { port, handle }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            host: "127.0.0.1".to_string(),
            port: self.port,
            read_timeout: Some(Duration::from_secs(5)),
            ..ClientConfig::default()
        }
    }

    /// Waits for the session to end and returns the received command lines.
    pub async fn received(self) -> Vec<String> {
        self.handle.await.expect("Fake server panicked")
    }
}

fn init_tracing() {
    // Ignore the error if another test already installed a subscriber.
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new("warn"))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
