// src/main.rs

//! The command-line entry point: connects to a DICT server, runs one
//! exchange, prints the result and closes the session.

use anyhow::{Context, Result};
use dictclient::core::models::{ALL_DATABASES, FIRST_MATCH};
use dictclient::{ClientConfig, Database, DictConnection, MatchingStrategy};
use std::env;
use tokio::net::TcpStream;
use tracing::{error, info};
use tracing_subscriber::{filter::EnvFilter, prelude::*};

const USAGE: &str = "Usage: dictclient [--config PATH] [--host HOST] [--port PORT] <command>

Commands:
  databases                          list the server's databases
  strategies                         list the server's matching strategies
  match <word> [strategy] [database] list headwords matching <word>
  define <word> [database]           print the definitions of <word>";

/// The single exchange requested on the command line.
enum Request {
    Databases,
    Strategies,
    Match {
        word: String,
        strategy: Option<String>,
        database: Option<String>,
    },
    Define {
        word: String,
        database: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    run_app().await
}

async fn run_app() -> Result<()> {
    // Define version information.
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let args: Vec<String> = env::args().skip(1).collect();

    // Handle the --version flag.
    if args.iter().any(|arg| arg == "--version") {
        println!("dictclient version {VERSION}");
        return Ok(());
    }

    let mut config_path: Option<&str> = None;
    let mut host: Option<&str> = None;
    let mut port: Option<&str> = None;
    let mut positional: Vec<&str> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let slot = match arg.as_str() {
            "--config" => &mut config_path,
            "--host" => &mut host,
            "--port" => &mut port,
            "--help" | "-h" => {
                println!("{USAGE}");
                return Ok(());
            }
            other => {
                positional.push(other);
                continue;
            }
        };
        match iter.next() {
            Some(value) => *slot = Some(value.as_str()),
            None => {
                eprintln!("{arg} flag requires a value");
                std::process::exit(1);
            }
        }
    }

    // Without --config the built-in defaults apply.
    let mut config = match config_path {
        Some(path) => match ClientConfig::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load configuration from \"{path}\": {e:#}");
                std::process::exit(1);
            }
        },
        None => ClientConfig::default(),
    };

    if let Some(host) = host {
        config.host = host.to_string();
    }
    if let Some(port_str) = port {
        match port_str.parse::<u16>() {
            Ok(port) if port != 0 => config.port = port,
            _ => {
                eprintln!("Invalid port number: {port_str}");
                std::process::exit(1);
            }
        }
    }

    let Some(request) = parse_request(&positional) else {
        eprintln!("{USAGE}");
        std::process::exit(1);
    };

    // Logs go to stderr so that results on stdout stay clean.
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());
    tracing_subscriber::registry()
        .with(EnvFilter::new(log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let connection = DictConnection::connect(&config)
        .await
        .with_context(|| format!("Could not connect to {}:{}", config.host, config.port))?;

    let outcome = execute(&connection, &config, request).await;
    connection.close().await;

    if let Err(e) = &outcome {
        error!("Request failed: {e:#}");
    } else {
        info!("Request completed");
    }
    outcome
}

fn parse_request(positional: &[&str]) -> Option<Request> {
    let optional = |index: usize| positional.get(index).map(|s| s.to_string());
    match positional {
        ["databases"] => Some(Request::Databases),
        ["strategies"] => Some(Request::Strategies),
        ["match", word, rest @ ..] if rest.len() <= 2 => Some(Request::Match {
            word: word.to_string(),
            strategy: optional(2),
            database: optional(3),
        }),
        ["define", word, rest @ ..] if rest.len() <= 1 => Some(Request::Define {
            word: word.to_string(),
            database: optional(2),
        }),
        _ => None,
    }
}

/// Builds a database selector from a name given on the command line.
fn database_named(name: &str) -> Database {
    match name {
        ALL_DATABASES => Database::all(),
        FIRST_MATCH => Database::first_match(),
        other => Database::new(other, ""),
    }
}

async fn execute(
    connection: &DictConnection<TcpStream>,
    config: &ClientConfig,
    request: Request,
) -> Result<()> {
    match request {
        Request::Databases => {
            for database in connection.database_list().await? {
                println!("{database}");
            }
        }
        Request::Strategies => {
            for strategy in connection.strategy_list().await? {
                println!("{strategy}");
            }
        }
        Request::Match {
            word,
            strategy,
            database,
        } => {
            let strategy = strategy.unwrap_or_else(|| config.default_strategy.clone());
            let strategy = MatchingStrategy::new(strategy, "");
            let database = database_named(
                database
                    .as_deref()
                    .unwrap_or(config.default_database.as_str()),
            );
            let words = connection
                .match_list(Some(word.as_str()), Some(&strategy), Some(&database))
                .await?;
            if words.is_empty() {
                println!("No matches for \"{word}\"");
            }
            for word in words {
                println!("{word}");
            }
        }
        Request::Define { word, database } => {
            let database = database_named(
                database
                    .as_deref()
                    .unwrap_or(config.default_database.as_str()),
            );
            let definitions = connection.definitions(Some(word.as_str()), Some(&database)).await?;
            if definitions.is_empty() {
                println!("No definitions found for \"{word}\"");
            }
            for definition in definitions {
                println!(
                    "From {} [{}]:",
                    definition.database().description(),
                    definition.database().name()
                );
                println!("{}", definition.body());
                println!();
            }
        }
    }
    Ok(())
}
