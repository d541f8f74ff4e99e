//! kvlink CLI
//!
//! Builds clients through the shared connection registry and runs a few
//! commands against a Redis deployment.

mod commands;
mod config;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use kvlink_client::ClientFactory;
use kvlink_redis::RedisHandleFactory;
use kvlink_registry::ConnectionRegistry;

use crate::config::CliConfig;

const DEFAULT_URL: &str = "redis://127.0.0.1:6379";

/// kvlink CLI, shared Redis connections from the command line.
#[derive(Parser, Debug)]
#[command(name = "kvlink", version, about)]
struct Cli {
    /// Redis URL of a single node. Ignored when `--config` is given.
    #[arg(long, env = "KVLINK_URL", global = true)]
    url: Option<String>,

    /// TOML file holding a `url` or a `[connection]` table.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the fingerprint that keys the shared connection.
    Fingerprint,
    /// Check that the store is reachable.
    Ping,
    /// Read a key.
    Get(commands::keys::GetArgs),
    /// Write a key.
    Set(commands::keys::SetArgs),
    /// Delete keys.
    Del(commands::keys::DelArgs),
    /// Run one command from many clients at once.
    Fanout(commands::fanout::FanoutArgs),
}

impl Cli {
    /// The single constructor argument every client is built from.
    fn connection_argument(&self) -> anyhow::Result<serde_json::Value> {
        match (&self.config, &self.url) {
            (Some(path), _) => CliConfig::load(path)?.into_argument(),
            (None, Some(url)) => Ok(serde_json::Value::String(url.clone())),
            (None, None) => Ok(serde_json::Value::String(DEFAULT_URL.to_owned())),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let argument = cli.connection_argument()?;
    let factory = ClientFactory::new(Arc::new(ConnectionRegistry::new(RedisHandleFactory)));

    match cli.command {
        Command::Fingerprint => commands::fingerprint::run(&factory, &argument),
        Command::Ping => commands::keys::ping(&factory, &argument).await,
        Command::Get(args) => commands::keys::get(&factory, &argument, &args).await,
        Command::Set(args) => commands::keys::set(&factory, &argument, &args).await,
        Command::Del(args) => commands::keys::del(&factory, &argument, &args).await,
        Command::Fanout(args) => commands::fanout::run(&factory, &argument, &args).await,
    }
}
