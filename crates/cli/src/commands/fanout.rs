use std::time::Instant;

use clap::Args;
use tokio::task::JoinSet;
use tracing::info;

use kvlink_client::ClientFactory;
use kvlink_redis::RedisHandleFactory;

#[derive(Args, Debug)]
pub struct FanoutArgs {
    /// Number of clients to build from the same connection options.
    #[arg(long, default_value_t = 10)]
    pub clients: usize,
    /// Counter key each client increments once.
    #[arg(long)]
    pub key: String,
}

/// Build `clients` independent clients and have each increment `key`
/// concurrently. All of them end up on one shared connection handle.
pub async fn run(
    factory: &ClientFactory<RedisHandleFactory>,
    argument: &serde_json::Value,
    args: &FanoutArgs,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let mut tasks = JoinSet::new();
    for _ in 0..args.clients {
        let client = factory.new_client(std::slice::from_ref(argument))?;
        let key = args.key.clone();
        tasks.spawn(async move { client.incr(&key).await });
    }

    let mut last = None;
    while let Some(joined) = tasks.join_next().await {
        let value = joined??;
        last = Some(last.map_or(value, |prev: i64| prev.max(value)));
    }

    info!(
        clients = args.clients,
        elapsed_ms = started.elapsed().as_millis(),
        "fan-out complete"
    );
    println!("clients:     {}", args.clients);
    println!("handles:     {}", factory.registry().len());
    if let Some(value) = last {
        println!("{}: {value}", args.key);
    }
    Ok(())
}
