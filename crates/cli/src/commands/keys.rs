use std::time::Duration;

use clap::Args;
use kvlink_client::ClientFactory;
use kvlink_redis::RedisHandleFactory;

#[derive(Args, Debug)]
pub struct GetArgs {
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    pub key: String,
    pub value: String,
    /// Expire after this many seconds.
    #[arg(long)]
    pub ttl: Option<u64>,
}

#[derive(Args, Debug)]
pub struct DelArgs {
    #[arg(required = true)]
    pub keys: Vec<String>,
}

pub async fn ping(
    factory: &ClientFactory<RedisHandleFactory>,
    argument: &serde_json::Value,
) -> anyhow::Result<()> {
    let client = factory.new_client(std::slice::from_ref(argument))?;
    println!("{}", client.ping().await?);
    Ok(())
}

pub async fn get(
    factory: &ClientFactory<RedisHandleFactory>,
    argument: &serde_json::Value,
    args: &GetArgs,
) -> anyhow::Result<()> {
    let client = factory.new_client(std::slice::from_ref(argument))?;
    match client.get(&args.key).await? {
        Some(value) => println!("{value}"),
        None => println!("(nil)"),
    }
    Ok(())
}

pub async fn set(
    factory: &ClientFactory<RedisHandleFactory>,
    argument: &serde_json::Value,
    args: &SetArgs,
) -> anyhow::Result<()> {
    let client = factory.new_client(std::slice::from_ref(argument))?;
    client
        .set(&args.key, &args.value, args.ttl.map(Duration::from_secs))
        .await?;
    println!("OK");
    Ok(())
}

pub async fn del(
    factory: &ClientFactory<RedisHandleFactory>,
    argument: &serde_json::Value,
    args: &DelArgs,
) -> anyhow::Result<()> {
    let client = factory.new_client(std::slice::from_ref(argument))?;
    let keys: Vec<&str> = args.keys.iter().map(String::as_str).collect();
    println!("{}", client.del(&keys).await?);
    Ok(())
}
