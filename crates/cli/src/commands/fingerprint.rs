use kvlink_client::ClientFactory;
use kvlink_redis::RedisHandleFactory;

pub fn run(
    factory: &ClientFactory<RedisHandleFactory>,
    argument: &serde_json::Value,
) -> anyhow::Result<()> {
    let client = factory.new_client(std::slice::from_ref(argument))?;
    let descriptor = client.descriptor();

    println!("{}", client.fingerprint());
    println!("  mode:      {}", descriptor.mode());
    println!("  addresses: {}", descriptor.addresses().join(", "));
    Ok(())
}
