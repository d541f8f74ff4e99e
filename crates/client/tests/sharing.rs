use std::sync::Arc;

use serde_json::json;

use kvlink_client::{ClientFactory, ClientState};
use kvlink_core::ConnectionDescriptor;
use kvlink_registry::ConnectionRegistry;
use kvlink_registry::testing::RecordingFactory;

fn factory() -> ClientFactory<RecordingFactory> {
    ClientFactory::new(Arc::new(ConnectionRegistry::new(RecordingFactory::default())))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn fifty_clients_share_one_handle() {
    const CLIENTS: usize = 50;

    let factory = factory();
    let clients: Vec<_> = (0..CLIENTS)
        .map(|_| {
            Arc::new(
                factory
                    .new_client(&[json!("redis://localhost:6379")])
                    .unwrap(),
            )
        })
        .collect();

    // Building clients is inert.
    assert!(factory.registry().is_empty());
    assert!(clients.iter().all(|c| c.state() == ClientState::Configured));

    let tasks: Vec<_> = clients
        .iter()
        .enumerate()
        .map(|(i, client)| {
            let client = Arc::clone(client);
            tokio::spawn(async move { client.set(&format!("key:{i}"), i, None).await })
        })
        .collect();
    for result in futures::future::join_all(tasks).await {
        result.unwrap().unwrap();
    }

    assert_eq!(factory.registry().factory().created(), 1);
    assert_eq!(factory.registry().len(), 1);

    let shared = clients[0].bound_handle().unwrap();
    assert!(clients
        .iter()
        .all(|c| Arc::ptr_eq(c.bound_handle().unwrap(), shared)));
    assert_eq!(shared.query_count(), CLIENTS);
}

#[tokio::test]
async fn reordered_addresses_resolve_to_the_same_handle() {
    let factory = factory();
    let a = factory
        .new_client(&[json!({ "addresses": ["b:2", "a:1"] })])
        .unwrap();
    let b = factory
        .new_client(&[json!({ "addresses": ["a:1", "b:2"] })])
        .unwrap();

    assert_eq!(a.fingerprint(), b.fingerprint());

    a.get("k").await.unwrap();
    b.get("k").await.unwrap();

    assert!(Arc::ptr_eq(
        a.bound_handle().unwrap(),
        b.bound_handle().unwrap()
    ));
}

#[tokio::test]
async fn disjoint_descriptors_are_isolated() {
    let factory = factory();
    let a = factory.new_client_from_descriptor(ConnectionDescriptor::single("a:1").unwrap());
    let b = factory.new_client_from_descriptor(ConnectionDescriptor::single("b:2").unwrap());

    a.ping().await.unwrap();
    b.ping().await.unwrap();

    assert!(!Arc::ptr_eq(
        a.bound_handle().unwrap(),
        b.bound_handle().unwrap()
    ));
    assert_eq!(a.bound_handle().unwrap().query_count(), 1);
    assert_eq!(b.bound_handle().unwrap().query_count(), 1);
    assert_eq!(factory.registry().len(), 2);
}

#[tokio::test]
async fn dropping_a_client_keeps_the_handle_registered() {
    let factory = factory();
    let descriptor = ConnectionDescriptor::single("a:1").unwrap();

    {
        let client = factory.new_client_from_descriptor(descriptor.clone());
        client.ping().await.unwrap();
    }
    assert!(factory.registry().contains(&descriptor.fingerprint()));

    let again = factory.new_client_from_descriptor(descriptor);
    again.ping().await.unwrap();
    assert_eq!(factory.registry().factory().created(), 1);
}
