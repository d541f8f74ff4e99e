use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use kvlink_core::testing::RecordingHandle;
use kvlink_core::{ConnectionDescriptor, ConnectionOptions, Mode};
use kvlink_registry::{ConnectionRegistry, HandleFactory};

struct BenchFactory;

impl HandleFactory for BenchFactory {
    type Handle = RecordingHandle;

    fn create(&self, descriptor: &ConnectionDescriptor) -> RecordingHandle {
        RecordingHandle::new(descriptor.clone())
    }
}

fn multi_address_descriptor(nodes: usize) -> ConnectionDescriptor {
    ConnectionDescriptor::new(
        (0..nodes).rev().map(|i| format!("node-{i}:7000")).collect(),
        Mode::Single,
        ConnectionOptions::default(),
    )
    .expect("valid descriptor")
}

fn bench_fingerprint(c: &mut Criterion) {
    let desc = multi_address_descriptor(6);
    c.bench_function("fingerprint_6_addresses", |b| {
        b.iter(|| black_box(&desc).fingerprint());
    });
}

fn bench_get_or_create_hit(c: &mut Criterion) {
    let registry = ConnectionRegistry::new(BenchFactory);
    let desc = multi_address_descriptor(3);
    registry.get_or_create(&desc);

    c.bench_function("get_or_create_hit", |b| {
        b.iter(|| registry.get_or_create(black_box(&desc)));
    });
}

fn bench_lookup_hit_many_entries(c: &mut Criterion) {
    let registry = Arc::new(ConnectionRegistry::new(BenchFactory));
    for i in 0..256 {
        registry.get_or_create(&ConnectionDescriptor::single(format!("host-{i}:6379")).unwrap());
    }
    let lookup = registry.lookup();
    let desc = ConnectionDescriptor::single("host-128:6379").unwrap();

    c.bench_function("lookup_hit_256_entries", |b| {
        b.iter(|| lookup(black_box(&desc)));
    });
}

criterion_group!(
    benches,
    bench_fingerprint,
    bench_get_or_create_hit,
    bench_lookup_hit_many_entries
);
criterion_main!(benches);
