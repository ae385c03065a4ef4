use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use slrelay::config::{RoomRetention, ServerConfig};
use slrelay::handlers::{Context, ServerInfo, dispatch};
use slrelay::state::{ClientId, Registry};
use slrelay_proto::{Command, Message};
use std::sync::Arc;
use tokio::sync::mpsc;

// Dispatch runs synchronously on the dispatcher task, so these measure the
// per-line cost of parsing, registry access and fan-out with no I/O.

const ROOM_SIZE: usize = 50;

fn populated_room() -> (Registry, ServerInfo, Vec<ClientId>, Vec<mpsc::Receiver<Arc<Message>>>) {
    let server = ServerInfo::new(&ServerConfig::default());
    let mut registry = Registry::new(RoomRetention::Keep);
    let mut ids = Vec::new();
    let mut receivers = Vec::new();

    for i in 0..ROOM_SIZE {
        let (tx, rx) = mpsc::channel(1 << 16);
        let id = registry.register_client("127.0.0.1:0".parse().unwrap(), tx);
        let mut ctx = Context::new(id, &mut registry, &server);
        dispatch(&mut ctx, &format!("NICK user{i}"));
        dispatch(&mut ctx, "JOIN #bench");
        ids.push(id);
        receivers.push(rx);
    }
    (registry, server, ids, receivers)
}

fn parse_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    let raw = "PRIVMSG #bench :Hello world from the benchmark";
    group.throughput(Throughput::Bytes(raw.len() as u64));

    group.bench_function("parse_privmsg", |b| b.iter(|| Command::parse(raw)));

    group.finish();
}

fn fanout_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("fanout");
    group.throughput(Throughput::Elements(ROOM_SIZE as u64 - 1));

    let (mut registry, server, ids, mut receivers) = populated_room();
    group.bench_function("room_privmsg", |b| {
        b.iter(|| {
            let mut ctx = Context::new(ids[0], &mut registry, &server);
            dispatch(&mut ctx, "PRIVMSG #bench :Hello world");
            for rx in receivers.iter_mut() {
                while rx.try_recv().is_ok() {}
            }
        })
    });

    group.finish();
}

criterion_group!(benches, parse_benchmark, fanout_benchmark);
criterion_main!(benches);
