use std::hint::black_box;

use chat_stats::bucketize::bucketize;
use chat_stats::chain::ClassifierChain;
use chat_stats::config::TextAnalysisConfig;
use chat_stats::models::{MessageKind, MessageRecord};
use criterion::{criterion_group, criterion_main, Criterion};

fn sample_records() -> Vec<MessageRecord> {
    (0..1_000)
        .map(|i| {
            let kind = match i % 4 {
                0 => MessageKind::Text {
                    body: format!("привіт, взяли пиво номер {i} лол"),
                },
                1 => MessageKind::Voice { duration: i % 60 },
                2 => MessageKind::Photo,
                _ => MessageKind::Video { duration: i % 120 },
            };
            MessageRecord {
                date: format!("2022-02-{:02} {}:15", 20 + i % 8, i % 24),
                kind,
                forwarded: i % 7 == 0,
                sender: format!("user{}", i % 5),
            }
        })
        .collect()
}

fn bench_chain(c: &mut Criterion) {
    let records = sample_records();
    c.bench_function("chain_handle_1000", |b| {
        b.iter(|| {
            let mut chain = ClassifierChain::new(&TextAnalysisConfig::default()).unwrap();
            for record in &records {
                chain.handle(black_box(record)).unwrap();
            }
            chain
        });
    });
}

fn bench_bucketize(c: &mut Criterion) {
    let keys: Vec<u64> = (0..5_000).collect();
    c.bench_function("bucketize_5000", |b| {
        b.iter(|| bucketize(keys.iter().rev().map(|k| (k, 1)), black_box(10)));
    });
}

criterion_group!(benches, bench_chain, bench_bucketize);
criterion_main!(benches);
