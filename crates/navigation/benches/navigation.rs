//! Criterion benchmarks for the navigation engine.
//!
//! Run: cargo bench -p navigation --bench navigation
//!
//! Results show:
//!   open/*      : full traversal that counts a synthetic tree on open
//!   mov_next_*  : one sequential skip, amortised over a whole pass
//!   shuffle_*   : one shuffled skip (target draw plus single steps)

#![allow(
    clippy::unwrap_used, // benchmark helpers use unwrap for brevity
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects,
    missing_docs,        // criterion_group! macro generates undocumented items
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use navigation::{Mode, MoveOptions, NavConfig, NavigationSession, Shuffle, ShuffleGenerator};
use platform::mocks::MockVolume;
use platform::Direction;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `artists` folders of 10 albums with 12 tracks each, plus a cover per album.
fn library(artists: u32) -> MockVolume {
    let mut paths = Vec::new();
    for a in 0..artists {
        for b in 0..10 {
            paths.push(format!("/Artist {a:03}/Album {b:02}/cover.jpg"));
            for t in 1..=12 {
                paths.push(format!("/Artist {a:03}/Album {b:02}/{t:02}.mp3"));
            }
        }
    }
    let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
    MockVolume::new().with_drive(&refs)
}

fn session(artists: u32, shuffle: Shuffle) -> NavigationSession<MockVolume> {
    let config = NavConfig::new("mp3")
        .unwrap()
        .with_mode(Mode::SingleDisk)
        .with_shuffle(shuffle);
    NavigationSession::new(library(artists), config)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("open");
    for artists in [1u32, 10, 40] {
        group.bench_with_input(BenchmarkId::from_parameter(artists * 120), &artists, |b, &n| {
            b.iter_batched(
                || session(n, Shuffle::Off),
                |mut s| {
                    s.open(false, 0).unwrap();
                    black_box(s.getnb())
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_mov_next(c: &mut Criterion) {
    let mut s = session(10, Shuffle::Off);
    s.open(false, 0).unwrap();
    c.bench_function("mov_next_1200", |b| {
        b.iter(|| black_box(s.mov(Direction::Next, MoveOptions::None)));
    });
}

fn bench_shuffle(c: &mut Criterion) {
    let mut s = session(10, Shuffle::On);
    s.open(false, 0).unwrap();
    c.bench_function("shuffle_mov_1200", |b| {
        b.iter(|| black_box(s.mov(Direction::Next, MoveOptions::None)));
    });

    let mut rng = ShuffleGenerator::new(1);
    let mut pos = 0;
    c.bench_function("shuffle_draw_1200", |b| {
        b.iter(|| {
            pos = rng.next(pos, 1200);
            black_box(pos)
        });
    });
}

criterion_group!(benches, bench_open, bench_mov_next, bench_shuffle);
criterion_main!(benches);
