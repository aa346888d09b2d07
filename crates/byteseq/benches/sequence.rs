// Copyright (c) The Byteseq Project Authors.
// Licensed under the MIT License.

use std::hint::black_box;

use byteseq::{BufView, ByteSequence, OwnedBytes, SequenceBuilder};
use bytes::Bytes;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

// "HTTP request sized" test data - large enough that per-byte work shows up,
// small enough that allocation costs still matter.
const TEST_DATA: &[u8] = &[88_u8; 12345];

fn entrypoint(c: &mut Criterion) {
    let owned = OwnedBytes::copy_of(TEST_DATA);
    let buffer = Bytes::from_static(TEST_DATA);

    let mut group = c.benchmark_group("sequence");

    group.bench_function("copy_of", |b| {
        b.iter(|| OwnedBytes::copy_of(black_box(TEST_DATA)));
    });

    group.bench_function("view", |b| {
        b.iter(|| owned.view(16..256));
    });

    group.bench_function("copied", |b| {
        b.iter(|| owned.copied(16..256));
    });

    group.bench_function("share_range", |b| {
        b.iter(|| owned.share_range(16..256));
    });

    group.bench_function("hash_code_cached", |b| {
        b.iter(|| owned.hash_code());
    });

    group.bench_function("hash_code_fresh", |b| {
        b.iter_batched(|| BufView::of(&buffer), |view| view.hash_code(), BatchSize::SmallInput);
    });

    group.bench_function("compare_equal", |b| {
        let other = OwnedBytes::copy_of(TEST_DATA);
        b.iter(|| owned.cmp(black_box(&other)));
    });

    group.bench_function("render_hex", |b| {
        b.iter(|| owned.to_string());
    });

    group.finish();

    let mut group = c.benchmark_group("SequenceBuilder");

    group.bench_function("build_single_fragment", |b| {
        b.iter_batched(
            || {
                let mut builder = SequenceBuilder::new();
                builder.append_shared(buffer.clone());
                builder
            },
            SequenceBuilder::build,
            BatchSize::SmallInput,
        );
    });

    group.bench_function("build_many_fragments", |b| {
        b.iter_batched(
            || {
                let mut builder = SequenceBuilder::new();
                for chunk in TEST_DATA.chunks(256) {
                    builder.append_slice(chunk);
                }
                builder
            },
            SequenceBuilder::build,
            BatchSize::SmallInput,
        );
    });

    group.finish();
}
