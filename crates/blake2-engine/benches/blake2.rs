//! BLAKE2 family benchmarks, with the RustCrypto `blake2` crate and the
//! `blake2b_simd` / `blake2s_simd` crates as baselines.

use core::{hint::black_box, time::Duration};

use blake2_engine::{
  blake2b, blake2s,
  tree::{Blake2bp, Blake2sp},
  xof::{Blake2xb, Blake2xs},
};
use criterion::{BenchmarkId, Criterion, SamplingMode, Throughput, criterion_group, criterion_main};

mod common;

fn configure(group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>) {
  group.sample_size(30);
  group.warm_up_time(Duration::from_secs(1));
  group.measurement_time(Duration::from_secs(3));
  group.sampling_mode(SamplingMode::Flat);
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot Comparison Benchmarks
// ─────────────────────────────────────────────────────────────────────────────

fn blake2b_oneshot(c: &mut Criterion) {
  let inputs = common::messages();
  let mut group = c.benchmark_group("blake2b/oneshot");
  configure(&mut group);

  for (len, data) in &inputs {
    common::throughput(&mut group, *len);
    group.bench_with_input(BenchmarkId::new("engine", len), data, |b, d| {
      b.iter(|| black_box(blake2b::sum512(black_box(d))))
    });
    group.bench_with_input(BenchmarkId::new("blake2", len), data, |b, d| {
      use blake2::Digest as _;
      b.iter(|| black_box(blake2::Blake2b512::digest(black_box(d))))
    });
  }

  group.finish();
}

fn blake2s_oneshot(c: &mut Criterion) {
  let inputs = common::messages();
  let mut group = c.benchmark_group("blake2s/oneshot");
  configure(&mut group);

  for (len, data) in &inputs {
    common::throughput(&mut group, *len);
    group.bench_with_input(BenchmarkId::new("engine", len), data, |b, d| {
      b.iter(|| black_box(blake2s::sum256(black_box(d))))
    });
    group.bench_with_input(BenchmarkId::new("blake2", len), data, |b, d| {
      use blake2::Digest as _;
      b.iter(|| black_box(blake2::Blake2s256::digest(black_box(d))))
    });
  }

  group.finish();
}

// ─────────────────────────────────────────────────────────────────────────────
// Tree Benchmarks
// ─────────────────────────────────────────────────────────────────────────────

fn tree_bulk(c: &mut Criterion) {
  let data = black_box(common::message(1024 * 1024, 0xB1A2_B9B9_0000_0001));
  let mut group = c.benchmark_group("blake2-tree/1MiB");
  configure(&mut group);
  group.throughput(Throughput::Bytes(data.len() as u64));

  for parallel in [false, true] {
    let mode = if parallel { "threads" } else { "single" };
    group.bench_function(format!("blake2bp/{mode}"), |b| {
      b.iter(|| {
        let mut h = Blake2bp::new(64).unwrap();
        h.set_parallel(parallel);
        h.update(black_box(&data)).unwrap();
        black_box(h.finalize().unwrap())
      })
    });
    group.bench_function(format!("blake2sp/{mode}"), |b| {
      b.iter(|| {
        let mut h = Blake2sp::new(32).unwrap();
        h.set_parallel(parallel);
        h.update(black_box(&data)).unwrap();
        black_box(h.finalize().unwrap())
      })
    });
  }

  group.bench_function("blake2bp/blake2b_simd", |b| {
    b.iter(|| black_box(blake2b_simd::blake2bp::blake2bp(black_box(&data))))
  });
  group.bench_function("blake2sp/blake2s_simd", |b| {
    b.iter(|| black_box(blake2s_simd::blake2sp::blake2sp(black_box(&data))))
  });

  group.finish();
}

// ─────────────────────────────────────────────────────────────────────────────
// Streaming Benchmarks
// ─────────────────────────────────────────────────────────────────────────────

fn blake2b_update_overhead(c: &mut Criterion) {
  let data = black_box(common::message(1024 * 1024, 0xB1A2_B000_0000_0002));
  let mut group = c.benchmark_group("blake2b/update-overhead");
  configure(&mut group);
  group.throughput(Throughput::Bytes(data.len() as u64));

  for chunk_size in [64, 128, 1024, 16384] {
    group.bench_function(format!("{chunk_size}B-chunks"), |b| {
      b.iter(|| {
        let mut h = blake2b::Blake2b::new(64).unwrap();
        for chunk in data.chunks(chunk_size) {
          h.update(chunk).unwrap();
        }
        black_box(h.finalize().unwrap())
      })
    });
  }

  group.finish();
}

// ─────────────────────────────────────────────────────────────────────────────
// XOF Benchmarks
// ─────────────────────────────────────────────────────────────────────────────

fn xof_expand(c: &mut Criterion) {
  let mut group = c.benchmark_group("blake2x/expand");
  configure(&mut group);

  for out_len in [64usize, 1024, 64 * 1024] {
    group.throughput(Throughput::Bytes(out_len as u64));
    let mut out = vec![0u8; out_len];
    group.bench_function(BenchmarkId::new("blake2xb", out_len), |b| {
      b.iter(|| {
        let mut h = Blake2xb::new(out_len as u32).unwrap();
        h.update(b"seed").unwrap();
        h.finalize_into(black_box(&mut out)).unwrap();
      })
    });
    let s_len = out_len.min(65535);
    group.bench_function(BenchmarkId::new("blake2xs", s_len), |b| {
      b.iter(|| {
        let mut h = Blake2xs::new(s_len as u32).unwrap();
        h.update(b"seed").unwrap();
        h.finalize_into(black_box(&mut out[..s_len])).unwrap();
      })
    });
  }

  group.finish();
}

criterion_group!(
  benches,
  blake2b_oneshot,
  blake2s_oneshot,
  tree_bulk,
  blake2b_update_overhead,
  xof_expand
);
criterion_main!(benches);
