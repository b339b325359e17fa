//! Inputs shared by the BLAKE2 benches.

use criterion::{BenchmarkGroup, Throughput, measurement::WallTime};

/// Lengths on both sides of the 64-byte (s) and 128-byte (b) block edges.
const BLOCK_EDGES: [usize; 10] = [0, 1, 63, 64, 65, 127, 128, 129, 255, 256];

/// Runs long enough to engage the tree leaves and the thread pool.
const BULK: [usize; 3] = [4 * 1024, 64 * 1024, 1024 * 1024];

const MESSAGE_SEED: u64 = 0x0b1a_2e00_5eed_0001;

/// Splitmix64 byte stream; keeps inputs fixed across runs and away from
/// all-zero blocks.
struct Filler(u64);

impl Filler {
  fn next_word(&mut self) -> u64 {
    self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = self.0;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
  }

  fn fill(&mut self, out: &mut [u8]) {
    for word in out.chunks_mut(8) {
      let bytes = self.next_word().to_le_bytes();
      word.copy_from_slice(&bytes[..word.len()]);
    }
  }
}

/// `len` bytes from the stream seeded with `seed`.
pub fn message(len: usize, seed: u64) -> Vec<u8> {
  let mut out = vec![0u8; len];
  Filler(seed).fill(&mut out);
  out
}

/// `(len, message)` for every block edge and bulk length.
pub fn messages() -> Vec<(usize, Vec<u8>)> {
  let mut filler = Filler(MESSAGE_SEED);
  BLOCK_EDGES
    .into_iter()
    .chain(BULK)
    .map(|len| {
      let mut msg = vec![0u8; len];
      filler.fill(&mut msg);
      (len, msg)
    })
    .collect()
}

/// Bytes per second, or calls per second for the empty message.
pub fn throughput(group: &mut BenchmarkGroup<'_, WallTime>, len: usize) {
  let t = match len {
    0 => Throughput::Elements(1),
    n => Throughput::Bytes(n as u64),
  };
  group.throughput(t);
}
