//! BLAKE2sp: eight BLAKE2s leaves under one root, up to 32-byte digests.

use crate::{Error, hash::Hash};

pub use crate::tree::Blake2sp;

pub const BLOCK_LEN: usize = 64;
pub const OUT_LEN: usize = 32;
pub const KEY_LEN: usize = 32;
pub const FANOUT: usize = 8;

pub fn digest(out_len: usize, data: &[u8]) -> Result<Hash, Error> {
  let mut t = Blake2sp::new(out_len)?;
  t.update(data)?;
  t.finalize()
}

pub fn keyed_digest(key: &[u8], out_len: usize, data: &[u8]) -> Result<Hash, Error> {
  let mut t = Blake2sp::new_keyed(key, out_len)?;
  t.update(data)?;
  t.finalize()
}

/// BLAKE2sp-256.
#[must_use]
pub fn sum256(data: &[u8]) -> [u8; 32] {
  Blake2sp::sum_fixed(data)
}
