//! BLAKE2bp: four BLAKE2b leaves under one root, up to 64-byte digests.

use crate::{Error, hash::Hash};

pub use crate::tree::Blake2bp;

pub const BLOCK_LEN: usize = 128;
pub const OUT_LEN: usize = 64;
pub const KEY_LEN: usize = 64;
pub const FANOUT: usize = 4;

pub fn digest(out_len: usize, data: &[u8]) -> Result<Hash, Error> {
  let mut t = Blake2bp::new(out_len)?;
  t.update(data)?;
  t.finalize()
}

pub fn keyed_digest(key: &[u8], out_len: usize, data: &[u8]) -> Result<Hash, Error> {
  let mut t = Blake2bp::new_keyed(key, out_len)?;
  t.update(data)?;
  t.finalize()
}

/// BLAKE2bp-160.
#[must_use]
pub fn sum160(data: &[u8]) -> [u8; 20] {
  Blake2bp::sum_fixed(data)
}

/// BLAKE2bp-512.
#[must_use]
pub fn sum512(data: &[u8]) -> [u8; 64] {
  Blake2bp::sum_fixed(data)
}
