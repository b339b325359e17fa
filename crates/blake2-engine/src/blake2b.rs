//! BLAKE2b (RFC 7693): 64-bit words, 12 rounds, 1 to 64-byte digests.
//!
//! Portable, `no_std`, pure Rust; keyed mode included.

use crate::{Error, domain::B, hash::Hash, params, state::State};

pub const BLOCK_LEN: usize = 128;
pub const OUT_LEN: usize = 64;
pub const KEY_LEN: usize = 64;
pub const SALT_LEN: usize = 16;
pub const PERSONAL_LEN: usize = 16;

/// BLAKE2b parameter builder.
pub type Params = params::Params<B>;

/// Streaming BLAKE2b state (unkeyed or keyed).
pub type Blake2b = State<B>;

/// One-shot BLAKE2b with an `out_len`-byte digest.
pub fn digest(out_len: usize, data: &[u8]) -> Result<Hash, Error> {
  let mut state = Blake2b::new(out_len)?;
  state.absorb(data);
  Ok(state.finish())
}

/// One-shot keyed BLAKE2b (MAC).
pub fn keyed_digest(key: &[u8], out_len: usize, data: &[u8]) -> Result<Hash, Error> {
  let mut state = Blake2b::new_keyed(key, out_len)?;
  state.absorb(data);
  Ok(state.finish())
}

/// BLAKE2b-160.
#[must_use]
pub fn sum160(data: &[u8]) -> [u8; 20] {
  State::<B>::sum_fixed(data)
}

/// BLAKE2b-256.
#[must_use]
pub fn sum256(data: &[u8]) -> [u8; 32] {
  State::<B>::sum_fixed(data)
}

/// BLAKE2b-512.
#[must_use]
pub fn sum512(data: &[u8]) -> [u8; 64] {
  State::<B>::sum_fixed(data)
}
