//! BLAKE2s (RFC 7693): 32-bit words, 10 rounds, 1 to 32-byte digests.

use crate::{Error, domain::S, hash::Hash, params, state::State};

pub const BLOCK_LEN: usize = 64;
pub const OUT_LEN: usize = 32;
pub const KEY_LEN: usize = 32;
pub const SALT_LEN: usize = 8;
pub const PERSONAL_LEN: usize = 8;

pub type Params = params::Params<S>;

pub type Blake2s = State<S>;

/// One-shot BLAKE2s with an `out_len`-byte digest.
pub fn digest(out_len: usize, data: &[u8]) -> Result<Hash, Error> {
  let mut state = Blake2s::new(out_len)?;
  state.absorb(data);
  Ok(state.finish())
}

/// One-shot keyed BLAKE2s (MAC).
pub fn keyed_digest(key: &[u8], out_len: usize, data: &[u8]) -> Result<Hash, Error> {
  let mut state = Blake2s::new_keyed(key, out_len)?;
  state.absorb(data);
  Ok(state.finish())
}

/// BLAKE2s-128.
#[must_use]
pub fn sum128(data: &[u8]) -> [u8; 16] {
  State::<S>::sum_fixed(data)
}

/// BLAKE2s-256.
#[must_use]
pub fn sum256(data: &[u8]) -> [u8; 32] {
  State::<S>::sum_fixed(data)
}
