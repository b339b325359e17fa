//! BLAKE2 parameter block (RFC 7693 §2.5, BLAKE2X §2).
//!
//! [`Params`] is a builder: setters only record values, and every bound is
//! checked in one place ([`Params::validate`]) before any state exists.

#![allow(clippy::indexing_slicing)] // Parameter block offsets are fixed per domain

use core::{fmt, marker::PhantomData};

use crate::{
  Error,
  domain::{Domain, Word},
  state::State,
  util::wipe,
};

/// Largest parameter block across domains (BLAKE2b).
pub const MAX_PARAM_LEN: usize = 64;
const MAX_KEY_LEN: usize = 64;
const MAX_SALT_LEN: usize = 16;

/// Serialized parameter block, as XORed into the IV.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ParamBlock {
  bytes: [u8; MAX_PARAM_LEN],
  len: usize,
}

impl ParamBlock {
  /// The `PARAM_LEN` serialized bytes.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes[..self.len]
  }

  /// `IV ^ block`, the chaining value of a freshly initialized state.
  #[must_use]
  pub(crate) fn chaining_value<D: Domain>(&self) -> [D::Word; 8] {
    debug_assert_eq!(self.len, D::PARAM_LEN);
    let mut h = D::IV;
    for (w, bytes) in h.iter_mut().zip(self.as_bytes().chunks_exact(<D::Word as Word>::BYTES)) {
      *w ^= D::Word::from_le(bytes);
    }
    h
  }
}

impl fmt::Debug for ParamBlock {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("ParamBlock(")?;
    for b in self.as_bytes() {
      write!(f, "{b:02x}")?;
    }
    f.write_str(")")
  }
}

/// Configuration of a single BLAKE2 hash state.
///
/// Defaults: full-length digest, no key, zero salt and personalization,
/// sequential mode (fanout 1, depth 1, everything else zero).
///
/// ```
/// use blake2_engine::blake2b;
///
/// let mut state = blake2b::Params::new().digest_len(32).personal(b"my-app").to_state()?;
/// state.update(b"hello")?;
/// assert_eq!(state.finalize()?.len(), 32);
/// # Ok::<(), blake2_engine::Error>(())
/// ```
#[derive(Clone)]
pub struct Params<D: Domain> {
  digest_len: usize,
  key: [u8; MAX_KEY_LEN],
  key_len: usize,
  salt: [u8; MAX_SALT_LEN],
  salt_len: usize,
  personal: [u8; MAX_SALT_LEN],
  personal_len: usize,
  fanout: u8,
  max_depth: u8,
  max_leaf_len: u32,
  node_offset: u32,
  xof_len: u32,
  node_depth: u8,
  inner_len: usize,
  last_node: bool,
  _domain: PhantomData<D>,
}

impl<D: Domain> Params<D> {
  #[must_use]
  pub fn new() -> Self {
    Self {
      digest_len: D::OUT_LEN,
      key: [0u8; MAX_KEY_LEN],
      key_len: 0,
      salt: [0u8; MAX_SALT_LEN],
      salt_len: 0,
      personal: [0u8; MAX_SALT_LEN],
      personal_len: 0,
      fanout: 1,
      max_depth: 1,
      max_leaf_len: 0,
      node_offset: 0,
      xof_len: 0,
      node_depth: 0,
      inner_len: 0,
      last_node: false,
      _domain: PhantomData,
    }
  }

  /// Digest length in bytes, `1..=D::OUT_LEN`.
  pub fn digest_len(&mut self, len: usize) -> &mut Self {
    self.digest_len = len;
    self
  }

  /// MAC key, up to `D::KEY_LEN` bytes. An empty key means unkeyed.
  pub fn key(&mut self, key: &[u8]) -> &mut Self {
    wipe(&mut self.key);
    self.key_len = key.len();
    let n = key.len().min(MAX_KEY_LEN);
    self.key[..n].copy_from_slice(&key[..n]);
    self
  }

  /// Salt, up to `D::SALT_LEN` bytes, zero-padded.
  pub fn salt(&mut self, salt: &[u8]) -> &mut Self {
    self.salt = [0u8; MAX_SALT_LEN];
    self.salt_len = salt.len();
    let n = salt.len().min(MAX_SALT_LEN);
    self.salt[..n].copy_from_slice(&salt[..n]);
    self
  }

  /// Personalization, up to `D::PERSONAL_LEN` bytes, zero-padded.
  pub fn personal(&mut self, personal: &[u8]) -> &mut Self {
    self.personal = [0u8; MAX_SALT_LEN];
    self.personal_len = personal.len();
    let n = personal.len().min(MAX_SALT_LEN);
    self.personal[..n].copy_from_slice(&personal[..n]);
    self
  }

  pub fn fanout(&mut self, fanout: u8) -> &mut Self {
    self.fanout = fanout;
    self
  }

  pub fn max_depth(&mut self, depth: u8) -> &mut Self {
    self.max_depth = depth;
    self
  }

  pub fn max_leaf_len(&mut self, len: u32) -> &mut Self {
    self.max_leaf_len = len;
    self
  }

  pub fn node_offset(&mut self, offset: u32) -> &mut Self {
    self.node_offset = offset;
    self
  }

  /// XOF length field; at most `D::XOF_MAX` (32 bits for b, 16 bits for s).
  pub fn xof_len(&mut self, len: u32) -> &mut Self {
    self.xof_len = len;
    self
  }

  pub fn node_depth(&mut self, depth: u8) -> &mut Self {
    self.node_depth = depth;
    self
  }

  /// Inner hash length, `0..=D::OUT_LEN`.
  pub fn inner_len(&mut self, len: usize) -> &mut Self {
    self.inner_len = len;
    self
  }

  /// Mark the state as the last (rightmost) node at its depth.
  pub fn last_node(&mut self, last_node: bool) -> &mut Self {
    self.last_node = last_node;
    self
  }

  /// Check every recorded value against the domain bounds.
  pub fn validate(&self) -> Result<(), Error> {
    if self.digest_len == 0 || self.digest_len > D::OUT_LEN || self.key_len > D::KEY_LEN {
      return Err(Error::InvalidKeyOrDigestLength);
    }
    if self.xof_len > D::XOF_MAX {
      return Err(Error::InvalidXofLength);
    }
    if self.salt_len > D::SALT_LEN || self.personal_len > D::PERSONAL_LEN || self.inner_len > D::OUT_LEN {
      return Err(Error::InvalidParameter);
    }
    Ok(())
  }

  /// Serialize after validation.
  pub fn to_block(&self) -> Result<ParamBlock, Error> {
    self.validate()?;
    Ok(self.encode())
  }

  /// Build a streaming state.
  pub fn to_state(&self) -> Result<State<D>, Error> {
    self.validate()?;
    Ok(State::from_validated(self, self.digest_len))
  }

  #[inline]
  #[must_use]
  pub fn get_digest_len(&self) -> usize {
    self.digest_len
  }

  #[inline]
  #[must_use]
  pub fn get_xof_len(&self) -> u32 {
    self.xof_len
  }

  #[inline]
  #[must_use]
  pub fn is_last_node(&self) -> bool {
    self.last_node
  }

  /// Key bytes; only meaningful once [`Params::validate`] has passed.
  #[inline]
  pub(crate) fn key_bytes(&self) -> &[u8] {
    &self.key[..self.key_len.min(MAX_KEY_LEN)]
  }

  /// Serialize without validating. Out-of-range lengths are truncated to a
  /// byte, so callers must validate first (or build from known-good values).
  pub(crate) fn encode(&self) -> ParamBlock {
    let layout = D::LAYOUT;
    let mut p = [0u8; MAX_PARAM_LEN];
    p[0] = self.digest_len as u8;
    p[1] = self.key_len as u8;
    p[2] = self.fanout;
    p[3] = self.max_depth;
    p[4..8].copy_from_slice(&self.max_leaf_len.to_le_bytes());
    p[8..12].copy_from_slice(&self.node_offset.to_le_bytes());
    p[12..12 + layout.xof_len_bytes].copy_from_slice(&self.xof_len.to_le_bytes()[..layout.xof_len_bytes]);
    p[layout.node_depth] = self.node_depth;
    p[layout.inner_len] = self.inner_len as u8;
    p[layout.salt..layout.salt + D::SALT_LEN].copy_from_slice(&self.salt[..D::SALT_LEN]);
    p[layout.personal..layout.personal + D::PERSONAL_LEN].copy_from_slice(&self.personal[..D::PERSONAL_LEN]);
    ParamBlock {
      bytes: p,
      len: D::PARAM_LEN,
    }
  }
}

impl<D: Domain> Default for Params<D> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<D: Domain> Drop for Params<D> {
  fn drop(&mut self) {
    wipe(&mut self.key);
  }
}

impl<D: Domain> fmt::Debug for Params<D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Params")
      .field("domain", &D::NAME)
      .field("digest_len", &self.digest_len)
      .field("key_len", &self.key_len)
      .field("fanout", &self.fanout)
      .field("max_depth", &self.max_depth)
      .field("max_leaf_len", &self.max_leaf_len)
      .field("node_offset", &self.node_offset)
      .field("xof_len", &self.xof_len)
      .field("node_depth", &self.node_depth)
      .field("inner_len", &self.inner_len)
      .field("last_node", &self.last_node)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{B, S};

  #[test]
  fn default_block_word0_matches_sequential_mode() {
    let b = Params::<B>::new().to_block().unwrap();
    assert_eq!(&b.as_bytes()[..4], &[64, 0, 1, 1]);
    assert!(b.as_bytes()[4..].iter().all(|&x| x == 0));

    let s = Params::<S>::new().digest_len(20).key(&[7; 5]).to_block().unwrap();
    assert_eq!(s.as_bytes().len(), 32);
    assert_eq!(&s.as_bytes()[..4], &[20, 5, 1, 1]);
  }

  #[test]
  fn blake2b_layout_offsets() {
    let block = Params::<B>::new()
      .fanout(4)
      .max_depth(2)
      .max_leaf_len(0x0403_0201)
      .node_offset(0x0807_0605)
      .xof_len(0x0c0b_0a09)
      .node_depth(0x0d)
      .inner_len(0x0e)
      .salt(&[0x11; 16])
      .personal(&[0x22; 16])
      .to_block()
      .unwrap();
    let p = block.as_bytes();
    assert_eq!(&p[2..18], &[4, 2, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14]);
    assert!(p[18..32].iter().all(|&x| x == 0));
    assert_eq!(&p[32..48], &[0x11; 16]);
    assert_eq!(&p[48..64], &[0x22; 16]);
  }

  #[test]
  fn blake2s_layout_offsets() {
    let block = Params::<S>::new()
      .node_offset(0x0807_0605)
      .xof_len(0x0a09)
      .node_depth(0x0b)
      .inner_len(0x0c)
      .salt(&[0x11; 8])
      .personal(&[0x22; 3])
      .to_block()
      .unwrap();
    let p = block.as_bytes();
    assert_eq!(&p[8..16], &[5, 6, 7, 8, 9, 10, 11, 12]);
    assert_eq!(&p[16..24], &[0x11; 8]);
    assert_eq!(&p[24..32], &[0x22, 0x22, 0x22, 0, 0, 0, 0, 0]);
  }

  #[test]
  fn digest_len_bounds() {
    assert_eq!(Params::<B>::new().digest_len(0).validate(), Err(Error::InvalidKeyOrDigestLength));
    assert_eq!(Params::<B>::new().digest_len(65).validate(), Err(Error::InvalidKeyOrDigestLength));
    assert_eq!(Params::<S>::new().digest_len(33).validate(), Err(Error::InvalidKeyOrDigestLength));
    assert!(Params::<S>::new().digest_len(1).validate().is_ok());
  }

  #[test]
  fn key_len_bounds() {
    assert!(Params::<B>::new().key(&[1; 64]).validate().is_ok());
    assert_eq!(Params::<B>::new().key(&[1; 65]).validate(), Err(Error::InvalidKeyOrDigestLength));
    assert_eq!(Params::<S>::new().key(&[1; 33]).validate(), Err(Error::InvalidKeyOrDigestLength));
  }

  #[test]
  fn salt_personal_inner_and_xof_bounds() {
    assert_eq!(Params::<S>::new().salt(&[0; 9]).validate(), Err(Error::InvalidParameter));
    assert_eq!(Params::<S>::new().personal(&[0; 9]).validate(), Err(Error::InvalidParameter));
    assert_eq!(Params::<B>::new().inner_len(65).validate(), Err(Error::InvalidParameter));
    assert_eq!(Params::<S>::new().xof_len(0x1_0000).validate(), Err(Error::InvalidXofLength));
    assert!(Params::<B>::new().xof_len(u32::MAX).validate().is_ok());
  }

  #[test]
  fn debug_hides_key() {
    extern crate alloc;
    let mut p = Params::<B>::new();
    p.key(b"super secret key");
    let dbg = alloc::format!("{p:?}");
    assert!(dbg.contains("key_len: 16"));
    assert!(!dbg.contains("115, 117, 112"));
  }
}
