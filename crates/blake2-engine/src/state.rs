//! Streaming block state machine shared by every BLAKE2 variant.
//!
//! A state moves `Fresh -> Accepting -> Finalized`. The last block of the
//! message must be compressed with the last-block flag, so a full buffered
//! block is only compressed once more input proves it is not the last one.

#![allow(clippy::indexing_slicing)] // Buffer offsets are bounded by BLOCK_LEN

use core::fmt;

use traits::{Hasher, VerificationError};

use crate::{
  Error,
  compress::compress,
  domain::Domain,
  hash::Hash,
  params::Params,
  util::{ct_eq, wipe},
};

/// Lifecycle phase of a [`State`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
  /// Initialized, no caller input yet.
  Fresh,
  /// At least one non-empty update absorbed.
  Accepting,
  /// Finalized; only [`State::reset`] revives it.
  Finalized,
  /// The byte counter would have overflowed; only [`State::reset`] revives it.
  Poisoned,
}

/// A single BLAKE2 hash state (base or keyed engine).
#[derive(Clone)]
pub struct State<D: Domain> {
  h: [D::Word; 8],
  buf: D::Block,
  buf_len: usize,
  counter: D::Counter,
  last_node: bool,
  out_len: usize,
  phase: Phase,
  h0: [D::Word; 8],
  key_block: Option<D::Block>,
}

impl<D: Domain> State<D> {
  /// Unkeyed state producing `out_len` bytes.
  pub fn new(out_len: usize) -> Result<Self, Error> {
    Params::new().digest_len(out_len).to_state()
  }

  /// Keyed (MAC) state producing `out_len` bytes.
  pub fn new_keyed(key: &[u8], out_len: usize) -> Result<Self, Error> {
    Params::new().digest_len(out_len).key(key).to_state()
  }

  /// Build from parameters that already passed [`Params::validate`].
  ///
  /// `out_len` may differ from the block's digest length: tree leaves record
  /// the root's requested length but always emit a full-size digest.
  pub(crate) fn from_validated(params: &Params<D>, out_len: usize) -> Self {
    let h0 = params.encode().chaining_value::<D>();
    let key = params.key_bytes();
    let key_block = if key.is_empty() {
      None
    } else {
      let mut block = D::ZERO_BLOCK;
      block.as_mut()[..key.len()].copy_from_slice(key);
      Some(block)
    };
    let mut state = Self {
      h: h0,
      buf: D::ZERO_BLOCK,
      buf_len: 0,
      counter: D::COUNTER_ZERO,
      last_node: params.is_last_node(),
      out_len,
      phase: Phase::Fresh,
      h0,
      key_block,
    };
    state.load_key();
    state
  }

  /// Like [`State::from_validated`], but the key is only recorded in the
  /// parameter block and never absorbed (tree roots).
  pub(crate) fn from_validated_without_key(params: &Params<D>, out_len: usize) -> Self {
    let mut state = Self::from_validated(params, out_len);
    if let Some(block) = state.key_block.as_mut() {
      wipe(block.as_mut());
    }
    state.key_block = None;
    wipe(state.buf.as_mut());
    state.buf_len = 0;
    state
  }

  /// The padded key is absorbed as an ordinary first block.
  #[inline]
  fn load_key(&mut self) {
    if let Some(block) = self.key_block {
      self.buf = block;
      self.buf_len = D::BLOCK_LEN;
    }
  }

  #[inline]
  fn check_live(&self) -> Result<(), Error> {
    match self.phase {
      Phase::Finalized => Err(Error::UseAfterFinal),
      Phase::Poisoned => Err(Error::LengthOverflow),
      Phase::Fresh | Phase::Accepting => Ok(()),
    }
  }

  fn poison(&mut self) {
    self.phase = Phase::Poisoned;
    wipe(self.buf.as_mut());
    self.buf_len = 0;
  }

  #[inline]
  fn advance(&mut self, n: usize) {
    match D::counter_add(self.counter, n) {
      Some(t) => self.counter = t,
      None => self.poison(),
    }
  }

  /// Absorb `data`.
  ///
  /// Fails with [`Error::LengthOverflow`] (and poisons the state) if the total
  /// input would exceed the byte counter, or [`Error::UseAfterFinal`].
  pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
    self.check_live()?;
    if data.is_empty() {
      return Ok(());
    }
    self.reserve(data.len())?;
    self.absorb(data);
    Ok(())
  }

  /// Check that `n` more bytes fit the counter, poisoning the state if not.
  pub(crate) fn reserve(&mut self, n: usize) -> Result<(), Error> {
    let fits = D::counter_add(self.counter, self.buf_len).and_then(|t| D::counter_add(t, n)).is_some();
    if fits {
      Ok(())
    } else {
      self.poison();
      Err(Error::LengthOverflow)
    }
  }

  /// Unchecked absorb; callers guarantee liveness and counter room.
  pub(crate) fn absorb(&mut self, mut data: &[u8]) {
    if data.is_empty() {
      return;
    }
    self.phase = Phase::Accepting;
    let block_len = D::BLOCK_LEN;

    if self.buf_len != 0 {
      let take = core::cmp::min(block_len - self.buf_len, data.len());
      let (head, rest) = data.split_at(take);
      self.buf.as_mut()[self.buf_len..self.buf_len + take].copy_from_slice(head);
      self.buf_len += take;
      data = rest;

      // Keep a full block buffered until we know there is more input, so the
      // final block can be marked with the last-block flag.
      if self.buf_len == block_len && !data.is_empty() {
        self.advance(block_len);
        compress::<D>(&mut self.h, self.buf.as_ref(), self.counter, false, false);
        self.buf_len = 0;
      }
    }

    // Hold back the last full block (even if block-aligned) for finalization.
    while data.len() > block_len {
      let (block, rest) = data.split_at(block_len);
      self.advance(block_len);
      compress::<D>(&mut self.h, block, self.counter, false, false);
      data = rest;
    }

    if !data.is_empty() {
      self.buf.as_mut()[..data.len()].copy_from_slice(data);
      self.buf_len = data.len();
    }
  }

  /// One-shot fixed-length digest; `N` is checked at compile time.
  pub(crate) fn sum_fixed<const N: usize>(data: &[u8]) -> [u8; N] {
    const { assert!(N >= 1 && N <= D::OUT_LEN) };
    let mut params = Params::<D>::new();
    params.digest_len(N);
    let mut state = Self::from_validated(&params, N);
    state.absorb(data);
    let mut out = [0u8; N];
    out.copy_from_slice(state.finish().as_bytes());
    out
  }

  /// Unchecked finalization; callers guarantee liveness.
  pub(crate) fn finish(&mut self) -> Hash {
    let len = self.buf_len;
    self.buf.as_mut()[len..].fill(0);
    self.advance(len);
    compress::<D>(&mut self.h, self.buf.as_ref(), self.counter, true, self.last_node);
    let out = Hash::from_words::<D>(&self.h, self.out_len);
    wipe(self.buf.as_mut());
    self.buf_len = 0;
    self.phase = Phase::Finalized;
    out
  }

  /// Pad, compress the final block and return the digest.
  ///
  /// The state becomes terminal; see [`Phase::Finalized`].
  pub fn finalize(&mut self) -> Result<Hash, Error> {
    self.check_live()?;
    Ok(self.finish())
  }

  /// Finalize and append the digest to `out`.
  #[cfg(feature = "alloc")]
  pub fn finalize_append(&mut self, out: &mut alloc::vec::Vec<u8>) -> Result<(), Error> {
    let hash = self.finalize()?;
    out.extend_from_slice(hash.as_bytes());
    Ok(())
  }

  /// Finalize and compare against `expected` without early exit.
  pub fn verify(&mut self, expected: &[u8]) -> Result<(), VerificationError> {
    match self.finalize() {
      Ok(hash) if ct_eq(hash.as_bytes(), expected) => Ok(()),
      _ => Err(VerificationError::new()),
    }
  }

  /// Back to the freshly constructed state, key prefix included.
  pub fn reset(&mut self) {
    self.h = self.h0;
    wipe(self.buf.as_mut());
    self.buf_len = 0;
    self.counter = D::COUNTER_ZERO;
    self.phase = Phase::Fresh;
    self.load_key();
  }

  /// Set or clear the last-node flag applied at finalization.
  pub fn set_last_node(&mut self, last_node: bool) -> &mut Self {
    self.last_node = last_node;
    self
  }

  #[inline]
  #[must_use]
  pub fn output_len(&self) -> usize {
    self.out_len
  }

  /// Bytes absorbed so far, including a key block and buffered input.
  #[inline]
  #[must_use]
  pub fn count(&self) -> u128 {
    D::counter_bytes(self.counter) + self.buf_len as u128
  }

  #[inline]
  #[must_use]
  pub fn phase(&self) -> Phase {
    self.phase
  }

  #[inline]
  #[must_use]
  pub fn is_finalized(&self) -> bool {
    self.phase == Phase::Finalized
  }
}

impl<D: Domain> Drop for State<D> {
  fn drop(&mut self) {
    wipe(self.buf.as_mut());
    if let Some(block) = self.key_block.as_mut() {
      wipe(block.as_mut());
    }
  }
}

impl<D: Domain> fmt::Debug for State<D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("State")
      .field("domain", &D::NAME)
      .field("out_len", &self.out_len)
      .field("count", &self.count())
      .field("keyed", &self.key_block.is_some())
      .field("last_node", &self.last_node)
      .field("phase", &self.phase)
      .finish_non_exhaustive()
  }
}

impl<D: Domain> Hasher for State<D> {
  const BLOCK_LEN: usize = D::BLOCK_LEN;
  type Output = Hash;
  type Error = Error;

  #[inline]
  fn output_len(&self) -> Option<usize> {
    Some(self.out_len)
  }

  #[inline]
  fn update(&mut self, data: &[u8]) -> Result<(), Error> {
    State::update(self, data)
  }

  #[inline]
  fn finalize(&mut self) -> Result<Hash, Error> {
    State::finalize(self)
  }

  #[inline]
  fn reset(&mut self) {
    State::reset(self);
  }
}
