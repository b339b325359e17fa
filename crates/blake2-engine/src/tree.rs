//! Parallel tree variants BLAKE2bp and BLAKE2sp.
//!
//! `F` leaves (4 for BLAKE2bp, 8 for BLAKE2sp) each hash every `F`-th block
//! of the message; block `k` goes to leaf `k mod F`. The full-size leaf
//! digests, concatenated in leaf order, are the only input of a root node at
//! depth 1 which emits the requested length.
//!
//! With the `parallel` feature, large updates feed the leaves on the rayon
//! thread pool. The digest does not depend on how leaves were scheduled.

#![allow(clippy::indexing_slicing)] // Leaf index is always reduced mod F

use core::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use traits::{Hasher, VerificationError};

use crate::{
  Error,
  domain::{B, Domain, S},
  hash::Hash,
  params::Params,
  state::{Phase, State},
  util::{ct_eq, wipe},
};

/// Smallest run of whole blocks worth handing to the thread pool.
#[cfg(feature = "parallel")]
const PARALLEL_MIN_LEN: usize = 64 * 1024;

/// BLAKE2bp: four BLAKE2b leaves.
pub type Blake2bp = Tree<B, 4>;

/// BLAKE2sp: eight BLAKE2s leaves.
pub type Blake2sp = Tree<S, 8>;

/// Depth-2 BLAKE2 tree with `F` leaves.
#[derive(Clone)]
pub struct Tree<D: Domain, const F: usize> {
  leaves: [State<D>; F],
  root: State<D>,
  buf: D::Block,
  buf_len: usize,
  next_leaf: usize,
  total: D::Counter,
  out_len: usize,
  phase: Phase,
  parallel: bool,
}

impl<D: Domain, const F: usize> Tree<D, F> {
  /// Number of leaves.
  pub const FANOUT: usize = F;

  /// Unkeyed tree producing `out_len` bytes.
  pub fn new(out_len: usize) -> Result<Self, Error> {
    Self::with_params(Params::new().digest_len(out_len))
  }

  /// Keyed tree producing `out_len` bytes. Every leaf absorbs the key block.
  pub fn new_keyed(key: &[u8], out_len: usize) -> Result<Self, Error> {
    Self::with_params(Params::new().digest_len(out_len).key(key))
  }

  /// Build from caller parameters.
  ///
  /// Digest length, key, salt and personalization are taken from `params`;
  /// the tree shape fields (fanout, depths, offsets, inner length, last node)
  /// are always set by the tree itself.
  pub fn with_params(params: &Params<D>) -> Result<Self, Error> {
    params.validate()?;
    Ok(Self::from_validated(params))
  }

  fn from_validated(params: &Params<D>) -> Self {
    const { assert!(F >= 2 && F <= u8::MAX as usize) };
    let out_len = params.get_digest_len();

    let mut node = params.clone();
    node
      .fanout(F as u8)
      .max_depth(2)
      .max_leaf_len(0)
      .xof_len(0)
      .inner_len(D::OUT_LEN);

    let leaves = core::array::from_fn(|i| {
      node.node_offset(i as u32).node_depth(0).last_node(i == F - 1);
      State::from_validated(&node, D::OUT_LEN)
    });
    node.node_offset(0).node_depth(1).last_node(true);
    let root = State::from_validated_without_key(&node, out_len);

    Self {
      leaves,
      root,
      buf: D::ZERO_BLOCK,
      buf_len: 0,
      next_leaf: 0,
      total: D::COUNTER_ZERO,
      out_len,
      phase: Phase::Fresh,
      parallel: true,
    }
  }

  /// One-shot unkeyed fixed-length digest; `N` is checked at compile time.
  pub(crate) fn sum_fixed<const N: usize>(data: &[u8]) -> [u8; N] {
    const { assert!(N >= 1 && N <= D::OUT_LEN) };
    let mut tree = Self::from_validated(Params::new().digest_len(N));
    tree.route(data);
    let mut out = [0u8; N];
    out.copy_from_slice(tree.finish().as_bytes());
    out
  }

  /// Enable or disable thread-pool leaf hashing. Without the `parallel`
  /// feature leaves are always hashed on the calling thread.
  pub fn set_parallel(&mut self, parallel: bool) -> &mut Self {
    self.parallel = parallel;
    self
  }

  #[inline]
  fn check_live(&self) -> Result<(), Error> {
    match self.phase {
      Phase::Finalized => Err(Error::UseAfterFinal),
      Phase::Poisoned => Err(Error::LengthOverflow),
      Phase::Fresh | Phase::Accepting => Ok(()),
    }
  }

  pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
    self.check_live()?;
    if data.is_empty() {
      return Ok(());
    }
    // The whole message bounds every leaf counter.
    match D::counter_add(self.total, data.len()) {
      Some(t) => self.total = t,
      None => {
        self.phase = Phase::Poisoned;
        wipe(self.buf.as_mut());
        self.buf_len = 0;
        return Err(Error::LengthOverflow);
      }
    }
    self.route(data);
    Ok(())
  }

  /// Unchecked buffering and block routing; callers guarantee liveness and
  /// counter room.
  fn route(&mut self, mut data: &[u8]) {
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
      if self.buf_len < block_len {
        return;
      }
      // Leaves keep their own one-block lookahead, so a full block can be
      // routed right away.
      self.leaves[self.next_leaf].absorb(self.buf.as_ref());
      self.next_leaf = (self.next_leaf + 1) % F;
      self.buf_len = 0;
    }

    let whole = data.len() - data.len() % block_len;
    let (blocks, tail) = data.split_at(whole);
    self.distribute(blocks);
    self.buf.as_mut()[..tail.len()].copy_from_slice(tail);
    self.buf_len = tail.len();
  }

  /// Route a run of whole blocks, continuing the round-robin at `next_leaf`.
  fn distribute(&mut self, blocks: &[u8]) {
    let n = blocks.len() / D::BLOCK_LEN;
    if n == 0 {
      return;
    }
    let start = self.next_leaf;
    self.next_leaf = (start + n) % F;

    #[cfg(feature = "parallel")]
    {
      if self.parallel && blocks.len() >= PARALLEL_MIN_LEN {
        self
          .leaves
          .par_iter_mut()
          .enumerate()
          .for_each(|(i, leaf)| feed_leaf::<D, F>(leaf, i, start, blocks));
        return;
      }
    }

    for (i, leaf) in self.leaves.iter_mut().enumerate() {
      feed_leaf::<D, F>(leaf, i, start, blocks);
    }
  }

  fn finish(&mut self) -> Hash {
    if self.buf_len != 0 {
      self.leaves[self.next_leaf].absorb(&self.buf.as_ref()[..self.buf_len]);
    }
    for leaf in &mut self.leaves {
      let digest = leaf.finish();
      self.root.absorb(digest.as_bytes());
    }
    let out = self.root.finish();
    wipe(self.buf.as_mut());
    self.buf_len = 0;
    self.phase = Phase::Finalized;
    out
  }

  pub fn finalize(&mut self) -> Result<Hash, Error> {
    self.check_live()?;
    Ok(self.finish())
  }

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

  pub fn reset(&mut self) {
    for leaf in &mut self.leaves {
      leaf.reset();
    }
    self.root.reset();
    wipe(self.buf.as_mut());
    self.buf_len = 0;
    self.next_leaf = 0;
    self.total = D::COUNTER_ZERO;
    self.phase = Phase::Fresh;
  }

  #[inline]
  #[must_use]
  pub fn output_len(&self) -> usize {
    self.out_len
  }

  /// Message bytes absorbed so far (key blocks excluded).
  #[inline]
  #[must_use]
  pub fn count(&self) -> u128 {
    D::counter_bytes(self.total)
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

/// Feed leaf `index` every block it owns in `blocks`, given that the first
/// block of the run belongs to leaf `start`.
fn feed_leaf<D: Domain, const F: usize>(leaf: &mut State<D>, index: usize, start: usize, blocks: &[u8]) {
  let first = (index + F - start) % F;
  for block in blocks.chunks_exact(D::BLOCK_LEN).skip(first).step_by(F) {
    leaf.absorb(block);
  }
}

impl<D: Domain, const F: usize> Drop for Tree<D, F> {
  fn drop(&mut self) {
    wipe(self.buf.as_mut());
  }
}

impl<D: Domain, const F: usize> fmt::Debug for Tree<D, F> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Tree")
      .field("domain", &D::NAME)
      .field("fanout", &F)
      .field("out_len", &self.out_len)
      .field("count", &self.count())
      .field("phase", &self.phase)
      .finish_non_exhaustive()
  }
}

impl<D: Domain, const F: usize> Hasher for Tree<D, F> {
  const BLOCK_LEN: usize = D::BLOCK_LEN;
  type Output = Hash;
  type Error = Error;

  #[inline]
  fn output_len(&self) -> Option<usize> {
    Some(self.out_len)
  }

  #[inline]
  fn update(&mut self, data: &[u8]) -> Result<(), Error> {
    Tree::update(self, data)
  }

  #[inline]
  fn finalize(&mut self) -> Result<Hash, Error> {
    Tree::finalize(self)
  }

  #[inline]
  fn reset(&mut self) {
    Tree::reset(self);
  }
}
