//! The BLAKE2 compression function (RFC 7693 §3.2), generic over a word domain.
//!
//! Pure and branch-free on message data; safe to call concurrently on
//! independent chaining values.

#![allow(clippy::indexing_slicing)] // Compression schedule uses fixed indices

use crate::domain::{Domain, Word};

#[inline(always)]
fn g<W: Word>(v: &mut [W; 16], rot: [u32; 4], (a, b, c, d): (usize, usize, usize, usize), x: W, y: W) {
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
  v[d] = (v[d] ^ v[a]).rotate_right(rot[0]);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = (v[b] ^ v[c]).rotate_right(rot[1]);
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
  v[d] = (v[d] ^ v[a]).rotate_right(rot[2]);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = (v[b] ^ v[c]).rotate_right(rot[3]);
}

#[inline(always)]
fn round<W: Word>(v: &mut [W; 16], m: &[W; 16], s: &[usize; 16], rot: [u32; 4]) {
  g(v, rot, (0, 4, 8, 12), m[s[0]], m[s[1]]);
  g(v, rot, (1, 5, 9, 13), m[s[2]], m[s[3]]);
  g(v, rot, (2, 6, 10, 14), m[s[4]], m[s[5]]);
  g(v, rot, (3, 7, 11, 15), m[s[6]], m[s[7]]);

  g(v, rot, (0, 5, 10, 15), m[s[8]], m[s[9]]);
  g(v, rot, (1, 6, 11, 12), m[s[10]], m[s[11]]);
  g(v, rot, (2, 7, 8, 13), m[s[12]], m[s[13]]);
  g(v, rot, (3, 4, 9, 14), m[s[14]], m[s[15]]);
}

#[inline(always)]
fn flag<W: Word>(set: bool) -> W {
  if set { W::ONES } else { W::ZERO }
}

/// Compress one `D::BLOCK_LEN`-byte block into the chaining value `h`.
///
/// `t` is the byte count including this block; `last_block` and `last_node`
/// set the `f0` and `f1` finalization words.
#[inline]
pub fn compress<D: Domain>(h: &mut [D::Word; 8], block: &[u8], t: D::Counter, last_block: bool, last_node: bool) {
  debug_assert_eq!(block.len(), D::BLOCK_LEN);

  let mut m = [<D::Word as Word>::ZERO; 16];
  for (w, bytes) in m.iter_mut().zip(block.chunks_exact(<D::Word as Word>::BYTES)) {
    *w = D::Word::from_le(bytes);
  }

  let (t0, t1) = D::counter_words(t);
  let mut v = [<D::Word as Word>::ZERO; 16];
  v[..8].copy_from_slice(h);
  v[8..].copy_from_slice(&D::IV);
  v[12] ^= t0;
  v[13] ^= t1;
  v[14] ^= flag(last_block);
  v[15] ^= flag(last_node);

  for s in D::SIGMA {
    round(&mut v, &m, s, D::ROT);
  }

  for i in 0..8 {
    h[i] ^= v[i] ^ v[i + 8];
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{B, S};

  // RFC 7693 Appendix A/B: "abc" is a single final block.
  #[test]
  fn rfc7693_blake2b_abc_single_block() {
    let mut h = B::IV;
    h[0] ^= 0x0101_0040;
    let mut block = [0u8; 128];
    block[..3].copy_from_slice(b"abc");
    compress::<B>(&mut h, &block, 3, true, false);
    assert_eq!(h[0], 0x0D4D_1C98_3FA5_80BA);
  }

  #[test]
  fn rfc7693_blake2s_abc_single_block() {
    let mut h = S::IV;
    h[0] ^= 0x0101_0020;
    let mut block = [0u8; 64];
    block[..3].copy_from_slice(b"abc");
    compress::<S>(&mut h, &block, 3, true, false);
    assert_eq!(h[0].to_le_bytes(), [0x50, 0x8c, 0x5e, 0x8c]);
  }

  #[test]
  fn last_node_flag_changes_output() {
    let block = [0x5au8; 64];
    let mut a = S::IV;
    let mut b = S::IV;
    compress::<S>(&mut a, &block, 64, true, false);
    compress::<S>(&mut b, &block, 64, true, true);
    assert_ne!(a, b);
  }
}
