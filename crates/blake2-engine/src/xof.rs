//! Extendable-output variants BLAKE2xb and BLAKE2xs.
//!
//! The message is hashed once by a root state whose parameter block carries
//! the requested output length `L`. Output chunk `i` is then the digest of the
//! root hash under a fresh parameter block with node offset `i` and digest
//! length `min(remaining, OUT_LEN)`. Because `L` is part of every chunk's
//! parameter block, a shorter request is *not* a prefix of a longer one.
//!
//! The largest representable length (`u32::MAX` for BLAKE2xb, `u16::MAX` for
//! BLAKE2xs) marks the output length as unknown at hashing time.

#![allow(clippy::indexing_slicing)] // Chunk offsets are bounded by OUT_LEN

use core::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use traits::Hasher;

use crate::{
  Error,
  domain::{B, Domain, S},
  hash::{Hash, MAX_OUT_LEN},
  params::Params,
  state::{Phase, State},
  util::wipe,
};

#[cfg(feature = "parallel")]
const PARALLEL_MIN_LEN: usize = 16 * 1024;

/// Chunk indices are 32-bit node offsets.
const MAX_CHUNKS: u64 = 1 << 32;

pub type Blake2xb = Xof<B>;

pub type Blake2xs = Xof<S>;

/// BLAKE2X hashing state: absorbs the message, then expands it.
#[derive(Clone)]
pub struct Xof<D: Domain> {
  root: State<D>,
  chunk_params: Params<D>,
  xof_len: u32,
}

impl<D: Domain> Xof<D> {
  /// Output of exactly `xof_len` bytes, `1..D::XOF_MAX`. `D::XOF_MAX` itself
  /// selects the unknown-length mode of [`Xof::new_unknown`].
  pub fn new(xof_len: u32) -> Result<Self, Error> {
    Self::with_params(Params::new().xof_len(xof_len))
  }

  /// Keyed output of exactly `xof_len` bytes.
  pub fn new_keyed(key: &[u8], xof_len: u32) -> Result<Self, Error> {
    Self::with_params(Params::new().xof_len(xof_len).key(key))
  }

  /// Output length decided at finalization.
  pub fn new_unknown() -> Result<Self, Error> {
    Self::with_params(Params::new().xof_len(D::XOF_MAX))
  }

  /// Build from caller parameters.
  ///
  /// The XOF length, key, salt and personalization are taken from `params`;
  /// every other field is fixed by the construction.
  pub fn with_params(params: &Params<D>) -> Result<Self, Error> {
    let xof_len = params.get_xof_len();
    if xof_len == 0 {
      return Err(Error::InvalidXofLength);
    }
    params.validate()?;

    let mut root = params.clone();
    root
      .digest_len(D::OUT_LEN)
      .fanout(1)
      .max_depth(1)
      .max_leaf_len(0)
      .node_offset(0)
      .node_depth(0)
      .inner_len(0)
      .last_node(false);

    let mut chunk_params = params.clone();
    chunk_params
      .key(&[])
      .fanout(0)
      .max_depth(0)
      .max_leaf_len(D::OUT_LEN as u32)
      .node_depth(0)
      .inner_len(D::OUT_LEN)
      .last_node(false);

    Ok(Self {
      root: State::from_validated(&root, D::OUT_LEN),
      chunk_params,
      xof_len,
    })
  }

  /// `None` when the length is left open until finalization.
  #[inline]
  #[must_use]
  pub fn xof_len(&self) -> Option<u32> {
    (self.xof_len != D::XOF_MAX).then_some(self.xof_len)
  }

  pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
    self.root.update(data)
  }

  /// Finalize and fill `out` entirely.
  ///
  /// With a known length `out.len()` must equal it. With an unknown length any
  /// non-empty `out` that fits in 2^32 chunks is accepted, and the last chunk
  /// is sized by `out.len()`. Nothing is consumed when the length is rejected.
  ///
  /// A finalized state reports [`Error::UseAfterFinal`] whatever `out` is.
  pub fn finalize_into(&mut self, out: &mut [u8]) -> Result<(), Error> {
    match self.root.phase() {
      Phase::Finalized => return Err(Error::UseAfterFinal),
      Phase::Poisoned => return Err(Error::LengthOverflow),
      Phase::Fresh | Phase::Accepting => {}
    }
    let requested = out.len() as u64;
    let ok = match self.xof_len() {
      Some(len) => requested == u64::from(len),
      None => requested != 0 && requested.div_ceil(D::OUT_LEN as u64) <= MAX_CHUNKS,
    };
    if !ok {
      return Err(Error::InvalidXofLength);
    }
    let root = self.root.finalize()?;

    #[cfg(feature = "parallel")]
    {
      if out.len() >= PARALLEL_MIN_LEN {
        let chunk_params = &self.chunk_params;
        out
          .par_chunks_mut(D::OUT_LEN)
          .enumerate()
          .for_each(|(i, chunk)| expand_chunk(chunk_params, &root, i as u32, chunk));
        return Ok(());
      }
    }

    for (i, chunk) in out.chunks_mut(D::OUT_LEN).enumerate() {
      expand_chunk(&self.chunk_params, &root, i as u32, chunk);
    }
    Ok(())
  }

  /// Finalize into an incremental reader.
  pub fn finalize_xof(&mut self) -> Result<XofReader<D>, Error> {
    let root = self.root.finalize()?;
    Ok(XofReader {
      chunk_params: self.chunk_params.clone(),
      root,
      total: self.xof_len().map(u64::from),
      pos: 0,
      chunk: [0u8; MAX_OUT_LEN],
      chunk_index: None,
    })
  }

  pub fn reset(&mut self) {
    self.root.reset();
  }

  /// Message bytes absorbed so far, including a key block.
  #[inline]
  #[must_use]
  pub fn count(&self) -> u128 {
    self.root.count()
  }

  #[inline]
  #[must_use]
  pub fn phase(&self) -> Phase {
    self.root.phase()
  }

  #[inline]
  #[must_use]
  pub fn is_finalized(&self) -> bool {
    self.root.is_finalized()
  }
}

/// Compute output chunk `index` into `out` (`1..=D::OUT_LEN` bytes).
fn expand_chunk<D: Domain>(chunk_params: &Params<D>, root: &Hash, index: u32, out: &mut [u8]) {
  let mut params = chunk_params.clone();
  params.digest_len(out.len()).node_offset(index);
  let mut state = State::from_validated(&params, out.len());
  state.absorb(root.as_bytes());
  out.copy_from_slice(state.finish().as_bytes());
}

impl<D: Domain> fmt::Debug for Xof<D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Xof")
      .field("domain", &D::NAME)
      .field("xof_len", &self.xof_len())
      .field("root", &self.root)
      .finish()
  }
}

impl<D: Domain> Hasher for Xof<D> {
  const BLOCK_LEN: usize = D::BLOCK_LEN;
  type Output = XofReader<D>;
  type Error = Error;

  #[inline]
  fn output_len(&self) -> Option<usize> {
    self.xof_len().map(|len| len as usize)
  }

  #[inline]
  fn update(&mut self, data: &[u8]) -> Result<(), Error> {
    Xof::update(self, data)
  }

  #[inline]
  fn finalize(&mut self) -> Result<XofReader<D>, Error> {
    self.finalize_xof()
  }

  #[inline]
  fn reset(&mut self) {
    Xof::reset(self);
  }
}

/// Incremental BLAKE2X output.
///
/// With a known length the reader yields exactly that many bytes. With an
/// unknown length every chunk is full size, up to 2^32 chunks.
#[derive(Clone)]
pub struct XofReader<D: Domain> {
  chunk_params: Params<D>,
  root: Hash,
  total: Option<u64>,
  pos: u64,
  chunk: [u8; MAX_OUT_LEN],
  chunk_index: Option<u64>,
}

impl<D: Domain> XofReader<D> {
  fn limit(&self) -> u64 {
    self.total.unwrap_or(MAX_CHUNKS * D::OUT_LEN as u64)
  }

  /// Write the next `out.len()` bytes of output.
  ///
  /// Fails with [`Error::InvalidXofLength`], writing nothing, if fewer bytes
  /// than requested are left.
  pub fn squeeze(&mut self, mut out: &mut [u8]) -> Result<(), Error> {
    if out.len() as u64 > self.limit() - self.pos {
      return Err(Error::InvalidXofLength);
    }
    let full = D::OUT_LEN as u64;
    while !out.is_empty() {
      let index = self.pos / full;
      let offset = (self.pos % full) as usize;
      let chunk_len = match self.total {
        Some(total) => core::cmp::min(total - index * full, full) as usize,
        None => D::OUT_LEN,
      };
      if self.chunk_index != Some(index) {
        expand_chunk(&self.chunk_params, &self.root, index as u32, &mut self.chunk[..chunk_len]);
        self.chunk_index = Some(index);
      }
      let take = core::cmp::min(chunk_len - offset, out.len());
      let (head, rest) = out.split_at_mut(take);
      head.copy_from_slice(&self.chunk[offset..offset + take]);
      self.pos += take as u64;
      out = rest;
    }
    Ok(())
  }

  /// Bytes left; `None` for an unknown-length reader.
  #[inline]
  #[must_use]
  pub fn remaining(&self) -> Option<u64> {
    self.total.map(|total| total - self.pos)
  }

  /// Bytes produced so far.
  #[inline]
  #[must_use]
  pub fn position(&self) -> u64 {
    self.pos
  }
}

impl<D: Domain> traits::Xof for XofReader<D> {
  type Error = Error;

  #[inline]
  fn squeeze(&mut self, out: &mut [u8]) -> Result<(), Error> {
    XofReader::squeeze(self, out)
  }

  #[inline]
  fn remaining(&self) -> Option<u64> {
    XofReader::remaining(self)
  }
}

impl<D: Domain> Drop for XofReader<D> {
  fn drop(&mut self) {
    wipe(&mut self.chunk);
  }
}

impl<D: Domain> fmt::Debug for XofReader<D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("XofReader")
      .field("domain", &D::NAME)
      .field("position", &self.pos)
      .field("remaining", &self.remaining())
      .finish_non_exhaustive()
  }
}

/// One-shot BLAKE2xb filling all of `out` (`out.len()` is the XOF length).
pub fn blake2xb(data: &[u8], out: &mut [u8]) -> Result<(), Error> {
  expand_one_shot::<B>(data, out)
}

/// One-shot BLAKE2xs filling all of `out` (`out.len()` is the XOF length).
pub fn blake2xs(data: &[u8], out: &mut [u8]) -> Result<(), Error> {
  expand_one_shot::<S>(data, out)
}

pub(crate) fn expand_one_shot<D: Domain>(data: &[u8], out: &mut [u8]) -> Result<(), Error> {
  let len = u32::try_from(out.len()).map_err(|_| Error::InvalidXofLength)?;
  let mut xof = Xof::<D>::new(len)?;
  xof.update(data)?;
  xof.finalize_into(out)
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{string::String, vec, vec::Vec};

  use super::*;

  fn hex(bytes: &[u8]) -> String {
    use core::fmt::Write;
    let mut s = String::new();
    for &b in bytes {
      write!(&mut s, "{:02x}", b).unwrap();
    }
    s
  }

  fn xof_hex<D: Domain>(key: &[u8], data: &[u8], len: u32) -> String {
    let mut x = Xof::<D>::new_keyed(key, len).unwrap();
    x.update(data).unwrap();
    let mut out = vec![0u8; len as usize];
    x.finalize_into(&mut out).unwrap();
    hex(&out)
  }

  #[test]
  fn blake2xb_vectors() {
    assert_eq!(xof_hex::<B>(&[], b"", 1), "34");
    assert_eq!(
      xof_hex::<B>(&[], b"abc", 64),
      "2fb422fd52e01ea99b5ba67723173cee4b74f2b6cb5fe527a45b7216b98957a946f10f20196d094a391f8aa5e3720962b19d5affde2ed8cc8c489d6e84b75ab2"
    );
    assert_eq!(
      xof_hex::<B>(&[], b"abc", 100),
      "e0f82b71c07860b65be612d2633becc46596a6c12a8772b561adec35721b7a5c44a7e075e8a3bc8c4fc8390a197be2085b4aa4385c207f24e46415defc659afd73bacb288080b10849aeea386c60cd3fa04c9bcbfeebaed6e98634d696b9d5bdef0ad2c5"
    );
  }

  #[test]
  fn blake2xb_keyed_kat() {
    let key: Vec<u8> = (0..64).collect();
    let msg: Vec<u8> = (0..=255).collect();
    assert_eq!(
      xof_hex::<B>(&key, &msg, 64),
      "4324561d76c370ef35ac36a4adf8f3773a50d86504bd284f71f7ce9e2bc4c1f1d34a7fb2d67561d101955d448b67577eb30dfee96a95c7f921ef53e20be8bc44"
    );
  }

  #[test]
  fn blake2xs_vectors() {
    assert_eq!(xof_hex::<S>(&[], b"", 1), "07");
    assert_eq!(
      xof_hex::<S>(&[], b"abc", 32),
      "34459df0b0b5a9d7a9fc477f0f30effd05ff9f0bf13b12df81362e96373c16e3"
    );
    assert_eq!(
      xof_hex::<S>(&[], b"abc", 50),
      "3fbda980e22b1efa091320b6b802a41ed42f6017b56c4f9c7c5928facc12e95efdd10ec995d157f202caacbf63f1a0de9504"
    );
    let key: Vec<u8> = (0..32).collect();
    let msg: Vec<u8> = (0..=255).collect();
    assert_eq!(
      xof_hex::<S>(&key, &msg, 40),
      "a35844e34c20b4b9371b6c52fac412afe5d80a4c1e40aa3a0e5a729dc3d41c2c3719d096f616f0ba"
    );
  }

  #[test]
  fn unknown_length_sizes_chunks_from_the_output() {
    let mut x = Blake2xb::new_unknown().unwrap();
    assert_eq!(x.xof_len(), None);
    x.update(b"abc").unwrap();
    let mut out = [0u8; 130];
    x.finalize_into(&mut out).unwrap();
    assert_eq!(
      hex(&out),
      "ae080c1efbcf7f60ed52a04161d02b7ee63bed362534f0661da02c6e40cd208946d066b86b3dff620e57acea9cd72d3056cf6cb0c18341452a17ce2cced67b702669bf0bed358c1b708e97de2533b294cdd5e9e229678be36399b5b28d6541c4bc4e3079fb8a0fbdf6023a65f36c654947ce7c114a243670dad347f03275b5c59f66"
    );

    let mut x = Blake2xs::new_unknown().unwrap();
    x.update(b"abc").unwrap();
    let mut out = [0u8; 70];
    x.finalize_into(&mut out).unwrap();
    assert_eq!(
      hex(&out),
      "bf5c4f309fde8a62195bc8364ceea81e84eb9330579270c5737b9300085b61495576fef12a5cfa717343bff2bb2461d733fc71c0c51a60392e4d2f84218b1351b0fc3c60c975"
    );
  }

  #[test]
  fn shorter_request_is_not_a_prefix() {
    let short = xof_hex::<B>(&[], b"abc", 64);
    let long = xof_hex::<B>(&[], b"abc", 100);
    assert_ne!(short, long[..128]);
    // Same L: deterministic.
    assert_eq!(long, xof_hex::<B>(&[], b"abc", 100));
  }

  #[test]
  fn reader_matches_finalize_into() {
    for len in [1u32, 31, 32, 33, 64, 65, 100, 200] {
      let mut a = Blake2xs::new(len).unwrap();
      a.update(b"streamed").unwrap();
      let mut expected = vec![0u8; len as usize];
      a.finalize_into(&mut expected).unwrap();

      let mut b = Blake2xs::new(len).unwrap();
      b.update(b"streamed").unwrap();
      let mut reader = b.finalize_xof().unwrap();
      let mut got = vec![0u8; len as usize];
      for chunk in got.chunks_mut(7) {
        reader.squeeze(chunk).unwrap();
      }
      assert_eq!(got, expected, "len={len}");
      assert_eq!(reader.remaining(), Some(0));
      assert_eq!(reader.squeeze(&mut [0u8; 1]), Err(Error::InvalidXofLength));
    }
  }

  #[test]
  fn unknown_reader_emits_full_chunks() {
    let mut a = Blake2xb::new_unknown().unwrap();
    a.update(b"abc").unwrap();
    let mut expected = [0u8; 128];
    a.finalize_into(&mut expected).unwrap();

    let mut b = Blake2xb::new_unknown().unwrap();
    b.update(b"abc").unwrap();
    let mut reader = b.finalize_xof().unwrap();
    assert_eq!(reader.remaining(), None);
    let mut got = [0u8; 128];
    reader.squeeze(&mut got[..5]).unwrap();
    reader.squeeze(&mut got[5..]).unwrap();
    assert_eq!(got, expected);
    assert_eq!(reader.position(), 128);
  }

  #[test]
  fn length_bounds() {
    assert_eq!(Blake2xb::new(0).err(), Some(Error::InvalidXofLength));
    assert_eq!(Blake2xs::new(0x1_0000).err(), Some(Error::InvalidXofLength));
    assert!(Blake2xs::new(0xfffe).unwrap().xof_len().is_some());
    assert_eq!(Blake2xs::new_keyed(&[0; 33], 8).err(), Some(Error::InvalidKeyOrDigestLength));

    let mut x = Blake2xb::new(10).unwrap();
    assert_eq!(x.finalize_into(&mut [0u8; 11]), Err(Error::InvalidXofLength));
    assert!(!x.is_finalized());
    assert!(x.finalize_into(&mut [0u8; 10]).is_ok());
    assert_eq!(x.finalize_into(&mut [0u8; 10]), Err(Error::UseAfterFinal));
    assert_eq!(x.finalize_into(&mut [0u8; 11]), Err(Error::UseAfterFinal));
    assert_eq!(x.update(b"late"), Err(Error::UseAfterFinal));

    let mut u = Blake2xs::new_unknown().unwrap();
    assert_eq!(u.finalize_into(&mut []), Err(Error::InvalidXofLength));
    u.finalize_xof().unwrap();
    assert_eq!(u.finalize_into(&mut []), Err(Error::UseAfterFinal));
  }

  fn squeezed<D: Domain>(mut xof: Xof<D>, len: usize, piece: usize) -> Vec<u8> {
    let mut reader = xof.finalize_xof().unwrap();
    let mut out = vec![0u8; len];
    for chunk in out.chunks_mut(piece) {
      reader.squeeze(chunk).unwrap();
    }
    assert_eq!(reader.remaining(), Some(0));
    out
  }

  // Large enough for the thread-pool expansion when `parallel` is on.
  #[test]
  fn large_output_matches_reader() {
    let msg: Vec<u8> = (0..1000u32).map(|i| (i * 7) as u8).collect();

    let mut xb = Blake2xb::new_keyed(b"wide", 40_000).unwrap();
    xb.update(&msg).unwrap();
    let mut whole = vec![0u8; 40_000];
    xb.clone().finalize_into(&mut whole).unwrap();
    assert_eq!(hex(&whole[..8]), "b9dc23eff4a988aa");
    assert_eq!(hex(&whole[40_000 - 8..]), "71eff12311679d48");
    assert_eq!(squeezed(xb, 40_000, 1013), whole);

    let mut xs = Blake2xs::new(20_000).unwrap();
    xs.update(&msg).unwrap();
    let mut whole = vec![0u8; 20_000];
    xs.clone().finalize_into(&mut whole).unwrap();
    assert_eq!(squeezed(xs, 20_000, 333), whole);
    // A one-byte final chunk.
    let mut xs = Blake2xs::new(20_001).unwrap();
    xs.update(&msg).unwrap();
    let mut odd = vec![0u8; 20_001];
    xs.clone().finalize_into(&mut odd).unwrap();
    assert_eq!(hex(&odd[20_001 - 8..]), "3d695cb8207168cc");
    assert_eq!(squeezed(xs, 20_001, 4096), odd);
  }

  #[test]
  fn one_shot_helpers() {
    let mut out = [0u8; 50];
    blake2xs(b"abc", &mut out).unwrap();
    assert_eq!(hex(&out), xof_hex::<S>(&[], b"abc", 50));
    assert_eq!(blake2xb(b"abc", &mut []), Err(Error::InvalidXofLength));
  }

  #[test]
  fn reset_restores_key_prefix() {
    let mut x = Blake2xb::new_keyed(b"key", 48).unwrap();
    x.update(b"m").unwrap();
    let mut first = [0u8; 48];
    x.finalize_into(&mut first).unwrap();
    x.reset();
    x.update(b"m").unwrap();
    let mut second = [0u8; 48];
    x.finalize_into(&mut second).unwrap();
    assert_eq!(first, second);
  }
}
