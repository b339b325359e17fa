//! Fixed-capacity digest value.

#![allow(clippy::indexing_slicing)] // Output length is bounded by the 64-byte capacity

use core::fmt;

use crate::{
  domain::{Domain, Word},
  util::ct_eq,
};

/// Largest digest any non-XOF engine produces (BLAKE2b / BLAKE2bp).
pub const MAX_OUT_LEN: usize = 64;

/// A BLAKE2 digest of 1 to 64 bytes.
///
/// Equality is evaluated without early exit, so comparing a computed MAC tag
/// against an expected one with `==` does not leak the mismatch position.
#[derive(Clone, Copy)]
pub struct Hash {
  bytes: [u8; MAX_OUT_LEN],
  len: u8,
}

impl Hash {
  /// Serialize the first `len` bytes of a chaining value, little-endian words.
  pub(crate) fn from_words<D: Domain>(h: &[D::Word; 8], len: usize) -> Self {
    debug_assert!(len >= 1 && len <= D::OUT_LEN);
    let mut bytes = [0u8; MAX_OUT_LEN];
    for (w, out) in h.iter().zip(bytes.chunks_exact_mut(<D::Word as Word>::BYTES)) {
      w.write_le(out);
    }
    bytes[len..].fill(0);
    Self { bytes, len: len as u8 }
  }

  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes[..usize::from(self.len)]
  }

  #[inline]
  #[must_use]
  #[allow(clippy::len_without_is_empty)] // A digest is never empty
  pub fn len(&self) -> usize {
    usize::from(self.len)
  }

  /// Copy into a fixed-size array; `None` if `N` differs from [`Hash::len`].
  #[inline]
  #[must_use]
  pub fn to_array<const N: usize>(&self) -> Option<[u8; N]> {
    if N != self.len() {
      return None;
    }
    let mut out = [0u8; N];
    out.copy_from_slice(self.as_bytes());
    Some(out)
  }
}

impl AsRef<[u8]> for Hash {
  #[inline]
  fn as_ref(&self) -> &[u8] {
    self.as_bytes()
  }
}

impl PartialEq for Hash {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    ct_eq(self.as_bytes(), other.as_bytes())
  }
}

impl PartialEq<[u8]> for Hash {
  #[inline]
  fn eq(&self, other: &[u8]) -> bool {
    ct_eq(self.as_bytes(), other)
  }
}

impl Eq for Hash {}

impl fmt::LowerHex for Hash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for b in self.as_bytes() {
      write!(f, "{b:02x}")?;
    }
    Ok(())
  }
}

impl fmt::Debug for Hash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Hash({self:x})")
  }
}
