//! Runtime selection over the six BLAKE2 variants.

use core::fmt;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::{
  Error,
  domain::{B, Domain, S},
  state::{Phase, State},
  tree::{Blake2bp, Blake2sp},
  xof::{Blake2xb, Blake2xs},
};

/// A member of the BLAKE2 family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
  Blake2b,
  Blake2s,
  Blake2bp,
  Blake2sp,
  Blake2xb,
  Blake2xs,
}

impl Variant {
  pub const ALL: [Self; 6] = [
    Self::Blake2b,
    Self::Blake2s,
    Self::Blake2bp,
    Self::Blake2sp,
    Self::Blake2xb,
    Self::Blake2xs,
  ];

  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Blake2b => "blake2b",
      Self::Blake2s => "blake2s",
      Self::Blake2bp => "blake2bp",
      Self::Blake2sp => "blake2sp",
      Self::Blake2xb => "blake2xb",
      Self::Blake2xs => "blake2xs",
    }
  }

  /// Case-insensitive inverse of [`Variant::name`].
  #[must_use]
  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|v| v.name().eq_ignore_ascii_case(name))
  }

  #[must_use]
  pub const fn is_xof(self) -> bool {
    matches!(self, Self::Blake2xb | Self::Blake2xs)
  }

  const fn is_b(self) -> bool {
    matches!(self, Self::Blake2b | Self::Blake2bp | Self::Blake2xb)
  }

  #[must_use]
  pub const fn block_len(self) -> usize {
    if self.is_b() { B::BLOCK_LEN } else { S::BLOCK_LEN }
  }

  #[must_use]
  pub const fn max_key_len(self) -> usize {
    if self.is_b() { B::KEY_LEN } else { S::KEY_LEN }
  }

  /// Largest output length. For the XOF variants the bound itself is the
  /// unknown-length sentinel, which still yields exactly the requested bytes.
  #[must_use]
  pub const fn max_out_len(self) -> usize {
    match self {
      Self::Blake2xb => B::XOF_MAX as usize,
      Self::Blake2xs => S::XOF_MAX as usize,
      _ if self.is_b() => B::OUT_LEN,
      _ => S::OUT_LEN,
    }
  }
}

impl fmt::Display for Variant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Any BLAKE2 engine, chosen at runtime.
///
/// ```
/// use blake2_engine::{AnyHasher, Variant};
///
/// let mut h = AnyHasher::new(Variant::Blake2sp, 32)?;
/// h.update(b"hello")?;
/// let mut out = [0u8; 32];
/// h.finalize_into(&mut out)?;
/// # Ok::<(), blake2_engine::Error>(())
/// ```
#[derive(Clone, Debug)]
#[allow(clippy::large_enum_variant)] // Tree states are held inline, as in the concrete types
pub enum AnyHasher {
  Blake2b(State<B>),
  Blake2s(State<S>),
  Blake2bp(Blake2bp),
  Blake2sp(Blake2sp),
  Blake2xb(Blake2xb, usize),
  Blake2xs(Blake2xs, usize),
}

impl AnyHasher {
  pub fn new(variant: Variant, out_len: usize) -> Result<Self, Error> {
    Self::new_keyed(variant, &[], out_len)
  }

  /// Keyed engine; an empty key means unkeyed.
  pub fn new_keyed(variant: Variant, key: &[u8], out_len: usize) -> Result<Self, Error> {
    let xof_len = || match u32::try_from(out_len) {
      Ok(len) if out_len <= variant.max_out_len() => Ok(len),
      _ => Err(Error::InvalidXofLength),
    };
    Ok(match variant {
      Variant::Blake2b => Self::Blake2b(State::new_keyed(key, out_len)?),
      Variant::Blake2s => Self::Blake2s(State::new_keyed(key, out_len)?),
      Variant::Blake2bp => Self::Blake2bp(Blake2bp::new_keyed(key, out_len)?),
      Variant::Blake2sp => Self::Blake2sp(Blake2sp::new_keyed(key, out_len)?),
      Variant::Blake2xb => Self::Blake2xb(Blake2xb::new_keyed(key, xof_len()?)?, out_len),
      Variant::Blake2xs => Self::Blake2xs(Blake2xs::new_keyed(key, xof_len()?)?, out_len),
    })
  }

  #[must_use]
  pub fn variant(&self) -> Variant {
    match self {
      Self::Blake2b(_) => Variant::Blake2b,
      Self::Blake2s(_) => Variant::Blake2s,
      Self::Blake2bp(_) => Variant::Blake2bp,
      Self::Blake2sp(_) => Variant::Blake2sp,
      Self::Blake2xb(..) => Variant::Blake2xb,
      Self::Blake2xs(..) => Variant::Blake2xs,
    }
  }

  #[must_use]
  pub fn output_len(&self) -> usize {
    match self {
      Self::Blake2b(h) => h.output_len(),
      Self::Blake2s(h) => h.output_len(),
      Self::Blake2bp(h) => h.output_len(),
      Self::Blake2sp(h) => h.output_len(),
      Self::Blake2xb(_, len) | Self::Blake2xs(_, len) => *len,
    }
  }

  pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
    match self {
      Self::Blake2b(h) => h.update(data),
      Self::Blake2s(h) => h.update(data),
      Self::Blake2bp(h) => h.update(data),
      Self::Blake2sp(h) => h.update(data),
      Self::Blake2xb(h, _) => h.update(data),
      Self::Blake2xs(h, _) => h.update(data),
    }
  }

  /// Finalize into `out`, which must be exactly [`AnyHasher::output_len`]
  /// bytes long. Liveness is checked before the length.
  pub fn finalize_into(&mut self, out: &mut [u8]) -> Result<(), Error> {
    match self.phase() {
      Phase::Finalized => return Err(Error::UseAfterFinal),
      Phase::Poisoned => return Err(Error::LengthOverflow),
      Phase::Fresh | Phase::Accepting => {}
    }
    if out.len() != self.output_len() {
      return Err(if self.variant().is_xof() {
        Error::InvalidXofLength
      } else {
        Error::InvalidKeyOrDigestLength
      });
    }
    match self {
      Self::Blake2b(h) => out.copy_from_slice(h.finalize()?.as_bytes()),
      Self::Blake2s(h) => out.copy_from_slice(h.finalize()?.as_bytes()),
      Self::Blake2bp(h) => out.copy_from_slice(h.finalize()?.as_bytes()),
      Self::Blake2sp(h) => out.copy_from_slice(h.finalize()?.as_bytes()),
      Self::Blake2xb(h, _) => h.finalize_into(out)?,
      Self::Blake2xs(h, _) => h.finalize_into(out)?,
    }
    Ok(())
  }

  pub fn reset(&mut self) {
    match self {
      Self::Blake2b(h) => h.reset(),
      Self::Blake2s(h) => h.reset(),
      Self::Blake2bp(h) => h.reset(),
      Self::Blake2sp(h) => h.reset(),
      Self::Blake2xb(h, _) => h.reset(),
      Self::Blake2xs(h, _) => h.reset(),
    }
  }

  #[must_use]
  pub fn phase(&self) -> Phase {
    match self {
      Self::Blake2b(h) => h.phase(),
      Self::Blake2s(h) => h.phase(),
      Self::Blake2bp(h) => h.phase(),
      Self::Blake2sp(h) => h.phase(),
      Self::Blake2xb(h, _) => h.phase(),
      Self::Blake2xs(h, _) => h.phase(),
    }
  }

  #[inline]
  #[must_use]
  pub fn is_finalized(&self) -> bool {
    self.phase() == Phase::Finalized
  }
}

#[cfg(feature = "alloc")]
impl traits::Hasher for AnyHasher {
  /// Largest block across variants.
  const BLOCK_LEN: usize = B::BLOCK_LEN;
  type Output = Vec<u8>;
  type Error = Error;

  #[inline]
  fn output_len(&self) -> Option<usize> {
    Some(AnyHasher::output_len(self))
  }

  #[inline]
  fn update(&mut self, data: &[u8]) -> Result<(), Error> {
    AnyHasher::update(self, data)
  }

  fn finalize(&mut self) -> Result<Vec<u8>, Error> {
    let mut out = alloc::vec![0u8; AnyHasher::output_len(self)];
    self.finalize_into(&mut out)?;
    Ok(out)
  }

  #[inline]
  fn reset(&mut self) {
    AnyHasher::reset(self);
  }
}

/// One-shot digest of `out.len()` bytes (no key, salt or personalization).
pub fn digest_into(variant: Variant, data: &[u8], out: &mut [u8]) -> Result<(), Error> {
  let mut h = AnyHasher::new(variant, out.len())?;
  h.update(data)?;
  h.finalize_into(out)
}

/// One-shot digest of `out_len` bytes (no key, salt or personalization).
#[cfg(feature = "alloc")]
pub fn digest(variant: Variant, out_len: usize, data: &[u8]) -> Result<Vec<u8>, Error> {
  let mut h = AnyHasher::new(variant, out_len)?;
  h.update(data)?;
  traits::Hasher::finalize(&mut h)
}
