//! Errors reported by the BLAKE2 engines.
//!
//! Every error is a deterministic function of caller input or call sequencing;
//! none is transient and none is retried internally.

use core::fmt;

/// BLAKE2 engine error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
  /// Digest length outside `1..=OUT_LEN`, or key longer than `KEY_LEN`.
  ///
  /// Raised at construction; no state is created.
  InvalidKeyOrDigestLength,
  /// XOF output length is zero, above the domain bound, or (for a bounded
  /// reader) larger than what is left to read.
  InvalidXofLength,
  /// Salt, personalization or inner hash length exceeds the domain size.
  InvalidParameter,
  /// Total input would overflow the byte counter. The state is unusable
  /// until reset.
  LengthOverflow,
  /// `update` or `finalize` on a state that was already finalized. The state
  /// is left unchanged.
  UseAfterFinal,
}

impl Error {
  /// Whether the error was raised while building a state, before any input.
  #[inline]
  #[must_use]
  pub const fn is_construction(self) -> bool {
    matches!(self, Self::InvalidKeyOrDigestLength | Self::InvalidXofLength | Self::InvalidParameter)
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::InvalidKeyOrDigestLength => "invalid key or digest length",
      Self::InvalidXofLength => "invalid XOF output length",
      Self::InvalidParameter => "invalid salt, personalization or inner hash length",
      Self::LengthOverflow => "input length overflows the byte counter",
      Self::UseAfterFinal => "hash state used after finalization",
    })
  }
}

impl core::error::Error for Error {}
