//! Error types shared across the workspace.
//!
//! Engine crates define their own operational errors; this module only holds
//! the opaque verification failure used by keyed-hash tag checks.

use core::fmt;

/// Tag verification failed.
///
/// Returned when a keyed BLAKE2 tag does not match the expected value.
/// Intentionally opaque: it does not say which byte differed, nor whether the
/// failure came from a length mismatch or a content mismatch.
///
/// # Examples
///
/// ```
/// use traits::VerificationError;
///
/// fn check(computed: &[u8], expected: &[u8]) -> Result<(), VerificationError> {
///   let diff = computed.iter().zip(expected).fold(0u8, |acc, (a, b)| acc | (a ^ b));
///   if computed.len() == expected.len() && diff == 0 {
///     Ok(())
///   } else {
///     Err(VerificationError::new())
///   }
/// }
///
/// assert!(check(&[1, 2, 3], &[1, 2, 3]).is_ok());
/// assert!(check(&[1, 2, 3], &[1, 2, 4]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct VerificationError;

impl VerificationError {
  /// Create a new verification error.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for VerificationError {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for VerificationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("tag verification failed")
  }
}

impl core::error::Error for VerificationError {}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, string::ToString};

  use super::*;

  #[test]
  fn display_message() {
    assert_eq!(VerificationError::new().to_string(), "tag verification failed");
  }

  #[test]
  fn debug_impl() {
    assert_eq!(format!("{:?}", VerificationError::new()), "VerificationError");
  }

  #[test]
  fn default_matches_new() {
    let err: VerificationError = Default::default();
    assert_eq!(err, VerificationError::new());
  }

  #[test]
  fn has_no_source() {
    use core::error::Error;
    assert!(VerificationError::new().source().is_none());
  }

  #[test]
  fn is_zero_sized_and_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<VerificationError>();
    assert_eq!(core::mem::size_of::<VerificationError>(), 0);
  }
}
