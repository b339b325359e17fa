//! Streaming hash capability.
//!
//! Unlike a fixed-output digest, a BLAKE2 state is configured at construction
//! (output length, key, tree shape) and is consumed by finalization: a second
//! `finalize` is a caller error rather than an idempotent re-read.

use core::fmt::Debug;

/// A hash state that absorbs bytes incrementally and is finalized once.
///
/// Implementors own their state exclusively; independent instances may be
/// driven from different threads without coordination.
pub trait Hasher {
  /// Block size of the underlying compression function, in bytes.
  const BLOCK_LEN: usize;

  /// Value produced by [`Hasher::finalize`].
  ///
  /// A digest for fixed-length engines, an output reader for XOFs.
  type Output;

  /// Error reported by fallible operations.
  type Error: Copy + Eq + Debug;

  /// Configured output length in bytes.
  ///
  /// `None` when the output length is chosen at read time (unknown-length XOF).
  #[must_use]
  fn output_len(&self) -> Option<usize>;

  /// Absorb `data`.
  ///
  /// Empty input is a no-op.
  fn update(&mut self, data: &[u8]) -> Result<(), Self::Error>;

  /// Absorb several non-contiguous buffers in order.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) -> Result<(), Self::Error> {
    for buf in bufs {
      self.update(buf)?;
    }
    Ok(())
  }

  /// Absorb `std::io::IoSlice` buffers in order.
  #[cfg(feature = "std")]
  #[inline]
  fn update_io_slices(&mut self, bufs: &[std::io::IoSlice<'_>]) -> Result<(), Self::Error> {
    for buf in bufs {
      self.update(buf)?;
    }
    Ok(())
  }

  /// Finish the computation.
  ///
  /// After a successful call the state is terminal: further `update` or
  /// `finalize` calls fail until [`Hasher::reset`] is called.
  fn finalize(&mut self) -> Result<Self::Output, Self::Error>;

  /// Return the state to exactly what its constructor produced.
  fn reset(&mut self);
}
