//! Extendable-output function (XOF) reader trait.

/// Reader over the output stream of an extendable-output function.
///
/// This trait intentionally has no `std::io::Read` dependency; it is usable in
/// `no_std` environments. Reads are fallible because some constructions bind
/// the total output length up front and refuse to read past it.
pub trait Xof {
  /// Error reported when the reader cannot produce `out.len()` more bytes.
  type Error;

  /// Squeeze the next `out.len()` output bytes into `out`.
  ///
  /// On error nothing is written and the read position is unchanged.
  fn squeeze(&mut self, out: &mut [u8]) -> Result<(), Self::Error>;

  /// Number of bytes still readable, if the stream is bounded.
  #[must_use]
  fn remaining(&self) -> Option<u64>;
}
