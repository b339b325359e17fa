/// Overwrite `bytes` with zeros in a way the optimizer will not elide.
#[inline]
pub(crate) fn wipe(bytes: &mut [u8]) {
  #[cfg(feature = "zeroize")]
  {
    zeroize::Zeroize::zeroize(bytes);
  }
  #[cfg(not(feature = "zeroize"))]
  {
    bytes.fill(0);
  }
}

/// Length-aware equality that does not exit early on the first differing byte.
#[inline]
#[must_use]
pub(crate) fn ct_eq(a: &[u8], b: &[u8]) -> bool {
  if a.len() != b.len() {
    return false;
  }
  let diff = a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y));
  core::hint::black_box(diff) == 0
}
