//! Word domains of the BLAKE2 family.
//!
//! A domain fixes the word width, round count, block size, rotation constants
//! and parameter-block layout. BLAKE2b and its derivatives live in [`B`];
//! BLAKE2s and its derivatives live in [`S`]. Both are zero-sized marker types
//! that the generic engine is instantiated over.

use core::{
  fmt::Debug,
  ops::{BitXor, BitXorAssign},
};

/// Machine word of a domain (`u64` for BLAKE2b, `u32` for BLAKE2s).
pub trait Word: Copy + Eq + Debug + BitXor<Output = Self> + BitXorAssign + Send + Sync + 'static {
  /// Width in bytes.
  const BYTES: usize;
  /// All bits clear.
  const ZERO: Self;
  /// All bits set; the finalization-flag mask.
  const ONES: Self;

  fn wrapping_add(self, rhs: Self) -> Self;
  fn rotate_right(self, n: u32) -> Self;
  /// Decode from exactly [`Word::BYTES`] little-endian bytes.
  fn from_le(bytes: &[u8]) -> Self;
  /// Encode into exactly [`Word::BYTES`] little-endian bytes.
  fn write_le(self, out: &mut [u8]);
}

impl Word for u64 {
  const BYTES: usize = 8;
  const ZERO: Self = 0;
  const ONES: Self = u64::MAX;

  #[inline(always)]
  fn wrapping_add(self, rhs: Self) -> Self {
    u64::wrapping_add(self, rhs)
  }

  #[inline(always)]
  fn rotate_right(self, n: u32) -> Self {
    u64::rotate_right(self, n)
  }

  #[inline(always)]
  fn from_le(bytes: &[u8]) -> Self {
    let mut w = [0u8; 8];
    w.copy_from_slice(bytes);
    u64::from_le_bytes(w)
  }

  #[inline(always)]
  fn write_le(self, out: &mut [u8]) {
    out.copy_from_slice(&self.to_le_bytes());
  }
}

impl Word for u32 {
  const BYTES: usize = 4;
  const ZERO: Self = 0;
  const ONES: Self = u32::MAX;

  #[inline(always)]
  fn wrapping_add(self, rhs: Self) -> Self {
    u32::wrapping_add(self, rhs)
  }

  #[inline(always)]
  fn rotate_right(self, n: u32) -> Self {
    u32::rotate_right(self, n)
  }

  #[inline(always)]
  fn from_le(bytes: &[u8]) -> Self {
    let mut w = [0u8; 4];
    w.copy_from_slice(bytes);
    u32::from_le_bytes(w)
  }

  #[inline(always)]
  fn write_le(self, out: &mut [u8]) {
    out.copy_from_slice(&self.to_le_bytes());
  }
}

/// Byte offsets of the domain-specific tail of the parameter block.
///
/// Bytes 0..12 (digest length, key length, fanout, depth, leaf length, node
/// offset) are shared by both domains; everything after the node offset moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamLayout {
  /// Width of the XOF length field at byte 12 (4 for b, 2 for s).
  pub xof_len_bytes: usize,
  pub node_depth: usize,
  pub inner_len: usize,
  pub salt: usize,
  pub personal: usize,
}

/// Constant set and counter arithmetic of one BLAKE2 word domain.
pub trait Domain: Copy + Debug + Default + Send + Sync + 'static {
  type Word: Word;
  /// Two-word byte counter, held as one wide integer.
  type Counter: Copy + Eq + Debug + Send + Sync + 'static;
  /// One input block.
  type Block: Copy + AsRef<[u8]> + AsMut<[u8]> + Send + Sync + 'static;

  /// Family name of the base hash (`"blake2b"` / `"blake2s"`).
  const NAME: &'static str;
  const BLOCK_LEN: usize;
  /// Maximum (and default) digest length.
  const OUT_LEN: usize;
  const KEY_LEN: usize;
  const SALT_LEN: usize;
  const PERSONAL_LEN: usize;
  /// Serialized parameter-block size (64 for b, 32 for s).
  const PARAM_LEN: usize;
  /// Leaf count of the parallel tree variant.
  const TREE_FANOUT: usize;
  /// Largest XOF length field value; itself the "unknown length" sentinel.
  const XOF_MAX: u32;
  const LAYOUT: ParamLayout;
  const IV: [Self::Word; 8];
  /// One message permutation row per round.
  const SIGMA: &'static [[usize; 16]];
  /// G rotation distances R1..R4.
  const ROT: [u32; 4];
  const ZERO_BLOCK: Self::Block;
  const COUNTER_ZERO: Self::Counter;

  /// `t + n`, or `None` past the counter's capacity.
  fn counter_add(t: Self::Counter, n: usize) -> Option<Self::Counter>;
  /// `(low, high)` counter words.
  fn counter_words(t: Self::Counter) -> (Self::Word, Self::Word);
  fn counter_bytes(t: Self::Counter) -> u128;
}

const SIGMA: [[usize; 16]; 12] = [
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
  [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
  [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
  [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
  [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
  [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
  [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
  [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
  [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
];

/// BLAKE2b domain: 64-bit words, 12 rounds, 128-byte blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct B;

impl Domain for B {
  type Word = u64;
  type Counter = u128;
  type Block = [u8; 128];

  const NAME: &'static str = "blake2b";
  const BLOCK_LEN: usize = 128;
  const OUT_LEN: usize = 64;
  const KEY_LEN: usize = 64;
  const SALT_LEN: usize = 16;
  const PERSONAL_LEN: usize = 16;
  const PARAM_LEN: usize = 64;
  const TREE_FANOUT: usize = 4;
  const XOF_MAX: u32 = u32::MAX;
  const LAYOUT: ParamLayout = ParamLayout {
    xof_len_bytes: 4,
    node_depth: 16,
    inner_len: 17,
    salt: 32,
    personal: 48,
  };
  const IV: [u64; 8] = [
    0x6a09_e667_f3bc_c908,
    0xbb67_ae85_84ca_a73b,
    0x3c6e_f372_fe94_f82b,
    0xa54f_f53a_5f1d_36f1,
    0x510e_527f_ade6_82d1,
    0x9b05_688c_2b3e_6c1f,
    0x1f83_d9ab_fb41_bd6b,
    0x5be0_cd19_137e_2179,
  ];
  const SIGMA: &'static [[usize; 16]] = &SIGMA;
  const ROT: [u32; 4] = [32, 24, 16, 63];
  const ZERO_BLOCK: [u8; 128] = [0u8; 128];
  const COUNTER_ZERO: u128 = 0;

  #[inline(always)]
  fn counter_add(t: u128, n: usize) -> Option<u128> {
    t.checked_add(n as u128)
  }

  #[inline(always)]
  fn counter_words(t: u128) -> (u64, u64) {
    (t as u64, (t >> 64) as u64)
  }

  #[inline(always)]
  fn counter_bytes(t: u128) -> u128 {
    t
  }
}

/// BLAKE2s domain: 32-bit words, 10 rounds, 64-byte blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct S;

impl Domain for S {
  type Word = u32;
  type Counter = u64;
  type Block = [u8; 64];

  const NAME: &'static str = "blake2s";
  const BLOCK_LEN: usize = 64;
  const OUT_LEN: usize = 32;
  const KEY_LEN: usize = 32;
  const SALT_LEN: usize = 8;
  const PERSONAL_LEN: usize = 8;
  const PARAM_LEN: usize = 32;
  const TREE_FANOUT: usize = 8;
  const XOF_MAX: u32 = u16::MAX as u32;
  const LAYOUT: ParamLayout = ParamLayout {
    xof_len_bytes: 2,
    node_depth: 14,
    inner_len: 15,
    salt: 16,
    personal: 24,
  };
  const IV: [u32; 8] = [
    0x6A09_E667,
    0xBB67_AE85,
    0x3C6E_F372,
    0xA54F_F53A,
    0x510E_527F,
    0x9B05_688C,
    0x1F83_D9AB,
    0x5BE0_CD19,
  ];
  const SIGMA: &'static [[usize; 16]] = {
    let all: &'static [[usize; 16]] = &SIGMA;
    all.split_at(10).0
  };
  const ROT: [u32; 4] = [16, 12, 8, 7];
  const ZERO_BLOCK: [u8; 64] = [0u8; 64];
  const COUNTER_ZERO: u64 = 0;

  #[inline(always)]
  fn counter_add(t: u64, n: usize) -> Option<u64> {
    u64::try_from(n).ok().and_then(|n| t.checked_add(n))
  }

  #[inline(always)]
  fn counter_words(t: u64) -> (u32, u32) {
    (t as u32, (t >> 32) as u32)
  }

  #[inline(always)]
  fn counter_bytes(t: u64) -> u128 {
    u128::from(t)
  }
}
