//! Pure Rust BLAKE2.
//!
//! `rsblake2` bundles the whole BLAKE2 family behind one `no_std` API: the
//! sequential hashes BLAKE2b and BLAKE2s (plain, keyed and salted), the
//! tree-parallel BLAKE2bp and BLAKE2sp, and the extendable-output BLAKE2xb
//! and BLAKE2xs.
//!
//! # Quick Start
//!
//! ```
//! use rsblake2::Blake2b;
//!
//! // One-shot computation
//! let digest = rsblake2::blake2b::sum512(b"hello world");
//!
//! // Streaming computation
//! let mut hasher = Blake2b::new(64)?;
//! hasher.update(b"hello ")?;
//! hasher.update(b"world")?;
//! assert_eq!(hasher.finalize()?.as_bytes(), &digest);
//! # Ok::<(), rsblake2::Error>(())
//! ```
//!
//! Runtime selection:
//!
//! ```
//! use rsblake2::{Variant, digest_into};
//!
//! let mut out = [0u8; 100];
//! digest_into(Variant::Blake2xb, b"hello world", &mut out)?;
//! # Ok::<(), rsblake2::Error>(())
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | `IoSlice` updates (implies `alloc`) |
//! | `alloc` | Yes | `Vec`-returning helpers (implied by `std`) |
//! | `zeroize` | Yes | Wipe key material with `zeroize` |
//! | `parallel` | No | Tree leaves and XOF chunks on the rayon thread pool |
//!
//! ## `no_std` Usage
//!
//! ```toml
//! [dependencies]
//! rsblake2 = { version = "0.1", default-features = false }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

// =============================================================================
// Engines
// =============================================================================

pub use blake2_engine::{
  blake2b::{self, Blake2b},
  blake2bp::{self, Blake2bp},
  blake2s::{self, Blake2s},
  blake2sp::{self, Blake2sp},
  xof::{Blake2xb, Blake2xs, XofReader},
};

// =============================================================================
// Runtime selection and shared types
// =============================================================================

#[cfg(feature = "alloc")]
pub use blake2_engine::digest;
pub use blake2_engine::{AnyHasher, Error, Hash, Phase, Variant, digest_into};

// =============================================================================
// Traits
// =============================================================================

pub use traits::{Hasher, VerificationError, Xof};
