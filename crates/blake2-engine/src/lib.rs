//! Portable BLAKE2 family engine.
//!
//! Six variants share one generic compression core and one streaming state
//! machine, instantiated over two word domains:
//!
//! | Variant | Module | Output |
//! |---------|--------|--------|
//! | BLAKE2b | [`blake2b`] | 1..=64 bytes |
//! | BLAKE2s | [`blake2s`] | 1..=32 bytes |
//! | BLAKE2bp | [`blake2bp`] | 1..=64 bytes, 4 leaves |
//! | BLAKE2sp | [`blake2sp`] | 1..=32 bytes, 8 leaves |
//! | BLAKE2xb | [`xof`] | 1..=2^32-1 bytes |
//! | BLAKE2xs | [`xof`] | 1..=2^16-1 bytes |
//!
//! Every engine implements [`Hasher`]; [`AnyHasher`] selects one at runtime.
//!
//! ```
//! use blake2_engine::blake2b;
//!
//! let mut h = blake2b::Blake2b::new_keyed(b"secret", 32)?;
//! h.update(b"message")?;
//! let tag = h.finalize()?;
//! assert_eq!(tag.len(), 32);
//! # Ok::<(), blake2_engine::Error>(())
//! ```
//!
//! # Features
//!
//! - `std` (default): implies `alloc`, enables `IoSlice` updates.
//! - `alloc`: `Vec`-returning helpers.
//! - `parallel`: tree leaves and XOF chunks on the rayon thread pool.
//! - `zeroize` (default): wipe key material and buffers with `zeroize`.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod blake2b;
pub mod blake2bp;
pub mod blake2s;
pub mod blake2sp;
pub mod compress;
pub mod domain;
mod error;
pub mod hash;
pub mod params;
pub mod state;
pub mod tree;
mod util;
mod variant;
pub mod xof;

pub use error::Error;
pub use hash::Hash;
pub use state::{Phase, State};
pub use traits::{Hasher, VerificationError, Xof};
#[cfg(feature = "alloc")]
pub use variant::digest;
pub use variant::{AnyHasher, Variant, digest_into};
