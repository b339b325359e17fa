//! Core hashing traits for rsblake2.
//!
//! This crate provides the small, closed capability set that every BLAKE2
//! engine in the workspace conforms to. It is `no_std` compatible and has zero
//! dependencies.
//!
//! # Trait Hierarchy
//!
//! | Trait | Purpose | Implementors |
//! |-------|---------|--------------|
//! | [`Hasher`] | Streaming absorb, one-shot finalize | BLAKE2b/s, BLAKE2bp/sp, BLAKE2xb/xs |
//! | [`Xof`] | Incremental reads of extendable output | BLAKE2xb/xs readers |
//!
//! # Error Types
//!
//! - [`VerificationError`] - Opaque error for keyed-hash (MAC) tag verification
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod error;
mod hasher;
mod xof;

pub use error::VerificationError;
pub use hasher::Hasher;
pub use xof::Xof;
