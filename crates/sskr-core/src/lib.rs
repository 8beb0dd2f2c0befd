//! Sharded Secret Key Reconstruction (SSKR) cryptographic core
//!
//! A two-level group-of-groups Shamir threshold scheme over GF(2^8),
//! following the SLIP-39 share-layout convention (secret at x=255, a 4-byte
//! integrity digest at x=254). A master secret is split into `g` group
//! shares under a `gt`-of-`g` policy; each group share is split again into
//! its own `t`-of-`n` member shares. [`sskr::generate_shares`] performs the
//! split; [`sskr::Accumulator`] reconstructs incrementally, tolerating
//! resumption across calls, duplicate shares, and partial deliveries.
//!
//! External randomness and the HMAC-SHA-256 digest primitive are both
//! collaborator traits ([`rng::RandomSource`], [`digest::Mac`]) rather than
//! hardwired calls, so a secure-element host can swap in a hardware TRNG or
//! HMAC engine without touching the arithmetic here.

pub mod digest;
pub mod error;
pub mod gf256;
pub mod rng;
pub mod shamir;
pub mod sskr;
pub mod wire;

pub use digest::{digest4, HmacSha256, Mac};
pub use error::{Result, SskrError};
pub use rng::{RandomSource, ThreadRngSource};
pub use sskr::{generate_shares, Accumulator};
pub use wire::{parse_share, serialize_share, ShareMeta, METADATA_SIZE};

/// Maximum number of groups, and maximum members per group (spec §3: both
/// nibble-packed, 1..=16).
pub const MAX_PARTIES: u8 = 16;

/// Shared secret length bounds, mirrored from [`shamir::MIN_SECRET_LEN`] and
/// [`shamir::MAX_SECRET_LEN`] at the crate root since callers building a
/// full two-level policy need them before ever touching `shamir` directly.
pub const MIN_SECRET_LEN: usize = shamir::MIN_SECRET_LEN;
pub const MAX_SECRET_LEN: usize = shamir::MAX_SECRET_LEN;
