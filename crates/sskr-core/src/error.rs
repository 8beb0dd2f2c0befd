//! Categorical error types for the SSKR core
//!
//! Spec mandates three categories, not free-form errors: malformed input or
//! cryptographic failure (`IllegalValue`), a session-contract violation
//! (`IllegalUse`), and working-buffer allocation failure
//! (`ResourceExhausted`). Every variant carries a short, fixed diagnostic
//! string rather than an owned `String` — the core never needs to format
//! caller-supplied data into its errors, and a `&'static str` keeps the
//! error path allocation-free, which matters on the secure-element target
//! this crate is meant to run on.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SskrError {
    /// Malformed inputs or cryptographic failure: bad lengths, out-of-range
    /// parameters, a `shares` buffer that isn't a multiple of `t`, a
    /// payload length outside `16..=32` or odd, a group's `mt` disagreeing
    /// across shares for the same `gi`, a Shamir digest mismatch inside
    /// combine, or an invalid `mi`/`mt` nibble.
    #[error("illegal value: {0}")]
    IllegalValue(&'static str),

    /// A share's `(id, g, gt)` disagrees with the session's pinned values.
    #[error("illegal use: {0}")]
    IllegalUse(&'static str),

    /// A dynamic working-buffer allocation failed.
    #[error("resource exhausted")]
    ResourceExhausted,
}

pub type Result<T> = core::result::Result<T, SskrError>;
