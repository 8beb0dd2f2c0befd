//! Random source collaborator (spec §6)
//!
//! All random consumption in this crate is byte-addressable and of known
//! length: 2 bytes for the SSKR `id`, `L-4` bytes for a Shamir split's
//! digest key, `(t-2)*L` bytes for its inner y-values. The core never seeds
//! or reasons about the generator itself — it is handed one.

/// A source of cryptographically secure random bytes.
///
/// Implement this to plug in a hardware TRNG on a secure-element target;
/// [`ThreadRngSource`] is provided for tests and non-constrained hosts.
pub trait RandomSource {
    fn fill(&mut self, buf: &mut [u8]);
}

/// `rand`-backed [`RandomSource`] using the thread-local CSPRNG.
///
/// Mirrors the way `nostring-shamir::shamir::split_secret` reaches for
/// `rand::thread_rng()` directly; here it is wrapped behind the trait so
/// callers who need a different source (a deterministic test RNG, a
/// hardware TRNG) can substitute one without touching `Shamir`/`Sskr`.
#[derive(Debug, Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn fill(&mut self, buf: &mut [u8]) {
        use rand::RngCore;
        rand::thread_rng().fill_bytes(buf);
    }
}
