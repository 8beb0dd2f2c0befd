//! Single-level T-of-N Shamir secret sharing over GF(2^8) (spec §4.3)
//!
//! Follows the SLIP-39 convention: the secret lives at the reserved
//! x-coordinate 255, a 4-byte integrity digest lives at 254, and share `j`
//! (0-based) is placed at x = j. `split` and `combine` are the only two
//! entry points; everything else in this module is private plumbing.

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::digest::{digest4, Mac};
use crate::error::{Result, SskrError};
use crate::gf256::interpolate;
use crate::rng::RandomSource;

/// Reserved x-coordinate carrying the secret.
const SECRET_X: u8 = 255;
/// Reserved x-coordinate carrying the integrity digest.
const DIGEST_X: u8 = 254;

pub const MIN_SECRET_LEN: usize = 16;
pub const MAX_SECRET_LEN: usize = 32;

fn check_secret_len(len: usize) -> Result<()> {
    if !(MIN_SECRET_LEN..=MAX_SECRET_LEN).contains(&len) || len % 2 != 0 {
        return Err(SskrError::IllegalValue(
            "secret length must be even and in 16..=32",
        ));
    }
    Ok(())
}

fn check_t_n(t: u8, n: u8) -> Result<()> {
    if t == 0 || t > n || n > 16 {
        return Err(SskrError::IllegalValue(
            "threshold/count out of range (1 <= t <= n <= 16)",
        ));
    }
    Ok(())
}

/// Split `secret` into `n` shares of which any `t` reconstruct it.
///
/// Output layout: share `j` occupies `out[j*L .. j*L+L)`; its x-coordinate
/// is `j` (`0..n`). Random draws happen in a fixed order — the digest key
/// first, then the inner y-values — so that two calls sharing a seeded RNG
/// produce byte-identical output (spec §9).
pub fn split<R: RandomSource, M: Mac>(
    rng: &mut R,
    mac: &M,
    t: u8,
    n: u8,
    secret: &[u8],
) -> Result<Vec<u8>> {
    check_t_n(t, n)?;
    check_secret_len(secret.len())?;
    let l = secret.len();

    let mut out = vec![0u8; n as usize * l];

    if t == 1 {
        for j in 0..n as usize {
            out[j * l..(j + 1) * l].copy_from_slice(secret);
        }
        return Ok(out);
    }

    // Digest key R (L-4 random bytes), drawn before the inner y-values.
    let mut digest_key = Zeroizing::new(vec![0u8; l - 4]);
    rng.fill(&mut digest_key);
    let d = digest4(mac, &digest_key, secret);
    let mut digest_l = Zeroizing::new(vec![0u8; l]);
    digest_l[0..4].copy_from_slice(&d);
    digest_l[4..].copy_from_slice(&digest_key);

    // Inner shares s0..s_{t-3}, at x = 0..t-3.
    let inner_count = t as usize - 2;
    let mut inner = Zeroizing::new(vec![0u8; inner_count * l]);
    rng.fill(&mut inner);

    for i in 0..l {
        let mut points: Zeroizing<Vec<(u8, u8)>> = Zeroizing::new(Vec::with_capacity(inner_count + 2));
        for k in 0..inner_count {
            points.push((k as u8, inner[k * l + i]));
        }
        points.push((DIGEST_X, digest_l[i]));
        points.push((SECRET_X, secret[i]));

        for j in 0..inner_count {
            out[j * l + i] = inner[j * l + i];
        }
        for j in inner_count..n as usize {
            out[j * l + i] = interpolate(j as u8, &points);
        }
    }

    Ok(out)
}

/// Reconstruct the secret from `t` shares at x-coordinates `xs`, each of
/// length `shares.len() / t`.
///
/// Returns `Ok(secret)` on success, `Ok(empty vec)` on integrity failure —
/// per spec this is not an exception, the caller decides how to react —
/// and `Err` only for malformed call-site arguments.
pub fn combine<M: Mac>(mac: &M, t: u8, xs: &[u8], shares: &[u8]) -> Result<Vec<u8>> {
    if t == 0 || t > 16 {
        return Err(SskrError::IllegalValue("t out of range (1..=16)"));
    }
    if xs.len() != t as usize {
        return Err(SskrError::IllegalValue("x-coordinate count must equal t"));
    }
    if shares.is_empty() || shares.len() % t as usize != 0 {
        return Err(SskrError::IllegalValue(
            "shares length must be a non-zero multiple of t",
        ));
    }
    let l = shares.len() / t as usize;
    check_secret_len(l)?;

    if t == 1 {
        return Ok(shares.to_vec());
    }

    let mut secret = vec![0u8; l];
    let mut digest_l = Zeroizing::new(vec![0u8; l]);

    for i in 0..l {
        let points: Zeroizing<Vec<(u8, u8)>> = Zeroizing::new(
            xs.iter()
                .enumerate()
                .map(|(row, &x)| (x, shares[row * l + i]))
                .collect(),
        );
        secret[i] = interpolate(SECRET_X, &points);
        digest_l[i] = interpolate(DIGEST_X, &points);
    }

    let expected = &digest_l[0..4];
    let actual = digest4(mac, &digest_l[4..], &secret);
    let ok: bool = actual.ct_eq(expected).into();

    if ok {
        Ok(secret)
    } else {
        secret.zeroize();
        Ok(Vec::new())
    }
}
