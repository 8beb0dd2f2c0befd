//! Two-level SSKR orchestration (spec §4.4)
//!
//! `generate_shares` splits a master secret into a flat list of serialized
//! member shares under a group-of-groups threshold policy. Reconstruction
//! is handled by [`Accumulator`], which tolerates resumption across
//! independent calls, duplicate shares, and partial deliveries.

mod accumulator;

pub use accumulator::Accumulator;

use crate::digest::Mac;
use crate::error::{Result, SskrError};
use crate::rng::RandomSource;
use crate::shamir;
use crate::wire::{serialize_share, ShareMeta};

/// Split `secret` into member shares under a two-level `(group threshold,
/// [(member threshold, member count), ...])` policy.
///
/// Returns one serialized share record per member, in group order then
/// member order within each group — the same order spec §4.4 specifies for
/// the concatenated wire form. Total record count is `sum(n_i)`.
pub fn generate_shares<R: RandomSource, M: Mac>(
    rng: &mut R,
    mac: &M,
    gt: u8,
    groups: &[(u8, u8)],
    secret: &[u8],
) -> Result<Vec<Vec<u8>>> {
    let g = groups.len();
    if g == 0 || g > 16 || gt == 0 || gt as usize > g {
        return Err(SskrError::IllegalValue(
            "group threshold/count out of range (1 <= gt <= g <= 16)",
        ));
    }
    for &(t, n) in groups {
        if t == 0 || t > n || n > 16 {
            return Err(SskrError::IllegalValue(
                "member threshold/count out of range (1 <= t <= n <= 16)",
            ));
        }
    }

    let mut id_bytes = [0u8; 2];
    rng.fill(&mut id_bytes);
    let id = ((id_bytes[0] as u16) << 8) | id_bytes[1] as u16;

    let group_shares = shamir::split(rng, mac, gt, g as u8, secret)?;
    let l = secret.len();

    let mut out = Vec::new();
    for (gi, &(t, n)) in groups.iter().enumerate() {
        let group_share = &group_shares[gi * l..(gi + 1) * l];
        let member_shares = shamir::split(rng, mac, t, n, group_share)?;

        for mi in 0..n as usize {
            let meta = ShareMeta {
                id,
                gt,
                g: g as u8,
                gi: gi as u8,
                mt: t,
                mi: mi as u8,
            };
            let payload = &member_shares[mi * l..(mi + 1) * l];
            out.push(serialize_share(&meta, payload));
        }
    }

    Ok(out)
}
