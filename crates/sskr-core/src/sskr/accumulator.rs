//! Stateful, incremental SSKR share accumulator (spec §3-§4.4)
//!
//! Tolerates resumption across independent [`Accumulator::add_shares`]
//! calls, duplicate shares, and partial deliveries, enforcing single-set
//! identity and threshold progression. The only mutable state owned by an
//! `Accumulator` is its bucket tree: one top-level bucket sized `gt`,
//! allocated on the first accepted share, and one bucket per group index
//! actually observed, each sized to that group's `mt`. No bucket is ever
//! larger than the policy it was allocated for — no pre-reservation for a
//! worst case.

use std::collections::BTreeMap;

use zeroize::Zeroize;

use crate::digest::Mac;
use crate::error::{Result, SskrError};
use crate::shamir;
use crate::wire::parse_share;

/// Sentinel marking an empty slot in an x-vector. Never a valid
/// x-coordinate (all real coordinates are share/group indices, 0..16).
const UNUSED: u8 = 0xFF;

/// A fixed-capacity bucket of `(x, y-row)` pairs, sealed once full.
struct Bucket {
    xs: Vec<u8>,
    ys: Vec<u8>,
    l: usize,
    count: usize,
}

impl Bucket {
    fn new(capacity: usize, l: usize) -> Self {
        Self {
            xs: vec![UNUSED; capacity],
            ys: vec![0u8; capacity * l],
            l,
            count: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.xs.len()
    }

    fn is_sealed(&self) -> bool {
        self.count == self.capacity()
    }

    /// Insert `(x, y)`. Returns `true` if this insertion just sealed the
    /// bucket (the write completed its `capacity`-th unique entry).
    /// A duplicate `x` or an insert into an already-sealed bucket is a no-op.
    fn insert(&mut self, x: u8, y: &[u8]) -> bool {
        if self.xs.iter().any(|&slot| slot == x) {
            return false; // duplicate, silently absorbed
        }
        let Some(slot) = self.xs.iter().position(|&slot| slot == UNUSED) else {
            return false; // sealed; extraneous entries are ignored
        };
        self.xs[slot] = x;
        self.ys[slot * self.l..(slot + 1) * self.l].copy_from_slice(y);
        self.count += 1;
        self.count == self.capacity()
    }

    fn points(&self) -> (&[u8], &[u8]) {
        (&self.xs, &self.ys)
    }
}

impl Drop for Bucket {
    fn drop(&mut self) {
        self.xs.zeroize();
        self.ys.zeroize();
    }
}

struct Session {
    id: u16,
    g: u8,
    gt: u8,
    l: usize,
    top: Bucket,
    groups: BTreeMap<u8, GroupSlot>,
}

/// Incremental SSKR combine engine.
///
/// Holds no state beyond one active [`Session`] (created on the first
/// accepted share) and the [`Mac`] used to verify each group/top-level
/// Shamir reconstruction. Call [`reset`](Accumulator::reset) after a
/// successful reconstruction or any error before starting a new session.
pub struct Accumulator<M: Mac> {
    mac: M,
    session: Option<Session>,
}

impl<M: Mac> Accumulator<M> {
    pub fn new(mac: M) -> Self {
        Self { mac, session: None }
    }

    /// Drop all accumulator state. The next accepted share pins a new session.
    pub fn reset(&mut self) {
        self.session = None;
    }

    /// Feed in one batch of serialized share records (spec §3 wire layout).
    ///
    /// Returns `Ok(Some(secret))` once the master secret has been
    /// reconstructed on this call, `Ok(None)` if more shares are required,
    /// and `Err` for a session-contract violation or malformed/corrupt
    /// input. On `Err`, the accumulator is considered poisoned — call
    /// [`reset`](Self::reset) before the next `add_shares` call.
    pub fn add_shares<'a, I>(&mut self, records: I) -> Result<Option<Vec<u8>>>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        for record in records {
            let (meta, payload) = parse_share(record)?;

            let session = match &mut self.session {
                Some(s) => s,
                None => {
                    let top = Bucket::new(meta.gt as usize, payload.len());
                    self.session = Some(Session {
                        id: meta.id,
                        g: meta.g,
                        gt: meta.gt,
                        l: payload.len(),
                        top,
                        groups: BTreeMap::new(),
                    });
                    self.session.as_mut().expect("just inserted")
                }
            };

            if meta.id != session.id || meta.g != session.g || meta.gt != session.gt {
                return Err(SskrError::IllegalUse(
                    "share id/g/gt disagrees with the pinned session",
                ));
            }
            if payload.len() != session.l {
                return Err(SskrError::IllegalValue(
                    "payload length disagrees with the session's established length",
                ));
            }

            let group = session
                .groups
                .entry(meta.gi)
                .or_insert_with(|| GroupSlot::new(meta.mt, session.l));

            if group.mt != meta.mt {
                return Err(SskrError::IllegalValue(
                    "member threshold disagrees across shares for the same group index",
                ));
            }

            let sealed = group.bucket.insert(meta.mi, payload);
            if !sealed {
                continue;
            }

            let (xs, ys) = group.bucket.points();
            let group_secret = shamir::combine(&self.mac, group.mt, xs, ys)?;
            if group_secret.is_empty() {
                log::warn!("sskr: group {} failed its integrity digest", meta.gi);
                return Err(SskrError::IllegalValue(
                    "group reconstruction failed its integrity digest",
                ));
            }
            log::debug!("sskr: group {} reconstructed", meta.gi);

            let top_sealed = session.top.insert(meta.gi, &group_secret);
            if !top_sealed {
                continue;
            }

            let (top_xs, top_ys) = session.top.points();
            let secret = shamir::combine(&self.mac, session.gt, top_xs, top_ys)?;
            if secret.is_empty() {
                log::warn!("sskr: top-level reconstruction failed its integrity digest");
                return Err(SskrError::IllegalValue(
                    "top-level reconstruction failed its integrity digest",
                ));
            }
            return Ok(Some(secret));
        }

        Ok(None)
    }
}

/// A group bucket plus its pinned member threshold.
struct GroupSlot {
    mt: u8,
    bucket: Bucket,
}

impl GroupSlot {
    fn new(mt: u8, l: usize) -> Self {
        Self {
            mt,
            bucket: Bucket::new(mt as usize, l),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::HmacSha256;
    use crate::rng::RandomSource;
    use crate::sskr::generate_shares;
    use crate::wire::parse_share;

    struct CountingRng(u8, u8);
    impl RandomSource for CountingRng {
        fn fill(&mut self, buf: &mut [u8]) {
            for b in buf.iter_mut() {
                *b = self.0;
                self.0 = self.0.wrapping_add(self.1);
            }
        }
    }

    fn sample_shares() -> (Vec<u8>, Vec<Vec<u8>>) {
        sample_shares_seeded(11, 23)
    }

    fn sample_shares_seeded(start: u8, step: u8) -> (Vec<u8>, Vec<Vec<u8>>) {
        let secret: Vec<u8> = (0..16u8).map(|i| i.wrapping_mul(41).wrapping_add(9)).collect();
        let mut rng = CountingRng(start, step);
        let shares = generate_shares(&mut rng, &HmacSha256, 2, &[(2, 3), (3, 5)], &secret).unwrap();
        (secret, shares)
    }

    fn by_group(shares: &[Vec<u8>], gi: u8) -> Vec<&[u8]> {
        shares
            .iter()
            .filter(|r| parse_share(r).unwrap().0.gi == gi)
            .map(|v| v.as_slice())
            .collect()
    }

    #[test]
    fn all_shares_in_one_call() {
        let (secret, shares) = sample_shares();
        let mut acc = Accumulator::new(HmacSha256);
        let g0 = by_group(&shares, 0);
        let g1 = by_group(&shares, 1);
        let chosen: Vec<&[u8]> = g0[0..2].iter().chain(g1[0..3].iter()).copied().collect();
        assert_eq!(acc.add_shares(chosen).unwrap(), Some(secret));
    }

    #[test]
    fn two_then_three_in_two_calls() {
        let (secret, shares) = sample_shares();
        let mut acc = Accumulator::new(HmacSha256);
        let g0 = by_group(&shares, 0);
        let g1 = by_group(&shares, 1);

        assert_eq!(acc.add_shares(g0[0..2].iter().copied()).unwrap(), None);
        assert_eq!(acc.add_shares(g1[0..3].iter().copied()).unwrap(), Some(secret));
    }

    #[test]
    fn duplicates_are_idempotent() {
        let (secret, shares) = sample_shares();
        let mut acc = Accumulator::new(HmacSha256);
        let g0 = by_group(&shares, 0);
        let g1 = by_group(&shares, 1);

        assert_eq!(acc.add_shares([g0[0], g0[0]]).unwrap(), None);
        assert_eq!(
            acc.add_shares(g0[0..2].iter().chain(g1[0..2].iter()).copied())
                .unwrap(),
            None
        );
        assert_eq!(acc.add_shares(g1[0..3].iter().copied()).unwrap(), Some(secret));
    }

    #[test]
    fn straddling_groups_per_call() {
        let (secret, shares) = sample_shares();
        let mut acc = Accumulator::new(HmacSha256);
        let g0 = by_group(&shares, 0);
        let g1 = by_group(&shares, 1);

        assert_eq!(acc.add_shares([g0[0], g1[0]]).unwrap(), None);
        assert_eq!(acc.add_shares([g0[1], g1[1], g1[2]]).unwrap(), Some(secret));
    }

    #[test]
    fn session_pinning_rejects_foreign_share() {
        let (_, shares) = sample_shares_seeded(11, 23);
        let (_, shares_b) = sample_shares_seeded(200, 5);
        let mut acc = Accumulator::new(HmacSha256);
        let g0 = by_group(&shares, 0);
        let foreign = by_group(&shares_b, 0);

        // The two generations draw different `id` bytes first, so the two
        // share sets are guaranteed to disagree on `id`.
        assert_ne!(
            parse_share(g0[0]).unwrap().0.id,
            parse_share(foreign[0]).unwrap().0.id
        );

        acc.add_shares([g0[0]]).unwrap();
        let err = acc.add_shares([foreign[0]]);
        assert!(matches!(err, Err(SskrError::IllegalUse(_))));
    }

    #[test]
    fn reset_then_unrelated_set_still_reconstructs() {
        let (secret, shares) = sample_shares();
        let mut acc = Accumulator::new(HmacSha256);
        let g0 = by_group(&shares, 0);

        assert_eq!(acc.add_shares([g0[0]]).unwrap(), None);
        acc.reset();

        let (secret2, shares2) = sample_shares();
        let g0b = by_group(&shares2, 0);
        let g1b = by_group(&shares2, 1);
        let chosen: Vec<&[u8]> = g0b[0..2].iter().chain(g1b[0..3].iter()).copied().collect();
        assert_eq!(acc.add_shares(chosen).unwrap(), Some(secret2));
        let _ = secret;
    }

    #[test]
    fn extraneous_shares_after_group_seal_are_ignored() {
        let (secret, shares) = sample_shares();
        let mut acc = Accumulator::new(HmacSha256);
        let g0 = by_group(&shares, 0); // mt=2, n=3
        let g1 = by_group(&shares, 1);

        // Deliver all 3 group-0 shares (only 2 needed) plus group-1's threshold.
        let chosen: Vec<&[u8]> = g0.iter().copied().chain(g1[0..3].iter().copied()).collect();
        assert_eq!(acc.add_shares(chosen).unwrap(), Some(secret));
    }
}
