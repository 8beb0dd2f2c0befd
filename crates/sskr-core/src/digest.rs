//! 4-byte integrity digest (spec §4.2)
//!
//! `digest4` is a stateless facade over a keyed-MAC collaborator: the first
//! 4 bytes of HMAC-SHA-256(key, data). The MAC primitive itself is treated
//! as an external collaborator per spec §6 — this crate only requires that
//! it behaves as a correct HMAC-SHA-256 — but a default implementation is
//! provided with `hmac`/`sha2`, the same pair `nostring-ccd` already pulls
//! in for its own BIP-32 tweak HMAC.

use hmac::{Hmac, Mac as HmacMacTrait};
use sha2::Sha256;

/// A keyed message authentication code collaborator.
///
/// Swap in a hardware HMAC engine on a secure-element target; [`HmacSha256`]
/// is the default, software implementation.
pub trait Mac {
    fn mac(&self, key: &[u8], data: &[u8]) -> [u8; 32];
}

/// `hmac` + `sha2`-backed [`Mac`] implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct HmacSha256;

impl Mac for HmacSha256 {
    fn mac(&self, key: &[u8], data: &[u8]) -> [u8; 32] {
        // HMAC-SHA-256 accepts any key length, so this never fails.
        let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key length");
        mac.update(data);
        mac.finalize().into_bytes().into()
    }
}

/// First 4 bytes of HMAC-SHA-256(key, data).
pub fn digest4(m: &impl Mac, key: &[u8], data: &[u8]) -> [u8; 4] {
    let full = m.mac(key, data);
    [full[0], full[1], full[2], full[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest4_is_deterministic() {
        let key = b"a random key of arbitrary length";
        let data = b"the payload being protected";
        assert_eq!(digest4(&HmacSha256, key, data), digest4(&HmacSha256, key, data));
    }

    #[test]
    fn digest4_changes_with_key_or_data() {
        let data = b"payload";
        let d1 = digest4(&HmacSha256, b"key one", data);
        let d2 = digest4(&HmacSha256, b"key two", data);
        assert_ne!(d1, d2);

        let key = b"shared key";
        let d3 = digest4(&HmacSha256, key, b"payload a");
        let d4 = digest4(&HmacSha256, key, b"payload b");
        assert_ne!(d3, d4);
    }

    #[test]
    fn digest4_is_first_four_bytes_of_full_hmac() {
        let key = b"k";
        let data = b"d";
        let full = HmacSha256.mac(key, data);
        assert_eq!(digest4(&HmacSha256, key, data), full[0..4]);
    }
}
