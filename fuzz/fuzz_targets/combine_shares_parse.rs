#![no_main]

use libfuzzer_sys::fuzz_target;
use sskr_core::digest::HmacSha256;
use sskr_core::sskr::Accumulator;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary bytes in as a single share record. add_shares must
    // never panic — it should always return Ok or Err.
    let mut acc = Accumulator::new(HmacSha256);
    let _ = acc.add_shares([data]);

    // Split the input in half and feed it across two calls, exercising the
    // session-pinning and bucket-insert paths against unrelated garbage.
    let mut acc2 = Accumulator::new(HmacSha256);
    if data.len() >= 2 {
        let mid = data.len() / 2;
        let _ = acc2.add_shares([&data[..mid]]);
        let _ = acc2.add_shares([&data[mid..]]);
    }
});
