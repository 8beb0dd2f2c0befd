#![no_main]

use libfuzzer_sys::fuzz_target;
use sskr_core::gf256::interpolate;

fuzz_target!(|data: &[u8]| {
    // Interpret the input as a sequence of (x, y) byte pairs. Pairwise-
    // distinct x is interpolate's documented precondition, so drop
    // duplicates here rather than fuzzing a caller contract violation.
    if data.len() < 2 {
        return;
    }
    let x_star = data[0];
    let mut points: Vec<(u8, u8)> = Vec::new();
    for chunk in data[1..].chunks_exact(2) {
        if points.iter().any(|&(x, _)| x == chunk[0]) {
            continue;
        }
        points.push((chunk[0], chunk[1]));
    }
    if points.is_empty() {
        return;
    }
    let _ = interpolate(x_star, &points);
});
