//! Fuzz target for seed rehashing
//!
//! Any byte string is a valid seed, so rehashing must never fail or panic.
//!
//! # Strategy
//!
//! - Arbitrary seeds of any length, including empty
//! - Both point encodings
//! - Single attempts at arbitrary counters, including `u32::MAX`
//!
//! # Invariants
//!
//! - Rehash without a ceiling ALWAYS returns a key
//! - The key's SEC1 tag and x equal the candidate at the accepted counter
//!   (SEC1 encoding)
//! - Every rejection precedes the accepted counter, in order, with no gaps
//! - A single attempt is deterministic at every counter

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use sloth_rehash::{
    Attempt, HkdfSha256, MAX_RECORDED_REJECTIONS, P256Rehasher, PointEncoding, RehashConfig,
    build_candidate, derive,
};

#[derive(Debug, Arbitrary)]
struct Input {
    seed: Vec<u8>,
    compact: bool,
    probe_counter: u32,
}

fuzz_target!(|input: Input| {
    let encoding =
        if input.compact { PointEncoding::Compact } else { PointEncoding::Sec1Compressed };
    let rehasher = P256Rehasher::p256(RehashConfig::default().with_encoding(encoding));

    let rehashed = match rehasher.rehash(&input.seed) {
        Ok(rehashed) => rehashed,
        Err(e) => panic!("rehash failed without a ceiling: {e}"),
    };

    for (index, rejection) in rehashed.rejections.iter().enumerate() {
        assert_eq!(rejection.counter as usize, index);
    }
    assert_eq!(
        rehashed.rejections.len(),
        (rehashed.counter as usize).min(MAX_RECORDED_REJECTIONS)
    );

    let candidate = match derive(&HkdfSha256, &input.seed, rehashed.counter) {
        Ok(derived) => build_candidate(derived),
        Err(e) => panic!("derive failed: {e}"),
    };
    let compressed = rehashed.key.to_encoded_point(true);
    assert_eq!(&compressed.as_bytes()[1..], candidate.x_coordinate());
    if encoding == PointEncoding::Sec1Compressed {
        assert_eq!(compressed.as_bytes()[0], candidate.tag());
    }

    let first = rehasher.attempt(&input.seed, input.probe_counter);
    let second = rehasher.attempt(&input.seed, input.probe_counter);
    match (first, second) {
        (Ok(Attempt::Found(a)), Ok(Attempt::Found(b))) => assert_eq!(a, b),
        (Ok(Attempt::Rejected(a)), Ok(Attempt::Rejected(b))) => assert_eq!(a, b),
        (a, b) => panic!("attempt not deterministic: {a:?} vs {b:?}"),
    }
});
