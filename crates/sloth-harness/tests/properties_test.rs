//! Property tests for the rehash loop
//!
//! These tests verify the observable guarantees of seed rehashing:
//! - Determinism: the same seed always yields the same key and counter
//! - Sensitivity: distinct seeds yield distinct keys
//! - Validity: keys are on the curve and carry the forced parity
//! - Counter monotonicity: counters tried are exactly 0, 1, 2, ...

use std::collections::HashSet;

use p256::{PublicKey, elliptic_curve::sec1::ToEncodedPoint};
use proptest::prelude::*;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sloth_harness::RecordingKdf;
use sloth_rehash::{
    HkdfSha256, P256Importer, P256Rehasher, PointEncoding, RehashConfig, Rehasher, Sec1Decoder,
    build_candidate, derivation_input, derive,
};

fn rehasher() -> P256Rehasher {
    P256Rehasher::p256(RehashConfig::default())
}

#[test]
fn prop_rehash_is_deterministic() {
    proptest!(|(seed in prop::collection::vec(any::<u8>(), 0..128))| {
        let first = rehasher().rehash(&seed).unwrap();
        let second = rehasher().rehash(&seed).unwrap();

        // PROPERTY: Determinism - same seed, same key, same counter
        prop_assert_eq!(first.key, second.key);
        prop_assert_eq!(first.counter, second.counter);
        prop_assert_eq!(first.rejections, second.rejections);
    });
}

#[test]
fn prop_key_is_valid_and_matches_forced_parity() {
    proptest!(|(seed in prop::collection::vec(any::<u8>(), 0..64))| {
        let rehashed = rehasher().rehash(&seed).unwrap();

        // Re-parsing the uncompressed form re-checks the curve equation.
        let uncompressed = rehashed.key.to_encoded_point(false);
        let reparsed = PublicKey::from_sec1_bytes(uncompressed.as_bytes()).unwrap();
        prop_assert_eq!(reparsed, rehashed.key);

        // PROPERTY: Validity - the SEC1 tag of the key is the candidate tag at
        // the accepted counter, and x is the candidate tail.
        let candidate = build_candidate(derive(&HkdfSha256, &seed, rehashed.counter).unwrap());
        let compressed = rehashed.key.to_encoded_point(true);
        prop_assert_eq!(compressed.as_bytes(), &candidate.as_bytes()[..]);
    });
}

#[test]
fn prop_counters_are_sequential() {
    proptest!(|(seed in prop::collection::vec(any::<u8>(), 0..64))| {
        let rehasher = Rehasher::new(RecordingKdf::new(HkdfSha256), Sec1Decoder, P256Importer);

        let rehashed = rehasher.rehash(&seed).unwrap();
        let calls = rehasher.kdf().calls();

        // PROPERTY: Counter monotonicity - one KDF call per counter, no skips
        prop_assert_eq!(calls.len() as u64, rehashed.attempts());
        for (index, call) in calls.iter().enumerate() {
            let counter = u32::try_from(index).unwrap();
            prop_assert_eq!(&call.ikm, &derivation_input(&seed, counter));
            prop_assert_eq!(call.counter(), Some(counter));
        }

        let rejected: Vec<u32> = rehashed.rejections.iter().map(|r| r.counter).collect();
        prop_assert_eq!(rejected, (0..rehashed.counter).collect::<Vec<_>>());
    });
}

#[test]
fn prop_compact_key_has_smaller_y() {
    proptest!(|(seed in prop::collection::vec(any::<u8>(), 0..64))| {
        let config = RehashConfig::default().with_encoding(PointEncoding::Compact);
        let compact = P256Rehasher::p256(config).rehash(&seed).unwrap();
        let sec1 = rehasher().rehash(&seed).unwrap();

        // Same candidate sequence, only the choice of y differs.
        prop_assert_eq!(compact.counter, sec1.counter);

        let point = compact.key.to_encoded_point(false);
        let negated = (-*compact.key.as_affine()).to_encoded_point(false);
        prop_assert_eq!(point.x(), negated.x());
        prop_assert!(point.y().unwrap().as_slice() < negated.y().unwrap().as_slice());
    });
}

#[test]
fn distinct_random_seeds_give_distinct_keys() {
    let rng_seed = 0x5106_u64;
    let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
    let rehasher = rehasher();
    let mut keys = HashSet::new();

    for _ in 0..1000 {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);

        let key = rehasher.rehash(&seed).unwrap().key;
        let encoded = key.to_encoded_point(true).as_bytes().to_vec();

        assert!(keys.insert(encoded), "key collision (rng seed {rng_seed:#x})");
    }
}

#[test]
fn single_bit_flip_changes_key() {
    let base = [0u8; 32];
    let base_key = rehasher().rehash(&base).unwrap().key;

    for bit in 0..256 {
        let mut seed = base;
        seed[bit / 8] ^= 1 << (bit % 8);

        assert_ne!(rehasher().rehash(&seed).unwrap().key, base_key, "bit {bit}");
    }
}

#[test]
fn seed_length_matters() {
    // Differs from the zero seed only by one trailing zero byte.
    let short = rehasher().rehash(&[0u8; 31]).unwrap().key;
    let long = rehasher().rehash(&[0u8; 32]).unwrap().key;

    assert_ne!(short, long);
}
