//! Compressed point decoding.
//!
//! Turning 33 candidate bytes into a full point is the step that fails for
//! about half of all candidates. Different key stores accept different
//! compressed formats, so decoding sits behind [`PointDecoder`] and the
//! implementation is chosen once, up front, through [`PointEncoding`].
//!
//! - [`Sec1Decoder`]: SEC1 compressed form, the tag picks the y parity
//! - [`CompactDecoder`]: x-only "compact representation", the tag is ignored
//!   and the smaller of `y` and `p - y` is used
//!
//! Both produce the uncompressed X9.63 form (`0x04 || x || y`) that key
//! importers consume.

use std::{fmt, str::FromStr};

use p256::{
    AffinePoint, EncodedPoint,
    elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint},
};
use thiserror::Error;

use crate::{
    candidate::{COORDINATE_LEN, CandidateEncoding, DERIVED_LEN, TAG_EVEN_Y},
    error::RejectReason,
};

/// Length of an uncompressed X9.63 point.
pub const X963_LEN: usize = 1 + 2 * COORDINATE_LEN;

/// Leading byte of an uncompressed point.
pub const X963_TAG: u8 = 0x04;

/// Uncompressed X9.63 point encoding: `0x04 || x || y`.
///
/// Produced by a [`PointDecoder`], so it lies on the curve unless built by
/// hand through [`X963Point::from_bytes`].
#[derive(Clone, PartialEq, Eq)]
pub struct X963Point([u8; X963_LEN]);

impl X963Point {
    /// Wraps raw bytes without validation.
    pub fn from_bytes(bytes: [u8; X963_LEN]) -> Self {
        Self(bytes)
    }

    fn from_affine(point: &AffinePoint) -> Result<Self, RejectReason> {
        let encoded = point.to_encoded_point(false);
        // The identity encodes as a single byte and never fits.
        let bytes: [u8; X963_LEN] =
            encoded.as_bytes().try_into().map_err(|_| RejectReason::InvalidCurvePoint)?;
        Ok(Self(bytes))
    }

    /// The full 65-byte encoding.
    pub fn as_bytes(&self) -> &[u8; X963_LEN] {
        &self.0
    }

    /// Big-endian x-coordinate.
    pub fn x(&self) -> &[u8] {
        &self.0[1..=COORDINATE_LEN]
    }

    /// Big-endian y-coordinate.
    pub fn y(&self) -> &[u8] {
        &self.0[1 + COORDINATE_LEN..]
    }

    /// Whether the y-coordinate is odd.
    pub fn odd_y(&self) -> bool {
        self.0[X963_LEN - 1] & 1 == 1
    }

    /// SEC1 compressed form of the same point.
    pub fn to_compressed(&self) -> [u8; DERIVED_LEN] {
        let mut out = [0u8; DERIVED_LEN];
        out[0] = TAG_EVEN_Y | u8::from(self.odd_y());
        out[1..].copy_from_slice(self.x());
        out
    }
}

impl fmt::Debug for X963Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X963Point({})", hex::encode(self.0))
    }
}

/// Decodes a candidate into a curve point.
///
/// # Invariants
///
/// - A returned point satisfies the P-256 curve equation
/// - Decoding is a pure function of the candidate bytes
/// - A candidate that names no curve point yields
///   [`RejectReason::InvalidCurvePoint`], never a panic
pub trait PointDecoder {
    /// Decodes `candidate` into its uncompressed form.
    fn decode(&self, candidate: &CandidateEncoding) -> Result<X963Point, RejectReason>;
}

impl<T: PointDecoder + ?Sized> PointDecoder for Box<T> {
    fn decode(&self, candidate: &CandidateEncoding) -> Result<X963Point, RejectReason> {
        (**self).decode(candidate)
    }
}

impl<T: PointDecoder + ?Sized> PointDecoder for &T {
    fn decode(&self, candidate: &CandidateEncoding) -> Result<X963Point, RejectReason> {
        (**self).decode(candidate)
    }
}

fn decompress(compressed: &[u8]) -> Result<AffinePoint, RejectReason> {
    let encoded =
        EncodedPoint::from_bytes(compressed).map_err(|_| RejectReason::InvalidCurvePoint)?;
    Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
        .ok_or(RejectReason::InvalidCurvePoint)
}

/// SEC1 compressed point decoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sec1Decoder;

impl PointDecoder for Sec1Decoder {
    fn decode(&self, candidate: &CandidateEncoding) -> Result<X963Point, RejectReason> {
        let point = decompress(candidate.as_bytes())?;
        X963Point::from_affine(&point)
    }
}

/// Compact representation decoding (draft-jivsov-ecc-compact).
///
/// Uses only the x-coordinate. Of the two points sharing that x, the one
/// whose y is numerically smaller than `p - y` is returned. For a given seed
/// this can pick the other y than [`Sec1Decoder`] does.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactDecoder;

impl PointDecoder for CompactDecoder {
    fn decode(&self, candidate: &CandidateEncoding) -> Result<X963Point, RejectReason> {
        let mut even = [0u8; DERIVED_LEN];
        even[0] = TAG_EVEN_Y;
        even[1..].copy_from_slice(candidate.x_coordinate());

        let even_point = decompress(&even)?;
        let point = X963Point::from_affine(&even_point)?;
        let negated = X963Point::from_affine(&-even_point)?;

        // Big-endian, equal length: byte order is numeric order.
        if point.y() <= negated.y() { Ok(point) } else { Ok(negated) }
    }
}

/// Error parsing a [`PointEncoding`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown point encoding '{0}', expected 'sec1' or 'compact'")]
pub struct ParseEncodingError(String);

/// Which compressed format the key store understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointEncoding {
    /// SEC1 compressed points (tag selects y parity).
    #[default]
    Sec1Compressed,
    /// Compact representation (x only, smaller y).
    Compact,
}

impl PointEncoding {
    /// The decoder for this encoding.
    pub fn decoder(self) -> Box<dyn PointDecoder + Send + Sync> {
        match self {
            Self::Sec1Compressed => Box::new(Sec1Decoder),
            Self::Compact => Box::new(CompactDecoder),
        }
    }

    /// Stable lower-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sec1Compressed => "sec1",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for PointEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PointEncoding {
    type Err = ParseEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sec1" | "sec1-compressed" | "compressed" => Ok(Self::Sec1Compressed),
            "compact" => Ok(Self::Compact),
            _ => Err(ParseEncodingError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::candidate::{DerivedMaterial, build_candidate};

    fn candidate(bytes: [u8; DERIVED_LEN]) -> CandidateEncoding {
        build_candidate(DerivedMaterial::from_bytes(bytes))
    }

    // x from the zero-seed vector, y from the curve equation.
    const ZERO_SEED_X963: [u8; X963_LEN] = hex!(
        "049679f781c431d760ccfc87828a3b95ba3e13496dec97e3538087d5c9ca7b8e99"
        "2840e45a83f98e909dd303df444d7dcceb3d0e0a2395ce9d99fd292d85e35ab2"
    );

    #[test]
    fn sec1_decodes_even_tag() {
        let candidate =
            candidate(hex!("029679f781c431d760ccfc87828a3b95ba3e13496dec97e3538087d5c9ca7b8e99"));

        let point = Sec1Decoder.decode(&candidate).unwrap();

        assert_eq!(point.as_bytes(), &ZERO_SEED_X963);
        assert_eq!(point.as_bytes()[0], X963_TAG);
        assert!(!point.odd_y());
        assert_eq!(point.to_compressed(), *candidate.as_bytes());
    }

    #[test]
    fn sec1_odd_tag_selects_other_root() {
        let even =
            candidate(hex!("029679f781c431d760ccfc87828a3b95ba3e13496dec97e3538087d5c9ca7b8e99"));
        let odd =
            candidate(hex!("039679f781c431d760ccfc87828a3b95ba3e13496dec97e3538087d5c9ca7b8e99"));

        let even_point = Sec1Decoder.decode(&even).unwrap();
        let odd_point = Sec1Decoder.decode(&odd).unwrap();

        assert_eq!(even_point.x(), odd_point.x());
        assert_ne!(even_point.y(), odd_point.y());
        assert!(odd_point.odd_y());
    }

    #[test]
    fn rejects_x_not_on_curve() {
        // Empty seed, counter 0: a non-residue.
        let candidate =
            candidate(hex!("9295c2fcadedc208039e23e484f61fc58c91e23fda4173f66216bb67481d2b6aa4"));

        assert_eq!(Sec1Decoder.decode(&candidate), Err(RejectReason::InvalidCurvePoint));
        assert_eq!(CompactDecoder.decode(&candidate), Err(RejectReason::InvalidCurvePoint));
    }

    #[test]
    fn rejects_x_at_or_above_field_prime() {
        let mut bytes = [0xff; DERIVED_LEN];
        bytes[0] = TAG_EVEN_Y;

        assert_eq!(Sec1Decoder.decode(&candidate(bytes)), Err(RejectReason::InvalidCurvePoint));
        assert_eq!(CompactDecoder.decode(&candidate(bytes)), Err(RejectReason::InvalidCurvePoint));
    }

    #[test]
    fn compact_picks_smaller_y() {
        // "compact-4" at counter 1: SEC1 picks the even y, which is the larger root.
        let candidate =
            candidate(hex!("02b0e11f06e032f992f5f7d0f8b0ab45a88406dc5521f79d139322cd33a035c073"));

        let sec1 = Sec1Decoder.decode(&candidate).unwrap();
        let compact = CompactDecoder.decode(&candidate).unwrap();

        assert_eq!(sec1.x(), compact.x());
        assert_eq!(sec1.y(), hex!("e55e15d9de678877e91891099ee283dc4b474e9a7306bceafd2c40cefaaf1bc2"));
        assert_eq!(
            compact.y(),
            hex!("1aa1ea252198778916e76ef6611d7c23b4b8b1668cf9431502d3bf310550e43d")
        );
    }

    #[test]
    fn compact_ignores_tag() {
        let even =
            candidate(hex!("029679f781c431d760ccfc87828a3b95ba3e13496dec97e3538087d5c9ca7b8e99"));
        let odd =
            candidate(hex!("039679f781c431d760ccfc87828a3b95ba3e13496dec97e3538087d5c9ca7b8e99"));

        assert_eq!(CompactDecoder.decode(&even), CompactDecoder.decode(&odd));
    }

    #[test]
    fn encoding_selects_decoder() {
        let candidate =
            candidate(hex!("02b0e11f06e032f992f5f7d0f8b0ab45a88406dc5521f79d139322cd33a035c073"));

        assert_eq!(
            PointEncoding::Sec1Compressed.decoder().decode(&candidate),
            Sec1Decoder.decode(&candidate)
        );
        assert_eq!(
            PointEncoding::Compact.decoder().decode(&candidate),
            CompactDecoder.decode(&candidate)
        );
    }

    #[test]
    fn encoding_parses_names() {
        assert_eq!("sec1".parse::<PointEncoding>(), Ok(PointEncoding::Sec1Compressed));
        assert_eq!("SEC1".parse::<PointEncoding>(), Ok(PointEncoding::Sec1Compressed));
        assert_eq!("compact".parse::<PointEncoding>(), Ok(PointEncoding::Compact));
        assert_eq!(
            "x963".parse::<PointEncoding>(),
            Err(ParseEncodingError("x963".to_string()))
        );
        assert_eq!(PointEncoding::default(), PointEncoding::Sec1Compressed);
        assert_eq!(PointEncoding::Compact.to_string(), "compact");
    }

    #[test]
    fn debug_prints_hex() {
        let point = X963Point::from_bytes(ZERO_SEED_X963);
        assert_eq!(format!("{point:?}"), format!("X963Point({})", hex::encode(ZERO_SEED_X963)));
        assert!(format!("{point:?}").starts_with("X963Point(049679f7"));
    }
}
