//! Byte encodings of curve points.
//!
//! Points are written with arkworks' canonical serialization, either compressed
//! (x coordinate plus a sign flag) or raw (both coordinates). A single point can
//! be decoded without knowing its form: the two sizes differ, so the length of
//! the input selects the decoder. Point streams carry a one-byte form tag and a
//! little-endian `u32` count ahead of the points.

use std::io::{Read, Write};

use ark_ec::AffineRepr;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde::{Deserialize, Serialize};

use crate::error::CurveError;

/// Wire form of an encoded point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointEncoding {
    Compressed,
    Raw,
}

impl PointEncoding {
    fn tag(self) -> u8 {
        match self {
            PointEncoding::Compressed => 0,
            PointEncoding::Raw => 1,
        }
    }

    fn from_tag(tag: u8) -> Result<Self, CurveError> {
        match tag {
            0 => Ok(PointEncoding::Compressed),
            1 => Ok(PointEncoding::Raw),
            other => Err(CurveError::UnknownEncoding(other)),
        }
    }

    /// Size in bytes of one point of type `P` in this form.
    pub fn point_size<P: AffineRepr>(self) -> usize {
        match self {
            PointEncoding::Compressed => P::zero().compressed_size(),
            PointEncoding::Raw => P::zero().uncompressed_size(),
        }
    }
}

/// Serializes `point` in the requested form.
pub fn encode_point<P: AffineRepr>(point: &P, encoding: PointEncoding) -> Result<Vec<u8>, CurveError> {
    let mut bytes = Vec::with_capacity(encoding.point_size::<P>());
    match encoding {
        PointEncoding::Compressed => point.serialize_compressed(&mut bytes),
        PointEncoding::Raw => point.serialize_uncompressed(&mut bytes),
    }
    .map_err(CurveError::Serialization)?;
    Ok(bytes)
}

/// Deserializes a point, detecting its form from the input length.
///
/// The decoded point is checked to be on the curve and in the prime-order
/// subgroup.
pub fn decode_point<P: AffineRepr>(bytes: &[u8]) -> Result<P, CurveError> {
    let compressed = PointEncoding::Compressed.point_size::<P>();
    let raw = PointEncoding::Raw.point_size::<P>();

    let point = if bytes.len() == compressed {
        P::deserialize_compressed(bytes).map_err(CurveError::Serialization)?
    } else if bytes.len() == raw {
        P::deserialize_uncompressed(bytes).map_err(CurveError::Serialization)?
    } else {
        return Err(CurveError::InvalidLength {
            len: bytes.len(),
            compressed,
            raw,
        });
    };
    Ok(point)
}

/// Writes a tagged, counted sequence of points. Returns the number of bytes written.
pub fn write_points<P: AffineRepr, W: Write>(
    mut writer: W,
    points: &[P],
    encoding: PointEncoding,
) -> Result<usize, CurveError> {
    let count = u32::try_from(points.len()).map_err(|_| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "too many points in stream")
    })?;

    writer.write_all(&[encoding.tag()])?;
    writer.write_all(&count.to_le_bytes())?;
    let mut written = 5;
    for point in points {
        let bytes = encode_point(point, encoding)?;
        writer.write_all(&bytes)?;
        written += bytes.len();
    }
    Ok(written)
}

/// Reads a sequence produced by [`write_points`]. Returns the points and the
/// number of bytes consumed.
pub fn read_points<P: AffineRepr, R: Read>(mut reader: R) -> Result<(Vec<P>, usize), CurveError> {
    let mut header = [0u8; 5];
    reader.read_exact(&mut header)?;
    let encoding = PointEncoding::from_tag(header[0])?;
    let count = u32::from_le_bytes([header[1], header[2], header[3], header[4]]) as usize;

    let size = encoding.point_size::<P>();
    let mut buf = vec![0u8; size];
    let mut points = Vec::with_capacity(count.min(1 << 16));
    for _ in 0..count {
        reader.read_exact(&mut buf)?;
        let point = match encoding {
            PointEncoding::Compressed => P::deserialize_compressed(buf.as_slice()),
            PointEncoding::Raw => P::deserialize_uncompressed(buf.as_slice()),
        }
        .map_err(CurveError::Serialization)?;
        points.push(point);
    }
    Ok((points, header.len() + count * size))
}

/// A point together with its encoding, suitable for embedding in serde formats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPoint {
    pub encoding: PointEncoding,
    pub bytes: Vec<u8>,
}

impl EncodedPoint {
    pub fn new<P: AffineRepr>(point: &P, encoding: PointEncoding) -> Result<Self, CurveError> {
        Ok(Self {
            encoding,
            bytes: encode_point(point, encoding)?,
        })
    }

    pub fn decode<P: AffineRepr>(&self) -> Result<P, CurveError> {
        decode_point(&self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Affine, ScalarField};
    use ark_ec::CurveGroup;
    use proptest::prelude::*;

    fn point_from_seed(seed: u64) -> Affine {
        (Affine::generator() * ScalarField::from(seed)).into_affine()
    }

    #[test]
    fn test_sizes_differ() {
        let compressed = PointEncoding::Compressed.point_size::<Affine>();
        let raw = PointEncoding::Raw.point_size::<Affine>();
        assert_eq!(compressed, 96);
        assert_eq!(raw, 192);
    }

    #[test]
    fn test_identity_round_trips() {
        let o = Affine::identity();
        for encoding in [PointEncoding::Compressed, PointEncoding::Raw] {
            let bytes = encode_point(&o, encoding).unwrap();
            assert_eq!(decode_point::<Affine>(&bytes).unwrap(), o);
        }
    }

    #[test]
    fn test_decode_rejects_bad_length() {
        let err = decode_point::<Affine>(&[0u8; 17]).unwrap_err();
        assert!(matches!(err, CurveError::InvalidLength { len: 17, .. }));
    }

    #[test]
    fn test_decode_rejects_invalid_coordinates() {
        let raw = PointEncoding::Raw.point_size::<Affine>();
        let err = decode_point::<Affine>(&vec![0xff; raw]).unwrap_err();
        assert!(matches!(err, CurveError::Serialization(_)));

        let mut stream = vec![PointEncoding::Raw.tag(), 1, 0, 0, 0];
        stream.extend(vec![0xff; raw]);
        let err = read_points::<Affine, _>(stream.as_slice()).unwrap_err();
        assert!(matches!(err, CurveError::Serialization(_)));
    }

    #[test]
    fn test_read_rejects_unknown_tag() {
        let stream = [7u8, 0, 0, 0, 0];
        let err = read_points::<Affine, _>(&stream[..]).unwrap_err();
        assert!(matches!(err, CurveError::UnknownEncoding(7)));
    }

    #[test]
    fn test_encoded_point_bincode() {
        let p = point_from_seed(1234);
        let encoded = EncodedPoint::new(&p, PointEncoding::Compressed).unwrap();
        let bytes = bincode::serialize(&encoded).unwrap();
        let back: EncodedPoint = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, encoded);
        assert_eq!(back.decode::<Affine>().unwrap(), p);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn test_point_stream_round_trip(seeds in proptest::collection::vec(any::<u64>(), 0..6), raw in any::<bool>()) {
            let encoding = if raw { PointEncoding::Raw } else { PointEncoding::Compressed };
            let points: Vec<Affine> = seeds.iter().map(|s| point_from_seed(*s)).collect();

            let mut buf = Vec::new();
            let written = write_points(&mut buf, &points, encoding).unwrap();
            prop_assert_eq!(written, buf.len());

            let (decoded, read) = read_points::<Affine, _>(buf.as_slice()).unwrap();
            prop_assert_eq!(read, written);
            prop_assert_eq!(decoded, points);
        }

        #[test]
        fn test_both_forms_decode_to_same_point(seed in any::<u64>()) {
            let p = point_from_seed(seed);
            let compressed = encode_point(&p, PointEncoding::Compressed).unwrap();
            let raw = encode_point(&p, PointEncoding::Raw).unwrap();
            prop_assert_eq!(decode_point::<Affine>(&compressed).unwrap(), p);
            prop_assert_eq!(decode_point::<Affine>(&raw).unwrap(), p);
        }
    }
}
