//! Error types for point encoding.

use ark_serialize::SerializationError;

/// Errors raised while encoding or decoding curve points.
#[derive(Debug, thiserror::Error)]
pub enum CurveError {
    /// The byte string matches neither the compressed nor the raw point size.
    #[error("encoded point has {len} bytes, expected {compressed} (compressed) or {raw} (raw)")]
    InvalidLength {
        len: usize,
        compressed: usize,
        raw: usize,
    },
    /// A point stream header carried an encoding tag we do not know.
    #[error("unknown point encoding tag {0:#04x}")]
    UnknownEncoding(u8),
    #[error("point serialization failed: {0}")]
    Serialization(SerializationError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
