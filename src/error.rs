//! Error types for qr_vss

use thiserror::Error;

/// Why a reconstructed grid yielded no QR payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QrMiss {
    /// Grid smaller than a version 1 symbol
    #[error("image {width}x{height} is smaller than the smallest QR symbol")]
    TooSmall {
        /// Grid width
        width: usize,
        /// Grid height
        height: usize,
    },

    /// Detector found no candidate symbol
    #[error("no QR symbol detected")]
    NoSymbol,

    /// Candidates found but none decoded
    #[error("QR symbol detected but could not be decoded: {0}")]
    Undecodable(String),
}

/// Errors raised by the share pipeline
#[derive(Error, Debug)]
pub enum VssError {
    /// Image bytes could not be decoded
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Zero-area source or target
    #[error("Image has zero area")]
    EmptyImage,

    /// Grids in one XOR disagree in size
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        /// Size of the reference grid
        expected: (usize, usize),
        /// Size of the other grid
        actual: (usize, usize),
    },

    /// Reconstruction produced no readable QR payload
    #[error("QR not found: {0}")]
    QrNotFound(#[from] QrMiss),

    /// Entropy source failed
    #[error("Random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    /// Empty, duplicate or path-like student id
    #[error("Invalid student id {0:?}")]
    InvalidStudentId(String),

    /// Text did not fit a QR symbol
    #[error("QR encode error: {0}")]
    QrEncode(String),

    /// Raster encoding failed
    #[error("Image write error: {0}")]
    ImageWrite(String),

    /// ZIP packaging failed
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Underlying I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for this crate
pub type Result<T> = std::result::Result<T, VssError>;
