//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// data is not a yaz0 stream
    #[error("data is not a yaz0 stream")]
    InvalidStream,

    /// yaz0 stream ended before the promised size was produced
    #[error("yaz0 stream ended before the promised size was produced")]
    Truncated,

    /// back-reference reaches behind the start of the output
    #[error("back-reference distance {distance} exceeds the {produced} bytes decoded so far")]
    InvalidDistance {
        /// Distance of the offending back-reference
        distance: usize,
        /// Bytes produced when it was encountered
        produced: usize,
    },

    /// decoded size differs from the size recorded in the header
    #[error("decoded {actual} bytes but the header promised {expected}")]
    SizeMismatch {
        /// Size recorded in the stream header
        expected: usize,
        /// Size actually produced by decoding
        actual: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
