//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`std::string::FromUtf8Error`]
    #[error(transparent)]
    UTF8Error(#[from] std::string::FromUtf8Error),

    /// data is not a havok packfile
    #[error("data is not a havok packfile")]
    InvalidMagic,

    /// packfile layout is not one this crate knows how to read
    #[error("unsupported packfile layout (pointer size {pointer_size}, little endian flag {endian_flag})")]
    UnsupportedLayout {
        /// Pointer size byte from the header
        pointer_size: u8,
        /// Endianness byte from the header
        endian_flag: u8,
    },

    /// packfile version is not one this crate knows how to read
    #[error("unsupported packfile version {0}")]
    UnsupportedVersion(u32),

    /// packfile data ended unexpectedly
    #[error("packfile data ended unexpectedly")]
    Truncated,

    /// value tag is not part of the format
    #[error("unknown value tag 0x{0:02X}")]
    UnknownTag(u8),

    /// name reference points outside the name section
    #[error("name reference {0} is out of range")]
    InvalidNameRef(u32),

    /// object reference points outside the file
    #[error("object reference {0} is out of range")]
    DanglingReference(u32),

    /// integer does not fit the 32-bit pointer encoding
    #[error("integer value does not fit the target's 32-bit encoding")]
    ValueOverflow,
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
