//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Transparent wrapper for [`std::str::Utf8Error`]
    #[error(transparent)]
    Utf8Error(#[from] std::str::Utf8Error),

    /// file is an invalid sarc archive
    #[error("file is an invalid sarc archive")]
    InvalidArchive,

    /// archive stores the same name twice
    #[error("archive stores `{0}` twice")]
    DuplicateName(Box<str>),

    /// entry has no name attribute
    #[error("entry with hash 0x{0:08X} has no name")]
    NamelessEntry(u32),

    /// two names hash to the same SFAT key
    #[error("`{0}` and `{1}` hash to the same SFAT key")]
    HashCollision(Box<str>, Box<str>),

    /// requested alignment is not a power of two
    #[error("alignment {0} is not a power of two")]
    InvalidAlignment(u32),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
