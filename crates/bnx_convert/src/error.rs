//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Container codec rejected the archive bytes
    #[error(transparent)]
    Container(#[from] bnx_sarc::Error),

    /// Object-graph codec rejected the packfile bytes
    #[error(transparent)]
    Graph(#[from] bnx_havok::Error),

    /// Compression codec rejected the stream
    #[error(transparent)]
    Codec(#[from] bnx_yaz0::Error),

    /// A named entry inside a container failed
    #[error("entry `{name}` failed to convert")]
    Entry {
        /// Name of the entry inside its container
        name: Box<str>,
        /// What went wrong with the entry's own payload
        #[source]
        source: Box<Error>,
    },

    /// The two serialization passes disagreed on the descriptor length
    #[error("descriptor length moved between serialization passes ({first} != {second} bytes)")]
    OffsetUnstable {
        /// Length of the placeholder pass
        first: usize,
        /// Length after patching the offset field
        second: usize,
    },

    /// Split container without the field that locates its second section
    #[error("static compound descriptor is missing its `{0}` field")]
    MissingField(&'static str),

    /// Recorded descriptor length points outside the payload
    #[error("descriptor offset {offset} exceeds the {len}-byte payload")]
    OffsetOutOfBounds {
        /// Offset recorded in the descriptor
        offset: u64,
        /// Actual payload length
        len: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
