//! This library handles reading and writing the **Yaz0** compression wrapper used by
//! *The Legend of Zelda: Breath of the Wild* and other first-party Nintendo titles.
//!
//! # Yaz0 Stream Documentation
//!
//! Yaz0 is a run-length/back-reference scheme applied to individual files before they
//! are stored inside an archive. A compressed file is recognizable by its 4-byte magic
//! and is typically flagged with an `s`-prefixed extension (`.sbfres`, `.ssarc`, ...).
//!
//! ## File Structure
//!
//! A Yaz0 stream consists of a 16-byte header followed by the coded body.
//!
//! | Offset (bytes) | Field             | Description                                      |
//! |----------------|-------------------|--------------------------------------------------|
//! | 0x0000         | Magic number      | 4 bytes: 0x59617A30 ("Yaz0")                     |
//! | 0x0004         | Decompressed size | 4 bytes: Size of the data once decompressed      |
//! | 0x0008         | Alignment         | 4 bytes: Alignment hint for the decompressed data|
//! | 0x000C         | Reserved          | 4 bytes: Always zero                             |
//!
//! ## Coded Body
//!
//! The body is a sequence of groups. Each group starts with one *group head* byte
//! holding 8 flags, consumed from the most significant bit down. For each flag:
//!
//! - **1**: one literal byte follows; it is copied to the output verbatim.
//! - **0**: a 2-byte back-reference follows. The upper nibble of the first byte is the
//!   copy length minus 2; the remaining 12 bits are the distance minus 1 into the
//!   already-produced output. A zero nibble selects the 3-byte form, where a third
//!   byte extends the copy length by 0x12 (lengths 0x12..=0x111).
//!
//! Back-references may overlap their own output, which is how byte runs are encoded.
//! Decoding stops once the decompressed size from the header has been produced.
//!
//! ## Additional Information
//!
//! - **Endianness**: Big-endian header fields, regardless of target platform
//! - **Window**: Distances reach at most 0x1000 bytes back
//!

pub mod error;
pub mod read;
pub mod write;

pub use error::{Error, Result};
pub use read::{decompress, is_compressed};
pub use write::compress;

/// Magic number identifying a Yaz0 stream
pub const MAGIC: [u8; 4] = *b"Yaz0";

/// Size of the fixed Yaz0 header in bytes
pub const HEADER_SIZE: usize = 16;
