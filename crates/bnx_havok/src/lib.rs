//! This library handles reading and writing the **packfile** serialization of Havok
//! physics object graphs as shipped with *The Legend of Zelda: Breath of the Wild*.
//!
//! # Packfile Format Documentation
//!
//! A packfile is a platform-specific snapshot of linked physics objects: cloth setups,
//! rigid bodies, navmesh data, static compound scenes. The same logical graph
//! serializes to different bytes per platform because pointer width and byte order
//! are baked into the layout, which is exactly why mods built for one console must
//! be re-serialized for another.
//!
//! ## File Structure
//!
//! A packfile consists of a fixed 48-byte header, an optional alignment pad, a name
//! section, and the object data section.
//!
//! | Offset (bytes) | Field              | Description                                          |
//! |----------------|--------------------|------------------------------------------------------|
//! | 0x0000         | Magic number       | 8 bytes: 0x57E0E057, 0x10C0C010 (endian-agnostic)    |
//! | 0x0008         | Pointer Size       | 1 byte: 4 (Wii U) or 8 (Switch)                      |
//! | 0x0009         | Little Endian      | 1 byte: 0 (Wii U) or 1 (Switch)                      |
//! | 0x000A         | Reuse Padding      | 1 byte: Always zero                                  |
//! | 0x000B         | Base Class Flag    | 1 byte: Always zero                                  |
//! | 0x000C         | User Tag           | 4 bytes                                              |
//! | 0x0010         | Version            | 4 bytes: Fixed value 8                               |
//! | 0x0014         | Object Count       | 4 bytes: Number of objects in the data section       |
//! | 0x0018         | Name Section Size  | 4 bytes: Size of the name section, padding included  |
//! | 0x001C         | Data Section Size  | 4 bytes: Size of the object data section             |
//! | 0x0020         | Section Offset     | 2 bytes, signed: Alignment pad inserted after header |
//! | 0x0022         | Reserved           | 14 bytes: Zero                                       |
//!
//! The magic pair reads identically in both byte orders; the layout bytes at 0x08
//! decide how the rest of the file is interpreted. When **Section Offset** is
//! positive, that many `0xFF` bytes follow the header before the name section; this
//! is how a graph serialized as a secondary section gets pushed onto its 16-byte
//! boundary.
//!
//! ### Name Section
//!
//! A deduplicated string table holding class and member names: an entry count,
//! then each string as a 4-byte length followed by its UTF-8 bytes. The whole
//! section is padded to a 16-byte boundary with `0xFF`.
//!
//! ### Data Section
//!
//! Objects in graph order; object 0 is the root. Each object stores its class name
//! reference, a member count, and its members as (name reference, tagged value):
//!
//! | Tag  | Value     | Payload                                                       |
//! |------|-----------|---------------------------------------------------------------|
//! | 0x00 | Null      | none                                                          |
//! | 0x01 | Bool      | 1 byte                                                        |
//! | 0x02 | UInt      | pointer-sized unsigned integer                                |
//! | 0x03 | Int       | pointer-sized signed integer                                  |
//! | 0x04 | Real      | 4-byte IEEE float                                             |
//! | 0x05 | Str       | 4-byte length, UTF-8 bytes, zero-padded to pointer width      |
//! | 0x06 | Ref       | 4-byte index of another object in this file                   |
//! | 0x07 | Array     | 4-byte count, then that many tagged values                    |
//!
//! Integers always occupy the full pointer width, so rewriting a field value never
//! changes an object's serialized size; only retargeting the platform does.
//!
//! ## Additional Information
//!
//! - **Trailing bytes**: A parser consumes exactly the bytes its header describes;
//!   content following the data section belongs to the next section of the enclosing
//!   file and is ignored
//! - **Endianness**: Declared per file, see the layout bytes
//!

pub mod error;
pub mod read;
pub mod types;
pub mod write;

pub use error::{Error, Result};
pub use types::{HkGraph, HkObject, HkValue, PackHeader, Platform};
pub use write::to_binary;

/// Magic pair identifying a packfile; reads the same in either byte order
pub const MAGIC: [u8; 8] = [0x57, 0xE0, 0xE0, 0x57, 0x10, 0xC0, 0xC0, 0x10];

/// Packfile version emitted and accepted by this crate
pub const VERSION: u32 = 8;

/// Size of the fixed packfile header in bytes
pub const HEADER_SIZE: usize = 48;
