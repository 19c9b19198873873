//! This library converts *Breath of the Wild* mod assets built for the Wii U into the
//! binary layout the Switch expects (and back).
//!
//! # Conversion Pipeline
//!
//! Mods ship archives of archives: a SARC container holds physics packfiles, model
//! resources, and further SARCs, any of which may additionally be Yaz0-compressed.
//! Conversion walks that tree recursively:
//!
//! 1. [`convert_container`] decodes a SARC and fans [`convert_file`] out over every
//!    entry in parallel, then re-encodes the archive for the target platform.
//! 2. [`convert_file`] unwraps Yaz0 if present, classifies the entry by extension,
//!    converts the payload, and re-wraps it. Entries the converter does not
//!    recognize are reported as untouched rather than failed, since mods carry
//!    plenty of content that needs no layout change.
//! 3. Havok packfiles are re-serialized with the target platform header. The
//!    `.shksc` static compound variant embeds the byte length of its own descriptor
//!    section, which is resolved with a two-pass serialization (see the offset
//!    patcher in this crate).
//!
//! Entries never depend on their siblings, so a container converts correctly
//! regardless of completion order; the driver collects every entry's result before
//! failing the container on the first error it finds.
//!
//! ```no_run
//! use bnx_convert::{convert_file, ConvertOptions};
//!
//! fn fix_one(name: &str, data: &[u8]) -> miette::Result<()> {
//!     let options = ConvertOptions::default();
//!     match convert_file(name, data, &options)? {
//!         Some(converted) => println!("{name}: {} bytes converted", converted.len()),
//!         None => println!("{name}: no conversion needed"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod driver;
pub mod error;
pub mod options;
pub mod transform;

mod patch;

pub use classify::{classify, classify_name, Classification};
pub use driver::convert_container;
pub use error::{Error, Result};
pub use options::{ConvertOptions, Progress};
pub use transform::convert_file;

pub use bnx_havok::Platform;
