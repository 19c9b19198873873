//! Conversion of a single logical file.

use std::borrow::Cow;

use tracing::instrument;

use crate::classify::{classify_name, Classification};
use crate::driver::convert_container;
use crate::error::Result;
use crate::options::ConvertOptions;
use crate::patch::{convert_compound, convert_packfile};

/// Payloads shorter than this after decompression are stub entries some archives
/// legitimately contain; they carry nothing convertible
const MIN_PAYLOAD: usize = 4;

/// Convert one file's bytes for the target platform.
///
/// Returns `Ok(None)` when the file needs no conversion (unrecognized extensions
/// and stub payloads), in which case the caller must keep the original bytes. A
/// `Some` result is the full replacement payload, re-wrapped in Yaz0 iff the input
/// was wrapped.
#[instrument(skip(data, options), err)]
pub fn convert_file(name: &str, data: &[u8], options: &ConvertOptions) -> Result<Option<Vec<u8>>> {
    let (payload, was_compressed): (Cow<[u8]>, bool) = if bnx_yaz0::is_compressed(data) {
        (bnx_yaz0::decompress(data)?.into(), true)
    } else {
        (data.into(), false)
    };

    if payload.len() < MIN_PAYLOAD {
        return Ok(None);
    }

    let classification = classify_name(name);
    let converted = match classification {
        Classification::Unrecognized => return Ok(None),
        Classification::Physics { aligned } => convert_packfile(&payload, aligned, options)?,
        Classification::PhysicsSplit => convert_compound(&payload, options)?,
        Classification::Mesh => payload.into_owned(),
        Classification::Archive => convert_container(&payload, options)?,
    };

    if !matches!(classification, Classification::Archive) {
        options.touched(name);
    }

    Ok(Some(if was_compressed {
        bnx_yaz0::compress(&converted, 0)
    } else {
        converted
    }))
}
