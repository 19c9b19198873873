//! Parallel conversion of whole containers.

use bnx_havok::Platform;
use bnx_sarc::{Endian, Sarc, SarcWriter, SarcWriterOptions};
use rayon::prelude::*;
use tracing::{error, instrument};

use crate::error::{Error, Result};
use crate::options::ConvertOptions;
use crate::transform::convert_file;

/// Convert every entry of a SARC container and re-encode it for the target
/// platform.
///
/// Entries are converted concurrently; each task owns its entry's bytes and writes
/// back only under its own key, into a fresh archive rather than the one being
/// iterated. Every entry runs to completion before failures are acted on, so one
/// bad entry cannot leave siblings half-processed. The container either converts
/// wholly or not at all.
///
/// Nested archives re-enter this function from their entry's task; rayon's work
/// stealing keeps the recursive fan-out on the same bounded pool without risking
/// starvation.
#[instrument(skip(data, options), err)]
pub fn convert_container(data: &[u8], options: &ConvertOptions) -> Result<Vec<u8>> {
    let sarc = Sarc::parse(data)?;

    let entries: Vec<(&str, &[u8])> = sarc.files().collect();
    let results: Vec<Result<Option<Vec<u8>>>> = entries
        .par_iter()
        .map(|&(name, payload)| {
            convert_file(name, payload, options).map_err(|source| Error::Entry {
                name: name.into(),
                source: Box::new(source),
            })
        })
        .collect();

    let mut writer = SarcWriter::new(
        SarcWriterOptions::builder()
            .endian(target_endian(options.platform))
            .build(),
    );

    let mut failure = None;
    for (&(name, payload), result) in entries.iter().zip(results) {
        match result {
            Ok(Some(converted)) => writer.insert(name, converted),
            Ok(None) => writer.insert(name, payload.to_vec()),
            Err(error) => {
                error!("{error}");
                // First failure aborts the container; later ones are only logged
                failure.get_or_insert(error);
            }
        }
    }

    if let Some(error) = failure {
        return Err(error);
    }

    Ok(writer.to_binary()?)
}

fn target_endian(platform: Platform) -> Endian {
    if platform.is_little_endian() {
        Endian::Little
    } else {
        Endian::Big
    }
}
