use std::fs::File;
use std::path::Path;

use miette::{Context, IntoDiagnostic, Result};
use xz2::read::XzDecoder;
use xz2::write::XzEncoder;

pub mod convert;

#[derive(clap::Subcommand)]
pub enum PackCommands {
    /// Convert every asset inside a packaged mod
    Convert(convert::ConvertArgs),
}

impl PackCommands {
    pub fn handle(&self) -> Result<()> {
        match self {
            PackCommands::Convert(convert) => convert.handle(),
        }
    }
}

/// Unpack a mod package into `target`.
pub(crate) fn extract_package(archive: &Path, target: &Path) -> Result<()> {
    let file = File::open(archive)
        .into_diagnostic()
        .context(format!("path: {}", archive.display()))?;

    tar::Archive::new(XzDecoder::new(file))
        .unpack(target)
        .into_diagnostic()
        .context(format!("unpacking {}", archive.display()))
}

/// Pack the directory tree under `source` into a mod package at `archive`.
///
/// Compression runs at the highest preset; packages are written once and downloaded
/// many times.
pub(crate) fn write_package(source: &Path, archive: &Path) -> Result<()> {
    let file = File::create(archive)
        .into_diagnostic()
        .context(format!("creating {}", archive.display()))?;

    let mut package = tar::Builder::new(XzEncoder::new(file, 9));
    package
        .append_dir_all(".", source)
        .into_diagnostic()
        .context("packing converted files")?;

    package
        .into_inner()
        .into_diagnostic()?
        .finish()
        .into_diagnostic()
        .context("finalizing mod package")?;

    Ok(())
}
