//! Types for reading SARC archives
//!

use std::io::Cursor;

use binrw::BinRead;
use derive_more::Deref;
use indexmap::IndexMap;
use tracing::instrument;

use crate::{
    error::{Error, Result},
    hash_name,
    types::{Endian, SarcHeader, SfatEntry, SfatHeader, SfntHeader},
};

/// Parsed SARC archive
///
/// Entries keep the order in which the allocation table listed them. The struct
/// dereferences to its entry map, so the usual map accessors are available directly.
///
/// ```no_run
/// fn list_sarc_contents(data: &[u8]) -> bnx_sarc::error::Result<()> {
///     let sarc = bnx_sarc::Sarc::parse(data)?;
///
///     for (name, payload) in sarc.files() {
///         println!("{name}: {} bytes", payload.len());
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deref)]
pub struct Sarc {
    endian: Endian,
    #[deref]
    files: IndexMap<Box<str>, Vec<u8>>,
}

impl Sarc {
    /// Parse a SARC archive, collecting the files it contains.
    #[instrument(skip(data), err)]
    pub fn parse(data: &[u8]) -> Result<Sarc> {
        let endian = match data.get(6..8) {
            Some([0xFE, 0xFF]) => Endian::Big,
            Some([0xFF, 0xFE]) => Endian::Little,
            _ => return Err(Error::InvalidArchive),
        };

        let mut reader = Cursor::new(data);
        let (header, fat) = Self::read_headers(&mut reader, endian).map_err(|_| Error::InvalidArchive)?;

        let mut entries = Vec::with_capacity(fat.count as usize);
        for _ in 0..fat.count {
            let entry = Self::read_entry(&mut reader, endian).map_err(|_| Error::InvalidArchive)?;
            entries.push(entry);
        }

        let _names_header = match endian {
            Endian::Big => SfntHeader::read_be(&mut reader),
            Endian::Little => SfntHeader::read_le(&mut reader),
        }
        .map_err(|_| Error::InvalidArchive)?;

        let names_start = reader.position() as usize;
        let data_offset = header.data_offset as usize;
        let names = data
            .get(names_start..data_offset.min(data.len()))
            .ok_or(Error::InvalidArchive)?;

        let mut files = IndexMap::with_capacity(fat.count as usize);
        for entry in entries {
            let name_offset = entry.name_offset().ok_or(Error::NamelessEntry(entry.name_hash))?;
            let name = Self::read_name(names, name_offset)?;

            if hash_name(fat.hash_multiplier, name) != entry.name_hash {
                return Err(Error::InvalidArchive);
            }

            let payload = data
                .get(data_offset + entry.data_begin as usize..data_offset + entry.data_end as usize)
                .ok_or(Error::InvalidArchive)?;

            if files.insert(Box::from(name), payload.to_vec()).is_some() {
                return Err(Error::DuplicateName(name.into()));
            }
        }

        Ok(Sarc { endian, files })
    }

    /// Byte order the archive was stored in
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Returns an iterator over the named entries of this archive.
    pub fn files(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files.iter().map(|(name, data)| (name.as_ref(), data.as_slice()))
    }

    /// Consume the archive, returning the entry map.
    pub fn into_files(self) -> IndexMap<Box<str>, Vec<u8>> {
        self.files
    }

    fn read_headers(reader: &mut Cursor<&[u8]>, endian: Endian) -> Result<(SarcHeader, SfatHeader)> {
        Ok(match endian {
            Endian::Big => (SarcHeader::read_be(reader)?, SfatHeader::read_be(reader)?),
            Endian::Little => (SarcHeader::read_le(reader)?, SfatHeader::read_le(reader)?),
        })
    }

    fn read_entry(reader: &mut Cursor<&[u8]>, endian: Endian) -> Result<SfatEntry> {
        Ok(match endian {
            Endian::Big => SfatEntry::read_be(reader)?,
            Endian::Little => SfatEntry::read_le(reader)?,
        })
    }

    fn read_name(names: &[u8], offset: usize) -> Result<&str> {
        let tail = names.get(offset..).ok_or(Error::InvalidArchive)?;
        let end = tail
            .iter()
            .position(|&b| b == 0)
            .ok_or(Error::InvalidArchive)?;
        Ok(std::str::from_utf8(&tail[..end])?)
    }
}
