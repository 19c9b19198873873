//! Types for writing SARC archives
//!

use std::io::Cursor;

use binrw::BinWrite;
use bon::Builder;
use indexmap::IndexMap;
use tracing::instrument;

use crate::error::{Error, Result};
use crate::hash_name;
use crate::types::{Endian, SarcHeader, SfatEntry, SfatHeader, SfntHeader};

/// Options for how the SARC file should be written
#[derive(Debug, Clone, Copy, Builder)]
pub struct SarcWriterOptions {
    /// Byte order to store the archive in
    #[builder(default)]
    pub endian: Endian,

    /// Smallest alignment applied to every payload; must be a power of two
    #[builder(default = 4)]
    pub min_alignment: u32,
}

impl Default for SarcWriterOptions {
    fn default() -> Self {
        Self {
            endian: Endian::default(),
            min_alignment: 4,
        }
    }
}

/// SARC archive generator
///
/// ```
/// # fn doit() -> bnx_sarc::error::Result<()>
/// # {
/// use bnx_sarc::{SarcWriter, SarcWriterOptions};
///
/// let mut sarc = SarcWriter::new(SarcWriterOptions::default());
/// sarc.insert("Actor/Physics/Npc_King.hkcl", b"payload".to_vec());
///
/// let data = sarc.to_binary()?;
/// # assert!(!data.is_empty());
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct SarcWriter {
    options: SarcWriterOptions,
    files: IndexMap<Box<str>, Vec<u8>>,
}

impl SarcWriter {
    /// Create an empty archive with the requested options.
    pub fn new(options: SarcWriterOptions) -> SarcWriter {
        SarcWriter {
            options,
            files: IndexMap::new(),
        }
    }

    /// Add a file, replacing any previous payload stored under `name`.
    pub fn insert(&mut self, name: impl Into<Box<str>>, data: Vec<u8>) {
        self.files.insert(name.into(), data);
    }

    /// Remove a file by name.
    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        self.files.shift_remove(name)
    }

    /// Number of files queued for this archive.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether any files are queued for this archive.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Serialize the archive.
    ///
    /// Entries land in the allocation table sorted by name hash, which is the order
    /// the console's binary search expects; insertion order is irrelevant on the wire.
    #[instrument(skip(self), err)]
    pub fn to_binary(&self) -> Result<Vec<u8>> {
        if !self.options.min_alignment.is_power_of_two() {
            return Err(Error::InvalidAlignment(self.options.min_alignment));
        }

        let fat = SfatHeader {
            count: self.files.len() as u16,
            ..Default::default()
        };

        let mut sorted: Vec<(&str, &[u8], u32)> = self
            .files
            .iter()
            .map(|(name, data)| (name.as_ref(), data.as_slice(), hash_name(fat.hash_multiplier, name)))
            .collect();
        sorted.sort_by_key(|&(_, _, hash)| hash);

        for pair in sorted.windows(2) {
            if pair[0].2 == pair[1].2 {
                return Err(Error::HashCollision(pair[0].0.into(), pair[1].0.into()));
            }
        }

        // Name table and relative payload positions, in hash order
        let mut names = Vec::new();
        let mut entries = Vec::with_capacity(sorted.len());
        let mut position = 0u32;
        let mut max_alignment = self.options.min_alignment;

        for &(name, data, hash) in &sorted {
            let name_offset = names.len() as u32;
            names.extend_from_slice(name.as_bytes());
            names.push(0);
            while names.len() % 4 != 0 {
                names.push(0);
            }

            let alignment = alignment_for(name, self.options.min_alignment);
            max_alignment = max_alignment.max(alignment);

            let begin = align_up(position, alignment);
            let end = begin + data.len() as u32;
            position = end;

            entries.push(SfatEntry {
                name_hash: hash,
                name_attrs: SfatEntry::NAMED | (name_offset / 4),
                data_begin: begin,
                data_end: end,
            });
        }

        let metadata_size = 0x14 + 0xC + 0x10 * entries.len() as u32 + 0x8 + names.len() as u32;
        let data_offset = align_up(metadata_size, max_alignment);

        let header = SarcHeader {
            file_size: data_offset + position,
            data_offset,
            ..Default::default()
        };

        let mut out = Cursor::new(Vec::with_capacity(header.file_size as usize));
        match self.options.endian {
            Endian::Big => {
                header.write_be(&mut out)?;
                fat.write_be(&mut out)?;
                for entry in &entries {
                    entry.write_be(&mut out)?;
                }
                SfntHeader::default().write_be(&mut out)?;
            }
            Endian::Little => {
                header.write_le(&mut out)?;
                fat.write_le(&mut out)?;
                for entry in &entries {
                    entry.write_le(&mut out)?;
                }
                SfntHeader::default().write_le(&mut out)?;
            }
        }

        let mut out = out.into_inner();
        out.extend_from_slice(&names);
        out.resize(data_offset as usize, 0);

        for (entry, &(_, data, _)) in entries.iter().zip(&sorted) {
            out.resize((data_offset + entry.data_begin) as usize, 0);
            out.extend_from_slice(data);
        }

        Ok(out)
    }
}

/// Alignment required to place `name` directly from the archive.
///
/// Covers the common cases: nested archives and model resources are mapped with page
/// granularity on console, everything else is fine at the caller's minimum.
fn alignment_for(name: &str, min: u32) -> u32 {
    let extension = name.rfind('.').map(|i| &name[i..]).unwrap_or("");
    let required = match extension {
        ".sarc" | ".pack" | ".bactorpack" | ".beventpack" | ".blarc" => 0x2000,
        ".bfres" => 0x1000,
        _ => min,
    };
    required.max(min)
}

fn align_up(value: u32, alignment: u32) -> u32 {
    (value + alignment - 1) & !(alignment - 1)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::read::Sarc;
    use crate::types::Endian;
    use crate::write::{align_up, SarcWriter, SarcWriterOptions};

    #[test]
    fn alignment_math() {
        assert_eq!(align_up(0, 4), 0);
        assert_eq!(align_up(1, 4), 4);
        assert_eq!(align_up(17, 16), 32);
        assert_eq!(align_up(0x2000, 0x2000), 0x2000);
    }

    #[test]
    fn write_empty() -> Result<()> {
        let data = SarcWriter::new(SarcWriterOptions::default()).to_binary()?;
        let sarc = Sarc::parse(&data)?;
        assert!(sarc.is_empty());
        assert_eq!(sarc.endian(), Endian::Little);
        Ok(())
    }

    #[test]
    fn roundtrip_both_endians() -> Result<()> {
        for endian in [Endian::Little, Endian::Big] {
            let mut writer = SarcWriter::new(SarcWriterOptions::builder().endian(endian).build());
            writer.insert("Actor/Physics/one.hkcl", vec![1, 2, 3, 4, 5]);
            writer.insert("Model/two.txt", b"hello world".to_vec());
            writer.insert("three.bin", Vec::new());

            let data = writer.to_binary()?;
            let sarc = Sarc::parse(&data)?;

            assert_eq!(sarc.endian(), endian);
            assert_eq!(sarc.len(), 3);
            assert_eq!(
                sarc.get("Actor/Physics/one.hkcl").map(Vec::as_slice),
                Some(&[1u8, 2, 3, 4, 5][..])
            );
            assert_eq!(
                sarc.get("Model/two.txt").map(Vec::as_slice),
                Some(&b"hello world"[..])
            );
            assert_eq!(sarc.get("three.bin").map(Vec::as_slice), Some(&[][..]));
        }
        Ok(())
    }

    #[test]
    fn roundtrip_preserves_map() -> Result<()> {
        let mut writer = SarcWriter::new(SarcWriterOptions::default());
        for i in 0..40 {
            writer.insert(format!("dir/file_{i:02}.bin"), vec![i as u8; i]);
        }

        let parsed = Sarc::parse(&writer.to_binary()?)?;
        let reencoded = {
            let mut second = SarcWriter::new(SarcWriterOptions::default());
            for (name, data) in parsed.files() {
                second.insert(name, data.to_vec());
            }
            second.to_binary()?
        };

        // Stable fixed point: writing the parsed map again reproduces the bytes
        assert_eq!(writer.to_binary()?, reencoded);
        assert_eq!(parsed.len(), 40);
        Ok(())
    }

    #[test]
    fn nested_archives_get_page_alignment() -> Result<()> {
        let mut writer = SarcWriter::new(SarcWriterOptions::default());
        writer.insert("a.txt", b"xx".to_vec());
        writer.insert("inner.pack", b"yy".to_vec());

        let data = writer.to_binary()?;
        let sarc = Sarc::parse(&data)?;
        assert_eq!(sarc.get("inner.pack").map(Vec::as_slice), Some(&b"yy"[..]));

        // The nested archive's absolute position must sit on a 0x2000 boundary
        let position = data
            .windows(2)
            .rposition(|w| w == b"yy")
            .expect("payload present");
        assert_eq!(position % 0x2000, 0);
        Ok(())
    }

    #[test]
    fn rejects_bad_min_alignment() {
        let mut writer = SarcWriter::new(
            SarcWriterOptions::builder().min_alignment(12).build(),
        );
        writer.insert("a.txt", vec![0]);
        assert!(matches!(
            writer.to_binary(),
            Err(Error::InvalidAlignment(12))
        ));
    }
}
