//! Base types for structure of SARC file.

use binrw::{BinRead, BinWrite};

/// Byte order of a SARC archive
///
/// Wii U archives are big-endian, Switch archives little-endian. The variant is
/// derived from the byte order mark when parsing and selects the wire order when
/// writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    /// Big-endian (Wii U)
    Big,
    /// Little-endian (Switch)
    #[default]
    Little,
}

/// The byte order mark as stored in the file's own endianness
pub const BOM: u16 = 0xFEFF;

/// SARC file header
///
/// Always starts with "SARC" followed by the fixed header size. The byte order mark
/// decides how every other multi-byte field of the archive is read.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(magic = b"SARC")]
pub struct SarcHeader {
    /// Size of this header, fixed at 0x14
    pub header_size: u16,

    /// Byte order mark, 0xFEFF in the file's own endianness
    pub bom: u16,

    /// Total size of the archive in bytes
    pub file_size: u32,

    /// Offset from the start of the file to the data region
    pub data_offset: u32,

    /// Format version, fixed at 0x0100
    pub version: u16,

    /// Reserved, zero
    pub reserved: u16,
}

impl Default for SarcHeader {
    fn default() -> Self {
        Self {
            header_size: 0x14,
            bom: BOM,
            file_size: 0,
            data_offset: 0,
            version: 0x0100,
            reserved: 0,
        }
    }
}

/// SFAT section header
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(magic = b"SFAT")]
pub struct SfatHeader {
    /// Size of this header, fixed at 0x0C
    pub header_size: u16,

    /// Number of file entries that follow
    pub count: u16,

    /// Multiplier for the name hash, always 0x65
    pub hash_multiplier: u32,
}

impl Default for SfatHeader {
    fn default() -> Self {
        Self {
            header_size: 0x0C,
            count: 0,
            hash_multiplier: 0x65,
        }
    }
}

/// SFAT file entry
///
/// Entries are stored sorted ascending by `name_hash` so the console can binary
/// search them.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
pub struct SfatEntry {
    /// Hash of the file name under the table's multiplier
    pub name_hash: u32,

    /// Bit 24 set when the entry is named; low 24 bits are the name offset
    /// into the SFNT region divided by 4
    pub name_attrs: u32,

    /// Start of the payload relative to the archive's data offset
    pub data_begin: u32,

    /// End of the payload relative to the archive's data offset
    pub data_end: u32,
}

impl SfatEntry {
    /// Flag bit marking an entry as named
    pub const NAMED: u32 = 0x0100_0000;

    /// Byte offset of this entry's name inside the SFNT name region, if any
    pub fn name_offset(&self) -> Option<usize> {
        (self.name_attrs & Self::NAMED != 0).then(|| ((self.name_attrs & 0x00FF_FFFF) * 4) as usize)
    }
}

/// SFNT section header
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(magic = b"SFNT")]
pub struct SfntHeader {
    /// Size of this header, fixed at 0x08
    pub header_size: u16,

    /// Reserved, zero
    pub reserved: u16,
}

impl Default for SfntHeader {
    fn default() -> Self {
        Self {
            header_size: 0x08,
            reserved: 0,
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::{BinRead, BinWrite};
    use pretty_assertions::assert_eq;

    use crate::error::Result;
    use crate::types::{SarcHeader, SfatEntry, SfatHeader};

    #[test]
    fn read_little_endian_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x53, 0x41, 0x52, 0x43,
            0x14, 0x00,
            0xFF, 0xFE,
            0x00, 0x01, 0x00, 0x00,
            0x40, 0x00, 0x00, 0x00,
            0x00, 0x01,
            0x00, 0x00,
        ]);

        let expected = SarcHeader {
            file_size: 0x100,
            data_offset: 0x40,
            ..Default::default()
        };

        assert_eq!(SarcHeader::read_le(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn read_big_endian_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x53, 0x41, 0x52, 0x43,
            0x00, 0x14,
            0xFE, 0xFF,
            0x00, 0x00, 0x01, 0x00,
            0x00, 0x00, 0x00, 0x40,
            0x01, 0x00,
            0x00, 0x00,
        ]);

        let expected = SarcHeader {
            file_size: 0x100,
            data_offset: 0x40,
            ..Default::default()
        };

        assert_eq!(SarcHeader::read_be(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn write_little_endian_header() -> Result<()> {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            0x53, 0x41, 0x52, 0x43,
            0x14, 0x00,
            0xFF, 0xFE,
            0x00, 0x01, 0x00, 0x00,
            0x40, 0x00, 0x00, 0x00,
            0x00, 0x01,
            0x00, 0x00,
        ];

        let header = SarcHeader {
            file_size: 0x100,
            data_offset: 0x40,
            ..Default::default()
        };

        let mut actual = Vec::new();
        header.write_le(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn read_fat_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x53, 0x46, 0x41, 0x54,
            0x0C, 0x00,
            0x02, 0x00,
            0x65, 0x00, 0x00, 0x00,
        ]);

        let expected = SfatHeader {
            count: 2,
            ..Default::default()
        };

        assert_eq!(SfatHeader::read_le(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn entry_name_offset() {
        let named = SfatEntry {
            name_attrs: SfatEntry::NAMED | 0x03,
            ..Default::default()
        };
        assert_eq!(named.name_offset(), Some(12));

        let nameless = SfatEntry::default();
        assert_eq!(nameless.name_offset(), None);
    }
}
