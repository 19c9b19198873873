//! Deserialization of packfiles
//!

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::types::{tag, HkGraph, HkObject, HkValue, Platform};
use crate::{HEADER_SIZE, MAGIC, VERSION};

impl HkGraph {
    /// Parse a packfile, auto-detecting its platform from the header.
    ///
    /// Exactly the bytes described by the header are consumed; trailing content is
    /// ignored, which lets callers parse a file that is embedded ahead of another
    /// section.
    #[instrument(skip(data), err)]
    pub fn parse(data: &[u8]) -> Result<HkGraph> {
        if data.len() < HEADER_SIZE {
            return Err(Error::Truncated);
        }
        if data[..MAGIC.len()] != MAGIC {
            return Err(Error::InvalidMagic);
        }

        let pointer_size = data[8];
        let endian_flag = data[9];
        let platform = match (pointer_size, endian_flag) {
            (4, 0) => Platform::WiiU,
            (8, 1) => Platform::Nx,
            _ => {
                return Err(Error::UnsupportedLayout {
                    pointer_size,
                    endian_flag,
                })
            }
        };

        match platform {
            Platform::WiiU => decode::<BigEndian>(data, platform),
            Platform::Nx => decode::<LittleEndian>(data, platform),
        }
    }
}

fn decode<B: ByteOrder>(data: &[u8], platform: Platform) -> Result<HkGraph> {
    let version = B::read_u32(&data[0x10..]);
    if version != VERSION {
        return Err(Error::UnsupportedVersion(version));
    }

    let object_count = B::read_u32(&data[0x14..]);
    let names_size = B::read_u32(&data[0x18..]) as usize;
    let data_size = B::read_u32(&data[0x1C..]) as usize;
    let section_offset = B::read_i16(&data[0x20..]);

    let mut position = HEADER_SIZE;
    if section_offset > 0 {
        position += section_offset as usize;
    }

    let names_block = data
        .get(position..position + names_size)
        .ok_or(Error::Truncated)?;
    position += names_size;
    let data_block = data
        .get(position..position + data_size)
        .ok_or(Error::Truncated)?;

    let names = read_names::<B>(names_block)?;
    let pointer_size = platform.pointer_size() as usize;

    let mut reader = Cursor::new(data_block);
    let mut objects = Vec::with_capacity(object_count as usize);
    for _ in 0..object_count {
        let class_name = resolve(&names, reader.read_u32::<B>()?)?;
        let field_count = reader.read_u32::<B>()?;

        let mut object = HkObject::new(class_name);
        for _ in 0..field_count {
            let name = resolve(&names, reader.read_u32::<B>()?)?;
            let value = read_value::<B>(&mut reader, pointer_size, object_count)?;
            object.fields.insert(name.into(), value);
        }
        objects.push(object);
    }

    Ok(HkGraph::new(objects))
}

fn read_names<B: ByteOrder>(block: &[u8]) -> Result<Vec<Box<str>>> {
    let mut reader = Cursor::new(block);
    let count = reader.read_u32::<B>()?;

    let mut names = Vec::new();
    for _ in 0..count {
        let length = reader.read_u32::<B>()? as usize;
        let mut bytes = vec![0u8; length];
        reader.read_exact(&mut bytes)?;
        names.push(String::from_utf8(bytes)?.into_boxed_str());
    }

    // Remaining bytes are the section's 0xFF alignment padding
    Ok(names)
}

fn resolve(names: &[Box<str>], index: u32) -> Result<&str> {
    names
        .get(index as usize)
        .map(AsRef::as_ref)
        .ok_or(Error::InvalidNameRef(index))
}

fn read_value<B: ByteOrder>(
    reader: &mut Cursor<&[u8]>,
    pointer_size: usize,
    object_count: u32,
) -> Result<HkValue> {
    let tag = reader.read_u8()?;
    Ok(match tag {
        tag::NULL => HkValue::Null,
        tag::BOOL => HkValue::Bool(reader.read_u8()? != 0),
        tag::UINT => HkValue::UInt(if pointer_size == 8 {
            reader.read_u64::<B>()?
        } else {
            reader.read_u32::<B>()? as u64
        }),
        tag::INT => HkValue::Int(if pointer_size == 8 {
            reader.read_i64::<B>()?
        } else {
            reader.read_i32::<B>()? as i64
        }),
        tag::REAL => HkValue::Real(reader.read_f32::<B>()?),
        tag::STR => {
            let length = reader.read_u32::<B>()? as usize;
            let mut bytes = vec![0u8; length];
            reader.read_exact(&mut bytes)?;

            let mut padding = [0u8; 8];
            let pad = (pointer_size - length % pointer_size) % pointer_size;
            reader.read_exact(&mut padding[..pad])?;

            HkValue::Str(String::from_utf8(bytes)?.into_boxed_str())
        }
        tag::REF => {
            let index = reader.read_u32::<B>()?;
            if index >= object_count {
                return Err(Error::DanglingReference(index));
            }
            HkValue::Ref(index)
        }
        tag::ARRAY => {
            let count = reader.read_u32::<B>()?;
            let mut values = Vec::new();
            for _ in 0..count {
                values.push(read_value::<B>(reader, pointer_size, object_count)?);
            }
            HkValue::Array(values)
        }
        other => return Err(Error::UnknownTag(other)),
    })
}
