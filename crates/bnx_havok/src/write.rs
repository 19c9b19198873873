//! Serialization of packfiles
//!

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use indexmap::IndexSet;
use tracing::instrument;

use crate::error::{Error, Result};
use crate::types::{tag, HkGraph, HkValue, PackHeader, Platform};
use crate::{MAGIC, VERSION};

/// Serialize `graph` for the platform and section placement in `header`.
///
/// The same graph produces different byte lengths per platform; callers that need
/// the serialized size must measure an actual serialization rather than predict it.
#[instrument(skip(graph, header), fields(objects = graph.objects.len()), err)]
pub fn to_binary(graph: &HkGraph, header: &PackHeader) -> Result<Vec<u8>> {
    match header.platform {
        Platform::WiiU => encode::<BigEndian>(graph, header),
        Platform::Nx => encode::<LittleEndian>(graph, header),
    }
}

fn encode<B: ByteOrder>(graph: &HkGraph, header: &PackHeader) -> Result<Vec<u8>> {
    let pointer_size = header.platform.pointer_size() as usize;

    // Deduplicated name table: class names first-seen order, then member names
    let mut names: IndexSet<&str> = IndexSet::new();
    for object in &graph.objects {
        names.insert(object.class_name.as_ref());
        for name in object.fields.keys() {
            names.insert(name.as_ref());
        }
    }

    let name_ref = |name: &str| -> u32 {
        names.get_index_of(name).expect("name was interned above") as u32
    };

    let mut data = Vec::new();
    for object in &graph.objects {
        data.write_u32::<B>(name_ref(&object.class_name))?;
        data.write_u32::<B>(object.fields.len() as u32)?;
        for (name, value) in &object.fields {
            data.write_u32::<B>(name_ref(name))?;
            write_value::<B>(&mut data, pointer_size, graph.objects.len() as u32, value)?;
        }
    }

    let mut name_section = Vec::new();
    name_section.write_u32::<B>(names.len() as u32)?;
    for name in &names {
        name_section.write_u32::<B>(name.len() as u32)?;
        name_section.extend_from_slice(name.as_bytes());
    }
    while name_section.len() % 16 != 0 {
        name_section.push(0xFF);
    }

    let pad = if header.section_offset > 0 {
        header.section_offset as usize
    } else {
        0
    };

    let mut out = Vec::with_capacity(crate::HEADER_SIZE + pad + name_section.len() + data.len());
    out.extend_from_slice(&MAGIC);
    out.push(header.platform.pointer_size());
    out.push(header.platform.is_little_endian() as u8);
    out.push(0); // reuse padding
    out.push(0); // base class flag
    out.write_u32::<B>(header.user_tag)?;
    out.write_u32::<B>(VERSION)?;
    out.write_u32::<B>(graph.objects.len() as u32)?;
    out.write_u32::<B>(name_section.len() as u32)?;
    out.write_u32::<B>(data.len() as u32)?;
    out.write_i16::<B>(header.section_offset)?;
    out.extend_from_slice(&[0u8; 14]);

    out.resize(out.len() + pad, 0xFF);
    out.extend_from_slice(&name_section);
    out.extend_from_slice(&data);

    Ok(out)
}

fn write_value<B: ByteOrder>(
    out: &mut Vec<u8>,
    pointer_size: usize,
    object_count: u32,
    value: &HkValue,
) -> Result<()> {
    match value {
        HkValue::Null => out.write_u8(tag::NULL)?,
        HkValue::Bool(flag) => {
            out.write_u8(tag::BOOL)?;
            out.write_u8(*flag as u8)?;
        }
        HkValue::UInt(value) => {
            out.write_u8(tag::UINT)?;
            if pointer_size == 8 {
                out.write_u64::<B>(*value)?;
            } else {
                let narrow = u32::try_from(*value).map_err(|_| Error::ValueOverflow)?;
                out.write_u32::<B>(narrow)?;
            }
        }
        HkValue::Int(value) => {
            out.write_u8(tag::INT)?;
            if pointer_size == 8 {
                out.write_i64::<B>(*value)?;
            } else {
                let narrow = i32::try_from(*value).map_err(|_| Error::ValueOverflow)?;
                out.write_i32::<B>(narrow)?;
            }
        }
        HkValue::Real(value) => {
            out.write_u8(tag::REAL)?;
            out.write_f32::<B>(*value)?;
        }
        HkValue::Str(value) => {
            out.write_u8(tag::STR)?;
            out.write_u32::<B>(value.len() as u32)?;
            out.extend_from_slice(value.as_bytes());
            let pad = (pointer_size - value.len() % pointer_size) % pointer_size;
            out.resize(out.len() + pad, 0);
        }
        HkValue::Ref(index) => {
            if *index >= object_count {
                return Err(Error::DanglingReference(*index));
            }
            out.write_u8(tag::REF)?;
            out.write_u32::<B>(*index)?;
        }
        HkValue::Array(values) => {
            out.write_u8(tag::ARRAY)?;
            out.write_u32::<B>(values.len() as u32)?;
            for value in values {
                write_value::<B>(out, pointer_size, object_count, value)?;
            }
        }
    }

    Ok(())
}
