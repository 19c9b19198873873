//! Re-serialization of Havok packfiles, including the static compound offset patch.

use bnx_havok::{to_binary, HkGraph, PackHeader};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::options::ConvertOptions;

/// Root field of a static compound descriptor recording the byte length of the
/// descriptor's own serialized form
const OFFSET_FIELD: &str = "m_Offset";

/// Byte boundary the trailing graph of a split file is aligned to
const SECOND_SECTION_OFFSET: i16 = 16;

/// Re-serialize a plain packfile for the target platform.
#[instrument(skip(data, options), err)]
pub(crate) fn convert_packfile(data: &[u8], aligned: bool, options: &ConvertOptions) -> Result<Vec<u8>> {
    let graph = HkGraph::parse(data)?;

    let mut header = PackHeader::new(options.platform);
    header.section_offset = if aligned { SECOND_SECTION_OFFSET } else { 0 };

    Ok(to_binary(&graph, &header)?)
}

/// Convert a static compound file: a descriptor packfile followed immediately by a
/// root graph packfile, with the descriptor's `m_Offset` field holding the byte
/// length of the descriptor itself.
///
/// The length depends on the serialization being produced, so it cannot be known
/// before serializing: the descriptor is written once with a placeholder to measure
/// it, patched, and written again. Because the field sits inside the measured bytes,
/// the second pass is compared against the first: if patching ever changed the
/// length, the recorded offset would be stale, and failing beats emitting a file
/// whose second section cannot be located.
#[instrument(skip(data, options), err)]
pub(crate) fn convert_compound(data: &[u8], options: &ConvertOptions) -> Result<Vec<u8>> {
    let mut descriptor = HkGraph::parse(data)?;
    let offset = descriptor
        .root_uint(OFFSET_FIELD)
        .ok_or(Error::MissingField(OFFSET_FIELD))?;

    let tail = data
        .get(offset as usize..)
        .filter(|tail| !tail.is_empty())
        .ok_or(Error::OffsetOutOfBounds {
            offset,
            len: data.len(),
        })?;
    let graph = HkGraph::parse(tail)?;

    let mut header = PackHeader::new(options.platform);
    header.section_offset = 0;

    descriptor.set_root_uint(OFFSET_FIELD, 0);
    let measured = to_binary(&descriptor, &header)?;

    descriptor.set_root_uint(OFFSET_FIELD, measured.len() as u64);
    let mut out = to_binary(&descriptor, &header)?;
    if out.len() != measured.len() {
        return Err(Error::OffsetUnstable {
            first: measured.len(),
            second: out.len(),
        });
    }

    header.section_offset = SECOND_SECTION_OFFSET;
    out.extend_from_slice(&to_binary(&graph, &header)?);

    Ok(out)
}

#[cfg(test)]
mod test {
    use bnx_havok::{HkGraph, HkObject, HkValue, PackHeader, Platform};
    use pretty_assertions::assert_eq;

    use crate::error::Error;
    use crate::options::ConvertOptions;
    use crate::patch::{convert_compound, convert_packfile};

    fn descriptor_graph(offset: u64) -> HkGraph {
        HkGraph::new(vec![HkObject::new("StaticCompoundInfo")
            .with("m_Offset", HkValue::UInt(offset))
            .with(
                "m_ActorInfo",
                HkValue::Array(vec![HkValue::UInt(0x1234), HkValue::UInt(0x5678)]),
            )])
    }

    fn root_graph() -> HkGraph {
        HkGraph::new(vec![
            HkObject::new("hkRootLevelContainer")
                .with("m_namedVariants", HkValue::Array(vec![HkValue::Ref(1)])),
            HkObject::new("hkpStaticCompoundShape")
                .with("m_numBodies", HkValue::UInt(7))
                .with("m_scale", HkValue::Real(1.0)),
        ])
    }

    /// Serialize a descriptor + root pair the way a source console stores it.
    fn compound_bytes(platform: Platform) -> Vec<u8> {
        let mut header = PackHeader::new(platform);
        header.section_offset = 0;

        let mut descriptor = descriptor_graph(0);
        let probe = bnx_havok::to_binary(&descriptor, &header).unwrap();
        descriptor.set_root_uint("m_Offset", probe.len() as u64);
        let mut data = bnx_havok::to_binary(&descriptor, &header).unwrap();

        header.section_offset = 16;
        data.extend_from_slice(&bnx_havok::to_binary(&root_graph(), &header).unwrap());
        data
    }

    #[test]
    fn packfile_changes_platform() {
        let source = bnx_havok::to_binary(&root_graph(), &PackHeader::new(Platform::WiiU)).unwrap();
        let converted = convert_packfile(&source, false, &ConvertOptions::default()).unwrap();

        let graph = HkGraph::parse(&converted).unwrap();
        assert_eq!(graph, root_graph());
        assert_eq!(converted[8], 8, "pointer size byte is the target's");
    }

    #[test]
    fn compound_offset_matches_descriptor_length() {
        let source = compound_bytes(Platform::WiiU);
        let converted = convert_compound(&source, &ConvertOptions::default()).unwrap();

        let descriptor = HkGraph::parse(&converted).unwrap();
        let offset = descriptor.root_uint("m_Offset").unwrap() as usize;

        // The recorded offset is exactly where the root graph begins
        let tail = HkGraph::parse(&converted[offset..]).unwrap();
        assert_eq!(tail, root_graph());

        // And nothing but the descriptor lives before it
        assert_eq!(descriptor, descriptor_graph(offset as u64));
    }

    #[test]
    fn compound_conversion_is_idempotent() {
        let source = compound_bytes(Platform::WiiU);
        let options = ConvertOptions::default();

        let first = convert_compound(&source, &options).unwrap();
        let second = convert_compound(&first, &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn compound_without_offset_field_fails() {
        let graph = HkGraph::new(vec![HkObject::new("StaticCompoundInfo")
            .with("m_ActorInfo", HkValue::Array(vec![]))]);
        let data = bnx_havok::to_binary(&graph, &PackHeader::new(Platform::WiiU)).unwrap();

        assert!(matches!(
            convert_compound(&data, &ConvertOptions::default()),
            Err(Error::MissingField("m_Offset"))
        ));
    }

    #[test]
    fn compound_with_out_of_range_offset_fails() {
        let graph = descriptor_graph(0xFFFF_FFFF);
        let data = bnx_havok::to_binary(&graph, &PackHeader::new(Platform::WiiU)).unwrap();

        assert!(matches!(
            convert_compound(&data, &ConvertOptions::default()),
            Err(Error::OffsetOutOfBounds { .. })
        ));
    }

    #[test]
    fn compound_with_garbage_tail_fails() {
        // Offset lands inside the file but on bytes that are not a packfile
        let mut header = PackHeader::new(Platform::WiiU);
        header.section_offset = 0;

        let mut descriptor = descriptor_graph(0);
        let probe = bnx_havok::to_binary(&descriptor, &header).unwrap();
        descriptor.set_root_uint("m_Offset", probe.len() as u64);
        let mut data = bnx_havok::to_binary(&descriptor, &header).unwrap();
        data.extend_from_slice(&[0u8; 64]);

        assert!(matches!(
            convert_compound(&data, &ConvertOptions::default()),
            Err(Error::Graph(_))
        ));
    }
}
