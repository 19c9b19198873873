//! Mapping of file extensions onto conversion strategies.

/// What the converter should do with an entry
///
/// Produced once per entry from its extension and matched exhaustively; adding a new
/// recognized extension means the compiler walks every consumer of this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Havok packfile, re-serialized in one pass
    Physics {
        /// Whether the content is placed as a secondary section on its 16-byte
        /// alignment boundary
        aligned: bool,
    },

    /// Havok static compound: descriptor plus trailing graph, needs the two-pass
    /// offset patch
    PhysicsSplit,

    /// Model resource; carried through unchanged, conversion happens elsewhere in
    /// the toolchain
    Mesh,

    /// Nested SARC archive, converted recursively
    Archive,

    /// Anything else; left untouched byte for byte
    Unrecognized,
}

/// Classify a file extension (leading dot included).
///
/// Total over every input: unknown extensions, including the empty string, classify as
/// [`Classification::Unrecognized`], which downstream code treats as "leave the
/// payload alone", never as a failure.
pub fn classify(extension: &str) -> Classification {
    match extension {
        ".shksc" => Classification::PhysicsSplit,
        ".shknm2" | ".shktmrb" => Classification::Physics { aligned: true },
        ".hkcl" | ".hkrb" | ".hkrg" => Classification::Physics { aligned: false },
        ".sbfres" => Classification::Mesh,
        ".sarc" | ".pack" | ".bactorpack" | ".bmodelsh" | ".beventpack" | ".stats" | ".ssarc"
        | ".sbactorpack" | ".sbmodelsh" | ".sbeventpack" | ".sstats" | ".blarc" | ".sblarc" => {
            Classification::Archive
        }
        _ => Classification::Unrecognized,
    }
}

/// Classify a full entry name or path by its final extension.
pub fn classify_name(name: &str) -> Classification {
    let extension = name
        .rsplit(['/', '\\'])
        .next()
        .and_then(|file| file.rfind('.').map(|dot| &file[dot..]))
        .unwrap_or("");
    classify(extension)
}
