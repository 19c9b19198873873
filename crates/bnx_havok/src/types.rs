//! Base types for the object graph and its serialization header.

use indexmap::IndexMap;

/// Console platform a packfile is serialized for
///
/// The platform fixes both pointer width and byte order, and with them the size of
/// every serialized object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// Wii U: big-endian, 32-bit pointers
    WiiU,
    /// Switch: little-endian, 64-bit pointers
    #[default]
    Nx,
}

impl Platform {
    /// Pointer width in bytes on this platform
    pub fn pointer_size(self) -> u8 {
        match self {
            Platform::WiiU => 4,
            Platform::Nx => 8,
        }
    }

    /// Whether this platform stores multi-byte values little-endian
    pub fn is_little_endian(self) -> bool {
        matches!(self, Platform::Nx)
    }
}

/// Serialization header controlling how a graph is written
///
/// `section_offset` inserts that many pad bytes after the file header, pushing the
/// content onto an alignment boundary when the file is appended to another section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackHeader {
    /// Target platform
    pub platform: Platform,

    /// Opaque tag copied into the header, zero for game content
    pub user_tag: u32,

    /// Alignment pad inserted after the header; 0 for a primary section, 16 for a
    /// section appended behind another
    pub section_offset: i16,
}

impl PackHeader {
    /// Header for a primary section on the given platform.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            user_tag: 0,
            section_offset: 0,
        }
    }
}

impl Default for PackHeader {
    fn default() -> Self {
        Self::new(Platform::default())
    }
}

/// A single member value inside an object
#[derive(Debug, Clone, PartialEq)]
pub enum HkValue {
    /// Absent pointer or unset member
    Null,
    /// Boolean flag
    Bool(bool),
    /// Unsigned integer, stored at pointer width
    UInt(u64),
    /// Signed integer, stored at pointer width
    Int(i64),
    /// 32-bit float
    Real(f32),
    /// Inline string
    Str(Box<str>),
    /// Index of another object in the same file
    Ref(u32),
    /// Homogeneous or mixed sequence of values
    Array(Vec<HkValue>),
}

/// One object of the graph: a class name and its named members
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HkObject {
    /// Havok class name, e.g. `hkRootLevelContainer`
    pub class_name: Box<str>,

    /// Member values in declaration order
    pub fields: IndexMap<Box<str>, HkValue>,
}

impl HkObject {
    /// Create an object of the given class with no members.
    pub fn new(class_name: impl Into<Box<str>>) -> Self {
        Self {
            class_name: class_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add or replace a member, returning the object for chained construction.
    pub fn with(mut self, name: impl Into<Box<str>>, value: HkValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Look up a member by name.
    pub fn get(&self, name: &str) -> Option<&HkValue> {
        self.fields.get(name)
    }

    /// Read a member as an unsigned integer, if it is one.
    pub fn uint(&self, name: &str) -> Option<u64> {
        match self.get(name) {
            Some(HkValue::UInt(value)) => Some(*value),
            _ => None,
        }
    }
}

/// A deserialized object graph
///
/// Object 0 is the root; references index into `objects`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HkGraph {
    /// All objects of the file, root first
    pub objects: Vec<HkObject>,
}

impl HkGraph {
    /// Wrap a list of objects, root first.
    pub fn new(objects: Vec<HkObject>) -> Self {
        Self { objects }
    }

    /// The root object, if the graph is non-empty.
    pub fn root(&self) -> Option<&HkObject> {
        self.objects.first()
    }

    /// Read an unsigned integer member of the root object.
    pub fn root_uint(&self, name: &str) -> Option<u64> {
        self.root().and_then(|root| root.uint(name))
    }

    /// Overwrite an unsigned integer member of the root object.
    ///
    /// Returns `false` when the graph is empty or the member is missing or not an
    /// unsigned integer.
    pub fn set_root_uint(&mut self, name: &str, value: u64) -> bool {
        match self.objects.first_mut().and_then(|root| root.fields.get_mut(name)) {
            Some(slot @ HkValue::UInt(_)) => {
                *slot = HkValue::UInt(value);
                true
            }
            _ => false,
        }
    }
}

/// Wire tags for [`HkValue`] variants
pub(crate) mod tag {
    pub const NULL: u8 = 0x00;
    pub const BOOL: u8 = 0x01;
    pub const UINT: u8 = 0x02;
    pub const INT: u8 = 0x03;
    pub const REAL: u8 = 0x04;
    pub const STR: u8 = 0x05;
    pub const REF: u8 = 0x06;
    pub const ARRAY: u8 = 0x07;
}
