use core::fmt;

/// An enumeration of the kinds of value a reflected field can hold.
///
/// Each kind corresponds to exactly one drawer in the inspector layer, so
/// this is the key of the kind → drawer dispatch table. The set is closed:
/// a host that carries a type the model cannot express registers it as
/// [`PropertyKind::Unsupported`], which renders as a highlighted placeholder
/// and never reports mutation.
///
/// A [`PropertyKind`] is obtained via [`PropertyType::kind`] or
/// [`Value::kind`].
///
/// [`PropertyType::kind`]: crate::PropertyType::kind
/// [`Value::kind`]: crate::Value::kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// A boolean.
    Bool,
    /// A signed 8-bit integer.
    I8,
    /// A signed 16-bit integer.
    I16,
    /// A signed 32-bit integer.
    I32,
    /// A signed 64-bit integer.
    I64,
    /// An unsigned 8-bit integer.
    U8,
    /// An unsigned 16-bit integer.
    U16,
    /// An unsigned 32-bit integer.
    U32,
    /// An unsigned 64-bit integer.
    U64,
    /// A 32-bit float.
    F32,
    /// A 64-bit float.
    F64,
    /// A plain string.
    Str,
    /// An interned identifier string.
    Name,
    /// A display-facing (localizable) string.
    Text,
    /// An enum value, described by [`EnumInfo`](crate::EnumInfo) metadata.
    Enum,
    /// A reference to a class, bounded by a parent class.
    Class,
    /// A path-addressed class reference with explicit load states.
    SoftClass,
    /// A plain aggregate described by [`StructInfo`](crate::StructInfo).
    Struct,
    /// A strong reference to an [`ObjectInstance`](crate::ObjectInstance).
    Object,
    /// A non-owning reference to an object.
    WeakObject,
    /// A path-addressed object reference with explicit load states.
    SoftObject,
    /// An object reference typed by an abstract interface class.
    Interface,
    /// A growable sequence of values of one element type.
    Array,
    /// A hash-indexed collection of unique values.
    Set,
    /// A hash-indexed collection of key/value pairs.
    Map,
    /// A single callback binding.
    Delegate,
    /// A list of callback bindings sharing one signature.
    MulticastDelegate,
    /// A type the model cannot express; drawn as a placeholder.
    Unsupported,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKind::Bool => f.pad("bool"),
            PropertyKind::I8 => f.pad("i8"),
            PropertyKind::I16 => f.pad("i16"),
            PropertyKind::I32 => f.pad("i32"),
            PropertyKind::I64 => f.pad("i64"),
            PropertyKind::U8 => f.pad("u8"),
            PropertyKind::U16 => f.pad("u16"),
            PropertyKind::U32 => f.pad("u32"),
            PropertyKind::U64 => f.pad("u64"),
            PropertyKind::F32 => f.pad("f32"),
            PropertyKind::F64 => f.pad("f64"),
            PropertyKind::Str => f.pad("str"),
            PropertyKind::Name => f.pad("name"),
            PropertyKind::Text => f.pad("text"),
            PropertyKind::Enum => f.pad("enum"),
            PropertyKind::Class => f.pad("class"),
            PropertyKind::SoftClass => f.pad("soft class"),
            PropertyKind::Struct => f.pad("struct"),
            PropertyKind::Object => f.pad("object"),
            PropertyKind::WeakObject => f.pad("weak object"),
            PropertyKind::SoftObject => f.pad("soft object"),
            PropertyKind::Interface => f.pad("interface"),
            PropertyKind::Array => f.pad("array"),
            PropertyKind::Set => f.pad("set"),
            PropertyKind::Map => f.pad("map"),
            PropertyKind::Delegate => f.pad("delegate"),
            PropertyKind::MulticastDelegate => f.pad("multicast delegate"),
            PropertyKind::Unsupported => f.pad("unsupported"),
        }
    }
}

impl PropertyKind {
    /// Returns whether this kind is a dynamic container (array, set or map).
    ///
    /// Containers of containers are not representable; the inspector rejects
    /// them with an inline warning instead of recursing.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            PropertyKind::Array | PropertyKind::Set | PropertyKind::Map
        )
    }
}
