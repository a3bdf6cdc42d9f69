use core::fmt;

use crate::{ClassId, EnumId, PropertyKind, StructId, TypeRegistry};

/// The full type description of a reflected field: a [`PropertyKind`] plus
/// whatever payload that kind needs to be drawn and default-constructed.
///
/// For leaf kinds the payload is empty; aggregates reference interned
/// metadata ids, containers carry their element types, and delegates carry
/// their callback signature inline.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyType {
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
    /// An enum value described by the referenced [`EnumInfo`].
    ///
    /// [`EnumInfo`]: crate::EnumInfo
    Enum(EnumId),
    /// A class reference; selectable values are `parent` and its subclasses.
    Class {
        /// The most general class the field accepts.
        parent: ClassId,
    },
    /// A path-addressed class reference with explicit load states.
    SoftClass {
        /// The most general class the field accepts.
        parent: ClassId,
    },
    /// A plain aggregate described by the referenced [`StructInfo`].
    ///
    /// [`StructInfo`]: crate::StructInfo
    Struct(StructId),
    /// A strong object reference.
    Object {
        /// The declared class bound, used when the reference is null.
        class: ClassId,
    },
    /// A non-owning object reference.
    WeakObject {
        /// The declared class bound, used when the reference is dead.
        class: ClassId,
    },
    /// A path-addressed object reference with explicit load states.
    SoftObject {
        /// The declared class bound, used when the reference is unresolved.
        class: ClassId,
    },
    /// An object reference typed by an abstract interface class.
    Interface {
        /// The declared interface class bound.
        class: ClassId,
    },
    /// A growable sequence of one element type.
    Array(Box<PropertyType>),
    /// A hash-indexed collection of unique elements.
    Set(Box<PropertyType>),
    /// A hash-indexed collection of key/value pairs.
    Map {
        /// The key type.
        key: Box<PropertyType>,
        /// The value type.
        value: Box<PropertyType>,
    },
    /// A single callback binding with the given signature.
    Delegate(SignatureInfo),
    /// A list of callback bindings sharing the given signature.
    MulticastDelegate(SignatureInfo),
    /// A type the model cannot express.
    Unsupported {
        /// The host-side name of the inexpressible type, for the placeholder.
        type_name: String,
    },
}

impl PropertyType {
    /// Returns the kind of this type without any payload.
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyType::Bool => PropertyKind::Bool,
            PropertyType::I8 => PropertyKind::I8,
            PropertyType::I16 => PropertyKind::I16,
            PropertyType::I32 => PropertyKind::I32,
            PropertyType::I64 => PropertyKind::I64,
            PropertyType::U8 => PropertyKind::U8,
            PropertyType::U16 => PropertyKind::U16,
            PropertyType::U32 => PropertyKind::U32,
            PropertyType::U64 => PropertyKind::U64,
            PropertyType::F32 => PropertyKind::F32,
            PropertyType::F64 => PropertyKind::F64,
            PropertyType::Str => PropertyKind::Str,
            PropertyType::Name => PropertyKind::Name,
            PropertyType::Text => PropertyKind::Text,
            PropertyType::Enum(_) => PropertyKind::Enum,
            PropertyType::Class { .. } => PropertyKind::Class,
            PropertyType::SoftClass { .. } => PropertyKind::SoftClass,
            PropertyType::Struct(_) => PropertyKind::Struct,
            PropertyType::Object { .. } => PropertyKind::Object,
            PropertyType::WeakObject { .. } => PropertyKind::WeakObject,
            PropertyType::SoftObject { .. } => PropertyKind::SoftObject,
            PropertyType::Interface { .. } => PropertyKind::Interface,
            PropertyType::Array(_) => PropertyKind::Array,
            PropertyType::Set(_) => PropertyKind::Set,
            PropertyType::Map { .. } => PropertyKind::Map,
            PropertyType::Delegate(_) => PropertyKind::Delegate,
            PropertyType::MulticastDelegate(_) => PropertyKind::MulticastDelegate,
            PropertyType::Unsupported { .. } => PropertyKind::Unsupported,
        }
    }

    /// Returns whether this type is a dynamic container.
    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    /// A human-readable name for this type, resolving interned metadata
    /// through `registry`. Used for container titles and placeholders.
    pub fn display_name(&self, registry: &TypeRegistry) -> String {
        match self {
            PropertyType::Enum(id) => registry.enum_info(*id).name().to_owned(),
            PropertyType::Class { parent } | PropertyType::SoftClass { parent } => {
                format!("Class<{}>", registry.class(*parent).name())
            }
            PropertyType::Struct(id) => registry.struct_info(*id).name().to_owned(),
            PropertyType::Object { class }
            | PropertyType::WeakObject { class }
            | PropertyType::SoftObject { class }
            | PropertyType::Interface { class } => registry.class(*class).name().to_owned(),
            PropertyType::Array(element) => {
                format!("Array<{}>", element.display_name(registry))
            }
            PropertyType::Set(element) => format!("Set<{}>", element.display_name(registry)),
            PropertyType::Map { key, value } => format!(
                "Map<{}, {}>",
                key.display_name(registry),
                value.display_name(registry)
            ),
            PropertyType::Unsupported { type_name } => type_name.clone(),
            _ => self.kind().to_string(),
        }
    }
}

/// A named, typed slot within a reflected aggregate.
///
/// `array_dim` models fixed-size C-style arrays: a field with
/// `array_dim > 1` owns that many values of the same type, drawn one per
/// index. Dynamic containers always have `array_dim == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    name: String,
    ty: PropertyType,
    array_dim: usize,
}

impl FieldInfo {
    /// Creates a field with `array_dim == 1`.
    pub fn new(name: impl Into<String>, ty: PropertyType) -> Self {
        Self {
            name: name.into(),
            ty,
            array_dim: 1,
        }
    }

    /// Sets a fixed array dimension. Dimensions below 1 are clamped to 1.
    pub fn with_array_dim(mut self, array_dim: usize) -> Self {
        self.array_dim = array_dim.max(1);
        self
    }

    /// The display name of the field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type of each value in the field.
    pub fn ty(&self) -> &PropertyType {
        &self.ty
    }

    /// The number of fixed values this field owns (1 unless a C-style array).
    pub fn array_dim(&self) -> usize {
        self.array_dim
    }
}

/// One parameter of a delegate signature.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInfo {
    name: String,
    type_name: String,
    out: bool,
}

impl ParamInfo {
    /// Creates an input parameter.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            out: false,
        }
    }

    /// Marks the parameter as written by the callee.
    pub fn out(mut self) -> Self {
        self.out = true;
        self
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The host-side name of the parameter type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Whether the parameter is written by the callee.
    pub fn is_out(&self) -> bool {
        self.out
    }
}

/// The callable signature of a delegate: parameters plus an optional return
/// type name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureInfo {
    params: Vec<ParamInfo>,
    ret: Option<String>,
}

impl SignatureInfo {
    /// Creates an empty `()` signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn with_param(mut self, param: ParamInfo) -> Self {
        self.params.push(param);
        self
    }

    /// Sets the return type name.
    pub fn with_return(mut self, type_name: impl Into<String>) -> Self {
        self.ret = Some(type_name.into());
        self
    }

    /// The parameters, in declaration order.
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }

    /// The return type name, if the signature returns a value.
    pub fn ret(&self) -> Option<&str> {
        self.ret.as_deref()
    }
}

impl fmt::Display for SignatureInfo {
    /// Formats as `(ty name, OUT ty name)` or `(ty name) -> (ret)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            if param.is_out() {
                f.write_str("OUT ")?;
            }
            write!(f, "{} {}", param.type_name(), param.name())?;
        }
        f.write_str(")")?;
        if let Some(ret) = &self.ret {
            write!(f, " -> ({ret})")?;
        }
        Ok(())
    }
}
