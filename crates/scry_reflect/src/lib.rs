//! Runtime reflection model for the `scry` property inspector.
//!
//! Game engines describe their objects through runtime reflection: every
//! class declares named, typed fields, classes form inheritance chains, and
//! enums carry an ordered list of `(name, value)` entries. Rust has no such
//! ambient facility, so this crate provides the model itself: metadata
//! ([`ClassInfo`], [`StructInfo`], [`EnumInfo`]) interned in a
//! [`TypeRegistry`], and dynamic values ([`Value`]) shaped by that metadata.
//!
//! The model is deliberately *dynamic*: an [`ObjectInstance`] stores one
//! bank of field slots per inheritance level, so a consumer can enumerate a
//! level's own fields (excluding inherited ones), walk to the parent level,
//! and query per-level capability flags. That is exactly the contract a
//! generic property drawer needs.
//!
//! Everything here is single-threaded by design. Object graphs are shared
//! through [`ObjectHandle`] (`Rc<RefCell<_>>`); a drawer that encounters an
//! object already borrowed higher up the call stack can detect the cycle
//! with `try_borrow_mut` and degrade gracefully.

mod containers;
mod delegate;
mod info;
mod kind;
mod object;
mod registry;
mod soft;
mod ty;
mod value;

pub use containers::{MapValue, SetValue};
pub use delegate::{DelegateBinding, DelegateValue, MulticastDelegateValue};
pub use info::{ClassFlags, ClassInfo, EnumEntry, EnumInfo, StructInfo};
pub use kind::PropertyKind;
pub use object::{ClassLevel, ObjectHandle, ObjectInstance, WeakObjectHandle};
pub use registry::{ClassId, EnumId, RegistryError, StructId, TypeRegistry};
pub use soft::{SoftClassRef, SoftObjectRef, SoftState};
pub use ty::{FieldInfo, ParamInfo, PropertyType, SignatureInfo};
pub use value::{FieldSlot, StructValue, Value};

/// The most common reflection types, re-exported for convenience.
pub mod prelude {
    pub use crate::{
        ClassFlags, ClassId, ClassInfo, EnumId, EnumInfo, FieldInfo, FieldSlot, ObjectHandle,
        ObjectInstance, PropertyKind, PropertyType, StructId, StructInfo, StructValue,
        TypeRegistry, Value,
    };
}
