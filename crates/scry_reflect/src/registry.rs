use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use crate::{
    ClassInfo, ClassLevel, DelegateValue, EnumInfo, FieldInfo, FieldSlot, MapValue,
    MulticastDelegateValue, ObjectHandle, ObjectInstance, PropertyType, SetValue, SoftClassRef,
    SoftObjectRef, StructInfo, StructValue, Value,
};

/// An interned handle to a [`ClassInfo`] in a [`TypeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

/// An interned handle to a [`StructInfo`] in a [`TypeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructId(u32);

/// An interned handle to an [`EnumInfo`] in a [`TypeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnumId(u32);

/// An error raised while registering type metadata.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A class with the same name already exists.
    #[error("class `{0}` is already registered")]
    DuplicateClass(String),
    /// A struct with the same name already exists.
    #[error("struct `{0}` is already registered")]
    DuplicateStruct(String),
    /// An enum with the same name already exists.
    #[error("enum `{0}` is already registered")]
    DuplicateEnum(String),
    /// A class referenced a parent id that this registry did not issue.
    #[error("class `{0}` references an unknown parent class")]
    UnknownParent(String),
}

/// The directory of all registered type metadata.
///
/// Metadata is registered once at startup and interned behind copyable ids;
/// everything downstream (values, drawers) resolves ids through a shared
/// `&TypeRegistry`. The registry is never mutated during a draw pass.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    classes: Vec<ClassInfo>,
    class_names: HashMap<String, ClassId>,
    structs: Vec<StructInfo>,
    struct_names: HashMap<String, StructId>,
    enums: Vec<EnumInfo>,
    enum_names: HashMap<String, EnumId>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class. The parent, if any, must already be registered.
    pub fn register_class(&mut self, info: ClassInfo) -> Result<ClassId, RegistryError> {
        if self.class_names.contains_key(info.name()) {
            return Err(RegistryError::DuplicateClass(info.name().to_owned()));
        }
        if let Some(parent) = info.parent() {
            if self.classes.get(parent.0 as usize).is_none() {
                return Err(RegistryError::UnknownParent(info.name().to_owned()));
            }
        }
        let id = ClassId(self.classes.len() as u32);
        self.class_names.insert(info.name().to_owned(), id);
        self.classes.push(info);
        Ok(id)
    }

    /// Registers a struct.
    pub fn register_struct(&mut self, info: StructInfo) -> Result<StructId, RegistryError> {
        if self.struct_names.contains_key(info.name()) {
            return Err(RegistryError::DuplicateStruct(info.name().to_owned()));
        }
        let id = StructId(self.structs.len() as u32);
        self.struct_names.insert(info.name().to_owned(), id);
        self.structs.push(info);
        Ok(id)
    }

    /// Registers an enum.
    pub fn register_enum(&mut self, info: EnumInfo) -> Result<EnumId, RegistryError> {
        if self.enum_names.contains_key(info.name()) {
            return Err(RegistryError::DuplicateEnum(info.name().to_owned()));
        }
        let id = EnumId(self.enums.len() as u32);
        self.enum_names.insert(info.name().to_owned(), id);
        self.enums.push(info);
        Ok(id)
    }

    /// The metadata behind a class id issued by this registry.
    pub fn class(&self, id: ClassId) -> &ClassInfo {
        &self.classes[id.0 as usize]
    }

    /// The metadata behind a struct id issued by this registry.
    pub fn struct_info(&self, id: StructId) -> &StructInfo {
        &self.structs[id.0 as usize]
    }

    /// The metadata behind an enum id issued by this registry.
    pub fn enum_info(&self, id: EnumId) -> &EnumInfo {
        &self.enums[id.0 as usize]
    }

    /// Looks a class up by name.
    pub fn class_by_name(&self, name: &str) -> Option<ClassId> {
        self.class_names.get(name).copied()
    }

    /// Looks a struct up by name.
    pub fn struct_by_name(&self, name: &str) -> Option<StructId> {
        self.struct_names.get(name).copied()
    }

    /// Looks an enum up by name.
    pub fn enum_by_name(&self, name: &str) -> Option<EnumId> {
        self.enum_names.get(name).copied()
    }

    /// The immediate parent of a class, if any.
    pub fn parent_of(&self, id: ClassId) -> Option<ClassId> {
        self.class(id).parent()
    }

    /// Whether `child` is `ancestor` or derives from it.
    pub fn is_a(&self, child: ClassId, ancestor: ClassId) -> bool {
        let mut current = Some(child);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }

    /// Every class strictly derived from `parent`, in registration order.
    pub fn derived_classes(&self, parent: ClassId) -> Vec<ClassId> {
        (0..self.classes.len() as u32)
            .map(ClassId)
            .filter(|&id| id != parent && self.is_a(id, parent))
            .collect()
    }

    /// The inheritance chain of a class, most-derived first.
    pub fn inheritance_chain(&self, id: ClassId) -> Vec<ClassId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(level) = current {
            chain.push(level);
            current = self.parent_of(level);
        }
        chain
    }

    /// A default-constructed value of the given type.
    pub fn default_value(&self, ty: &PropertyType) -> Value {
        match ty {
            PropertyType::Bool => Value::Bool(false),
            PropertyType::I8 => Value::I8(0),
            PropertyType::I16 => Value::I16(0),
            PropertyType::I32 => Value::I32(0),
            PropertyType::I64 => Value::I64(0),
            PropertyType::U8 => Value::U8(0),
            PropertyType::U16 => Value::U16(0),
            PropertyType::U32 => Value::U32(0),
            PropertyType::U64 => Value::U64(0),
            PropertyType::F32 => Value::F32(0.0),
            PropertyType::F64 => Value::F64(0.0),
            PropertyType::Str => Value::Str(String::new()),
            PropertyType::Name => Value::Name(String::new()),
            PropertyType::Text => Value::Text(String::new()),
            PropertyType::Enum(id) => Value::Enum {
                id: *id,
                value: self.enum_info(*id).default_value(),
            },
            PropertyType::Class { .. } => Value::Class(None),
            PropertyType::SoftClass { .. } => Value::SoftClass(SoftClassRef::new()),
            PropertyType::Struct(id) => Value::Struct(self.instantiate_struct(*id)),
            PropertyType::Object { .. } => Value::Object(None),
            PropertyType::WeakObject { .. } => Value::WeakObject(std::rc::Weak::new()),
            PropertyType::SoftObject { .. } => Value::SoftObject(SoftObjectRef::new()),
            PropertyType::Interface { .. } => Value::Interface(None),
            PropertyType::Array(_) => Value::Array(Vec::new()),
            PropertyType::Set(_) => Value::Set(SetValue::new()),
            PropertyType::Map { .. } => Value::Map(MapValue::new()),
            PropertyType::Delegate(_) => Value::Delegate(DelegateValue::new()),
            PropertyType::MulticastDelegate(_) => {
                Value::MulticastDelegate(MulticastDelegateValue::new())
            }
            // No drawer will ever read this payload; any placeholder works.
            PropertyType::Unsupported { .. } => Value::Bool(false),
        }
    }

    /// A default-constructed slot for the given field, one value per fixed
    /// index.
    pub fn default_slot(&self, field: &FieldInfo) -> FieldSlot {
        FieldSlot::new(
            (0..field.array_dim())
                .map(|_| self.default_value(field.ty()))
                .collect(),
        )
    }

    /// A default-constructed struct value.
    pub fn instantiate_struct(&self, id: StructId) -> StructValue {
        let slots = self
            .struct_info(id)
            .fields()
            .iter()
            .map(|field| self.default_slot(field))
            .collect();
        StructValue::new(id, slots)
    }

    /// Instantiates an object of the given class with default-constructed
    /// fields on every inheritance level.
    pub fn instantiate(&self, class: ClassId, name: impl Into<String>) -> ObjectHandle {
        let levels = self
            .inheritance_chain(class)
            .into_iter()
            .map(|level| {
                let slots = self
                    .class(level)
                    .fields()
                    .iter()
                    .map(|field| self.default_slot(field))
                    .collect();
                ClassLevel::new(level, slots)
            })
            .collect();
        Rc::new(RefCell::new(ObjectInstance::new(name, class, levels)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClassFlags;

    fn hierarchy(registry: &mut TypeRegistry) -> (ClassId, ClassId, ClassId) {
        let actor = registry
            .register_class(
                ClassInfo::new("Actor").with_field(FieldInfo::new("id", PropertyType::U32)),
            )
            .unwrap();
        let character = registry
            .register_class(
                ClassInfo::new("Character")
                    .with_parent(actor)
                    .with_flags(ClassFlags::MUTABLE)
                    .with_field(FieldInfo::new("health", PropertyType::F32)),
            )
            .unwrap();
        let hero = registry
            .register_class(
                ClassInfo::new("Hero")
                    .with_parent(character)
                    .with_field(FieldInfo::new("title", PropertyType::Text)),
            )
            .unwrap();
        (actor, character, hero)
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = TypeRegistry::default();
        registry.register_class(ClassInfo::new("Actor")).unwrap();
        assert!(matches!(
            registry.register_class(ClassInfo::new("Actor")),
            Err(RegistryError::DuplicateClass(_))
        ));
    }

    #[test]
    fn is_a_walks_the_whole_chain() {
        let mut registry = TypeRegistry::default();
        let (actor, character, hero) = hierarchy(&mut registry);
        assert!(registry.is_a(hero, actor));
        assert!(registry.is_a(hero, hero));
        assert!(!registry.is_a(actor, character));
    }

    #[test]
    fn derived_classes_exclude_the_parent_itself() {
        let mut registry = TypeRegistry::default();
        let (actor, character, hero) = hierarchy(&mut registry);
        assert_eq!(registry.derived_classes(actor), vec![character, hero]);
        assert_eq!(registry.derived_classes(hero), Vec::new());
    }

    #[test]
    fn instantiate_builds_one_level_per_class() {
        let mut registry = TypeRegistry::default();
        let (actor, character, hero) = hierarchy(&mut registry);
        let object = registry.instantiate(hero, "Protagonist");
        let instance = object.borrow();

        assert_eq!(instance.name(), "Protagonist");
        assert_eq!(instance.class(), hero);
        let chain: Vec<_> = instance.levels().iter().map(ClassLevel::class).collect();
        assert_eq!(chain, vec![hero, character, actor]);

        // Each level owns exactly its own fields.
        assert_eq!(instance.level(actor).unwrap().slots().len(), 1);
        assert!(matches!(
            instance.level(character).unwrap().slots()[0].value(),
            Some(Value::F32(_))
        ));
    }

    #[test]
    fn enum_defaults_round_trip_through_metadata() {
        let mut registry = TypeRegistry::default();
        let damage = registry
            .register_enum(EnumInfo::new("DamageKind", [("Physical", 0), ("Fire", 3)]))
            .unwrap();
        let value = registry.default_value(&PropertyType::Enum(damage));
        let Value::Enum { value, .. } = value else {
            panic!("expected an enum value");
        };
        assert_eq!(registry.enum_info(damage).index_of_value(value), Some(0));
    }

    #[test]
    fn default_slots_cover_fixed_array_dims() {
        let registry = TypeRegistry::default();
        let field = FieldInfo::new("flags", PropertyType::Bool).with_array_dim(3);
        assert_eq!(registry.default_slot(&field).len(), 3);
    }
}
