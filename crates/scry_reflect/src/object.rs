use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::registry::ClassId;
use crate::value::FieldSlot;

/// A shared, mutable handle to an [`ObjectInstance`].
///
/// Object graphs are single-threaded; sharing is reference-counted and
/// interior-mutable. A drawer recursing into a graph borrows each object for
/// the duration of its subtree only, so sibling objects and distinct levels
/// never conflict. A reference cycle surfaces as a failed `try_borrow_mut`
/// and is rendered as a placeholder instead of recursing forever.
pub type ObjectHandle = Rc<RefCell<ObjectInstance>>;

/// A non-owning counterpart to [`ObjectHandle`].
pub type WeakObjectHandle = Weak<RefCell<ObjectInstance>>;

/// The own-field values of one inheritance level of an object.
#[derive(Debug, Clone)]
pub struct ClassLevel {
    class: ClassId,
    slots: Vec<FieldSlot>,
}

impl ClassLevel {
    /// Wraps slots for one level. The slot order must match the field order
    /// of the level's [`ClassInfo`](crate::ClassInfo).
    pub fn new(class: ClassId, slots: Vec<FieldSlot>) -> Self {
        Self { class, slots }
    }

    /// The class this level belongs to.
    pub fn class(&self) -> ClassId {
        self.class
    }

    /// One slot per own field, in field order.
    pub fn slots(&self) -> &[FieldSlot] {
        &self.slots
    }

    /// One slot per own field, mutably.
    pub fn slots_mut(&mut self) -> &mut [FieldSlot] {
        &mut self.slots
    }
}

/// A reflected object: an instance name, a most-derived class, and one
/// [`ClassLevel`] per class in the inheritance chain, most-derived first.
#[derive(Debug)]
pub struct ObjectInstance {
    name: String,
    class: ClassId,
    levels: Vec<ClassLevel>,
}

impl ObjectInstance {
    /// Assembles an instance from its per-level slots. Constructed by
    /// [`TypeRegistry::instantiate`](crate::TypeRegistry::instantiate).
    pub fn new(name: impl Into<String>, class: ClassId, levels: Vec<ClassLevel>) -> Self {
        Self {
            name: name.into(),
            class,
            levels,
        }
    }

    /// The instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the instance.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The most-derived class of the instance.
    pub fn class(&self) -> ClassId {
        self.class
    }

    /// All levels, most-derived first.
    pub fn levels(&self) -> &[ClassLevel] {
        &self.levels
    }

    /// The level belonging to the given class, if the instance's chain
    /// contains it.
    pub fn level(&self, class: ClassId) -> Option<&ClassLevel> {
        self.levels.iter().find(|level| level.class() == class)
    }

    /// The level belonging to the given class, mutably.
    pub fn level_mut(&mut self, class: ClassId) -> Option<&mut ClassLevel> {
        self.levels.iter_mut().find(|level| level.class() == class)
    }
}
