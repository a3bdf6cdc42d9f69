use std::rc::Rc;

use crate::object::{ObjectHandle, WeakObjectHandle};

/// One callback binding: a target object (held weakly, so a binding never
/// keeps its target alive) and the name of the bound function.
#[derive(Debug, Clone)]
pub struct DelegateBinding {
    object: WeakObjectHandle,
    function: String,
}

impl DelegateBinding {
    /// Binds a function on the given object.
    pub fn new(object: &ObjectHandle, function: impl Into<String>) -> Self {
        Self {
            object: Rc::downgrade(object),
            function: function.into(),
        }
    }

    /// The target object, if it is still alive.
    pub fn object(&self) -> Option<ObjectHandle> {
        self.object.upgrade()
    }

    /// The target's instance name, or `NULL` if the target died.
    pub fn object_name(&self) -> String {
        match self.object.upgrade() {
            Some(handle) => handle.borrow().name().to_owned(),
            None => "NULL".to_owned(),
        }
    }

    /// The bound function name.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Whether this binding targets the same object and function.
    pub fn matches(&self, other: &DelegateBinding) -> bool {
        self.object.ptr_eq(&other.object) && self.function == other.function
    }
}

/// A single-binding delegate.
#[derive(Debug, Clone, Default)]
pub struct DelegateValue {
    binding: Option<DelegateBinding>,
}

impl DelegateValue {
    /// An unbound delegate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a binding is present.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// The current binding.
    pub fn binding(&self) -> Option<&DelegateBinding> {
        self.binding.as_ref()
    }

    /// Replaces the binding.
    pub fn bind(&mut self, binding: DelegateBinding) {
        self.binding = Some(binding);
    }

    /// Removes the binding.
    pub fn unbind(&mut self) {
        self.binding = None;
    }
}

/// A delegate holding any number of bindings that share one signature.
#[derive(Debug, Clone, Default)]
pub struct MulticastDelegateValue {
    bindings: Vec<DelegateBinding>,
}

impl MulticastDelegateValue {
    /// An unbound delegate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any binding is present.
    pub fn is_bound(&self) -> bool {
        !self.bindings.is_empty()
    }

    /// The binding count.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no binding is present.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All bindings, in binding order.
    pub fn bindings(&self) -> &[DelegateBinding] {
        &self.bindings
    }

    /// Appends a binding.
    pub fn add(&mut self, binding: DelegateBinding) {
        self.bindings.push(binding);
    }

    /// Removes the binding at `index`, leaving the others intact.
    pub fn remove_at(&mut self, index: usize) {
        if index < self.bindings.len() {
            self.bindings.remove(index);
        }
    }

    /// Removes every binding matching the given one.
    pub fn remove_matching(&mut self, binding: &DelegateBinding) {
        self.bindings.retain(|existing| !existing.matches(binding));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClassInfo, TypeRegistry};

    fn actor(registry: &mut TypeRegistry, name: &str) -> ObjectHandle {
        let class = registry
            .class_by_name("Actor")
            .unwrap_or_else(|| registry.register_class(ClassInfo::new("Actor")).unwrap());
        registry.instantiate(class, name)
    }

    #[test]
    fn bindings_hold_their_target_weakly() {
        let mut registry = TypeRegistry::default();
        let target = actor(&mut registry, "Turret");
        let binding = DelegateBinding::new(&target, "on_fire");
        assert_eq!(binding.object_name(), "Turret");

        drop(target);
        assert!(binding.object().is_none());
        assert_eq!(binding.object_name(), "NULL");
    }

    #[test]
    fn multicast_unbind_removes_only_one_target() {
        let mut registry = TypeRegistry::default();
        let first = actor(&mut registry, "First");
        let second = actor(&mut registry, "Second");

        let mut delegate = MulticastDelegateValue::new();
        delegate.add(DelegateBinding::new(&first, "on_hit"));
        delegate.add(DelegateBinding::new(&second, "on_hit"));
        assert_eq!(delegate.len(), 2);

        delegate.remove_at(0);
        assert_eq!(delegate.len(), 1);
        assert_eq!(delegate.bindings()[0].object_name(), "Second");
    }
}
