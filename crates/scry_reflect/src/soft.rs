use crate::object::ObjectHandle;
use crate::registry::ClassId;

/// The resolution state of a soft (path-addressed) reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftState {
    /// The path resolved and the target is loaded.
    Loaded,
    /// The path resolves but the target has not been loaded yet.
    Pending,
    /// The path is empty or does not resolve.
    Invalid,
}

/// A class reference stored as a resolvable path rather than a live id.
///
/// Loading is synchronous and explicit: a pending reference stays pending
/// until [`load`](SoftClassRef::load) is called, mirroring how soft
/// references behave in the engines this model stands in for.
#[derive(Debug, Clone, Default)]
pub struct SoftClassRef {
    path: String,
    target: Option<ClassId>,
    loaded: bool,
}

impl SoftClassRef {
    /// An empty, invalid reference.
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolvable but not yet loaded reference.
    pub fn pending(path: impl Into<String>, target: ClassId) -> Self {
        Self {
            path: path.into(),
            target: Some(target),
            loaded: false,
        }
    }

    /// An already loaded reference.
    pub fn loaded(path: impl Into<String>, target: ClassId) -> Self {
        Self {
            path: path.into(),
            target: Some(target),
            loaded: true,
        }
    }

    /// An unresolvable path.
    pub fn invalid(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            target: None,
            loaded: false,
        }
    }

    /// The stored path; empty for a default reference.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The referenced class, only when loaded.
    pub fn resolved(&self) -> Option<ClassId> {
        self.loaded.then_some(self.target).flatten()
    }

    /// The referenced class regardless of load state.
    pub fn target(&self) -> Option<ClassId> {
        self.target
    }

    /// The current resolution state.
    pub fn state(&self) -> SoftState {
        match (self.target, self.loaded) {
            (Some(_), true) => SoftState::Loaded,
            (Some(_), false) => SoftState::Pending,
            (None, _) => SoftState::Invalid,
        }
    }

    /// Synchronously loads a pending reference. Returns whether the state
    /// changed.
    pub fn load(&mut self) -> bool {
        if self.state() == SoftState::Pending {
            self.loaded = true;
            true
        } else {
            false
        }
    }

    /// Repoints the reference. A `None` target empties the path and the
    /// reference becomes invalid; otherwise it becomes loaded.
    pub fn assign(&mut self, target: Option<ClassId>, path: impl Into<String>) {
        self.target = target;
        self.loaded = target.is_some();
        self.path = if target.is_some() {
            path.into()
        } else {
            String::new()
        };
    }
}

/// An object reference stored as a resolvable path rather than a live
/// handle. Same state machine as [`SoftClassRef`].
#[derive(Debug, Clone, Default)]
pub struct SoftObjectRef {
    path: String,
    target: Option<ObjectHandle>,
    loaded: bool,
}

impl SoftObjectRef {
    /// An empty, invalid reference.
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolvable but not yet loaded reference.
    pub fn pending(path: impl Into<String>, target: ObjectHandle) -> Self {
        Self {
            path: path.into(),
            target: Some(target),
            loaded: false,
        }
    }

    /// An already loaded reference.
    pub fn loaded(path: impl Into<String>, target: ObjectHandle) -> Self {
        Self {
            path: path.into(),
            target: Some(target),
            loaded: true,
        }
    }

    /// An unresolvable path.
    pub fn invalid(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            target: None,
            loaded: false,
        }
    }

    /// The stored path; empty for a default reference.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The referenced object, only when loaded.
    pub fn resolved(&self) -> Option<&ObjectHandle> {
        if self.loaded { self.target.as_ref() } else { None }
    }

    /// The current resolution state.
    pub fn state(&self) -> SoftState {
        match (&self.target, self.loaded) {
            (Some(_), true) => SoftState::Loaded,
            (Some(_), false) => SoftState::Pending,
            (None, _) => SoftState::Invalid,
        }
    }

    /// Synchronously loads a pending reference. Returns whether the state
    /// changed.
    pub fn load(&mut self) -> bool {
        if self.state() == SoftState::Pending {
            self.loaded = true;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClassInfo, TypeRegistry};

    #[test]
    fn pending_loads_exactly_once() {
        let mut registry = TypeRegistry::default();
        let class = registry.register_class(ClassInfo::new("Actor")).unwrap();

        let mut soft = SoftClassRef::pending("/game/actor", class);
        assert_eq!(soft.state(), SoftState::Pending);
        assert_eq!(soft.resolved(), None);

        assert!(soft.load());
        assert_eq!(soft.state(), SoftState::Loaded);
        assert_eq!(soft.resolved(), Some(class));
        assert!(!soft.load());
    }

    #[test]
    fn empty_and_unresolvable_paths_are_invalid() {
        assert_eq!(SoftClassRef::new().state(), SoftState::Invalid);
        let mut broken = SoftClassRef::invalid("/game/missing");
        assert_eq!(broken.state(), SoftState::Invalid);
        assert!(!broken.load());
    }

    #[test]
    fn assign_repoints_or_clears() {
        let mut registry = TypeRegistry::default();
        let class = registry.register_class(ClassInfo::new("Actor")).unwrap();

        let mut soft = SoftClassRef::new();
        soft.assign(Some(class), "Actor");
        assert_eq!(soft.state(), SoftState::Loaded);
        assert_eq!(soft.path(), "Actor");

        soft.assign(None, "ignored");
        assert_eq!(soft.state(), SoftState::Invalid);
        assert!(soft.path().is_empty());
    }
}
