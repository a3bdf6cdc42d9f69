//! egui drawers and debug overlay for the `scry` property inspector.
//!
//! The core is a kind-directed dispatch: [`draw_property`] takes a reflected
//! field, its value slot and a [`DrawContext`], looks the field's kind up in
//! a table built once at startup, and recursively renders (and optionally
//! mutates) the value, nested containers, polymorphic object graphs,
//! soft/weak references and delegates included. Every drawer reports a
//! single boolean: was this subtree modified.
//!
//! On top of the drawers sit the labeled per-type entry points on
//! [`Inspector`], and the [`Overlay`]: a tag-keyed draw tree with
//! priority-ordered walking, visibility/focus chords and RON-persisted
//! [`OverlaySettings`].
//!
//! Rendering degrades softly everywhere: unsupported kinds, null handles,
//! nested containers and in-pass reference cycles draw inline placeholders
//! and never abort their siblings.

pub mod demo;

mod context;
mod drawer;
mod inspector;
mod overlay;
mod settings;

pub use context::DrawContext;
pub use drawer::{Scalar, TEXT_BUFFER_CAPACITY, draw_property, draw_property_value};
pub use inspector::{CustomDrawFn, CustomDrawers, Inspector};
pub use overlay::{
    ConflictPolicy, DrawTree, DrawTreeBehavior, DrawTreeNode, NodeHandle, NodeTag, Overlay,
};
pub use settings::{OverlaySettings, SettingsError};

/// The most common inspector types, re-exported for convenience.
pub mod prelude {
    pub use crate::{
        ConflictPolicy, CustomDrawers, DrawContext, DrawTree, DrawTreeBehavior, DrawTreeNode,
        Inspector, NodeTag, Overlay, OverlaySettings,
    };
}
