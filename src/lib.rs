#![doc = include_str!("../README.md")]

pub use scry_egui as inspector;
pub use scry_reflect as reflect;

/// The most common types and entry points, re-exported for convenience.
pub mod prelude {
    pub use crate::inspector::prelude::*;
    pub use crate::reflect::prelude::*;
}
