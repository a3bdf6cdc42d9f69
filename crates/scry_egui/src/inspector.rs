//! The inspector environment and the labeled per-type entry points.

use std::collections::HashMap;

use scry_reflect::{
    ClassId, EnumId, FieldInfo, FieldSlot, ObjectHandle, StructValue, TypeRegistry,
};

use crate::context::DrawContext;
use crate::drawer::{
    self, Scalar, draw_bool_value, draw_class_value, draw_enum_value, draw_object_value,
    draw_scalar_value, draw_string_value, draw_struct_value,
};

/// A custom per-class draw callback.
///
/// The callback receives the inspector so it can opt back into default
/// rendering for some or all of its own fields via
/// [`Inspector::draw_object`] with `force_draw_default` set.
pub type CustomDrawFn = Box<dyn Fn(Inspector<'_>, &mut egui::Ui, &ObjectHandle)>;

/// The custom drawers registered per class.
///
/// A class advertises the capability through
/// [`ClassFlags::CUSTOM_DRAWER`](scry_reflect::ClassFlags::CUSTOM_DRAWER);
/// the callback itself lives here, on the UI side of the seam.
#[derive(Default)]
pub struct CustomDrawers {
    drawers: HashMap<ClassId, CustomDrawFn>,
}

impl CustomDrawers {
    /// No custom drawers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the drawer for a class.
    pub fn register(
        &mut self,
        class: ClassId,
        drawer: impl Fn(Inspector<'_>, &mut egui::Ui, &ObjectHandle) + 'static,
    ) {
        self.drawers.insert(class, Box::new(drawer));
    }

    /// The drawer registered for a class, if any.
    pub fn get(&self, class: ClassId) -> Option<&CustomDrawFn> {
        self.drawers.get(&class)
    }

    /// Whether a drawer is registered for the class.
    pub fn contains(&self, class: ClassId) -> bool {
        self.drawers.contains_key(&class)
    }
}

/// The shared environment of one draw pass: the registry every id resolves
/// through, plus the registered custom drawers. Copyable, so drawers and
/// custom callbacks can re-enter the dispatch freely.
#[derive(Clone, Copy)]
pub struct Inspector<'a> {
    /// The registry all metadata ids resolve through.
    pub registry: &'a TypeRegistry,
    /// Custom per-class drawers.
    pub custom: &'a CustomDrawers,
}

impl<'a> Inspector<'a> {
    /// Bundles a registry and custom drawers into an inspector.
    pub fn new(registry: &'a TypeRegistry, custom: &'a CustomDrawers) -> Self {
        Self { registry, custom }
    }

    /// A `Name:` label and an id scope around a leaf drawer.
    fn var<R>(ui: &mut egui::Ui, name: &str, body: impl FnOnce(&mut egui::Ui) -> R) -> R {
        ui.push_id(name, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{name}:"));
                body(ui)
            })
            .inner
        })
        .inner
    }

    /// Draws a labeled numeric value. Returns whether it was modified.
    pub fn draw_primitive<T: Scalar>(
        &self,
        ui: &mut egui::Ui,
        name: &str,
        value: &mut T,
        mutable: bool,
    ) -> bool {
        let cx = DrawContext::with_mutable(mutable);
        Self::var(ui, name, |ui| draw_scalar_value(ui, value, &cx))
    }

    /// Draws a labeled boolean. Returns whether it was modified.
    pub fn draw_bool(&self, ui: &mut egui::Ui, name: &str, value: &mut bool, mutable: bool) -> bool {
        let cx = DrawContext::with_mutable(mutable);
        Self::var(ui, name, |ui| draw_bool_value(ui, value, &cx))
    }

    /// Draws a labeled string. Returns whether it was modified.
    pub fn draw_string(
        &self,
        ui: &mut egui::Ui,
        name: &str,
        value: &mut String,
        mutable: bool,
    ) -> bool {
        let cx = DrawContext::with_mutable(mutable);
        Self::var(ui, name, |ui| draw_string_value(ui, value, &cx))
    }

    /// Draws a labeled interned name. Same drawer as [`draw_string`].
    ///
    /// [`draw_string`]: Inspector::draw_string
    pub fn draw_name(
        &self,
        ui: &mut egui::Ui,
        name: &str,
        value: &mut String,
        mutable: bool,
    ) -> bool {
        self.draw_string(ui, name, value, mutable)
    }

    /// Draws labeled display text. Same drawer as [`draw_string`].
    ///
    /// [`draw_string`]: Inspector::draw_string
    pub fn draw_text(
        &self,
        ui: &mut egui::Ui,
        name: &str,
        value: &mut String,
        mutable: bool,
    ) -> bool {
        self.draw_string(ui, name, value, mutable)
    }

    /// Draws a labeled enum value by underlying value. Returns whether it
    /// was modified.
    pub fn draw_enum(
        &self,
        ui: &mut egui::Ui,
        name: &str,
        value: &mut i64,
        enum_id: EnumId,
        mutable: bool,
    ) -> bool {
        let cx = DrawContext::with_mutable(mutable);
        let info = self.registry.enum_info(enum_id);
        Self::var(ui, name, |ui| {
            match draw_enum_value(ui, info, *value, &cx) {
                Some(new_value) => {
                    *value = new_value;
                    true
                }
                None => false,
            }
        })
    }

    /// Draws a labeled class reference bounded by `parent`. Returns whether
    /// it was modified.
    pub fn draw_class(
        &self,
        ui: &mut egui::Ui,
        name: &str,
        class: &mut Option<ClassId>,
        parent: ClassId,
        mutable: bool,
    ) -> bool {
        let cx = DrawContext::with_mutable(mutable);
        Self::var(ui, name, |ui| {
            match draw_class_value(*self, ui, *class, parent, &cx) {
                Some(new_class) => {
                    *class = new_class;
                    true
                }
                None => false,
            }
        })
    }

    /// Draws a labeled struct value. Returns whether any field was modified.
    pub fn draw_struct(
        &self,
        ui: &mut egui::Ui,
        name: &str,
        value: &mut StructValue,
        mutable: bool,
        collapsing_header: bool,
    ) -> bool {
        let cx = DrawContext {
            mutable,
            collapsing_header,
            field_name: name.to_owned(),
            ..DrawContext::default()
        };
        ui.push_id(name, |ui| {
            ui.label(format!("{name}:"));
            draw_struct_value(*self, ui, value, &cx)
        })
        .inner
    }

    /// Draws an object graph from its most-derived class down the
    /// inheritance chain. `force_draw_default` bypasses a custom drawer for
    /// exactly this invocation (and its ancestor levels), letting a custom
    /// drawer re-enter default rendering for its own fields.
    ///
    /// Returns whether any field of any level was modified.
    pub fn draw_object(
        &self,
        ui: &mut egui::Ui,
        object: &ObjectHandle,
        collapsing_header: bool,
        force_draw_default: bool,
    ) -> bool {
        let Ok(root_class) = object.try_borrow().map(|instance| instance.class()) else {
            // Re-entered from inside this object's own draw; nothing to do.
            return false;
        };
        let cx = DrawContext {
            collapsing_header,
            force_draw_default,
            root_class: Some(root_class),
            ..DrawContext::default()
        };
        draw_object_value(*self, ui, Some(object), root_class, &cx)
    }

    /// Draws one named field of any kind through the generic dispatch.
    /// Returns whether the field was modified.
    pub fn draw_property(
        &self,
        ui: &mut egui::Ui,
        field: &FieldInfo,
        slot: &mut FieldSlot,
        mutable: bool,
        collapsing_header: bool,
    ) -> bool {
        let cx = DrawContext {
            mutable,
            collapsing_header,
            field_name: field.name().to_owned(),
            ..DrawContext::default()
        };
        drawer::draw_property(*self, ui, field, slot, &cx)
    }
}
