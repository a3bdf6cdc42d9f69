//! Object, struct and reference drawers, including the inheritance walk.
//!
//! Object drawing recurses up the class chain one level at a time: each
//! level draws its own fields, and its immediate parent draws inside a
//! nested `Parent: (...)` section. Mutability and custom-drawer capability
//! are queried on each exact level independently, so a mutable subclass
//! never makes its parent's fields editable.

use scry_reflect::{
    ClassId, ClassInfo, ObjectHandle, PropertyKind, PropertyType, SoftState, StructValue, Value,
};

use super::{ERROR_COLOR, WARN_COLOR, draw_property, draw_type_mismatch};
use crate::context::DrawContext;
use crate::inspector::Inspector;

/// Draws a struct's fields, optionally behind a `(<StructName>)` header.
/// A collapsed header renders nothing further.
pub(crate) fn draw_struct_value(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    value: &mut StructValue,
    cx: &DrawContext,
) -> bool {
    let info = inspector.registry.struct_info(value.id());
    let mut draw_fields = |ui: &mut egui::Ui| {
        ui.push_id((cx.field_name.as_str(), info.name()), |ui| {
            let mut child = cx.clone();
            child.collapsing_header = true;
            let mut modified = false;
            for (field, slot) in info.fields().iter().zip(value.slots_mut()) {
                modified |= draw_property(inspector, ui, field, slot, &child);
            }
            modified
        })
        .inner
    };

    if cx.collapsing_header {
        egui::CollapsingHeader::new(format!("({})", info.name()))
            .show(ui, draw_fields)
            .body_returned
            .unwrap_or(false)
    } else {
        draw_fields(ui)
    }
}

pub(crate) fn draw_struct_property(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    ty: &PropertyType,
    value: &mut Value,
    cx: &DrawContext,
) -> bool {
    let PropertyType::Struct(_) = ty else {
        return draw_type_mismatch(ui, PropertyKind::Struct);
    };
    let Value::Struct(value) = value else {
        return draw_type_mismatch(ui, PropertyKind::Struct);
    };
    draw_struct_value(inspector, ui, value, cx)
}

/// The context one inheritance level draws its own fields with: headers on,
/// mutability taken from that exact level's flags.
pub(crate) fn level_context(info: &ClassInfo, cx: &DrawContext) -> DrawContext {
    let mut level_cx = cx.clone();
    level_cx.collapsing_header = true;
    level_cx.mutable = info.is_mutable();
    level_cx
}

/// Draws an object, optionally behind an `<Instance> (<Class>)` header.
///
/// A null object renders a red `NULL (<Class>)` placeholder; an object that
/// is already borrowed higher up this same pass (a reference cycle) renders
/// an amber placeholder instead of recursing.
pub(crate) fn draw_object_value(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    object: Option<&ObjectHandle>,
    class: ClassId,
    cx: &DrawContext,
) -> bool {
    let class_name = inspector.registry.class(class).name();
    let Some(handle) = object else {
        ui.colored_label(ERROR_COLOR, format!("NULL ({class_name})"));
        return false;
    };
    let title = match handle.try_borrow() {
        Ok(instance) => format!("{} ({class_name})", instance.name()),
        Err(_) => {
            ui.colored_label(WARN_COLOR, format!("({class_name}) is already being drawn"));
            return false;
        }
    };

    if cx.collapsing_header {
        egui::CollapsingHeader::new(title)
            .show(ui, |ui| draw_object_levels(inspector, ui, handle, class, cx))
            .body_returned
            .unwrap_or(false)
    } else {
        draw_object_levels(inspector, ui, handle, class, cx)
    }
}

/// Draws one inheritance level of an object: the nested parent section
/// first, then this level's own fields with this level's own mutability.
pub(crate) fn draw_object_levels(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    handle: &ObjectHandle,
    class: ClassId,
    cx: &DrawContext,
) -> bool {
    let registry = inspector.registry;
    let info = registry.class(class);

    ui.push_id((info.name(), "level"), |ui| {
        if info.has_custom_drawer() && !cx.force_draw_default {
            if let Some(custom) = inspector.custom.get(class) {
                custom(inspector, ui, handle);
                return false;
            }
            // Flagged but nothing registered; default rendering is the only
            // sensible degrade.
        }

        let mut level_cx = level_context(info, cx);
        let mut modified = false;

        if let Some(parent) = info.parent() {
            // The forced-default flag rides along to ancestor levels, but
            // not into any field draw below.
            let parent_cx = level_cx.clone();
            let header = format!("Parent: ({})", registry.class(parent).name());
            if let Some(inner) = egui::CollapsingHeader::new(header)
                .show(ui, |ui| draw_object_levels(inspector, ui, handle, parent, &parent_cx))
                .body_returned
            {
                modified |= inner;
            }
        }
        level_cx.force_draw_default = false;

        match handle.try_borrow_mut() {
            Ok(mut instance) => {
                if let Some(level) = instance.level_mut(class) {
                    for (field, slot) in info.fields().iter().zip(level.slots_mut()) {
                        modified |= draw_property(inspector, ui, field, slot, &level_cx);
                    }
                }
            }
            Err(_) => {
                ui.colored_label(
                    WARN_COLOR,
                    format!("({}) is already being drawn", info.name()),
                );
            }
        }
        modified
    })
    .inner
}

/// The runtime class of a referenced object, or the declared bound when the
/// reference is null or unreadable this pass.
fn runtime_class(handle: Option<&ObjectHandle>, declared: ClassId) -> ClassId {
    handle
        .and_then(|handle| handle.try_borrow().ok().map(|instance| instance.class()))
        .unwrap_or(declared)
}

pub(crate) fn draw_object_property(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    ty: &PropertyType,
    value: &mut Value,
    cx: &DrawContext,
) -> bool {
    let PropertyType::Object { class } = ty else {
        return draw_type_mismatch(ui, PropertyKind::Object);
    };
    let Value::Object(handle) = value else {
        return draw_type_mismatch(ui, PropertyKind::Object);
    };
    let class = runtime_class(handle.as_ref(), *class);
    draw_object_value(inspector, ui, handle.as_ref(), class, cx);
    // The slot holds a reference, and the reference itself is never
    // reassigned here; only the referenced object's fields change.
    false
}

pub(crate) fn draw_weak_object_property(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    ty: &PropertyType,
    value: &mut Value,
    cx: &DrawContext,
) -> bool {
    let PropertyType::WeakObject { class } = ty else {
        return draw_type_mismatch(ui, PropertyKind::WeakObject);
    };
    let Value::WeakObject(weak) = value else {
        return draw_type_mismatch(ui, PropertyKind::WeakObject);
    };
    let target = weak.upgrade();
    let class = runtime_class(target.as_ref(), *class);
    draw_object_value(inspector, ui, target.as_ref(), class, cx);
    false
}

pub(crate) fn draw_interface_property(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    ty: &PropertyType,
    value: &mut Value,
    cx: &DrawContext,
) -> bool {
    let PropertyType::Interface { class } = ty else {
        return draw_type_mismatch(ui, PropertyKind::Interface);
    };
    let Value::Interface(handle) = value else {
        return draw_type_mismatch(ui, PropertyKind::Interface);
    };
    let class = runtime_class(handle.as_ref(), *class);
    draw_object_value(inspector, ui, handle.as_ref(), class, cx);
    false
}

/// Soft objects track the same three load states as soft classes. Only the
/// explicit LOAD action reports a modification; edits to the loaded target's
/// fields belong to the target, not to the reference slot.
pub(crate) fn draw_soft_object_property(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    ty: &PropertyType,
    value: &mut Value,
    cx: &DrawContext,
) -> bool {
    let PropertyType::SoftObject { class } = ty else {
        return draw_type_mismatch(ui, PropertyKind::SoftObject);
    };
    let Value::SoftObject(soft) = value else {
        return draw_type_mismatch(ui, PropertyKind::SoftObject);
    };
    let registry = inspector.registry;
    let mut modified = false;

    match soft.state() {
        SoftState::Loaded => {
            if let Some(handle) = soft.resolved().cloned() {
                let class = runtime_class(Some(&handle), *class);
                let title = format!(
                    "{} - LOADED ({})",
                    soft.path(),
                    registry.class(class).name()
                );
                egui::CollapsingHeader::new(title).show(ui, |ui| {
                    draw_object_levels(inspector, ui, &handle, class, cx);
                });
            }
        }
        SoftState::Pending => {
            ui.colored_label(
                WARN_COLOR,
                format!(
                    "{} - UNLOADED ({})",
                    soft.path(),
                    registry.class(*class).name()
                ),
            );
            if cx.mutable && ui.button("LOAD").clicked() {
                modified |= soft.load();
            }
        }
        SoftState::Invalid => {
            let path = if soft.path().is_empty() {
                "{Empty}"
            } else {
                soft.path()
            };
            ui.colored_label(
                ERROR_COLOR,
                format!("{path} - INVALID ({})", registry.class(*class).name()),
            );
        }
    }

    modified
}

#[cfg(test)]
mod tests {
    use scry_reflect::{ClassFlags, FieldInfo, TypeRegistry};

    use super::*;

    #[test]
    fn only_the_exact_level_grants_mutability() {
        let mut registry = TypeRegistry::default();
        let base = registry
            .register_class(
                ClassInfo::new("Base")
                    .with_field(FieldInfo::new("id", PropertyType::U32)),
            )
            .unwrap();
        let middle = registry
            .register_class(
                ClassInfo::new("Middle")
                    .with_parent(base)
                    .with_flags(ClassFlags::MUTABLE)
                    .with_field(FieldInfo::new("health", PropertyType::F32)),
            )
            .unwrap();
        let derived = registry
            .register_class(
                ClassInfo::new("Derived")
                    .with_parent(middle)
                    .with_field(FieldInfo::new("title", PropertyType::Text)),
            )
            .unwrap();

        // Whatever the caller asked for, each level re-derives its own
        // mutability from its own flags.
        let cx = DrawContext::with_mutable(true);
        assert!(!level_context(registry.class(base), &cx).mutable);
        assert!(level_context(registry.class(middle), &cx).mutable);
        assert!(!level_context(registry.class(derived), &cx).mutable);
    }

    #[test]
    fn level_contexts_always_fold_nested_aggregates() {
        let mut registry = TypeRegistry::default();
        let base = registry
            .register_class(ClassInfo::new("Base"))
            .unwrap();
        let mut cx = DrawContext::default();
        cx.collapsing_header = false;
        assert!(level_context(registry.class(base), &cx).collapsing_header);
    }
}
