//! The kind-directed drawer dispatch.
//!
//! [`draw_property`] renders one named field (all of its fixed indices);
//! [`draw_property_value`] renders one value by looking its kind up in a
//! dispatch table built once at startup. Drawers recurse back into
//! [`draw_property_value`] for nested values, so the whole pass is a single
//! synchronous, call-stack-bound recursion.
//!
//! Every id-stack push is scoped through egui closures, so each push is
//! popped on every exit path by construction, and sibling fields with
//! identical labels never collide.

mod class;
mod container;
mod delegate;
mod enums;
mod object;
mod primitive;
mod string;

use std::collections::HashMap;
use std::sync::LazyLock;

use scry_reflect::{FieldInfo, FieldSlot, PropertyKind, PropertyType, Value};

use crate::context::DrawContext;
use crate::inspector::Inspector;

pub use primitive::Scalar;
pub use string::TEXT_BUFFER_CAPACITY;

pub(crate) use class::draw_class_value;
pub(crate) use enums::draw_enum_value;
pub(crate) use object::{draw_object_value, draw_struct_value};
pub(crate) use primitive::{draw_bool_value, draw_scalar_value};
pub(crate) use string::draw_string_value;

/// Text color for values that demand attention without being errors.
pub(crate) const WARN_COLOR: egui::Color32 = egui::Color32::YELLOW;
/// Text color for null, invalid or empty values.
pub(crate) const ERROR_COLOR: egui::Color32 = egui::Color32::RED;
/// Read-only color of a `true` boolean.
pub(crate) const TRUE_COLOR: egui::Color32 = egui::Color32::GREEN;
/// Read-only color of a `false` boolean.
pub(crate) const FALSE_COLOR: egui::Color32 = egui::Color32::RED;

type DrawFn = fn(Inspector<'_>, &mut egui::Ui, &PropertyType, &mut Value, &DrawContext) -> bool;

/// The kind → drawer mapping, built once. A kind without an entry renders
/// the unsupported-type placeholder instead of failing.
static DRAW_FNS: LazyLock<HashMap<PropertyKind, DrawFn>> = LazyLock::new(|| {
    HashMap::from([
        (PropertyKind::Bool, primitive::draw_bool_property as DrawFn),
        (PropertyKind::I8, primitive::draw_i8_property as DrawFn),
        (PropertyKind::I16, primitive::draw_i16_property as DrawFn),
        (PropertyKind::I32, primitive::draw_i32_property as DrawFn),
        (PropertyKind::I64, primitive::draw_i64_property as DrawFn),
        (PropertyKind::U8, primitive::draw_u8_property as DrawFn),
        (PropertyKind::U16, primitive::draw_u16_property as DrawFn),
        (PropertyKind::U32, primitive::draw_u32_property as DrawFn),
        (PropertyKind::U64, primitive::draw_u64_property as DrawFn),
        (PropertyKind::F32, primitive::draw_f32_property as DrawFn),
        (PropertyKind::F64, primitive::draw_f64_property as DrawFn),
        (PropertyKind::Str, string::draw_str_property as DrawFn),
        (PropertyKind::Name, string::draw_name_property as DrawFn),
        (PropertyKind::Text, string::draw_text_property as DrawFn),
        (PropertyKind::Enum, enums::draw_enum_property as DrawFn),
        (PropertyKind::Class, class::draw_class_property as DrawFn),
        (PropertyKind::SoftClass, class::draw_soft_class_property as DrawFn),
        (PropertyKind::Struct, object::draw_struct_property as DrawFn),
        (PropertyKind::Object, object::draw_object_property as DrawFn),
        (
            PropertyKind::WeakObject,
            object::draw_weak_object_property as DrawFn,
        ),
        (
            PropertyKind::SoftObject,
            object::draw_soft_object_property as DrawFn,
        ),
        (
            PropertyKind::Interface,
            object::draw_interface_property as DrawFn,
        ),
        (PropertyKind::Array, container::draw_array_property as DrawFn),
        (PropertyKind::Set, container::draw_set_property as DrawFn),
        (PropertyKind::Map, container::draw_map_property as DrawFn),
        (
            PropertyKind::Delegate,
            delegate::draw_delegate_property as DrawFn,
        ),
        (
            PropertyKind::MulticastDelegate,
            delegate::draw_multicast_delegate_property as DrawFn,
        ),
    ])
});

/// Kinds whose drawers fit on the same line as the field label.
fn is_inline(kind: PropertyKind) -> bool {
    !matches!(
        kind,
        PropertyKind::Struct
            | PropertyKind::Object
            | PropertyKind::WeakObject
            | PropertyKind::SoftObject
            | PropertyKind::SoftClass
            | PropertyKind::Interface
            | PropertyKind::Array
            | PropertyKind::Set
            | PropertyKind::Map
            | PropertyKind::Delegate
            | PropertyKind::MulticastDelegate
    )
}

/// Draws one named field: a label plus one value per fixed index, each index
/// at a stable id. Returns whether any index was modified.
pub fn draw_property(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    field: &FieldInfo,
    slot: &mut FieldSlot,
    cx: &DrawContext,
) -> bool {
    let inline = is_inline(field.ty().kind());
    let fixed_dim = slot.len();
    if !inline || fixed_dim > 1 {
        ui.label(format!("{}:", field.name()));
    }

    let mut modified = false;
    for (index, value) in slot.values_mut().iter_mut().enumerate() {
        let mut child = cx.clone();
        child.field_name = field.name().to_owned();
        modified |= ui
            .push_id((field.name(), index), |ui| {
                if fixed_dim > 1 {
                    ui.indent("fixed_index", |ui| {
                        ui.horizontal(|ui| {
                            ui.label(format!("[{index}]"));
                            draw_property_value(inspector, ui, field.ty(), value, &child)
                        })
                        .inner
                    })
                    .inner
                } else if inline {
                    ui.horizontal(|ui| {
                        ui.label(format!("{}:", field.name()));
                        draw_property_value(inspector, ui, field.ty(), value, &child)
                    })
                    .inner
                } else {
                    draw_property_value(inspector, ui, field.ty(), value, &child)
                }
            })
            .inner;
    }
    modified
}

/// Draws one value through the dispatch table, inside an id scope salted
/// with the current field name. Returns whether the value was modified.
pub fn draw_property_value(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    ty: &PropertyType,
    value: &mut Value,
    cx: &DrawContext,
) -> bool {
    ui.push_id(cx.field_name.as_str(), |ui| {
        match DRAW_FNS.get(&ty.kind()) {
            Some(draw) => draw(inspector, ui, ty, value, cx),
            None => {
                draw_unsupported(ui, &ty.display_name(inspector.registry));
                false
            }
        }
    })
    .inner
}

/// The placeholder for kinds without a drawer. Never reports modification.
pub(crate) fn draw_unsupported(ui: &mut egui::Ui, type_name: &str) {
    ui.colored_label(WARN_COLOR, format!("Unsupported type ({type_name})"));
}

/// The placeholder for a value whose payload does not match the declared
/// kind. A soft degrade: siblings keep rendering.
pub(crate) fn draw_type_mismatch(ui: &mut egui::Ui, expected: PropertyKind) -> bool {
    ui.colored_label(
        WARN_COLOR,
        format!("Unsupported type (value does not match declared {expected})"),
    );
    false
}
