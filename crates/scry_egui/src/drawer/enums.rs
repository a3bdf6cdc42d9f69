//! The enum drawer: a combo over the defined entries, sentinel excluded.

use scry_reflect::{EnumInfo, PropertyKind, PropertyType, Value};

use super::draw_type_mismatch;
use crate::context::DrawContext;
use crate::inspector::Inspector;

fn entry_label(info: &EnumInfo, index: usize) -> String {
    match info.entry_at(index) {
        Some(entry) => format!("{}({})", entry.name(), entry.value()),
        None => String::from("<out of range>"),
    }
}

/// Draws an enum value. Underlying values may be non-contiguous, so the
/// display index always goes through the metadata. Returns the newly
/// selected underlying value, if any.
pub(crate) fn draw_enum_value(
    ui: &mut egui::Ui,
    info: &EnumInfo,
    value: i64,
    cx: &DrawContext,
) -> Option<i64> {
    let current_index = info.index_of_value(value);
    let current_text = match current_index {
        Some(index) => entry_label(info, index),
        None => format!("<unknown>({value})"),
    };

    if cx.mutable {
        let mut selection = None;
        egui::ComboBox::from_id_salt(info.name())
            .selected_text(current_text)
            .show_ui(ui, |ui| {
                // The trailing sentinel entry is never offered.
                for index in 0..info.selectable_count() {
                    let selected = current_index == Some(index);
                    if ui.selectable_label(selected, entry_label(info, index)).clicked() {
                        selection = info.value_at(index);
                    }
                }
            });
        selection
    } else {
        ui.label(current_text);
        None
    }
}

pub(crate) fn draw_enum_property(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    ty: &PropertyType,
    value: &mut Value,
    cx: &DrawContext,
) -> bool {
    let PropertyType::Enum(id) = ty else {
        return draw_type_mismatch(ui, PropertyKind::Enum);
    };
    let Value::Enum { value, .. } = value else {
        return draw_type_mismatch(ui, PropertyKind::Enum);
    };
    let info = inspector.registry.enum_info(*id);
    match draw_enum_value(ui, info, *value, cx) {
        Some(new_value) => {
            *value = new_value;
            true
        }
        None => false,
    }
}
