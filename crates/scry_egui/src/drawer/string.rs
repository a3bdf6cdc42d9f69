//! The shared drawer for string-like values: plain strings, interned names
//! and display text.

use scry_reflect::{PropertyKind, PropertyType, Value};

use super::{ERROR_COLOR, draw_type_mismatch};
use crate::context::DrawContext;
use crate::inspector::Inspector;

/// The edit buffer capacity in characters.
///
/// Values longer than this are truncated while editing. A known risk for
/// pathological strings; long values are debug data, not prose.
pub const TEXT_BUFFER_CAPACITY: usize = 4096;

/// Draws a string: a bounded multiline editor plus a Clear action when
/// mutable; the text, or a highlighted `{Empty}` placeholder, otherwise.
pub(crate) fn draw_string_value(ui: &mut egui::Ui, value: &mut String, cx: &DrawContext) -> bool {
    if cx.mutable {
        let mut modified = ui
            .add(
                egui::TextEdit::multiline(value)
                    .desired_rows(1)
                    .char_limit(TEXT_BUFFER_CAPACITY),
            )
            .changed();
        if ui.button("Clear").clicked() {
            value.clear();
            modified = true;
        }
        modified
    } else if value.is_empty() {
        ui.colored_label(ERROR_COLOR, "{Empty}");
        false
    } else {
        ui.label(value.as_str());
        false
    }
}

macro_rules! string_property_drawer {
    ($name:ident, $variant:ident) => {
        pub(crate) fn $name(
            _inspector: Inspector<'_>,
            ui: &mut egui::Ui,
            _ty: &PropertyType,
            value: &mut Value,
            cx: &DrawContext,
        ) -> bool {
            let Value::$variant(value) = value else {
                return draw_type_mismatch(ui, PropertyKind::$variant);
            };
            draw_string_value(ui, value, cx)
        }
    };
}

string_property_drawer!(draw_str_property, Str);
string_property_drawer!(draw_name_property, Name);
string_property_drawer!(draw_text_property, Text);
