//! Class and soft-class drawers.

use scry_reflect::{ClassId, PropertyKind, PropertyType, SoftState, Value};

use super::{ERROR_COLOR, WARN_COLOR, draw_type_mismatch};
use crate::context::DrawContext;
use crate::inspector::Inspector;

/// Draws a class reference bounded by `parent`.
///
/// Mutable mode offers `{NULL, parent, every class derived from parent}`;
/// read-only mode renders `Class (Parent)` with a null class highlighted as
/// an error. Returns the newly selected class, if any.
pub(crate) fn draw_class_value(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    class: Option<ClassId>,
    parent: ClassId,
    cx: &DrawContext,
) -> Option<Option<ClassId>> {
    let registry = inspector.registry;
    let class_name = |id: Option<ClassId>| -> String {
        id.map_or_else(|| "NULL".to_owned(), |id| registry.class(id).name().to_owned())
    };
    let parent_name = registry.class(parent).name();
    let title = format!("{} ({parent_name})", class_name(class));

    if cx.mutable {
        let mut selection = None;
        egui::ComboBox::from_id_salt(parent_name)
            .selected_text(title)
            .show_ui(ui, |ui| {
                let mut candidates = vec![None, Some(parent)];
                candidates.extend(registry.derived_classes(parent).into_iter().map(Some));
                for candidate in candidates {
                    let selected = candidate == class;
                    if ui.selectable_label(selected, class_name(candidate)).clicked() {
                        selection = Some(candidate);
                    }
                }
            });
        selection
    } else {
        if class.is_none() {
            ui.colored_label(ERROR_COLOR, title);
        } else {
            ui.label(title);
        }
        None
    }
}

pub(crate) fn draw_class_property(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    ty: &PropertyType,
    value: &mut Value,
    cx: &DrawContext,
) -> bool {
    let PropertyType::Class { parent } = ty else {
        return draw_type_mismatch(ui, PropertyKind::Class);
    };
    let Value::Class(class) = value else {
        return draw_type_mismatch(ui, PropertyKind::Class);
    };
    match draw_class_value(inspector, ui, *class, *parent, cx) {
        Some(new_class) => {
            *class = new_class;
            true
        }
        None => false,
    }
}

/// Soft classes track three load states. The class picker hides behind an
/// explicit `Modify` disclosure so browsing never triggers a load by
/// accident.
pub(crate) fn draw_soft_class_property(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    ty: &PropertyType,
    value: &mut Value,
    cx: &DrawContext,
) -> bool {
    let PropertyType::SoftClass { parent } = ty else {
        return draw_type_mismatch(ui, PropertyKind::SoftClass);
    };
    let Value::SoftClass(soft) = value else {
        return draw_type_mismatch(ui, PropertyKind::SoftClass);
    };
    let registry = inspector.registry;
    let parent_name = registry.class(*parent).name();
    let mut modified = false;

    match soft.state() {
        SoftState::Loaded => {
            ui.label(format!("{} - LOADED ({parent_name})", soft.path()));
        }
        SoftState::Pending => {
            ui.colored_label(
                WARN_COLOR,
                format!("{} - UNLOADED ({parent_name})", soft.path()),
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
            ui.colored_label(ERROR_COLOR, format!("{path} - INVALID ({parent_name})"));
        }
    }

    if cx.mutable {
        egui::CollapsingHeader::new("Modify").show(ui, |ui| {
            if let Some(new_class) = draw_class_value(inspector, ui, soft.target(), *parent, cx) {
                let path = new_class
                    .map(|id| registry.class(id).name().to_owned())
                    .unwrap_or_default();
                soft.assign(new_class, path);
                modified = true;
            }
        });
    }

    modified
}
