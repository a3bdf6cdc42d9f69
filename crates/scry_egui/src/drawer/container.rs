//! The generic container drawer for arrays, sets and maps.
//!
//! Structural edits never happen mid-traversal: a pass renders every visible
//! element, records at most one pending removal and one add request, and the
//! kind-specific drawer applies them after the pass completes. Sets and maps
//! rebuild their hash index after any mutating pass, since their layout
//! depends on element identity.

use scry_reflect::{MapValue, PropertyKind, PropertyType, SetValue, TypeRegistry, Value};

use super::{WARN_COLOR, draw_property_value, draw_type_mismatch};
use crate::context::DrawContext;
use crate::inspector::Inspector;

/// The single pending-removal slot of one container pass.
///
/// Only one removal is honored per pass; if several Remove triggers fire in
/// the same pass, the last request wins and the earlier ones are silently
/// dropped. A preserved quirk of the single-slot design; callers that need
/// more remove one element per frame.
#[derive(Debug, Default)]
pub(crate) struct PendingRemoval(Option<usize>);

impl PendingRemoval {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records a removal request, replacing any earlier one.
    pub(crate) fn request(&mut self, index: usize) {
        self.0 = Some(index);
    }

    /// Consumes the pending request, if any.
    pub(crate) fn take(&mut self) -> Option<usize> {
        self.0.take()
    }
}

/// What one container pass observed and requested.
pub(crate) struct ContainerPass {
    /// Whether any element reported an in-place modification.
    pub(crate) modified: bool,
    /// Whether the Add Defaulted action fired.
    pub(crate) add_requested: bool,
    /// The single deferred removal, if any Remove trigger fired.
    pub(crate) pending_removal: Option<usize>,
}

/// Renders one container pass: the collapsing header, the per-index rows
/// with their Remove buttons, and the Add Defaulted action. A collapsed
/// header skips the children entirely, so cost is proportional to the
/// visible elements only.
fn container_pass(
    ui: &mut egui::Ui,
    title: String,
    element_count: usize,
    has_inner_container: bool,
    cx: &DrawContext,
    draw_at: &mut dyn FnMut(&mut egui::Ui, usize, &DrawContext) -> bool,
) -> ContainerPass {
    let mut pass = ContainerPass {
        modified: false,
        add_requested: false,
        pending_removal: None,
    };

    if has_inner_container {
        ui.colored_label(
            WARN_COLOR,
            "Containers with container elements are not supported!",
        );
        return pass;
    }

    let mut pending = PendingRemoval::new();
    let mut body = |ui: &mut egui::Ui| {
        let mut child = cx.clone();
        child.collapsing_header = true;
        for index in 0..element_count {
            ui.push_id((cx.field_name.as_str(), index), |ui| {
                ui.horizontal(|ui| {
                    ui.label(format!("[{index}]"));
                    if cx.mutable && ui.button("Remove").clicked() {
                        pending.request(index);
                    }
                    pass.modified |= draw_at(ui, index, &child);
                });
            });
        }
        if cx.mutable && ui.button("Add Defaulted").clicked() {
            pass.add_requested = true;
        }
    };

    if cx.collapsing_header {
        egui::CollapsingHeader::new(title).show(ui, body);
    } else {
        body(ui);
    }

    pass.pending_removal = pending.take();
    pass
}

/// Applies a pass to a plain array. Adds are appended before the removal is
/// honored, so a recorded removal index stays valid.
pub(crate) fn apply_array_pass(
    elements: &mut Vec<Value>,
    element_ty: &PropertyType,
    registry: &TypeRegistry,
    pass: &mut ContainerPass,
) {
    if pass.add_requested {
        elements.push(registry.default_value(element_ty));
        pass.modified = true;
    }
    if let Some(index) = pass.pending_removal.take() {
        if index < elements.len() {
            elements.remove(index);
            pass.modified = true;
        }
    }
}

/// Applies a pass to a set, then rebuilds the hash index if anything in the
/// pass (structural or in-place) changed element identity.
pub(crate) fn apply_set_pass(
    set: &mut SetValue,
    element_ty: &PropertyType,
    registry: &TypeRegistry,
    pass: &mut ContainerPass,
) {
    if pass.add_requested {
        set.add(registry.default_value(element_ty));
        pass.modified = true;
    }
    if let Some(index) = pass.pending_removal.take() {
        set.remove_at(index);
        pass.modified = true;
    }
    if pass.modified {
        set.rehash();
    }
}

/// Applies a pass to a map, then rebuilds the key index if anything changed.
pub(crate) fn apply_map_pass(
    map: &mut MapValue,
    key_ty: &PropertyType,
    value_ty: &PropertyType,
    registry: &TypeRegistry,
    pass: &mut ContainerPass,
) {
    if pass.add_requested {
        map.add(
            registry.default_value(key_ty),
            registry.default_value(value_ty),
        );
        pass.modified = true;
    }
    if let Some(index) = pass.pending_removal.take() {
        map.remove_at(index);
        pass.modified = true;
    }
    if pass.modified {
        map.rehash();
    }
}

pub(crate) fn draw_array_property(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    ty: &PropertyType,
    value: &mut Value,
    cx: &DrawContext,
) -> bool {
    let PropertyType::Array(element_ty) = ty else {
        return draw_type_mismatch(ui, PropertyKind::Array);
    };
    let Value::Array(elements) = value else {
        return draw_type_mismatch(ui, PropertyKind::Array);
    };

    let title = format!(
        "Array<{}> (Num: {})",
        element_ty.display_name(inspector.registry),
        elements.len()
    );
    let count = elements.len();
    let mut pass = container_pass(
        ui,
        title,
        count,
        element_ty.is_container(),
        cx,
        &mut |ui, index, child| draw_property_value(inspector, ui, element_ty, &mut elements[index], child),
    );
    apply_array_pass(elements, element_ty, inspector.registry, &mut pass);
    pass.modified
}

pub(crate) fn draw_set_property(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    ty: &PropertyType,
    value: &mut Value,
    cx: &DrawContext,
) -> bool {
    let PropertyType::Set(element_ty) = ty else {
        return draw_type_mismatch(ui, PropertyKind::Set);
    };
    let Value::Set(set) = value else {
        return draw_type_mismatch(ui, PropertyKind::Set);
    };

    let title = format!(
        "Set<{}> (Num: {})",
        element_ty.display_name(inspector.registry),
        set.len()
    );
    let count = set.len();
    let mut pass = container_pass(
        ui,
        title,
        count,
        element_ty.is_container(),
        cx,
        &mut |ui, index, child| match set.element_mut(index) {
            Some(element) => draw_property_value(inspector, ui, element_ty, element, child),
            None => false,
        },
    );
    apply_set_pass(set, element_ty, inspector.registry, &mut pass);
    pass.modified
}

pub(crate) fn draw_map_property(
    inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    ty: &PropertyType,
    value: &mut Value,
    cx: &DrawContext,
) -> bool {
    let PropertyType::Map { key, value: value_ty } = ty else {
        return draw_type_mismatch(ui, PropertyKind::Map);
    };
    let Value::Map(map) = value else {
        return draw_type_mismatch(ui, PropertyKind::Map);
    };

    let title = format!(
        "Map<{}, {}> (Num: {})",
        key.display_name(inspector.registry),
        value_ty.display_name(inspector.registry),
        map.len()
    );
    let count = map.len();
    let has_inner_container = key.is_container() || value_ty.is_container();
    let mut pass = container_pass(
        ui,
        title,
        count,
        has_inner_container,
        cx,
        &mut |ui, index, child| {
            let Some((map_key, map_value)) = map.pair_mut(index) else {
                return false;
            };
            let mut modified = false;
            ui.indent("pair", |ui| {
                ui.horizontal(|ui| {
                    ui.label("Key:");
                    modified |= draw_property_value(inspector, ui, key, map_key, child);
                });
                ui.horizontal(|ui| {
                    ui.label("Value:");
                    modified |= draw_property_value(inspector, ui, value_ty, map_value, child);
                });
            });
            modified
        },
    );
    apply_map_pass(map, key, value_ty, inspector.registry, &mut pass);
    pass.modified
}
