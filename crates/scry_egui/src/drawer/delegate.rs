//! Delegate drawers: signature headers and per-binding unbind actions.

use scry_reflect::{PropertyKind, PropertyType, SignatureInfo, Value};

use super::container::PendingRemoval;
use super::{ERROR_COLOR, draw_type_mismatch};
use crate::context::DrawContext;
use crate::inspector::Inspector;

fn signature_text(signature: &SignatureInfo, bound: bool) -> String {
    let tag = if bound { "Bound" } else { "Unbound" };
    format!("{signature} {{{tag}}}")
}

/// An unbound delegate renders its signature and a plain `{Unbound}` marker
/// with no expandable detail.
fn draw_unbound(ui: &mut egui::Ui, signature: &SignatureInfo) {
    ui.horizontal(|ui| {
        ui.label(signature_text(signature, false));
        ui.colored_label(ERROR_COLOR, "{Unbound}");
    });
}

pub(crate) fn draw_delegate_property(
    _inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    ty: &PropertyType,
    value: &mut Value,
    cx: &DrawContext,
) -> bool {
    let PropertyType::Delegate(signature) = ty else {
        return draw_type_mismatch(ui, PropertyKind::Delegate);
    };
    let Value::Delegate(delegate) = value else {
        return draw_type_mismatch(ui, PropertyKind::Delegate);
    };

    if !delegate.is_bound() {
        draw_unbound(ui, signature);
        return false;
    }

    egui::CollapsingHeader::new(signature_text(signature, true))
        .show(ui, |ui| {
            let mut modified = false;
            ui.horizontal(|ui| {
                if cx.mutable && ui.button("Unbind").clicked() {
                    delegate.unbind();
                    modified = true;
                }
                if let Some(binding) = delegate.binding() {
                    ui.label(format!("{} -> {}", binding.object_name(), binding.function()));
                }
            });
            modified
        })
        .body_returned
        .unwrap_or(false)
}

pub(crate) fn draw_multicast_delegate_property(
    _inspector: Inspector<'_>,
    ui: &mut egui::Ui,
    ty: &PropertyType,
    value: &mut Value,
    cx: &DrawContext,
) -> bool {
    let PropertyType::MulticastDelegate(signature) = ty else {
        return draw_type_mismatch(ui, PropertyKind::MulticastDelegate);
    };
    let Value::MulticastDelegate(delegate) = value else {
        return draw_type_mismatch(ui, PropertyKind::MulticastDelegate);
    };

    if !delegate.is_bound() {
        draw_unbound(ui, signature);
        return false;
    }

    egui::CollapsingHeader::new(signature_text(signature, true))
        .show(ui, |ui| {
            // Unbinding is deferred past the iteration, same as container
            // removal: only the clicked target goes, the others stay.
            let mut pending = PendingRemoval::new();
            for (index, binding) in delegate.bindings().iter().enumerate() {
                ui.push_id((binding.function(), index), |ui| {
                    ui.horizontal(|ui| {
                        if cx.mutable && ui.button("Unbind").clicked() {
                            pending.request(index);
                        }
                        ui.label(format!(
                            "{} -> {}",
                            binding.object_name(),
                            binding.function()
                        ));
                    });
                });
            }
            match pending.take() {
                Some(index) => {
                    delegate.remove_at(index);
                    true
                }
                None => false,
            }
        })
        .body_returned
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use scry_reflect::{ParamInfo, SignatureInfo};

    use super::signature_text;

    #[test]
    fn headers_carry_the_bound_tag() {
        let signature = SignatureInfo::new()
            .with_param(ParamInfo::new("damage", "i32"))
            .with_return("bool");
        assert_eq!(
            signature_text(&signature, true),
            "(i32 damage) -> (bool) {Bound}"
        );
        assert_eq!(
            signature_text(&SignatureInfo::new(), false),
            "() {Unbound}"
        );
    }
}
