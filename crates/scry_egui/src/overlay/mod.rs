//! The debug overlay: visibility, focus, chord handling and the draw tree.

mod tree;

pub use tree::{ConflictPolicy, DrawTree, DrawTreeBehavior, DrawTreeNode, NodeHandle, NodeTag};

use tracing::info;

use crate::inspector::Inspector;
use crate::settings::OverlaySettings;

/// The overlay subsystem: owns the draw tree and the visibility/focus state,
/// and drives one draw pass per frame.
///
/// All state lives in this value: callers create it, keep it, and call
/// [`show`](Overlay::show) once per frame. There are no globals.
pub struct Overlay {
    settings: OverlaySettings,
    tree: DrawTree,
    enabled: bool,
    visible: bool,
    input_enabled: bool,
}

impl Overlay {
    /// Creates a hidden overlay. In release builds the overlay stays
    /// entirely inert unless the settings opt in.
    pub fn new(settings: OverlaySettings) -> Self {
        let enabled = cfg!(debug_assertions) || settings.available_in_release;
        if !enabled {
            info!("debug overlay is unavailable in this build");
        }
        Self {
            settings,
            tree: DrawTree::new(),
            enabled,
            visible: false,
            input_enabled: false,
        }
    }

    /// The active settings.
    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    /// The draw tree.
    pub fn tree(&self) -> &DrawTree {
        &self.tree
    }

    /// The draw tree, for registration.
    pub fn tree_mut(&mut self) -> &mut DrawTree {
        &mut self.tree
    }

    /// Whether the overlay can run at all in this build.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the overlay draws this frame.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the overlay accepts input (focus).
    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Toggles visibility. Focus follows: a freshly shown overlay grabs
    /// focus, a hidden one releases it.
    pub fn toggle_visibility(&mut self) {
        if !self.enabled {
            return;
        }
        self.visible = !self.visible;
        self.input_enabled = self.visible;
    }

    /// Toggles focus without touching visibility. No-op while hidden.
    pub fn toggle_focus(&mut self) {
        if self.visible {
            self.input_enabled = !self.input_enabled;
        }
    }

    /// Processes the toggle chords and, if visible, draws the tree inside
    /// the overlay window. Call once per frame.
    pub fn show(&mut self, ctx: &egui::Context, inspector: Inspector<'_>) {
        if !self.enabled {
            return;
        }
        if ctx.input_mut(|input| input.consume_shortcut(&self.settings.toggle_visibility)) {
            self.toggle_visibility();
        }
        if ctx.input_mut(|input| input.consume_shortcut(&self.settings.toggle_focus)) {
            self.toggle_focus();
        }
        if !self.visible {
            return;
        }

        egui::Window::new("Debug")
            .interactable(self.input_enabled)
            .show(ctx, |ui| {
                self.tree
                    .draw(inspector, ui, &self.settings.draw_tree_priority);
            });
    }

    /// Renders the registration directory, for diagnosing draw order.
    pub fn debug_tree_view(&self, ui: &mut egui::Ui) {
        self.tree.debug_view(ui);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_follows_visibility() {
        let mut overlay = Overlay::new(OverlaySettings::default());
        assert!(!overlay.is_visible());

        overlay.toggle_visibility();
        assert!(overlay.is_visible());
        assert!(overlay.is_input_enabled());

        overlay.toggle_focus();
        assert!(!overlay.is_input_enabled());

        overlay.toggle_visibility();
        assert!(!overlay.is_visible());
        assert!(!overlay.is_input_enabled());
    }

    #[test]
    fn focus_cannot_be_toggled_while_hidden() {
        let mut overlay = Overlay::new(OverlaySettings::default());
        overlay.toggle_focus();
        assert!(!overlay.is_input_enabled());
    }
}
