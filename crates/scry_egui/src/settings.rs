//! Overlay settings: toggle chords, draw-tree priorities, and the release
//! gate. Persisted as RON.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::overlay::NodeTag;

/// An error raised while loading or saving [`OverlaySettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read or written.
    #[error("failed to read or write the settings file")]
    Io(#[from] std::io::Error),
    /// The settings file is not valid RON.
    #[error("failed to parse the settings file")]
    Parse(#[from] ron::error::SpannedError),
    /// The settings could not be serialized.
    #[error("failed to serialize the settings")]
    Serialize(#[from] ron::Error),
}

/// The persisted overlay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// The chord that toggles overlay visibility.
    pub toggle_visibility: egui::KeyboardShortcut,
    /// The chord that toggles overlay focus.
    pub toggle_focus: egui::KeyboardShortcut,
    /// The draw order of child draw-tree nodes per parent node. Children
    /// draw in the order listed; unlisted children follow alphabetically.
    pub draw_tree_priority: HashMap<NodeTag, Vec<NodeTag>>,
    /// Whether the overlay works in release builds.
    pub available_in_release: bool,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            toggle_visibility: egui::KeyboardShortcut::new(
                egui::Modifiers::CTRL,
                egui::Key::Equals,
            ),
            toggle_focus: egui::KeyboardShortcut::new(egui::Modifiers::CTRL, egui::Key::Minus),
            draw_tree_priority: HashMap::new(),
            available_in_release: false,
        }
    }
}

impl OverlaySettings {
    /// Loads and sanitizes settings from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        let mut settings: Self = ron::from_str(&text)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Saves the settings as pretty RON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Drops priority entries that cannot take effect: parents outside the
    /// draw-tree root and children that are not direct children of their
    /// parent key.
    pub fn sanitize(&mut self) {
        let root = NodeTag::root();
        self.draw_tree_priority.retain(|parent, _| {
            let keep = parent.is_under(&root);
            if !keep {
                warn!(%parent, "dropping draw tree priority entry outside the root");
            }
            keep
        });
        for (parent, children) in &mut self.draw_tree_priority {
            children.retain(|child| {
                let keep = child.direct_parent().as_ref() == Some(parent);
                if !keep {
                    warn!(%parent, %child, "dropping priority entry that is not a direct child");
                }
                keep
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip_through_ron() {
        let mut settings = OverlaySettings::default();
        settings.available_in_release = true;
        settings.draw_tree_priority.insert(
            NodeTag::root(),
            vec![NodeTag::new("draw_tree.ai"), NodeTag::new("draw_tree.net")],
        );

        let text = ron::ser::to_string_pretty(&settings, ron::ser::PrettyConfig::default())
            .expect("settings serialize");
        let parsed: OverlaySettings = ron::from_str(&text).expect("settings parse");
        assert_eq!(parsed, settings);
    }

    #[test]
    fn sanitize_drops_unreachable_priority_entries() {
        let mut settings = OverlaySettings::default();
        settings
            .draw_tree_priority
            .insert(NodeTag::new("elsewhere"), vec![NodeTag::new("elsewhere.x")]);
        settings.draw_tree_priority.insert(
            NodeTag::root(),
            vec![
                NodeTag::new("draw_tree.ai"),
                NodeTag::new("draw_tree.ai.vision"),
            ],
        );

        settings.sanitize();
        assert!(!settings.draw_tree_priority.contains_key(&NodeTag::new("elsewhere")));
        assert_eq!(
            settings.draw_tree_priority[&NodeTag::root()],
            vec![NodeTag::new("draw_tree.ai")]
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: OverlaySettings = ron::from_str("(available_in_release: true)").expect("parse");
        assert!(parsed.available_in_release);
        assert_eq!(
            parsed.toggle_visibility,
            OverlaySettings::default().toggle_visibility
        );
    }
}
