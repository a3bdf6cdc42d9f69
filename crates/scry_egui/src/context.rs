use scry_reflect::ClassId;

/// The per-call configuration threaded through every recursive draw call.
///
/// A context is created fresh per top-level call and cloned, with selective
/// field resets, as recursion descends. It is never stored beyond a single
/// pass; the only state that survives a frame is egui's own id/visibility
/// state.
#[derive(Debug, Clone)]
pub struct DrawContext {
    /// Whether the current subtree may be edited.
    pub mutable: bool,
    /// Whether the current aggregate renders behind a collapsing header.
    pub collapsing_header: bool,
    /// Bypasses a custom drawer for exactly one object-drawing invocation.
    ///
    /// The flag rides along to ancestor levels of that same invocation and
    /// is cleared for every nested field draw, so a custom drawer can opt
    /// back into default rendering without disabling custom drawers deeper
    /// in the graph.
    pub force_draw_default: bool,
    /// The class of the top-level object being drawn, if any.
    pub root_class: Option<ClassId>,
    /// The current field's display name; salts the UI id stack.
    pub field_name: String,
}

impl Default for DrawContext {
    fn default() -> Self {
        Self {
            mutable: false,
            collapsing_header: true,
            force_draw_default: false,
            root_class: None,
            field_name: String::new(),
        }
    }
}

impl DrawContext {
    /// A default context with the given mutability.
    pub fn with_mutable(mutable: bool) -> Self {
        Self {
            mutable,
            ..Self::default()
        }
    }
}
