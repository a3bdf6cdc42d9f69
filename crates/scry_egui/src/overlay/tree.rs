//! The draw tree: a tag-keyed registration directory deciding overlay
//! render order.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::inspector::Inspector;

/// A hierarchical draw-tree tag: dot-separated segments rooted at
/// [`NodeTag::ROOT`], e.g. `draw_tree.gameplay.ai`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeTag(String);

impl NodeTag {
    /// The root segment every draw-tree tag must live under.
    pub const ROOT: &'static str = "draw_tree";

    /// The root tag.
    pub fn root() -> Self {
        Self(Self::ROOT.to_owned())
    }

    /// Wraps a dotted tag path. Validity against the root is checked at
    /// registration, not construction.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The tag as a dotted string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The immediate parent tag, if this is not a single segment.
    pub fn direct_parent(&self) -> Option<NodeTag> {
        self.0
            .rsplit_once('.')
            .map(|(parent, _)| NodeTag(parent.to_owned()))
    }

    /// Whether this tag is `other` or lives underneath it.
    pub fn is_under(&self, other: &NodeTag) -> bool {
        self == other
            || (self.0.len() > other.0.len()
                && self.0.starts_with(other.0.as_str())
                && self.0.as_bytes()[other.0.len()] == b'.')
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// What a node's `start` callback decides for the rest of its subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawTreeBehavior {
    /// Draw the children, then call `end`.
    Continue,
    /// Skip the children but still call `end`.
    SkipChildren,
    /// Skip the children and do not call `end`.
    Stop,
}

/// An object that draws at a node of the draw tree.
pub trait DrawTreeNode {
    /// Called at the start of the node, before any children draw.
    fn draw_tree_start(
        &mut self,
        inspector: Inspector<'_>,
        ui: &mut egui::Ui,
        tag: &NodeTag,
    ) -> DrawTreeBehavior;

    /// Called at the end of the node, after the children drew. Skipped when
    /// `start` returned [`DrawTreeBehavior::Stop`].
    fn draw_tree_end(&mut self, _inspector: Inspector<'_>, _ui: &mut egui::Ui, _tag: &NodeTag) {}
}

/// A shared handle to a draw-tree node.
pub type NodeHandle = Rc<RefCell<dyn DrawTreeNode>>;

type WeakNode = Weak<RefCell<dyn DrawTreeNode>>;

/// What to do when a registration hits an already-taken tag or an
/// already-registered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Keep the existing registration and log a warning.
    #[default]
    IgnoreWithWarning,
    /// Keep the existing registration silently.
    Ignore,
    /// Replace the existing registration.
    Overwrite,
}

fn node_key(node: &NodeHandle) -> usize {
    Rc::as_ptr(node) as *const () as usize
}

fn weak_key(node: &WeakNode) -> usize {
    node.as_ptr() as *const () as usize
}

/// The registration directory: tag → node, with the reverse mapping kept so
/// a node can be unregistered wholesale.
///
/// Nodes are held weakly; a dropped node simply stops drawing, and its tags
/// go quiet until something else registers there.
#[derive(Default)]
pub struct DrawTree {
    tags_to_nodes: HashMap<NodeTag, WeakNode>,
    nodes: HashMap<usize, (WeakNode, HashSet<NodeTag>)>,
}

impl DrawTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node under one or more tags. Tags outside the root are
    /// skipped with a warning; conflicts resolve per the given policies.
    /// Returns whether at least one tag was registered.
    pub fn register(
        &mut self,
        tags: impl IntoIterator<Item = NodeTag>,
        node: &NodeHandle,
        tag_conflict: ConflictPolicy,
        node_conflict: ConflictPolicy,
    ) -> bool {
        let key = node_key(node);
        if self.nodes.contains_key(&key) {
            match node_conflict {
                ConflictPolicy::Overwrite => {
                    self.unregister(node);
                }
                ConflictPolicy::Ignore => return false,
                ConflictPolicy::IgnoreWithWarning => {
                    warn!("draw tree node is already registered");
                    return false;
                }
            }
        }

        let root = NodeTag::root();
        let mut added = HashSet::new();
        for tag in tags {
            if !tag.is_under(&root) {
                warn!(%tag, "draw tree tags must live under `{}`", NodeTag::ROOT);
                continue;
            }
            if self.tags_to_nodes.contains_key(&tag) {
                match tag_conflict {
                    ConflictPolicy::Overwrite => {
                        self.evict_tag(&tag);
                        info!(%tag, "replacing the registered draw tree node");
                    }
                    ConflictPolicy::Ignore => continue,
                    ConflictPolicy::IgnoreWithWarning => {
                        warn!(%tag, "draw tree tag is already taken");
                        continue;
                    }
                }
            }
            added.insert(tag);
        }

        if added.is_empty() {
            return false;
        }
        for tag in &added {
            self.tags_to_nodes.insert(tag.clone(), Rc::downgrade(node));
        }
        self.nodes.insert(key, (Rc::downgrade(node), added));
        true
    }

    /// Unregisters a node from every tag it holds. Returns whether the node
    /// was registered.
    pub fn unregister(&mut self, node: &NodeHandle) -> bool {
        let key = node_key(node);
        let Some((_, tags)) = self.nodes.remove(&key) else {
            return false;
        };
        for tag in tags {
            if self
                .tags_to_nodes
                .get(&tag)
                .is_some_and(|occupant| weak_key(occupant) == key)
            {
                self.tags_to_nodes.remove(&tag);
            }
        }
        true
    }

    /// Whether any node is registered at the tag.
    pub fn is_registered(&self, tag: &NodeTag) -> bool {
        self.tags_to_nodes.contains_key(tag)
    }

    /// The number of registered tags.
    pub fn tag_count(&self) -> usize {
        self.tags_to_nodes.len()
    }

    /// Removes a tag's occupant, pruning the reverse mapping.
    fn evict_tag(&mut self, tag: &NodeTag) {
        let Some(occupant) = self.tags_to_nodes.remove(tag) else {
            return;
        };
        let key = weak_key(&occupant);
        if let Some((_, tags)) = self.nodes.get_mut(&key) {
            tags.remove(tag);
            if tags.is_empty() {
                self.nodes.remove(&key);
            }
        }
    }

    /// Draws the whole tree from the root, ordering children by `priority`.
    pub fn draw(
        &self,
        inspector: Inspector<'_>,
        ui: &mut egui::Ui,
        priority: &HashMap<NodeTag, Vec<NodeTag>>,
    ) {
        self.draw_node_tag(inspector, ui, &NodeTag::root(), priority);
    }

    fn draw_node_tag(
        &self,
        inspector: Inspector<'_>,
        ui: &mut egui::Ui,
        tag: &NodeTag,
        priority: &HashMap<NodeTag, Vec<NodeTag>>,
    ) {
        let Some(node) = self.tags_to_nodes.get(tag).and_then(Weak::upgrade) else {
            return;
        };
        ui.push_id(tag.as_str(), |ui| {
            let behavior = node.borrow_mut().draw_tree_start(inspector, ui, tag);
            if behavior != DrawTreeBehavior::Stop {
                if behavior != DrawTreeBehavior::SkipChildren {
                    for child in self.children_by_priority(tag, priority) {
                        self.draw_node_tag(inspector, ui, &child, priority);
                    }
                }
                node.borrow_mut().draw_tree_end(inspector, ui, tag);
            }
        });
    }

    /// A node's children in draw order: the settings priority list first
    /// (direct children only), then every other registered direct child in
    /// alphabetical order.
    pub fn children_by_priority(
        &self,
        tag: &NodeTag,
        priority: &HashMap<NodeTag, Vec<NodeTag>>,
    ) -> Vec<NodeTag> {
        let mut ordered = Vec::new();
        let mut seen = HashSet::new();
        if let Some(listed) = priority.get(tag) {
            for child in listed {
                if child.direct_parent().as_ref() == Some(tag) && seen.insert(child.clone()) {
                    ordered.push(child.clone());
                }
            }
        }

        let mut rest: Vec<NodeTag> = self
            .tags_to_nodes
            .keys()
            .filter(|candidate| candidate.direct_parent().as_ref() == Some(tag))
            .filter(|candidate| !seen.contains(*candidate))
            .cloned()
            .collect();
        rest.sort();
        ordered.extend(rest);
        ordered
    }

    /// Renders the registration directory itself: every tag under the root
    /// with the liveness of its occupant. Orphan subtrees (a registered
    /// child under an empty parent) are shown even though the draw walk
    /// never reaches them.
    pub fn debug_view(&self, ui: &mut egui::Ui) {
        self.debug_view_tag(ui, &NodeTag::root());
    }

    fn debug_view_tag(&self, ui: &mut egui::Ui, tag: &NodeTag) {
        let status = match self.tags_to_nodes.get(tag) {
            Some(occupant) if occupant.strong_count() > 0 => "registered",
            Some(_) => "dead",
            None => "empty",
        };
        ui.label(format!("{tag} [{status}]"));
        let mut children: Vec<NodeTag> = self
            .tags_to_nodes
            .keys()
            .filter(|candidate| candidate.direct_parent().as_ref() == Some(tag))
            .cloned()
            .collect();
        children.sort();
        if !children.is_empty() {
            ui.indent(tag.as_str(), |ui| {
                for child in children {
                    self.debug_view_tag(ui, &child);
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::CustomDrawers;
    use scry_reflect::TypeRegistry;

    struct Recorder {
        label: &'static str,
        log: Rc<RefCell<Vec<String>>>,
        behavior: DrawTreeBehavior,
    }

    impl DrawTreeNode for Recorder {
        fn draw_tree_start(
            &mut self,
            _inspector: Inspector<'_>,
            _ui: &mut egui::Ui,
            _tag: &NodeTag,
        ) -> DrawTreeBehavior {
            self.log.borrow_mut().push(format!("start:{}", self.label));
            self.behavior
        }

        fn draw_tree_end(
            &mut self,
            _inspector: Inspector<'_>,
            _ui: &mut egui::Ui,
            _tag: &NodeTag,
        ) {
            self.log.borrow_mut().push(format!("end:{}", self.label));
        }
    }

    fn recorder(
        label: &'static str,
        log: &Rc<RefCell<Vec<String>>>,
        behavior: DrawTreeBehavior,
    ) -> NodeHandle {
        Rc::new(RefCell::new(Recorder {
            label,
            log: Rc::clone(log),
            behavior,
        }))
    }

    fn run_ui(mut body: impl FnMut(&mut egui::Ui)) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| body(ui));
        });
    }

    #[test]
    fn tags_outside_the_root_are_rejected() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let node = recorder("stray", &log, DrawTreeBehavior::Continue);
        let mut tree = DrawTree::new();
        assert!(!tree.register(
            [NodeTag::new("elsewhere.stray")],
            &node,
            ConflictPolicy::IgnoreWithWarning,
            ConflictPolicy::IgnoreWithWarning,
        ));
        assert_eq!(tree.tag_count(), 0);
    }

    #[test]
    fn taken_tags_follow_the_conflict_policy() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = recorder("first", &log, DrawTreeBehavior::Continue);
        let second = recorder("second", &log, DrawTreeBehavior::Continue);
        let mut tree = DrawTree::new();
        let tag = NodeTag::new("draw_tree.slot");

        assert!(tree.register(
            [tag.clone()],
            &first,
            ConflictPolicy::IgnoreWithWarning,
            ConflictPolicy::IgnoreWithWarning,
        ));
        assert!(!tree.register(
            [tag.clone()],
            &second,
            ConflictPolicy::Ignore,
            ConflictPolicy::Ignore,
        ));
        assert!(tree.register(
            [tag.clone()],
            &second,
            ConflictPolicy::Overwrite,
            ConflictPolicy::Overwrite,
        ));
        assert!(tree.is_registered(&tag));
    }

    #[test]
    fn unregister_leaves_other_occupants_alone() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = recorder("first", &log, DrawTreeBehavior::Continue);
        let second = recorder("second", &log, DrawTreeBehavior::Continue);
        let mut tree = DrawTree::new();
        let tag = NodeTag::new("draw_tree.slot");

        tree.register(
            [tag.clone()],
            &first,
            ConflictPolicy::IgnoreWithWarning,
            ConflictPolicy::IgnoreWithWarning,
        );
        tree.register(
            [tag.clone()],
            &second,
            ConflictPolicy::Overwrite,
            ConflictPolicy::Overwrite,
        );
        // `first` lost the tag to `second`; unregistering it must not evict
        // the new occupant.
        tree.unregister(&first);
        assert!(tree.is_registered(&tag));
    }

    #[test]
    fn walk_honors_priority_then_alphabetical_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let root = recorder("root", &log, DrawTreeBehavior::Continue);
        let alpha = recorder("alpha", &log, DrawTreeBehavior::Continue);
        let beta = recorder("beta", &log, DrawTreeBehavior::Continue);
        let gamma = recorder("gamma", &log, DrawTreeBehavior::Continue);

        let mut tree = DrawTree::new();
        let policy = ConflictPolicy::IgnoreWithWarning;
        tree.register([NodeTag::root()], &root, policy, policy);
        tree.register([NodeTag::new("draw_tree.alpha")], &alpha, policy, policy);
        tree.register([NodeTag::new("draw_tree.beta")], &beta, policy, policy);
        tree.register([NodeTag::new("draw_tree.gamma")], &gamma, policy, policy);

        let mut priority = HashMap::new();
        priority.insert(
            NodeTag::root(),
            vec![NodeTag::new("draw_tree.gamma"), NodeTag::new("draw_tree.beta")],
        );

        let registry = TypeRegistry::default();
        let custom = CustomDrawers::default();
        run_ui(|ui| {
            log.borrow_mut().clear();
            tree.draw(Inspector::new(&registry, &custom), ui, &priority);
        });

        assert_eq!(
            *log.borrow(),
            vec![
                "start:root",
                "start:gamma",
                "end:gamma",
                "start:beta",
                "end:beta",
                "start:alpha",
                "end:alpha",
                "end:root",
            ]
        );
    }

    #[test]
    fn stop_skips_children_and_the_end_callback() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let root = recorder("root", &log, DrawTreeBehavior::Stop);
        let child = recorder("child", &log, DrawTreeBehavior::Continue);

        let mut tree = DrawTree::new();
        let policy = ConflictPolicy::IgnoreWithWarning;
        tree.register([NodeTag::root()], &root, policy, policy);
        tree.register([NodeTag::new("draw_tree.child")], &child, policy, policy);

        let registry = TypeRegistry::default();
        let custom = CustomDrawers::default();
        run_ui(|ui| {
            log.borrow_mut().clear();
            tree.draw(Inspector::new(&registry, &custom), ui, &HashMap::new());
        });

        assert_eq!(*log.borrow(), vec!["start:root"]);
    }

    #[test]
    fn dropped_nodes_stop_drawing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let root = recorder("root", &log, DrawTreeBehavior::Continue);
        let mut tree = DrawTree::new();
        let policy = ConflictPolicy::IgnoreWithWarning;
        tree.register([NodeTag::root()], &root, policy, policy);
        drop(root);

        let registry = TypeRegistry::default();
        let custom = CustomDrawers::default();
        run_ui(|ui| {
            tree.draw(Inspector::new(&registry, &custom), ui, &HashMap::new());
        });
        assert!(log.borrow().is_empty());
    }
}
