//! Side tables keyed by [`NodeId`].
//!
//! Information that does not belong to the ownership tree lives here rather
//! than on the nodes: the targets of `break`/`continue`/`yield` statements
//! and the documentation comments attached to declarations.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::{
    nodes::{NodeId, Tree},
    semantic::DocTreeHandle,
};

/// Jump statement to jump target links, filled in by the pass that resolves
/// labels. Traversals never follow these links.
#[derive(Clone, Debug, Default)]
pub struct JumpTargets {
    targets: FxHashMap<NodeId, NodeId>,
}

impl JumpTargets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_target(&mut self, jump: &Tree, target: &Tree) {
        trace!(jump = %jump.id, target = %target.id, "resolve jump target");
        self.targets.insert(jump.id, target.id);
    }

    #[must_use]
    pub fn target(&self, jump: &Tree) -> Option<NodeId> {
        self.targets.get(&jump.id).copied()
    }

    #[must_use]
    pub fn target_of(&self, jump: NodeId) -> Option<NodeId> {
        self.targets.get(&jump).copied()
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Lookup of documentation comments by tree.
pub trait DocCommentTable {
    fn has_comment(&self, tree: &Tree) -> bool;

    /// Raw comment body, without the `/**` and `*/` delimiters.
    fn comment_text(&self, tree: &Tree) -> Option<&str>;

    fn comment_tree(&self, tree: &Tree) -> Option<DocTreeHandle>;
}

/// Map-backed [`DocCommentTable`].
#[derive(Clone, Debug, Default)]
pub struct DocComments {
    comments: FxHashMap<NodeId, (String, Option<DocTreeHandle>)>,
}

impl DocComments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_comment(&mut self, tree: &Tree, text: impl Into<String>) {
        self.comments.insert(tree.id, (text.into(), None));
    }

    /// Attaches a parsed comment tree to an existing comment. Returns `false`
    /// if `tree` has no comment.
    pub fn put_comment_tree(&mut self, tree: &Tree, doc: DocTreeHandle) -> bool {
        match self.comments.get_mut(&tree.id) {
            Some(entry) => {
                entry.1 = Some(doc);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

impl DocCommentTable for DocComments {
    fn has_comment(&self, tree: &Tree) -> bool {
        self.comments.contains_key(&tree.id)
    }

    fn comment_text(&self, tree: &Tree) -> Option<&str> {
        self.comments.get(&tree.id).map(|(text, _)| text.as_str())
    }

    fn comment_tree(&self, tree: &Tree) -> Option<DocTreeHandle> {
        self.comments.get(&tree.id).and_then(|(_, doc)| doc.clone())
    }
}
