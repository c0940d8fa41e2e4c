//! Arena-backed directory tree produced by the collector

use std::path::{Path, PathBuf};

use indextree::{Arena, NodeId};

use super::utils::display_name;

/// One directory and its aggregated size.
#[derive(Debug, Clone)]
pub struct DirNode {
    pub path: PathBuf,
    pub name: String,
    /// Logical bytes of every file below this directory, including
    /// subdirectories that were not retained.
    pub total_size: u64,
    /// Distance from the traversal root (root = 0).
    pub depth: usize,
    /// Set when this directory or one below it could not be read,
    /// so `total_size` is a lower bound.
    pub incomplete: bool,
}

impl DirNode {
    pub fn new(path: PathBuf, depth: usize) -> Self {
        let name = display_name(&path);
        Self {
            path,
            name,
            total_size: 0,
            depth,
            incomplete: false,
        }
    }
}

/// Directory tree whose nodes are owned by an arena.
///
/// Structure is expressed through [`NodeId`] handles: a node's children are
/// the retained subdirectories in traversal order, and its parent handle
/// never implies ownership.
#[derive(Debug)]
pub struct DirTree {
    arena: Arena<DirNode>,
    root: NodeId,
}

impl DirTree {
    /// Create a tree holding only a root node for `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(DirNode::new(path.as_ref().to_path_buf(), 0));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &DirNode {
        self.arena[id].get()
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut DirNode {
        self.arena[id].get_mut()
    }

    pub fn root_node(&self) -> &DirNode {
        self.node(self.root)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent()
    }

    /// Retained children of `id` in insertion order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.arena[id].first_child().is_some()
    }

    /// Retained children of `id` ordered by size, largest first.
    /// Children of equal size keep their insertion order.
    pub fn children_by_size(&self, id: NodeId) -> Vec<NodeId> {
        let mut children: Vec<NodeId> = self.children(id).collect();
        children.sort_by(|a, b| self.node(*b).total_size.cmp(&self.node(*a).total_size));
        children
    }

    /// Number of nodes reachable from the root, root included.
    pub fn node_count(&self) -> usize {
        self.root.descendants(&self.arena).count()
    }

    /// Create a node for `path` as the last child of `parent`.
    pub(crate) fn add_child(&mut self, parent: NodeId, path: PathBuf) -> NodeId {
        let depth = self.node(parent).depth + 1;
        let child = self.arena.new_node(DirNode::new(path, depth));
        parent.append(child, &mut self.arena);
        child
    }

    /// Detach `id` from its parent and drop it along with everything below it.
    pub(crate) fn discard(&mut self, id: NodeId) {
        id.remove_subtree(&mut self.arena);
    }
}
