//! Arena-backed ownership tree
//!
//! Every node owns one payload value and an ordered list of children, and
//! keeps a back-reference to its parent for navigation and unlinking. Nodes
//! live in a generational arena, so a key to a destroyed node reads as
//! stale instead of pointing at freed or reused memory.

use slotmap::{new_key_type, SlotMap};

use crate::error::TreeError;
use crate::traversal::{Traversal, TraversalMode, TraversalState};

new_key_type! {
    /// Key to a node in an [`OwnershipTree`]
    ///
    /// Uses generational indexing to prevent the ABA problem where a handle
    /// could point to a reused slot. If a node is destroyed and its slot
    /// reused, old keys will return None instead of pointing to the wrong node.
    pub struct NodeKey;
}

/// A single node: payload, ordered children and parent back-reference
#[derive(Debug)]
pub struct Node<T> {
    value: T,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            parent: None,
            children: Vec::new(),
        }
    }

    /// The owned payload
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Parent back-reference (None for roots and detached nodes)
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Children in insertion (and traversal) order
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }
}

/// Hierarchical container in which each node exclusively owns its children
///
/// The tree may hold several unattached nodes at once (freshly created nodes
/// wait unattached until [`insert_node`](Self::insert_node) is called), but
/// each node has at most one parent and no node can become its own ancestor.
#[derive(Debug)]
pub struct OwnershipTree<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
}

impl<T> Default for OwnershipTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OwnershipTree<T> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Create an empty tree with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Allocate a node owning `value`, with no parent and no children
    pub fn create_new(&mut self, value: T) -> NodeKey {
        self.nodes.insert(Node::new(value))
    }

    /// Attach `child` under `parent` at `index`
    ///
    /// `None`, or any index past the end, appends. The child must be
    /// unattached, and may not be `parent` itself or one of its ancestors.
    pub fn insert_node(
        &mut self,
        parent: NodeKey,
        child: NodeKey,
        index: Option<usize>,
    ) -> Result<(), TreeError> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::StaleNode(parent));
        }
        let child_node = self.nodes.get(child).ok_or(TreeError::StaleNode(child))?;
        if child == parent {
            return Err(TreeError::InvalidOperation(
                "a node cannot be inserted under itself".to_string(),
            ));
        }
        if child_node.parent.is_some() {
            return Err(TreeError::InvalidOperation(
                "node is already attached to a parent".to_string(),
            ));
        }
        if self.is_ancestor(child, parent) {
            return Err(TreeError::InvalidOperation(
                "inserting a node under its own descendant would create a cycle".to_string(),
            ));
        }

        let siblings = &mut self.nodes[parent].children;
        match index {
            Some(i) if i <= siblings.len() => siblings.insert(i, child),
            _ => siblings.push(child),
        }
        self.nodes[child].parent = Some(parent);

        log::trace!("Attached node {:?} under {:?}", child, parent);
        Ok(())
    }

    /// Create a node and attach it under `parent` in one step
    pub fn create_child(&mut self, parent: NodeKey, value: T) -> Result<NodeKey, TreeError> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::StaleNode(parent));
        }
        let child = self.create_new(value);
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        Ok(child)
    }

    /// Parent of `key`; None for roots, detached nodes and stale keys
    pub fn get_parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(|n| n.parent)
    }

    /// The `index`-th child of `key`
    pub fn get_child(&self, key: NodeKey, index: usize) -> Result<NodeKey, TreeError> {
        let node = self.nodes.get(key).ok_or(TreeError::StaleNode(key))?;
        node.children
            .get(index)
            .copied()
            .ok_or(TreeError::IndexOutOfRange {
                index,
                len: node.children.len(),
            })
    }

    /// Number of direct children of `key`
    pub fn child_count(&self, key: NodeKey) -> Result<usize, TreeError> {
        self.nodes
            .get(key)
            .map(|n| n.children.len())
            .ok_or(TreeError::StaleNode(key))
    }

    /// Children of `key` in order (empty for stale keys)
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes.get(key).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Count `key` and all of its descendants (0 for a stale key)
    pub fn size(&self, key: NodeKey) -> usize {
        self.walk(key, TraversalMode::Preorder).count()
    }

    /// Destroy `key` and its whole subtree, returning how many nodes were freed
    ///
    /// The node is unlinked from its parent before anything is released, so
    /// the parent never lists a dead child. Destroying a stale key is an
    /// error rather than a double free.
    pub fn destroy(&mut self, key: NodeKey) -> Result<usize, TreeError> {
        self.destroy_subtree(key).map(|freed| freed.len())
    }

    /// Like [`destroy`](Self::destroy), but returns the freed keys in
    /// post-order (children before their owner)
    pub fn destroy_subtree(&mut self, key: NodeKey) -> Result<Vec<NodeKey>, TreeError> {
        let parent = self.nodes.get(key).ok_or(TreeError::StaleNode(key))?.parent;
        if let Some(parent) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|&c| c != key);
            }
        }

        let mut doomed = Vec::new();
        let mut state = self.traversal(key, TraversalMode::Postorder);
        while let Some(k) = state.next(self) {
            doomed.push(k);
        }
        for k in &doomed {
            self.nodes.remove(*k);
        }

        log::trace!("Destroyed subtree at {:?} ({} nodes)", key, doomed.len());
        Ok(doomed)
    }

    /// Whether `key` refers to a live node
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Payload of `key`
    pub fn get(&self, key: NodeKey) -> Option<&T> {
        self.nodes.get(key).map(|n| &n.value)
    }

    /// Mutable payload of `key`
    ///
    /// Only the payload is exposed mutably; links are changed through the
    /// tree's own operations.
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut T> {
        self.nodes.get_mut(key).map(|n| &mut n.value)
    }

    /// Node record for `key`
    pub fn node(&self, key: NodeKey) -> Option<&Node<T>> {
        self.nodes.get(key)
    }

    /// Whether `ancestor` lies on the parent chain above `key`
    ///
    /// A node is not its own ancestor.
    pub fn is_ancestor(&self, ancestor: NodeKey, key: NodeKey) -> bool {
        let mut current = self.get_parent(key);
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            current = self.get_parent(k);
        }
        false
    }

    /// Number of edges between `key` and the top of its tree
    pub fn depth(&self, key: NodeKey) -> usize {
        let mut depth = 0;
        let mut current = self.get_parent(key);
        while let Some(k) = current {
            depth += 1;
            current = self.get_parent(k);
        }
        depth
    }

    /// Total number of live nodes, attached or not
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Detached traversal cursor starting at `start`
    ///
    /// The cursor only stores keys, so payloads may be mutated between steps.
    pub fn traversal(&self, start: NodeKey, mode: TraversalMode) -> TraversalState {
        TraversalState::new(start, mode)
    }

    /// Borrowing iterator over `(key, &payload)` starting at `start`
    pub fn walk(&self, start: NodeKey, mode: TraversalMode) -> Traversal<'_, T> {
        Traversal::new(self, start, mode)
    }
}
