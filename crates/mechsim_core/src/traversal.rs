//! Iterative depth-first traversal
//!
//! Traversal replaces recursion with an explicit stack of frames, each
//! recording a node and the index of its next unvisited child. The stack is
//! a `Vec`, so scene depth is bounded only by memory.
//!
//! Two forms share the same state machine:
//! - [`TraversalState`] holds keys only and is advanced against a tree
//!   borrow on every step, leaving the caller free to mutate payloads
//!   between steps (the update phase needs this).
//! - [`Traversal`] borrows the tree and is a regular `Iterator` over
//!   `(key, &payload)` pairs.

use crate::tree::{NodeKey, OwnershipTree};

/// Visiting order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraversalMode {
    /// Node first, then each child subtree left to right
    Preorder,
    /// Each child subtree left to right, then the node
    Postorder,
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    node: NodeKey,
    next_child: usize,
}

/// Restartable single-pass cursor over a subtree
#[derive(Clone, Debug)]
pub struct TraversalState {
    mode: TraversalMode,
    start: NodeKey,
    stack: Vec<Frame>,
    started: bool,
    current: Option<NodeKey>,
}

impl TraversalState {
    /// Create a cursor that will begin at `start`
    pub fn new(start: NodeKey, mode: TraversalMode) -> Self {
        Self {
            mode,
            start,
            stack: Vec::new(),
            started: false,
            current: None,
        }
    }

    /// Visiting order of this cursor
    pub fn mode(&self) -> TraversalMode {
        self.mode
    }

    /// Key yielded by the last successful `next`
    pub fn current(&self) -> Option<NodeKey> {
        self.current
    }

    /// Number of frames currently on the stack
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Rewind to the starting node
    pub fn restart(&mut self) {
        self.stack.clear();
        self.started = false;
        self.current = None;
    }

    /// Advance and return the next key, or None once exhausted
    ///
    /// The tree's structure must not change between steps. Children that
    /// are no longer live are skipped.
    pub fn next<T>(&mut self, tree: &OwnershipTree<T>) -> Option<NodeKey> {
        let next = match self.mode {
            TraversalMode::Preorder => self.next_preorder(tree),
            TraversalMode::Postorder => self.next_postorder(tree),
        };
        self.current = next;
        next
    }

    fn next_preorder<T>(&mut self, tree: &OwnershipTree<T>) -> Option<NodeKey> {
        if !self.started {
            self.started = true;
            if !tree.contains(self.start) {
                return None;
            }
            self.stack.push(Frame { node: self.start, next_child: 0 });
            return Some(self.start);
        }

        loop {
            let frame = self.stack.last_mut()?;
            let children = tree.children(frame.node);
            if frame.next_child < children.len() {
                let child = children[frame.next_child];
                frame.next_child += 1;
                if !tree.contains(child) {
                    continue;
                }
                self.stack.push(Frame { node: child, next_child: 0 });
                return Some(child);
            }
            self.stack.pop();
        }
    }

    fn next_postorder<T>(&mut self, tree: &OwnershipTree<T>) -> Option<NodeKey> {
        if !self.started {
            self.started = true;
            if tree.contains(self.start) {
                self.stack.push(Frame { node: self.start, next_child: 0 });
            }
        }

        loop {
            let frame = self.stack.last_mut()?;
            let children = tree.children(frame.node);
            if frame.next_child < children.len() {
                let child = children[frame.next_child];
                frame.next_child += 1;
                if tree.contains(child) {
                    self.stack.push(Frame { node: child, next_child: 0 });
                }
                continue;
            }
            return self.stack.pop().map(|f| f.node);
        }
    }

    /// Skip the unvisited descendants of the node just yielded
    ///
    /// Only meaningful in pre-order, directly after `next`. Traversal resumes
    /// at that node's next sibling (or the next sibling of an ancestor).
    /// Returns whether a branch was abandoned; in post-order, or when no
    /// node has just been yielded, this is a no-op returning `false`.
    pub fn leave_branch(&mut self) -> bool {
        if self.mode != TraversalMode::Preorder {
            log::warn!("leave_branch ignored: only supported during pre-order traversal");
            return false;
        }
        match (self.current, self.stack.last()) {
            (Some(current), Some(top)) if top.node == current => {
                self.stack.pop();
                true
            }
            _ => false,
        }
    }
}

/// Borrowing traversal yielding `(key, &payload)`
pub struct Traversal<'a, T> {
    tree: &'a OwnershipTree<T>,
    state: TraversalState,
}

impl<'a, T> Traversal<'a, T> {
    pub(crate) fn new(tree: &'a OwnershipTree<T>, start: NodeKey, mode: TraversalMode) -> Self {
        Self {
            tree,
            state: TraversalState::new(start, mode),
        }
    }

    /// See [`TraversalState::leave_branch`]
    pub fn leave_branch(&mut self) -> bool {
        self.state.leave_branch()
    }

    /// Key yielded by the last call to `next`
    pub fn current(&self) -> Option<NodeKey> {
        self.state.current()
    }

    /// Rewind to the starting node
    pub fn restart(&mut self) {
        self.state.restart();
    }
}

impl<'a, T> Iterator for Traversal<'a, T> {
    type Item = (NodeKey, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.state.next(self.tree)?;
        self.tree.get(key).map(|value| (key, value))
    }
}
