//! Scene graph controller
//!
//! Owns the ownership tree and its root, the current selection and the
//! follow camera. All structural edits to the scene go through here so the
//! selection never outlives the node it refers to.

use mechsim_math::{mat4, Mat4};

use crate::camera::FollowCamera;
use crate::error::{SceneError, TreeError};
use crate::object::SceneObject;
use crate::render::Renderer;
use crate::traversal::TraversalMode;
use crate::tree::{NodeKey, OwnershipTree};

/// Default enlargement applied to highlighted nodes
pub const DEFAULT_HIGHLIGHT_SCALE: f32 = 1.1;

/// Scene graph with selection and camera coupling
pub struct SceneGraph<T> {
    tree: OwnershipTree<T>,
    root: NodeKey,
    selection: Option<NodeKey>,
    camera: FollowCamera,
    highlight_scale: f32,
}

impl<T: SceneObject> SceneGraph<T> {
    /// Create a scene whose root owns `root_value`
    pub fn new(root_value: T) -> Self {
        let mut tree = OwnershipTree::new();
        let root = tree.create_new(root_value);
        Self {
            tree,
            root,
            selection: None,
            camera: FollowCamera::new(),
            highlight_scale: DEFAULT_HIGHLIGHT_SCALE,
        }
    }

    /// Replace the default camera
    pub fn with_camera(mut self, camera: FollowCamera) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_highlight_scale(mut self, scale: f32) -> Self {
        self.highlight_scale = scale;
        self
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Read-only access to the underlying tree
    pub fn tree(&self) -> &OwnershipTree<T> {
        &self.tree
    }

    pub fn get(&self, key: NodeKey) -> Option<&T> {
        self.tree.get(key)
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut T> {
        self.tree.get_mut(key)
    }

    /// Number of live nodes, root included
    pub fn size(&self) -> usize {
        self.tree.size(self.root)
    }

    /// Currently selected node
    pub fn selection(&self) -> Option<NodeKey> {
        self.selection.filter(|&key| self.tree.contains(key))
    }

    pub fn highlight_scale(&self) -> f32 {
        self.highlight_scale
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FollowCamera {
        &mut self.camera
    }

    /// Attach a new node under the selection, or under the root
    ///
    /// The new node is not selected, but the camera starts tracking it.
    pub fn create(&mut self, value: T) -> Result<NodeKey, SceneError> {
        let parent = self.selection().unwrap_or(self.root);
        self.create_under(parent, value)
    }

    /// Attach a new node under an explicit parent and track it with the camera
    pub fn create_under(&mut self, parent: NodeKey, value: T) -> Result<NodeKey, SceneError> {
        let subject = value.subject();
        let key = self.tree.create_child(parent, value)?;

        if let Some(kind) = subject {
            if let Some(root) = self.tree.get_mut(self.root) {
                root.subject_attached(key, kind);
            }
        }

        self.camera.track(key);
        log::debug!("Created node {:?} under {:?}", key, parent);
        Ok(key)
    }

    /// Destroy `key` and its subtree, returning the number of nodes removed
    ///
    /// Removing the root is rejected. A selection inside the removed
    /// subtree is cleared first.
    pub fn remove(&mut self, key: NodeKey) -> Result<usize, SceneError> {
        if key == self.root {
            return Err(SceneError::InvalidOperation(
                "cannot remove the root node".to_string(),
            ));
        }
        if !self.tree.contains(key) {
            return Err(TreeError::StaleNode(key).into());
        }

        if let Some(selected) = self.selection() {
            if selected == key || self.tree.is_ancestor(key, selected) {
                log::debug!("Selection {:?} removed with subtree {:?}", selected, key);
                self.selection = None;
            }
        }

        let freed = self.tree.destroy_subtree(key)?;
        let count = freed.len();

        if let Some(root) = self.tree.get_mut(self.root) {
            for k in freed {
                root.subject_detached(k);
            }
        }

        log::debug!("Removed {} node(s) rooted at {:?}", count, key);
        Ok(count)
    }

    /// Select a live node and start tracking it with the camera
    ///
    /// Returns false (and changes nothing) for a dead key.
    pub fn select(&mut self, key: NodeKey) -> bool {
        if !self.tree.contains(key) {
            return false;
        }
        self.selection = Some(key);
        self.camera.track(key);
        log::debug!("Selected {:?}", key);
        true
    }

    /// Clear the selection, or move it to a nearby node
    ///
    /// With `reselect`, the selection moves to the first sibling that is not
    /// the current selection, or to the parent when there is no sibling. A
    /// selection without a parent is simply cleared.
    pub fn deselect(&mut self, reselect: bool) {
        let Some(selected) = self.selection() else {
            self.selection = None;
            return;
        };

        let next = if reselect {
            self.tree.get_parent(selected).map(|parent| {
                let children = self.tree.children(parent);
                if children.len() >= 2 {
                    if children[0] == selected {
                        children[1]
                    } else {
                        children[0]
                    }
                } else {
                    parent
                }
            })
        } else {
            None
        };

        self.selection = next;
        match next {
            Some(key) => {
                self.camera.track(key);
                log::debug!("Selection moved {:?} -> {:?}", selected, key);
            }
            None => log::debug!("Deselected {:?}", selected),
        }
    }

    /// Advance every node by `dt` seconds, then the camera
    pub fn update(&mut self, dt: f32) {
        let mut cursor = self.tree.traversal(self.root, TraversalMode::Preorder);
        while let Some(key) = cursor.next(&self.tree) {
            if let Some(value) = self.tree.get_mut(key) {
                value.update(dt);
            }
        }
        self.camera.update(dt as f64, &self.tree);
    }

    /// View-projection for the current camera
    pub fn view_projection(&self, projection: Mat4) -> Mat4 {
        mat4::mul(projection, self.camera.view_transform())
    }

    /// Draw the scene, then the selected subtree highlighted on top
    pub fn draw(&self, projection: Mat4, renderer: &mut dyn Renderer) {
        let view_projection = self.view_projection(projection);
        let selection = self.selection();

        let mut walk = self.tree.walk(self.root, TraversalMode::Preorder);
        while let Some((key, value)) = walk.next() {
            if Some(key) == selection {
                walk.leave_branch();
                continue;
            }
            value.draw(view_projection, renderer);
        }

        if let Some(selected) = selection {
            for (_, value) in self.tree.walk(selected, TraversalMode::Preorder) {
                value.draw_highlighted(view_projection, self.highlight_scale, renderer);
            }
        }
    }
}
