//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building mechanics scenes. Entities are added
//! under the current parent; `child` descends into the entity just added
//! and `up` returns to the previous parent.

use mechsim_core::{Entity, FollowCamera, NodeKey, SceneError, SceneGraph, SimulationParams, Vec3};

/// Builder for constructing scene graphs of entities
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new(SimulationParams::default())
///     .add(Entity::plane(Vec3::ZERO)).child()
///         .add(Entity::particle(Vec3::new(0.0, 1.0, 0.0))).up()
///     .add(Entity::spring(Vec3::new(3.0, 0.0, 0.0)))
///     .build()?;
/// ```
pub struct SceneBuilder {
    graph: SceneGraph<Entity>,
    parents: Vec<NodeKey>,
    last: Option<NodeKey>,
    error: Option<SceneError>,
}

impl SceneBuilder {
    /// Create a builder whose root is a world with the given parameters
    pub fn new(params: SimulationParams) -> Self {
        let graph = SceneGraph::new(Entity::world_with_params(params));
        let root = graph.root();
        Self {
            graph,
            parents: vec![root],
            last: None,
            error: None,
        }
    }

    /// Use a configured camera
    pub fn with_camera(mut self, camera: FollowCamera) -> Self {
        self.graph = self.graph.with_camera(camera);
        self
    }

    pub fn with_highlight_scale(mut self, scale: f32) -> Self {
        self.graph = self.graph.with_highlight_scale(scale);
        self
    }

    /// Add an entity under the current parent
    pub fn add(mut self, entity: Entity) -> Self {
        if self.error.is_some() {
            return self;
        }
        let parent = self.current_parent();
        match self.graph.create_under(parent, entity) {
            Ok(key) => self.last = Some(key),
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Make the entity just added the parent of subsequent additions
    pub fn child(mut self) -> Self {
        if let Some(last) = self.last {
            self.parents.push(last);
        }
        self
    }

    /// Return to the previous parent
    pub fn up(mut self) -> Self {
        if self.parents.len() > 1 {
            self.parents.pop();
        }
        self.last = None;
        self
    }

    /// Finish building, reporting the first failed insertion
    pub fn build(self) -> Result<SceneGraph<Entity>, SceneError> {
        match self.error {
            Some(e) => Err(e),
            None => {
                log::info!("Built scene with {} nodes", self.graph.size());
                Ok(self.graph)
            }
        }
    }

    fn current_parent(&self) -> NodeKey {
        self.parents.last().copied().unwrap_or(self.graph.root())
    }
}

/// The default demonstration: a particle resting on an inclined plane, a
/// spring and a reference point
pub fn demo_scene(params: SimulationParams) -> SceneBuilder {
    SceneBuilder::new(params)
        .add(Entity::plane(Vec3::ZERO).with_name("incline"))
        .child()
        .add(Entity::particle(Vec3::new(0.0, 1.0, 0.0)).with_scale(0.25).with_name("block"))
        .up()
        .add(Entity::spring(Vec3::new(4.0, 0.0, 0.0)))
        .add(Entity::point(Vec3::new(-4.0, 0.0, 0.0)).with_scale(0.1).with_name("origin"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mechsim_core::{EntityKind, TraversalMode};

    #[test]
    fn test_builder_nesting() {
        let graph = SceneBuilder::new(SimulationParams::default())
            .add(Entity::plane(Vec3::ZERO))
            .child()
            .add(Entity::particle(Vec3::ZERO))
            .add(Entity::point(Vec3::ZERO))
            .up()
            .add(Entity::spring(Vec3::ZERO))
            .build()
            .unwrap();

        let root = graph.root();
        assert_eq!(graph.size(), 5);
        assert_eq!(graph.tree().child_count(root), Ok(2));
        let plane = graph.tree().get_child(root, 0).unwrap();
        assert_eq!(graph.tree().child_count(plane), Ok(2));
    }

    #[test]
    fn test_up_at_root_stays_at_root() {
        let graph = SceneBuilder::new(SimulationParams::default())
            .up()
            .add(Entity::point(Vec3::ZERO))
            .build()
            .unwrap();
        assert_eq!(graph.tree().child_count(graph.root()), Ok(1));
    }

    #[test]
    fn test_builder_leaves_nothing_selected() {
        let graph = demo_scene(SimulationParams::default()).build().unwrap();
        assert_eq!(graph.selection(), None);
    }

    #[test]
    fn test_demo_scene_is_ready() {
        let params = SimulationParams {
            gravity: 1.6,
            ..SimulationParams::default()
        };
        let graph = demo_scene(params).build().unwrap();
        let world = graph.get(graph.root()).unwrap();

        assert!(world.subjects().unwrap().ready());
        assert_eq!(world.params().unwrap().gravity, 1.6);

        let names: Vec<&str> = graph
            .tree()
            .walk(graph.root(), TraversalMode::Preorder)
            .map(|(_, e)| e.name.as_str())
            .collect();
        assert_eq!(names, ["world", "incline", "block", "spring", "origin"]);
        assert!(matches!(
            graph.get(graph.tree().get_child(graph.root(), 1).unwrap()).unwrap().kind(),
            EntityKind::Spring { .. }
        ));
    }
}
