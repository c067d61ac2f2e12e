//! Entity and Material types
//!
//! An Entity is one simulated object in the scene: the world box at the
//! root, inclined planes, particles, reference points and springs.

use std::f32::consts::{FRAC_PI_2, PI};

use bitflags::bitflags;
use mechsim_math::{mat4, smooth, Mat4, Vec3};
use rand::Rng;

use crate::object::{SceneObject, SubjectKind};
use crate::render::{DrawCommand, DrawStyle, MeshKind, Renderer};
use crate::NodeKey;

/// Duration of an eased `move_to`, in seconds
pub const MOVE_TIME: f32 = 0.2;

/// Radius of one spring coil
pub const SPRING_COIL_WIDTH: f32 = 0.25;
/// Number of coils in the spring mesh
pub const SPRING_COILS: u32 = 10;

bitflags! {
    /// Flags indicating which parts of an entity have changed since the
    /// renderer last consumed them
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Position, scale or animation pose changed
        const TRANSFORM = 1 << 0;
        /// Colour changed
        const MATERIAL = 1 << 1;
        /// Everything needs uploading
        const ALL = Self::TRANSFORM.bits() | Self::MATERIAL.bits();
    }
}

/// A flat colour
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Base color as RGBA (each component 0.0-1.0)
    pub base_color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Material {
    /// Create a new material with the given RGBA color
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            base_color: [r, g, b, a],
        }
    }

    /// Create a new opaque material with the given RGB color
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque material with each channel drawn uniformly from [0, 1)
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::from_rgb(rng.gen(), rng.gen(), rng.gen())
    }

    /// White material
    pub const WHITE: Self = Self { base_color: [1.0, 1.0, 1.0, 1.0] };
}

/// Constants the numeric engine reads off the world
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    pub distance: f32,
    pub friction: f32,
    pub force: f32,
    pub gravity: f32,
    pub mass: f32,
    pub initial_velocity: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            distance: 1.0,
            friction: 0.0,
            force: 1.0,
            gravity: 9.8,
            mass: 1.0,
            initial_velocity: 0.0,
        }
    }
}

/// First plane and particle attached anywhere under the world
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulationSubjects {
    pub plane: Option<NodeKey>,
    pub particle: Option<NodeKey>,
}

impl SimulationSubjects {
    /// Whether a particle-on-plane demonstration has both participants
    pub fn ready(&self) -> bool {
        self.plane.is_some() && self.particle.is_some()
    }

    fn attach(&mut self, key: NodeKey, kind: SubjectKind) {
        let slot = match kind {
            SubjectKind::Plane => &mut self.plane,
            SubjectKind::Particle => &mut self.particle,
        };
        if slot.is_none() {
            *slot = Some(key);
        }
    }

    fn detach(&mut self, key: NodeKey) {
        if self.plane == Some(key) {
            self.plane = None;
        }
        if self.particle == Some(key) {
            self.particle = None;
        }
    }
}

/// What an entity is, with its kind-specific state
#[derive(Clone, Debug, PartialEq)]
pub enum EntityKind {
    /// Scene root; never drawn
    World {
        params: SimulationParams,
        subjects: SimulationSubjects,
    },
    /// Inclined plane, tilted by `rotation` radians about X
    Plane { rotation: f32, length: f32 },
    Particle,
    Point,
    Spring { length: f32, extension: f32 },
}

impl EntityKind {
    /// Default plane tilt
    pub const PLANE_ROTATION: f32 = 3.0 * PI / 8.0;
    /// Default plane length
    pub const PLANE_LENGTH: f32 = 3.0;
    /// Default spring rest length
    pub const SPRING_LENGTH: f32 = 5.0;

    /// Short lowercase label, used as the default entity name
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::World { .. } => "world",
            EntityKind::Plane { .. } => "plane",
            EntityKind::Particle => "particle",
            EntityKind::Point => "point",
            EntityKind::Spring { .. } => "spring",
        }
    }
}

/// Eased transition between two positions
#[derive(Clone, Copy, Debug, PartialEq)]
struct Motion {
    start: Vec3,
    destination: Vec3,
    elapsed: f32,
}

/// An entity in the scene
pub struct Entity {
    /// Display name
    pub name: String,
    kind: EntityKind,
    position: Vec3,
    scale: f32,
    material: Material,
    motion: Option<Motion>,
    /// Seconds since creation; drives idle animation
    age: f32,
    dirty: DirtyFlags,
}

impl Entity {
    /// Create an entity of the given kind at `position` with a random colour
    pub fn new(kind: EntityKind, position: Vec3) -> Self {
        Self {
            name: kind.label().to_string(),
            kind,
            position,
            scale: 1.0,
            material: Material::random(&mut rand::thread_rng()),
            motion: None,
            age: 0.0,
            dirty: DirtyFlags::ALL,
        }
    }

    /// World root with default simulation parameters
    pub fn world() -> Self {
        Self::world_with_params(SimulationParams::default())
    }

    /// World root with the given simulation parameters
    pub fn world_with_params(params: SimulationParams) -> Self {
        Self::new(
            EntityKind::World {
                params,
                subjects: SimulationSubjects::default(),
            },
            Vec3::ZERO,
        )
    }

    /// Inclined plane with default tilt and length
    pub fn plane(position: Vec3) -> Self {
        Self::new(
            EntityKind::Plane {
                rotation: EntityKind::PLANE_ROTATION,
                length: EntityKind::PLANE_LENGTH,
            },
            position,
        )
    }

    pub fn particle(position: Vec3) -> Self {
        Self::new(EntityKind::Particle, position)
    }

    pub fn point(position: Vec3) -> Self {
        Self::new(EntityKind::Point, position)
    }

    /// Spring at rest length
    pub fn spring(position: Vec3) -> Self {
        Self::new(
            EntityKind::Spring {
                length: EntityKind::SPRING_LENGTH,
                extension: 0.0,
            },
            position,
        )
    }

    /// Set the name of this entity
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the random colour
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Set the uniform scale (a particle's radius)
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// Mutable access to kind-specific state
    pub fn kind_mut(&mut self) -> &mut EntityKind {
        self.mark_dirty(DirtyFlags::TRANSFORM);
        &mut self.kind
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn age(&self) -> f32 {
        self.age
    }

    /// Simulation parameters, if this is the world
    pub fn params(&self) -> Option<&SimulationParams> {
        match &self.kind {
            EntityKind::World { params, .. } => Some(params),
            _ => None,
        }
    }

    /// Tracked simulation subjects, if this is the world
    pub fn subjects(&self) -> Option<&SimulationSubjects> {
        match &self.kind {
            EntityKind::World { subjects, .. } => Some(subjects),
            _ => None,
        }
    }

    /// Whether an eased `move_to` is in progress
    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    /// Start an eased move from the current position to `target`
    pub fn move_to(&mut self, target: Vec3) {
        self.motion = Some(Motion {
            start: self.position,
            destination: target,
            elapsed: 0.0,
        });
    }

    /// Set the position and mark the transform as dirty, cancelling any move
    pub fn set_position(&mut self, position: Vec3) {
        self.motion = None;
        self.position = position;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Set the material and mark it as dirty
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        self.mark_dirty(DirtyFlags::MATERIAL);
    }

    // --- Dirty tracking methods ---

    /// Check if this entity has any dirty flags set
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Get the current dirty flags
    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Mark this entity as dirty with the given flags
    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Clear all dirty flags
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }

    /// Model matrix for the current pose
    pub fn model_matrix(&self) -> Mat4 {
        let m = mat4::translation(self.position);
        let uniform = Vec3::splat(self.scale);
        match &self.kind {
            EntityKind::World { .. } => {
                let m = mat4::rotate(m, self.age / 20.0, Vec3::Y);
                mat4::scale(m, uniform)
            }
            EntityKind::Plane { rotation, length } => {
                let m = mat4::rotate(m, FRAC_PI_2, Vec3::Y);
                let m = mat4::rotate(m, FRAC_PI_2, Vec3::X);
                let m = mat4::rotate(m, *rotation, Vec3::X);
                let m = mat4::scale(m, Vec3::new(1.2, *length, 1.0));
                mat4::scale(m, uniform)
            }
            EntityKind::Particle | EntityKind::Point => mat4::scale(m, uniform),
            EntityKind::Spring { length, extension } => {
                let m = mat4::rotate(m, self.age / 6.0, Vec3::Y);
                let m = mat4::scale(m, Vec3::new(1.0, length - extension, 1.0));
                let m = mat4::scale(m, uniform);
                mat4::translate(
                    m,
                    Vec3::new(0.0, SPRING_COIL_WIDTH * SPRING_COILS as f32 / 2.0, 0.0),
                )
            }
        }
    }

    fn mesh(&self) -> Option<MeshKind> {
        match self.kind {
            EntityKind::World { .. } => None,
            EntityKind::Plane { .. } => Some(MeshKind::Plane),
            EntityKind::Particle | EntityKind::Point => Some(MeshKind::Sphere),
            EntityKind::Spring { .. } => Some(MeshKind::Spring),
        }
    }

    fn is_animated(&self) -> bool {
        matches!(self.kind, EntityKind::World { .. } | EntityKind::Spring { .. })
    }
}

impl SceneObject for Entity {
    fn update(&mut self, dt: f32) {
        self.age += dt;
        if self.is_animated() {
            self.mark_dirty(DirtyFlags::TRANSFORM);
        }

        if let Some(motion) = self.motion.as_mut() {
            motion.elapsed += dt;
            if motion.elapsed > MOVE_TIME {
                self.position = motion.destination;
                self.motion = None;
            } else {
                let t = smooth((motion.elapsed / MOVE_TIME) as f64) as f32;
                self.position = motion.start.lerp(motion.destination, t);
            }
            self.mark_dirty(DirtyFlags::TRANSFORM);
        }
    }

    fn draw(&self, view_projection: Mat4, renderer: &mut dyn Renderer) {
        let Some(mesh) = self.mesh() else {
            return;
        };
        renderer.submit(DrawCommand {
            mesh,
            transform: mat4::mul(view_projection, self.model_matrix()),
            colour: self.material.base_color,
            style: DrawStyle::Normal,
        });
    }

    fn draw_highlighted(&self, view_projection: Mat4, scale: f32, renderer: &mut dyn Renderer) {
        let Some(mesh) = self.mesh() else {
            return;
        };
        let mvp = mat4::mul(view_projection, self.model_matrix());
        let (mesh, transform) = match mesh {
            MeshKind::Spring => (MeshKind::SpringHighlight, mvp),
            other => (other, mat4::scale(mvp, Vec3::splat(scale))),
        };
        renderer.submit(DrawCommand {
            mesh,
            transform,
            colour: self.material.base_color,
            style: DrawStyle::Highlight,
        });
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn subject(&self) -> Option<SubjectKind> {
        match self.kind {
            EntityKind::Plane { .. } => Some(SubjectKind::Plane),
            EntityKind::Particle => Some(SubjectKind::Particle),
            _ => None,
        }
    }

    fn subject_attached(&mut self, key: NodeKey, kind: SubjectKind) {
        if let EntityKind::World { subjects, .. } = &mut self.kind {
            subjects.attach(key, kind);
        }
    }

    fn subject_detached(&mut self, key: NodeKey) {
        if let EntityKind::World { subjects, .. } = &mut self.kind {
            subjects.detach(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use slotmap::SlotMap;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    fn keys(n: usize) -> Vec<NodeKey> {
        let mut map: SlotMap<NodeKey, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_material_default() {
        let m = Material::default();
        assert_eq!(m.base_color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_material_random_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let m = Material::random(&mut rng);
            assert!(m.base_color[..3].iter().all(|c| (0.0..1.0).contains(c)));
            assert_eq!(m.base_color[3], 1.0);
        }
    }

    #[test]
    fn test_new_entity_is_dirty() {
        let e = Entity::particle(Vec3::ZERO);
        assert_eq!(e.dirty_flags(), DirtyFlags::ALL);
        assert_eq!(e.name, "particle");
    }

    #[test]
    fn test_dirty_tracking() {
        let mut e = Entity::point(Vec3::ZERO);
        e.clear_dirty();
        assert!(!e.is_dirty());

        e.set_material(Material::WHITE);
        assert_eq!(e.dirty_flags(), DirtyFlags::MATERIAL);

        e.set_position(Vec3::X);
        assert!(e.dirty_flags().contains(DirtyFlags::TRANSFORM));
    }

    #[test]
    fn test_world_defaults() {
        let w = Entity::world();
        let params = w.params().unwrap();
        assert_eq!(params.gravity, 9.8);
        assert_eq!(params.distance, 1.0);
        assert_eq!(params.friction, 0.0);
        assert!(!w.subjects().unwrap().ready());
        assert!(Entity::plane(Vec3::ZERO).params().is_none());
    }

    #[test]
    fn test_move_to_snaps_after_duration() {
        let target = Vec3::new(4.0, 0.0, -2.0);
        let mut e = Entity::particle(Vec3::ZERO);
        e.move_to(target);
        assert!(e.is_moving());

        e.update(0.1);
        let mid = e.position();
        assert!(mid.x > 0.0 && mid.x < target.x);

        e.update(0.11);
        assert_eq!(e.position(), target);
        assert!(!e.is_moving());
    }

    #[test]
    fn test_set_position_cancels_move() {
        let mut e = Entity::particle(Vec3::ZERO);
        e.move_to(Vec3::X);
        e.set_position(Vec3::Z);
        assert!(!e.is_moving());
        e.update(1.0);
        assert_eq!(e.position(), Vec3::Z);
    }

    #[test]
    fn test_particle_model_matrix() {
        let e = Entity::particle(Vec3::new(1.0, 2.0, 3.0)).with_scale(0.5);
        let m = e.model_matrix();
        assert!(approx_eq(mat4::transform_point(m, Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0)));
        assert!(approx_eq(mat4::transform_point(m, Vec3::X), Vec3::new(1.5, 2.0, 3.0)));
    }

    #[test]
    fn test_plane_model_keeps_origin_at_position() {
        let e = Entity::plane(Vec3::new(0.0, 1.0, 0.0));
        let m = e.model_matrix();
        assert!(approx_eq(mat4::transform_point(m, Vec3::ZERO), Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_spring_model_offsets_half_coil_length() {
        let e = Entity::spring(Vec3::ZERO);
        let m = e.model_matrix();
        let expected_y = SPRING_COIL_WIDTH * SPRING_COILS as f32 / 2.0 * EntityKind::SPRING_LENGTH;
        let origin = mat4::transform_point(m, Vec3::ZERO);
        assert!((origin.y - expected_y).abs() < EPSILON);
    }

    #[test]
    fn test_world_draws_nothing() {
        let w = Entity::world();
        let mut out: Vec<DrawCommand> = Vec::new();
        w.draw(mat4::IDENTITY, &mut out);
        w.draw_highlighted(mat4::IDENTITY, 1.1, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_draw_uses_material_colour() {
        let e = Entity::particle(Vec3::ZERO).with_material(Material::from_rgb(0.2, 0.4, 0.6));
        let mut out: Vec<DrawCommand> = Vec::new();
        e.draw(mat4::IDENTITY, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].mesh, MeshKind::Sphere);
        assert_eq!(out[0].style, DrawStyle::Normal);
        assert_eq!(out[0].colour, [0.2, 0.4, 0.6, 1.0]);
    }

    #[test]
    fn test_highlight_scales_mesh() {
        let e = Entity::particle(Vec3::ZERO).with_material(Material::from_rgb(0.2, 0.4, 0.6));
        let mut out: Vec<DrawCommand> = Vec::new();
        e.draw_highlighted(mat4::IDENTITY, 1.1, &mut out);

        assert_eq!(out[0].style, DrawStyle::Highlight);
        assert_eq!(out[0].colour, [0.2, 0.4, 0.6, 1.0]);
        let edge = mat4::transform_point(out[0].transform, Vec3::X);
        assert!((edge.x - 1.1).abs() < EPSILON);
    }

    #[test]
    fn test_spring_highlight_uses_dedicated_mesh() {
        let e = Entity::spring(Vec3::ZERO);
        let mut normal: Vec<DrawCommand> = Vec::new();
        let mut highlight: Vec<DrawCommand> = Vec::new();
        e.draw(mat4::IDENTITY, &mut normal);
        e.draw_highlighted(mat4::IDENTITY, 1.1, &mut highlight);

        assert_eq!(highlight[0].mesh, MeshKind::SpringHighlight);
        assert_eq!(highlight[0].transform, normal[0].transform);
    }

    #[test]
    fn test_subject_roles() {
        assert_eq!(Entity::plane(Vec3::ZERO).subject(), Some(SubjectKind::Plane));
        assert_eq!(Entity::particle(Vec3::ZERO).subject(), Some(SubjectKind::Particle));
        assert_eq!(Entity::point(Vec3::ZERO).subject(), None);
        assert_eq!(Entity::spring(Vec3::ZERO).subject(), None);
    }

    #[test]
    fn test_world_tracks_first_subjects() {
        let k = keys(3);
        let mut w = Entity::world();
        w.subject_attached(k[0], SubjectKind::Plane);
        w.subject_attached(k[1], SubjectKind::Plane);
        assert_eq!(w.subjects().unwrap().plane, Some(k[0]));
        assert!(!w.subjects().unwrap().ready());

        w.subject_attached(k[2], SubjectKind::Particle);
        assert!(w.subjects().unwrap().ready());

        w.subject_detached(k[0]);
        assert_eq!(w.subjects().unwrap().plane, None);
        assert_eq!(w.subjects().unwrap().particle, Some(k[2]));
    }

    #[test]
    fn test_non_world_ignores_subject_events() {
        let k = keys(1);
        let mut p = Entity::point(Vec3::ZERO);
        p.subject_attached(k[0], SubjectKind::Plane);
        assert!(p.subjects().is_none());
    }
}
