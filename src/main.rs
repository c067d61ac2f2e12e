//! mechsim - interactive mechanics simulator
//!
//! Headless session: builds the demonstration scene, then plays a short
//! scripted interaction (select, move, reselect, create, remove, focus)
//! through the scene graph at a fixed 60 Hz step.

use mechsim::config::AppConfig;
use mechsim::scene::demo_scene;
use mechsim::systems::SimulationSystem;
use mechsim_core::{Entity, FollowCamera, NodeKey, SceneError, SceneGraph, SceneObject, Vec3};
use mechsim_render::{FrameRenderer, Projection};

const FIXED_DT: f32 = 1.0 / 60.0;

/// Main application state
struct App {
    config: AppConfig,
    graph: SceneGraph<Entity>,
    renderer: FrameRenderer,
    simulation: SimulationSystem,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, SceneError> {
        let camera = FollowCamera::new()
            .with_zoom(config.camera.zoom)
            .with_transition_time(config.camera.transition_time);

        let graph = demo_scene(config.simulation.to_params())
            .with_camera(camera)
            .with_highlight_scale(config.scene.highlight_scale)
            .build()?;

        let projection = Projection::new(
            config.camera.fov,
            config.window.width,
            config.window.height,
            config.camera.near,
            config.camera.far,
        );

        let simulation = SimulationSystem::new().with_max_dt(config.scene.max_frame_dt);

        Ok(Self {
            config,
            graph,
            renderer: FrameRenderer::new(projection),
            simulation,
        })
    }

    fn find(&self, name: &str) -> Option<NodeKey> {
        self.graph
            .tree()
            .walk(self.graph.root(), mechsim_core::TraversalMode::Preorder)
            .find(|(_, e)| e.name == name)
            .map(|(key, _)| key)
    }

    /// Scripted interaction for frame `n`
    fn script(&mut self, n: u32) -> Result<(), SceneError> {
        match n {
            0 => {
                if let Some(block) = self.find("block") {
                    self.graph.select(block);
                    log::info!("Selected block, camera tracking");
                }
            }
            60 => {
                if let Some(block) = self.graph.selection() {
                    if let Some(entity) = self.graph.get_mut(block) {
                        entity.move_to(Vec3::new(0.0, -1.0, 1.0));
                    }
                }
            }
            90 => {
                self.graph.deselect(true);
                log::info!("Reselected {:?}", self.selected_name());
            }
            120 => {
                let marker = Entity::point(Vec3::new(0.0, 1.5, 0.0)).with_scale(0.1);
                self.graph.create(marker.with_name("marker"))?;
            }
            150 => {
                if let Some(incline) = self.find("incline") {
                    let removed = self.graph.remove(incline)?;
                    log::info!("Removed incline subtree ({} nodes)", removed);
                }
                let ready = self
                    .graph
                    .get(self.graph.root())
                    .and_then(Entity::subjects)
                    .map(|s| s.ready())
                    .unwrap_or(false);
                log::info!("Simulation subjects ready: {}", ready);
            }
            180 => {
                if let Some(origin) = self.find("origin") {
                    if let Some(position) = self.graph.get(origin).map(SceneObject::position) {
                        self.graph.camera_mut().focus(position);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn selected_name(&self) -> Option<&str> {
        self.graph
            .selection()
            .and_then(|key| self.graph.get(key))
            .map(|e| e.name.as_str())
    }

    fn run(&mut self) -> Result<(), SceneError> {
        let frames = self.config.scene.demo_frames;
        for n in 0..frames {
            self.script(n)?;
            let result = self.simulation.step(&mut self.graph, &mut self.renderer, FIXED_DT);
            if n % 60 == 0 {
                log::info!(
                    "Frame {}: {} nodes, {} instances ({} highlighted), camera {:?} at {:?}",
                    result.stats.frame,
                    self.graph.size(),
                    result.stats.instances,
                    result.stats.highlighted,
                    self.graph.camera().mode(),
                    self.graph.camera().position(),
                );
            }
        }
        log::info!(
            "Session finished after {} frames with {} nodes",
            self.renderer.frame_count(),
            self.graph.size()
        );
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting {}", config.window.title);

    let mut app = App::new(config)?;
    app.run()?;
    Ok(())
}
