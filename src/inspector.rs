//! Viewer session: one loaded model, one camera, one info panel.
//!
//! The three triggers (model loaded, explosion changed, pointer clicked)
//! arrive one at a time on the caller's thread, so no locking is needed.

use log::{error, info, warn};

use crate::camera::{Camera, Viewport};
use crate::config::InspectorConfig;
use crate::events::Event;
use crate::explode::ExplosionEngine;
use crate::inspect::{DisplayRecord, InfoPanel, InspectionPresenter};
use crate::loaders::load_gltf_file;
use crate::picking::{PickResult, PickingService};
use crate::registry::PartRegistry;
use crate::scene::Hierarchy;

/// A model whose rest state has been captured
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub hierarchy: Hierarchy,
    pub registry: PartRegistry,
}

impl LoadedModel {
    pub fn new(hierarchy: Hierarchy) -> Self {
        let registry = PartRegistry::capture(&hierarchy);
        Self { hierarchy, registry }
    }
}

/// What the caller should do after an event
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Continue,
    /// A click was handled; `None` means nothing was under the pointer
    Picked(Option<DisplayRecord>),
    Quit,
}

#[derive(Debug)]
pub struct Inspector {
    explosion: ExplosionEngine,
    picking: PickingService,
    presenter: InspectionPresenter,
    camera: Camera,
    viewport: Viewport,
    model: Option<LoadedModel>,
    explosion_parameter: f32,
    panel: InfoPanel,
}

impl Inspector {
    pub fn new(config: &InspectorConfig) -> Self {
        let viewport = Viewport::new(config.viewport[0], config.viewport[1]);
        let aspect = if viewport.is_valid() { viewport.aspect() } else { 1.0 };
        Self {
            explosion: ExplosionEngine::new(config.explode),
            picking: PickingService::new(),
            presenter: InspectionPresenter::new(),
            camera: Camera::from_config(&config.camera, aspect),
            viewport,
            model: None,
            explosion_parameter: 0.0,
            panel: InfoPanel::default(),
        }
    }

    /// Takes ownership of a freshly loaded hierarchy and captures its rest
    /// state. Replaces any previous model. Returns the part count.
    pub fn load(&mut self, hierarchy: Hierarchy) -> usize {
        let model = LoadedModel::new(hierarchy);
        let parts = model.registry.len();
        self.model = Some(model);
        self.explosion_parameter = 0.0;
        self.panel.clear();
        info!("model ready with {} parts", parts);
        parts
    }

    /// Reports a loader failure. The current state (possibly no model)
    /// stays in effect.
    pub fn load_failed(&mut self, err: &anyhow::Error) {
        error!("Error loading model: {:#}", err);
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&LoadedModel> {
        self.model.as_ref()
    }

    pub fn explosion_parameter(&self) -> f32 {
        self.explosion_parameter
    }

    /// Moves every part for parameter `t`. Before a model is loaded, or
    /// for a non-finite `t`, this does nothing. Returns the number of parts
    /// moved.
    pub fn set_explosion(&mut self, t: f32) -> usize {
        let Some(model) = self.model.as_mut() else {
            return 0;
        };
        if !t.is_finite() {
            warn!("explosion parameter {} ignored", t);
            return 0;
        }
        self.explosion_parameter = self.explosion.effective_parameter(t);
        self.explosion.apply(t, &model.registry, &mut model.hierarchy)
    }

    /// Nearest part under pixel `(x, y)` with the current camera and viewport
    pub fn pick(&self, x: f32, y: f32) -> PickResult {
        let model = self.model.as_ref()?;
        self.picking
            .pick_at(x, y, self.viewport, &self.camera, &model.registry, &model.hierarchy)
    }

    /// Picks and, on a hit, updates the info panel
    pub fn click(&mut self, x: f32, y: f32) -> Option<DisplayRecord> {
        let pick = self.pick(x, y);
        let record = self
            .model
            .as_ref()
            .and_then(|model| self.presenter.describe(&pick, &model.hierarchy));
        self.panel.show(record.clone());
        record
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        if self.viewport.is_valid() {
            self.camera.set_aspect(self.viewport.aspect());
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    pub fn handle(&mut self, event: Event) -> Step {
        match event {
            Event::Load(path) => {
                match load_gltf_file(&path) {
                    Ok(hierarchy) => {
                        self.load(hierarchy);
                    }
                    Err(e) => self.load_failed(&e),
                }
                Step::Continue
            }
            Event::Explode(t) => {
                self.set_explosion(t);
                Step::Continue
            }
            Event::Click { x, y } => Step::Picked(self.click(x, y)),
            Event::Resize { width, height } => {
                self.resize(width, height);
                Step::Continue
            }
            Event::Camera { position, target } => {
                let target = target.unwrap_or(self.camera.target);
                if position != target {
                    self.camera.look_at(position, target);
                }
                Step::Continue
            }
            Event::Quit => Step::Quit,
        }
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(&InspectorConfig::default())
    }
}

