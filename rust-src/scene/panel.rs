//! A dashboard panel: the scene a chart draws into plus its tooltip.

use crate::format::TemplateRegistry;

use super::layer::Scene;


/// Floating tooltip state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tooltip {
    pub visible: bool,
    pub html: String,
    pub position: [f64; 2],
}


impl Tooltip {
    pub fn show(&mut self, html: String, position: [f64; 2]) {
        self.visible = true;
        self.html = html;
        self.position = position;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}


/// One visual panel.
///
/// A panel starts without a scene; the first render creates the skeleton and
/// every later render only rebinds data into it.
#[derive(Debug, Clone)]
pub struct Panel {
    pub id: String,
    pub tooltip: Tooltip,
    scene: Option<Scene>,
    templates: TemplateRegistry,
}


impl Panel {
    pub fn new(id: &str) -> Self {
        Self::with_templates(id, TemplateRegistry::default())
    }

    pub fn with_templates(id: &str, templates: TemplateRegistry) -> Self {
        Self {
            id: id.to_string(),
            tooltip: Tooltip::default(),
            scene: None,
            templates,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.scene.is_some()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    /// The panel scene, built by `skeleton` only if none exists yet.
    pub fn scene_or_init(&mut self, skeleton: impl FnOnce() -> Scene) -> &mut Scene {
        self.scene.get_or_insert_with(skeleton)
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn templates_mut(&mut self) -> &mut TemplateRegistry {
        &mut self.templates
    }
}
