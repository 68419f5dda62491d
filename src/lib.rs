#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod anatomy;
pub mod geom;

use std::collections::BTreeMap;
use std::fmt;

use anatomy::interaction::{self, PointerEvent};
use anatomy::layers::{DrawElement, DrawSet};
use anatomy::{
    Anatomy, Cursor, ElementId, LayerGroup, LayerKind, Material, MaterialExport, PanelView,
    SceneConfig, ShellView, ViewerState,
};
use geom::{GeomError, GeomMesh, Point3, Ray3, Vec3};
use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Mesh-buffers van een element, in armruimte.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MeshExport<'a> {
    pub positions: &'a [[f64; 3]],
    pub indices: &'a [u32],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normals: Option<&'a [[f64; 3]]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uvs: Option<&'a [[f64; 2]]>,
}

impl<'a> From<&'a GeomMesh> for MeshExport<'a> {
    fn from(mesh: &'a GeomMesh) -> Self {
        Self {
            positions: &mesh.positions,
            indices: &mesh.indices,
            normals: mesh.normals.as_deref(),
            uvs: mesh.uvs.as_deref(),
        }
    }
}

/// Eén element zoals de host het tekent.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DrawItem<'a> {
    pub id: ElementId,
    pub group: LayerGroup,
    pub interactive: bool,
    pub material: MaterialExport,
    pub mesh: MeshExport<'a>,
}

/// Wijzigingen ten opzichte van de vorige export.
#[derive(Debug, Default, Serialize)]
pub struct DrawDiff<'a> {
    pub added: Vec<DrawItem<'a>>,
    pub updated: Vec<DrawItem<'a>>,
    pub removed: Vec<ElementId>,
}

impl DrawDiff<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Volledige teken-set met meshes, voor een host die opnieuw begint.
#[derive(Debug, Serialize)]
pub struct DrawSetExport<'a> {
    pub rotation: [f64; 3],
    pub items: Vec<DrawItem<'a>>,
}

/// Root shell van de viewer: bezit de toestand, het model en de laatst
/// geëxporteerde teken-set.
#[wasm_bindgen]
pub struct Viewer {
    initialized: bool,
    state: ViewerState,
    anatomy: Anatomy,
    scene: SceneConfig,
    exported: BTreeMap<ElementId, Material>,
}

#[wasm_bindgen]
impl Viewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Viewer, JsValue> {
        Self::with_state(ViewerState::default()).map_err(to_js_error)
    }

    /// Geeft terug of elk element een geldige mesh heeft opgeleverd.
    #[wasm_bindgen]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[wasm_bindgen]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.state)
    }

    #[wasm_bindgen]
    pub fn get_scene_config(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.scene)
    }

    /// Header- en footerteksten plus de paneelstand.
    #[wasm_bindgen]
    pub fn get_shell(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.shell())
    }

    #[wasm_bindgen]
    pub fn get_panel(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.panel())
    }

    /// Zet een laag om op naam of toggle-id.
    #[wasm_bindgen]
    pub fn toggle_layer(&mut self, name: &str) -> Result<(), JsValue> {
        let layer = name.parse::<LayerKind>().map_err(to_js_error)?;
        self.toggle(layer);
        Ok(())
    }

    /// Menuknop in de header.
    #[wasm_bindgen]
    pub fn toggle_panel(&mut self) {
        self.state = self.state.with_panel_toggled();
    }

    #[wasm_bindgen]
    pub fn close_panel(&mut self) {
        self.state = self.state.with_panel_closed();
    }

    /// Pointer komt boven een element. Geeft `true` als het event
    /// geconsumeerd is.
    #[wasm_bindgen]
    pub fn pointer_enter(&mut self, id: &str) -> Result<bool, JsValue> {
        let id = id.parse::<ElementId>().map_err(to_js_error)?;
        Ok(self.handle(PointerEvent::Enter(id)))
    }

    #[wasm_bindgen]
    pub fn pointer_leave(&mut self, id: &str) -> Result<bool, JsValue> {
        let id = id.parse::<ElementId>().map_err(to_js_error)?;
        Ok(self.handle(PointerEvent::Leave(id)))
    }

    /// Klik op een element. Geeft `true` als verdere propagatie gestopt moet
    /// worden.
    #[wasm_bindgen]
    pub fn click(&mut self, id: &str) -> Result<bool, JsValue> {
        let id = id.parse::<ElementId>().map_err(to_js_error)?;
        Ok(self.handle(PointerEvent::Click(id)))
    }

    /// Hit-test met een wereld-ray. Geeft het id van het geraakte
    /// interactieve element.
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments, clippy::similar_names)]
    pub fn pick(&self, ox: f64, oy: f64, oz: f64, dx: f64, dy: f64, dz: f64) -> Option<String> {
        let ray = Ray3::new(Point3::new(ox, oy, oz), Vec3::new(dx, dy, dz))?;
        self.pick_ray(&ray).map(|id| id.as_str().to_owned())
    }

    /// CSS-cursor voor het canvas.
    #[wasm_bindgen]
    pub fn cursor(&self) -> String {
        self.cursor_kind().as_css().to_owned()
    }

    /// Haalt de teken-set op in een "diff" formaat.
    #[wasm_bindgen]
    pub fn get_draw_diff(&mut self) -> Result<JsValue, JsValue> {
        to_js_value(&self.draw_diff())
    }

    /// Volledige teken-set; telt ook als export voor de volgende diff.
    #[wasm_bindgen]
    pub fn get_draw_set(&mut self) -> Result<JsValue, JsValue> {
        to_js_value(&self.draw_set_export())
    }
}

impl Viewer {
    pub fn with_state(state: ViewerState) -> Result<Self, GeomError> {
        let anatomy = Anatomy::new()?;
        let initialized = ElementId::ALL
            .iter()
            .all(|id| anatomy.mesh(*id).is_some_and(|entry| entry.mesh.validate().is_ok()));
        debug_log!("viewer gestart: {state:?}, initialized={initialized}");
        Ok(Self {
            initialized,
            state,
            anatomy,
            scene: SceneConfig::default(),
            exported: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn state(&self) -> ViewerState {
        self.state
    }

    #[must_use]
    pub fn anatomy(&self) -> &Anatomy {
        &self.anatomy
    }

    #[must_use]
    pub fn scene_config(&self) -> &SceneConfig {
        &self.scene
    }

    #[must_use]
    pub fn shell(&self) -> ShellView {
        ShellView::new(self.state.panel_visible)
    }

    #[must_use]
    pub fn panel(&self) -> PanelView {
        anatomy::build_panel(&self.state)
    }

    pub fn toggle(&mut self, layer: LayerKind) {
        self.state = self.state.with_layer_toggled(layer);
        log::debug!("laag {layer} -> {}", self.state.layers.is_visible(layer));
    }

    /// Verwerk een pointer-event en geef terug of het geconsumeerd is.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        let outcome = interaction::handle_pointer(self.state, event);
        if !outcome.consumed {
            log::debug!("{event:?} niet geconsumeerd");
        }
        self.state = outcome.state;
        outcome.consumed
    }

    #[must_use]
    pub fn pick_ray(&self, ray: &Ray3) -> Option<ElementId> {
        interaction::pick(self.state, ray).map(|hit| hit.element)
    }

    #[must_use]
    pub fn cursor_kind(&self) -> Cursor {
        interaction::cursor_for(self.state)
    }

    #[must_use]
    pub fn draw_set(&self) -> DrawSet {
        anatomy::render_layers(self.state.layers, self.state.chemoport_selected)
    }

    /// Vergelijk de huidige teken-set met de vorige export en onthoud de
    /// nieuwe.
    pub fn draw_diff(&mut self) -> DrawDiff<'_> {
        let draw_set = self.draw_set();
        let mut diff = DrawDiff::default();
        let mut next = BTreeMap::new();

        for element in draw_set.elements() {
            let Some(item) = draw_item(&self.anatomy, element) else {
                continue;
            };
            match self.exported.get(&element.id) {
                Some(previous) if *previous == element.material => {}
                Some(_) => diff.updated.push(item),
                None => diff.added.push(item),
            }
            next.insert(element.id, element.material);
        }

        diff.removed = self
            .exported
            .keys()
            .filter(|id| !next.contains_key(*id))
            .copied()
            .collect();

        log::debug!(
            "draw diff: {} nieuw, {} gewijzigd, {} verwijderd",
            diff.added.len(),
            diff.updated.len(),
            diff.removed.len()
        );
        self.exported = next;
        diff
    }

    pub fn draw_set_export(&mut self) -> DrawSetExport<'_> {
        let draw_set = self.draw_set();
        self.exported = draw_set
            .elements()
            .iter()
            .map(|element| (element.id, element.material))
            .collect();

        DrawSetExport {
            rotation: self.scene.model_rotation,
            items: draw_set
                .elements()
                .iter()
                .filter_map(|element| draw_item(&self.anatomy, element))
                .collect(),
        }
    }
}

fn draw_item<'a>(anatomy: &'a Anatomy, element: &DrawElement) -> Option<DrawItem<'a>> {
    let Some(mesh) = anatomy.mesh(element.id) else {
        log::warn!("geen mesh voor {}", element.id);
        return None;
    };
    Some(DrawItem {
        id: element.id,
        group: element.group,
        interactive: element.interactive,
        material: MaterialExport::from(element.material),
        mesh: MeshExport::from(&mesh.mesh),
    })
}

fn to_js_value<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()).into())
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::{Viewer, ViewerState};
    use crate::anatomy::{ElementId, LayerKind};

    #[test]
    fn first_diff_adds_everything_visible() {
        let mut viewer = Viewer::with_state(ViewerState::default()).unwrap();
        let diff = viewer.draw_diff();
        assert_eq!(diff.added.len(), ElementId::ALL.len());
        assert!(diff.updated.is_empty());
        assert!(diff.removed.is_empty());
        assert!(diff.added.iter().all(|item| !item.mesh.positions.is_empty()));
    }

    #[test]
    fn initialized_means_every_element_has_a_valid_mesh() {
        let viewer = Viewer::with_state(ViewerState::default()).unwrap();
        let all_valid = ElementId::ALL.iter().all(|id| {
            viewer
                .anatomy()
                .mesh(*id)
                .is_some_and(|entry| entry.mesh.validate().is_ok())
        });
        assert!(all_valid);
        assert_eq!(viewer.is_initialized(), all_valid);
    }

    #[test]
    fn repeated_diff_without_changes_is_empty() {
        let mut viewer = Viewer::with_state(ViewerState::default()).unwrap();
        let _ = viewer.draw_diff();
        assert!(viewer.draw_diff().is_empty());

        viewer.toggle(LayerKind::Nerves);
        viewer.toggle(LayerKind::Nerves);
        assert!(viewer.draw_diff().is_empty());
    }

    #[test]
    fn hiding_vascular_removes_five_elements() {
        let mut viewer = Viewer::with_state(ViewerState::default()).unwrap();
        let _ = viewer.draw_diff();
        viewer.toggle(LayerKind::Vascular);

        let diff = viewer.draw_diff();
        assert_eq!(
            diff.removed,
            vec![
                ElementId::Artery,
                ElementId::SubclavianVein,
                ElementId::SecondaryVein,
                ElementId::Chemoport,
                ElementId::Catheter,
            ]
        );
        assert!(diff.added.is_empty());
    }

    #[test]
    fn selecting_updates_only_the_chemoport() {
        let mut viewer = Viewer::with_state(ViewerState::default()).unwrap();
        let _ = viewer.draw_diff();
        assert_eq!(viewer.click("chemoport").ok(), Some(true));

        let diff = viewer.draw_diff();
        let updated: Vec<_> = diff.updated.iter().map(|item| item.id).collect();
        assert_eq!(updated, vec![ElementId::Chemoport]);
        assert!(diff.updated[0].material.emissive_intensity > 0.0);
    }

    #[test]
    fn full_export_resets_the_diff_baseline() {
        let mut viewer = Viewer::with_state(ViewerState::default()).unwrap();
        let export = viewer.draw_set_export();
        assert_eq!(export.items.len(), ElementId::ALL.len());
        assert_eq!(export.rotation, [0.0, 0.0, 0.2]);
        assert!(viewer.draw_diff().is_empty());
    }
}
