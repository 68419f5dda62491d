//! Het armmodel: toestand, lagen, interactie, paneel en scène.

pub mod interaction;
pub mod layers;
pub mod material;
pub mod model;
pub mod panel;
pub mod scene;
pub mod state;

pub use interaction::{
    Cursor, InteractionOutcome, PickHit, PointerEvent, cursor_for, handle_pointer, pick,
};
pub use layers::{DrawElement, DrawSet, DrawSummary, material_for, render_layers};
pub use material::{Color, Material, MaterialExport};
pub use model::{Anatomy, CurveName, ElementId, ElementMesh, LayerGroup, Shape, UnknownElement};
pub use panel::{DetailPane, PanelView, ToggleSwitch, build_panel};
pub use scene::{SceneConfig, SceneFrame, ShellView, compose};
pub use state::{LayerKind, LayerVisibility, UnknownLayer, ViewerState};
