//! Scèneopbouw: canvas, camera, belichting en orbit-besturing, plus de
//! teksten van de omringende shell.

use core::f64::consts::PI;

use serde::Serialize;

use super::layers::{DrawSet, render_layers};
use super::model::ARM_ROTATION;
use super::state::ViewerState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasConfig {
    /// Minimale en maximale device pixel ratio.
    pub dpr: [f64; 2],
    pub background: &'static str,
    pub background_stops: [&'static str; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraConfig {
    /// Verticale kijkhoek in graden.
    pub fov: f64,
    pub position: [f64; 3],
}

/// Omgevingsbelichting rond het model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageConfig {
    pub environment: &'static str,
    pub intensity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitControls {
    pub make_default: bool,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl OrbitControls {
    /// Houd de camera-afstand binnen `[min_distance, max_distance]`.
    #[must_use]
    pub fn clamp_distance(&self, distance: f64) -> f64 {
        distance.clamp(self.min_distance, self.max_distance)
    }

    /// Rotatiehoek (radialen) na `dt` seconden automatisch draaien.
    ///
    /// Snelheid 1 is één omwenteling per minuut.
    #[must_use]
    pub fn auto_rotate_angle(&self, dt: f64) -> f64 {
        if self.auto_rotate {
            2.0 * PI / 60.0 * self.auto_rotate_speed * dt
        } else {
            0.0
        }
    }
}

/// Vaste configuratie van de 3D-scène.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneConfig {
    pub canvas: CanvasConfig,
    pub camera: CameraConfig,
    pub stage: StageConfig,
    pub controls: OrbitControls,
    /// XYZ-Euler-rotatie van de armgroep.
    pub model_rotation: [f64; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig {
                dpr: [1.0, 2.0],
                background: "linear-gradient(180deg, #0D1B2A 0%, #1B263B 100%)",
                background_stops: ["#0D1B2A", "#1B263B"],
            },
            camera: CameraConfig {
                fov: 45.0,
                position: [0.0, 0.0, 3.0],
            },
            stage: StageConfig {
                environment: "city",
                intensity: 0.5,
            },
            controls: OrbitControls {
                make_default: true,
                auto_rotate: true,
                auto_rotate_speed: 0.5,
                min_distance: 1.0,
                max_distance: 5.0,
            },
            model_rotation: ARM_ROTATION,
        }
    }
}

/// Teksten en paneelstand van de shell rond het canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShellView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub footer: &'static str,
    pub panel_visible: bool,
}

impl ShellView {
    #[must_use]
    pub const fn new(panel_visible: bool) -> Self {
        Self {
            title: "3D Anatomical Arm Viewer",
            subtitle: "Medical training simulation with layer controls.",
            footer: "Use your mouse to interact: Drag to rotate, Scroll to zoom, Right-click and drag to pan.",
            panel_visible,
        }
    }
}

/// Eén volledig beeld: configuratie plus wat er getekend wordt.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub config: SceneConfig,
    pub draw_set: DrawSet,
}

#[must_use]
pub fn compose(state: &ViewerState) -> SceneFrame {
    SceneFrame {
        config: SceneConfig::default(),
        draw_set: render_layers(state.layers, state.chemoport_selected),
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::PI;

    use super::{SceneConfig, ShellView, compose};
    use crate::anatomy::model::ElementId;
    use crate::anatomy::state::{LayerKind, ViewerState};

    #[test]
    fn default_config_matches_viewer_setup() {
        let config = SceneConfig::default();
        assert_eq!(config.camera.fov, 45.0);
        assert_eq!(config.camera.position, [0.0, 0.0, 3.0]);
        assert_eq!(config.canvas.dpr, [1.0, 2.0]);
        assert_eq!(config.stage.environment, "city");
        assert!(config.controls.auto_rotate);
        assert_eq!(config.controls.auto_rotate_speed, 0.5);
        assert_eq!(config.model_rotation, [0.0, 0.0, 0.2]);
    }

    #[test]
    fn distance_is_clamped() {
        let controls = SceneConfig::default().controls;
        assert_eq!(controls.clamp_distance(0.2), 1.0);
        assert_eq!(controls.clamp_distance(3.0), 3.0);
        assert_eq!(controls.clamp_distance(12.0), 5.0);
    }

    #[test]
    fn auto_rotation_takes_two_minutes_per_turn_at_half_speed() {
        let controls = SceneConfig::default().controls;
        assert!((controls.auto_rotate_angle(120.0) - 2.0 * PI).abs() < 1e-12);

        let mut still = controls;
        still.auto_rotate = false;
        assert_eq!(still.auto_rotate_angle(10.0), 0.0);
    }

    #[test]
    fn compose_renders_the_current_layers() {
        let state = ViewerState::default().with_layer_toggled(LayerKind::Skin);
        let frame = compose(&state);
        assert!(!frame.draw_set.contains(ElementId::Skin));
        assert!(frame.draw_set.contains(ElementId::Bone));
        assert_eq!(frame.config, SceneConfig::default());
    }

    #[test]
    fn shell_texts() {
        let shell = ShellView::new(false);
        assert_eq!(shell.title, "3D Anatomical Arm Viewer");
        assert!(shell.footer.starts_with("Use your mouse"));
        assert!(!shell.panel_visible);
    }
}
