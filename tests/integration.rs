use anatomy_engine::Viewer;
use anatomy_engine::anatomy::interaction::chemoport_transform;
use anatomy_engine::anatomy::{
    Cursor, DetailPane, ElementId, LayerGroup, LayerKind, LayerVisibility, ViewerState,
};
use anatomy_engine::geom::{Point3, Vec3};

fn viewer() -> Viewer {
    Viewer::new().expect("viewer")
}

/// Wereldray die recht op het midden van de chemoport afgaat.
fn port_ray() -> ([f64; 3], [f64; 3]) {
    let center = chemoport_transform().apply_point(Point3::ORIGIN);
    let origin = center.add_vec(Vec3::new(0.0, 0.0, 3.0));
    (origin.to_array(), [0.0, 0.0, -1.0])
}

#[test]
fn viewer_initializes_with_everything_visible() {
    let viewer = viewer();
    assert!(viewer.is_initialized());

    let state = viewer.state();
    assert_eq!(state.layers, LayerVisibility::all_visible());
    assert!(!state.chemoport_selected);
    assert!(state.panel_visible);
    assert_eq!(viewer.draw_set().len(), ElementId::ALL.len());
}

#[test]
fn hiding_muscles_keeps_every_other_layer() {
    let mut viewer = viewer();
    viewer.toggle_layer("muscles").expect("known layer");

    let drawn = viewer.draw_set();
    assert!(!drawn.contains(ElementId::Muscle));
    assert_eq!(
        drawn.groups(),
        vec![LayerGroup::Bone, LayerGroup::Vascular, LayerGroup::Nerves, LayerGroup::Skin]
    );
    assert!(!viewer.panel().toggle(LayerKind::Muscles).unwrap().checked);
}

#[test]
fn unknown_layer_names_are_rejected() {
    let mut viewer = viewer();
    assert!(viewer.toggle_layer("bloodstream").is_err());
    assert_eq!(viewer.state(), ViewerState::default());
}

#[test]
fn clicking_the_chemoport_shows_details_and_glows() {
    let mut viewer = viewer();
    assert_eq!(viewer.click("chemoport").ok(), Some(true));

    let panel = viewer.panel();
    assert_eq!(panel.details.heading(), "Chemoport: Selected");
    assert!(matches!(panel.details, DetailPane::Selected { .. }));

    let port = viewer.draw_set().get(ElementId::Chemoport).copied().unwrap();
    assert!(port.material.is_glowing());

    assert_eq!(viewer.click("chemoport").ok(), Some(true));
    assert_eq!(viewer.panel().details.heading(), "Chemoport Details");
}

#[test]
fn clicks_on_other_elements_do_nothing() {
    let mut viewer = viewer();
    assert_eq!(viewer.click("bone").ok(), Some(false));
    assert_eq!(viewer.click("skin").ok(), Some(false));
    assert!(!viewer.state().chemoport_selected);
}

#[test]
fn hidden_vascular_blocks_chemoport_interaction() {
    let mut viewer = viewer();
    viewer.toggle_layer("vascular-toggle").expect("toggle id");

    assert!(!viewer.draw_set().contains(ElementId::Chemoport));
    assert_eq!(viewer.click("chemoport").ok(), Some(false));
    assert_eq!(viewer.pointer_enter("chemoport").ok(), Some(false));
    assert_eq!(viewer.cursor(), "auto");

    let (o, d) = port_ray();
    assert_eq!(viewer.pick(o[0], o[1], o[2], d[0], d[1], d[2]), None);
}

#[test]
fn selection_survives_hiding_and_showing_vascular() {
    let mut viewer = viewer();
    viewer.click("chemoport").expect("known element");
    viewer.toggle_layer("vascular").expect("known layer");
    viewer.toggle_layer("vascular").expect("known layer");

    assert!(viewer.state().chemoport_selected);
    let port = viewer.draw_set().get(ElementId::Chemoport).copied().unwrap();
    assert!(port.material.is_glowing());
}

#[test]
fn hover_drives_the_cursor() {
    let mut viewer = viewer();
    assert_eq!(viewer.cursor_kind(), Cursor::Auto);
    assert_eq!(viewer.pointer_enter("chemoport").ok(), Some(true));
    assert_eq!(viewer.cursor(), "pointer");

    viewer.toggle_layer("vascular").expect("known layer");
    assert_eq!(viewer.cursor(), "auto");
    viewer.toggle_layer("vascular").expect("known layer");

    assert_eq!(viewer.pointer_leave("chemoport").ok(), Some(false));
    assert_eq!(viewer.cursor(), "auto");
}

#[test]
fn picking_finds_the_chemoport_through_the_skin() {
    let viewer = viewer();
    let (o, d) = port_ray();
    assert_eq!(
        viewer.pick(o[0], o[1], o[2], d[0], d[1], d[2]).as_deref(),
        Some("chemoport")
    );
    assert_eq!(viewer.pick(o[0], o[1], o[2], 0.0, 0.0, 0.0), None);
}

#[test]
fn panel_close_and_menu_toggle() {
    let mut viewer = viewer();
    viewer.close_panel();
    assert!(!viewer.shell().panel_visible);
    assert!(!viewer.panel().visible);
    assert_eq!(viewer.state().layers, LayerVisibility::all_visible());

    viewer.toggle_panel();
    assert!(viewer.shell().panel_visible);
}

#[test]
fn draw_diff_tracks_layer_changes() {
    let mut viewer = viewer();
    let first = viewer.draw_diff();
    assert_eq!(first.added.len(), ElementId::ALL.len());

    viewer.toggle(LayerKind::Nerves);
    let diff = viewer.draw_diff();
    assert_eq!(diff.removed, vec![ElementId::MainNerve, ElementId::BranchNerve]);

    viewer.toggle(LayerKind::Nerves);
    let diff = viewer.draw_diff();
    let added: Vec<_> = diff.added.iter().map(|item| item.id).collect();
    assert_eq!(added, vec![ElementId::MainNerve, ElementId::BranchNerve]);
    assert!(diff.removed.is_empty());
}

#[test]
fn scene_config_matches_the_viewer_setup() {
    let viewer = viewer();
    let config = viewer.scene_config();
    assert_eq!(config.camera.fov, 45.0);
    assert_eq!(config.camera.position, [0.0, 0.0, 3.0]);
    assert_eq!(config.stage.environment, "city");
    assert_eq!(config.controls.min_distance, 1.0);
    assert_eq!(config.controls.max_distance, 5.0);
    assert_eq!(viewer.shell().title, "3D Anatomical Arm Viewer");
}

#[test]
fn every_layer_combination_is_renderable() {
    for layers in LayerVisibility::combinations() {
        let mut viewer = viewer();
        for layer in LayerKind::ALL {
            if !layers.is_visible(layer) {
                viewer.toggle(layer);
            }
        }
        assert_eq!(viewer.state().layers, layers);
        let export = viewer.draw_set_export();
        assert!(export.items.iter().any(|item| item.id == ElementId::Bone));
        assert!(export.items.iter().all(|item| item.mesh.indices.len() % 3 == 0));
    }
}
