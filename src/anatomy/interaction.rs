//! Pointer-afhandeling: klik en hover op de chemoport, plus ray-picking
//! voor hosts die zelf geen hit-test doen.

use serde::Serialize;

use super::model::{CHEMOPORT_POSITION, ElementId, Shape, arm_transform};
use super::state::ViewerState;
use crate::geom::{Ray3, Transform, Vec3, intersect_capped_cylinder};

/// Pointer-event op een getekend element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter(ElementId),
    Leave(ElementId),
    Click(ElementId),
}

impl PointerEvent {
    #[must_use]
    pub const fn target(self) -> ElementId {
        match self {
            Self::Enter(id) | Self::Leave(id) | Self::Click(id) => id,
        }
    }
}

/// Nieuwe toestand na een event. `consumed` betekent dat het event niet
/// verder naar achterliggende elementen of de orbit-besturing mag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionOutcome {
    pub state: ViewerState,
    pub consumed: bool,
}

impl InteractionOutcome {
    const fn ignored(state: ViewerState) -> Self {
        Self {
            state,
            consumed: false,
        }
    }
}

/// CSS-cursor voor het canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    Auto,
    Pointer,
}

impl Cursor {
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Pointer => "pointer",
        }
    }
}

/// Verwerk een pointer-event.
///
/// Alleen de chemoport reageert, en alleen zolang hij getekend wordt.
/// Verlaten zet de hover altijd terug en wordt nooit geconsumeerd.
#[must_use]
pub fn handle_pointer(state: ViewerState, event: PointerEvent) -> InteractionOutcome {
    if !event.target().is_interactive() {
        return InteractionOutcome::ignored(state);
    }

    match event {
        PointerEvent::Leave(_) => InteractionOutcome::ignored(state.with_chemoport_hovered(false)),
        _ if !state.chemoport_drawn() => InteractionOutcome::ignored(state),
        PointerEvent::Enter(_) => InteractionOutcome {
            state: state.with_chemoport_hovered(true),
            consumed: true,
        },
        PointerEvent::Click(_) => InteractionOutcome {
            state: state.with_chemoport_toggled(),
            consumed: true,
        },
    }
}

/// Een verborgen chemoport kan geen pointer-cursor geven, ook niet als de
/// hover-vlag nog van voor het uitschakelen staat.
#[must_use]
pub const fn cursor_for(state: ViewerState) -> Cursor {
    if state.chemoport_hovered && state.chemoport_drawn() {
        Cursor::Pointer
    } else {
        Cursor::Auto
    }
}

/// Treffer van [`pick`], met afstand in wereldeenheden langs de ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PickHit {
    pub element: ElementId,
    pub distance: f64,
}

/// Transformatie van de lokale ruimte van de chemoport naar wereldruimte.
#[must_use]
pub fn chemoport_transform() -> Transform {
    arm_transform().then(&Transform::translate(Vec3::from(CHEMOPORT_POSITION)))
}

/// Zoek het interactieve element onder een wereld-ray.
///
/// Niet-interactieve elementen blokkeren de ray niet; alleen de chemoport
/// kan geraakt worden, en alleen als hij getekend wordt.
#[must_use]
pub fn pick(state: ViewerState, ray: &Ray3) -> Option<PickHit> {
    if !state.chemoport_drawn() {
        return None;
    }

    let Shape::Cylinder { spec, .. } = ElementId::Chemoport.shape() else {
        return None;
    };

    let local = ray.to_local(&chemoport_transform());
    intersect_capped_cylinder(&local, spec.radius_top, spec.height / 2.0).map(|distance| PickHit {
        element: ElementId::Chemoport,
        distance,
    })
}

#[cfg(test)]
mod tests {
    use super::{Cursor, PointerEvent, chemoport_transform, cursor_for, handle_pointer, pick};
    use crate::anatomy::model::ElementId;
    use crate::anatomy::state::{LayerKind, ViewerState};
    use crate::geom::{Point3, Ray3, Vec3};

    fn ray_at_port() -> Ray3 {
        let center = chemoport_transform().apply_point(Point3::ORIGIN);
        Ray3::new(center.add_vec(Vec3::new(0.0, 0.0, 3.0)), Vec3::new(0.0, 0.0, -1.0)).unwrap()
    }

    #[test]
    fn click_toggles_selection_and_is_consumed() {
        let state = ViewerState::default();
        let first = handle_pointer(state, PointerEvent::Click(ElementId::Chemoport));
        assert!(first.consumed);
        assert!(first.state.chemoport_selected);

        let second = handle_pointer(first.state, PointerEvent::Click(ElementId::Chemoport));
        assert!(second.consumed);
        assert_eq!(second.state, state);
    }

    #[test]
    fn clicks_elsewhere_are_ignored() {
        let state = ViewerState::default();
        for id in ElementId::ALL.into_iter().filter(|id| *id != ElementId::Chemoport) {
            let outcome = handle_pointer(state, PointerEvent::Click(id));
            assert!(!outcome.consumed, "{id}");
            assert_eq!(outcome.state, state, "{id}");
        }
    }

    #[test]
    fn hidden_chemoport_ignores_clicks() {
        let state = ViewerState::default().with_layer_toggled(LayerKind::Vascular);
        let outcome = handle_pointer(state, PointerEvent::Click(ElementId::Chemoport));
        assert!(!outcome.consumed);
        assert!(!outcome.state.chemoport_selected);
    }

    #[test]
    fn hover_sets_pointer_cursor() {
        let state = ViewerState::default();
        assert_eq!(cursor_for(state), Cursor::Auto);

        let entered = handle_pointer(state, PointerEvent::Enter(ElementId::Chemoport));
        assert!(entered.consumed);
        assert_eq!(cursor_for(entered.state), Cursor::Pointer);

        let left = handle_pointer(entered.state, PointerEvent::Leave(ElementId::Chemoport));
        assert!(!left.consumed);
        assert_eq!(cursor_for(left.state), Cursor::Auto);
    }

    #[test]
    fn hiding_vascular_drops_the_pointer_cursor() {
        let hovered = handle_pointer(ViewerState::default(), PointerEvent::Enter(ElementId::Chemoport)).state;
        let hidden = hovered.with_layer_toggled(LayerKind::Vascular);
        assert_eq!(cursor_for(hidden), Cursor::Auto);
        assert_eq!(Cursor::Pointer.as_css(), "pointer");
    }

    #[test]
    fn ray_through_the_disc_hits_the_chemoport() {
        let hit = pick(ViewerState::default(), &ray_at_port()).expect("hit");
        assert_eq!(hit.element, ElementId::Chemoport);
        assert!(hit.distance > 2.9 && hit.distance < 3.0, "{}", hit.distance);
    }

    #[test]
    fn ray_misses_when_vascular_is_hidden_or_aimed_away() {
        let hidden = ViewerState::default().with_layer_toggled(LayerKind::Vascular);
        assert!(pick(hidden, &ray_at_port()).is_none());

        let away = Ray3::new(Point3::new(2.0, 2.0, 3.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
        assert!(pick(ViewerState::default(), &away).is_none());
    }
}
