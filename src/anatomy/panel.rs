//! View-model van het bedieningspaneel: vier schakelaars en het
//! detailvenster van de chemoport. De host rendert alleen wat hier staat.

use serde::Serialize;

use super::material::Color;
use super::state::{LayerKind, ViewerState};

pub const PANEL_TITLE: &str = "Layer Controls";

/// Trackklasse van een uitgeschakelde schakelaar.
pub const TRACK_OFF_CLASS: &str = "bg-brand-accent";
const KNOB_ON_CLASS: &str = "translate-x-8";
const KNOB_OFF_CLASS: &str = "translate-x-1";

/// Accentkleur van een schakelaar, als utility-klasse en als hexwaarde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub class: &'static str,
    pub hex: &'static str,
}

impl Highlight {
    #[must_use]
    pub const fn for_layer(layer: LayerKind) -> Self {
        match layer {
            LayerKind::Skin => Self {
                class: "bg-yellow-400",
                hex: "#FACC15",
            },
            LayerKind::Muscles => Self {
                class: "bg-red-500",
                hex: "#EF4444",
            },
            LayerKind::Vascular => Self {
                class: "bg-blue-500",
                hex: "#3B82F6",
            },
            LayerKind::Nerves => Self {
                class: "bg-yellow-300",
                hex: "#FDE047",
            },
        }
    }

    /// De accentkleur als [`Color`], voor hosts zonder utility-klassen.
    #[must_use]
    pub fn color(self) -> Option<Color> {
        let digits = self.hex.strip_prefix('#')?;
        u32::from_str_radix(digits, 16).ok().map(Color::from_hex)
    }
}

/// Label van een laag zoals het in het paneel staat.
#[must_use]
pub const fn layer_label(layer: LayerKind) -> &'static str {
    match layer {
        LayerKind::Skin => "Skin",
        LayerKind::Muscles => "Muscles",
        LayerKind::Vascular => "Vascular System",
        LayerKind::Nerves => "Nervous System",
    }
}

/// Element-id van de schakelaar van een laag.
#[must_use]
pub const fn toggle_id(layer: LayerKind) -> &'static str {
    match layer {
        LayerKind::Skin => "skin-toggle",
        LayerKind::Muscles => "muscles-toggle",
        LayerKind::Vascular => "vascular-toggle",
        LayerKind::Nerves => "nerves-toggle",
    }
}

/// Toegankelijke aan/uit-schakelaar (`role="switch"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleSwitch {
    pub id: &'static str,
    pub layer: LayerKind,
    pub label: &'static str,
    pub role: &'static str,
    pub checked: bool,
    pub highlight: Highlight,
    pub track_class: &'static str,
    pub knob_class: &'static str,
}

impl ToggleSwitch {
    #[must_use]
    pub const fn new(layer: LayerKind, checked: bool) -> Self {
        let highlight = Highlight::for_layer(layer);
        Self {
            id: toggle_id(layer),
            layer,
            label: layer_label(layer),
            role: "switch",
            checked,
            highlight,
            track_class: if checked { highlight.class } else { TRACK_OFF_CLASS },
            knob_class: if checked { KNOB_ON_CLASS } else { KNOB_OFF_CLASS },
        }
    }

    /// Waarde voor `aria-checked`.
    #[must_use]
    pub const fn aria_checked(&self) -> &'static str {
        if self.checked { "true" } else { "false" }
    }
}

/// Eén regel uit het detailvenster: vetgedrukt label plus tekst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetailEntry {
    pub label: &'static str,
    pub text: &'static str,
}

pub const SELECTED_HEADING: &str = "Chemoport: Selected";
pub const PROMPT_HEADING: &str = "Chemoport Details";
pub const PROMPT_TEXT: &str = "A surgically implanted chemoport is connected to the subclavian vein. \
     Click on the metallic disc in the model to see more details.";

pub const CHEMOPORT_DETAILS: [DetailEntry; 3] = [
    DetailEntry {
        label: "Function",
        text: "Provides long-term central venous access for administering chemotherapy, \
               medications, or for blood draws.",
    },
    DetailEntry {
        label: "Placement",
        text: "Implanted subcutaneously (under the skin) in the upper chest, connected via a \
               catheter to the subclavian vein.",
    },
    DetailEntry {
        label: "Access Point",
        text: "The central silicone septum is designed for repeated needle punctures for \
               treatment administration.",
    },
];

/// Inhoud van het detailvenster onder de schakelaars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DetailPane {
    Selected {
        heading: &'static str,
        entries: Vec<DetailEntry>,
    },
    Prompt {
        heading: &'static str,
        text: &'static str,
    },
}

impl DetailPane {
    #[must_use]
    pub fn for_selection(selected: bool) -> Self {
        if selected {
            Self::Selected {
                heading: SELECTED_HEADING,
                entries: CHEMOPORT_DETAILS.to_vec(),
            }
        } else {
            Self::Prompt {
                heading: PROMPT_HEADING,
                text: PROMPT_TEXT,
            }
        }
    }

    #[must_use]
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Selected { heading, .. } | Self::Prompt { heading, .. } => *heading,
        }
    }

    /// Platte tekst, zoals een screenreader hem zou voorlezen.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Selected { entries, .. } => entries
                .iter()
                .map(|entry| format!("{}: {}", entry.label, entry.text))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Prompt { text, .. } => (*text).to_owned(),
        }
    }
}

/// Volledig paneel zoals de host het rendert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub title: &'static str,
    pub visible: bool,
    pub toggles: Vec<ToggleSwitch>,
    pub details: DetailPane,
}

impl PanelView {
    #[must_use]
    pub fn toggle(&self, layer: LayerKind) -> Option<&ToggleSwitch> {
        self.toggles.iter().find(|toggle| toggle.layer == layer)
    }
}

#[must_use]
pub fn build_panel(state: &ViewerState) -> PanelView {
    PanelView {
        title: PANEL_TITLE,
        visible: state.panel_visible,
        toggles: LayerKind::ALL
            .into_iter()
            .map(|layer| ToggleSwitch::new(layer, state.layers.is_visible(layer)))
            .collect(),
        details: DetailPane::for_selection(state.chemoport_selected),
    }
}

#[cfg(test)]
mod tests {
    use super::{DetailPane, Highlight, PROMPT_HEADING, SELECTED_HEADING, TRACK_OFF_CLASS, build_panel};
    use crate::anatomy::state::{LayerKind, ViewerState};

    #[test]
    fn toggles_follow_layer_order_and_state() {
        let state = ViewerState::default().with_layer_toggled(LayerKind::Muscles);
        let panel = build_panel(&state);

        let ids: Vec<_> = panel.toggles.iter().map(|toggle| toggle.id).collect();
        assert_eq!(ids, ["skin-toggle", "muscles-toggle", "vascular-toggle", "nerves-toggle"]);

        let muscles = panel.toggle(LayerKind::Muscles).unwrap();
        assert!(!muscles.checked);
        assert_eq!(muscles.aria_checked(), "false");
        assert_eq!(muscles.track_class, TRACK_OFF_CLASS);
        assert_eq!(muscles.knob_class, "translate-x-1");

        let vascular = panel.toggle(LayerKind::Vascular).unwrap();
        assert_eq!(vascular.label, "Vascular System");
        assert_eq!(vascular.track_class, "bg-blue-500");
        assert_eq!(vascular.knob_class, "translate-x-8");
        assert_eq!(vascular.role, "switch");
    }

    #[test]
    fn details_switch_with_selection() {
        let idle = build_panel(&ViewerState::default());
        assert_eq!(idle.details.heading(), PROMPT_HEADING);
        assert!(idle.details.text().contains("Click on the metallic disc"));

        let selected = build_panel(&ViewerState::default().with_chemoport_toggled());
        assert_eq!(selected.details.heading(), SELECTED_HEADING);
        let DetailPane::Selected { entries, .. } = &selected.details else {
            panic!("expected selected details");
        };
        let labels: Vec<_> = entries.iter().map(|entry| entry.label).collect();
        assert_eq!(labels, ["Function", "Placement", "Access Point"]);
        assert!(selected.details.text().contains("subclavian vein"));
    }

    #[test]
    fn panel_visibility_is_reported() {
        let panel = build_panel(&ViewerState::default().with_panel_closed());
        assert!(!panel.visible);
        assert_eq!(panel.title, "Layer Controls");
    }

    #[test]
    fn highlight_hex_parses() {
        let nerves = Highlight::for_layer(LayerKind::Nerves).color().unwrap();
        assert_eq!(nerves.to_string(), "#FDE047");
    }
}
