//! Toestand van de viewer: laagzichtbaarheid, selectie, hover en paneel.
//!
//! Alle records zijn `Copy`; elke wijziging levert een nieuw record op.

use core::fmt;
use core::str::FromStr;

use serde::Serialize;

/// De vier aan/uit te zetten anatomische lagen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Skin,
    Muscles,
    Vascular,
    Nerves,
}

impl LayerKind {
    /// In paneelvolgorde.
    pub const ALL: [Self; 4] = [Self::Skin, Self::Muscles, Self::Vascular, Self::Nerves];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Skin => "skin",
            Self::Muscles => "muscles",
            Self::Vascular => "vascular",
            Self::Nerves => "nerves",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Onbekende laagnaam, met de dichtstbijzijnde bekende naam als die er is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("onbekende laag `{input}`{}", .suggestion.map(|s| format!(", bedoelde je `{s}`?")).unwrap_or_default())]
pub struct UnknownLayer {
    pub input: String,
    pub suggestion: Option<&'static str>,
}

/// Maximale bewerkingsafstand waarbij nog een suggestie wordt gegeven.
const SUGGESTION_DISTANCE: usize = 3;

impl FromStr for LayerKind {
    type Err = UnknownLayer;

    /// Accepteert de laagnaam of het toggle-id (`"skin"`, `"skin-toggle"`),
    /// hoofdletterongevoelig.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_lowercase();
        let key = normalized.strip_suffix("-toggle").unwrap_or(&normalized);

        if let Some(kind) = Self::ALL.into_iter().find(|kind| kind.as_str() == key) {
            return Ok(kind);
        }

        let suggestion = Self::ALL
            .into_iter()
            .map(|kind| (levenshtein::levenshtein(kind.as_str(), key), kind))
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .map(|(_, kind)| kind.as_str());

        Err(UnknownLayer {
            input: input.to_owned(),
            suggestion,
        })
    }
}

/// Zichtbaarheid per laag. Bij het opstarten staat alles aan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LayerVisibility {
    pub skin: bool,
    pub muscles: bool,
    pub vascular: bool,
    pub nerves: bool,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self::all_visible()
    }
}

impl LayerVisibility {
    #[must_use]
    pub const fn all_visible() -> Self {
        Self {
            skin: true,
            muscles: true,
            vascular: true,
            nerves: true,
        }
    }

    #[must_use]
    pub const fn none_visible() -> Self {
        Self {
            skin: false,
            muscles: false,
            vascular: false,
            nerves: false,
        }
    }

    #[must_use]
    pub const fn is_visible(self, layer: LayerKind) -> bool {
        match layer {
            LayerKind::Skin => self.skin,
            LayerKind::Muscles => self.muscles,
            LayerKind::Vascular => self.vascular,
            LayerKind::Nerves => self.nerves,
        }
    }

    /// Kopie waarin alleen `layer` is omgezet.
    #[must_use]
    pub const fn toggled(self, layer: LayerKind) -> Self {
        let mut next = self;
        match layer {
            LayerKind::Skin => next.skin = !next.skin,
            LayerKind::Muscles => next.muscles = !next.muscles,
            LayerKind::Vascular => next.vascular = !next.vascular,
            LayerKind::Nerves => next.nerves = !next.nerves,
        }
        next
    }

    /// Alle 16 combinaties, in bitvolgorde van [`LayerKind::ALL`].
    pub fn combinations() -> impl Iterator<Item = Self> {
        (0u8..16).map(|bits| Self {
            skin: bits & 0b0001 != 0,
            muscles: bits & 0b0010 != 0,
            vascular: bits & 0b0100 != 0,
            nerves: bits & 0b1000 != 0,
        })
    }
}

/// Volledige toestand van de viewer zoals de root shell die bezit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewerState {
    pub layers: LayerVisibility,
    pub chemoport_selected: bool,
    pub chemoport_hovered: bool,
    pub panel_visible: bool,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            layers: LayerVisibility::all_visible(),
            chemoport_selected: false,
            chemoport_hovered: false,
            panel_visible: true,
        }
    }
}

impl ViewerState {
    #[must_use]
    pub const fn with_layer_toggled(self, layer: LayerKind) -> Self {
        Self {
            layers: self.layers.toggled(layer),
            ..self
        }
    }

    #[must_use]
    pub const fn with_chemoport_toggled(self) -> Self {
        Self {
            chemoport_selected: !self.chemoport_selected,
            ..self
        }
    }

    #[must_use]
    pub const fn with_chemoport_hovered(self, hovered: bool) -> Self {
        Self {
            chemoport_hovered: hovered,
            ..self
        }
    }

    /// Menuknop in de header.
    #[must_use]
    pub const fn with_panel_toggled(self) -> Self {
        Self {
            panel_visible: !self.panel_visible,
            ..self
        }
    }

    /// Sluitknop in het paneel.
    #[must_use]
    pub const fn with_panel_closed(self) -> Self {
        Self {
            panel_visible: false,
            ..self
        }
    }

    /// De chemoport wordt alleen getekend als het vaatstelsel zichtbaar is.
    #[must_use]
    pub const fn chemoport_drawn(self) -> bool {
        self.layers.vascular
    }
}

#[cfg(test)]
mod tests {
    use super::{LayerKind, LayerVisibility, ViewerState};

    #[test]
    fn toggling_changes_only_that_layer() {
        for layer in LayerKind::ALL {
            let start = ViewerState::default();
            let next = start.with_layer_toggled(layer);

            for other in LayerKind::ALL {
                let expected = if other == layer {
                    !start.layers.is_visible(other)
                } else {
                    start.layers.is_visible(other)
                };
                assert_eq!(next.layers.is_visible(other), expected, "{layer} -> {other}");
            }
            assert_eq!(next.chemoport_selected, start.chemoport_selected);
            assert_eq!(next.panel_visible, start.panel_visible);
        }
    }

    #[test]
    fn toggling_twice_is_identity() {
        for layers in LayerVisibility::combinations() {
            for layer in LayerKind::ALL {
                assert_eq!(layers.toggled(layer).toggled(layer), layers);
            }
        }
    }

    #[test]
    fn combinations_are_distinct() {
        let all: Vec<_> = LayerVisibility::combinations().collect();
        assert_eq!(all.len(), 16);
        for (i, a) in all.iter().enumerate() {
            assert!(all[i + 1..].iter().all(|b| b != a));
        }
    }

    #[test]
    fn parses_names_and_toggle_ids() {
        assert_eq!("skin".parse::<LayerKind>(), Ok(LayerKind::Skin));
        assert_eq!(" Vascular ".parse::<LayerKind>(), Ok(LayerKind::Vascular));
        assert_eq!("nerves-toggle".parse::<LayerKind>(), Ok(LayerKind::Nerves));
    }

    #[test]
    fn unknown_layer_suggests_closest_name() {
        let err = "muscle".parse::<LayerKind>().unwrap_err();
        assert_eq!(err.suggestion, Some("muscles"));
        assert!(err.to_string().contains("bedoelde je `muscles`"));

        let err = "bloodstream".parse::<LayerKind>().unwrap_err();
        assert_eq!(err.suggestion, None);
    }

    #[test]
    fn panel_close_leaves_anatomy_alone() {
        let state = ViewerState::default().with_chemoport_toggled();
        let closed = state.with_panel_closed();
        assert!(!closed.panel_visible);
        assert_eq!(closed.layers, state.layers);
        assert_eq!(closed.chemoport_selected, state.chemoport_selected);
        assert!(closed.with_panel_toggled().panel_visible);
    }
}
