//! Laagrenderer: zet zichtbaarheid en selectie om in de set te tekenen
//! elementen. Een pure functie; meshes worden apart uit [`Anatomy`] gehaald.
//!
//! [`Anatomy`]: super::model::Anatomy

use serde::Serialize;

use super::material::{Color, Material};
use super::model::{ElementId, LayerGroup, Shape};
use super::state::LayerVisibility;

const BONE: Color = Color::from_hex(0xE0_E1DD);
const MUSCLE: Color = Color::from_hex(0xB2_2222);
const ARTERY: Color = Color::from_hex(0xFF_495C);
const VEIN: Color = Color::from_hex(0x3A_86FF);
const PORT_METAL: Color = Color::from_hex(0x77_8DA9);
const PORT_GLOW: Color = Color::from_hex(0xAD_D8E6);
const CATHETER: Color = Color::from_hex(0xAD_D8E6);
const NERVE: Color = Color::from_hex(0xFF_D166);
const SKIN: Color = Color::from_hex(0xFF_DBAC);

/// Eén te tekenen element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawElement {
    pub id: ElementId,
    pub group: LayerGroup,
    pub shape: Shape,
    pub material: Material,
    pub interactive: bool,
}

/// Resultaat van de laagrenderer. De volgorde is niet betekenisvol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawSet {
    elements: Vec<DrawElement>,
}

impl DrawSet {
    #[must_use]
    pub fn elements(&self) -> &[DrawElement] {
        &self.elements
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&DrawElement> {
        self.elements.iter().find(|element| element.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.iter().map(|element| element.id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Groepen met minstens één getekend element.
    #[must_use]
    pub fn groups(&self) -> Vec<LayerGroup> {
        let mut groups: Vec<LayerGroup> = self.elements.iter().map(|element| element.group).collect();
        groups.sort();
        groups.dedup();
        groups
    }
}

/// Samenvatting van een element zonder mesh, voor logging en de CLI.
#[derive(Debug, Clone, Serialize)]
pub struct DrawSummary {
    pub id: ElementId,
    pub group: LayerGroup,
    pub interactive: bool,
    pub glowing: bool,
}

impl From<&DrawElement> for DrawSummary {
    fn from(element: &DrawElement) -> Self {
        Self {
            id: element.id,
            group: element.group,
            interactive: element.interactive,
            glowing: element.material.is_glowing(),
        }
    }
}

/// Bepaal welke elementen getekend worden.
///
/// Bot wordt altijd getekend; elke andere groep precies wanneer de
/// bijbehorende laag zichtbaar is.
#[must_use]
pub fn render_layers(layers: LayerVisibility, chemoport_selected: bool) -> DrawSet {
    let elements = ElementId::ALL
        .into_iter()
        .filter(|id| {
            id.group()
                .toggle()
                .is_none_or(|layer| layers.is_visible(layer))
        })
        .map(|id| DrawElement {
            id,
            group: id.group(),
            shape: id.shape(),
            material: material_for(id, chemoport_selected),
            interactive: id.is_interactive(),
        })
        .collect();

    DrawSet { elements }
}

/// Materiaal van een element. Alleen de chemoport hangt af van de selectie.
#[must_use]
pub fn material_for(id: ElementId, chemoport_selected: bool) -> Material {
    match id {
        ElementId::Bone => Material::standard(BONE).roughness(0.6).metalness(0.1),
        ElementId::Muscle => Material::standard(MUSCLE).roughness(0.8).translucent(0.6),
        ElementId::Artery => Material::standard(ARTERY)
            .emissive(ARTERY, 0.2)
            .translucent(0.8)
            .roughness(0.4)
            .metalness(0.2),
        ElementId::SubclavianVein | ElementId::SecondaryVein => Material::standard(VEIN)
            .translucent(0.6)
            .roughness(0.5)
            .metalness(0.1),
        ElementId::Chemoport => {
            let port = Material::standard(PORT_METAL)
                .metalness(0.8)
                .roughness(0.2)
                .without_tone_mapping();
            if chemoport_selected {
                port.emissive(PORT_GLOW, 0.7)
            } else {
                port.emissive(Color::BLACK, 0.0)
            }
        }
        ElementId::Catheter => Material::standard(CATHETER).roughness(0.3),
        ElementId::MainNerve | ElementId::BranchNerve => Material::standard(NERVE)
            .emissive(NERVE, 0.3)
            .translucent(0.9),
        ElementId::Skin => Material::standard(SKIN).translucent(0.3).roughness(0.5),
    }
}
