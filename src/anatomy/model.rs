//! Vaste geometrie van het armmodel: splinecurves, primitieve vormen en de
//! eenmalig getesselleerde meshes.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::state::LayerKind;
use crate::geom::{
    CatmullRom3, CylinderSpec, GeomError, GeomMesh, GeomMeshDiagnostics, Point3, Transform, TubeOptions,
    Vec3, cylinder_mesh, tube_along_curve,
};

/// Rotatie (XYZ Euler, radialen) van de groep die alle armonderdelen bevat.
pub const ARM_ROTATION: [f64; 3] = [0.0, 0.0, 0.2];

/// Positie van de chemoport binnen de armgroep; tevens het begin van de katheter.
pub const CHEMOPORT_POSITION: [f64; 3] = [0.1, 0.8, 0.1];

/// Transformatie van armruimte naar wereldruimte.
#[must_use]
pub fn arm_transform() -> Transform {
    Transform::from_euler_xyz(ARM_ROTATION)
}

/// De zes benoemde curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurveName {
    MainArtery,
    SubclavianVein,
    SecondaryVein,
    Catheter,
    MainNerve,
    BranchNerve,
}

impl CurveName {
    pub const ALL: [Self; 6] = [
        Self::MainArtery,
        Self::SubclavianVein,
        Self::SecondaryVein,
        Self::Catheter,
        Self::MainNerve,
        Self::BranchNerve,
    ];

    #[must_use]
    pub fn control_points(self) -> &'static [[f64; 3]] {
        match self {
            Self::MainArtery => &[[0.0, 1.2, 0.05], [0.0, 0.0, 0.05], [0.0, -1.2, 0.05]],
            Self::SubclavianVein => &[
                [-0.1, 1.2, 0.0],
                [-0.08, 0.5, 0.0],
                [-0.1, 0.0, 0.0],
                [-0.09, -1.2, 0.0],
            ],
            Self::SecondaryVein => &[[-0.08, 0.5, 0.0], [0.05, 0.2, -0.05], [0.06, -0.8, -0.05]],
            // Van de chemoport naar de aansluiting op de subclavia.
            Self::Catheter => &[CHEMOPORT_POSITION, [0.0, 0.7, 0.0], [-0.08, 0.6, 0.0]],
            Self::MainNerve => &[[0.08, 1.2, -0.05], [0.1, 0.0, -0.05], [0.08, -1.2, -0.05]],
            Self::BranchNerve => &[[0.1, 0.1, -0.05], [0.2, -0.2, -0.02], [0.2, -0.9, -0.02]],
        }
    }

    pub fn build(self) -> Result<CatmullRom3, GeomError> {
        let points = self
            .control_points()
            .iter()
            .copied()
            .map(Point3::from_array)
            .collect();
        Ok(CatmullRom3::new(points)?)
    }
}

/// Groep waartoe een element behoort. Bot hoort bij geen schakelbare laag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerGroup {
    Bone,
    Muscles,
    Vascular,
    Nerves,
    Skin,
}

impl LayerGroup {
    /// De laag die deze groep schakelt, of `None` voor altijd zichtbaar.
    #[must_use]
    pub const fn toggle(self) -> Option<LayerKind> {
        match self {
            Self::Bone => None,
            Self::Muscles => Some(LayerKind::Muscles),
            Self::Vascular => Some(LayerKind::Vascular),
            Self::Nerves => Some(LayerKind::Nerves),
            Self::Skin => Some(LayerKind::Skin),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bone => "bone",
            Self::Muscles => "muscles",
            Self::Vascular => "vascular",
            Self::Nerves => "nerves",
            Self::Skin => "skin",
        }
    }
}

/// Elk tekenbaar onderdeel van het model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementId {
    Bone,
    Muscle,
    Artery,
    SubclavianVein,
    SecondaryVein,
    Chemoport,
    Catheter,
    MainNerve,
    BranchNerve,
    Skin,
}

impl ElementId {
    pub const ALL: [Self; 10] = [
        Self::Bone,
        Self::Muscle,
        Self::Artery,
        Self::SubclavianVein,
        Self::SecondaryVein,
        Self::Chemoport,
        Self::Catheter,
        Self::MainNerve,
        Self::BranchNerve,
        Self::Skin,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bone => "bone",
            Self::Muscle => "muscle",
            Self::Artery => "artery",
            Self::SubclavianVein => "subclavian-vein",
            Self::SecondaryVein => "secondary-vein",
            Self::Chemoport => "chemoport",
            Self::Catheter => "catheter",
            Self::MainNerve => "main-nerve",
            Self::BranchNerve => "branch-nerve",
            Self::Skin => "skin",
        }
    }

    #[must_use]
    pub const fn group(self) -> LayerGroup {
        match self {
            Self::Bone => LayerGroup::Bone,
            Self::Muscle => LayerGroup::Muscles,
            Self::Artery
            | Self::SubclavianVein
            | Self::SecondaryVein
            | Self::Chemoport
            | Self::Catheter => LayerGroup::Vascular,
            Self::MainNerve | Self::BranchNerve => LayerGroup::Nerves,
            Self::Skin => LayerGroup::Skin,
        }
    }

    /// Alleen de chemoport reageert op pointer-events.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::Chemoport)
    }

    #[must_use]
    pub const fn shape(self) -> Shape {
        match self {
            Self::Bone => Shape::cylinder(0.08, 0.06, 2.5, 16, [0.0; 3]),
            Self::Muscle => Shape::cylinder(0.2, 0.15, 2.5, 32, [0.0; 3]),
            Self::Skin => Shape::cylinder(0.22, 0.17, 2.5, 32, [0.0; 3]),
            Self::Chemoport => Shape::cylinder(0.05, 0.05, 0.02, 24, CHEMOPORT_POSITION),
            Self::Artery => Shape::tube(CurveName::MainArtery, 64, 0.015),
            Self::SubclavianVein => Shape::tube(CurveName::SubclavianVein, 64, 0.02),
            Self::SecondaryVein => Shape::tube(CurveName::SecondaryVein, 64, 0.02),
            Self::Catheter => Shape::tube(CurveName::Catheter, 32, 0.005),
            Self::MainNerve => Shape::tube(CurveName::MainNerve, 64, 0.008),
            Self::BranchNerve => Shape::tube(CurveName::BranchNerve, 64, 0.008),
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("onbekend element `{0}`")]
pub struct UnknownElement(pub String);

impl FromStr for ElementId {
    type Err = UnknownElement;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let key = input.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == key)
            .ok_or_else(|| UnknownElement(input.to_owned()))
    }
}

/// Geometrische beschrijving van een element, in armruimte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Cylinder {
        spec: CylinderSpec,
        position: [f64; 3],
    },
    Tube {
        curve: CurveName,
        options: TubeOptions,
    },
}

/// Segmenten rond de doorsnede van elke buis.
const TUBE_RADIAL_SEGMENTS: usize = 8;

impl Shape {
    const fn cylinder(
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
        radial_segments: usize,
        position: [f64; 3],
    ) -> Self {
        Self::Cylinder {
            spec: CylinderSpec::new(radius_top, radius_bottom, height, radial_segments),
            position,
        }
    }

    const fn tube(curve: CurveName, tubular_segments: usize, radius: f64) -> Self {
        Self::Tube {
            curve,
            options: TubeOptions {
                tubular_segments,
                radius,
                radial_segments: TUBE_RADIAL_SEGMENTS,
            },
        }
    }

    /// Plaatsing van het element binnen de armgroep.
    #[must_use]
    pub fn local_transform(&self) -> Transform {
        match self {
            Self::Cylinder { position, .. } => Transform::translate(Vec3::from(*position)),
            Self::Tube { .. } => Transform::identity(),
        }
    }
}

/// Getesselleerde mesh van een element, met diagnose.
#[derive(Debug, Clone)]
pub struct ElementMesh {
    pub mesh: GeomMesh,
    pub diagnostics: GeomMeshDiagnostics,
}

/// Curves en meshes van het hele model, eenmaal per sessie opgebouwd.
#[derive(Debug, Clone)]
pub struct Anatomy {
    curves: BTreeMap<CurveName, CatmullRom3>,
    meshes: BTreeMap<ElementId, ElementMesh>,
}

impl Anatomy {
    pub fn new() -> Result<Self, GeomError> {
        let curves = CurveName::ALL
            .into_iter()
            .map(|name| name.build().map(|curve| (name, curve)))
            .collect::<Result<BTreeMap<_, _>, GeomError>>()?;

        let mut meshes = BTreeMap::new();
        for id in ElementId::ALL {
            let (mesh, diagnostics) = match id.shape() {
                Shape::Cylinder { spec, position } => {
                    cylinder_mesh(spec, Point3::from_array(position))?
                }
                Shape::Tube { curve, options } => {
                    // Alle curves zijn hierboven gebouwd.
                    let Some(rail) = curves.get(&curve) else {
                        continue;
                    };
                    tube_along_curve(rail, options)?
                }
            };

            for warning in &diagnostics.warnings {
                log::warn!("{id}: {warning}");
            }
            log::debug!("{id}: {diagnostics}");
            meshes.insert(id, ElementMesh { mesh, diagnostics });
        }

        Ok(Self { curves, meshes })
    }

    #[must_use]
    pub fn curve(&self, name: CurveName) -> Option<&CatmullRom3> {
        self.curves.get(&name)
    }

    #[must_use]
    pub fn mesh(&self, id: ElementId) -> Option<&ElementMesh> {
        self.meshes.get(&id)
    }
}
