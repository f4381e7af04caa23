//! Output types: step validation outcomes and the material list.
//!
//! Material names and units are opaque identifiers (snake_case in JSON). Turning
//! them into localized labels is the presentation layer's job.

use serde::{Deserialize, Serialize};

use super::covering::CoveringKind;
use crate::geometry;
use crate::packaging::PackagePlan;

/// Outcome of checking one wizard step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepValidationResult {
    pub valid: bool,
    /// Human-readable reason when not valid
    pub reason: Option<String>,
    /// Snapshot field the reason refers to
    pub field: Option<String>,
}

impl StepValidationResult {
    /// A passing result
    pub fn ok() -> Self {
        StepValidationResult {
            valid: true,
            reason: None,
            field: None,
        }
    }

    /// A failing result pointing at `field`
    pub fn fail(field: impl Into<String>, reason: impl Into<String>) -> Self {
        StepValidationResult {
            valid: false,
            reason: Some(reason.into()),
            field: Some(field.into()),
        }
    }
}

/// Material identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    Tiles,
    WallTiles,
    MosaicSheets,
    Stone,
    Pavers,
    AdhesiveMortar,
    Grout,
    Spacers,
    BeddingSand,
    GradedCrushedStone,
    Concrete,
    WeldedMesh,
    JointSand,
    Cement,
    MortarSand,
    Baseboard,
    Waterproofing,
}

impl MaterialKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialKind::Tiles => "Tiles",
            MaterialKind::WallTiles => "Wall tiles",
            MaterialKind::MosaicSheets => "Mosaic sheets",
            MaterialKind::Stone => "Stone",
            MaterialKind::Pavers => "Pavers",
            MaterialKind::AdhesiveMortar => "Adhesive mortar",
            MaterialKind::Grout => "Grout",
            MaterialKind::Spacers => "Spacers",
            MaterialKind::BeddingSand => "Bedding sand",
            MaterialKind::GradedCrushedStone => "Graded crushed stone",
            MaterialKind::Concrete => "Concrete",
            MaterialKind::WeldedMesh => "Welded mesh",
            MaterialKind::JointSand => "Joint sand",
            MaterialKind::Cement => "Cement",
            MaterialKind::MortarSand => "Mortar sand",
            MaterialKind::Baseboard => "Baseboard",
            MaterialKind::Waterproofing => "Waterproofing",
        }
    }
}

/// Purchase/measurement units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialUnit {
    Piece,
    Box,
    Sheet,
    Bag,
    Roll,
    Panel,
    Bucket,
    SquareMeter,
    CubicMeter,
    LinearMeter,
    Kilogram,
    Liter,
}

impl MaterialUnit {
    /// Whether the unit is a whole count
    pub fn is_count(&self) -> bool {
        matches!(
            self,
            MaterialUnit::Piece
                | MaterialUnit::Box
                | MaterialUnit::Sheet
                | MaterialUnit::Bag
                | MaterialUnit::Roll
                | MaterialUnit::Panel
                | MaterialUnit::Bucket
        )
    }

    /// Decimal places shown for this unit
    pub fn decimals(&self) -> u32 {
        match self {
            MaterialUnit::CubicMeter => 3,
            MaterialUnit::SquareMeter | MaterialUnit::LinearMeter | MaterialUnit::Kilogram | MaterialUnit::Liter => 2,
            _ => 0,
        }
    }

    /// Round a raw quantity for display.
    ///
    /// Counts are rounded up; measured quantities are rounded to
    /// [`decimals`](Self::decimals) places.
    pub fn round(&self, quantity: f64) -> f64 {
        if self.is_count() {
            geometry::ceil_count(quantity) as f64
        } else {
            geometry::round_to(quantity.max(0.0), self.decimals())
        }
    }

    /// Unit symbol used in purchase notes
    pub fn symbol(&self) -> &'static str {
        match self {
            MaterialUnit::Piece => "pc",
            MaterialUnit::Box => "box",
            MaterialUnit::Sheet => "sheet",
            MaterialUnit::Bag => "bag",
            MaterialUnit::Roll => "roll",
            MaterialUnit::Panel => "panel",
            MaterialUnit::Bucket => "bucket",
            MaterialUnit::SquareMeter => "m²",
            MaterialUnit::CubicMeter => "m³",
            MaterialUnit::LinearMeter => "m",
            MaterialUnit::Kilogram => "kg",
            MaterialUnit::Liter => "L",
        }
    }
}

/// Adhesive mortar class (EN 12004 / NBR 14081 style grades)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdhesiveClass {
    /// Interior, small formats
    #[serde(rename = "ACI")]
    AcI,
    /// Exterior and semi-humid areas
    #[serde(rename = "ACII")]
    AcII,
    /// Porcelain, large formats, wet areas, stone
    #[serde(rename = "ACIII")]
    AcIII,
}

impl AdhesiveClass {
    pub fn code(&self) -> &'static str {
        match self {
            AdhesiveClass::AcI => "ACI",
            AdhesiveClass::AcII => "ACII",
            AdhesiveClass::AcIII => "ACIII",
        }
    }
}

/// Grout class, chosen from the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroutClass {
    CementitiousType1,
    CementitiousType2,
    Epoxy,
}

impl GroutClass {
    pub fn code(&self) -> &'static str {
        match self {
            GroutClass::CementitiousType1 => "type_1",
            GroutClass::CementitiousType2 => "type_2",
            GroutClass::Epoxy => "epoxy",
        }
    }
}

/// Setting bed used under stone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BedKind {
    /// Thin bonded adhesive mortar bed
    Adhesive,
    /// Thick sand-cement mortar bed
    SandCement,
}

/// Stone bed decision reported in the result header
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoneBed {
    pub kind: BedKind,
    /// Bed thickness in cm (sand-cement only)
    pub thickness_cm: Option<f64>,
}

/// One line of the material list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialItem {
    pub material: MaterialKind,
    /// Product grade or variant (adhesive class, grout class, layer type...)
    pub grade: Option<String>,
    pub unit: MaterialUnit,
    /// Rounded quantity in `unit`
    pub quantity: f64,
    /// Short purchase hint, e.g. "2 × 20 kg + 1 × 5 kg"
    pub purchase_note: String,
    /// Package combination when the material is sold in discrete packs
    pub packages: Option<PackagePlan>,
}

impl MaterialItem {
    /// Create an item, rounding `quantity` for its unit
    pub fn new(material: MaterialKind, unit: MaterialUnit, quantity: f64) -> Self {
        MaterialItem {
            material,
            grade: None,
            unit,
            quantity: unit.round(quantity),
            purchase_note: String::new(),
            packages: None,
        }
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.purchase_note = note.into();
        self
    }

    /// Attach a package plan; its note becomes the purchase note
    pub fn with_packages(mut self, plan: PackagePlan) -> Self {
        self.purchase_note = plan.note(self.unit.symbol());
        self.packages = Some(plan);
        self
    }
}

/// Summary shown above the material list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultHeader {
    pub covering_kind: Option<CoveringKind>,
    /// Area the covering is calculated for (m²)
    pub base_area_m2: f64,
    /// Area before openings, for display (m²)
    pub gross_area_m2: f64,
    /// Base area plus same-piece baseboard strips (m²)
    pub coverage_area_m2: f64,
    pub waste_percent: f64,
    /// Baseboard length after deductions (m)
    pub baseboard_perimeter_m: Option<f64>,
    pub stone_bed: Option<StoneBed>,
}

/// Complete output of one "calculate" action.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultBundle {
    pub header: ResultHeader,
    pub adhesive_class: Option<AdhesiveClass>,
    pub items: Vec<MaterialItem>,
}

impl ResultBundle {
    /// First item of the given material
    pub fn item(&self, material: MaterialKind) -> Option<&MaterialItem> {
        self.items.iter().find(|i| i.material == material)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
