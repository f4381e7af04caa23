//! # Flagstone, Marble and Granite
//!
//! Natural stone is set either in a thin adhesive bed or, over uneven
//! subfloors and for thick pieces, in a sand-cement mortar bed.
//!
//! ## Bed selection
//!
//! | Condition | Bed |
//! |-----------|-----|
//! | unevenness ≥ 1.0 cm or thickness ≥ 20 mm | sand-cement, max(3.0, unevenness + 0.5) cm |
//! | otherwise | adhesive mortar ACIII |
//!
//! The bed thickness jumps from 3.0 to 3.5 cm between 2.5 and 3.0 cm of
//! unevenness; that step is intentional.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::stone::select_bed;
//! use estimate_core::model::BedKind;
//!
//! let bed = select_bed(2.0, Some(15.0));
//! assert_eq!(bed.kind, BedKind::SandCement);
//! assert_eq!(bed.thickness_cm, Some(3.0));
//!
//! assert_eq!(select_bed(0.0, Some(12.0)).kind, BedKind::Adhesive);
//! ```

use tracing::debug;

use super::{consumption, packaged_item, pieces_item, BranchOutput};
use crate::geometry;
use crate::model::{AdhesiveClass, BedKind, MaterialItem, MaterialKind, MaterialUnit, StoneBed, StoneParams};
use crate::packaging::PackagingStrategy;
use crate::settings::EstimatorSettings;
use crate::units::{Centimeters, CubicMeters, Kilograms, Meters, SquareMeters};

/// Unevenness from which a mortar bed is needed (cm)
pub const SAND_CEMENT_UNEVENNESS_CM: f64 = 1.0;
/// Piece thickness from which a mortar bed is needed (mm)
pub const SAND_CEMENT_THICKNESS_MM: f64 = 20.0;
/// Thinnest sand-cement bed (cm)
pub const MIN_BED_CM: f64 = 3.0;
/// Bed thickness above the unevenness (cm)
pub const BED_ALLOWANCE_CM: f64 = 0.5;

/// Sand-cement bed thickness for a given unevenness, to one decimal (cm)
pub fn bed_thickness_cm(unevenness_cm: f64) -> f64 {
    geometry::round_to(MIN_BED_CM.max(unevenness_cm + BED_ALLOWANCE_CM), 1)
}

/// Choose the setting bed for a stone job.
pub fn select_bed(unevenness_cm: f64, thickness_mm: Option<f64>) -> StoneBed {
    let thick = thickness_mm.is_some_and(|t| t >= SAND_CEMENT_THICKNESS_MM);
    if unevenness_cm >= SAND_CEMENT_UNEVENNESS_CM || thick {
        StoneBed {
            kind: BedKind::SandCement,
            thickness_cm: Some(bed_thickness_cm(unevenness_cm)),
        }
    } else {
        StoneBed {
            kind: BedKind::Adhesive,
            thickness_cm: None,
        }
    }
}

/// Material lines for a stone job
pub fn calculate(params: &StoneParams, area: SquareMeters, settings: &EstimatorSettings) -> BranchOutput {
    let waste = geometry::waste_factor(params.waste_percent);
    let bed = select_bed(params.unevenness_cm, params.thickness_mm);
    debug!(kind = ?params.kind, bed = ?bed.kind, "stone bed selected");

    let mut items = vec![
        MaterialItem::new(MaterialKind::Stone, MaterialUnit::SquareMeter, area.0 * waste)
            .with_grade(params.kind.display_name()),
    ];
    if let Some((length, width)) = params.piece_cm {
        let piece_area = geometry::piece_area(Centimeters(length), Centimeters(width));
        let pieces = geometry::pieces_needed(area, piece_area, params.waste_percent);
        items.push(pieces_item(MaterialKind::Stone, pieces, params.pieces_per_box));
    }

    let mut adhesive_class = None;
    match bed.kind {
        BedKind::Adhesive => {
            let class = AdhesiveClass::AcIII;
            let max_side = params.joint_piece_cm.map(|(l, w)| l.max(w)).unwrap_or(0.0);
            let rate = consumption::adhesive_kg_m2(max_side, None, params.thickness_mm, params.environment);
            items.push(
                packaged_item(
                    MaterialKind::AdhesiveMortar,
                    MaterialUnit::Kilogram,
                    rate * area.0 * waste,
                    PackagingStrategy::BoundedPair,
                    &settings.packages.adhesive_kg,
                )
                .with_grade(class.code()),
            );
            adhesive_class = Some(class);
        }
        BedKind::SandCement => {
            let thickness: Meters = Centimeters(bed.thickness_cm.unwrap_or(MIN_BED_CM)).into();
            let mortar: CubicMeters = area * thickness * waste;
            let cement = Kilograms(mortar.0 * settings.densities.bed_cement_kg_per_m3);
            items.push(
                packaged_item(
                    MaterialKind::Cement,
                    MaterialUnit::Kilogram,
                    cement.value(),
                    PackagingStrategy::GreedyDescending,
                    &[settings.packages.cement_bag_kg],
                )
                .with_grade("sand_cement_bed"),
            );
            items.push(
                MaterialItem::new(
                    MaterialKind::MortarSand,
                    MaterialUnit::CubicMeter,
                    mortar.0 * settings.constants.bed_sand_bulking,
                )
                .with_note(format!("{:.3} m³ of mortar", mortar.0)),
            );
        }
    }

    if let (Some((length, width)), Some(joint), Some(thickness)) =
        (params.joint_piece_cm, params.joint_mm, params.thickness_mm)
    {
        let grout = consumption::grout_class(params.environment);
        let rate = consumption::grout_kg_m2(length, width, joint, thickness, settings.densities.grout(grout));
        items.push(
            packaged_item(
                MaterialKind::Grout,
                MaterialUnit::Kilogram,
                rate * area.0 * waste,
                PackagingStrategy::GreedyDescending,
                &settings.packages.grout_kg,
            )
            .with_grade(grout.code()),
        );
    }

    BranchOutput {
        items,
        adhesive_class,
        stone_bed: Some(bed),
    }
}
