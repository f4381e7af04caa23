//! # Quantity Calculations
//!
//! Turns an [`InputSnapshot`] into a [`ResultBundle`]: the result header and
//! the material list with purchase packaging.
//!
//! Each covering family has its own branch, fed with the typed parameter view
//! from [`CoveringParams`]:
//!
//! - [`tile`] - floor and wall tile (pieces, adhesive, grout, spacers)
//! - [`mosaic`] - mosaic sheets
//! - [`stone`] - flagstone, marble and granite with bed selection
//! - [`pavement`] - interlocking pavers with sand bed and base course
//! - [`extras`] - baseboard and waterproofing lines appended after the branch
//!
//! Calculation never fails. Missing inputs leave out the lines that depend on
//! them, so an incomplete snapshot yields a partial (possibly empty) list.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::calculate;
//! use estimate_core::model::{CoveringKind, EnvironmentClass, InputSnapshot, MaterialKind, SurfaceKind};
//!
//! let mut snapshot = InputSnapshot::new();
//! snapshot.set_covering_kind(CoveringKind::Tile);
//! snapshot.set_surface_kind(SurfaceKind::Ceramic);
//! snapshot.set_environment(EnvironmentClass::Dry);
//! snapshot.set_total_area_m2(Some(20.0));
//! snapshot.set_piece_length_cm(Some(60.0));
//! snapshot.set_piece_width_cm(Some(60.0));
//! snapshot.set_joint_mm(Some(3.0));
//! snapshot.set_waste_percent(Some(10.0));
//!
//! let result = calculate(&snapshot);
//! assert_eq!(result.item(MaterialKind::Tiles).unwrap().quantity, 62.0);
//! ```

pub mod consumption;
pub mod extras;
pub mod mosaic;
pub mod pavement;
pub mod stone;
pub mod tile;

use tracing::debug;

use crate::geometry;
use crate::model::{
    AdhesiveClass, BaseboardMaterial, CoveringParams, InputSnapshot, MaterialItem, MaterialKind, MaterialUnit,
    ResultBundle, ResultHeader, StoneBed,
};
use crate::packaging::PackagingStrategy;
use crate::settings::{EstimatorSettings, DEFAULT_SETTINGS};
use crate::units::SquareMeters;

/// Material lines produced by one covering branch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchOutput {
    pub items: Vec<MaterialItem>,
    pub adhesive_class: Option<AdhesiveClass>,
    pub stone_bed: Option<StoneBed>,
}

/// Calculate with the built-in package catalog
pub fn calculate(snapshot: &InputSnapshot) -> ResultBundle {
    calculate_with(snapshot, &DEFAULT_SETTINGS)
}

/// Calculate the material list for a snapshot.
pub fn calculate_with(snapshot: &InputSnapshot, settings: &EstimatorSettings) -> ResultBundle {
    let waste_percent = snapshot.effective_waste_percent();
    let base_area = snapshot.base_area();
    let baseboard_area = same_piece_baseboard_area(snapshot);
    let coverage = base_area.map(|a| a + baseboard_area.unwrap_or_default());

    let mut header = ResultHeader {
        covering_kind: snapshot.covering_kind(),
        base_area_m2: round_area(base_area),
        gross_area_m2: round_area(snapshot.gross_area()),
        coverage_area_m2: round_area(coverage),
        waste_percent,
        baseboard_perimeter_m: snapshot
            .active_baseboard()
            .and_then(|_| snapshot.baseboard_net_perimeter())
            .map(|p| geometry::round_to(p.0, 2)),
        stone_bed: None,
    };

    let (Some(params), Some(coverage)) = (CoveringParams::from_snapshot(snapshot), coverage) else {
        debug!(
            kind = ?snapshot.covering_kind(),
            "snapshot incomplete, no material lines"
        );
        return ResultBundle {
            header,
            adhesive_class: None,
            items: Vec::new(),
        };
    };

    let branch = match &params {
        CoveringParams::Tile(p) => tile::calculate(p, coverage, settings),
        CoveringParams::Mosaic(p) => mosaic::calculate(p, coverage, settings),
        CoveringParams::Stone(p) => stone::calculate(p, coverage, settings),
        CoveringParams::Pavement(p) => pavement::calculate(p, coverage, settings),
    };
    header.stone_bed = branch.stone_bed;

    let mut items = branch.items;
    items.extend(extras::baseboard(snapshot));
    items.extend(extras::waterproofing(snapshot, settings));

    debug!(
        kind = ?snapshot.covering_kind(),
        coverage_m2 = coverage.0,
        waste_percent,
        lines = items.len(),
        "calculated material list"
    );

    ResultBundle {
        header,
        adhesive_class: branch.adhesive_class,
        items,
    }
}

/// Area of same-piece baseboard strips, cut from the main covering
fn same_piece_baseboard_area(snapshot: &InputSnapshot) -> Option<SquareMeters> {
    let baseboard = snapshot.active_baseboard()?;
    match baseboard.material {
        BaseboardMaterial::SamePiece => snapshot.baseboard_area(),
        BaseboardMaterial::PreMade => None,
    }
}

fn round_area(area: Option<SquareMeters>) -> f64 {
    area.map(|a| geometry::round_to(a.0, 2)).unwrap_or(0.0)
}

/// Line for a material sold in packages of the given sizes
pub(crate) fn packaged_item(
    material: MaterialKind,
    unit: MaterialUnit,
    quantity: f64,
    strategy: PackagingStrategy,
    sizes: &[f64],
) -> MaterialItem {
    let plan = strategy.plan(quantity, sizes);
    MaterialItem::new(material, unit, quantity).with_packages(plan)
}

/// Piece line, rounded up to whole boxes when the box size is known
pub(crate) fn pieces_item(material: MaterialKind, pieces: u64, pieces_per_box: Option<u32>) -> MaterialItem {
    match pieces_per_box {
        Some(per_box) => {
            let (boxes, purchased) = geometry::whole_boxes(pieces, per_box);
            MaterialItem::new(material, MaterialUnit::Piece, purchased as f64)
                .with_note(format!("{} × box of {} pc", boxes, per_box))
        }
        None => MaterialItem::new(material, MaterialUnit::Piece, pieces as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoveringKind, EnvironmentClass, SurfaceKind, WaterproofingKind};

    fn tile_scenario() -> InputSnapshot {
        let mut s = InputSnapshot::new();
        s.set_covering_kind(CoveringKind::Tile);
        s.set_surface_kind(SurfaceKind::Ceramic);
        s.set_environment(EnvironmentClass::Dry);
        s.set_total_area_m2(Some(20.0));
        s.set_piece_length_cm(Some(60.0));
        s.set_piece_width_cm(Some(60.0));
        s.set_joint_mm(Some(3.0));
        s.set_waste_percent(Some(10.0));
        s
    }

    #[test]
    fn test_empty_snapshot_gives_empty_bundle() {
        let result = calculate(&InputSnapshot::new());
        assert!(result.is_empty());
        assert_eq!(result.header.covering_kind, None);
        assert_eq!(result.adhesive_class, None);
    }

    #[test]
    fn test_missing_area_gives_header_only() {
        let mut s = tile_scenario();
        s.set_total_area_m2(None);
        let result = calculate(&s);
        assert!(result.is_empty());
        assert_eq!(result.header.covering_kind, Some(CoveringKind::Tile));
        assert_eq!(result.header.waste_percent, 10.0);
    }

    #[test]
    fn test_tile_scenario_header() {
        let result = calculate(&tile_scenario());
        assert_eq!(result.header.base_area_m2, 20.0);
        assert_eq!(result.header.coverage_area_m2, 20.0);
        assert_eq!(result.header.baseboard_perimeter_m, None);
        assert_eq!(result.item(MaterialKind::Tiles).unwrap().quantity, 62.0);
        assert_eq!(result.adhesive_class, Some(AdhesiveClass::AcI));
    }

    #[test]
    fn test_same_piece_baseboard_adds_coverage() {
        let mut s = InputSnapshot::new();
        s.set_covering_kind(CoveringKind::Tile);
        s.set_surface_kind(SurfaceKind::Ceramic);
        s.set_environment(EnvironmentClass::Dry);
        s.set_length_m(Some(5.0));
        s.set_width_m(Some(4.0));
        s.set_piece_length_cm(Some(60.0));
        s.set_piece_width_cm(Some(60.0));
        s.set_joint_mm(Some(3.0));
        s.set_baseboard_enabled(true);
        s.set_baseboard_height_cm(Some(10.0));
        s.set_baseboard_deduction_m(Some(0.8));

        let result = calculate(&s);
        assert_eq!(result.header.base_area_m2, 20.0);
        assert_eq!(result.header.coverage_area_m2, 21.72);
        assert_eq!(result.header.baseboard_perimeter_m, Some(17.2));
        // 21.72 / 0.36 × 1.10 = 66.37 -> 67
        assert_eq!(result.item(MaterialKind::Tiles).unwrap().quantity, 67.0);
        assert!(result.item(MaterialKind::Baseboard).is_some());

        s.set_baseboard_material(BaseboardMaterial::PreMade);
        s.set_baseboard_commercial_length_cm(Some(100.0));
        let result = calculate(&s);
        assert_eq!(result.header.coverage_area_m2, 20.0);
    }

    #[test]
    fn test_custom_settings_change_packaging() {
        let mut settings = EstimatorSettings::default();
        settings.packages.grout_kg = vec![2.0];
        let result = calculate_with(&tile_scenario(), &settings);
        let grout = result.item(MaterialKind::Grout).unwrap();
        let plan = grout.packages.as_ref().unwrap();
        assert!(plan.lines.iter().all(|l| l.size == 2.0));
    }

    #[test]
    fn test_waterproofing_appended_for_wet_tile() {
        let mut s = tile_scenario();
        s.set_environment(EnvironmentClass::Wet);
        s.set_waterproofing_enabled(true);
        let result = calculate(&s);
        let line = result.item(MaterialKind::Waterproofing).unwrap();
        assert_eq!(line.grade.as_deref(), Some(WaterproofingKind::PolymericMortar.code()));
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let s = tile_scenario();
        assert_eq!(calculate(&s), calculate(&s));
    }
}
