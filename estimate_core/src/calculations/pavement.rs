//! # Interlocking Pavement
//!
//! Pavers are laid on a compacted sand bed over a base course whose build-up
//! depends on the expected traffic:
//!
//! | Traffic | Sand bed | Base course |
//! |---------|----------|-------------|
//! | light   | 3 cm | 8 cm graded crushed stone |
//! | medium  | 4 cm | 12 cm graded crushed stone |
//! | heavy   | 5 cm | 10 cm concrete slab with welded mesh |
//!
//! Joints are filled with sand. In non-dry environments an optional
//! waterproofing layer goes under the sand bed.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::pavement::{layers, BaseCourse};
//! use estimate_core::model::TrafficClass;
//!
//! let heavy = layers(TrafficClass::Heavy);
//! assert_eq!(heavy.base, BaseCourse::ConcreteSlab);
//! assert_eq!(heavy.sand_bed_m, 0.05);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{extras, pieces_item, BranchOutput};
use crate::geometry;
use crate::model::{
    EnvironmentClass, MaterialItem, MaterialKind, MaterialUnit, PavementParams, TrafficClass, WaterproofingKind,
};
use crate::settings::EstimatorSettings;
use crate::units::{Centimeters, Meters, Millimeters, SquareMeters};

/// Base course material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseCourse {
    /// Graded crushed stone (BGS)
    GradedCrushedStone,
    /// Concrete slab reinforced with welded steel mesh
    ConcreteSlab,
}

/// Layer build-up for one traffic class, thicknesses in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PavementLayers {
    pub sand_bed_m: f64,
    pub base_m: f64,
    pub base: BaseCourse,
}

/// Layer build-up for a traffic class
pub fn layers(traffic: TrafficClass) -> PavementLayers {
    match traffic {
        TrafficClass::Light => PavementLayers {
            sand_bed_m: 0.03,
            base_m: 0.08,
            base: BaseCourse::GradedCrushedStone,
        },
        TrafficClass::Medium => PavementLayers {
            sand_bed_m: 0.04,
            base_m: 0.12,
            base: BaseCourse::GradedCrushedStone,
        },
        TrafficClass::Heavy => PavementLayers {
            sand_bed_m: 0.05,
            base_m: 0.10,
            base: BaseCourse::ConcreteSlab,
        },
    }
}

/// Waterproofing recommended under pavers; `None` in dry environments.
pub fn recommended_waterproofing(environment: EnvironmentClass, traffic: TrafficClass) -> Option<WaterproofingKind> {
    use TrafficClass::*;
    use WaterproofingKind::*;

    let kind = match (environment, traffic) {
        (EnvironmentClass::Dry, _) => return None,
        (EnvironmentClass::SemiHumid, Light | Medium) => GeotextileMembrane,
        (EnvironmentClass::SemiHumid, Heavy) => CrystallizingAdditive,
        (EnvironmentClass::Wet, Light) => GeotextileMembrane,
        (EnvironmentClass::Wet, Medium) => AsphalticMembrane,
        (EnvironmentClass::Wet, Heavy) => CrystallizingAdditive,
        (EnvironmentClass::AlwaysWet, _) => AsphalticMembrane,
    };
    Some(kind)
}

/// Material lines for an interlocking pavement job
pub fn calculate(params: &PavementParams, area: SquareMeters, settings: &EstimatorSettings) -> BranchOutput {
    let waste = geometry::waste_factor(params.waste_percent);
    let mut items = Vec::new();

    if let (Some(length), Some(width)) = (params.piece_length_cm, params.piece_width_cm) {
        let piece_area = geometry::piece_area(Centimeters(length), Centimeters(width));
        let pavers = geometry::pieces_needed(area, piece_area, params.waste_percent);
        items.push(pieces_item(MaterialKind::Pavers, pavers, params.pieces_per_box));
    }

    let Some(traffic) = params.traffic else {
        debug!("pavement: traffic class missing, no layers");
        return BranchOutput {
            items,
            ..BranchOutput::default()
        };
    };
    let build_up = layers(traffic);

    items.push(
        MaterialItem::new(
            MaterialKind::BeddingSand,
            MaterialUnit::CubicMeter,
            (area * Meters(build_up.sand_bed_m) * waste).0,
        )
        .with_note(format!("{:.0} cm bed", build_up.sand_bed_m * 100.0)),
    );

    let base_volume = (area * Meters(build_up.base_m) * waste).0;
    match build_up.base {
        BaseCourse::GradedCrushedStone => items.push(
            MaterialItem::new(MaterialKind::GradedCrushedStone, MaterialUnit::CubicMeter, base_volume)
                .with_note(format!("{:.0} cm base", build_up.base_m * 100.0)),
        ),
        BaseCourse::ConcreteSlab => {
            items.push(
                MaterialItem::new(MaterialKind::Concrete, MaterialUnit::CubicMeter, base_volume)
                    .with_note(format!("{:.0} cm slab", build_up.base_m * 100.0)),
            );
            let constants = &settings.constants;
            let panels = geometry::ceil_count(area.0 * waste / constants.mesh_panel_effective_area_m2());
            items.push(
                MaterialItem::new(MaterialKind::WeldedMesh, MaterialUnit::Panel, panels as f64).with_note(format!(
                    "{} × {} m panels, {}% overlap",
                    constants.mesh_panel_length_m, constants.mesh_panel_width_m, constants.mesh_overlap_percent
                )),
            );
        }
    }

    if let (Some(length), Some(width), Some(joint), Some(thickness)) = (
        params.piece_length_cm,
        params.piece_width_cm,
        params.joint_mm,
        params.thickness_mm,
    ) {
        let per_m2 = geometry::joint_volume_per_m2(
            Centimeters(length).into(),
            Centimeters(width).into(),
            Millimeters(joint).into(),
            Millimeters(thickness).into(),
        );
        items.push(MaterialItem::new(
            MaterialKind::JointSand,
            MaterialUnit::CubicMeter,
            per_m2 * area.0 * waste,
        ));
    }

    if params.waterproofing_enabled {
        let chosen = params.waterproofing_kind.filter(|k| k.is_pavement_kind());
        let product = params
            .environment
            .and_then(|environment| recommended_waterproofing(environment, traffic))
            .map(|recommended| chosen.unwrap_or(recommended));
        if let Some(product) = product {
            items.push(extras::waterproofing_item(product, area.0 * waste, settings));
        }
    }

    BranchOutput {
        items,
        adhesive_class: None,
        stone_bed: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(traffic: TrafficClass) -> PavementParams {
        PavementParams {
            traffic: Some(traffic),
            environment: Some(EnvironmentClass::Dry),
            piece_length_cm: Some(20.0),
            piece_width_cm: Some(10.0),
            thickness_mm: Some(60.0),
            joint_mm: Some(3.0),
            pieces_per_box: None,
            waste_percent: 10.0,
            waterproofing_enabled: false,
            waterproofing_kind: None,
        }
    }

    fn run(p: &PavementParams) -> BranchOutput {
        calculate(p, SquareMeters(50.0), &EstimatorSettings::default())
    }

    fn quantity(out: &BranchOutput, material: MaterialKind) -> Option<f64> {
        out.items.iter().find(|i| i.material == material).map(|i| i.quantity)
    }

    #[test]
    fn test_light_traffic_scenario() {
        let out = run(&params(TrafficClass::Light));
        // 50 m² × 0.03 m × 1.10 and 50 × 0.08 × 1.10
        assert_eq!(quantity(&out, MaterialKind::BeddingSand), Some(1.65));
        assert_eq!(quantity(&out, MaterialKind::GradedCrushedStone), Some(4.4));
        assert_eq!(quantity(&out, MaterialKind::Concrete), None);
        // 50 / 0.02 × 1.10
        assert_eq!(quantity(&out, MaterialKind::Pavers), Some(2750.0));
        assert_eq!(out.adhesive_class, None);
    }

    #[test]
    fn test_joint_sand() {
        let mut p = params(TrafficClass::Light);
        p.joint_mm = Some(4.0);
        let out = run(&p);
        // (0.3 / 0.02) × 0.004 × 0.06 = 0.0036 m³/m² × 50 × 1.10
        assert_eq!(quantity(&out, MaterialKind::JointSand), Some(0.198));
    }

    #[test]
    fn test_heavy_traffic_mesh() {
        let out = run(&params(TrafficClass::Heavy));
        assert_eq!(quantity(&out, MaterialKind::Concrete), Some(5.5));
        assert_eq!(quantity(&out, MaterialKind::GradedCrushedStone), None);
        // 55 m² / 5.4 m² per panel = 10.2
        assert_eq!(quantity(&out, MaterialKind::WeldedMesh), Some(11.0));
    }

    #[test]
    fn test_recommendation_table() {
        use EnvironmentClass::*;
        use TrafficClass::*;
        assert_eq!(recommended_waterproofing(Dry, Heavy), None);
        assert_eq!(recommended_waterproofing(SemiHumid, Medium), Some(WaterproofingKind::GeotextileMembrane));
        assert_eq!(recommended_waterproofing(SemiHumid, Heavy), Some(WaterproofingKind::CrystallizingAdditive));
        assert_eq!(recommended_waterproofing(Wet, Light), Some(WaterproofingKind::GeotextileMembrane));
        assert_eq!(recommended_waterproofing(Wet, Medium), Some(WaterproofingKind::AsphalticMembrane));
        assert_eq!(recommended_waterproofing(AlwaysWet, Light), Some(WaterproofingKind::AsphalticMembrane));
    }

    #[test]
    fn test_waterproofing_layer() {
        let mut p = params(TrafficClass::Medium);
        p.environment = Some(EnvironmentClass::Wet);
        p.waterproofing_enabled = true;

        let out = run(&p);
        let layer = out.items.iter().find(|i| i.material == MaterialKind::Waterproofing).unwrap();
        assert_eq!(layer.grade.as_deref(), Some("asphaltic"));

        p.waterproofing_kind = Some(WaterproofingKind::GeotextileMembrane);
        let out = run(&p);
        let layer = out.items.iter().find(|i| i.material == MaterialKind::Waterproofing).unwrap();
        // 55 m² × 1.10 in 50 m² rolls
        assert_eq!(layer.grade.as_deref(), Some("geotextile"));
        assert_eq!(layer.quantity, 60.5);
        assert_eq!(layer.purchase_note, "2 × 50 m²");
    }

    #[test]
    fn test_no_waterproofing_when_dry() {
        let mut p = params(TrafficClass::Light);
        p.waterproofing_enabled = true;
        let out = run(&p);
        assert!(out.items.iter().all(|i| i.material != MaterialKind::Waterproofing));
    }

    #[test]
    fn test_missing_traffic_keeps_pavers_only() {
        let mut p = params(TrafficClass::Light);
        p.traffic = None;
        let out = run(&p);
        assert_eq!(out.items.len(), 1);
        assert_eq!(out.items[0].material, MaterialKind::Pavers);
    }
}
