//! # Input Validation
//!
//! Per-step acceptance rules over an [`InputSnapshot`].
//!
//! [`validate`] is a pure function: it looks only at the step and the snapshot
//! and never remembers earlier calls. A failing step is not an error; the
//! wizard simply keeps "advance" disabled and shows the reason.
//!
//! ## Ranges
//!
//! | Field | Range |
//! |-------|-------|
//! | Area (explicit or net) | 0.01 – 50,000 m² |
//! | Tile piece length/width | 5 – 200 cm |
//! | Tile / stone joint | 0.5 – 20 mm |
//! | Mosaic joint | 1 – 5 mm |
//! | Marble/granite explicit piece size | 10 – 2000 cm |
//! | Paver length/width | 5 – 200 cm |
//! | Paver thickness | 40 – 120 mm |
//! | Waste | 0 – 50 % |
//! | Baseboard height | 3 – 30 cm |
//! | Pre-made baseboard length | 5 – 300 cm |
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::model::{CoveringKind, InputSnapshot, WizardStep};
//! use estimate_core::validation::validate;
//!
//! let mut snapshot = InputSnapshot::new();
//! assert!(!validate(WizardStep::CoveringKind, &snapshot).valid);
//!
//! snapshot.set_covering_kind(CoveringKind::Marble);
//! assert!(validate(WizardStep::CoveringKind, &snapshot).valid);
//! ```

use std::ops::RangeInclusive;

use crate::model::{
    AreaMode, BaseboardMaterial, CoveringFamily, CoveringKind, InputSnapshot, PerimeterMode, StepValidationResult,
    WizardStep,
};

pub const AREA_RANGE_M2: RangeInclusive<f64> = 0.01..=50_000.0;
pub const PIECE_SIDE_RANGE_CM: RangeInclusive<f64> = 5.0..=200.0;
pub const JOINT_RANGE_MM: RangeInclusive<f64> = 0.5..=20.0;
pub const MOSAIC_JOINT_RANGE_MM: RangeInclusive<f64> = 1.0..=5.0;
pub const STONE_PIECE_RANGE_CM: RangeInclusive<f64> = 10.0..=2000.0;
pub const PAVER_THICKNESS_RANGE_MM: RangeInclusive<f64> = 40.0..=120.0;
pub const WASTE_RANGE_PERCENT: RangeInclusive<f64> = 0.0..=50.0;
pub const BASEBOARD_HEIGHT_RANGE_CM: RangeInclusive<f64> = 3.0..=30.0;
pub const BASEBOARD_LENGTH_RANGE_CM: RangeInclusive<f64> = 5.0..=300.0;

/// Check whether `step` may be left with the current snapshot.
pub fn validate(step: WizardStep, snapshot: &InputSnapshot) -> StepValidationResult {
    let outcome = match step {
        WizardStep::Welcome | WizardStep::Review | WizardStep::Result => Ok(()),
        WizardStep::CoveringKind => check_covering_kind(snapshot),
        WizardStep::Environment => check_environment(snapshot),
        WizardStep::Traffic => check_traffic(snapshot),
        WizardStep::Area => check_area(snapshot),
        WizardStep::PieceParameters => check_pieces(snapshot),
        WizardStep::Baseboard => check_baseboard(snapshot),
        WizardStep::Waterproofing => check_waterproofing(snapshot),
    };
    match outcome {
        Ok(()) => StepValidationResult::ok(),
        Err(failure) => failure,
    }
}

type Check = Result<(), StepValidationResult>;

fn fail(field: &str, reason: impl Into<String>) -> Check {
    Err(StepValidationResult::fail(field, reason))
}

/// Require `value` to be present and inside `range`
fn require_in(field: &str, label: &str, value: Option<f64>, range: &RangeInclusive<f64>, unit: &str) -> Check {
    match value {
        None => fail(field, format!("{} is required", label)),
        Some(v) => optional_in(field, label, Some(v), range, unit),
    }
}

/// When `value` is present, require it inside `range`
fn optional_in(field: &str, label: &str, value: Option<f64>, range: &RangeInclusive<f64>, unit: &str) -> Check {
    match value {
        Some(v) if !range.contains(&v) => fail(
            field,
            format!(
                "{} must be between {} and {} {}",
                label,
                range.start(),
                range.end(),
                unit
            ),
        ),
        _ => Ok(()),
    }
}

fn check_covering_kind(snapshot: &InputSnapshot) -> Check {
    let Some(kind) = snapshot.covering_kind() else {
        return fail("covering_kind", "Choose a covering type");
    };
    if kind.uses_surface_kind() && snapshot.surface_kind().is_none() {
        return fail("surface_kind", "Choose ceramic or porcelain");
    }
    Ok(())
}

fn check_environment(snapshot: &InputSnapshot) -> Check {
    match snapshot.environment() {
        Some(_) => Ok(()),
        None => fail("environment", "Choose the installation environment"),
    }
}

fn check_traffic(snapshot: &InputSnapshot) -> Check {
    if snapshot.covering_kind().is_some_and(|k| k.is_pavement()) && snapshot.traffic_class().is_none() {
        return fail("traffic_class", "Choose the expected traffic");
    }
    Ok(())
}

fn check_area(snapshot: &InputSnapshot) -> Check {
    if let Some(total) = snapshot.total_area_m2() {
        return optional_in("total_area_m2", "Area", Some(total), &AREA_RANGE_M2, "m²");
    }

    if snapshot.length_m().is_none() {
        return fail("length_m", "Enter the total area or the length");
    }
    match snapshot.area_mode() {
        AreaMode::Floor => {
            if snapshot.width_m().is_none() {
                return fail("width_m", "Width is required");
            }
        }
        AreaMode::Wall => {
            if snapshot.height_m().is_none() {
                return fail("height_m", "Wall height is required");
            }
            if snapshot.wall_count().is_none() {
                return fail("wall_count", "Number of walls is required");
            }
        }
    }

    let Some(gross) = snapshot.gross_geometric_area() else {
        return fail("length_m", "Room dimensions are incomplete");
    };
    let opening = snapshot.opening_area_m2().unwrap_or(0.0);
    if opening > gross.0 {
        return fail("opening_area_m2", "Openings cannot be larger than the gross area");
    }
    let net = gross.0 - opening;
    optional_in("length_m", "Net area", Some(net), &AREA_RANGE_M2, "m²")
}

fn check_pieces(snapshot: &InputSnapshot) -> Check {
    let Some(kind) = snapshot.covering_kind() else {
        return fail("covering_kind", "Choose a covering type");
    };
    match kind.family() {
        CoveringFamily::Pavement => check_paver_pieces(snapshot),
        CoveringFamily::Mosaic => check_mosaic_pieces(snapshot),
        CoveringFamily::Stone => check_stone_pieces(snapshot, kind),
        CoveringFamily::Tile => check_tile_pieces(snapshot),
    }
}

fn check_paver_pieces(snapshot: &InputSnapshot) -> Check {
    require_in("piece_length_cm", "Paver length", snapshot.piece_length_cm(), &PIECE_SIDE_RANGE_CM, "cm")?;
    require_in("piece_width_cm", "Paver width", snapshot.piece_width_cm(), &PIECE_SIDE_RANGE_CM, "cm")?;
    require_in(
        "piece_thickness_mm",
        "Paver thickness",
        snapshot.piece_thickness_mm(),
        &PAVER_THICKNESS_RANGE_MM,
        "mm",
    )?;
    require_in("waste_percent", "Waste", snapshot.waste_percent(), &WASTE_RANGE_PERCENT, "%")
}

fn check_mosaic_pieces(snapshot: &InputSnapshot) -> Check {
    if snapshot.mosaic_format().is_none() {
        return fail("mosaic_format", "Choose a mosaic format");
    }
    optional_in("joint_mm", "Joint", snapshot.joint_mm(), &MOSAIC_JOINT_RANGE_MM, "mm")?;
    optional_in("waste_percent", "Waste", snapshot.waste_percent(), &WASTE_RANGE_PERCENT, "%")
}

fn check_stone_pieces(snapshot: &InputSnapshot, kind: CoveringKind) -> Check {
    require_in("joint_mm", "Joint", snapshot.effective_joint_mm(), &JOINT_RANGE_MM, "mm")?;
    optional_in("waste_percent", "Waste", snapshot.waste_percent(), &WASTE_RANGE_PERCENT, "%")?;
    if matches!(kind, CoveringKind::Marble | CoveringKind::Granite) {
        optional_in(
            "piece_length_cm",
            "Piece length",
            snapshot.piece_length_cm(),
            &STONE_PIECE_RANGE_CM,
            "cm",
        )?;
        optional_in(
            "piece_width_cm",
            "Piece width",
            snapshot.piece_width_cm(),
            &STONE_PIECE_RANGE_CM,
            "cm",
        )?;
    }
    Ok(())
}

fn check_tile_pieces(snapshot: &InputSnapshot) -> Check {
    require_in("piece_length_cm", "Piece length", snapshot.piece_length_cm(), &PIECE_SIDE_RANGE_CM, "cm")?;
    require_in("piece_width_cm", "Piece width", snapshot.piece_width_cm(), &PIECE_SIDE_RANGE_CM, "cm")?;
    require_in("joint_mm", "Joint", snapshot.joint_mm(), &JOINT_RANGE_MM, "mm")?;
    optional_in("waste_percent", "Waste", snapshot.waste_percent(), &WASTE_RANGE_PERCENT, "%")
}

fn check_baseboard(snapshot: &InputSnapshot) -> Check {
    let Some(baseboard) = snapshot.active_baseboard() else {
        return Ok(());
    };
    require_in(
        "baseboard.height_cm",
        "Baseboard height",
        baseboard.height_cm,
        &BASEBOARD_HEIGHT_RANGE_CM,
        "cm",
    )?;
    if baseboard.perimeter_mode == PerimeterMode::Manual && baseboard.manual_perimeter_m.is_none() {
        return fail("baseboard.manual_perimeter_m", "Enter the perimeter");
    }
    if baseboard.material == BaseboardMaterial::PreMade {
        require_in(
            "baseboard.commercial_length_cm",
            "Baseboard piece length",
            baseboard.commercial_length_cm,
            &BASEBOARD_LENGTH_RANGE_CM,
            "cm",
        )?;
        let perimeter = snapshot.baseboard_net_perimeter().map(|p| p.0).unwrap_or(0.0);
        if perimeter <= 0.0 {
            return fail("baseboard.deduction_m", "Baseboard length after deductions must be positive");
        }
    }
    Ok(())
}

/// Whether the pavement combination demands an explicit waterproofing choice
pub fn pavement_requires_waterproofing_choice(snapshot: &InputSnapshot) -> bool {
    use crate::model::TrafficClass;

    let Some(environment) = snapshot.environment() else {
        return false;
    };
    let light_or_medium = matches!(
        snapshot.traffic_class(),
        Some(TrafficClass::Light) | Some(TrafficClass::Medium)
    );
    snapshot.covering_kind().is_some_and(|k| k.is_pavement())
        && !environment.is_dry()
        && light_or_medium
        && snapshot.waterproofing().enabled
}

fn check_waterproofing(snapshot: &InputSnapshot) -> Check {
    if !pavement_requires_waterproofing_choice(snapshot) {
        return Ok(());
    }
    match snapshot.waterproofing().kind {
        None => fail("waterproofing.kind", "Choose one waterproofing system"),
        Some(kind) if !kind.is_pavement_kind() => fail(
            "waterproofing.kind",
            format!("{} is not suitable under pavers", kind.display_name()),
        ),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ApplicationSurface, EnvironmentClass, MosaicFormat, SurfaceKind, TrafficClass, WaterproofingKind,
    };

    fn tile() -> InputSnapshot {
        let mut s = InputSnapshot::new();
        s.set_covering_kind(CoveringKind::Tile);
        s.set_surface_kind(SurfaceKind::Ceramic);
        s.set_environment(EnvironmentClass::Dry);
        s.set_total_area_m2(Some(20.0));
        s.set_piece_length_cm(Some(60.0));
        s.set_piece_width_cm(Some(60.0));
        s.set_joint_mm(Some(3.0));
        s
    }

    fn pavement() -> InputSnapshot {
        let mut s = InputSnapshot::new();
        s.set_covering_kind(CoveringKind::InterlockingPavement);
        s.set_environment(EnvironmentClass::Wet);
        s.set_traffic_class(TrafficClass::Light);
        s.set_total_area_m2(Some(50.0));
        s.set_piece_length_cm(Some(20.0));
        s.set_piece_width_cm(Some(10.0));
        s.set_piece_thickness_mm(Some(60.0));
        s.set_waste_percent(Some(10.0));
        s
    }

    fn reason(step: WizardStep, s: &InputSnapshot) -> Option<String> {
        validate(step, s).reason
    }

    #[test]
    fn test_covering_kind_step() {
        let mut s = InputSnapshot::new();
        assert!(!validate(WizardStep::CoveringKind, &s).valid);
        s.set_covering_kind(CoveringKind::Tile);
        let result = validate(WizardStep::CoveringKind, &s);
        assert!(!result.valid);
        assert_eq!(result.field.as_deref(), Some("surface_kind"));
        s.set_surface_kind(SurfaceKind::Porcelain);
        assert!(validate(WizardStep::CoveringKind, &s).valid);
    }

    #[test]
    fn test_always_valid_steps() {
        let s = InputSnapshot::new();
        assert!(validate(WizardStep::Welcome, &s).valid);
        assert!(validate(WizardStep::Review, &s).valid);
        assert!(validate(WizardStep::Result, &s).valid);
    }

    #[test]
    fn test_traffic_only_enforced_for_pavement() {
        let s = tile();
        assert!(validate(WizardStep::Traffic, &s).valid);

        let mut p = InputSnapshot::new();
        p.set_covering_kind(CoveringKind::InterlockingPavement);
        assert!(!validate(WizardStep::Traffic, &p).valid);
    }

    #[test]
    fn test_area_bounds() {
        let mut s = tile();
        s.set_total_area_m2(Some(0.001));
        assert!(!validate(WizardStep::Area, &s).valid);
        s.set_total_area_m2(Some(60_000.0));
        assert!(!validate(WizardStep::Area, &s).valid);
        s.set_total_area_m2(Some(50_000.0));
        assert!(validate(WizardStep::Area, &s).valid);
    }

    #[test]
    fn test_area_from_dimensions() {
        let mut s = tile();
        s.set_total_area_m2(None);
        assert!(!validate(WizardStep::Area, &s).valid);
        s.set_length_m(Some(5.0));
        assert_eq!(validate(WizardStep::Area, &s).field.as_deref(), Some("width_m"));
        s.set_width_m(Some(4.0));
        assert!(validate(WizardStep::Area, &s).valid);

        s.set_opening_area_m2(Some(25.0));
        assert_eq!(validate(WizardStep::Area, &s).field.as_deref(), Some("opening_area_m2"));

        // Openings equal to the gross area leave a zero net area
        s.set_opening_area_m2(Some(20.0));
        assert!(!validate(WizardStep::Area, &s).valid);
    }

    #[test]
    fn test_wall_mode_area() {
        let mut s = InputSnapshot::new();
        s.set_covering_kind(CoveringKind::Marble);
        s.set_application_surface(ApplicationSurface::Wall);
        s.set_length_m(Some(3.0));
        s.set_width_m(Some(3.0));
        assert_eq!(validate(WizardStep::Area, &s).field.as_deref(), Some("height_m"));
        s.set_height_m(Some(2.6));
        assert_eq!(validate(WizardStep::Area, &s).field.as_deref(), Some("wall_count"));
        s.set_wall_count(Some(2));
        assert!(validate(WizardStep::Area, &s).valid);
    }

    #[test]
    fn test_tile_pieces() {
        let mut s = tile();
        assert!(validate(WizardStep::PieceParameters, &s).valid);
        s.set_joint_mm(None);
        assert_eq!(
            reason(WizardStep::PieceParameters, &s).as_deref(),
            Some("Joint is required")
        );
        s.set_joint_mm(Some(25.0));
        assert!(!validate(WizardStep::PieceParameters, &s).valid);
        s.set_joint_mm(Some(3.0));
        s.set_piece_length_cm(Some(250.0));
        assert_eq!(
            reason(WizardStep::PieceParameters, &s).as_deref(),
            Some("Piece length must be between 5 and 200 cm")
        );
        s.set_piece_length_cm(Some(60.0));
        s.set_waste_percent(Some(60.0));
        assert!(!validate(WizardStep::PieceParameters, &s).valid);
    }

    #[test]
    fn test_paver_pieces() {
        let mut s = pavement();
        assert!(validate(WizardStep::PieceParameters, &s).valid);
        s.set_piece_thickness_mm(Some(30.0));
        assert!(!validate(WizardStep::PieceParameters, &s).valid);
        s.set_piece_thickness_mm(Some(80.0));
        s.set_waste_percent(None);
        assert_eq!(
            validate(WizardStep::PieceParameters, &s).field.as_deref(),
            Some("waste_percent")
        );
    }

    #[test]
    fn test_mosaic_pieces() {
        let mut s = InputSnapshot::new();
        s.set_covering_kind(CoveringKind::Mosaic);
        assert!(!validate(WizardStep::PieceParameters, &s).valid);
        s.set_mosaic_format(MosaicFormat::Glass20mm);
        assert!(validate(WizardStep::PieceParameters, &s).valid);
        s.set_joint_mm(Some(8.0));
        assert!(!validate(WizardStep::PieceParameters, &s).valid);
    }

    #[test]
    fn test_stone_pieces() {
        let mut s = InputSnapshot::new();
        s.set_covering_kind(CoveringKind::Granite);
        // default joint applies
        assert!(validate(WizardStep::PieceParameters, &s).valid);
        s.set_piece_length_cm(Some(5.0));
        assert!(!validate(WizardStep::PieceParameters, &s).valid);
        s.set_piece_length_cm(Some(120.0));
        assert!(validate(WizardStep::PieceParameters, &s).valid);

        let mut f = InputSnapshot::new();
        f.set_covering_kind(CoveringKind::Flagstone);
        // flagstone ignores the explicit-size range
        f.set_piece_length_cm(Some(5.0));
        assert!(validate(WizardStep::PieceParameters, &f).valid);
    }

    #[test]
    fn test_baseboard_step() {
        let mut s = tile();
        assert!(validate(WizardStep::Baseboard, &s).valid);
        s.set_baseboard_enabled(true);
        assert!(!validate(WizardStep::Baseboard, &s).valid);
        s.set_baseboard_height_cm(Some(8.0));
        assert!(validate(WizardStep::Baseboard, &s).valid);

        s.set_baseboard_material(BaseboardMaterial::PreMade);
        assert_eq!(
            validate(WizardStep::Baseboard, &s).field.as_deref(),
            Some("baseboard.commercial_length_cm")
        );
        s.set_baseboard_commercial_length_cm(Some(60.0));
        assert!(validate(WizardStep::Baseboard, &s).valid);

        // 20 m² explicit area -> computed perimeter 4 * sqrt(20) ≈ 17.9 m
        s.set_baseboard_deduction_m(Some(100.0));
        assert!(!validate(WizardStep::Baseboard, &s).valid);

        s.set_baseboard_deduction_m(None);
        s.set_baseboard_perimeter_mode(PerimeterMode::Manual);
        assert_eq!(
            validate(WizardStep::Baseboard, &s).field.as_deref(),
            Some("baseboard.manual_perimeter_m")
        );
    }

    #[test]
    fn test_pavement_waterproofing_choice() {
        let mut s = pavement();
        assert!(validate(WizardStep::Waterproofing, &s).valid);
        s.set_waterproofing_enabled(true);
        assert!(!validate(WizardStep::Waterproofing, &s).valid);
        s.set_waterproofing_kind(Some(WaterproofingKind::PolymericMortar));
        assert!(!validate(WizardStep::Waterproofing, &s).valid);
        s.set_waterproofing_kind(Some(WaterproofingKind::GeotextileMembrane));
        assert!(validate(WizardStep::Waterproofing, &s).valid);
    }

    #[test]
    fn test_heavy_pavement_needs_no_choice() {
        let mut s = pavement();
        s.set_traffic_class(TrafficClass::Heavy);
        s.set_waterproofing_enabled(true);
        assert!(validate(WizardStep::Waterproofing, &s).valid);
    }

    #[test]
    fn test_validation_is_stateless() {
        let s = tile();
        let first = validate(WizardStep::PieceParameters, &s);
        let _ = validate(WizardStep::Area, &InputSnapshot::new());
        assert_eq!(first, validate(WizardStep::PieceParameters, &s));
    }
}
