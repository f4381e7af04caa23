//! # Mosaic
//!
//! Mosaic is bought by the sheet. The sheet format fixes the piece size and
//! thickness used for grout; adhesive is a flat rate of class ACIII.

use tracing::debug;

use super::{consumption, packaged_item, BranchOutput};
use crate::geometry::{self, CEIL_EPSILON};
use crate::model::{AdhesiveClass, MaterialItem, MaterialKind, MaterialUnit, MosaicFormat, MosaicParams};
use crate::packaging::PackagingStrategy;
use crate::settings::EstimatorSettings;
use crate::units::{Centimeters, SquareMeters};

/// Number of whole pieces on one sheet (at least one)
pub fn pieces_per_sheet(format: MosaicFormat) -> u64 {
    let sheet = geometry::piece_area(Centimeters(format.sheet_side_cm()), Centimeters(format.sheet_side_cm()));
    let piece = geometry::piece_area(Centimeters(format.piece_side_cm()), Centimeters(format.piece_side_cm()));
    ((sheet.0 / piece.0 + CEIL_EPSILON).floor() as u64).max(1)
}

/// Material lines for a mosaic job
pub fn calculate(params: &MosaicParams, area: SquareMeters, settings: &EstimatorSettings) -> BranchOutput {
    let Some(format) = params.format else {
        debug!("mosaic: no sheet format");
        return BranchOutput::default();
    };

    let waste = geometry::waste_factor(params.waste_percent);
    let side = Centimeters(format.sheet_side_cm());
    let sheets = geometry::pieces_needed(area, geometry::piece_area(side, side), params.waste_percent);

    let mut items = vec![MaterialItem::new(MaterialKind::MosaicSheets, MaterialUnit::Sheet, sheets as f64)
        .with_grade(format.display_name())
        .with_note(format!("{} pieces per sheet", pieces_per_sheet(format)))];

    let class = AdhesiveClass::AcIII;
    items.push(
        packaged_item(
            MaterialKind::AdhesiveMortar,
            MaterialUnit::Kilogram,
            settings.constants.mosaic_adhesive_kg_m2 * area.0 * waste,
            PackagingStrategy::BoundedPair,
            &settings.packages.adhesive_kg,
        )
        .with_grade(class.code()),
    );

    if let Some(joint) = params.joint_mm {
        let grout = consumption::grout_class(params.environment);
        let piece = format.piece_side_cm();
        let rate = consumption::grout_kg_m2(piece, piece, joint, format.thickness_mm(), settings.densities.grout(grout));
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
        adhesive_class: Some(class),
        stone_bed: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EnvironmentClass;

    fn params(format: MosaicFormat) -> MosaicParams {
        MosaicParams {
            format: Some(format),
            environment: Some(EnvironmentClass::Dry),
            joint_mm: Some(2.0),
            waste_percent: 5.0,
        }
    }

    #[test]
    fn test_pieces_per_sheet() {
        assert_eq!(pieces_per_sheet(MosaicFormat::Glass20mm), 225);
        assert_eq!(pieces_per_sheet(MosaicFormat::Glass15mm), 400);
        assert_eq!(pieces_per_sheet(MosaicFormat::Hexagonal25mm), 108);
    }

    #[test]
    fn test_sheets_adhesive_grout() {
        let out = calculate(
            &params(MosaicFormat::Glass20mm),
            SquareMeters(10.0),
            &EstimatorSettings::default(),
        );
        assert_eq!(out.adhesive_class, Some(AdhesiveClass::AcIII));

        // 10 / 0.09 × 1.05 = 116.7
        let sheets = &out.items[0];
        assert_eq!(sheets.unit, MaterialUnit::Sheet);
        assert_eq!(sheets.quantity, 117.0);
        assert_eq!(sheets.purchase_note, "225 pieces per sheet");

        let adhesive = out.items.iter().find(|i| i.material == MaterialKind::AdhesiveMortar).unwrap();
        assert_eq!(adhesive.quantity, 42.0);
        assert_eq!(adhesive.grade.as_deref(), Some("ACIII"));

        // 1.264 kg/m² × 10 × 1.05
        let grout = out.items.iter().find(|i| i.material == MaterialKind::Grout).unwrap();
        assert_eq!(grout.quantity, 13.27);
    }

    #[test]
    fn test_no_format_is_empty() {
        let mut p = params(MosaicFormat::Glass20mm);
        p.format = None;
        let out = calculate(&p, SquareMeters(10.0), &EstimatorSettings::default());
        assert!(out.items.is_empty());
    }
}
