//! # Floor and Wall Tile
//!
//! Pieces from the piece size, adhesive mortar from the size/body/moisture
//! table, grout from the joint volume, and spacers at three per piece.

use tracing::debug;

use super::{consumption, packaged_item, pieces_item, BranchOutput};
use crate::geometry;
use crate::model::{CoveringKind, MaterialKind, MaterialUnit, TileParams};
use crate::packaging::PackagingStrategy;
use crate::settings::EstimatorSettings;
use crate::units::{Centimeters, SquareMeters};

/// Material lines for a tile job over `area` (coverage area, before waste)
pub fn calculate(params: &TileParams, area: SquareMeters, settings: &EstimatorSettings) -> BranchOutput {
    let (Some(length), Some(width)) = (params.piece_length_cm, params.piece_width_cm) else {
        debug!("tile: piece size missing");
        return BranchOutput::default();
    };

    let material = match params.kind {
        CoveringKind::WallTile => MaterialKind::WallTiles,
        _ => MaterialKind::Tiles,
    };
    let waste = geometry::waste_factor(params.waste_percent);
    let piece_area = geometry::piece_area(Centimeters(length), Centimeters(width));
    let pieces = geometry::pieces_needed(area, piece_area, params.waste_percent);
    let max_side = length.max(width);

    let mut items = vec![pieces_item(material, pieces, params.pieces_per_box)];

    let class = consumption::adhesive_class(params.kind, params.surface, max_side, params.environment);
    let adhesive_rate =
        consumption::adhesive_kg_m2(max_side, params.surface, params.thickness_mm, params.environment);
    items.push(
        packaged_item(
            MaterialKind::AdhesiveMortar,
            MaterialUnit::Kilogram,
            adhesive_rate * area.0 * waste,
            PackagingStrategy::BoundedPair,
            &settings.packages.adhesive_kg,
        )
        .with_grade(class.code()),
    );

    if let (Some(joint), Some(thickness)) = (params.joint_mm, params.thickness_mm) {
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

    items.push(packaged_item(
        MaterialKind::Spacers,
        MaterialUnit::Piece,
        pieces as f64 * settings.constants.spacers_per_piece,
        PackagingStrategy::GreedyDescending,
        &settings.packages.spacers,
    ));

    BranchOutput {
        items,
        adhesive_class: Some(class),
        stone_bed: None,
    }
}
