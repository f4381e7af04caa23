//! # Baseboard and Waterproofing
//!
//! Lines appended after the covering branch. Interlocking pavement handles its
//! own waterproofing layer (see [`super::pavement`]) and never gets one here.

use super::packaged_item;
use crate::geometry;
use crate::model::{
    ApplicationSurface, BaseboardMaterial, EnvironmentClass, InputSnapshot, MaterialItem, MaterialKind, MaterialUnit,
    WaterproofingKind,
};
use crate::packaging::PackagingStrategy;
use crate::settings::EstimatorSettings;
use crate::units::{Centimeters, Meters};

/// Waterproofing product used when the user enabled waterproofing without
/// picking one.
pub fn default_waterproofing(environment: EnvironmentClass) -> Option<WaterproofingKind> {
    match environment {
        EnvironmentClass::Dry => None,
        EnvironmentClass::SemiHumid => Some(WaterproofingKind::AcrylicMembrane),
        EnvironmentClass::Wet | EnvironmentClass::AlwaysWet => Some(WaterproofingKind::PolymericMortar),
    }
}

/// Unit a waterproofing product is measured in
pub fn waterproofing_unit(kind: WaterproofingKind) -> MaterialUnit {
    match kind {
        WaterproofingKind::PolymericMortar | WaterproofingKind::AcrylicMembrane => MaterialUnit::Kilogram,
        WaterproofingKind::CrystallizingAdditive => MaterialUnit::Liter,
        WaterproofingKind::AsphalticMembrane | WaterproofingKind::GeotextileMembrane => MaterialUnit::SquareMeter,
    }
}

/// Waterproofing line for `area_m2` of treated surface (waste included).
pub fn waterproofing_item(kind: WaterproofingKind, area_m2: f64, settings: &EstimatorSettings) -> MaterialItem {
    let quantity = area_m2 * settings.constants.waterproofing_rate(kind);
    packaged_item(
        MaterialKind::Waterproofing,
        waterproofing_unit(kind),
        quantity,
        PackagingStrategy::GreedyDescending,
        &settings.packages.waterproofing_sizes(kind),
    )
    .with_grade(kind.code())
}

/// Baseboard line, when the baseboard is enabled and applies.
pub fn baseboard(snapshot: &InputSnapshot) -> Option<MaterialItem> {
    let config = snapshot.active_baseboard()?;
    let perimeter = snapshot.baseboard_net_perimeter()?;
    let waste = geometry::waste_factor(snapshot.effective_waste_percent());
    let length = perimeter.0 * waste;

    match config.material {
        BaseboardMaterial::SamePiece => {
            let item = MaterialItem::new(MaterialKind::Baseboard, MaterialUnit::LinearMeter, length)
                .with_grade("same_piece");
            Some(match snapshot.baseboard_area() {
                Some(strips) => item.with_note(format!(
                    "{:.2} m² of strips included in the covering",
                    strips.0
                )),
                None => item,
            })
        }
        BaseboardMaterial::PreMade => {
            let piece_cm = config.commercial_length_cm?;
            let piece: Meters = Centimeters(piece_cm).into();
            if piece.0 <= 0.0 {
                return None;
            }
            let pieces = geometry::ceil_count(length / piece.0);
            Some(
                MaterialItem::new(MaterialKind::Baseboard, MaterialUnit::Piece, pieces as f64)
                    .with_grade("pre_made")
                    .with_note(format!("{:.2} m in {} cm pieces", length, piece_cm)),
            )
        }
    }
}

/// Waterproofing line for non-pavement coverings.
///
/// Treated area is the base area plus an upturn along the perimeter on floors.
pub fn waterproofing(snapshot: &InputSnapshot, settings: &EstimatorSettings) -> Option<MaterialItem> {
    let kind = snapshot.covering_kind()?;
    if kind.is_pavement() || !snapshot.waterproofing().enabled {
        return None;
    }
    let environment = snapshot.environment().filter(|e| !e.is_dry())?;
    let product = snapshot
        .waterproofing()
        .kind
        .or_else(|| default_waterproofing(environment))?;

    let mut area = snapshot.base_area()?.0;
    if snapshot.application_surface() == Some(ApplicationSurface::Floor) {
        if let Some(perimeter) = snapshot.perimeter() {
            area += perimeter.0 * settings.constants.waterproofing_upturn_m;
        }
    }
    let waste = geometry::waste_factor(snapshot.effective_waste_percent());
    Some(waterproofing_item(product, area * waste, settings))
}
