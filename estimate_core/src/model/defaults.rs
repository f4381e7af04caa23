//! Default parameter tables.
//!
//! Every default the engine falls back to lives here, keyed by covering kind
//! and tile body, so validation and calculation always agree on the value.

use super::covering::{CoveringKind, SurfaceKind};

/// Default joint width in mm.
///
/// `None` means the joint is mandatory for that kind (tile and wall tile).
pub fn default_joint_mm(kind: CoveringKind) -> Option<f64> {
    match kind {
        CoveringKind::Tile | CoveringKind::WallTile => None,
        CoveringKind::Mosaic => Some(2.0),
        CoveringKind::Flagstone => Some(10.0),
        CoveringKind::Marble | CoveringKind::Granite => Some(2.0),
        CoveringKind::InterlockingPavement => Some(3.0),
    }
}

/// Default piece thickness in mm.
///
/// `None` for mosaic (the sheet format decides) and for pavement (mandatory).
pub fn default_thickness_mm(kind: CoveringKind, surface: Option<SurfaceKind>) -> Option<f64> {
    match (kind, surface) {
        (CoveringKind::Tile, Some(SurfaceKind::Porcelain)) => Some(10.0),
        (CoveringKind::Tile, _) => Some(8.0),
        (CoveringKind::WallTile, Some(SurfaceKind::Porcelain)) => Some(8.0),
        (CoveringKind::WallTile, _) => Some(6.0),
        (CoveringKind::Flagstone, _) => Some(20.0),
        (CoveringKind::Marble, _) | (CoveringKind::Granite, _) => Some(15.0),
        (CoveringKind::Mosaic, _) | (CoveringKind::InterlockingPavement, _) => None,
    }
}

/// Default technical waste percentage
pub fn default_waste_percent(kind: CoveringKind) -> f64 {
    match kind {
        CoveringKind::Tile | CoveringKind::WallTile => 10.0,
        CoveringKind::Mosaic => 5.0,
        CoveringKind::Flagstone => 15.0,
        CoveringKind::InterlockingPavement => 5.0,
        CoveringKind::Marble | CoveringKind::Granite => 10.0,
    }
}

/// Nominal piece size (length, width) in cm used for joint formulas when the
/// user did not give one.
///
/// Only stone kinds have a nominal size; flagstone is irregular so a typical
/// 40x40 cm plate is assumed.
pub fn nominal_piece_cm(kind: CoveringKind) -> Option<(f64, f64)> {
    match kind {
        CoveringKind::Flagstone => Some((40.0, 40.0)),
        CoveringKind::Marble | CoveringKind::Granite => Some((60.0, 60.0)),
        _ => None,
    }
}
