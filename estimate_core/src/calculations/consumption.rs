//! # Adhesive and Grout Consumption
//!
//! Lookup tables and class selection shared by the tile, mosaic and stone
//! branches.
//!
//! ## Adhesive mortar
//!
//! Base consumption comes from the longest piece side, then multipliers for
//! porcelain body, thick pieces and moisture are applied and the result is
//! clamped to [4, 18] kg/m².
//!
//! ## Grout
//!
//! ```text
//! kg/m² = ((L + W) / (L × W)) × j × t × ρ      clamped to [0.10, 3.0]
//! ```
//!
//! with L, W, j, t in meters and ρ the grout class density.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::consumption::base_adhesive_kg_m2;
//!
//! assert_eq!(base_adhesive_kg_m2(60.0), 8.0);
//! assert_eq!(base_adhesive_kg_m2(60.1), 10.0);
//! ```

use crate::geometry;
use crate::model::{AdhesiveClass, CoveringKind, EnvironmentClass, GroutClass, SurfaceKind};
use crate::units::{Centimeters, Millimeters};

/// Base adhesive consumption by longest side: (max side cm, kg/m²)
pub const ADHESIVE_BASE_TABLE: [(f64, f64); 7] = [
    (15.0, 4.0),
    (30.0, 5.0),
    (45.0, 6.5),
    (60.0, 8.0),
    (90.0, 10.0),
    (120.0, 12.0),
    (f64::INFINITY, 14.0),
];

pub const ADHESIVE_MIN_KG_M2: f64 = 4.0;
pub const ADHESIVE_MAX_KG_M2: f64 = 18.0;
pub const PORCELAIN_MULTIPLIER: f64 = 1.10;
/// Pieces at least this thick get [`THICK_PIECE_MULTIPLIER`]
pub const THICK_PIECE_MM: f64 = 12.0;
pub const THICK_PIECE_MULTIPLIER: f64 = 1.10;
/// Sides above this length always take ACIII
pub const LARGE_FORMAT_CM: f64 = 60.0;

pub const GROUT_MIN_KG_M2: f64 = 0.10;
pub const GROUT_MAX_KG_M2: f64 = 3.0;

/// Adhesive multiplier for the installation environment
pub fn environment_multiplier(environment: Option<EnvironmentClass>) -> f64 {
    match environment {
        Some(EnvironmentClass::SemiHumid) => 1.05,
        Some(EnvironmentClass::Wet) | Some(EnvironmentClass::AlwaysWet) => 1.15,
        Some(EnvironmentClass::Dry) | None => 1.0,
    }
}

/// Base adhesive consumption (kg/m²) for the longest piece side in cm
pub fn base_adhesive_kg_m2(max_side_cm: f64) -> f64 {
    ADHESIVE_BASE_TABLE
        .iter()
        .find(|(limit, _)| max_side_cm <= *limit)
        .map(|(_, kg)| *kg)
        .unwrap_or(ADHESIVE_BASE_TABLE[ADHESIVE_BASE_TABLE.len() - 1].1)
}

/// Adhesive consumption (kg/m²) with all multipliers applied.
///
/// # Example
/// ```rust
/// use estimate_core::calculations::consumption::adhesive_kg_m2;
/// use estimate_core::model::{EnvironmentClass, SurfaceKind};
///
/// // 60 cm porcelain, 10 mm thick, wet room: 8.0 × 1.10 × 1.15
/// let kg = adhesive_kg_m2(60.0, Some(SurfaceKind::Porcelain), Some(10.0), Some(EnvironmentClass::Wet));
/// assert!((kg - 10.12).abs() < 1e-9);
/// ```
pub fn adhesive_kg_m2(
    max_side_cm: f64,
    surface: Option<SurfaceKind>,
    thickness_mm: Option<f64>,
    environment: Option<EnvironmentClass>,
) -> f64 {
    let mut kg = base_adhesive_kg_m2(max_side_cm);
    if surface == Some(SurfaceKind::Porcelain) {
        kg *= PORCELAIN_MULTIPLIER;
    }
    if thickness_mm.is_some_and(|t| t >= THICK_PIECE_MM) {
        kg *= THICK_PIECE_MULTIPLIER;
    }
    kg *= environment_multiplier(environment);
    kg.clamp(ADHESIVE_MIN_KG_M2, ADHESIVE_MAX_KG_M2)
}

/// Adhesive class for a tile job
pub fn adhesive_class(
    kind: CoveringKind,
    surface: Option<SurfaceKind>,
    max_side_cm: f64,
    environment: Option<EnvironmentClass>,
) -> AdhesiveClass {
    let wet = environment.is_some_and(|e| e.is_wet());
    if surface == Some(SurfaceKind::Porcelain) || max_side_cm > LARGE_FORMAT_CM || wet {
        return AdhesiveClass::AcIII;
    }
    let semi_humid = environment == Some(EnvironmentClass::SemiHumid);
    let wall_in_moisture = kind == CoveringKind::WallTile && environment.is_some_and(|e| !e.is_dry());
    if semi_humid || wall_in_moisture {
        AdhesiveClass::AcII
    } else {
        AdhesiveClass::AcI
    }
}

/// Grout class for an environment; unset counts as dry
pub fn grout_class(environment: Option<EnvironmentClass>) -> GroutClass {
    match environment {
        Some(EnvironmentClass::SemiHumid) => GroutClass::CementitiousType2,
        Some(EnvironmentClass::Wet) | Some(EnvironmentClass::AlwaysWet) => GroutClass::Epoxy,
        Some(EnvironmentClass::Dry) | None => GroutClass::CementitiousType1,
    }
}

/// Grout consumption in kg/m².
///
/// # Example
/// ```rust
/// use estimate_core::calculations::consumption::grout_kg_m2;
///
/// // 60x60 cm, 3 mm joint, 8 mm thick, type 1 grout
/// let kg = grout_kg_m2(60.0, 60.0, 3.0, 8.0, 1580.0);
/// assert!((kg - 0.1264).abs() < 1e-9);
/// ```
pub fn grout_kg_m2(length_cm: f64, width_cm: f64, joint_mm: f64, thickness_mm: f64, density: f64) -> f64 {
    let volume = geometry::joint_volume_per_m2(
        Centimeters(length_cm).into(),
        Centimeters(width_cm).into(),
        Millimeters(joint_mm).into(),
        Millimeters(thickness_mm).into(),
    );
    (volume * density).clamp(GROUT_MIN_KG_M2, GROUT_MAX_KG_M2)
}
