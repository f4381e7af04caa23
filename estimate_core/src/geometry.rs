//! # Geometry Formulas
//!
//! Pure area, perimeter and count formulas shared by validation and the
//! quantity engine. Everything here takes typed units from [`crate::units`]
//! and works in meters internally.
//!
//! ## Notation
//!
//! - `L`, `W` = length and width (room or piece)
//! - `H` = wall height
//! - `j` = joint width
//! - `t` = piece thickness (joint depth)
//! - `w%` = waste percentage

use crate::units::{Centimeters, Meters, SquareMeters};

/// Slack subtracted before rounding up, so that values such as
/// `61.00000000000001` (floating-point noise) do not gain a whole unit.
pub const CEIL_EPSILON: f64 = 1e-9;

// =============================================================================
// AREAS
// =============================================================================

/// Floor area of a rectangular room.
///
/// # Formula
/// A = L × W
///
/// # Example
/// ```rust
/// use estimate_core::geometry::rectangle_area;
/// use estimate_core::units::Meters;
///
/// let area = rectangle_area(Meters(5.0), Meters(4.0));
/// assert_eq!(area.0, 20.0);
/// ```
#[inline]
pub fn rectangle_area(length: Meters, width: Meters) -> SquareMeters {
    length * width
}

/// Gross wall area for `wall_count` walls of equal length.
///
/// # Formula
/// A = L × H × n
#[inline]
pub fn wall_area(length: Meters, height: Meters, wall_count: u32) -> SquareMeters {
    (length * height) * f64::from(wall_count)
}

/// Net area after subtracting openings (doors, windows, fixed furniture).
///
/// Never negative; validation reports oversized openings separately.
#[inline]
pub fn net_area(gross: SquareMeters, opening: SquareMeters) -> SquareMeters {
    SquareMeters((gross.0 - opening.0).max(0.0))
}

/// Face area of a single piece given its sides in centimeters.
///
/// # Example
/// ```rust
/// use estimate_core::geometry::piece_area;
/// use estimate_core::units::Centimeters;
///
/// let area = piece_area(Centimeters(60.0), Centimeters(60.0));
/// assert!((area.0 - 0.36).abs() < 1e-12);
/// ```
#[inline]
pub fn piece_area(length: Centimeters, width: Centimeters) -> SquareMeters {
    Meters::from(length) * Meters::from(width)
}

// =============================================================================
// PERIMETERS
// =============================================================================

/// Perimeter of a rectangular room.
///
/// # Formula
/// P = 2 × (L + W)
#[inline]
pub fn rectangle_perimeter(length: Meters, width: Meters) -> Meters {
    (length + width) * 2.0
}

/// Perimeter of a square room with the given area, used when only the total
/// area is known.
///
/// # Formula
/// P = 4 × √A
#[inline]
pub fn square_perimeter_from_area(area: SquareMeters) -> Meters {
    Meters(4.0 * area.0.max(0.0).sqrt())
}

// =============================================================================
// JOINTS
// =============================================================================

/// Joint volume per square meter of covering (m³/m²).
///
/// Each piece owns half of the joint around it, so the joint length per m² is
/// `(L + W) / (L × W)`; multiplying by joint width and depth gives the volume
/// that grout or joint sand has to fill.
///
/// # Formula
/// V = ((L + W) / (L × W)) × j × t
///
/// Returns 0.0 when a piece side is not positive.
///
/// # Example
/// ```rust
/// use estimate_core::geometry::joint_volume_per_m2;
/// use estimate_core::units::Meters;
///
/// // 60x60 cm piece, 3 mm joint, 8 mm thick
/// let v = joint_volume_per_m2(Meters(0.6), Meters(0.6), Meters(0.003), Meters(0.008));
/// assert!((v - 0.00008).abs() < 1e-12);
/// ```
pub fn joint_volume_per_m2(length: Meters, width: Meters, joint: Meters, depth: Meters) -> f64 {
    if length.0 <= 0.0 || width.0 <= 0.0 {
        return 0.0;
    }
    ((length.0 + width.0) / (length.0 * width.0)) * joint.0 * depth.0
}

// =============================================================================
// COUNTS
// =============================================================================

/// Multiplier for a waste percentage: `1 + w%/100`.
#[inline]
pub fn waste_factor(waste_percent: f64) -> f64 {
    1.0 + waste_percent.max(0.0) / 100.0
}

/// Round a non-negative quantity up to a whole count.
///
/// Always rounds up: under-ordering is the failure mode to avoid.
pub fn ceil_count(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value - CEIL_EPSILON).ceil().max(0.0) as u64
}

/// Number of pieces to buy for an area.
///
/// # Formula
/// n = ⌈(A / A_piece) × (1 + w%/100)⌉
///
/// Returns 0 when the piece area is not positive.
///
/// # Example
/// ```rust
/// use estimate_core::geometry::pieces_needed;
/// use estimate_core::units::SquareMeters;
///
/// // 20 m² of 60x60 cm tile with 10% waste
/// assert_eq!(pieces_needed(SquareMeters(20.0), SquareMeters(0.36), 10.0), 62);
/// ```
pub fn pieces_needed(area: SquareMeters, piece_area: SquareMeters, waste_percent: f64) -> u64 {
    if piece_area.0 <= 0.0 {
        return 0;
    }
    ceil_count((area.0 / piece_area.0) * waste_factor(waste_percent))
}

/// Round up to a whole number of boxes.
///
/// Returns `(boxes, pieces)` where `pieces = boxes × per_box`.
pub fn whole_boxes(pieces: u64, per_box: u32) -> (u64, u64) {
    if per_box == 0 {
        return (0, pieces);
    }
    let per_box = u64::from(per_box);
    let boxes = pieces.div_ceil(per_box);
    (boxes, boxes * per_box)
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wall_area() {
        let area = wall_area(Meters(3.0), Meters(2.5), 4);
        assert!((area.0 - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_net_area_never_negative() {
        assert_eq!(net_area(SquareMeters(10.0), SquareMeters(12.0)).0, 0.0);
        assert!((net_area(SquareMeters(10.0), SquareMeters(1.6)).0 - 8.4).abs() < 1e-12);
    }

    #[test]
    fn test_perimeters() {
        assert!((rectangle_perimeter(Meters(5.0), Meters(4.0)).0 - 18.0).abs() < 1e-12);
        assert!((square_perimeter_from_area(SquareMeters(16.0)).0 - 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_joint_volume_zero_for_bad_piece() {
        assert_eq!(joint_volume_per_m2(Meters(0.0), Meters(0.6), Meters(0.003), Meters(0.008)), 0.0);
    }

    #[test]
    fn test_ceil_count_absorbs_noise() {
        assert_eq!(ceil_count(61.000000000001), 61);
        assert_eq!(ceil_count(61.11), 62);
        assert_eq!(ceil_count(0.0), 0);
        assert_eq!(ceil_count(f64::NAN), 0);
    }

    #[test]
    fn test_scenario_tile_pieces() {
        // ceil((20 / 0.36) * 1.10) = ceil(61.11) = 62
        let pieces = pieces_needed(SquareMeters(20.0), piece_area(Centimeters(60.0), Centimeters(60.0)), 10.0);
        assert_eq!(pieces, 62);
    }

    #[test]
    fn test_whole_boxes() {
        assert_eq!(whole_boxes(62, 4), (16, 64));
        assert_eq!(whole_boxes(64, 4), (16, 64));
        assert_eq!(whole_boxes(10, 0), (0, 10));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.6500000000000001, 3), 1.65);
        assert_eq!(round_to(2.345, 1), 2.3);
        assert_eq!(round_to(2.5, 0), 3.0);
    }

    proptest! {
        #[test]
        fn pieces_monotonic_in_area(
            length in 5.0f64..200.0,
            width in 5.0f64..200.0,
            area in 0.01f64..5000.0,
            extra in 0.0f64..500.0,
            waste in 0.0f64..50.0,
        ) {
            let piece = piece_area(Centimeters(length), Centimeters(width));
            let small = pieces_needed(SquareMeters(area), piece, waste);
            let large = pieces_needed(SquareMeters(area + extra), piece, waste);
            prop_assert!(small <= large);
        }

        #[test]
        fn pieces_monotonic_in_waste(
            length in 5.0f64..200.0,
            width in 5.0f64..200.0,
            area in 0.01f64..5000.0,
            waste in 0.0f64..50.0,
            extra in 0.0f64..50.0,
        ) {
            let piece = piece_area(Centimeters(length), Centimeters(width));
            let low = pieces_needed(SquareMeters(area), piece, waste);
            let high = pieces_needed(SquareMeters(area), piece, waste + extra);
            prop_assert!(low <= high);
        }
    }
}
