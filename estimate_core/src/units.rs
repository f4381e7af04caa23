//! # Unit Types
//!
//! Type-safe wrappers for the metric units used in covering estimates. These
//! provide compile-time safety against unit confusion while remaining
//! lightweight (just f64 wrappers).
//!
//! ## Conventions
//!
//! The wizard collects values in the unit a person would measure them in:
//! - Room dimensions: meters (m)
//! - Piece dimensions, baseboard height, unevenness: centimeters (cm)
//! - Piece thickness, joint width: millimeters (mm)
//!
//! All formulas work in meters, so every input is converted with these
//! wrappers before it reaches a calculation.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::units::{Centimeters, Meters, Millimeters};
//!
//! let side = Centimeters(60.0);
//! let side_m: Meters = side.into();
//! assert!((side_m.0 - 0.6).abs() < 1e-12);
//!
//! let joint: Meters = Millimeters(3.0).into();
//! assert!((joint.0 - 0.003).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * 100.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Centimeters {
    fn from(mm: Millimeters) -> Self {
        Centimeters(mm.0 / 10.0)
    }
}

impl From<Centimeters> for Millimeters {
    fn from(cm: Centimeters) -> Self {
        Millimeters(cm.0 * 10.0)
    }
}

// ============================================================================
// Area and Volume Units
// ============================================================================

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl Mul for Meters {
    type Output = SquareMeters;
    fn mul(self, rhs: Meters) -> SquareMeters {
        SquareMeters(self.0 * rhs.0)
    }
}

impl Mul<Meters> for SquareMeters {
    type Output = CubicMeters;
    fn mul(self, rhs: Meters) -> CubicMeters {
        CubicMeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Centimeters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(CubicMeters);
impl_arithmetic!(Kilograms);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cm_to_m() {
        let m: Meters = Centimeters(250.0).into();
        assert!((m.0 - 2.5).abs() < 1e-12);
        let back: Centimeters = m.into();
        assert!((back.0 - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_mm_conversions() {
        let cm: Centimeters = Millimeters(12.0).into();
        assert!((cm.0 - 1.2).abs() < 1e-12);
        let mm: Millimeters = Centimeters(0.5).into();
        assert!((mm.0 - 5.0).abs() < 1e-12);
        let mm_from_m: Millimeters = Meters(0.04).into();
        assert!((mm_from_m.0 - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_area_and_volume() {
        let area = Meters(5.0) * Meters(4.0);
        assert_eq!(area, SquareMeters(20.0));
        let volume = area * Meters(0.03);
        assert!((volume.0 - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_arithmetic() {
        let a = SquareMeters(10.0);
        let b = SquareMeters(2.5);
        assert_eq!((a + b).0, 12.5);
        assert_eq!((a - b).0, 7.5);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 4.0).0, 2.5);
    }

    #[test]
    fn test_serialization() {
        let kg = Kilograms(12.5);
        let json = serde_json::to_string(&kg).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Kilograms = serde_json::from_str(&json).unwrap();
        assert_eq!(kg, roundtrip);
    }
}
