//! # Estimator Settings
//!
//! Package catalogs and engine constants used by the quantity calculations.
//!
//! Every field has a default, so a settings file only needs the values that
//! differ from the store catalog the engine ships with:
//!
//! ```json
//! { "packages": { "adhesive_kg": [25.0, 10.0] } }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::settings::{EstimatorSettings, DEFAULT_SETTINGS};
//!
//! let settings = EstimatorSettings::from_json(r#"{ "packages": { "grout_kg": [2.0] } }"#).unwrap();
//! assert_eq!(settings.packages.grout_kg, vec![2.0]);
//! assert_eq!(settings.packages.adhesive_kg, DEFAULT_SETTINGS.packages.adhesive_kg);
//! ```

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{EstimateError, EstimateResult};
use crate::model::{GroutClass, WaterproofingKind};

/// Settings used by [`crate::calculations::calculate`]
pub static DEFAULT_SETTINGS: Lazy<EstimatorSettings> = Lazy::new(EstimatorSettings::default);

/// Root settings container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorSettings {
    /// Retail package sizes
    pub packages: PackageCatalog,

    /// Material densities
    pub densities: Densities,

    /// Consumption rates and geometric constants
    pub constants: EngineConstants,
}

/// Retail package sizes, in the unit of the material.
///
/// Order does not matter; the packaging optimizer sorts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageCatalog {
    /// Adhesive mortar bags (kg)
    pub adhesive_kg: Vec<f64>,
    /// Grout bags (kg)
    pub grout_kg: Vec<f64>,
    /// Spacer bags (pieces per bag)
    pub spacers: Vec<f64>,
    /// Cement bag (kg)
    pub cement_bag_kg: f64,
    /// Polymeric waterproofing mortar (kg)
    pub polymeric_mortar_kg: Vec<f64>,
    /// Acrylic membrane buckets (kg)
    pub acrylic_membrane_kg: Vec<f64>,
    /// Crystallizing additive (L)
    pub crystallizing_additive_l: Vec<f64>,
    /// Asphaltic membrane roll (m²)
    pub asphaltic_roll_m2: f64,
    /// Geotextile roll (m²)
    pub geotextile_roll_m2: f64,
}

impl Default for PackageCatalog {
    fn default() -> Self {
        PackageCatalog {
            adhesive_kg: vec![20.0, 15.0, 5.0],
            grout_kg: vec![5.0, 1.0],
            spacers: vec![500.0, 100.0, 50.0],
            cement_bag_kg: 50.0,
            polymeric_mortar_kg: vec![18.0, 4.0],
            acrylic_membrane_kg: vec![18.0, 3.6],
            crystallizing_additive_l: vec![18.0, 3.6, 1.0],
            asphaltic_roll_m2: 10.0,
            geotextile_roll_m2: 50.0,
        }
    }
}

impl PackageCatalog {
    /// Package sizes for a waterproofing product
    pub fn waterproofing_sizes(&self, kind: WaterproofingKind) -> Vec<f64> {
        match kind {
            WaterproofingKind::PolymericMortar => self.polymeric_mortar_kg.clone(),
            WaterproofingKind::AcrylicMembrane => self.acrylic_membrane_kg.clone(),
            WaterproofingKind::CrystallizingAdditive => self.crystallizing_additive_l.clone(),
            WaterproofingKind::AsphalticMembrane => vec![self.asphaltic_roll_m2],
            WaterproofingKind::GeotextileMembrane => vec![self.geotextile_roll_m2],
        }
    }
}

/// Material densities (kg/m³)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Densities {
    pub grout_type_1: f64,
    pub grout_type_2: f64,
    pub grout_epoxy: f64,
    /// Cement per m³ of sand-cement setting mortar
    pub bed_cement_kg_per_m3: f64,
}

impl Default for Densities {
    fn default() -> Self {
        Densities {
            grout_type_1: 1580.0,
            grout_type_2: 1650.0,
            grout_epoxy: 1750.0,
            bed_cement_kg_per_m3: 300.0,
        }
    }
}

impl Densities {
    /// Bulk density of a grout class
    pub fn grout(&self, class: GroutClass) -> f64 {
        match class {
            GroutClass::CementitiousType1 => self.grout_type_1,
            GroutClass::CementitiousType2 => self.grout_type_2,
            GroutClass::Epoxy => self.grout_epoxy,
        }
    }
}

/// Consumption rates and geometric constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConstants {
    /// Spacers used per laid piece
    pub spacers_per_piece: f64,
    /// Mosaic adhesive consumption (kg/m²)
    pub mosaic_adhesive_kg_m2: f64,
    /// Volume increase of loose sand in the setting mortar
    pub bed_sand_bulking: f64,
    /// Welded mesh panel length (m)
    pub mesh_panel_length_m: f64,
    /// Welded mesh panel width (m)
    pub mesh_panel_width_m: f64,
    /// Lap between adjacent mesh panels (%)
    pub mesh_overlap_percent: f64,
    /// Waterproofing upturn along the walls on floors (m)
    pub waterproofing_upturn_m: f64,
    pub polymeric_mortar_kg_m2: f64,
    pub acrylic_membrane_kg_m2: f64,
    pub crystallizing_additive_l_m2: f64,
    /// Asphaltic membrane per covered m², laps included
    pub asphaltic_membrane_m2_m2: f64,
    /// Geotextile per covered m², laps included
    pub geotextile_m2_m2: f64,
}

impl Default for EngineConstants {
    fn default() -> Self {
        EngineConstants {
            spacers_per_piece: 3.0,
            mosaic_adhesive_kg_m2: 4.0,
            bed_sand_bulking: 1.1,
            mesh_panel_length_m: 2.0,
            mesh_panel_width_m: 3.0,
            mesh_overlap_percent: 10.0,
            waterproofing_upturn_m: 0.30,
            polymeric_mortar_kg_m2: 4.0,
            acrylic_membrane_kg_m2: 1.6,
            crystallizing_additive_l_m2: 0.4,
            asphaltic_membrane_m2_m2: 1.15,
            geotextile_m2_m2: 1.10,
        }
    }
}

impl EngineConstants {
    /// Consumption of a waterproofing product per m² of treated area
    pub fn waterproofing_rate(&self, kind: WaterproofingKind) -> f64 {
        match kind {
            WaterproofingKind::PolymericMortar => self.polymeric_mortar_kg_m2,
            WaterproofingKind::AcrylicMembrane => self.acrylic_membrane_kg_m2,
            WaterproofingKind::CrystallizingAdditive => self.crystallizing_additive_l_m2,
            WaterproofingKind::AsphalticMembrane => self.asphaltic_membrane_m2_m2,
            WaterproofingKind::GeotextileMembrane => self.geotextile_m2_m2,
        }
    }

    /// Area one mesh panel covers once laps are taken off (m²)
    pub fn mesh_panel_effective_area_m2(&self) -> f64 {
        self.mesh_panel_length_m * self.mesh_panel_width_m * (1.0 - self.mesh_overlap_percent / 100.0)
    }
}

fn usable(size: f64) -> bool {
    size.is_finite() && size > 0.0
}

/// Replace a catalog without any usable size by its default
fn fallback_sizes(name: &str, sizes: &mut Vec<f64>, default: &[f64]) {
    if !sizes.iter().any(|s| usable(*s)) {
        warn!(catalog = name, "package catalog has no usable size, using defaults");
        *sizes = default.to_vec();
    }
}

fn fallback_value(name: &str, value: &mut f64, default: f64) {
    if !usable(*value) {
        warn!(setting = name, value = *value, "setting must be positive, using default");
        *value = default;
    }
}

impl EstimatorSettings {
    /// Parse settings from JSON.
    ///
    /// Missing fields take their defaults. Catalogs or constants that would make
    /// the engine useless (no positive package size, zero density...) are
    /// replaced by defaults with a warning.
    pub fn from_json(json: &str) -> EstimateResult<Self> {
        let settings: EstimatorSettings = serde_json::from_str(json)?;
        Ok(settings.with_fallbacks())
    }

    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> EstimateResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EstimateError::file_error("read settings", path.display().to_string(), e.to_string()))?;
        let settings = Self::from_json(&contents)?;
        debug!(path = %path.display(), "loaded estimator settings");
        Ok(settings)
    }

    /// Strict check: every catalog has a usable size and every constant is positive.
    pub fn validate(&self) -> EstimateResult<()> {
        let catalogs: [(&str, &[f64]); 6] = [
            ("packages.adhesive_kg", &self.packages.adhesive_kg),
            ("packages.grout_kg", &self.packages.grout_kg),
            ("packages.spacers", &self.packages.spacers),
            ("packages.polymeric_mortar_kg", &self.packages.polymeric_mortar_kg),
            ("packages.acrylic_membrane_kg", &self.packages.acrylic_membrane_kg),
            ("packages.crystallizing_additive_l", &self.packages.crystallizing_additive_l),
        ];
        for (field, sizes) in catalogs {
            if sizes.is_empty() {
                return Err(EstimateError::missing_field(field));
            }
            if let Some(bad) = sizes.iter().find(|s| !usable(**s)) {
                return Err(EstimateError::invalid_input(
                    field,
                    bad.to_string(),
                    "package sizes must be positive",
                ));
            }
        }

        for (field, value) in self.scalar_fields() {
            if !usable(value) {
                return Err(EstimateError::invalid_input(
                    field,
                    value.to_string(),
                    "must be a positive number",
                ));
            }
        }

        let overlap = self.constants.mesh_overlap_percent;
        if !(0.0..100.0).contains(&overlap) {
            return Err(EstimateError::invalid_input(
                "constants.mesh_overlap_percent",
                overlap.to_string(),
                "must be at least 0 and below 100",
            ));
        }
        Ok(())
    }

    fn scalar_fields(&self) -> Vec<(&'static str, f64)> {
        let p = &self.packages;
        let d = &self.densities;
        let c = &self.constants;
        vec![
            ("packages.cement_bag_kg", p.cement_bag_kg),
            ("packages.asphaltic_roll_m2", p.asphaltic_roll_m2),
            ("packages.geotextile_roll_m2", p.geotextile_roll_m2),
            ("densities.grout_type_1", d.grout_type_1),
            ("densities.grout_type_2", d.grout_type_2),
            ("densities.grout_epoxy", d.grout_epoxy),
            ("densities.bed_cement_kg_per_m3", d.bed_cement_kg_per_m3),
            ("constants.spacers_per_piece", c.spacers_per_piece),
            ("constants.mosaic_adhesive_kg_m2", c.mosaic_adhesive_kg_m2),
            ("constants.bed_sand_bulking", c.bed_sand_bulking),
            ("constants.mesh_panel_length_m", c.mesh_panel_length_m),
            ("constants.mesh_panel_width_m", c.mesh_panel_width_m),
            ("constants.waterproofing_upturn_m", c.waterproofing_upturn_m),
            ("constants.polymeric_mortar_kg_m2", c.polymeric_mortar_kg_m2),
            ("constants.acrylic_membrane_kg_m2", c.acrylic_membrane_kg_m2),
            ("constants.crystallizing_additive_l_m2", c.crystallizing_additive_l_m2),
            ("constants.asphaltic_membrane_m2_m2", c.asphaltic_membrane_m2_m2),
            ("constants.geotextile_m2_m2", c.geotextile_m2_m2),
        ]
    }

    pub(crate) fn with_fallbacks(mut self) -> Self {
        let defaults = EstimatorSettings::default();

        let p = &mut self.packages;
        let dp = &defaults.packages;
        fallback_sizes("adhesive_kg", &mut p.adhesive_kg, &dp.adhesive_kg);
        fallback_sizes("grout_kg", &mut p.grout_kg, &dp.grout_kg);
        fallback_sizes("spacers", &mut p.spacers, &dp.spacers);
        fallback_sizes("polymeric_mortar_kg", &mut p.polymeric_mortar_kg, &dp.polymeric_mortar_kg);
        fallback_sizes("acrylic_membrane_kg", &mut p.acrylic_membrane_kg, &dp.acrylic_membrane_kg);
        fallback_sizes(
            "crystallizing_additive_l",
            &mut p.crystallizing_additive_l,
            &dp.crystallizing_additive_l,
        );
        fallback_value("cement_bag_kg", &mut p.cement_bag_kg, dp.cement_bag_kg);
        fallback_value("asphaltic_roll_m2", &mut p.asphaltic_roll_m2, dp.asphaltic_roll_m2);
        fallback_value("geotextile_roll_m2", &mut p.geotextile_roll_m2, dp.geotextile_roll_m2);

        let d = &mut self.densities;
        let dd = &defaults.densities;
        fallback_value("grout_type_1", &mut d.grout_type_1, dd.grout_type_1);
        fallback_value("grout_type_2", &mut d.grout_type_2, dd.grout_type_2);
        fallback_value("grout_epoxy", &mut d.grout_epoxy, dd.grout_epoxy);
        fallback_value("bed_cement_kg_per_m3", &mut d.bed_cement_kg_per_m3, dd.bed_cement_kg_per_m3);

        let c = &mut self.constants;
        let dc = &defaults.constants;
        fallback_value("spacers_per_piece", &mut c.spacers_per_piece, dc.spacers_per_piece);
        fallback_value("mosaic_adhesive_kg_m2", &mut c.mosaic_adhesive_kg_m2, dc.mosaic_adhesive_kg_m2);
        fallback_value("bed_sand_bulking", &mut c.bed_sand_bulking, dc.bed_sand_bulking);
        fallback_value("mesh_panel_length_m", &mut c.mesh_panel_length_m, dc.mesh_panel_length_m);
        fallback_value("mesh_panel_width_m", &mut c.mesh_panel_width_m, dc.mesh_panel_width_m);
        fallback_value("waterproofing_upturn_m", &mut c.waterproofing_upturn_m, dc.waterproofing_upturn_m);
        fallback_value("polymeric_mortar_kg_m2", &mut c.polymeric_mortar_kg_m2, dc.polymeric_mortar_kg_m2);
        fallback_value("acrylic_membrane_kg_m2", &mut c.acrylic_membrane_kg_m2, dc.acrylic_membrane_kg_m2);
        fallback_value(
            "crystallizing_additive_l_m2",
            &mut c.crystallizing_additive_l_m2,
            dc.crystallizing_additive_l_m2,
        );
        fallback_value(
            "asphaltic_membrane_m2_m2",
            &mut c.asphaltic_membrane_m2_m2,
            dc.asphaltic_membrane_m2_m2,
        );
        fallback_value("geotextile_m2_m2", &mut c.geotextile_m2_m2, dc.geotextile_m2_m2);
        if !(0.0..100.0).contains(&c.mesh_overlap_percent) {
            warn!(
                value = c.mesh_overlap_percent,
                "mesh overlap must be in [0, 100), using default"
            );
            c.mesh_overlap_percent = dc.mesh_overlap_percent;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EstimatorSettings::default().validate().is_ok());
        assert_eq!(*DEFAULT_SETTINGS, EstimatorSettings::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = EstimatorSettings::from_json(r#"{ "densities": { "grout_epoxy": 1800.0 } }"#).unwrap();
        assert_eq!(settings.densities.grout_epoxy, 1800.0);
        assert_eq!(settings.densities.grout_type_1, 1580.0);
        assert_eq!(settings.packages.spacers, vec![500.0, 100.0, 50.0]);
    }

    #[test]
    fn test_unusable_catalog_falls_back() {
        let settings =
            EstimatorSettings::from_json(r#"{ "packages": { "grout_kg": [0.0, -1.0], "cement_bag_kg": 0.0 } }"#)
                .unwrap();
        assert_eq!(settings.packages.grout_kg, vec![5.0, 1.0]);
        assert_eq!(settings.packages.cement_bag_kg, 50.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_field() {
        let mut settings = EstimatorSettings::default();
        settings.packages.adhesive_kg = vec![20.0, -5.0];
        let err = settings.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("packages.adhesive_kg"));

        settings.packages.adhesive_kg.clear();
        assert_eq!(
            settings.validate().unwrap_err(),
            EstimateError::missing_field("packages.adhesive_kg")
        );
    }

    #[test]
    fn test_bad_json_is_serialization_error() {
        let err = EstimatorSettings::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_missing_file() {
        let err = EstimatorSettings::load("/nonexistent/estimator-settings.json").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_mesh_effective_area() {
        let constants = EngineConstants::default();
        assert!((constants.mesh_panel_effective_area_m2() - 5.4).abs() < 1e-12);
    }

    #[test]
    fn test_waterproofing_lookup() {
        let settings = EstimatorSettings::default();
        assert_eq!(
            settings.packages.waterproofing_sizes(WaterproofingKind::GeotextileMembrane),
            vec![50.0]
        );
        assert_eq!(
            settings.constants.waterproofing_rate(WaterproofingKind::AcrylicMembrane),
            1.6
        );
        assert_eq!(settings.densities.grout(GroutClass::Epoxy), 1750.0);
    }
}
