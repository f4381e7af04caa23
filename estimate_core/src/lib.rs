//! # estimate_core - Surface Covering Material Estimation Engine
//!
//! `estimate_core` computes the materials needed to install a floor or wall
//! covering: ceramic and porcelain tile, mosaic, natural stone (flagstone,
//! marble, granite) and interlocking pavement. A guided session collects the
//! inputs step by step, validates each step and produces a material list with
//! purchase packaging.
//!
//! ## Design Philosophy
//!
//! - **Pure**: Validation and calculation are functions of the snapshot
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Never fails mid-form**: Incomplete input gives partial results, not errors
//! - **Rich Errors**: Structured errors at the file/JSON boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use estimate_core::{calculate, InputSnapshot};
//! use estimate_core::model::{CoveringKind, EnvironmentClass, MaterialKind, SurfaceKind};
//!
//! let mut snapshot = InputSnapshot::new();
//! snapshot.set_covering_kind(CoveringKind::Tile);
//! snapshot.set_surface_kind(SurfaceKind::Ceramic);
//! snapshot.set_environment(EnvironmentClass::Dry);
//! snapshot.set_total_area_m2(Some(20.0));
//! snapshot.set_piece_length_cm(Some(60.0));
//! snapshot.set_piece_width_cm(Some(60.0));
//! snapshot.set_joint_mm(Some(3.0));
//!
//! let result = calculate(&snapshot);
//! assert!(result.item(MaterialKind::Tiles).is_some());
//!
//! // Serialize to JSON for display or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`model`] - Covering kinds, the input snapshot, wizard steps and result types
//! - [`wizard`] - Session with step transitions and skip rules
//! - [`validation`] - Per-step acceptance rules
//! - [`calculations`] - Quantity engine, one branch per covering family
//! - [`packaging`] - Purchase package selection
//! - [`settings`] - Package catalogs and engine constants
//! - [`tables`] - Markdown rendering of the lookup tables
//! - [`units`] / [`geometry`] - Type-safe units and area formulas
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod geometry;
pub mod model;
pub mod packaging;
pub mod settings;
pub mod tables;
pub mod units;
pub mod validation;
pub mod wizard;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, calculate_with};
pub use errors::{EstimateError, EstimateResult};
pub use model::{InputSnapshot, ResultBundle, StepValidationResult, WizardStep};
pub use settings::EstimatorSettings;
pub use validation::validate;
pub use wizard::EstimateSession;
