//! # Domain Model
//!
//! Value types shared by the wizard, validation and the quantity engine.
//!
//! ## Structure
//!
//! ```text
//! model
//! ├── covering   CoveringKind, EnvironmentClass, TrafficClass, MosaicFormat, ...
//! ├── defaults   default joint / thickness / waste / nominal size tables
//! ├── snapshot   InputSnapshot (the aggregate the user edits)
//! ├── params     CoveringParams (typed per-kind views of the snapshot)
//! ├── step       WizardStep
//! └── results    StepValidationResult, MaterialItem, ResultBundle
//! ```

pub mod covering;
pub mod defaults;
pub mod params;
pub mod results;
pub mod snapshot;
pub mod step;

pub use covering::{
    ApplicationSurface, BaseboardMaterial, CoveringFamily, CoveringKind, EnvironmentClass, MosaicFormat,
    PerimeterMode, SurfaceKind, TrafficClass, WaterproofingKind,
};
pub use params::{CoveringParams, MosaicParams, PavementParams, StoneParams, TileParams};
pub use results::{
    AdhesiveClass, BedKind, GroutClass, MaterialItem, MaterialKind, MaterialUnit, ResultBundle, ResultHeader,
    StepValidationResult, StoneBed,
};
pub use snapshot::{AreaMode, BaseboardConfig, InputSnapshot, WaterproofingConfig};
pub use step::WizardStep;
