//! Wizard step identifiers.

use serde::{Deserialize, Serialize};

/// One screen of the guided form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Welcome,
    CoveringKind,
    Environment,
    Traffic,
    Area,
    PieceParameters,
    Baseboard,
    Waterproofing,
    Review,
    Result,
}

impl WizardStep {
    /// All steps in order
    pub const ALL: [WizardStep; 10] = [
        WizardStep::Welcome,
        WizardStep::CoveringKind,
        WizardStep::Environment,
        WizardStep::Traffic,
        WizardStep::Area,
        WizardStep::PieceParameters,
        WizardStep::Baseboard,
        WizardStep::Waterproofing,
        WizardStep::Review,
        WizardStep::Result,
    ];

    /// Highest step index
    pub const MAX_INDEX: usize = Self::ALL.len() - 1;

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Step at `index`, clamped to the last step
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::MAX_INDEX)]
    }

    /// Steps that wipe the session when the user retreats into them
    pub fn resets_session(&self) -> bool {
        matches!(self, WizardStep::Welcome | WizardStep::CoveringKind)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WizardStep::Welcome => "Welcome",
            WizardStep::CoveringKind => "Covering",
            WizardStep::Environment => "Environment",
            WizardStep::Traffic => "Traffic",
            WizardStep::Area => "Area",
            WizardStep::PieceParameters => "Pieces",
            WizardStep::Baseboard => "Baseboard",
            WizardStep::Waterproofing => "Waterproofing",
            WizardStep::Review => "Review",
            WizardStep::Result => "Result",
        }
    }
}
