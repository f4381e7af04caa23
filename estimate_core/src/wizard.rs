//! # Wizard Session
//!
//! [`EstimateSession`] owns the snapshot being edited and walks the guided
//! form: welcome → covering → environment → traffic → area → pieces →
//! baseboard → waterproofing → review → result.
//!
//! ## Step rules
//!
//! - **Advance** only when the current step validates, skipping steps that do
//!   not apply. It stops at review; the result step is reached by
//!   [`EstimateSession::calculate`].
//! - **Retreat** skips the same steps downward. Landing on welcome or on the
//!   covering choice starts over with an empty snapshot.
//! - **Go to** jumps directly (clamped) and never resets.
//!
//! | Step | Shown when |
//! |------|------------|
//! | traffic | covering is interlocking pavement |
//! | baseboard | covering takes a baseboard and goes on a floor |
//! | waterproofing | environment is set and not dry (pavement: traffic also set) |
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::model::{CoveringKind, EnvironmentClass, WizardStep};
//! use estimate_core::wizard::EstimateSession;
//!
//! let mut session = EstimateSession::new();
//! session.advance();
//! session.snapshot_mut().set_covering_kind(CoveringKind::Granite);
//! session.advance();
//! session.snapshot_mut().set_environment(EnvironmentClass::Dry);
//! session.advance();
//!
//! // Traffic only applies to pavement
//! assert_eq!(session.step(), WizardStep::Area);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::calculations;
use crate::model::{InputSnapshot, ResultBundle, StepValidationResult, WizardStep};
use crate::settings::EstimatorSettings;
use crate::validation;

/// One estimation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateSession {
    /// Session identifier
    pub id: Uuid,

    /// When the session was started
    pub started_at: DateTime<Utc>,

    step: WizardStep,
    snapshot: InputSnapshot,
    result: Option<ResultBundle>,

    #[serde(default)]
    settings: EstimatorSettings,
}

impl Default for EstimateSession {
    fn default() -> Self {
        EstimateSession::new()
    }
}

impl EstimateSession {
    /// Start a session on the welcome step with an empty snapshot
    pub fn new() -> Self {
        EstimateSession::with_settings(EstimatorSettings::default())
    }

    /// Start a session that calculates with the given settings.
    ///
    /// Unusable catalogs and constants are replaced by the defaults.
    pub fn with_settings(settings: EstimatorSettings) -> Self {
        EstimateSession {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            step: WizardStep::Welcome,
            snapshot: InputSnapshot::new(),
            result: None,
            settings: settings.with_fallbacks(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    /// Mutable access for the presentation layer's field edits
    pub fn snapshot_mut(&mut self) -> &mut InputSnapshot {
        &mut self.snapshot
    }

    /// Last calculation, if any
    pub fn result(&self) -> Option<&ResultBundle> {
        self.result.as_ref()
    }

    pub fn settings(&self) -> &EstimatorSettings {
        &self.settings
    }

    // ========================================================================
    // Visibility and validation
    // ========================================================================

    /// Whether `step` applies to the current snapshot
    pub fn is_step_visible(&self, step: WizardStep) -> bool {
        let snapshot = &self.snapshot;
        let pavement = snapshot.covering_kind().is_some_and(|k| k.is_pavement());
        match step {
            WizardStep::Traffic => pavement,
            WizardStep::Baseboard => snapshot.is_baseboard_eligible(),
            WizardStep::Waterproofing => {
                let wet = snapshot.environment().is_some_and(|e| !e.is_dry());
                wet && (!pavement || snapshot.traffic_class().is_some())
            }
            _ => true,
        }
    }

    /// Validation of the current step
    pub fn current_validation(&self) -> StepValidationResult {
        validation::validate(self.step, &self.snapshot)
    }

    /// Whether the current step validates
    pub fn can_advance(&self) -> bool {
        self.current_validation().valid
    }

    /// First visible step, up to review, whose validation fails
    pub fn first_invalid_step(&self) -> Option<WizardStep> {
        WizardStep::ALL
            .iter()
            .copied()
            .filter(|s| *s <= WizardStep::Review && self.is_step_visible(*s))
            .find(|s| !validation::validate(*s, &self.snapshot).valid)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Move to the next visible step. Returns whether the step changed.
    ///
    /// Advance is clamped at review: from review or result it returns `false`
    /// and leaves the step alone. Use [`calculate`](Self::calculate) to reach
    /// the result step.
    pub fn advance(&mut self) -> bool {
        if self.step >= WizardStep::Review {
            return false;
        }
        if !self.can_advance() {
            debug!(step = ?self.step, "advance blocked");
            return false;
        }
        let mut next = self.step.index() + 1;
        while next < WizardStep::Review.index() && !self.is_step_visible(WizardStep::from_index(next)) {
            next += 1;
        }
        let from = self.step;
        self.step = WizardStep::from_index(next.min(WizardStep::Review.index()));
        debug!(?from, to = ?self.step, "advance");
        true
    }

    /// Move to the previous visible step. Returns whether the step changed.
    ///
    /// Landing on welcome or covering choice clears the snapshot and result.
    pub fn retreat(&mut self) -> bool {
        if self.step == WizardStep::Welcome {
            return false;
        }
        let mut previous = self.step.index() - 1;
        while previous > 0 && !self.is_step_visible(WizardStep::from_index(previous)) {
            previous -= 1;
        }
        let from = self.step;
        self.step = WizardStep::from_index(previous);
        if self.step.resets_session() {
            self.reset();
        }
        debug!(?from, to = ?self.step, "retreat");
        true
    }

    /// Jump to the step at `index` (clamped). Never resets.
    pub fn go_to(&mut self, index: usize) -> WizardStep {
        self.step = WizardStep::from_index(index);
        debug!(to = ?self.step, "go to");
        self.step
    }

    /// Run the calculation, keep the result and show it
    pub fn calculate(&mut self) -> &ResultBundle {
        let bundle = calculations::calculate_with(&self.snapshot, &self.settings);
        self.step = WizardStep::Result;
        self.result.insert(bundle)
    }

    fn reset(&mut self) {
        if !self.snapshot.is_empty() || self.result.is_some() {
            debug!(session = %self.id, "session reset");
        }
        self.snapshot = InputSnapshot::new();
        self.result = None;
    }
}
