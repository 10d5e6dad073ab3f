//! Stepper controller: owns the navigation state for one step catalog and
//! mediates every transition through [`StepperState::apply`].

use tracing::{debug, trace};

use crate::steps::{StepCatalog, StepDefinition};

pub mod state;

pub use state::{Action, ConnectorStatus, StepStatus, StepperState};

#[cfg(test)]
mod tests;

/// Navigation state bound to an immutable catalog
#[derive(Debug, Clone)]
pub struct StepperController {
    catalog: StepCatalog,
    state: StepperState,
}

impl StepperController {
    pub fn new(catalog: StepCatalog) -> Self {
        Self {
            catalog,
            state: StepperState::new(),
        }
    }

    pub fn catalog(&self) -> &StepCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &StepperState {
        &self.state
    }

    pub fn step_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    /// Definition of the current step
    pub fn current(&self) -> &StepDefinition {
        &self.catalog.steps()[self.state.current_step]
    }

    pub fn status_of(&self, index: usize) -> StepStatus {
        self.state.status_of(index)
    }

    pub fn connector_after(&self, index: usize) -> ConnectorStatus {
        self.state.connector_after(index)
    }

    pub fn progress(&self) -> f64 {
        self.state.progress(self.step_count())
    }

    pub fn completed_count(&self) -> usize {
        self.state.completed_steps.len()
    }

    /// Apply `action`; returns whether the state changed
    pub fn dispatch(&mut self, action: Action) -> bool {
        let next = self.state.clone().apply(action, self.step_count());
        if next == self.state {
            trace!(?action, current = self.state.current_step, "Action ignored");
            return false;
        }

        self.state = next;
        debug!(
            ?action,
            current = self.state.current_step,
            completed = ?self.state.completed_steps,
            "Stepper transition"
        );
        true
    }

    pub fn select_step(&mut self, index: usize) -> bool {
        self.dispatch(Action::Select(index))
    }

    pub fn complete_current_step(&mut self) -> bool {
        self.dispatch(Action::CompleteCurrent)
    }

    pub fn step_back(&mut self) -> bool {
        self.dispatch(Action::StepBack)
    }

    pub fn reset(&mut self) -> bool {
        self.dispatch(Action::Reset)
    }

    // ─── Affordances ────────────────────────────────────────────────────────

    /// "Anterior" is offered
    pub fn can_step_back(&self) -> bool {
        self.state.current_step > 0
    }

    /// "Completar paso" is offered
    pub fn can_complete(&self) -> bool {
        !self.state.is_completed(self.state.current_step)
    }

    /// "Nuevo proceso" is offered
    pub fn can_reset(&self) -> bool {
        self.state.current_step == self.catalog.last_index() && self.is_finished()
    }

    /// The final step has been completed
    pub fn is_finished(&self) -> bool {
        self.state.is_completed(self.catalog.last_index())
    }
}

impl Default for StepperController {
    fn default() -> Self {
        Self::new(StepCatalog::inheritance())
    }
}
