//! Stepper state and its pure transition function.
//!
//! Everything the UI shows about progress (step status, connector class,
//! progress fraction) is derived from the two fields of [`StepperState`] on
//! demand and never stored.

use std::collections::BTreeSet;

/// Navigation status of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepStatus {
    Completed,
    Current,
    Available,
    Pending,
}

impl StepStatus {
    /// Whether selecting a step with this status moves the cursor to it
    pub fn is_selectable(&self) -> bool {
        !matches!(self, StepStatus::Pending)
    }
}

/// Visual class of the link between step `i` and step `i + 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorStatus {
    FullyComplete,
    InProgress,
    NotStarted,
}

/// A user-initiated transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Jump to a step if it is not pending
    Select(usize),
    /// Mark the current step completed and advance if not on the last step
    CompleteCurrent,
    /// Move one step back
    StepBack,
    /// Return to the initial state
    Reset,
}

/// Current step index plus the set of completed step indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepperState {
    pub current_step: usize,
    pub completed_steps: BTreeSet<usize>,
}

impl StepperState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.completed_steps.contains(&index)
    }

    /// Status of `index`; precedence is completed, current, available, pending
    pub fn status_of(&self, index: usize) -> StepStatus {
        if self.is_completed(index) {
            StepStatus::Completed
        } else if index == self.current_step {
            StepStatus::Current
        } else if index < self.current_step
            || index == 0
            || self.is_completed(index - 1)
        {
            StepStatus::Available
        } else {
            StepStatus::Pending
        }
    }

    /// Class of the connector leaving step `index`
    pub fn connector_after(&self, index: usize) -> ConnectorStatus {
        if self.is_completed(index) && self.is_completed(index + 1) {
            ConnectorStatus::FullyComplete
        } else if self.is_completed(index) || index < self.current_step {
            ConnectorStatus::InProgress
        } else {
            ConnectorStatus::NotStarted
        }
    }

    /// Fraction of `step_count` steps that are completed, in `0.0..=1.0`
    pub fn progress(&self, step_count: usize) -> f64 {
        if step_count == 0 {
            return 0.0;
        }
        self.completed_steps.len() as f64 / step_count as f64
    }

    /// Apply `action` to a workflow of `step_count` steps.
    ///
    /// Disallowed transitions return the state unchanged.
    pub fn apply(mut self, action: Action, step_count: usize) -> Self {
        if step_count == 0 {
            return self;
        }
        let last = step_count - 1;

        match action {
            Action::Select(index) => {
                if index <= last && self.status_of(index).is_selectable() {
                    self.current_step = index;
                }
            }
            Action::CompleteCurrent => {
                self.completed_steps.insert(self.current_step);
                if self.current_step < last {
                    self.current_step += 1;
                }
            }
            Action::StepBack => {
                if self.current_step > 0 {
                    self.current_step -= 1;
                }
            }
            Action::Reset => {
                self = Self::new();
            }
        }

        self
    }
}
