//! Inheritance portal - progress stepper for the inheritance management workflow
//!
//! The library exposes the step catalog, the stepper state machine and the
//! terminal UI used by the `inheritance-portal` binary.

pub mod app;
pub mod config;
pub mod logging;
pub mod stepper;
pub mod steps;
pub mod ui;

pub use stepper::{Action, ConnectorStatus, StepStatus, StepperController, StepperState};
pub use steps::{CatalogError, StepCatalog, StepDefinition, StepIcon};
