//! Step orchestration.

pub mod provisioner;

pub use provisioner::{
    build_plan, Collaborators, PlannedStep, Provisioner, RunProgress, RunSummary,
};
