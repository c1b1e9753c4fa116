//! View-state machines, independent of any rendering.
//!
//! # Design
//! Each view owns its state and exposes explicit commands (`reload`, form
//! submission, delete, exports). Commands borrow a `Context` for the duration
//! of one call and catch every `ApiError` at this boundary, turning it into a
//! single notification. Nothing propagates further and nothing is retried.

pub mod dashboard;
pub mod interventions;
pub mod list;
pub mod patients;
pub mod section;

pub use dashboard::Dashboard;
pub use interventions::InterventionSection;
pub use list::{DeleteOutcome, ListView};
pub use patients::PatientSection;
pub use section::CrudSection;

/// Fetch lifecycle shared by every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Error,
}
