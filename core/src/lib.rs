//! Client core for the DPI SMUR patient-record API.
//!
//! # Overview
//! `DpiClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). A `Transport`
//! executes the round-trip and `Api` chains the three steps per endpoint.
//! On top of the facade, `view` holds UI-independent state machines for the
//! dashboard, the patient and intervention lists, their forms, and the
//! export actions.
//!
//! # Design
//! - `DpiClient` is stateless: it holds only `base_url`.
//! - Views own their state and borrow a `Context` per command. Notifications,
//!   confirmations and exported files go through injected capabilities.
//! - The local collections are caches of the server state and are re-fetched
//!   after every successful mutation.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod form;
pub mod http;
pub mod notify;
pub mod resource;
pub mod transport;
pub mod types;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::Api;
pub use client::DpiClient;
pub use config::ClientConfig;
pub use context::Context;
pub use error::{ApiError, ConfigError};
pub use export::{Artifact, ArtifactSink, DirectorySink, MemorySink};
pub use form::{Form, FormMode, SubmitOutcome};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use notify::{Confirm, FixedAnswer, Level, Notification, NotificationLog, Notifier};
pub use resource::Resource;
pub use transport::{Transport, UreqTransport};
pub use types::{
    score_text, Intervention, InterventionInput, Patient, PatientInput, Scores, Stats,
    SummaryEntry,
};
pub use view::{
    CrudSection, Dashboard, DeleteOutcome, InterventionSection, ListView, LoadState,
    PatientSection,
};
