//! Domain DTOs for the DPI API.
//!
//! # Design
//! These types mirror the server's JSON schema (camelCase field names) but are
//! defined independently from the mock-server crate. Integration tests catch
//! schema drift between the two.
//!
//! Dates are kept as the strings the server sends. The client passes entities
//! through unchanged; only front-ends interpret them for display.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A patient record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
}

/// Request payload for creating or updating a patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PatientInput {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
}

impl Patient {
    /// `"{first} {last}"`, the text the patient list filters on.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A SMUR intervention record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Intervention {
    pub id: Uuid,
    pub datetime: String,
    pub location: String,
    #[serde(default)]
    pub notes: String,
}

/// Request payload for creating or updating an intervention.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterventionInput {
    pub datetime: String,
    pub location: String,
    pub notes: String,
}

/// Severity scores computed server-side for one intervention.
///
/// Every value is kept as the server sent it: a scale that could not be
/// computed may come back as `null`, a Glasgow score may be a component
/// string such as `"E4V5M6"`. Scales other than Glasgow and NEWS land in
/// `other`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scores {
    #[serde(default)]
    pub glasgow: serde_json::Value,
    #[serde(default)]
    pub news: serde_json::Value,
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

/// Text for one score value. Strings print without quotes.
pub fn score_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// One line of a patient's recent-history summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryEntry {
    pub date: String,
    pub summary: String,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(alias = "patients")]
    pub patients_count: u64,
    #[serde(alias = "interventions")]
    pub interventions_count: u64,
}
