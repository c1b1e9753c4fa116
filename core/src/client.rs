//! Stateless HTTP request builder and response parser for the DPI API.
//!
//! # Design
//! `DpiClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! A `Transport` executes the round-trip in between, keeping this module
//! deterministic and free of I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    Intervention, InterventionInput, Patient, PatientInput, Scores, Stats, SummaryEntry,
};

const PATIENTS: &str = "/api/patients";
const INTERVENTIONS: &str = "/api/interventions";
const STATS: &str = "/api/stats";

/// Synchronous, stateless client for the DPI API.
#[derive(Debug, Clone)]
pub struct DpiClient {
    base_url: String,
}

impl DpiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- dashboard ---

    pub fn build_fetch_stats(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, STATS.to_string())
    }

    pub fn parse_fetch_stats(&self, response: HttpResponse) -> Result<Stats, ApiError> {
        parse_json(response)
    }

    // --- patients ---

    pub fn build_fetch_patients(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, PATIENTS.to_string())
    }

    pub fn build_create_patient(&self, input: &PatientInput) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, PATIENTS.to_string(), input)
    }

    pub fn build_update_patient(
        &self,
        id: Uuid,
        input: &PatientInput,
    ) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, format!("{PATIENTS}/{id}"), input)
    }

    pub fn build_delete_patient(&self, id: Uuid) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("{PATIENTS}/{id}"))
    }

    pub fn build_fetch_patient_summary(&self, id: Uuid) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("{PATIENTS}/{id}/summary"))
    }

    pub fn parse_fetch_patients(&self, response: HttpResponse) -> Result<Vec<Patient>, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_patient(&self, response: HttpResponse) -> Result<Patient, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_patient(&self, response: HttpResponse) -> Result<Patient, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_patient(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_fetch_patient_summary(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<SummaryEntry>, ApiError> {
        parse_json(response)
    }

    // --- interventions ---

    pub fn build_fetch_interventions(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, INTERVENTIONS.to_string())
    }

    pub fn build_create_intervention(
        &self,
        input: &InterventionInput,
    ) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, INTERVENTIONS.to_string(), input)
    }

    pub fn build_update_intervention(
        &self,
        id: Uuid,
        input: &InterventionInput,
    ) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, format!("{INTERVENTIONS}/{id}"), input)
    }

    pub fn build_delete_intervention(&self, id: Uuid) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("{INTERVENTIONS}/{id}"))
    }

    pub fn build_compute_scores(&self, id: Uuid) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("{INTERVENTIONS}/{id}/scores"))
    }

    pub fn build_export_hl7(&self, id: Uuid) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("{INTERVENTIONS}/{id}/hl7"))
    }

    pub fn build_export_pdf(&self, id: Uuid) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("{INTERVENTIONS}/{id}/report"))
    }

    pub fn parse_fetch_interventions(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Intervention>, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_intervention(
        &self,
        response: HttpResponse,
    ) -> Result<Intervention, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_intervention(
        &self,
        response: HttpResponse,
    ) -> Result<Intervention, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_intervention(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_compute_scores(&self, response: HttpResponse) -> Result<Scores, ApiError> {
        parse_json(response)
    }

    /// HL7 message bytes. A JSON-typed body holding a single string is
    /// unwrapped; anything else is kept byte for byte, whatever its charset.
    pub fn parse_export_hl7(&self, response: HttpResponse) -> Result<Vec<u8>, ApiError> {
        check_status(&response)?;
        let is_json = response
            .header("content-type")
            .is_some_and(|ct| ct.contains("json"));
        if is_json {
            if let Ok(message) = serde_json::from_slice::<String>(&response.body) {
                return Ok(message.into_bytes());
            }
        }
        Ok(response.body)
    }

    pub fn parse_export_pdf(&self, response: HttpResponse) -> Result<Vec<u8>, ApiError> {
        check_status(&response)?;
        Ok(response.body)
    }

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json<T: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(ApiError::Serialization)?;
        Ok(HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Map any non-2xx status to `ApiError::Request` carrying the body text.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Request {
        status: response.status,
        body: response.text(),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_slice(&response.body).map_err(ApiError::Deserialization)
}
