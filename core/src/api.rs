//! One method per REST endpoint: build, execute, parse.

use uuid::Uuid;

use crate::client::DpiClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{
    Intervention, InterventionInput, Patient, PatientInput, Scores, Stats, SummaryEntry,
};

/// Facade pairing a `DpiClient` with the `Transport` that executes its
/// requests. Performs no validation and no transformation.
#[derive(Debug, Clone)]
pub struct Api<T> {
    client: DpiClient,
    transport: T,
}

impl<T: Transport> Api<T> {
    pub fn new(client: DpiClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &DpiClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn fetch_stats(&self) -> Result<Stats, ApiError> {
        let response = self.transport.execute(self.client.build_fetch_stats())?;
        self.client.parse_fetch_stats(response)
    }

    pub fn fetch_patients(&self) -> Result<Vec<Patient>, ApiError> {
        let response = self.transport.execute(self.client.build_fetch_patients())?;
        self.client.parse_fetch_patients(response)
    }

    pub fn create_patient(&self, input: &PatientInput) -> Result<Patient, ApiError> {
        let request = self.client.build_create_patient(input)?;
        self.client.parse_create_patient(self.transport.execute(request)?)
    }

    pub fn update_patient(&self, id: Uuid, input: &PatientInput) -> Result<Patient, ApiError> {
        let request = self.client.build_update_patient(id, input)?;
        self.client.parse_update_patient(self.transport.execute(request)?)
    }

    pub fn delete_patient(&self, id: Uuid) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete_patient(id))?;
        self.client.parse_delete_patient(response)
    }

    pub fn fetch_patient_summary(&self, id: Uuid) -> Result<Vec<SummaryEntry>, ApiError> {
        let response = self
            .transport
            .execute(self.client.build_fetch_patient_summary(id))?;
        self.client.parse_fetch_patient_summary(response)
    }

    pub fn fetch_interventions(&self) -> Result<Vec<Intervention>, ApiError> {
        let response = self.transport.execute(self.client.build_fetch_interventions())?;
        self.client.parse_fetch_interventions(response)
    }

    pub fn create_intervention(&self, input: &InterventionInput) -> Result<Intervention, ApiError> {
        let request = self.client.build_create_intervention(input)?;
        self.client
            .parse_create_intervention(self.transport.execute(request)?)
    }

    pub fn update_intervention(
        &self,
        id: Uuid,
        input: &InterventionInput,
    ) -> Result<Intervention, ApiError> {
        let request = self.client.build_update_intervention(id, input)?;
        self.client
            .parse_update_intervention(self.transport.execute(request)?)
    }

    pub fn delete_intervention(&self, id: Uuid) -> Result<(), ApiError> {
        let response = self
            .transport
            .execute(self.client.build_delete_intervention(id))?;
        self.client.parse_delete_intervention(response)
    }

    pub fn compute_scores(&self, id: Uuid) -> Result<Scores, ApiError> {
        let response = self.transport.execute(self.client.build_compute_scores(id))?;
        self.client.parse_compute_scores(response)
    }

    pub fn export_hl7(&self, id: Uuid) -> Result<Vec<u8>, ApiError> {
        let response = self.transport.execute(self.client.build_export_hl7(id))?;
        self.client.parse_export_hl7(response)
    }

    pub fn export_pdf(&self, id: Uuid) -> Result<Vec<u8>, ApiError> {
        let response = self.transport.execute(self.client.build_export_pdf(id))?;
        self.client.parse_export_pdf(response)
    }
}
