//! CRUD resources shared by the list views and forms.

use std::fmt;

use uuid::Uuid;

use crate::api::Api;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Intervention, InterventionInput, Patient, PatientInput};

/// An entity the API lists, creates, updates and deletes.
pub trait Resource: Clone + PartialEq + fmt::Debug {
    /// Editable fields, as sent on create and update.
    type Input: Clone + Default + PartialEq + fmt::Debug;

    const NOUN: &'static str;
    const PLURAL: &'static str;

    fn id(&self) -> Uuid;

    fn to_input(&self) -> Self::Input;

    /// Display fields joined by spaces; the list filter matches against it.
    fn search_text(&self) -> String;

    fn fetch_all<T: Transport>(api: &Api<T>) -> Result<Vec<Self>, ApiError>;

    fn create<T: Transport>(api: &Api<T>, input: &Self::Input) -> Result<Self, ApiError>;

    fn update<T: Transport>(api: &Api<T>, id: Uuid, input: &Self::Input) -> Result<Self, ApiError>;

    fn delete<T: Transport>(api: &Api<T>, id: Uuid) -> Result<(), ApiError>;
}

impl Resource for Patient {
    type Input = PatientInput;

    const NOUN: &'static str = "patient";
    const PLURAL: &'static str = "patients";

    fn id(&self) -> Uuid {
        self.id
    }

    fn to_input(&self) -> PatientInput {
        PatientInput {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            birth_date: self.birth_date.clone(),
        }
    }

    fn search_text(&self) -> String {
        self.full_name()
    }

    fn fetch_all<T: Transport>(api: &Api<T>) -> Result<Vec<Self>, ApiError> {
        api.fetch_patients()
    }

    fn create<T: Transport>(api: &Api<T>, input: &PatientInput) -> Result<Self, ApiError> {
        api.create_patient(input)
    }

    fn update<T: Transport>(api: &Api<T>, id: Uuid, input: &PatientInput) -> Result<Self, ApiError> {
        api.update_patient(id, input)
    }

    fn delete<T: Transport>(api: &Api<T>, id: Uuid) -> Result<(), ApiError> {
        api.delete_patient(id)
    }
}

impl Resource for Intervention {
    type Input = InterventionInput;

    const NOUN: &'static str = "intervention";
    const PLURAL: &'static str = "interventions";

    fn id(&self) -> Uuid {
        self.id
    }

    fn to_input(&self) -> InterventionInput {
        InterventionInput {
            datetime: self.datetime.clone(),
            location: self.location.clone(),
            notes: self.notes.clone(),
        }
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.location, self.notes)
    }

    fn fetch_all<T: Transport>(api: &Api<T>) -> Result<Vec<Self>, ApiError> {
        api.fetch_interventions()
    }

    fn create<T: Transport>(api: &Api<T>, input: &InterventionInput) -> Result<Self, ApiError> {
        api.create_intervention(input)
    }

    fn update<T: Transport>(
        api: &Api<T>,
        id: Uuid,
        input: &InterventionInput,
    ) -> Result<Self, ApiError> {
        api.update_intervention(id, input)
    }

    fn delete<T: Transport>(api: &Api<T>, id: Uuid) -> Result<(), ApiError> {
        api.delete_intervention(id)
    }
}
