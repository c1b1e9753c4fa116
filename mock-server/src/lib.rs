//! In-memory stand-in for the DPI SMUR REST API.
//!
//! Scores, HL7 messages and PDF reports are fixed placeholders: the real API
//! computes and renders them, this server only has to return something of the
//! right shape.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::header,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub use axum::http::StatusCode;

pub const PLACEHOLDER_GLASGOW: u32 = 15;
pub const PLACEHOLDER_NEWS: u32 = 0;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInput {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Intervention {
    pub id: Uuid,
    pub datetime: String,
    pub location: String,
    pub notes: String,
}

#[derive(Deserialize)]
pub struct InterventionInput {
    pub datetime: String,
    pub location: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryEntry {
    pub date: String,
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub patients_count: usize,
    pub interventions_count: usize,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scores {
    pub glasgow: u32,
    pub news: u32,
}

#[derive(Default)]
struct Records {
    patients: HashMap<Uuid, Patient>,
    interventions: HashMap<Uuid, Intervention>,
    summaries: HashMap<Uuid, Vec<SummaryEntry>>,
}

/// Shared server state.
#[derive(Default)]
pub struct MockState {
    records: RwLock<Records>,
    failure: RwLock<Option<StatusCode>>,
}

pub type Db = Arc<MockState>;

impl MockState {
    pub fn shared() -> Db {
        Arc::new(Self::default())
    }

    /// Attach history entries to a patient; returned by the summary endpoint.
    pub async fn seed_summary(&self, patient_id: Uuid, entries: Vec<SummaryEntry>) {
        self.records
            .write()
            .await
            .summaries
            .insert(patient_id, entries);
    }

    /// Answer every request with `status` until cleared with `None`.
    pub async fn fail_with(&self, status: Option<StatusCode>) {
        *self.failure.write().await = status;
    }
}

pub fn app() -> Router {
    app_with_state(MockState::shared())
}

pub fn app_with_state(db: Db) -> Router {
    Router::new()
        .route("/api/stats", get(stats))
        .route("/api/patients", get(list_patients).post(create_patient))
        .route("/api/patients/{id}", put(update_patient).delete(delete_patient))
        .route("/api/patients/{id}/summary", get(patient_summary))
        .route("/api/interventions", get(list_interventions).post(create_intervention))
        .route(
            "/api/interventions/{id}",
            put(update_intervention).delete(delete_intervention),
        )
        .route("/api/interventions/{id}/scores", get(scores))
        .route("/api/interventions/{id}/hl7", get(hl7))
        .route("/api/interventions/{id}/report", get(report))
        .layer(middleware::from_fn_with_state(db.clone(), injected_failure))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, MockState::shared()).await
}

pub async fn run_with_state(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock DPI API listening");
    }
    axum::serve(listener, app_with_state(db)).await
}

async fn injected_failure(State(db): State<Db>, request: Request, next: Next) -> Response {
    if let Some(status) = *db.failure.read().await {
        debug!(%status, uri = %request.uri(), "injected failure");
        return (status, "injected failure").into_response();
    }
    next.run(request).await
}

async fn stats(State(db): State<Db>) -> Json<Stats> {
    let records = db.records.read().await;
    Json(Stats {
        patients_count: records.patients.len(),
        interventions_count: records.interventions.len(),
    })
}

// --- patients ---

async fn list_patients(State(db): State<Db>) -> Json<Vec<Patient>> {
    let records = db.records.read().await;
    let mut patients: Vec<Patient> = records.patients.values().cloned().collect();
    patients.sort_by(|a, b| {
        (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id))
    });
    Json(patients)
}

async fn create_patient(
    State(db): State<Db>,
    Json(input): Json<PatientInput>,
) -> (StatusCode, Json<Patient>) {
    let patient = Patient {
        id: Uuid::new_v4(),
        first_name: input.first_name,
        last_name: input.last_name,
        birth_date: input.birth_date,
    };
    db.records
        .write()
        .await
        .patients
        .insert(patient.id, patient.clone());
    debug!(id = %patient.id, "patient created");
    (StatusCode::CREATED, Json(patient))
}

async fn update_patient(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<PatientInput>,
) -> Result<Json<Patient>, StatusCode> {
    let mut records = db.records.write().await;
    let patient = records.patients.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    patient.first_name = input.first_name;
    patient.last_name = input.last_name;
    patient.birth_date = input.birth_date;
    Ok(Json(patient.clone()))
}

async fn delete_patient(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut records = db.records.write().await;
    records.summaries.remove(&id);
    records
        .patients
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn patient_summary(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SummaryEntry>>, StatusCode> {
    let records = db.records.read().await;
    if !records.patients.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(records.summaries.get(&id).cloned().unwrap_or_default()))
}

// --- interventions ---

async fn list_interventions(State(db): State<Db>) -> Json<Vec<Intervention>> {
    let records = db.records.read().await;
    let mut interventions: Vec<Intervention> =
        records.interventions.values().cloned().collect();
    interventions.sort_by(|a, b| (&a.datetime, a.id).cmp(&(&b.datetime, b.id)));
    Json(interventions)
}

async fn create_intervention(
    State(db): State<Db>,
    Json(input): Json<InterventionInput>,
) -> (StatusCode, Json<Intervention>) {
    let intervention = Intervention {
        id: Uuid::new_v4(),
        datetime: input.datetime,
        location: input.location,
        notes: input.notes,
    };
    db.records
        .write()
        .await
        .interventions
        .insert(intervention.id, intervention.clone());
    debug!(id = %intervention.id, "intervention created");
    (StatusCode::CREATED, Json(intervention))
}

async fn update_intervention(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<InterventionInput>,
) -> Result<Json<Intervention>, StatusCode> {
    let mut records = db.records.write().await;
    let intervention = records
        .interventions
        .get_mut(&id)
        .ok_or(StatusCode::NOT_FOUND)?;
    intervention.datetime = input.datetime;
    intervention.location = input.location;
    intervention.notes = input.notes;
    Ok(Json(intervention.clone()))
}

async fn delete_intervention(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut records = db.records.write().await;
    records
        .interventions
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn find_intervention(db: &Db, id: Uuid) -> Result<Intervention, StatusCode> {
    db.records
        .read()
        .await
        .interventions
        .get(&id)
        .cloned()
        .ok_or(StatusCode::NOT_FOUND)
}

async fn scores(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Scores>, StatusCode> {
    find_intervention(&db, id).await?;
    Ok(Json(Scores {
        glasgow: PLACEHOLDER_GLASGOW,
        news: PLACEHOLDER_NEWS,
    }))
}

async fn hl7(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Response, StatusCode> {
    let intervention = find_intervention(&db, id).await?;
    let message = format!(
        "MSH|^~\\&|DPI-SMUR|SMUR|||{}||ADT^A01|{}|P|2.5\rPV1|1|E|{}",
        intervention.datetime, intervention.id, intervention.location
    );
    Ok(([(header::CONTENT_TYPE, "text/plain")], message).into_response())
}

async fn report(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Response, StatusCode> {
    let intervention = find_intervention(&db, id).await?;
    let body = format!(
        "%PDF-1.4\n% intervention {} at {}\n%%EOF\n",
        intervention.id, intervention.location
    )
    .into_bytes();
    Ok(([(header::CONTENT_TYPE, "application/pdf")], body).into_response())
}
