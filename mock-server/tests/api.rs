use axum::http::{self, Request, StatusCode};
use dpi_mock_server::{
    app, app_with_state, Intervention, MockState, Patient, Scores, Stats, SummaryEntry,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

const JEANNE: &str = r#"{"firstName":"Jeanne","lastName":"Martin","birthDate":"1980-02-14"}"#;
const LYON: &str = r#"{"datetime":"2024-03-01T10:15","location":"Lyon","notes":"Chute"}"#;

// --- list ---

#[tokio::test]
async fn list_patients_empty() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/patients"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let patients: Vec<Patient> = body_json(resp).await;
    assert!(patients.is_empty());
}

#[tokio::test]
async fn stats_start_at_zero() {
    let resp = app().oneshot(empty_request("GET", "/api/stats")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let stats: Stats = body_json(resp).await;
    assert_eq!(stats.patients_count, 0);
    assert_eq!(stats.interventions_count, 0);
}

// --- create ---

#[tokio::test]
async fn create_patient_returns_201() {
    let resp = app()
        .oneshot(json_request("POST", "/api/patients", JEANNE))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let patient: Patient = body_json(resp).await;
    assert_eq!(patient.first_name, "Jeanne");
    assert_eq!(patient.birth_date, "1980-02-14");
}

#[tokio::test]
async fn create_patient_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/patients", r#"{"firstName":"Jeanne"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_intervention_returns_201() {
    let resp = app()
        .oneshot(json_request("POST", "/api/interventions", LYON))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let intervention: Intervention = body_json(resp).await;
    assert_eq!(intervention.location, "Lyon");
    assert_eq!(intervention.notes, "Chute");
}

// --- not found / bad input ---

#[tokio::test]
async fn update_patient_not_found() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/api/patients/00000000-0000-0000-0000-000000000000",
            JEANNE,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_intervention_not_found() {
    let resp = app()
        .oneshot(empty_request(
            "DELETE",
            "/api/interventions/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn summary_bad_uuid_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/patients/not-a-uuid/summary"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn scores_for_missing_intervention_returns_404() {
    let resp = app()
        .oneshot(empty_request(
            "GET",
            "/api/interventions/00000000-0000-0000-0000-000000000000/scores",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- failure injection ---

#[tokio::test]
async fn injected_failure_applies_to_every_route() {
    let db = MockState::shared();
    db.fail_with(Some(StatusCode::INTERNAL_SERVER_ERROR)).await;
    let app = app_with_state(db.clone());

    let resp = app
        .clone()
        .oneshot(empty_request("GET", "/api/patients"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_bytes(resp).await.as_ref(), b"injected failure");

    db.fail_with(None).await;
    let resp = app
        .oneshot(empty_request("GET", "/api/patients"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- full lifecycles ---

#[tokio::test]
async fn patient_lifecycle() {
    use tower::Service;

    let db = MockState::shared();
    let mut app = app_with_state(db.clone()).into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/patients", JEANNE))
        .await
        .unwrap();
    let created: Patient = body_json(resp).await;
    let id = created.id;

    // update replaces every field
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/patients/{id}"),
            r#"{"firstName":"Jeanne","lastName":"Durand","birthDate":"1980-02-14"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Patient = body_json(resp).await;
    assert_eq!(updated.last_name, "Durand");

    // summary — empty until seeded
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/api/patients/{id}/summary")))
        .await
        .unwrap();
    let summary: Vec<SummaryEntry> = body_json(resp).await;
    assert!(summary.is_empty());

    db.seed_summary(
        id,
        vec![SummaryEntry {
            date: "2024-01-03".to_string(),
            summary: "Malaise".to_string(),
        }],
    )
    .await;
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/api/patients/{id}/summary")))
        .await
        .unwrap();
    let summary: Vec<SummaryEntry> = body_json(resp).await;
    assert_eq!(summary.len(), 1);

    // list reflects the update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/patients"))
        .await
        .unwrap();
    let patients: Vec<Patient> = body_json(resp).await;
    assert_eq!(patients, vec![updated]);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/api/patients/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // summary after delete — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/api/patients/{id}/summary")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn intervention_derived_endpoints() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/interventions", LYON))
        .await
        .unwrap();
    let created: Intervention = body_json(resp).await;
    let id = created.id;

    // scores
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/api/interventions/{id}/scores")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let scores: Scores = body_json(resp).await;
    assert_eq!(scores.glasgow, dpi_mock_server::PLACEHOLDER_GLASGOW);

    // hl7 — plain text
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/api/interventions/{id}/hl7")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "text/plain");
    let message = body_bytes(resp).await;
    assert!(message.starts_with(b"MSH|"));

    // report — binary PDF
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/api/interventions/{id}/report")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "application/pdf");
    let pdf = body_bytes(resp).await;
    assert!(pdf.starts_with(b"%PDF-"));

    // stats count the intervention
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/stats"))
        .await
        .unwrap();
    let stats: Stats = body_json(resp).await;
    assert_eq!(stats.interventions_count, 1);
    assert_eq!(stats.patients_count, 0);
}
