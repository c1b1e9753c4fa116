//! Patient list, editor, summary dialog and FHIR link.

use tracing::warn;
use uuid::Uuid;

use crate::config::DEFAULT_FHIR_BASE_URL;
use crate::context::Context;
use crate::transport::Transport;
use crate::types::{Patient, SummaryEntry};
use crate::view::section::CrudSection;

#[derive(Debug, Clone)]
pub struct PatientSection {
    pub records: CrudSection<Patient>,
    summary: Option<Vec<SummaryEntry>>,
    fhir_base_url: String,
}

impl PatientSection {
    pub fn new(fhir_base_url: &str) -> Self {
        Self {
            records: CrudSection::new(),
            summary: None,
            fhir_base_url: fhir_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn reload<T: Transport>(&mut self, ctx: &Context<'_, T>) -> bool {
        self.records.reload(ctx)
    }

    /// Fetch the patient's recent-history summary and open the dialog.
    /// On failure the dialog stays closed.
    pub fn view_summary<T: Transport>(&mut self, ctx: &Context<'_, T>, id: Uuid) -> bool {
        match ctx.api.fetch_patient_summary(id) {
            Ok(entries) => {
                self.summary = Some(entries);
                true
            }
            Err(err) => {
                warn!(error = %err, %id, "summary fetch failed");
                ctx.error("Failed to load summary");
                false
            }
        }
    }

    /// Entries of the open summary dialog.
    pub fn summary(&self) -> Option<&[SummaryEntry]> {
        self.summary.as_deref()
    }

    pub fn close_summary(&mut self) {
        self.summary = None;
    }

    pub fn fhir_link(&self, id: Uuid) -> String {
        format!("{}/Patient/{id}", self.fhir_base_url)
    }
}

impl Default for PatientSection {
    fn default() -> Self {
        Self::new(DEFAULT_FHIR_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use crate::test_support::Fixture;

    #[test]
    fn summary_opens_and_closes() {
        let fx = Fixture::new();
        fx.transport().push(HttpResponse::new(
            200,
            r#"[{"date":"2024-01-03","summary":"Malaise"},{"date":"2023-11-20","summary":"Chute"}]"#,
        ));
        let mut section = PatientSection::default();

        assert!(section.view_summary(&fx.ctx(), Uuid::nil()));
        let entries = section.summary().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].summary, "Malaise");

        section.close_summary();
        assert!(section.summary().is_none());
    }

    #[test]
    fn failed_summary_stays_closed() {
        let fx = Fixture::new();
        fx.transport().push(HttpResponse::new(404, ""));
        let mut section = PatientSection::default();

        assert!(!section.view_summary(&fx.ctx(), Uuid::nil()));
        assert!(section.summary().is_none());
        assert_eq!(fx.log.errors(), vec!["Failed to load summary".to_string()]);
    }

    #[test]
    fn fhir_link_points_at_patient_resource() {
        let section = PatientSection::new("https://fhir.chu.test/");
        assert_eq!(
            section.fhir_link(Uuid::nil()),
            "https://fhir.chu.test/Patient/00000000-0000-0000-0000-000000000000"
        );
    }
}
