//! Intervention list and editor, plus score lookup and exports.

use std::path::PathBuf;

use tracing::warn;
use uuid::Uuid;

use crate::context::Context;
use crate::error::ApiError;
use crate::export::Artifact;
use crate::transport::Transport;
use crate::types::{score_text, Intervention, Scores};
use crate::view::section::CrudSection;

#[derive(Debug, Clone, Default)]
pub struct InterventionSection {
    pub records: CrudSection<Intervention>,
}

impl InterventionSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reload<T: Transport>(&mut self, ctx: &Context<'_, T>) -> bool {
        self.records.reload(ctx)
    }

    /// Fetch scores and surface them as an info notification.
    pub fn show_scores<T: Transport>(&self, ctx: &Context<'_, T>, id: Uuid) -> Option<Scores> {
        match ctx.api.compute_scores(id) {
            Ok(scores) => {
                ctx.info(format!(
                    "Scores: G{}, N{}",
                    score_text(&scores.glasgow),
                    score_text(&scores.news)
                ));
                Some(scores)
            }
            Err(err) => {
                warn!(error = %err, %id, "score computation failed");
                ctx.error("Failed to compute scores");
                None
            }
        }
    }

    pub fn download_pdf<T: Transport>(&self, ctx: &Context<'_, T>, id: Uuid) -> Option<PathBuf> {
        let artifact = ctx.api.export_pdf(id).map(|bytes| Artifact::report(id, bytes));
        store(ctx, artifact, "Failed to generate PDF report")
    }

    pub fn download_hl7<T: Transport>(&self, ctx: &Context<'_, T>, id: Uuid) -> Option<PathBuf> {
        let artifact = ctx.api.export_hl7(id).map(|message| Artifact::hl7(id, message));
        store(ctx, artifact, "Failed to export HL7 message")
    }
}

fn store<T: Transport>(
    ctx: &Context<'_, T>,
    artifact: Result<Artifact, ApiError>,
    failure: &str,
) -> Option<PathBuf> {
    let artifact = match artifact {
        Ok(artifact) => artifact,
        Err(err) => {
            warn!(error = %err, "export fetch failed");
            ctx.error(failure);
            return None;
        }
    };
    match ctx.sink.save(artifact) {
        Ok(path) => Some(path),
        Err(err) => {
            warn!(error = %err, "export write failed");
            ctx.error(failure);
            None
        }
    }
}
