//! Axum route handlers for the Cold Email API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::generate_cold_email;
use crate::models::form::FormInput;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ColdEmailResponse {
    pub request_id: Uuid,
    /// Model output, verbatim.
    pub email: String,
    pub chunks_indexed: usize,
    pub context_chunks: usize,
    pub generated_at: DateTime<Utc>,
}

/// POST /api/v1/cold-emails
///
/// Validates the form, indexes the job description, and returns the generated
/// email. Blocks until the completion provider answers or fails.
/// Unreadable bodies are answered with the same JSON error envelope.
pub async fn handle_generate_cold_email(
    State(state): State<AppState>,
    payload: Result<Json<FormInput>, JsonRejection>,
) -> Result<Json<ColdEmailResponse>, AppError> {
    let Json(form) = payload?;
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("cold_email", %request_id);

    async move {
        info!(
            "Generating cold email for {} (job description: {} chars)",
            form.company_name,
            form.job_description.chars().count()
        );

        let draft = generate_cold_email(
            &form,
            &state.splitter,
            state.embedder.as_ref(),
            state.llm.as_ref(),
        )
        .await?;

        info!(
            "Generated cold email: {} chars from {}/{} chunks",
            draft.email.chars().count(),
            draft.context_chunks,
            draft.chunks_indexed
        );

        Ok::<_, AppError>(Json(ColdEmailResponse {
            request_id,
            email: draft.email,
            chunks_indexed: draft.chunks_indexed,
            context_chunks: draft.context_chunks,
            generated_at: Utc::now(),
        }))
    }
    .instrument(span)
    .await
}
