use crate::dtos::CheckResponse;
use crate::error::{AppError, MALFORMED_MULTIPART_MESSAGE};
use crate::services::content::{DocumentRole, UploadedDocument};
use crate::startup::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

/// Fixed grading instruction sent with every review.
const SYSTEM_INSTRUCTION: &str = "You are a strict compliance checker. Your task is to analyze the provided Request for Quote (RFQ) and the corresponding Proposal document.

**INSTRUCTIONS:**
1.  **Compliance Score (0-100):** Assign a single numerical score based on how well the Proposal meets ALL requirements in the RFQ.
2.  **Compliance Summary:** List all requirements from the RFQ and explicitly state whether the Proposal is COMPLIANT, PARTIALLY COMPLIANT, or NON-COMPLIANT for each.
3.  **Actionable Improvements:** For any non-compliant or partially compliant areas, provide a concise, actionable instruction for the proposal team to fix it.

**FORMATTING:** Respond using Markdown only.";

/// Framing prompt appended after the two inline documents.
const ANALYSIS_PROMPT: &str = "Document 1 (RFQ) is the set of rules. Document 2 (Proposal) is the response. Analyze Document 2 based on Document 1. Provide the analysis structured exactly as described in the System Instructions.";

/// Health check endpoint for liveness probes.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "compliance-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness check endpoint: verifies the review provider is usable.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.provider.health_check().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Provider readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// `POST /api/compliance-check`: grade a Proposal against an RFQ.
pub async fn compliance_check(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut rfq: Option<UploadedDocument> = None;
    let mut proposal: Option<UploadedDocument> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!(error = %e, "Failed to read multipart field");
        AppError::BadRequest(anyhow::anyhow!(MALFORMED_MULTIPART_MESSAGE))
    })? {
        let role = match field.name() {
            Some("rfq") => DocumentRole::Rfq,
            Some("proposal") => DocumentRole::Proposal,
            _ => continue,
        };

        let slot = match role {
            DocumentRole::Rfq => &mut rfq,
            DocumentRole::Proposal => &mut proposal,
        };

        // One file per role; later duplicates are skipped.
        if slot.is_some() {
            continue;
        }

        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Failed to read file bytes");
                AppError::BadRequest(anyhow::anyhow!(MALFORMED_MULTIPART_MESSAGE))
            })?
            .to_vec();

        *slot = Some(UploadedDocument {
            role,
            mime_type,
            bytes,
        });
    }

    let (rfq, proposal) = match (rfq, proposal) {
        (Some(rfq), Some(proposal)) => (rfq, proposal),
        _ => return Err(AppError::MissingDocuments),
    };

    let rfq_inline = rfq.to_inline();
    let proposal_inline = proposal.to_inline();

    for (doc, inline) in [(&rfq, &rfq_inline), (&proposal, &proposal_inline)] {
        tracing::debug!(
            role = doc.role.as_str(),
            size = doc.size(),
            encoded_len = inline.data.len(),
            "Encoded document for compliance review"
        );
    }

    let report = state
        .provider
        .review(
            SYSTEM_INSTRUCTION,
            &[rfq_inline, proposal_inline],
            ANALYSIS_PROMPT,
        )
        .await?;

    Ok(Json(CheckResponse::new(report)))
}
