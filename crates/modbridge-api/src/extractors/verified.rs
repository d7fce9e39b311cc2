//! Signature-verified interaction extractor
//!
//! Reads the raw body, checks the Ed25519 signature headers against it, and
//! only then parses JSON. A request that fails verification never reaches a
//! handler.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRef, FromRequest, Request},
    http::HeaderMap,
};
use modbridge_common::{AppError, SIGNATURE_HEADER, TIMESTAMP_HEADER};

use crate::interaction::Interaction;
use crate::response::ApiError;
use crate::state::AppState;

/// Interaction whose signature has been verified
#[derive(Debug, Clone)]
pub struct VerifiedInteraction(pub Interaction);

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl<S> FromRequest<S> for VerifiedInteraction
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let (signature, timestamp) = match (
            header(req.headers(), SIGNATURE_HEADER),
            header(req.headers(), TIMESTAMP_HEADER),
        ) {
            (Some(sig), Some(ts)) => (sig.to_string(), ts.to_string()),
            _ => {
                tracing::warn!("Interaction without signature headers");
                return Err(AppError::MissingSignature.into());
            }
        };

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        app_state
            .verifier()
            .verify(&timestamp, &body, &signature)
            .map_err(|e| {
                tracing::warn!(error = %e, "Interaction signature rejected");
                AppError::from(e)
            })?;

        let interaction = serde_json::from_slice(&body)
            .map_err(|e| AppError::bad_request(format!("malformed interaction: {e}")))?;

        Ok(Self(interaction))
    }
}
