use actix_web::http::StatusCode;
use actix_web::{post, web, Responder};
use log::error;

use crate::api::llm::{cors, llm_error_response};
use crate::llm::{LlmError, LlmRequest, Normalizer};

/// Upper bound on a buffered request body.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Reads the raw payload itself so that oversized or unparseable bodies are
/// answered with the same CORS-enabled JSON as every other failure.
#[post("/api/llm")]
pub async fn proxy_llm(payload: web::Payload, normalizer: web::Data<Normalizer>) -> impl Responder {
    let body = match payload.to_bytes_limited(MAX_BODY_BYTES).await {
        Ok(Ok(body)) => body,
        Ok(Err(e)) => {
            error!("Function error: {}", e);
            return llm_error_response(&LlmError::Internal(e.to_string()));
        }
        Err(_) => return llm_error_response(&LlmError::BodyTooLarge(MAX_BODY_BYTES)),
    };

    let request: LlmRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            error!("Function error: {}", e);
            return llm_error_response(&LlmError::from(e));
        }
    };

    match normalizer.normalize(request).await {
        Ok(response) => cors(StatusCode::OK).json(response),
        Err(e) => {
            if let LlmError::Internal(details) = &e {
                error!("Function error: {}", details);
            }
            llm_error_response(&e)
        }
    }
}
