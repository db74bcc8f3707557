pub mod llm_preflight;
pub mod proxy_llm;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, HttpResponseBuilder};
use serde_json::json;

use crate::llm::LlmError;

/// Every proxy response is readable cross-origin.
pub const ALLOW_ORIGIN: (&str, &str) = ("Access-Control-Allow-Origin", "*");

pub fn cors(status: StatusCode) -> HttpResponseBuilder {
    let mut builder = HttpResponse::build(status);
    builder.insert_header(ALLOW_ORIGIN);
    builder
}

pub fn llm_error_response(err: &LlmError) -> HttpResponse {
    match err {
        LlmError::MissingFields | LlmError::UnsupportedProvider(_) => {
            cors(StatusCode::BAD_REQUEST).json(json!({ "error": err.to_string() }))
        }
        LlmError::BodyTooLarge(_) => {
            cors(StatusCode::PAYLOAD_TOO_LARGE).json(json!({ "error": err.to_string() }))
        }
        LlmError::Upstream { status, body, .. } => {
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            cors(status).json(json!({
                "error": err.to_string(),
                "details": body,
            }))
        }
        LlmError::Internal(details) => cors(StatusCode::INTERNAL_SERVER_ERROR).json(json!({
            "error": "Internal server error",
            "details": details,
        })),
    }
}
