use actix_web::http::StatusCode;
use actix_web::{route, Responder};

use crate::api::llm::cors;

#[route("/api/llm", method = "OPTIONS")]
pub async fn llm_preflight() -> impl Responder {
    cors(StatusCode::OK)
        .insert_header(("Access-Control-Allow-Methods", "GET, POST, OPTIONS"))
        .insert_header(("Access-Control-Allow-Headers", "Content-Type"))
        .insert_header(("Access-Control-Max-Age", "86400"))
        .finish()
}
