use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use docgen_core::Request;
use docgen_pipeline::{Disposition, PipelineError};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DocumentationResponse {
    pub documentation: String,
    pub refused: bool,
    pub disposition: Disposition,
}

pub async fn handler(state: web::Data<AppState>, req: web::Json<Request>) -> impl Responder {
    match state.pipeline.run(req.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(DocumentationResponse {
            refused: response.is_refusal(),
            documentation: response.text,
            disposition: response.disposition,
        }),
        Err(e) => error_response(&e),
    }
}

/// Bodies that do not deserialize into a [`Request`] get the same error
/// shape as pipeline failures.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected documentation request body: {}", err);
    let response = HttpResponse::BadRequest().json(serde_json::json!({
        "error": {
            "kind": "invalid_request",
            "message": err.to_string(),
        }
    }));
    InternalError::from_response(err, response).into()
}

fn status_for(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::Substitution(_) => StatusCode::BAD_REQUEST,
        PipelineError::Policy(_) => StatusCode::INTERNAL_SERVER_ERROR,
        PipelineError::Generation(_) if err.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
        PipelineError::Generation(_) | PipelineError::Format(_) => StatusCode::BAD_GATEWAY,
    }
}

fn error_response(err: &PipelineError) -> HttpResponse {
    log::error!("Documentation request failed ({}): {}", err.kind(), err);
    HttpResponse::build(status_for(err)).json(serde_json::json!({
        "error": {
            "kind": err.kind(),
            "message": err.to_string(),
        }
    }))
}
