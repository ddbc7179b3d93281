use std::sync::Arc;

use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::SubmitAnswerRequest,
    models::dto::response::DeleteSessionResponse,
};

#[get("/api/sessions/{id}")]
async fn get_session(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let view = state.quiz_service.session_view(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Applies one option selection. Out-of-phase or unknown-option selects come
/// back `recorded: false` with the session unchanged; input races are
/// expected, not errors.
#[post("/api/sessions/{id}/answers")]
async fn submit_answer(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<SubmitAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state.quiz_service.answer(&id, &request.option).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Score, review, and summary for a completed session; 409 while questions
/// remain.
#[get("/api/sessions/{id}/results")]
async fn get_results(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let results = state.quiz_service.results(&id).await?;
    Ok(HttpResponse::Ok().json(results))
}

#[delete("/api/sessions/{id}")]
async fn delete_session(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.delete_session(&id).await?;
    Ok(HttpResponse::Ok().json(DeleteSessionResponse {
        message: format!("session '{}' discarded", id),
    }))
}
