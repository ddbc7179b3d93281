use std::sync::Arc;

use actix_web::{post, web, HttpRequest, HttpResponse};
use log::info;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::request::CreateQuizRequest,
};

/// Generates a quiz from a topic or from extracted document text and opens
/// an interactive session on it.
#[post("/api/quizzes")]
async fn create_quiz(
    state: web::Data<Arc<AppState>>,
    http_request: HttpRequest,
    request: web::Json<CreateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    if let Some(request_id) = get_request_id(&http_request) {
        info!("request {}: creating quiz", request_id);
    }

    let view = state.quiz_service.create_session(request.into()).await?;
    Ok(HttpResponse::Created().json(view))
}
