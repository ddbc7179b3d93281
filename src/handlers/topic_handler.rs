use std::sync::Arc;

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::SuggestTopicsRequest,
    models::dto::response::TopicsResponse,
};

/// Suggests quiz topics for a sample of extracted document text.
#[post("/api/topics")]
async fn suggest_topics(
    state: web::Data<Arc<AppState>>,
    request: web::Json<SuggestTopicsRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let topics = state
        .topic_service
        .suggest_topics(&request.extracted_text)
        .await?;
    Ok(HttpResponse::Ok().json(TopicsResponse { topics }))
}
