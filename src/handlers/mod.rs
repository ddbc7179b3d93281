pub mod health_handler;
pub mod quiz_handler;
pub mod session_handler;
pub mod topic_handler;

use actix_web::web;

/// Registers every route; shared by the server bootstrap and the
/// integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(quiz_handler::create_quiz)
        .service(session_handler::get_session)
        .service(session_handler::submit_answer)
        .service(session_handler::get_results)
        .service(session_handler::delete_session)
        .service(topic_handler::suggest_topics)
        .service(health_handler::health_check)
        .service(health_handler::health_check_ready)
        .service(health_handler::health_check_live);
}
