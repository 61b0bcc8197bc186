use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;

use crate::models::Session;
use crate::services::notification_service;
use crate::store::RecordStore;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AskQuestionRequest {
    pub teacher_email: String,
    pub message: String,
}

/// POST /api/v1/student/questions - Send a question to a teacher's inbox
#[post("/questions")]
pub async fn ask_question(
    store: web::Data<dyn RecordStore>,
    session: web::ReqData<Session>,
    body: web::Json<AskQuestionRequest>,
) -> impl Responder {
    match notification_service::ask(
        store.get_ref(),
        &session.email,
        &body.teacher_email,
        &body.message,
    )
    .await
    {
        Ok(()) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "message": "Question sent"
        })),
        Err(e) => {
            log::warn!("❌ Question to {} failed: {}", body.teacher_email, e);
            e.to_response()
        }
    }
}

/// GET /api/v1/teacher/inbox - The teacher's notifications, newest first
#[get("/inbox")]
pub async fn inbox(store: web::Data<dyn RecordStore>, session: web::ReqData<Session>) -> impl Responder {
    let notifications = notification_service::inbox(store.get_ref(), &session.email).await;

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "notifications": notifications,
        "total": notifications.len()
    }))
}
