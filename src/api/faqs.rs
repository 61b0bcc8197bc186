use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

use crate::models::{CreateFaqRequest, GenerateFaqRequest, UpdateFaqRequest};
use crate::services::assistant_service::AssistantClient;
use crate::services::faq_service;
use crate::store::RecordStore;

/// GET /api/v1/faqs - Public FAQ listing
#[utoipa::path(
    get,
    path = "/api/v1/faqs",
    tag = "FAQs",
    responses(
        (status = 200, description = "FAQ list", body = [crate::models::Faq])
    )
)]
#[get("")]
pub async fn list_faqs(store: web::Data<dyn RecordStore>) -> impl Responder {
    let faqs = faq_service::list(store.get_ref()).await;

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "faqs": faqs,
        "total": faqs.len()
    }))
}

/// POST /api/v1/teacher/faqs - Create a FAQ manually
#[post("/faqs")]
pub async fn create_faq(
    store: web::Data<dyn RecordStore>,
    body: web::Json<CreateFaqRequest>,
) -> impl Responder {
    match faq_service::create(store.get_ref(), &body).await {
        Ok(faq) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "faq": faq
        })),
        Err(e) => e.to_response(),
    }
}

/// PUT /api/v1/teacher/faqs/{id} - Edit a FAQ
#[put("/faqs/{id}")]
pub async fn update_faq(
    store: web::Data<dyn RecordStore>,
    path: web::Path<String>,
    body: web::Json<UpdateFaqRequest>,
) -> impl Responder {
    match faq_service::update(store.get_ref(), &path.into_inner(), &body).await {
        Ok(faq) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "faq": faq
        })),
        Err(e) => e.to_response(),
    }
}

/// DELETE /api/v1/teacher/faqs/{id} - Delete a FAQ
#[delete("/faqs/{id}")]
pub async fn delete_faq(store: web::Data<dyn RecordStore>, path: web::Path<String>) -> impl Responder {
    match faq_service::delete(store.get_ref(), &path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "FAQ deleted"
        })),
        Err(e) => e.to_response(),
    }
}

/// POST /api/v1/teacher/faqs/generate - Bulk-generate FAQs via the assistant
#[post("/faqs/generate")]
pub async fn generate_faqs(
    store: web::Data<dyn RecordStore>,
    assistant: web::Data<AssistantClient>,
    body: web::Json<GenerateFaqRequest>,
) -> impl Responder {
    log::info!("🤖 POST /teacher/faqs/generate - {} questions", body.questions.len());

    match faq_service::bulk_generate(store.get_ref(), &assistant, &body.questions).await {
        Ok(added) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "faqs": added,
            "added": added.len()
        })),
        Err(e) => {
            log::warn!("❌ FAQ generation failed: {}", e);
            e.to_response()
        }
    }
}
