use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;

use crate::models::{CreateEventRequest, Session, UpdateEventRequest};
use crate::services::event_service;
use crate::store::RecordStore;

#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    pub teacher: Option<String>,
}

/// GET /api/v1/events - Public event listing, optionally filtered by teacher
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    responses(
        (status = 200, description = "Event list", body = [crate::models::EventResponse])
    )
)]
#[get("")]
pub async fn list_events(
    store: web::Data<dyn RecordStore>,
    query: web::Query<EventListQuery>,
) -> impl Responder {
    let events = match &query.teacher {
        Some(teacher) => event_service::list_by_teacher(store.get_ref(), teacher).await,
        None => event_service::list(store.get_ref()).await,
    };

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "events": events,
        "total": events.len()
    }))
}

/// GET /api/v1/events/{id} - Single event
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    responses(
        (status = 200, description = "Event details", body = crate::models::EventResponse),
        (status = 404, description = "Event not found")
    )
)]
#[get("/{id}")]
pub async fn get_event(store: web::Data<dyn RecordStore>, path: web::Path<String>) -> impl Responder {
    match event_service::get(store.get_ref(), &path.into_inner()).await {
        Ok(event) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "event": event
        })),
        Err(e) => e.to_response(),
    }
}

/// GET /api/v1/teacher/events - Events owned by the logged-in teacher
#[get("/events")]
pub async fn my_events(store: web::Data<dyn RecordStore>, session: web::ReqData<Session>) -> impl Responder {
    let events = event_service::list_by_teacher(store.get_ref(), &session.email).await;

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "events": events,
        "total": events.len()
    }))
}

/// POST /api/v1/teacher/events - Publish a new event
#[post("/events")]
pub async fn create_event(
    store: web::Data<dyn RecordStore>,
    session: web::ReqData<Session>,
    body: web::Json<CreateEventRequest>,
) -> impl Responder {
    log::info!("📅 POST /teacher/events - '{}' by {}", body.title, session.email);

    match event_service::create(store.get_ref(), &session.email, &body).await {
        Ok(event) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "event": event
        })),
        Err(e) => {
            log::warn!("❌ Event creation failed: {}", e);
            e.to_response()
        }
    }
}

/// PUT /api/v1/teacher/events/{id} - Edit an owned event
#[put("/events/{id}")]
pub async fn update_event(
    store: web::Data<dyn RecordStore>,
    session: web::ReqData<Session>,
    path: web::Path<String>,
    body: web::Json<UpdateEventRequest>,
) -> impl Responder {
    match event_service::update(store.get_ref(), &session.email, &path.into_inner(), &body).await {
        Ok(event) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "event": event
        })),
        Err(e) => e.to_response(),
    }
}

/// DELETE /api/v1/teacher/events/{id} - Delete an owned event
#[delete("/events/{id}")]
pub async fn delete_event(
    store: web::Data<dyn RecordStore>,
    session: web::ReqData<Session>,
    path: web::Path<String>,
) -> impl Responder {
    match event_service::delete(store.get_ref(), &session.email, &path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Event deleted"
        })),
        Err(e) => e.to_response(),
    }
}

/// GET /api/v1/teacher/events/{id}/roster - Resolved participant list
#[get("/events/{id}/roster")]
pub async fn event_roster(
    store: web::Data<dyn RecordStore>,
    session: web::ReqData<Session>,
    path: web::Path<String>,
) -> impl Responder {
    match event_service::roster(store.get_ref(), &session.email, &path.into_inner()).await {
        Ok(roster) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "roster": roster,
            "total": roster.len()
        })),
        Err(e) => e.to_response(),
    }
}

/// POST /api/v1/student/events/{id}/register - Register for an event
#[post("/events/{id}/register")]
pub async fn register_for_event(
    store: web::Data<dyn RecordStore>,
    session: web::ReqData<Session>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    log::info!("🎟️  POST /student/events/{}/register - {}", id, session.email);

    match event_service::register(store.get_ref(), &session.email, &id).await {
        Ok(event) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "event": event
        })),
        Err(e) => {
            log::warn!("❌ Registration failed: {} - {}", id, e);
            e.to_response()
        }
    }
}

/// GET /api/v1/student/registrations - Events the student is registered for
#[get("/registrations")]
pub async fn my_registrations(
    store: web::Data<dyn RecordStore>,
    session: web::ReqData<Session>,
) -> impl Responder {
    let events = event_service::registrations_for(store.get_ref(), &session.email).await;

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "events": events,
        "total": events.len()
    }))
}
