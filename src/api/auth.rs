use actix_web::{web, HttpResponse};

use crate::models::{LoginRequest, Session, SignupRequest, UpdateProfileRequest, UserInfo};
use crate::services::{auth_service, session_service};
use crate::store::RecordStore;

#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserInfo),
        (status = 400, description = "Invalid field"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn signup(
    store: web::Data<dyn RecordStore>,
    request: web::Json<SignupRequest>,
) -> HttpResponse {
    log::info!("📝 POST /auth/signup - email: {}", request.email);

    match auth_service::signup(store.get_ref(), &request).await {
        Ok(user) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "user": user
        })),
        Err(e) => {
            log::warn!("❌ Signup failed: {} - {}", request.email, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session established", body = UserInfo),
        (status = 401, description = "Invalid credentials or role mismatch")
    )
)]
pub async fn login(
    store: web::Data<dyn RecordStore>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    log::info!("🔐 POST /auth/login - email: {}", request.email);

    match auth_service::login(store.get_ref(), &request).await {
        Ok(user) => {
            log::info!("✅ Login successful: {}", user.email);
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "user": user
            }))
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", request.email, e);
            e.to_response()
        }
    }
}

pub async fn logout(store: web::Data<dyn RecordStore>) -> HttpResponse {
    log::info!("👋 POST /auth/logout");

    match auth_service::logout(store.get_ref()).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Logged out"
        })),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    tag = "Auth",
    responses(
        (status = 200, description = "Current session state")
    )
)]
pub async fn session(store: web::Data<dyn RecordStore>) -> HttpResponse {
    match session_service::current_session(store.get_ref()).await {
        Some(session) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "authenticated": true,
            "email": session.email,
            "role": session.role
        })),
        None => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "authenticated": false
        })),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Profile of the session owner", body = UserInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(store: web::Data<dyn RecordStore>, session: web::ReqData<Session>) -> HttpResponse {
    match auth_service::get_profile(store.get_ref(), &session.email).await {
        Ok(user) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "user": user
        })),
        Err(e) => e.to_response(),
    }
}

pub async fn update_profile(
    store: web::Data<dyn RecordStore>,
    session: web::ReqData<Session>,
    request: web::Json<UpdateProfileRequest>,
) -> HttpResponse {
    log::info!("👤 PUT /auth/profile - {}", session.email);

    match auth_service::update_profile(store.get_ref(), &session.email, &request).await {
        Ok(user) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "user": user
        })),
        Err(e) => e.to_response(),
    }
}
