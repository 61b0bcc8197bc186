use actix_web::{web, HttpResponse, Responder};

use crate::services::{navigation_service, session_service};
use crate::store::RecordStore;

/// GET /api/v1/navigation - Menu for the current session's role. An empty
/// menu (not an error) when nobody is logged in.
pub async fn get_menu(store: web::Data<dyn RecordStore>) -> impl Responder {
    let session = session_service::current_session(store.get_ref()).await;
    let role = session.as_ref().map(|s| s.role);
    let menu = navigation_service::menu_for(role);

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "role": role,
        "menu": menu
    }))
}
