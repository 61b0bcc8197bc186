use actix_web::{web, HttpResponse};

use crate::models::{Event, Faq, User};
use crate::store::{keys, read_records, RecordStore};

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Store gauges in Prometheus text format")
    )
)]
pub async fn get_metrics(store: web::Data<dyn RecordStore>) -> HttpResponse {
    let users: Vec<User> = read_records(store.get_ref(), keys::USERS).await;
    let events: Vec<Event> = read_records(store.get_ref(), keys::EVENTS).await;
    let faqs: Vec<Faq> = read_records(store.get_ref(), keys::FAQS).await;
    let registrations: usize = events.iter().map(|e| e.participants.len()).sum();

    let metrics = format!(
        "# HELP campus_users_total Registered user accounts\n\
         # TYPE campus_users_total gauge\n\
         campus_users_total {}\n\
         \n\
         # HELP campus_events_total Published events\n\
         # TYPE campus_events_total gauge\n\
         campus_events_total {}\n\
         \n\
         # HELP campus_faqs_total Published FAQs\n\
         # TYPE campus_faqs_total gauge\n\
         campus_faqs_total {}\n\
         \n\
         # HELP campus_registrations_total Event registrations across all events\n\
         # TYPE campus_registrations_total gauge\n\
         campus_registrations_total {}\n",
        users.len(),
        events.len(),
        faqs.len(),
        registrations
    );

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics)
}
