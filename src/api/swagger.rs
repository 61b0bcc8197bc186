use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Community Service API",
        version = "1.0.0",
        description = "API documentation for the Campus Community Service.\n\n**Authentication:** session-based. Log in via /api/v1/auth/login; protected scopes require an active session with the matching role.\n\n**Features:**\n- Student/teacher accounts with role-gated navigation\n- Event publishing and registration with capacity limits\n- FAQ management with assistant-powered bulk generation\n- Student questions delivered to teacher inboxes\n- Health monitoring and metrics",
        contact(
            name = "Campus Service Team",
            email = "support@campus-service.edu"
        )
    ),
    paths(
        // Auth endpoints
        crate::api::auth::signup,
        crate::api::auth::login,
        crate::api::auth::session,
        crate::api::auth::me,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Public catalog
        crate::api::events::list_events,
        crate::api::events::get_event,
        crate::api::faqs::list_faqs,
    ),
    components(
        schemas(
            // Auth
            crate::models::SignupRequest,
            crate::models::LoginRequest,
            crate::models::UpdateProfileRequest,
            crate::models::UserInfo,
            crate::models::Role,
            crate::models::Notification,

            // Events
            crate::models::CreateEventRequest,
            crate::models::UpdateEventRequest,
            crate::models::EventResponse,

            // FAQs
            crate::models::Faq,
            crate::models::CreateFaqRequest,
            crate::models::UpdateFaqRequest,
            crate::models::GenerateFaqRequest,
            crate::api::questions::AskQuestionRequest,

            // Health
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Signup, login, session state, and profile management. Roles are fixed at signup and gate the teacher/student dashboards."),
        (name = "Events", description = "Public event catalog. Teachers publish and manage events through the protected /api/v1/teacher scope."),
        (name = "FAQs", description = "Public FAQ catalog. Teachers manage FAQs manually or via assistant bulk generation."),
        (name = "Health", description = "Health check and store metrics for monitoring service status."),
    )
)]
pub struct ApiDoc;
