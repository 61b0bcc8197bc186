use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Faq {
    pub fn new(question: &str, answer: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

// Request structures
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateFaqRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateFaqRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct GenerateFaqRequest {
    pub questions: Vec<String>,
}
