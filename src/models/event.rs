use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Event {
    pub id: String,
    pub teacher_email: String, // owner lookup key
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub date: NaiveDate,
    pub deadline: NaiveDate,
    /// 0 = unlimited
    #[serde(default)]
    pub limit: u32,
    /// Ordered set of registered student emails.
    #[serde(default)]
    pub participants: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn is_full(&self) -> bool {
        self.limit > 0 && self.participants.len() as u32 >= self.limit
    }

    pub fn registration_open(&self, today: NaiveDate) -> bool {
        today <= self.deadline
    }
}

// Request/Response structures
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub poster: Option<String>,
    pub date: NaiveDate,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub limit: u32,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub poster: Option<String>,
    pub date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct EventResponse {
    pub id: String,
    pub teacher_email: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub poster: Option<String>,
    pub date: NaiveDate,
    pub deadline: NaiveDate,
    pub limit: u32,
    pub registered: u32,
    /// None when the event is unlimited.
    pub spots_left: Option<u32>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        let registered = event.participants.len() as u32;
        let spots_left = if event.limit == 0 {
            None
        } else {
            Some(event.limit.saturating_sub(registered))
        };

        Self {
            id: event.id,
            teacher_email: event.teacher_email,
            title: event.title,
            description: event.description,
            category: event.category,
            poster: event.poster,
            date: event.date,
            deadline: event.deadline,
            limit: event.limit,
            registered,
            spots_left,
        }
    }
}
