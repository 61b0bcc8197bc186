use chrono::Utc;
use uuid::Uuid;

use crate::models::{CreateEventRequest, Event, EventResponse, UpdateEventRequest, User, UserInfo};
use crate::services::auth_service::normalize_email;
use crate::store::{keys, read_records, write_records, RecordStore};
use crate::utils::error::ServiceError;

pub const CATEGORIES: &[&str] = &[
    "academic", "cultural", "sports", "workshop", "social", "other",
];

fn validate_fields(
    title: &str,
    category: &str,
    date: chrono::NaiveDate,
    deadline: chrono::NaiveDate,
    limit: u32,
    registered: usize,
) -> Result<(), ServiceError> {
    if title.trim().is_empty() {
        return Err(ServiceError::Validation {
            field: "title",
            message: "must not be empty".to_string(),
        });
    }

    if !CATEGORIES.contains(&category) {
        return Err(ServiceError::Validation {
            field: "category",
            message: format!("must be one of: {}", CATEGORIES.join(", ")),
        });
    }

    if deadline > date {
        return Err(ServiceError::Validation {
            field: "deadline",
            message: "must not be after the event date".to_string(),
        });
    }

    if limit > 0 && (registered as u32) > limit {
        return Err(ServiceError::Validation {
            field: "limit",
            message: format!("cannot be below the {} current registrations", registered),
        });
    }

    Ok(())
}

pub async fn list(store: &dyn RecordStore) -> Vec<EventResponse> {
    let events: Vec<Event> = read_records(store, keys::EVENTS).await;
    events.into_iter().map(EventResponse::from).collect()
}

/// Ownership filter for the teacher dashboard. Events are a global list;
/// ownership only scopes display and mutation.
pub async fn list_by_teacher(store: &dyn RecordStore, teacher_email: &str) -> Vec<EventResponse> {
    let teacher_email = normalize_email(teacher_email);
    let events: Vec<Event> = read_records(store, keys::EVENTS).await;

    events
        .into_iter()
        .filter(|e| e.teacher_email == teacher_email)
        .map(EventResponse::from)
        .collect()
}

pub async fn get(store: &dyn RecordStore, id: &str) -> Result<EventResponse, ServiceError> {
    let events: Vec<Event> = read_records(store, keys::EVENTS).await;

    events
        .into_iter()
        .find(|e| e.id == id)
        .map(EventResponse::from)
        .ok_or_else(|| ServiceError::NotFound(format!("Event {}", id)))
}

pub async fn create(
    store: &dyn RecordStore,
    teacher_email: &str,
    request: &CreateEventRequest,
) -> Result<EventResponse, ServiceError> {
    validate_fields(
        &request.title,
        &request.category,
        request.date,
        request.deadline,
        request.limit,
        0,
    )?;

    let now = Utc::now();
    let event = Event {
        id: Uuid::new_v4().to_string(),
        teacher_email: normalize_email(teacher_email),
        title: request.title.trim().to_string(),
        description: request.description.clone(),
        category: request.category.clone(),
        poster: request.poster.clone(),
        date: request.date,
        deadline: request.deadline,
        limit: request.limit,
        participants: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    let mut events: Vec<Event> = read_records(store, keys::EVENTS).await;
    events.push(event.clone());
    write_records(store, keys::EVENTS, &events).await?;

    log::info!("✅ Event created: '{}' by {}", event.title, event.teacher_email);

    Ok(EventResponse::from(event))
}

pub async fn update(
    store: &dyn RecordStore,
    teacher_email: &str,
    id: &str,
    request: &UpdateEventRequest,
) -> Result<EventResponse, ServiceError> {
    let teacher_email = normalize_email(teacher_email);
    let mut events: Vec<Event> = read_records(store, keys::EVENTS).await;

    let event = events
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| ServiceError::NotFound(format!("Event {}", id)))?;

    if event.teacher_email != teacher_email {
        return Err(ServiceError::Forbidden(
            "only the owning teacher can edit this event".to_string(),
        ));
    }

    let title = request
        .title
        .as_deref()
        .unwrap_or(&event.title)
        .trim()
        .to_string();
    let category = request
        .category
        .as_deref()
        .unwrap_or(&event.category)
        .to_string();
    let date = request.date.unwrap_or(event.date);
    let deadline = request.deadline.unwrap_or(event.deadline);
    let limit = request.limit.unwrap_or(event.limit);

    validate_fields(&title, &category, date, deadline, limit, event.participants.len())?;

    event.title = title;
    event.category = category;
    event.date = date;
    event.deadline = deadline;
    event.limit = limit;
    if let Some(description) = &request.description {
        event.description = description.clone();
    }
    if let Some(poster) = &request.poster {
        event.poster = Some(poster.clone());
    }
    event.updated_at = Utc::now();

    let updated = event.clone();
    write_records(store, keys::EVENTS, &events).await?;

    Ok(EventResponse::from(updated))
}

/// Unconditional once confirmed by the caller. Does not cascade: any
/// registration references held elsewhere become dangling and are filtered
/// out by readers.
pub async fn delete(
    store: &dyn RecordStore,
    teacher_email: &str,
    id: &str,
) -> Result<(), ServiceError> {
    let teacher_email = normalize_email(teacher_email);
    let mut events: Vec<Event> = read_records(store, keys::EVENTS).await;

    let event = events
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| ServiceError::NotFound(format!("Event {}", id)))?;

    if event.teacher_email != teacher_email {
        return Err(ServiceError::Forbidden(
            "only the owning teacher can delete this event".to_string(),
        ));
    }

    events.retain(|e| e.id != id);
    write_records(store, keys::EVENTS, &events).await?;

    log::info!("🗑️  Event deleted: {}", id);

    Ok(())
}

/// Adds a student to the participant set. The capacity, deadline, and
/// duplicate guards all live here.
pub async fn register(
    store: &dyn RecordStore,
    student_email: &str,
    id: &str,
) -> Result<EventResponse, ServiceError> {
    let student_email = normalize_email(student_email);
    let mut events: Vec<Event> = read_records(store, keys::EVENTS).await;

    let event = events
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| ServiceError::NotFound(format!("Event {}", id)))?;

    if !event.registration_open(Utc::now().date_naive()) {
        return Err(ServiceError::DeadlinePassed);
    }

    if event.participants.iter().any(|p| *p == student_email) {
        return Err(ServiceError::AlreadyRegistered);
    }

    if event.is_full() {
        return Err(ServiceError::EventFull);
    }

    event.participants.push(student_email);
    let updated = event.clone();
    write_records(store, keys::EVENTS, &events).await?;

    Ok(EventResponse::from(updated))
}

/// Events the student is registered for.
pub async fn registrations_for(store: &dyn RecordStore, student_email: &str) -> Vec<EventResponse> {
    let student_email = normalize_email(student_email);
    let events: Vec<Event> = read_records(store, keys::EVENTS).await;

    events
        .into_iter()
        .filter(|e| e.participants.iter().any(|p| *p == student_email))
        .map(EventResponse::from)
        .collect()
}

/// Participant roster for the owning teacher. Participant emails that no
/// longer resolve to a user are dropped rather than surfaced as errors.
pub async fn roster(
    store: &dyn RecordStore,
    teacher_email: &str,
    id: &str,
) -> Result<Vec<UserInfo>, ServiceError> {
    let teacher_email = normalize_email(teacher_email);
    let events: Vec<Event> = read_records(store, keys::EVENTS).await;

    let event = events
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| ServiceError::NotFound(format!("Event {}", id)))?;

    if event.teacher_email != teacher_email {
        return Err(ServiceError::Forbidden(
            "only the owning teacher can view the roster".to_string(),
        ));
    }

    let users: Vec<User> = read_records(store, keys::USERS).await;

    let roster = event
        .participants
        .iter()
        .filter_map(|email| users.iter().find(|u| u.email == *email))
        .cloned()
        .map(UserInfo::from)
        .collect();

    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::store::MemoryStore;
    use chrono::{Duration, Utc};

    fn test_event(id: &str, teacher: &str, limit: u32) -> Event {
        let now = Utc::now();
        let today = now.date_naive();
        Event {
            id: id.to_string(),
            teacher_email: teacher.to_string(),
            title: format!("Event {}", id),
            description: "A campus event".to_string(),
            category: "academic".to_string(),
            poster: None,
            date: today + Duration::days(14),
            deadline: today + Duration::days(7),
            limit,
            participants: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn test_user(email: &str, role: Role) -> User {
        User {
            name: format!("User {}", email),
            email: email.to_string(),
            password_hash: bcrypt::hash("pw123456", 4).unwrap(),
            role,
            photo: None,
            bio: None,
            notifications: Vec::new(),
            created_at: Utc::now(),
        }
    }

    async fn seed_events(store: &MemoryStore, events: &[Event]) {
        write_records(store, keys::EVENTS, events).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_record() {
        let store = MemoryStore::new();
        seed_events(
            &store,
            &[
                test_event("e1", "t@x.com", 0),
                test_event("e2", "t@x.com", 0),
                test_event("e3", "other@x.com", 0),
            ],
        )
        .await;

        let before: Vec<Event> = read_records(&store, keys::EVENTS).await;

        delete(&store, "t@x.com", "e2").await.unwrap();

        let after: Vec<Event> = read_records(&store, keys::EVENTS).await;
        assert_eq!(after.len(), 2);
        assert!(after.iter().all(|e| e.id != "e2"));

        // Surviving records are untouched
        for survivor in &after {
            let original = before.iter().find(|e| e.id == survivor.id).unwrap();
            assert_eq!(
                serde_json::to_string(survivor).unwrap(),
                serde_json::to_string(original).unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_delete_requires_ownership() {
        let store = MemoryStore::new();
        seed_events(&store, &[test_event("e1", "t@x.com", 0)]).await;

        let result = delete(&store, "intruder@x.com", "e1").await;
        assert!(matches!(result.unwrap_err(), ServiceError::Forbidden(_)));

        let events: Vec<Event> = read_records(&store, keys::EVENTS).await;
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn test_register_enforces_limit() {
        let store = MemoryStore::new();
        let mut event = test_event("e1", "t@x.com", 2);
        event.participants.push("s1@x.com".to_string());
        seed_events(&store, &[event]).await;

        let response = register(&store, "s2@x.com", "e1").await.unwrap();
        assert_eq!(response.registered, 2);
        assert_eq!(response.spots_left, Some(0));

        let result = register(&store, "s3@x.com", "e1").await;
        assert_eq!(result.unwrap_err(), ServiceError::EventFull);

        let events: Vec<Event> = read_records(&store, keys::EVENTS).await;
        assert_eq!(events[0].participants, vec!["s1@x.com", "s2@x.com"]);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates_and_past_deadline() {
        let store = MemoryStore::new();
        let mut open = test_event("e1", "t@x.com", 0);
        open.participants.push("s1@x.com".to_string());
        let mut closed = test_event("e2", "t@x.com", 0);
        closed.deadline = Utc::now().date_naive() - Duration::days(1);
        seed_events(&store, &[open, closed]).await;

        let result = register(&store, "s1@x.com", "e1").await;
        assert_eq!(result.unwrap_err(), ServiceError::AlreadyRegistered);

        let result = register(&store, "s2@x.com", "e2").await;
        assert_eq!(result.unwrap_err(), ServiceError::DeadlinePassed);
    }

    #[tokio::test]
    async fn test_unlimited_event_never_fills() {
        let store = MemoryStore::new();
        seed_events(&store, &[test_event("e1", "t@x.com", 0)]).await;

        for i in 0..20 {
            register(&store, &format!("s{}@x.com", i), "e1")
                .await
                .unwrap();
        }

        let response = get(&store, "e1").await.unwrap();
        assert_eq!(response.registered, 20);
        assert_eq!(response.spots_left, None);
    }

    #[tokio::test]
    async fn test_list_by_teacher_filters_ownership() {
        let store = MemoryStore::new();
        seed_events(
            &store,
            &[
                test_event("e1", "a@x.com", 0),
                test_event("e2", "b@x.com", 0),
                test_event("e3", "a@x.com", 0),
            ],
        )
        .await;

        let mine = list_by_teacher(&store, "a@x.com").await;
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|e| e.teacher_email == "a@x.com"));

        assert_eq!(list(&store).await.len(), 3);
    }

    #[tokio::test]
    async fn test_registrations_for_student() {
        let store = MemoryStore::new();
        let mut e1 = test_event("e1", "t@x.com", 0);
        e1.participants.push("s1@x.com".to_string());
        let e2 = test_event("e2", "t@x.com", 0);
        seed_events(&store, &[e1, e2]).await;

        let mine = registrations_for(&store, "s1@x.com").await;
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "e1");
    }

    #[tokio::test]
    async fn test_roster_filters_dangling_participants() {
        let store = MemoryStore::new();
        let mut event = test_event("e1", "t@x.com", 0);
        event.participants.push("s1@x.com".to_string());
        event.participants.push("ghost@x.com".to_string());
        seed_events(&store, &[event]).await;

        write_records(&store, keys::USERS, &[test_user("s1@x.com", Role::Student)])
            .await
            .unwrap();

        let roster = roster(&store, "t@x.com", "e1").await.unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].email, "s1@x.com");
    }

    #[tokio::test]
    async fn test_update_patches_fields_and_guards_limit() {
        let store = MemoryStore::new();
        let mut event = test_event("e1", "t@x.com", 5);
        event.participants = vec!["s1@x.com".into(), "s2@x.com".into(), "s3@x.com".into()];
        seed_events(&store, &[event]).await;

        let patch = UpdateEventRequest {
            title: Some("Renamed".to_string()),
            description: None,
            category: None,
            poster: None,
            date: None,
            deadline: None,
            limit: Some(2),
        };
        let result = update(&store, "t@x.com", "e1", &patch).await;
        assert!(matches!(
            result.unwrap_err(),
            ServiceError::Validation { field: "limit", .. }
        ));

        let patch = UpdateEventRequest {
            title: Some("Renamed".to_string()),
            description: None,
            category: Some("sports".to_string()),
            poster: None,
            date: None,
            deadline: None,
            limit: None,
        };
        let updated = update(&store, "t@x.com", "e1", &patch).await.unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.category, "sports");
        assert_eq!(updated.registered, 3);
    }

    #[tokio::test]
    async fn test_create_validates_category_and_deadline() {
        let store = MemoryStore::new();
        let today = Utc::now().date_naive();

        let request = CreateEventRequest {
            title: "Hack Night".to_string(),
            description: "All welcome".to_string(),
            category: "party".to_string(),
            poster: None,
            date: today + Duration::days(5),
            deadline: today + Duration::days(2),
            limit: 0,
        };
        assert!(matches!(
            create(&store, "t@x.com", &request).await.unwrap_err(),
            ServiceError::Validation {
                field: "category",
                ..
            }
        ));

        let request = CreateEventRequest {
            title: "Hack Night".to_string(),
            description: "All welcome".to_string(),
            category: "workshop".to_string(),
            poster: None,
            date: today + Duration::days(2),
            deadline: today + Duration::days(5),
            limit: 0,
        };
        assert!(matches!(
            create(&store, "t@x.com", &request).await.unwrap_err(),
            ServiceError::Validation {
                field: "deadline",
                ..
            }
        ));

        assert!(list(&store).await.is_empty());
    }
}
