use chrono::Utc;

use crate::models::{Notification, Role, User};
use crate::services::auth_service::normalize_email;
use crate::store::{keys, read_records, write_records, RecordStore};
use crate::utils::error::ServiceError;

/// Appends a student's question to the teacher's inbox. The inbox is
/// append-only; nothing is ever removed from it.
pub async fn ask(
    store: &dyn RecordStore,
    sender_email: &str,
    teacher_email: &str,
    message: &str,
) -> Result<(), ServiceError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ServiceError::Validation {
            field: "message",
            message: "must not be empty".to_string(),
        });
    }

    let sender_email = normalize_email(sender_email);
    let teacher_email = normalize_email(teacher_email);
    let mut users: Vec<User> = read_records(store, keys::USERS).await;

    let sender_name = users
        .iter()
        .find(|u| u.email == sender_email)
        .map(|u| u.name.clone())
        .ok_or_else(|| ServiceError::NotFound(format!("User {}", sender_email)))?;

    let teacher = users
        .iter_mut()
        .find(|u| u.email == teacher_email && u.role == Role::Teacher)
        .ok_or_else(|| ServiceError::NotFound(format!("Teacher {}", teacher_email)))?;

    teacher.notifications.push(Notification {
        message: message.to_string(),
        sender_email,
        sender_name,
        sent_at: Utc::now(),
    });

    write_records(store, keys::USERS, &users).await?;

    log::info!("📨 Question sent to {}", teacher_email);

    Ok(())
}

/// The teacher's notifications, newest first.
pub async fn inbox(store: &dyn RecordStore, teacher_email: &str) -> Vec<Notification> {
    let teacher_email = normalize_email(teacher_email);
    let users: Vec<User> = read_records(store, keys::USERS).await;

    let mut notifications = users
        .into_iter()
        .find(|u| u.email == teacher_email)
        .map(|u| u.notifications)
        .unwrap_or_default();

    notifications.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
    notifications
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

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

    #[tokio::test]
    async fn test_ask_appends_to_teacher_inbox() {
        let store = MemoryStore::new();
        write_records(
            &store,
            keys::USERS,
            &[
                test_user("s@x.com", Role::Student),
                test_user("t@x.com", Role::Teacher),
            ],
        )
        .await
        .unwrap();

        ask(&store, "s@x.com", "t@x.com", "When is the exam?")
            .await
            .unwrap();
        ask(&store, "s@x.com", "t@x.com", "Is attendance mandatory?")
            .await
            .unwrap();

        let inbox = inbox(&store, "t@x.com").await;
        assert_eq!(inbox.len(), 2);
        // Newest first
        assert_eq!(inbox[0].message, "Is attendance mandatory?");
        assert_eq!(inbox[1].sender_email, "s@x.com");
        assert_eq!(inbox[1].sender_name, "User s@x.com");
    }

    #[tokio::test]
    async fn test_ask_unknown_or_non_teacher_recipient() {
        let store = MemoryStore::new();
        write_records(
            &store,
            keys::USERS,
            &[
                test_user("s@x.com", Role::Student),
                test_user("other-student@x.com", Role::Student),
            ],
        )
        .await
        .unwrap();

        let result = ask(&store, "s@x.com", "ghost@x.com", "Hello?").await;
        assert!(matches!(result.unwrap_err(), ServiceError::NotFound(_)));

        // A student is not a valid recipient
        let result = ask(&store, "s@x.com", "other-student@x.com", "Hello?").await;
        assert!(matches!(result.unwrap_err(), ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_ask_rejects_empty_message() {
        let store = MemoryStore::new();
        let result = ask(&store, "s@x.com", "t@x.com", "   ").await;
        assert!(matches!(
            result.unwrap_err(),
            ServiceError::Validation {
                field: "message",
                ..
            }
        ));
    }
}
