use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;

use crate::models::{LoginRequest, SignupRequest, UpdateProfileRequest, User, UserInfo};
use crate::services::session_service;
use crate::store::{keys, read_records, write_records, RecordStore};
use crate::utils::error::ServiceError;

const MIN_PASSWORD_LEN: usize = 6;

/// Emails are matched case-insensitively; the normalized form is what gets
/// stored and compared everywhere.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

fn validate_email(email: &str) -> Result<(), ServiceError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ServiceError::Validation {
            field: "email",
            message: "must be a valid email address".to_string(),
        })
    }
}

fn validate_signup(request: &SignupRequest) -> Result<(), ServiceError> {
    if request.name.trim().is_empty() {
        return Err(ServiceError::Validation {
            field: "name",
            message: "must not be empty".to_string(),
        });
    }

    validate_email(&normalize_email(&request.email))?;

    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(ServiceError::Validation {
            field: "password",
            message: format!("must be at least {} characters", MIN_PASSWORD_LEN),
        });
    }

    Ok(())
}

/// User registration. Rejects emails that are already taken and stores the
/// password as a salted bcrypt hash.
pub async fn signup(
    store: &dyn RecordStore,
    request: &SignupRequest,
) -> Result<UserInfo, ServiceError> {
    validate_signup(request)?;

    let email = normalize_email(&request.email);
    let mut users: Vec<User> = read_records(store, keys::USERS).await;

    if users.iter().any(|u| u.email == email) {
        return Err(ServiceError::EmailTaken);
    }

    let password_hash = hash(&request.password, DEFAULT_COST)
        .map_err(|e| ServiceError::Store(format!("Failed to hash password: {}", e)))?;

    let new_user = User {
        name: request.name.trim().to_string(),
        email,
        password_hash,
        role: request.role,
        photo: None,
        bio: None,
        notifications: Vec::new(),
        created_at: Utc::now(),
    };

    let info = UserInfo::from(new_user.clone());
    users.push(new_user);
    write_records(store, keys::USERS, &users).await?;

    log::info!("✅ User registered: {} ({})", info.email, info.role);

    Ok(info)
}

/// User login. Verifies the credentials first; a role mismatch is only
/// reported to a caller who holds valid credentials, carrying the stored
/// role so it can be displayed. Success establishes the session.
pub async fn login(
    store: &dyn RecordStore,
    request: &LoginRequest,
) -> Result<UserInfo, ServiceError> {
    let email = normalize_email(&request.email);
    let users: Vec<User> = read_records(store, keys::USERS).await;

    let user = users
        .iter()
        .find(|u| u.email == email)
        .ok_or(ServiceError::InvalidCredentials)?;

    let valid = verify(&request.password, &user.password_hash)
        .map_err(|e| ServiceError::Store(format!("Password verification error: {}", e)))?;

    if !valid {
        return Err(ServiceError::InvalidCredentials);
    }

    if request.role != user.role {
        return Err(ServiceError::RoleMismatch { actual: user.role });
    }

    session_service::set_session(store, &user.email, user.role).await?;

    Ok(UserInfo::from(user.clone()))
}

/// Clears the active session.
pub async fn logout(store: &dyn RecordStore) -> Result<(), ServiceError> {
    session_service::clear_session(store).await
}

pub async fn get_profile(store: &dyn RecordStore, email: &str) -> Result<UserInfo, ServiceError> {
    let users: Vec<User> = read_records(store, keys::USERS).await;

    users
        .into_iter()
        .find(|u| u.email == normalize_email(email))
        .map(UserInfo::from)
        .ok_or_else(|| ServiceError::NotFound(format!("User {}", email)))
}

/// Edits mutable profile fields. Email and role are fixed at signup.
pub async fn update_profile(
    store: &dyn RecordStore,
    email: &str,
    request: &UpdateProfileRequest,
) -> Result<UserInfo, ServiceError> {
    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Err(ServiceError::Validation {
                field: "name",
                message: "must not be empty".to_string(),
            });
        }
    }

    let email = normalize_email(email);
    let mut users: Vec<User> = read_records(store, keys::USERS).await;

    let user = users
        .iter_mut()
        .find(|u| u.email == email)
        .ok_or_else(|| ServiceError::NotFound(format!("User {}", email)))?;

    if let Some(name) = &request.name {
        user.name = name.trim().to_string();
    }
    if let Some(photo) = &request.photo {
        user.photo = Some(photo.clone());
    }
    if let Some(bio) = &request.bio {
        user.bio = Some(bio.clone());
    }

    let info = UserInfo::from(user.clone());
    write_records(store, keys::USERS, &users).await?;

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::store::MemoryStore;

    fn signup_request(email: &str, role: Role) -> SignupRequest {
        SignupRequest {
            name: "Test User".to_string(),
            email: email.to_string(),
            password: "pw123456".to_string(),
            role,
        }
    }

    fn login_request(email: &str, password: &str, role: Role) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_signup_rejects_taken_email_and_leaves_collection_unchanged() {
        let store = MemoryStore::new();

        signup(&store, &signup_request("a@x.com", Role::Student))
            .await
            .unwrap();

        let result = signup(&store, &signup_request("a@x.com", Role::Teacher)).await;
        assert_eq!(result.unwrap_err(), ServiceError::EmailTaken);

        let users: Vec<User> = read_records(&store, keys::USERS).await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, Role::Student);
    }

    #[tokio::test]
    async fn test_email_uniqueness_is_case_insensitive() {
        let store = MemoryStore::new();

        signup(&store, &signup_request("Ana@Campus.Edu", Role::Student))
            .await
            .unwrap();

        let result = signup(&store, &signup_request("ana@campus.edu", Role::Student)).await;
        assert_eq!(result.unwrap_err(), ServiceError::EmailTaken);
    }

    #[tokio::test]
    async fn test_login_role_mismatch_reports_actual_role_and_no_session() {
        let store = MemoryStore::new();

        signup(&store, &signup_request("a@x.com", Role::Student))
            .await
            .unwrap();

        let result = login(&store, &login_request("a@x.com", "pw123456", Role::Teacher)).await;
        assert_eq!(
            result.unwrap_err(),
            ServiceError::RoleMismatch {
                actual: Role::Student
            }
        );
        assert!(session_service::current_session(&store).await.is_none());

        // Same credentials with the right role succeed and set the session
        let info = login(&store, &login_request("a@x.com", "pw123456", Role::Student))
            .await
            .unwrap();
        assert_eq!(info.email, "a@x.com");

        let session = session_service::current_session(&store).await.unwrap();
        assert_eq!(session.email, "a@x.com");
        assert_eq!(session.role, Role::Student);
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_invalid_credentials() {
        let store = MemoryStore::new();

        signup(&store, &signup_request("a@x.com", Role::Student))
            .await
            .unwrap();

        let result = login(&store, &login_request("a@x.com", "wrong-pw", Role::Student)).await;
        assert_eq!(result.unwrap_err(), ServiceError::InvalidCredentials);

        let result = login(&store, &login_request("ghost@x.com", "pw123456", Role::Student)).await;
        assert_eq!(result.unwrap_err(), ServiceError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_login_matches_email_case_insensitively() {
        let store = MemoryStore::new();

        signup(&store, &signup_request("ana@campus.edu", Role::Teacher))
            .await
            .unwrap();

        let info = login(
            &store,
            &login_request("ANA@campus.edu", "pw123456", Role::Teacher),
        )
        .await
        .unwrap();
        assert_eq!(info.email, "ana@campus.edu");
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let store = MemoryStore::new();

        let mut bad_name = signup_request("a@x.com", Role::Student);
        bad_name.name = "   ".to_string();
        assert!(matches!(
            signup(&store, &bad_name).await.unwrap_err(),
            ServiceError::Validation { field: "name", .. }
        ));

        let bad_email = signup_request("not-an-email", Role::Student);
        assert!(matches!(
            signup(&store, &bad_email).await.unwrap_err(),
            ServiceError::Validation { field: "email", .. }
        ));

        let mut short_pw = signup_request("a@x.com", Role::Student);
        short_pw.password = "pw".to_string();
        assert!(matches!(
            signup(&store, &short_pw).await.unwrap_err(),
            ServiceError::Validation {
                field: "password",
                ..
            }
        ));

        let users: Vec<User> = read_records(&store, keys::USERS).await;
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn test_update_profile_edits_only_mutable_fields() {
        let store = MemoryStore::new();

        signup(&store, &signup_request("a@x.com", Role::Student))
            .await
            .unwrap();

        let info = update_profile(
            &store,
            "a@x.com",
            &UpdateProfileRequest {
                name: Some("New Name".to_string()),
                photo: Some("photos/a.png".to_string()),
                bio: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(info.name, "New Name");
        assert_eq!(info.photo.as_deref(), Some("photos/a.png"));
        assert_eq!(info.role, Role::Student);
        assert_eq!(info.email, "a@x.com");
    }
}
