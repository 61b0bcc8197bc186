use crate::models::{Role, Session};
use crate::store::{keys, RecordStore};
use crate::utils::error::ServiceError;

/// Reads the active session from the two persisted scalars. Returns `None`
/// when either scalar is missing or the stored role does not parse.
pub async fn current_session(store: &dyn RecordStore) -> Option<Session> {
    let role = store.read_raw(keys::SESSION_ROLE).await?;
    let email = store.read_raw(keys::SESSION_EMAIL).await?;
    let role = role.parse::<Role>().ok()?;

    Some(Session { email, role })
}

/// Establishes the session. Called only by a successful login.
pub async fn set_session(
    store: &dyn RecordStore,
    email: &str,
    role: Role,
) -> Result<(), ServiceError> {
    store
        .write_raw(keys::SESSION_ROLE, role.to_string())
        .await?;
    store
        .write_raw(keys::SESSION_EMAIL, email.to_string())
        .await
}

/// Clears the session. Sessions have no expiry, only explicit logout.
pub async fn clear_session(store: &dyn RecordStore) -> Result<(), ServiceError> {
    store.remove_raw(keys::SESSION_ROLE).await?;
    store.remove_raw(keys::SESSION_EMAIL).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let store = MemoryStore::new();

        assert!(current_session(&store).await.is_none());

        set_session(&store, "ana@campus.edu", Role::Teacher)
            .await
            .unwrap();

        let session = current_session(&store).await.unwrap();
        assert_eq!(session.email, "ana@campus.edu");
        assert_eq!(session.role, Role::Teacher);

        clear_session(&store).await.unwrap();
        assert!(current_session(&store).await.is_none());
    }

    #[tokio::test]
    async fn test_garbage_role_scalar_is_no_session() {
        let store = MemoryStore::new();
        store
            .write_raw(keys::SESSION_ROLE, "admin".to_string())
            .await
            .unwrap();
        store
            .write_raw(keys::SESSION_EMAIL, "x@campus.edu".to_string())
            .await
            .unwrap();

        assert!(current_session(&store).await.is_none());
    }
}
