use serde::{Deserialize, Serialize};

use crate::models::Role;

/// The currently authenticated actor, derived from the two persisted session
/// scalars. Injected into request extensions by the session guard.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Session {
    pub email: String,
    pub role: Role,
}
