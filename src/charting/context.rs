use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The acting user of a charting call, recorded on every audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessContext {
    pub user_id: Uuid,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl AccessContext {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            session_id: None,
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}
