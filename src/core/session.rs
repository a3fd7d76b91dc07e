use serde::{Deserialize, Serialize};

/// Caller identity stamped onto submissions.
///
/// Passed explicitly into payload builders and backend calls; nothing in the
/// crate reads session data from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub company_id: i64,
    pub user_id: i64,
    /// Bearer token forwarded to the ERP backend, never serialized
    #[serde(skip)]
    pub access_token: Option<String>,
}

impl SessionContext {
    pub fn new(company_id: i64, user_id: i64) -> Self {
        Self {
            company_id,
            user_id,
            access_token: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}
