use serde::{Deserialize, Serialize};

/// Seconds before `expires_at` at which a session is already treated as expired
const EXPIRY_MARGIN_SECONDS: i64 = 10;

/// Identity attached to a session by the auth service
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Session issued by the auth service (token grant response)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Fill `expires_at` from `expires_in` when the grant response omitted it
    pub fn stamped(mut self, now: i64) -> Self {
        if self.expires_at.is_none() && self.expires_in > 0 {
            self.expires_at = Some(now + self.expires_in);
        }
        self
    }

    pub fn is_expired(&self, now: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at - EXPIRY_MARGIN_SECONDS <= now,
            None => false,
        }
    }
}

/// Kind of session change pushed by the auth client
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// Session-change notification
#[derive(Clone, PartialEq, Debug)]
pub struct AuthChange {
    pub event: AuthEvent,
    pub session: Option<Session>,
}

impl AuthChange {
    pub fn new(event: AuthEvent, session: Option<Session>) -> Self {
        Self { event, session }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(expires_at: Option<i64>) -> Session {
        Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 3600,
            expires_at,
            user: AuthUser { id: "u-1".to_string(), email: None },
        }
    }

    #[test]
    fn test_stamped_fills_missing_expiry() {
        let session = grant(None).stamped(1_000);
        assert_eq!(session.expires_at, Some(4_600));

        let session = grant(Some(50)).stamped(1_000);
        assert_eq!(session.expires_at, Some(50));
    }

    #[test]
    fn test_expiry_uses_margin() {
        let session = grant(Some(1_000));
        assert!(!session.is_expired(980));
        assert!(session.is_expired(990));
        assert!(!grant(None).is_expired(i64::MAX));
    }

    #[test]
    fn test_parses_token_grant_response() {
        let session: Session = serde_json::from_str(
            r#"{"access_token":"a","token_type":"bearer","expires_in":3600,
                "expires_at":1700000000,"refresh_token":"r",
                "user":{"id":"8b1c","aud":"authenticated","email":"staff@example.com"}}"#,
        )
        .unwrap();

        assert_eq!(session.user.id, "8b1c");
        assert_eq!(session.user.email.as_deref(), Some("staff@example.com"));
        assert_eq!(session.expires_at, Some(1_700_000_000));
    }
}
