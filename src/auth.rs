use serde::{Deserialize, Serialize};

/// The caller's identity for one request. Passed explicitly into every
/// lifecycle operation instead of being read from ambient state, so the
/// workflow can be driven by fake sessions in tests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
}

/// Client-side view of the signed-in user, held in a leptos context signal
/// and filled in after sign-in resolves the profile (including the role).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub uid: String,
    pub email: String,
    pub role: Option<String>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }

    pub fn session(&self) -> Session {
        Session {
            user_id: self.uid.clone(),
            email: self.email.clone(),
        }
    }
}

#[cfg(feature = "ssr")]
mod ssr_impl {
    use super::Session;
    use actix_web::HttpRequest;

    /// Authentication itself is delegated to the identity provider in front
    /// of the app; it forwards the verified user on these headers. No headers
    /// means an anonymous caller.
    pub fn session_from_request(req: &HttpRequest) -> Option<Session> {
        let user_id = req
            .headers()
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())?
            .to_string();
        let email = req
            .headers()
            .get("x-user-email")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if user_id.is_empty() {
            return None;
        }
        Some(Session { user_id, email })
    }
}

#[cfg(feature = "ssr")]
pub use ssr_impl::session_from_request;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_user_admin_check() {
        let user = CurrentUser {
            uid: "u1".into(),
            email: "u1@test.edu".into(),
            role: Some("admin".into()),
        };
        assert!(user.is_admin());
        assert_eq!(user.session().user_id, "u1");

        let user = CurrentUser { role: None, ..user };
        assert!(!user.is_admin());
    }
}
