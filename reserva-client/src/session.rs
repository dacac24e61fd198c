//! Session context
//!
//! In-memory holder of the authenticated user and bearer token for the
//! lifetime of the process. There is no ambient global: the context is
//! constructed at bootstrap and passed explicitly into every screen, and
//! the HTTP client reads the token from it per request.

use std::sync::{Arc, RwLock};

use shared::User;

#[derive(Debug, Default)]
struct SessionData {
    token: Option<String>,
    user: Option<User>,
}

/// Shared session handle; cheap to clone, safe to read from spawned tasks
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionData>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bearer token if available.
    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        self.write().token = Some(token.into());
    }

    /// Returns the current user profile if available.
    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn set_user(&self, user: User) {
        self.write().user = Some(user);
    }

    /// Sets the token and user after a successful login.
    pub fn set_login(&self, token: impl Into<String>, user: User) {
        let mut data = self.write();
        data.token = Some(token.into());
        data.user = Some(user);
    }

    /// Clears the session on logout.
    pub fn clear(&self) {
        let mut data = self.write();
        data.token = None;
        data.user = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.read().user.as_ref().is_some_and(User::is_admin)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SessionData> {
        self.inner.read().expect("session lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SessionData> {
        self.inner.write().expect("session lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Role;

    fn user(role: Role) -> User {
        User {
            id: "u1".into(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
            tel: "0812345678".into(),
            role,
        }
    }

    #[test]
    fn set_login_and_clear() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());

        session.set_login("t1", user(Role::User));
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("t1"));
        assert!(!session.is_admin());

        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn admin_role_is_visible_through_the_handle() {
        let session = Session::new();
        session.set_user(user(Role::Admin));
        assert!(session.is_admin());

        // Clones observe the same state.
        let other = session.clone();
        other.clear();
        assert!(!session.is_admin());
    }
}
