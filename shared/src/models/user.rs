//! User Model

use serde::{Deserialize, Serialize};

/// User role; gates the admin-only screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// Authenticated user profile, as returned by `/auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub tel: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
    }

    #[test]
    fn user_parses_mongo_id() {
        let json = r#"{
            "_id": "6601f0a1",
            "name": "Alice",
            "email": "alice@example.com",
            "tel": "0812345678",
            "role": "admin"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "6601f0a1");
        assert!(user.is_admin());
    }
}
