//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user in the AccessHub system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Given (first) name.
    pub given_name: String,
    /// Surname (optional).
    pub surname: Option<String>,
    /// Email address. Globally unique, compared case-insensitively.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Job title.
    pub job_title: Option<String>,
    /// Office location.
    pub office_location: Option<String>,
    /// Assigned role IDs (references, not embedded).
    pub roles: Vec<Uuid>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check whether the user already holds the given role reference.
    pub fn has_role(&self, role_id: Uuid) -> bool {
        self.roles.contains(&role_id)
    }

    /// Check whether this user's email matches the given address,
    /// ignoring case.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}

/// Data required to create a new user.
///
/// Carries the plaintext password; it is hashed by the service layer before
/// the user document is stored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    /// Given (first) name.
    pub given_name: String,
    /// Surname (optional).
    pub surname: Option<String>,
    /// Email address.
    pub email: String,
    /// Plaintext password, validated and hashed before storage.
    pub password: String,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Job title.
    pub job_title: Option<String>,
    /// Office location.
    pub office_location: Option<String>,
    /// Initial role IDs.
    #[serde(default)]
    pub roles: Vec<Uuid>,
}

/// Data for updating an existing user's profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    /// New given name.
    pub given_name: Option<String>,
    /// New surname.
    pub surname: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New job title.
    pub job_title: Option<String>,
    /// New office location.
    pub office_location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            given_name: "John".to_string(),
            surname: Some("Doe".to_string()),
            email: "John.Doe@example.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            phone_number: Some("9876543211".to_string()),
            job_title: None,
            office_location: None,
            roles: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = sample_user();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "John.Doe@example.com");
    }

    #[test]
    fn test_email_matches_ignores_case() {
        let user = sample_user();
        assert!(user.email_matches("john.doe@EXAMPLE.com"));
        assert!(!user.email_matches("jane.doe@example.com"));
    }
}
