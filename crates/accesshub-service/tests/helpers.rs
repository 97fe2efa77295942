//! Shared wiring for service-level tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use accesshub_auth::password::{PasswordHasher, PasswordPolicy};
use accesshub_auth::tokens::TokenService;
use accesshub_core::config::auth::AuthConfig;
use accesshub_core::result::AppResult;
use accesshub_core::traits::ResetNotifier;
use accesshub_entity::permission::CreatePermission;
use accesshub_entity::role::{CreateRole, PermissionGrant};
use accesshub_entity::user::{CreateUser, User};
use accesshub_service::{AuthService, PermissionService, RoleService, UserService};
use accesshub_store::memory::{
    MemoryPermissionStore, MemoryRoleStore, MemoryTokenStore, MemoryUserStore,
};

/// Notifier that records every reset email instead of delivering it.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    /// All (email, token) pairs handed to the notifier so far.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// The token from the most recent send, if any.
    pub fn last_token(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, token)| token.clone())
    }
}

#[async_trait]
impl ResetNotifier for RecordingNotifier {
    async fn send_reset_password_email(&self, email: &str, token: &str) -> AppResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), token.to_string()));
        Ok(())
    }
}

/// Fully wired service stack over fresh in-memory stores.
pub struct TestApp {
    pub users: Arc<UserService>,
    pub permissions: PermissionService,
    pub roles: RoleService,
    pub auth: AuthService,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub fn new() -> Self {
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            ..AuthConfig::default()
        };

        let user_store = Arc::new(MemoryUserStore::new());
        let role_store = Arc::new(MemoryRoleStore::new());
        let permission_store = Arc::new(MemoryPermissionStore::new());
        let token_store = Arc::new(MemoryTokenStore::new());

        let hasher = Arc::new(PasswordHasher::new());
        let policy = Arc::new(PasswordPolicy::new(&config));
        let tokens = Arc::new(TokenService::new(&config, token_store));
        let notifier = Arc::new(RecordingNotifier::default());

        let users = Arc::new(UserService::new(
            user_store.clone(),
            role_store.clone(),
            hasher.clone(),
            policy,
        ));

        let auth = AuthService::new(
            user_store,
            role_store.clone(),
            tokens,
            hasher,
            users.clone(),
            notifier.clone(),
        );

        Self {
            users: users.clone(),
            permissions: PermissionService::new(permission_store),
            roles: RoleService::new(role_store),
            auth,
            notifier,
        }
    }

    /// Registers a user with the default test password `password1`.
    pub async fn register(&self, email: &str) -> User {
        self.users
            .create_user(CreateUser {
                given_name: "Test".to_string(),
                surname: Some("User".to_string()),
                email: email.to_string(),
                password: "password1".to_string(),
                phone_number: None,
                job_title: None,
                office_location: None,
                roles: vec![],
            })
            .await
            .expect("test user should register")
    }
}

/// A create-permission payload with all flags set.
pub fn permission_input(name: &str, key: &str) -> CreatePermission {
    CreatePermission {
        name: name.to_string(),
        key: key.to_string(),
        description: None,
        read: true,
        write: true,
        delete: true,
    }
}

/// A permission snapshot for embedding into roles.
pub fn grant(key: &str) -> PermissionGrant {
    PermissionGrant {
        name: key.to_uppercase(),
        key: key.to_string(),
        description: None,
        read: true,
        write: false,
        delete: false,
        is_active: true,
    }
}

/// A create-role payload with the given snapshots.
pub fn role_input(name: &str, permissions: Vec<PermissionGrant>) -> CreateRole {
    CreateRole {
        name: name.to_string(),
        description: None,
        permissions,
    }
}
