//! Account service contract and its in-memory mock.
//!
//! The demo surfaces only need a thin sign-in / sign-up / lookup contract;
//! [`AuthBackend`] captures it and [`MockAuthBackend`] implements it against
//! an in-memory user table.  Matching the product demo, sign-in accepts any
//! non-empty password for a known account and password hashes are fakes.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, ServiceError};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Subscription plan of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    /// Free tier with a limited automation quota.
    Free,
    /// Entry paid tier.
    Starter,
    /// Full-featured tier.
    Professional,
    /// Custom enterprise tier.
    Enterprise,
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Starter => write!(f, "starter"),
            Self::Professional => write!(f, "professional"),
            Self::Enterprise => write!(f, "enterprise"),
        }
    }
}

/// A user account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique account id.
    pub id: Uuid,
    /// Account email, unique across the backend.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Current subscription plan.
    pub plan: Plan,
    /// Number of automations the account has run.
    pub automations_used: u32,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

/// A successful sign-in or sign-up: the account plus a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The authenticated account.
    pub user: User,
    /// Opaque session token.
    pub token: String,
}

/// Stored account state; the password hash never leaves the backend.
#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// The account service seam the demo surfaces call through.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Authenticate an existing account.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResponse>;

    /// Create an account and sign it in.
    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<AuthResponse>;

    /// Trigger a password-reset flow for an existing account.
    async fn reset_password(&self, email: &str) -> Result<()>;

    /// Look up an account by email.
    async fn find_user(&self, email: &str) -> Result<Option<User>>;
}

// ---------------------------------------------------------------------------
// Mock implementation
// ---------------------------------------------------------------------------

/// In-memory [`AuthBackend`] used by the demo site; nothing persists across
/// sessions.
pub struct MockAuthBackend {
    users: RwLock<HashMap<String, StoredUser>>,
}

impl MockAuthBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Create a backend pre-seeded with the demo account
    /// (`demo@chatops.com`).
    pub async fn with_demo_user() -> Self {
        let backend = Self::new();
        {
            let mut users = backend.users.write().await;
            let user = User {
                id: Uuid::now_v7(),
                email: "demo@chatops.com".into(),
                full_name: "Demo User".into(),
                plan: Plan::Free,
                automations_used: 15,
                created_at: Utc::now(),
            };
            users.insert(
                user.email.clone(),
                StoredUser {
                    user,
                    password_hash: mock_hash(),
                },
            );
        }
        backend
    }

    /// Number of registered accounts.
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for MockAuthBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Produce a fake bcrypt-looking hash.  Real hashing is out of scope for
/// the mock backend.
fn mock_hash() -> String {
    format!("$2b$10${}", Uuid::now_v7().simple())
}

fn session_token() -> String {
    format!("token_{}", Uuid::now_v7().simple())
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let users = self.users.read().await;
        let stored = users.get(email).ok_or_else(|| ServiceError::UserNotFound {
            email: email.to_string(),
        })?;
        // The mock accepts any non-empty password for a known account.
        if password.is_empty() {
            return Err(ServiceError::InvalidCredentials {
                email: email.to_string(),
            });
        }
        info!(email, "user signed in");
        Ok(AuthResponse {
            user: stored.user.clone(),
            token: session_token(),
        })
    }

    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<AuthResponse> {
        if password.is_empty() {
            return Err(ServiceError::InvalidCredentials {
                email: email.to_string(),
            });
        }
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(ServiceError::UserAlreadyExists {
                email: email.to_string(),
            });
        }
        let user = User {
            id: Uuid::now_v7(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            plan: Plan::Free,
            automations_used: 0,
            created_at: Utc::now(),
        };
        users.insert(
            email.to_string(),
            StoredUser {
                user: user.clone(),
                password_hash: mock_hash(),
            },
        );
        info!(email, "user registered");
        Ok(AuthResponse {
            user,
            token: session_token(),
        })
    }

    async fn reset_password(&self, email: &str) -> Result<()> {
        let users = self.users.read().await;
        if !users.contains_key(email) {
            return Err(ServiceError::UserNotFound {
                email: email.to_string(),
            });
        }
        // A real backend would send a reset email here.
        debug!(email, "password reset email simulated");
        Ok(())
    }

    async fn find_user(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(email).map(|stored| stored.user.clone()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
