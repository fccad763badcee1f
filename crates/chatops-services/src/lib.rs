//! Mocked service collaborators for the ChatOps demo site.
//!
//! The demo surfaces talk to two simple request/response contracts:
//!
//! - **Accounts**: sign-in / sign-up / password reset / lookup by email,
//!   via [`auth::AuthBackend`].
//! - **Custom template requests**: structured intake with status tracking
//!   and aggregate stats, via [`templates::TemplateBackend`].
//!
//! Both ship with in-memory mock implementations; there is no real backend
//! and nothing persists across sessions.

pub mod auth;
pub mod error;
pub mod templates;

pub use auth::{AuthBackend, AuthResponse, MockAuthBackend, Plan, User};
pub use error::{Result, ServiceError};
pub use templates::{
    CustomTemplateRequest, MockTemplateBackend, NewTemplateRequest, RequestStatus, TemplateBackend,
};
