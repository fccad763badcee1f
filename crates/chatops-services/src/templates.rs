//! Custom template request service and its in-memory mock.
//!
//! Businesses that don't fit a builtin template submit a structured request
//! describing their processes and automation needs.  [`TemplateBackend`] is
//! the submission/lookup contract; [`MockTemplateBackend`] keeps requests in
//! memory and aggregates simple intake statistics.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::error::{Result, ServiceError};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Processing state of a custom template request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Submitted, not yet looked at.
    Pending,
    /// Under review by the templates team.
    Reviewing,
    /// Being built.
    InProgress,
    /// Delivered.
    Completed,
    /// Withdrawn or rejected.
    Cancelled,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Reviewing => write!(f, "reviewing"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// The fields a business fills in when requesting a custom template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTemplateRequest {
    /// Business name.
    pub business_name: String,
    /// Industry ("Beauty & Wellness", "Healthcare", ...).
    pub industry: String,
    /// Contact person.
    pub contact_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Company size bracket ("1-5", "6-20", ...).
    pub business_size: String,
    /// Free-text description of current manual processes.
    pub current_processes: String,
    /// Which automations the business wants ("booking", "invoicing", ...).
    pub automation_needs: Vec<String>,
    /// Desired delivery timeline.
    pub timeline: String,
    /// Anything else.
    pub additional_info: String,
}

/// A stored custom template request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomTemplateRequest {
    /// Unique request id.
    pub id: Uuid,
    /// The submitted fields.
    #[serde(flatten)]
    pub request: NewTemplateRequest,
    /// Current processing state.
    pub status: RequestStatus,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Team member the request is assigned to, once triaged.
    pub assigned_to: Option<String>,
    /// Estimated delivery time, once scheduled.
    pub estimated_completion: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// The custom-template service seam.
#[async_trait]
pub trait TemplateBackend: Send + Sync {
    /// Submit a new request.  It enters the queue as [`RequestStatus::Pending`].
    async fn submit(&self, request: NewTemplateRequest) -> Result<CustomTemplateRequest>;

    /// All requests, in submission order.
    async fn list(&self) -> Result<Vec<CustomTemplateRequest>>;

    /// Fetch one request by id.
    async fn get(&self, id: Uuid) -> Result<CustomTemplateRequest>;

    /// Move a request to a new processing state.
    async fn update_status(&self, id: Uuid, status: RequestStatus) -> Result<CustomTemplateRequest>;

    /// Delete a request.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Request counts per industry.
    async fn industry_stats(&self) -> Result<HashMap<String, usize>>;

    /// Request counts per requested automation need.
    async fn automation_needs_stats(&self) -> Result<HashMap<String, usize>>;
}

// ---------------------------------------------------------------------------
// Mock implementation
// ---------------------------------------------------------------------------

/// In-memory [`TemplateBackend`]; nothing persists across sessions.
pub struct MockTemplateBackend {
    requests: RwLock<Vec<CustomTemplateRequest>>,
}

impl MockTemplateBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self {
            requests: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MockTemplateBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(request: &NewTemplateRequest) -> Result<()> {
    if request.business_name.trim().is_empty() {
        return Err(ServiceError::InvalidRequest {
            reason: "business name is required".into(),
        });
    }
    if request.email.trim().is_empty() {
        return Err(ServiceError::InvalidRequest {
            reason: "contact email is required".into(),
        });
    }
    Ok(())
}

#[async_trait]
impl TemplateBackend for MockTemplateBackend {
    async fn submit(&self, request: NewTemplateRequest) -> Result<CustomTemplateRequest> {
        validate(&request)?;
        let stored = CustomTemplateRequest {
            id: Uuid::now_v7(),
            request,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            assigned_to: None,
            estimated_completion: None,
        };
        info!(
            id = %stored.id,
            business = %stored.request.business_name,
            industry = %stored.request.industry,
            "custom template request submitted"
        );
        let mut requests = self.requests.write().await;
        requests.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<CustomTemplateRequest>> {
        Ok(self.requests.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<CustomTemplateRequest> {
        let requests = self.requests.read().await;
        requests
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(ServiceError::RequestNotFound { id })
    }

    async fn update_status(&self, id: Uuid, status: RequestStatus) -> Result<CustomTemplateRequest> {
        let mut requests = self.requests.write().await;
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ServiceError::RequestNotFound { id })?;
        request.status = status;
        info!(id = %id, status = %status, "template request status updated");
        Ok(request.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut requests = self.requests.write().await;
        let before = requests.len();
        requests.retain(|r| r.id != id);
        if requests.len() == before {
            return Err(ServiceError::RequestNotFound { id });
        }
        Ok(())
    }

    async fn industry_stats(&self) -> Result<HashMap<String, usize>> {
        let requests = self.requests.read().await;
        let mut stats = HashMap::new();
        for request in requests.iter() {
            *stats.entry(request.request.industry.clone()).or_insert(0) += 1;
        }
        Ok(stats)
    }

    async fn automation_needs_stats(&self) -> Result<HashMap<String, usize>> {
        let requests = self.requests.read().await;
        let mut stats = HashMap::new();
        for request in requests.iter() {
            for need in &request.request.automation_needs {
                *stats.entry(need.clone()).or_insert(0) += 1;
            }
        }
        Ok(stats)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request(business: &str, industry: &str, needs: &[&str]) -> NewTemplateRequest {
        NewTemplateRequest {
            business_name: business.into(),
            industry: industry.into(),
            contact_name: "Jamie Doe".into(),
            email: "jamie@example.test".into(),
            phone: "+1 555 0100".into(),
            business_size: "1-5".into(),
            current_processes: "Phone bookings in a paper calendar".into(),
            automation_needs: needs.iter().map(|n| n.to_string()).collect(),
            timeline: "1-2 months".into(),
            additional_info: String::new(),
        }
    }

    #[tokio::test]
    async fn submit_stores_pending_request() {
        let backend = MockTemplateBackend::new();
        let stored = backend
            .submit(sample_request("Glow Salon", "Beauty & Wellness", &["booking"]))
            .await
            .unwrap();
        assert_eq!(stored.status, RequestStatus::Pending);
        assert!(stored.assigned_to.is_none());

        let fetched = backend.get(stored.id).await.unwrap();
        assert_eq!(fetched.request.business_name, "Glow Salon");
    }

    #[tokio::test]
    async fn submit_requires_business_name_and_email() {
        let backend = MockTemplateBackend::new();
        let mut request = sample_request("", "Healthcare", &[]);
        assert!(backend.submit(request.clone()).await.is_err());

        request.business_name = "City Clinic".into();
        request.email = " ".into();
        assert!(backend.submit(request).await.is_err());
        assert!(backend.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_updates_are_visible() {
        let backend = MockTemplateBackend::new();
        let stored = backend
            .submit(sample_request("Glow Salon", "Beauty & Wellness", &[]))
            .await
            .unwrap();

        let updated = backend
            .update_status(stored.id, RequestStatus::Reviewing)
            .await
            .unwrap();
        assert_eq!(updated.status, RequestStatus::Reviewing);
        assert_eq!(
            backend.get(stored.id).await.unwrap().status,
            RequestStatus::Reviewing
        );
    }

    #[tokio::test]
    async fn unknown_ids_error() {
        let backend = MockTemplateBackend::new();
        let id = Uuid::now_v7();
        assert!(matches!(
            backend.get(id).await,
            Err(ServiceError::RequestNotFound { .. })
        ));
        assert!(backend.update_status(id, RequestStatus::Cancelled).await.is_err());
        assert!(backend.delete(id).await.is_err());
    }

    #[tokio::test]
    async fn delete_removes_request() {
        let backend = MockTemplateBackend::new();
        let stored = backend
            .submit(sample_request("Glow Salon", "Beauty & Wellness", &[]))
            .await
            .unwrap();
        backend.delete(stored.id).await.unwrap();
        assert!(backend.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stats_aggregate_industries_and_needs() {
        let backend = MockTemplateBackend::new();
        backend
            .submit(sample_request("Glow Salon", "Beauty & Wellness", &["booking", "invoicing"]))
            .await
            .unwrap();
        backend
            .submit(sample_request("City Clinic", "Healthcare", &["booking"]))
            .await
            .unwrap();
        backend
            .submit(sample_request("Shine Cars", "Automotive", &["loyalty"]))
            .await
            .unwrap();

        let industries = backend.industry_stats().await.unwrap();
        assert_eq!(industries.get("Healthcare"), Some(&1));
        assert_eq!(industries.len(), 3);

        let needs = backend.automation_needs_stats().await.unwrap();
        assert_eq!(needs.get("booking"), Some(&2));
        assert_eq!(needs.get("invoicing"), Some(&1));
        assert_eq!(needs.get("loyalty"), Some(&1));
    }

    #[tokio::test]
    async fn list_preserves_submission_order() {
        let backend = MockTemplateBackend::new();
        for name in ["First", "Second", "Third"] {
            backend
                .submit(sample_request(name, "Other", &[]))
                .await
                .unwrap();
        }
        let names: Vec<String> = backend
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.request.business_name)
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }
}
