//! Records owned by the stores.
//!
//! `Complaint` doubles as the wire record returned by every complaint
//! endpoint; `User` never leaves the service as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registered account. Keyed by `secret_code` in the user store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub secret_code: String,
    pub name: String,
    pub email: String,
    /// IDs of submitted complaints, in submission order. Only ever appended to.
    pub complaints: Vec<String>,
    pub is_admin: bool,
}

impl User {
    /// Build a regular (non-admin) user with an empty complaint list.
    #[must_use]
    pub fn new(id: String, secret_code: String, name: String, email: String) -> Self {
        Self {
            id,
            secret_code,
            name,
            email,
            complaints: Vec::new(),
            is_admin: false,
        }
    }

    #[must_use]
    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintStatus {
    Pending,
    Resolved,
}

impl ComplaintStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Complaint {
    pub id: String,
    pub title: String,
    pub summary: String,
    /// Severity from 1 to 10.
    pub rating: i64,
    pub user_id: String,
    /// Owner's display name captured at submission time.
    pub user_name: String,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
    /// Set exactly when `status` is `resolved`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Complaint {
    /// Build a pending complaint owned by `owner`, stamped with the current time.
    #[must_use]
    pub fn pending(id: String, owner: &User, title: String, summary: String, rating: i64) -> Self {
        Self {
            id,
            title,
            summary,
            rating,
            user_id: owner.id.clone(),
            user_name: owner.name.clone(),
            status: ComplaintStatus::Pending,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.status == ComplaintStatus::Resolved
    }
}
