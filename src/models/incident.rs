//! Incident payloads
//!
//! Shapes returned by the incidents endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an incident or one of its updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Investigating,
    Identified,
    Monitoring,
    Resolved,
    Postmortem,
    #[serde(other)]
    Unknown,
}

/// Impact level, also used as the page-wide status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    None,
    Minor,
    Major,
    Critical,
    #[serde(other)]
    Unknown,
}

/// Component reference embedded in incidents and updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentComponent {
    pub id: String,
    pub name: String,
    pub status: crate::models::ComponentStatus,
}

/// A status change or progress note on an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentUpdate {
    pub id: String,
    pub status: IncidentStatus,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub display_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub affected_components: Vec<IncidentComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub name: String,
    pub status: IncidentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub monitoring_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub impact: ImpactLevel,
    pub shortlink: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub page_id: String,
    /// Newest first, as served upstream
    #[serde(default)]
    pub incident_updates: Vec<IncidentUpdate>,
    #[serde(default)]
    pub components: Vec<IncidentComponent>,
}

impl Incident {
    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
            || matches!(
                self.status,
                IncidentStatus::Resolved | IncidentStatus::Postmortem
            )
    }

    /// Most recent update, if any.
    pub fn latest_update(&self) -> Option<&IncidentUpdate> {
        self.incident_updates.first()
    }
}

/// Metadata about the status page itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPage {
    pub id: String,
    pub name: String,
    pub url: String,
    pub time_zone: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Envelope of the incidents endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentsResponse {
    pub page: StatusPage,
    pub incidents: Vec<Incident>,
}
