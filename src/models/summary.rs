//! Status summary payloads
//!
//! Shapes returned by the summary endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ImpactLevel, Incident, IncidentComponent, IncidentUpdate, StatusPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Operational,
    DegradedPerformance,
    PartialOutage,
    MajorOutage,
    UnderMaintenance,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Verifying,
    Completed,
    #[serde(other)]
    Unknown,
}

/// A service component listed on the status page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    pub status: ComponentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub position: i64,
    pub description: Option<String>,
    #[serde(default)]
    pub showcase: bool,
    pub start_date: Option<String>,
    pub group_id: Option<String>,
    pub page_id: String,
    #[serde(default)]
    pub group: bool,
    #[serde(default)]
    pub only_show_if_degraded: bool,
}

impl Component {
    pub fn is_degraded(&self) -> bool {
        !matches!(
            self.status,
            ComponentStatus::Operational | ComponentStatus::UnderMaintenance
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMaintenance {
    pub id: String,
    pub name: String,
    pub status: MaintenanceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub monitoring_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub impact: ImpactLevel,
    pub shortlink: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub page_id: String,
    #[serde(default)]
    pub incident_updates: Vec<IncidentUpdate>,
    #[serde(default)]
    pub components: Vec<IncidentComponent>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub scheduled_until: Option<DateTime<Utc>>,
}

/// Page-wide status: a single indicator plus its description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusIndicator {
    pub indicator: ImpactLevel,
    pub description: String,
}

/// Full summary: components, active incidents, maintenances and indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub page: StatusPage,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub incidents: Vec<Incident>,
    #[serde(default)]
    pub scheduled_maintenances: Vec<ScheduledMaintenance>,
    pub status: StatusIndicator,
}

impl StatusSummary {
    /// True when the indicator is `none` and no component is degraded.
    pub fn is_all_operational(&self) -> bool {
        self.status.indicator == ImpactLevel::None
            && !self.components.iter().any(Component::is_degraded)
    }
}
