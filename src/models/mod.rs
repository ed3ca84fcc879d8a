//! Domain models for the status API
//!
//! Immutable payloads decoded from the upstream JSON endpoints.

pub mod incident;
pub mod summary;

// Re-export commonly used types
pub use incident::{
    ImpactLevel, Incident, IncidentComponent, IncidentStatus, IncidentUpdate, IncidentsResponse,
    StatusPage,
};
pub use summary::{
    Component, ComponentStatus, MaintenanceStatus, ScheduledMaintenance, StatusIndicator,
    StatusSummary,
};
