//! Service Module
//!
//! Cache-aside data service over the status API.
//!
//! # Operations
//! - `incidents` - Incident list, cached under the default TTL
//! - `service_status` - Status summary, cached for one minute
//! - `incidents_with_limit` - Front slice of a resolved list
//! - `incidents_stream` - Incidents one at a time, optionally capped
//! - `components_lazy` - Summary components one at a time

mod resource;
mod source;
mod status;

pub use resource::{
    shared_cache, Resource, SharedCache, INCIDENTS_KEY, SERVICE_STATUS_KEY, SERVICE_STATUS_TTL,
};
pub use source::StatusSource;
pub use status::StatusService;
