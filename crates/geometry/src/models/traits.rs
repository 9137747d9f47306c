//! Boundary traits toward the external data store.
//!
//! The engine never talks to storage itself. Callers implement these to
//! feed stop candidates in and hand saved routes back out.

use crate::identifiers::CompanyIdentifier;
use crate::models::types::*;

/// Read side: stops visible to one company
pub trait StopSource: Send + Sync {
    /// All stop candidates a company may attach to its routes
    fn stops_for(&self, company: &CompanyIdentifier) -> Vec<StopCandidate>;
}

/// Write side: accepts routes once a drawing session is saved
pub trait RouteSink: Send + Sync {
    fn persist_route(&self, route: &SavedRoute) -> Result<()>;
}
