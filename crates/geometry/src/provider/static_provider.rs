//! In-memory stop provider.
//!
//! Holds every company's stops in memory, keyed by company. Useful for tests,
//! tools, and callers that fetch stops in bulk before a drawing session.

use std::collections::HashMap;
use std::sync::Arc;

use crate::identifiers::*;
use crate::models::{traits::StopSource, types::StopCandidate};

/// In-memory stop catalogue grouped by company
///
/// This type is cheap to clone since all data is stored in `Arc`s.
#[derive(Clone, Debug, Default)]
pub struct StaticStopProvider {
    stops: HashMap<CompanyIdentifier, Arc<[StopCandidate]>>,
}

impl StaticStopProvider {
    /// Create a new empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Build provider from (company, stop) pairs, keeping per-company order
    pub fn from_data(stops: impl IntoIterator<Item = (CompanyIdentifier, StopCandidate)>) -> Self {
        let mut grouped: HashMap<CompanyIdentifier, Vec<StopCandidate>> = HashMap::new();
        for (company, stop) in stops {
            grouped.entry(company).or_default().push(stop);
        }

        Self {
            stops: grouped
                .into_iter()
                .map(|(company, stops)| (company, Arc::from(stops)))
                .collect(),
        }
    }

    pub fn companies(&self) -> impl Iterator<Item = &CompanyIdentifier> {
        self.stops.keys()
    }

    pub fn get_stop(
        &self,
        company: &CompanyIdentifier,
        id: &StopIdentifier,
    ) -> Option<&StopCandidate> {
        self.stops.get(company)?.iter().find(|s| &s.id == id)
    }
}

impl StopSource for StaticStopProvider {
    fn stops_for(&self, company: &CompanyIdentifier) -> Vec<StopCandidate> {
        self.stops
            .get(company)
            .map(|stops| stops.to_vec())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::GeoPoint;

    fn provider() -> StaticStopProvider {
        let tacna = CompanyIdentifier::new("tacna-express");
        let arica = CompanyIdentifier::new("arica-bus");

        StaticStopProvider::from_data([
            (
                tacna.clone(),
                StopCandidate::new("plaza", "Plaza de Armas", GeoPoint::new(-70.2486, -18.0146)),
            ),
            (
                arica,
                StopCandidate::new("morro", "El Morro", GeoPoint::new(-70.3232, -18.4800)),
            ),
            (
                tacna,
                StopCandidate::new("terminal", "Terminal", GeoPoint::new(-70.2400, -18.0000)),
            ),
        ])
    }

    #[test]
    fn test_empty_provider() {
        let provider = StaticStopProvider::new();
        assert!(provider.stops_for(&CompanyIdentifier::new("nobody")).is_empty());
        assert_eq!(provider.companies().count(), 0);
    }

    #[test]
    fn test_stops_are_scoped_by_company() {
        let provider = provider();

        let tacna: Vec<String> = provider
            .stops_for(&CompanyIdentifier::new("tacna-express"))
            .into_iter()
            .map(|s| s.id.to_string())
            .collect();
        assert_eq!(tacna, vec!["plaza", "terminal"]);

        assert_eq!(provider.stops_for(&CompanyIdentifier::new("arica-bus")).len(), 1);
        assert_eq!(provider.companies().count(), 2);
    }

    #[test]
    fn test_get_stop() {
        let provider = provider();
        let company = CompanyIdentifier::new("tacna-express");

        assert!(provider.get_stop(&company, &StopIdentifier::new("plaza")).is_some());
        assert!(provider.get_stop(&company, &StopIdentifier::new("morro")).is_none());
    }
}
