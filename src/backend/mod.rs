pub mod http;

use std::time::Duration;

use thiserror::Error;

use crate::suggest::model::Suggestion;

pub use http::HttpBackend;

#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Lookup collaborator: given a query, returns an already-ordered list
/// of candidates. Calls block and are always issued from a worker
/// thread, never from the owner thread.
pub trait SuggestionBackend: Send + Sync {
    fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, BackendError>;
}

/// In-process catalog backend used by the demo binary and tests.
/// Matches case-insensitively against name and description, preserving
/// catalog order. An optional artificial latency simulates a slow
/// lookup.
pub struct StaticBackend {
    catalog: Vec<Suggestion>,
    latency: Option<Duration>,
}

impl StaticBackend {
    pub fn new(catalog: Vec<Suggestion>) -> Self {
        Self {
            catalog,
            latency: None,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

impl SuggestionBackend for StaticBackend {
    fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, BackendError> {
        if let Some(latency) = self.latency {
            std::thread::sleep(latency);
        }
        let needle = query.to_lowercase();
        let matches = self
            .catalog
            .iter()
            .filter(|item| {
                item.name.to_lowercase().contains(&needle)
                    || item
                        .short_desc
                        .as_ref()
                        .is_some_and(|desc| desc.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Suggestion> {
        vec![
            Suggestion::new("Hydro Pump 200", "hydro-pump-200").with_short_desc("200 l/min"),
            Suggestion::new("Ball Valve", "ball-valve").with_short_desc("pump fitting"),
            Suggestion::new("Gasket Set", "gasket-set"),
        ]
    }

    #[test]
    fn matches_name_and_description_case_insensitively() {
        let backend = StaticBackend::new(catalog());
        let items = backend.fetch("PUMP").unwrap();
        let slugs: Vec<&str> = items.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, ["hydro-pump-200", "ball-valve"]);
    }

    #[test]
    fn no_match_yields_empty_list() {
        let backend = StaticBackend::new(catalog());
        assert!(backend.fetch("turbine").unwrap().is_empty());
    }
}
