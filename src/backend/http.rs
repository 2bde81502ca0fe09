use crate::nav::encode_component;
use crate::suggest::model::{Suggestion, parse_suggestions};

use super::{BackendError, SuggestionBackend};

/// HTTP suggestion backend: `GET <endpoint>?q=<encoded query>`, body
/// parsed as a JSON array of suggestions.
pub struct HttpBackend {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            agent: ureq::agent(),
            endpoint: endpoint.into(),
        }
    }

    fn lookup_url(&self, query: &str) -> String {
        format!("{}?q={}", self.endpoint, encode_component(query))
    }
}

impl SuggestionBackend for HttpBackend {
    fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, BackendError> {
        let url = self.lookup_url(query);
        let response = self.agent.get(&url).call().map_err(|err| match err {
            ureq::Error::Status(code, _) => BackendError::Status(code),
            ureq::Error::Transport(transport) => BackendError::Transport(transport.to_string()),
        })?;
        let body = response
            .into_string()
            .map_err(|err| BackendError::Transport(err.to_string()))?;
        parse_suggestions(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_url_embeds_the_encoded_query() {
        let backend = HttpBackend::new("http://localhost:5000/search");
        assert_eq!(
            backend.lookup_url("hydro pump"),
            "http://localhost:5000/search?q=hydro%20pump"
        );
    }

    #[test]
    fn invalid_endpoint_is_a_transport_failure() {
        let backend = HttpBackend::new("not-a-url");
        match backend.fetch("pump") {
            Err(BackendError::Transport(_)) => {}
            other => panic!("expected transport failure, got {other:?}"),
        }
    }
}
