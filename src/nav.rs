use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left bare by `encodeURIComponent`; everything else in a
/// slug or query is percent-encoded before it lands in a URL.
const URL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, URL_COMPONENT).to_string()
}

/// Terminal outcome of the component: the host performs the actual page
/// transition and the component instance is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    /// Detail page for one suggestion.
    Item { slug: String },
    /// Full results page for the typed query.
    Results { query: String },
}

/// Fixed path templates the two outbound URLs are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplates {
    pub detail_base: String,
    pub results_base: String,
}

impl Default for UrlTemplates {
    fn default() -> Self {
        Self {
            detail_base: "/services/product".to_string(),
            results_base: "/search-results".to_string(),
        }
    }
}

impl UrlTemplates {
    pub fn new(detail_base: impl Into<String>, results_base: impl Into<String>) -> Self {
        Self {
            detail_base: detail_base.into(),
            results_base: results_base.into(),
        }
    }

    pub fn item_url(&self, slug: &str) -> String {
        format!("{}/{}", self.detail_base, encode_component(slug))
    }

    pub fn results_url(&self, query: &str) -> String {
        format!("{}?q={}", self.results_base, encode_component(query))
    }

    pub fn url_for(&self, target: &NavigationTarget) -> String {
        match target {
            NavigationTarget::Item { slug } => self.item_url(slug),
            NavigationTarget::Results { query } => self.results_url(query),
        }
    }
}
