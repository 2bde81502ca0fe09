use std::time::Duration;

use crate::nav::UrlTemplates;

/// Tuning for one suggest box instance.
#[derive(Debug, Clone)]
pub struct SuggestConfig {
    /// Quiet period after the last keystroke before a lookup is issued.
    pub quiet_period: Duration,
    /// Queries shorter than this never reach the backend.
    pub min_query_len: usize,
    /// Optional cap on rendered rows; the backend list is not capped.
    pub max_visible: Option<usize>,
    pub templates: UrlTemplates,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(250),
            min_query_len: 2,
            max_visible: None,
            templates: UrlTemplates::default(),
        }
    }
}

impl SuggestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    pub fn with_min_query_len(mut self, min_query_len: usize) -> Self {
        self.min_query_len = min_query_len.max(1);
        self
    }

    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = Some(max_visible);
        self
    }

    pub fn with_templates(mut self, templates: UrlTemplates) -> Self {
        self.templates = templates;
        self
    }
}
