use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::backend::SuggestionBackend;
use crate::config::SuggestConfig;
use crate::input::{KeyCode, KeyEvent};
use crate::nav::NavigationTarget;
use crate::suggest::debounce::{Debouncer, InputDisposition};
use crate::suggest::dropdown::Dropdown;
use crate::suggest::fetcher::Fetcher;
use crate::suggest::view::{ViewOptions, render_dropdown};
use crate::ui::span::SpanLine;

/// What one event handler did. `navigation` is terminal: the host is
/// expected to leave the page, and the component needs nothing further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestResponse {
    pub handled: bool,
    pub request_render: bool,
    pub navigation: Option<NavigationTarget>,
}

impl SuggestResponse {
    pub fn ignored() -> Self {
        Self {
            handled: false,
            request_render: false,
            navigation: None,
        }
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: false,
            navigation: None,
        }
    }

    pub fn rendered() -> Self {
        Self {
            handled: true,
            request_render: true,
            navigation: None,
        }
    }

    pub fn navigate(target: NavigationTarget) -> Self {
        Self {
            handled: true,
            request_render: true,
            navigation: Some(target),
        }
    }
}

/// One search box instance: debounced input, sequence-guarded lookups,
/// and the dropdown state machine. All state lives here, so several
/// instances on one page cannot corrupt each other. Handlers run to
/// completion on the owner thread; worker threads only feed the
/// fetcher's completion channel.
pub struct SuggestBox {
    config: SuggestConfig,
    query: String,
    debouncer: Debouncer,
    fetcher: Fetcher,
    dropdown: Dropdown,
}

impl SuggestBox {
    pub fn new(config: SuggestConfig, backend: Arc<dyn SuggestionBackend>) -> Self {
        let debouncer = Debouncer::new(config.quiet_period, config.min_query_len);
        Self {
            config,
            query: String::new(),
            debouncer,
            fetcher: Fetcher::new(backend),
            dropdown: Dropdown::default(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    pub fn is_open(&self) -> bool {
        self.dropdown.is_open()
    }

    /// The host's text field changed. Too-short queries force the
    /// dropdown closed and supersede any in-flight lookup; anything
    /// else arms the quiet-period timer with the query captured now.
    pub fn handle_input_change(&mut self, raw: &str, now: Instant) -> SuggestResponse {
        self.query = raw.trim().to_string();
        match self.debouncer.note_input(&self.query, now) {
            InputDisposition::TooShort => {
                self.fetcher.invalidate();
                let was_open = self.dropdown.is_open();
                self.dropdown.close();
                if was_open {
                    SuggestResponse::rendered()
                } else {
                    SuggestResponse::handled()
                }
            }
            InputDisposition::Armed => SuggestResponse::handled(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SuggestResponse {
        match key.code {
            KeyCode::Down => {
                if self.dropdown.move_down() {
                    SuggestResponse::rendered()
                } else {
                    SuggestResponse::ignored()
                }
            }
            KeyCode::Up => {
                if self.dropdown.move_up() {
                    SuggestResponse::rendered()
                } else {
                    SuggestResponse::ignored()
                }
            }
            KeyCode::Enter => self.handle_enter(),
            KeyCode::Esc => {
                if !self.dropdown.is_open() {
                    return SuggestResponse::ignored();
                }
                self.suppress_pending();
                self.dropdown.close();
                SuggestResponse::rendered()
            }
            _ => SuggestResponse::ignored(),
        }
    }

    fn handle_enter(&mut self) -> SuggestResponse {
        if !self.dropdown.is_open() {
            return SuggestResponse::ignored();
        }
        if let Some(picked) = self.dropdown.take_highlighted() {
            return self.dispatch_navigation(NavigationTarget::Item { slug: picked.slug });
        }
        // No row highlighted: fall through to the full results page.
        self.search_now()
    }

    /// Results-page navigation independent of the dropdown. A no-op for
    /// an empty query.
    pub fn search_now(&mut self) -> SuggestResponse {
        if self.query.is_empty() {
            return SuggestResponse::ignored();
        }
        let query = self.query.clone();
        self.dispatch_navigation(NavigationTarget::Results { query })
    }

    /// Pointer hover over row `index`.
    pub fn handle_hover(&mut self, index: usize) -> SuggestResponse {
        if self.dropdown.hover(index) {
            SuggestResponse::rendered()
        } else {
            SuggestResponse::ignored()
        }
    }

    /// Pointer activation of row `index`.
    pub fn handle_row_click(&mut self, index: usize) -> SuggestResponse {
        match self.dropdown.take_row(index) {
            Some(picked) => self.dispatch_navigation(NavigationTarget::Item { slug: picked.slug }),
            None => SuggestResponse::ignored(),
        }
    }

    /// Focus left the input and the dropdown.
    pub fn handle_blur(&mut self) -> SuggestResponse {
        self.suppress_pending();
        if self.dropdown.is_open() {
            self.dropdown.close();
            SuggestResponse::rendered()
        } else {
            SuggestResponse::handled()
        }
    }

    /// Owner-thread tick: fires a due debounce into a lookup dispatch
    /// and applies the newest completed lookup, if any.
    pub fn poll(&mut self, now: Instant) -> SuggestResponse {
        if let Some(query) = self.debouncer.take_due(now) {
            debug!(query = %query, "dispatching suggestion lookup");
            self.fetcher.dispatch(query);
        }

        let Some(completion) = self.fetcher.drain_latest() else {
            return SuggestResponse::handled();
        };
        match completion.result {
            Ok(items) => {
                debug!(
                    query = %completion.query,
                    count = items.len(),
                    "applying suggestion response"
                );
                self.dropdown.show(items);
            }
            Err(err) => {
                // Degrades to "no dropdown"; never surfaces to the user.
                warn!(query = %completion.query, error = %err, "suggestion lookup failed");
                self.dropdown.close();
            }
        }
        SuggestResponse::rendered()
    }

    /// How soon the host must call `poll` again: at the debounce
    /// deadline, or on a short interval while a lookup is outstanding.
    pub fn poll_deadline(&self, now: Instant) -> Option<Duration> {
        if let Some(deadline) = self.debouncer.next_deadline() {
            return Some(deadline.saturating_duration_since(now));
        }
        if self.fetcher.has_in_flight() {
            return Some(Duration::from_millis(15));
        }
        None
    }

    /// Rendered view of the dropdown, capped to the configured row
    /// count.
    pub fn view(&self) -> Vec<SpanLine> {
        self.view_with_width(None)
    }

    pub fn view_with_width(&self, width: Option<usize>) -> Vec<SpanLine> {
        render_dropdown(
            &self.dropdown,
            ViewOptions {
                max_visible: self.config.max_visible,
                width,
            },
        )
    }

    pub fn config(&self) -> &SuggestConfig {
        &self.config
    }

    fn dispatch_navigation(&mut self, target: NavigationTarget) -> SuggestResponse {
        self.suppress_pending();
        self.dropdown.close();
        SuggestResponse::navigate(target)
    }

    fn suppress_pending(&mut self) {
        self.debouncer.cancel();
        self.fetcher.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, StaticBackend};
    use crate::suggest::model::Suggestion;
    use crate::ui::span::line_text;
    use std::thread;

    fn catalog() -> Vec<Suggestion> {
        vec![
            Suggestion::new("Hydro Pump 200", "hydro-pump-200").with_short_desc("200 l/min"),
            Suggestion::new("Pump Seal Kit", "pump-seal-kit"),
            Suggestion::new("Ball Valve", "ball-valve"),
        ]
    }

    fn suggest_box() -> SuggestBox {
        // Zero quiet period keeps the tests free of debounce sleeps.
        let config = SuggestConfig::new().with_quiet_period(Duration::ZERO);
        SuggestBox::new(config, Arc::new(StaticBackend::new(catalog())))
    }

    /// Polls until the dropdown opens or the deadline passes.
    fn pump_until_open(sbox: &mut SuggestBox) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            sbox.poll(Instant::now());
            if sbox.is_open() {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("dropdown never opened");
    }

    fn type_and_open(sbox: &mut SuggestBox, query: &str) {
        sbox.handle_input_change(query, Instant::now());
        pump_until_open(sbox);
    }

    #[test]
    fn short_queries_never_reach_the_backend() {
        let mut sbox = suggest_box();
        let now = Instant::now();
        for raw in ["", "p", " p "] {
            sbox.handle_input_change(raw, now);
            sbox.poll(now + Duration::from_secs(1));
            assert!(!sbox.is_open());
        }
        assert_eq!(sbox.fetcher.has_in_flight(), false);
    }

    #[test]
    fn burst_typing_issues_one_lookup_with_the_final_query() {
        let mut sbox = suggest_box();
        let config = SuggestConfig::new().with_quiet_period(Duration::from_millis(250));
        sbox.config = config.clone();
        sbox.debouncer = Debouncer::new(config.quiet_period, config.min_query_len);

        let mut now = Instant::now();
        for raw in ["pu", "pum", "pump"] {
            sbox.handle_input_change(raw, now);
            sbox.poll(now);
            now += Duration::from_millis(50);
        }
        // Quiet period elapses once, after the final keystroke.
        sbox.poll(now + Duration::from_millis(250));
        pump_until_open(&mut sbox);

        // Exactly one lookup was issued for the whole burst.
        assert_eq!(sbox.fetcher.latest_seq(), 1);

        let rows: Vec<String> = sbox.view().iter().map(line_text).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("Hydro Pump 200"));
        assert!(rows[1].starts_with("Pump Seal Kit"));
    }

    #[test]
    fn newer_response_wins_over_a_slower_older_one() {
        struct RacedBackend;
        impl crate::backend::SuggestionBackend for RacedBackend {
            fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, BackendError> {
                let delay = if query == "pu" { 150 } else { 5 };
                thread::sleep(Duration::from_millis(delay));
                Ok(vec![Suggestion::new(query.to_string(), query.to_string())])
            }
        }

        let config = SuggestConfig::new().with_quiet_period(Duration::ZERO);
        let mut sbox = SuggestBox::new(config, Arc::new(RacedBackend));

        let now = Instant::now();
        sbox.handle_input_change("pu", now);
        sbox.poll(now); // dispatches the slow lookup
        sbox.handle_input_change("pump", now);
        sbox.poll(now); // dispatches the fast lookup
        pump_until_open(&mut sbox);
        assert_eq!(sbox.dropdown.items()[0].slug, "pump");

        // The slow response lands later; the view must not regress.
        let settle = Instant::now() + Duration::from_millis(400);
        while Instant::now() < settle {
            sbox.poll(Instant::now());
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(sbox.dropdown.items()[0].slug, "pump");
    }

    #[test]
    fn arrow_down_clamps_at_the_last_row() {
        let mut sbox = suggest_box();
        type_and_open(&mut sbox, "pump");
        let len = sbox.dropdown.items().len();
        for _ in 0..len + 1 {
            sbox.handle_key(KeyEvent::plain(KeyCode::Down));
        }
        assert_eq!(sbox.dropdown.cursor(), Some(len - 1));
    }

    #[test]
    fn enter_without_highlight_navigates_to_results() {
        let mut sbox = suggest_box();
        type_and_open(&mut sbox, "pump");
        let response = sbox.handle_key(KeyEvent::plain(KeyCode::Enter));
        let target = response.navigation.expect("navigation");
        assert_eq!(
            target,
            NavigationTarget::Results {
                query: "pump".to_string()
            }
        );
        assert_eq!(
            sbox.config.templates.url_for(&target),
            "/search-results?q=pump"
        );
        assert!(!sbox.is_open());
    }

    #[test]
    fn enter_on_a_highlighted_row_navigates_to_the_item() {
        let mut sbox = suggest_box();
        type_and_open(&mut sbox, "pump");
        sbox.handle_key(KeyEvent::plain(KeyCode::Down));
        let response = sbox.handle_key(KeyEvent::plain(KeyCode::Enter));
        let target = response.navigation.expect("navigation");
        let url = sbox.config.templates.url_for(&target);
        assert!(url.ends_with("/hydro-pump-200"), "got {url}");
        assert!(!sbox.is_open());
    }

    #[test]
    fn row_click_navigates_to_that_item() {
        let mut sbox = suggest_box();
        type_and_open(&mut sbox, "pump");
        let response = sbox.handle_row_click(1);
        let target = response.navigation.expect("navigation");
        assert_eq!(
            target,
            NavigationTarget::Item {
                slug: "pump-seal-kit".to_string()
            }
        );
    }

    #[test]
    fn hover_moves_the_highlight() {
        let mut sbox = suggest_box();
        type_and_open(&mut sbox, "pump");
        sbox.handle_hover(1);
        assert_eq!(sbox.dropdown.cursor(), Some(1));
    }

    #[test]
    fn escape_closes_and_a_later_arrow_is_inert() {
        let mut sbox = suggest_box();
        type_and_open(&mut sbox, "pump");
        let response = sbox.handle_key(KeyEvent::plain(KeyCode::Esc));
        assert!(response.request_render);
        assert!(!sbox.is_open());
        assert_eq!(sbox.dropdown.cursor(), None);

        let response = sbox.handle_key(KeyEvent::plain(KeyCode::Down));
        assert!(!response.handled);
        assert!(!sbox.is_open());
    }

    #[test]
    fn query_shrinking_below_minimum_forces_closed() {
        let mut sbox = suggest_box();
        type_and_open(&mut sbox, "pump");
        let response = sbox.handle_input_change("p", Instant::now());
        assert!(response.request_render);
        assert!(!sbox.is_open());
        // A straggling response for "pump" must not reopen it.
        let settle = Instant::now() + Duration::from_millis(100);
        while Instant::now() < settle {
            sbox.poll(Instant::now());
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!sbox.is_open());
    }

    #[test]
    fn transport_failure_degrades_to_closed() {
        struct FailingBackend;
        impl crate::backend::SuggestionBackend for FailingBackend {
            fn fetch(&self, _query: &str) -> Result<Vec<Suggestion>, BackendError> {
                Err(BackendError::Transport("connection refused".to_string()))
            }
        }

        let config = SuggestConfig::new().with_quiet_period(Duration::ZERO);
        let mut sbox = SuggestBox::new(config, Arc::new(FailingBackend));
        let now = Instant::now();
        sbox.handle_input_change("pump", now);

        let deadline = Instant::now() + Duration::from_millis(500);
        while Instant::now() < deadline {
            sbox.poll(Instant::now());
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!sbox.is_open());
    }

    #[test]
    fn empty_result_closes_the_dropdown() {
        let mut sbox = suggest_box();
        type_and_open(&mut sbox, "pump");
        sbox.handle_input_change("turbine", Instant::now());
        let deadline = Instant::now() + Duration::from_millis(500);
        while Instant::now() < deadline && sbox.is_open() {
            sbox.poll(Instant::now());
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!sbox.is_open());
    }

    #[test]
    fn blur_closes_the_dropdown() {
        let mut sbox = suggest_box();
        type_and_open(&mut sbox, "pump");
        let response = sbox.handle_blur();
        assert!(response.request_render);
        assert!(!sbox.is_open());
    }

    #[test]
    fn search_now_requires_a_non_empty_query() {
        let mut sbox = suggest_box();
        assert_eq!(sbox.search_now(), SuggestResponse::ignored());
        sbox.handle_input_change("valve", Instant::now());
        let response = sbox.search_now();
        assert_eq!(
            response.navigation,
            Some(NavigationTarget::Results {
                query: "valve".to_string()
            })
        );
    }

    #[test]
    fn poll_deadline_reflects_pending_work() {
        let config = SuggestConfig::new().with_quiet_period(Duration::from_millis(250));
        let mut sbox = SuggestBox::new(config, Arc::new(StaticBackend::new(catalog())));
        let now = Instant::now();
        assert_eq!(sbox.poll_deadline(now), None);

        sbox.handle_input_change("pump", now);
        assert_eq!(sbox.poll_deadline(now), Some(Duration::from_millis(250)));

        sbox.poll(now + Duration::from_millis(250));
        assert!(sbox.poll_deadline(now).is_some());
    }
}
