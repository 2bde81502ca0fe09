pub mod backend;
pub mod config;
pub mod input;
pub mod nav;
pub mod suggest;
pub mod ui;

pub use backend::{BackendError, HttpBackend, StaticBackend, SuggestionBackend};
pub use config::SuggestConfig;
pub use nav::{NavigationTarget, UrlTemplates};
pub use suggest::{SuggestBox, SuggestResponse, Suggestion};
