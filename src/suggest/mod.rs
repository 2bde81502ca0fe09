pub mod component;
pub mod debounce;
pub mod dropdown;
pub mod fetcher;
pub mod model;
pub mod view;

pub use component::{SuggestBox, SuggestResponse};
pub use debounce::{Debouncer, InputDisposition};
pub use dropdown::Dropdown;
pub use fetcher::{FetchCompletion, Fetcher};
pub use model::{Suggestion, parse_suggestions};
pub use view::{ViewOptions, render_dropdown, sanitize_text};
