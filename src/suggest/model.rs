use serde::Deserialize;

use crate::backend::BackendError;

/// One candidate result returned by the suggestion backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
    pub name: String,
    #[serde(default)]
    pub short_desc: Option<String>,
    pub slug: String,
}

impl Suggestion {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_desc: None,
            slug: slug.into(),
        }
    }

    pub fn with_short_desc(mut self, short_desc: impl Into<String>) -> Self {
        self.short_desc = Some(short_desc.into());
        self
    }
}

/// Parses a backend response body. The only accepted shape is a JSON
/// array of objects carrying at least `name` and `slug`; anything else
/// is a malformed response.
pub fn parse_suggestions(body: &str) -> Result<Vec<Suggestion>, BackendError> {
    serde_json::from_str::<Vec<Suggestion>>(body)
        .map_err(|err| BackendError::Malformed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_array_with_optional_short_desc() {
        let body = r#"[
            {"name": "Hydro Pump 200", "slug": "hydro-pump-200", "short_desc": "200l/min"},
            {"name": "Valve", "slug": "valve"}
        ]"#;
        let items = parse_suggestions(body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].short_desc.as_deref(), Some("200l/min"));
        assert_eq!(items[1].short_desc, None);
        assert_eq!(items[1].slug, "valve");
    }

    #[test]
    fn empty_array_is_valid() {
        assert_eq!(parse_suggestions("[]").unwrap(), Vec::new());
    }

    #[test]
    fn rejects_non_array_shapes() {
        assert!(parse_suggestions(r#"{"name": "x"}"#).is_err());
        assert!(parse_suggestions("\"pump\"").is_err());
        assert!(parse_suggestions("not json").is_err());
    }

    #[test]
    fn rejects_objects_missing_required_fields() {
        assert!(parse_suggestions(r#"[{"name": "no slug"}]"#).is_err());
        assert!(parse_suggestions(r#"[{"slug": "no-name"}]"#).is_err());
    }
}
