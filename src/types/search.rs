use serde::{Deserialize, Serialize};

/// Case-insensitive substring filter over question text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(term: &str) -> Self {
        SearchTerm(term.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The empty term matches everything.
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.0.to_lowercase())
    }

    /// `ILIKE` pattern for the term, with `ESCAPE '\'` semantics, so `%` and
    /// `_` in the term are matched literally.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}
