//! The structured quote record passed to every template.

use serde::{Deserialize, Serialize};

/// Maximum quote length in characters, enforced at the input boundary
pub const MAX_CHARS: usize = 100;

/// Input for one render. Rebuilt on every change; templates only read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteData {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub church_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub church_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl QuoteData {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_church_name(mut self, name: impl Into<String>) -> Self {
        self.church_name = Some(name.into());
        self
    }

    pub fn with_church_handle(mut self, handle: impl Into<String>) -> Self {
        self.church_handle = Some(handle.into());
        self
    }

    pub fn with_logo(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = Some(logo_url.into());
        self
    }

    /// Quote text, or `placeholder` when the text is blank.
    pub fn text_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        let t = self.text.trim();
        if t.is_empty() {
            placeholder
        } else {
            t
        }
    }

    pub fn author(&self) -> Option<&str> {
        non_blank(&self.author)
    }

    pub fn church_name(&self) -> Option<&str> {
        non_blank(&self.church_name)
    }

    pub fn church_handle(&self) -> Option<&str> {
        non_blank(&self.church_handle)
    }

    pub fn logo_url(&self) -> Option<&str> {
        non_blank(&self.logo_url)
    }
}

/// Whether `text` is within the character cap.
pub fn within_cap(text: &str, max_chars: usize) -> bool {
    text.chars().count() <= max_chars
}

/// Which logo, if any, is applied to designs. Exactly one state holds at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogoState {
    #[default]
    None,
    /// Bundled default asset reference
    Default(String),
    /// User-uploaded image as a data URI
    Uploaded(String),
}

impl LogoState {
    /// Reference handed to templates.
    pub fn url(&self) -> Option<&str> {
        match self {
            LogoState::None => None,
            LogoState::Default(u) | LogoState::Uploaded(u) => Some(u.as_str()),
        }
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self, LogoState::Uploaded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optionals_read_as_absent() {
        let q = QuoteData::new("Be kind").with_author("   ").with_church_name("Grace");
        assert_eq!(q.author(), None);
        assert_eq!(q.church_name(), Some("Grace"));
        assert_eq!(q.logo_url(), None);
    }

    #[test]
    fn placeholder_for_empty_text() {
        assert_eq!(QuoteData::default().text_or("Your Quote Here"), "Your Quote Here");
        assert_eq!(QuoteData::new("Hi").text_or("Your Quote Here"), "Hi");
    }

    #[test]
    fn cap_counts_characters() {
        assert!(within_cap(&"a".repeat(MAX_CHARS), MAX_CHARS));
        assert!(!within_cap(&"a".repeat(MAX_CHARS + 1), MAX_CHARS));
        assert!(within_cap(&"é".repeat(MAX_CHARS), MAX_CHARS));
    }

    #[test]
    fn serde_uses_camel_case() {
        let q = QuoteData::new("x").with_church_handle("@grace");
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, r#"{"text":"x","churchHandle":"@grace"}"#);
    }

    #[test]
    fn logo_state_url() {
        assert_eq!(LogoState::None.url(), None);
        assert_eq!(LogoState::Default("/default-logo.png".into()).url(), Some("/default-logo.png"));
        assert!(LogoState::Uploaded("data:image/png;base64,AA==".into()).is_uploaded());
    }
}
