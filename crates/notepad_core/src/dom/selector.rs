//! Minimal selector grammar for root lookup.

use once_cell::sync::Lazy;
use regex::Regex;

static SELECTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:#(?P<id>[\w-]+)|\.(?P<class>[\w-]+)|\[(?P<attr>[\w-]+)(?:="(?P<value>[^"]*)")?\]|(?P<tag>[A-Za-z][\w-]*))$"#,
    )
    .expect("valid selector regex")
});

/// Parsed single-part selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `[name]` or `[name="value"]`
    Attribute { name: String, value: Option<String> },
    /// `tag`
    Tag(String),
}

impl Selector {
    /// Parses one selector; returns `None` for unsupported syntax.
    pub fn parse(input: &str) -> Option<Self> {
        let caps = SELECTOR_RE.captures(input.trim())?;
        if let Some(id) = caps.name("id") {
            return Some(Self::Id(id.as_str().to_string()));
        }
        if let Some(class) = caps.name("class") {
            return Some(Self::Class(class.as_str().to_string()));
        }
        if let Some(attr) = caps.name("attr") {
            return Some(Self::Attribute {
                name: attr.as_str().to_string(),
                value: caps.name("value").map(|m| m.as_str().to_string()),
            });
        }
        caps.name("tag")
            .map(|tag| Self::Tag(tag.as_str().to_ascii_lowercase()))
    }

    /// Selector matching nodes with `data-role="<label>"`.
    pub fn role(label: &str) -> Self {
        Self::Attribute {
            name: super::ROLE_ATTRIBUTE.to_string(),
            value: Some(label.to_string()),
        }
    }

    /// Selector matching nodes with `data-action="<label>"`.
    pub fn action(label: &str) -> Self {
        Self::Attribute {
            name: super::ACTION_ATTRIBUTE.to_string(),
            value: Some(label.to_string()),
        }
    }
}
