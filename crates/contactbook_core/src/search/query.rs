//! Search text parser.
//!
//! Supported forms:
//! - `alice` plain name substring search.
//! - `name:alice`, `number:555`, `email:example.com` field-tagged search.
//!
//! Tags are case-insensitive and only the first `:` splits. Text with an
//! unknown tag (`foo:bar`) is searched verbatim against the name.

use serde::{Deserialize, Serialize};

/// Field a tagged query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldTag {
    Name,
    Number,
    Email,
}

impl FieldTag {
    /// Keyword recognized before the `:` separator.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Number => "number",
            Self::Email => "email",
        }
    }

    fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "number" => Some(Self::Number),
            "email" => Some(Self::Email),
            _ => None,
        }
    }
}

/// Structured form of the raw search text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedQuery {
    /// Plain text searched against the contact name.
    Untagged { text: String },
    /// Value searched against one explicit field.
    Tagged { field: FieldTag, value: String },
}

impl ParsedQuery {
    /// Returns whether this is the empty, match-everything query.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Untagged { text } if text.is_empty())
    }
}

impl Default for ParsedQuery {
    fn default() -> Self {
        Self::Untagged {
            text: String::new(),
        }
    }
}

/// Parses raw search text.
///
/// Never fails: empty input yields an empty untagged query and an
/// unrecognized tag yields the whole trimmed input as untagged text.
pub fn parse(raw: &str) -> ParsedQuery {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedQuery::default();
    }

    let untagged = || ParsedQuery::Untagged {
        text: trimmed.to_string(),
    };

    let Some((tag, value)) = trimmed.split_once(':') else {
        return untagged();
    };

    match FieldTag::from_keyword(tag.trim().to_lowercase().as_str()) {
        Some(field) => ParsedQuery::Tagged {
            field,
            value: value.trim().to_string(),
        },
        None => untagged(),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse, FieldTag, ParsedQuery};

    fn tagged(field: FieldTag, value: &str) -> ParsedQuery {
        ParsedQuery::Tagged {
            field,
            value: value.to_string(),
        }
    }

    fn untagged(text: &str) -> ParsedQuery {
        ParsedQuery::Untagged {
            text: text.to_string(),
        }
    }

    #[test]
    fn blank_input_is_empty_query() {
        assert_eq!(parse(""), untagged(""));
        assert_eq!(parse(" \t\n "), untagged(""));
        assert!(parse("   ").is_empty());
    }

    #[test]
    fn plain_text_is_trimmed() {
        assert_eq!(parse("  alice  "), untagged("alice"));
    }

    #[test]
    fn recognized_tags_are_case_insensitive_and_values_trimmed() {
        assert_eq!(parse("name:Bob"), tagged(FieldTag::Name, "Bob"));
        assert_eq!(parse("NUMBER: 555"), tagged(FieldTag::Number, "555"));
        assert_eq!(parse(" Email :  a@b.c "), tagged(FieldTag::Email, "a@b.c"));
    }

    #[test]
    fn unrecognized_tag_keeps_whole_text() {
        assert_eq!(parse("foo:bar"), untagged("foo:bar"));
        assert_eq!(parse(" :bar "), untagged(":bar"));
    }

    #[test]
    fn only_first_colon_splits() {
        assert_eq!(parse("email:a:b"), tagged(FieldTag::Email, "a:b"));
        assert_eq!(parse("x:name:bob"), untagged("x:name:bob"));
    }

    #[test]
    fn empty_value_after_tag_is_allowed() {
        assert_eq!(parse("name:"), tagged(FieldTag::Name, ""));
        assert!(!parse("name:").is_empty());
    }
}
