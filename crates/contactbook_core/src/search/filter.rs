//! Predicate compiler for parsed search queries.
//!
//! # Invariants
//! - Substring matching is case-insensitive on every field.
//! - Needles are case-folded once at compile time, haystacks per match.
//! - The favourites toggle is AND-combined with the text criterion.

use super::query::{FieldTag, ParsedQuery};
use crate::model::contact::Contact;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Criterion {
    Any,
    Name(String),
    Email(String),
    /// Matches when at least one phone number contains the needle.
    Number(String),
}

/// Compiled, side-effect-free contact predicate.
///
/// Plain data, so it can be cloned, shared across threads and evaluated
/// any number of times in any order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPredicate {
    criterion: Criterion,
    favourites_only: bool,
}

impl ContactPredicate {
    /// Predicate that matches every contact.
    pub fn match_all() -> Self {
        Self {
            criterion: Criterion::Any,
            favourites_only: false,
        }
    }

    /// Returns whether `contact` is selected.
    pub fn matches(&self, contact: &Contact) -> bool {
        if self.favourites_only && !contact.is_favourite {
            return false;
        }
        match &self.criterion {
            Criterion::Any => true,
            Criterion::Name(needle) => contains_folded(&contact.name, needle),
            Criterion::Email(needle) => contains_folded(&contact.email, needle),
            Criterion::Number(needle) => contact
                .phone_numbers
                .iter()
                .any(|phone| contains_folded(&phone.number, needle)),
        }
    }

    /// Returns whether this predicate can never reject a contact.
    pub fn is_match_all(&self) -> bool {
        self.criterion == Criterion::Any && !self.favourites_only
    }

    /// Borrows the predicate as a plain closure.
    pub fn as_fn(&self) -> impl Fn(&Contact) -> bool + '_ {
        move |contact| self.matches(contact)
    }
}

/// Compiles a parsed query and the favourites toggle into a predicate.
pub fn compile(query: &ParsedQuery, favourites_only: bool) -> ContactPredicate {
    let criterion = match query {
        ParsedQuery::Untagged { text } if text.is_empty() => Criterion::Any,
        ParsedQuery::Untagged { text } => Criterion::Name(text.to_lowercase()),
        ParsedQuery::Tagged { field, value } => {
            let needle = value.to_lowercase();
            match field {
                FieldTag::Name => Criterion::Name(needle),
                FieldTag::Number => Criterion::Number(needle),
                FieldTag::Email => Criterion::Email(needle),
            }
        }
    };

    ContactPredicate {
        criterion,
        favourites_only,
    }
}

fn contains_folded(haystack: &str, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::{compile, ContactPredicate};
    use crate::search::query::parse;

    #[test]
    fn empty_query_without_favourites_is_match_all() {
        assert!(compile(&parse(""), false).is_match_all());
        assert_eq!(compile(&parse("  "), false), ContactPredicate::match_all());
    }

    #[test]
    fn favourites_toggle_disables_match_all() {
        assert!(!compile(&parse(""), true).is_match_all());
    }

    #[test]
    fn tagged_empty_value_is_not_treated_as_match_all() {
        assert!(!compile(&parse("number:"), false).is_match_all());
    }
}
