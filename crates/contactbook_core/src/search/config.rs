//! Transient search state owned by the presentation layer.
//!
//! # Invariants
//! - Never persisted; a fresh session starts from `SearchConfig::default()`.
//! - Every mutation must be followed by a new search pass.

use super::filter::{compile, ContactPredicate};
use super::query::{parse, ParsedQuery};
use super::sort::{compare_order, SortOrder};
use crate::model::contact::Contact;
use std::cmp::Ordering;

/// Which contacts the list shows before text filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContactFilter {
    #[default]
    All,
    Favourites,
}

/// Current search text, favourites filter and sort direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Raw search field text.
    pub query: String,
    pub filter: ContactFilter,
    pub sort: SortOrder,
}

impl SearchConfig {
    /// Creates a config for `query` with the default filter and order.
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Replaces the raw search text.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Switches between all contacts and favourites only.
    pub fn toggle_favourites(&mut self) {
        self.filter = match self.filter {
            ContactFilter::All => ContactFilter::Favourites,
            ContactFilter::Favourites => ContactFilter::All,
        };
    }

    /// Reverses the sort direction.
    pub fn flip_sort(&mut self) {
        self.sort = self.sort.reversed();
    }

    pub fn favourites_only(&self) -> bool {
        self.filter == ContactFilter::Favourites
    }

    /// Parses the current search text.
    pub fn parsed(&self) -> ParsedQuery {
        parse(&self.query)
    }

    /// Compiles the current text and filter into a predicate.
    pub fn predicate(&self) -> ContactPredicate {
        compile(&self.parsed(), self.favourites_only())
    }

    /// Comparator for the current sort direction.
    pub fn comparator(&self) -> impl Fn(&Contact, &Contact) -> Ordering + Copy {
        compare_order(self.sort)
    }
}
