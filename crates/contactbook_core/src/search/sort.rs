//! Name ordering for contact lists.

use crate::model::contact::Contact;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// List sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// A to Z.
    #[default]
    Ascending,
    /// Z to A.
    Descending,
}

impl SortOrder {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Short stable label used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Returns a comparator over `name` in the requested direction.
///
/// Comparison is byte-wise and case-sensitive, so `"Bob" < "alice"`.
/// Equal names compare `Equal`; callers must sort stably to keep their
/// input order.
pub fn compare_order(order: SortOrder) -> impl Fn(&Contact, &Contact) -> Ordering + Copy {
    move |left, right| {
        let ordering = left.name.cmp(&right.name);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Stable in-place sort of `contacts` by name.
pub fn sort_contacts(contacts: &mut [Contact], order: SortOrder) {
    contacts.sort_by(compare_order(order));
}
