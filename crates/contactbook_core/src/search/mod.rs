//! Search-field query interpretation, filtering and ordering.
//!
//! # Responsibility
//! - Parse the raw search text into a structured query.
//! - Compile a query plus the favourites toggle into a contact predicate.
//! - Provide the name comparator used for list ordering.
//!
//! # Invariants
//! - Parsing never fails; unrecognized tags degrade to plain text.
//! - Predicates and comparators are pure functions of a contact's fields.

pub mod config;
pub mod filter;
pub mod query;
pub mod sort;
