//! Core domain logic for the contact book.
//!
//! This crate owns the contact invariants, the search-field query language
//! and the storage contract; presentation layers only bind to it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::contact::{
    sample_contacts, Contact, ContactId, ContactValidationError, PhoneNumber, PhoneNumberId,
    BIRTHDAY_MARKER, DEFAULT_PHONE_TYPE,
};
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};
pub use search::config::{ContactFilter, SearchConfig};
pub use search::filter::{compile, ContactPredicate};
pub use search::query::{parse, FieldTag, ParsedQuery};
pub use search::sort::{compare_order, sort_contacts, SortOrder};
pub use service::contact_service::{ContactDraft, ContactService, ContactServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
