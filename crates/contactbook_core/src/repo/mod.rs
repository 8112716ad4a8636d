//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage contract the search and editing workflows use.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Contact::validate()` before persistence.
//! - A commit applies a contact and its whole phone-number set atomically.

pub mod contact_repo;
