//! Contact book domain model.
//!
//! # Responsibility
//! - Define the canonical contact and phone-number records.
//! - Own the validity and birthday rules every caller relies on.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - A contact owns its phone numbers; a phone number only points back to
//!   its owner by `ContactId`.

pub mod contact;
