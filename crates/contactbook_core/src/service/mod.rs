//! Core use-case services.
//!
//! # Responsibility
//! - Run the search pipeline and the contact editing workflow.
//! - Keep presentation callers decoupled from storage details.

pub mod contact_service;
