//! Contact use-case service.
//!
//! # Responsibility
//! - Turn a `SearchConfig` into an ordered contact list.
//! - Resolve edit-vs-create before a contact is mutated.
//! - Save and delete through the repository commit contract.
//!
//! # Invariants
//! - An invalid contact is never handed to the repository; the caller gets
//!   `ContactServiceError::Validation` and must fix the draft.
//! - Failed commits are surfaced unchanged and never retried here.
//! - Log events carry metadata only, never contact fields or query text.

use crate::model::contact::{
    sample_contacts, Contact, ContactId, ContactValidationError, PhoneNumber, PhoneNumberId,
    DEFAULT_PHONE_TYPE,
};
use crate::repo::contact_repo::{ContactRepository, RepoError};
use crate::search::config::SearchConfig;
use crate::search::query::ParsedQuery;
use chrono::Local;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ContactServiceError {
    /// The draft is not savable (for example an empty name or email).
    Validation(ContactValidationError),
    /// Target contact does not exist.
    ContactNotFound(ContactId),
    /// The store failed to read or commit.
    Persistence(RepoError),
}

impl Display for ContactServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid contact: {err}"),
            Self::ContactNotFound(id) => write!(f, "contact not found: {id}"),
            Self::Persistence(err) => write!(f, "contact store failure: {err}"),
        }
    }
}

impl Error for ContactServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::ContactNotFound(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<RepoError> for ContactServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::ContactNotFound(id),
            other => Self::Persistence(other),
        }
    }
}

impl From<ContactValidationError> for ContactServiceError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

/// A contact being created or edited.
///
/// Changes live only in the draft until [`ContactService::save`] commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub contact: Contact,
    /// `true` when no stored copy existed at edit start.
    pub is_new: bool,
}

impl ContactDraft {
    /// Appends a blank phone row labelled [`DEFAULT_PHONE_TYPE`].
    pub fn add_phone_number(&mut self) -> PhoneNumberId {
        self.contact.add_phone_number("", DEFAULT_PHONE_TYPE)
    }

    /// Removes phone rows by position; see [`Contact::remove_phone_numbers`].
    pub fn remove_phone_numbers(&mut self, positions: &[usize]) -> Vec<PhoneNumber> {
        self.contact.remove_phone_numbers(positions)
    }
}

/// Contact service facade over repository implementations.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns contacts matching `config`, in its sort order.
    ///
    /// Must be re-run after every config change.
    pub fn search(&self, config: &SearchConfig) -> Result<Vec<Contact>, ContactServiceError> {
        let started_at = Instant::now();
        let parsed = config.parsed();
        let predicate = config.predicate();
        let comparator = config.comparator();

        let contacts = self.repo.fetch_all(&predicate.as_fn(), &comparator)?;

        debug!(
            "event=contact_search module=service status=ok query_kind={} favourites_only={} sort={} result_count={} duration_ms={}",
            query_kind(&parsed),
            config.favourites_only(),
            config.sort.as_str(),
            contacts.len(),
            started_at.elapsed().as_millis()
        );
        Ok(contacts)
    }

    /// Starts an edit session.
    ///
    /// When `candidate` is stored, the draft edits the stored copy;
    /// otherwise a fresh contact with default fields is created.
    pub fn edit(&self, candidate: Option<&Contact>) -> Result<ContactDraft, ContactServiceError> {
        if let Some(candidate) = candidate {
            if let Some(existing) = self.repo.exists(candidate.id)? {
                return Ok(ContactDraft {
                    contact: existing,
                    is_new: false,
                });
            }
        }

        Ok(ContactDraft {
            contact: Contact::new(),
            is_new: true,
        })
    }

    /// Validates and commits a draft.
    ///
    /// # Errors
    /// - `Validation` when name or email is empty; nothing is written.
    /// - `Persistence` when the commit fails; nothing is written.
    pub fn save(&mut self, draft: &ContactDraft) -> Result<ContactId, ContactServiceError> {
        if let Err(err) = draft.contact.validate() {
            warn!(
                "event=contact_save module=service status=rejected is_new={} reason={err}",
                draft.is_new
            );
            return Err(err.into());
        }

        match self.repo.commit(&draft.contact) {
            Ok(()) => {
                info!(
                    "event=contact_save module=service status=ok is_new={} phone_count={}",
                    draft.is_new,
                    draft.contact.phone_numbers.len()
                );
                Ok(draft.contact.id)
            }
            Err(err) => {
                warn!(
                    "event=contact_save module=service status=error is_new={} error={err}",
                    draft.is_new
                );
                Err(err.into())
            }
        }
    }

    /// Deletes a contact together with its phone numbers.
    pub fn delete(&mut self, id: ContactId) -> Result<(), ContactServiceError> {
        self.repo.delete_contact(id)?;
        info!("event=contact_delete module=service status=ok");
        Ok(())
    }

    /// Stores `count` preview contacts in one commit and returns them.
    ///
    /// On failure no sample is stored.
    pub fn seed_samples(&mut self, count: usize) -> Result<Vec<Contact>, ContactServiceError> {
        let samples = sample_contacts(count, Local::now().date_naive());
        self.repo.commit_all(&samples)?;
        info!("event=contact_seed module=service status=ok count={count}");
        Ok(samples)
    }

    /// Gives back the underlying repository.
    pub fn into_inner(self) -> R {
        self.repo
    }
}

fn query_kind(query: &ParsedQuery) -> &'static str {
    match query {
        ParsedQuery::Untagged { text } if text.is_empty() => "empty",
        ParsedQuery::Untagged { .. } => "text",
        ParsedQuery::Tagged { field, .. } => field.keyword(),
    }
}
