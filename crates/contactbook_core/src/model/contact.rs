//! Contact domain model.
//!
//! # Responsibility
//! - Define `Contact` and its owned `PhoneNumber` collection.
//! - Provide the creation factory that applies default field values.
//! - Derive birthday state and the display name from `dob`.
//!
//! # Invariants
//! - `id` is stable and never reused for another contact.
//! - A contact is valid only when `name` and `email` are both non-empty.
//! - Every phone number in `phone_numbers` has `contact_id == id` and a
//!   unique `id` within the collection.

use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a contact.
pub type ContactId = Uuid;

/// Stable identifier of a phone number row.
pub type PhoneNumberId = Uuid;

/// Label given to a phone number added from a blank editor row.
pub const DEFAULT_PHONE_TYPE: &str = "Mobile";

/// Marker prefixed to the display name on the contact's birthday.
pub const BIRTHDAY_MARKER: &str = "🎈";

/// Validation errors for contact invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// Contact id must not be the nil UUID.
    NilId,
    /// `name` is empty.
    EmptyName,
    /// `email` is empty.
    EmptyEmail,
    /// A phone number points back to a different contact.
    ForeignPhoneNumber {
        phone_id: PhoneNumberId,
        owner: ContactId,
    },
    /// The same phone number id appears twice in one contact.
    DuplicatePhoneNumber(PhoneNumberId),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "contact id must not be nil"),
            Self::EmptyName => write!(f, "contact name must not be empty"),
            Self::EmptyEmail => write!(f, "contact email must not be empty"),
            Self::ForeignPhoneNumber { phone_id, owner } => write!(
                f,
                "phone number {phone_id} belongs to contact {owner}"
            ),
            Self::DuplicatePhoneNumber(phone_id) => {
                write!(f, "phone number {phone_id} appears more than once")
            }
        }
    }
}

impl Error for ContactValidationError {}

/// One phone number owned by a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub id: PhoneNumberId,
    /// Back-reference to the owning contact. Lookup only, not ownership.
    pub contact_id: ContactId,
    pub number: String,
    /// Free-form label such as "Mobile", "Work" or "Home".
    #[serde(rename = "type")]
    pub kind: String,
}

/// Canonical contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ContactWire")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    /// Date of birth. Only month and day matter for birthday checks.
    pub dob: NaiveDate,
    pub notes: String,
    pub is_favourite: bool,
    /// Unordered by meaning; kept in insertion order so editors can
    /// address rows by position.
    pub phone_numbers: Vec<PhoneNumber>,
}

#[derive(Deserialize)]
struct ContactWire {
    id: ContactId,
    name: String,
    email: String,
    dob: NaiveDate,
    notes: String,
    is_favourite: bool,
    phone_numbers: Vec<PhoneNumber>,
}

impl TryFrom<ContactWire> for Contact {
    type Error = ContactValidationError;

    // Drafts may legitimately carry an empty name/email, so only the
    // structural invariants are enforced on decode.
    fn try_from(value: ContactWire) -> Result<Self, Self::Error> {
        let contact = Self {
            id: value.id,
            name: value.name,
            email: value.email,
            dob: value.dob,
            notes: value.notes,
            is_favourite: value.is_favourite,
            phone_numbers: value.phone_numbers,
        };
        contact.validate_structure()?;
        Ok(contact)
    }
}

impl Contact {
    /// Creates a new contact with a generated id.
    ///
    /// # Invariants
    /// - `dob` defaults to today's local date.
    /// - `is_favourite` defaults to `false`.
    /// - Text fields start empty, so the result is not yet valid.
    pub fn new() -> Self {
        Self::build(Uuid::new_v4())
    }

    /// Creates a contact with a caller-provided id.
    ///
    /// Used by import/restore paths where identity already exists.
    pub fn with_id(id: ContactId) -> Result<Self, ContactValidationError> {
        if id.is_nil() {
            return Err(ContactValidationError::NilId);
        }
        Ok(Self::build(id))
    }

    fn build(id: ContactId) -> Self {
        Self {
            id,
            name: String::new(),
            email: String::new(),
            dob: today(),
            notes: String::new(),
            is_favourite: false,
            phone_numbers: Vec::new(),
        }
    }

    /// Returns whether the contact can be saved.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty()
    }

    /// Validates structural and save-time invariants.
    ///
    /// # Errors
    /// - Structural errors (`NilId`, phone ownership) are reported first.
    /// - `EmptyName` wins over `EmptyEmail` when both are blank.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        self.validate_structure()?;
        if self.name.is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        if self.email.is_empty() {
            return Err(ContactValidationError::EmptyEmail);
        }
        Ok(())
    }

    fn validate_structure(&self) -> Result<(), ContactValidationError> {
        if self.id.is_nil() {
            return Err(ContactValidationError::NilId);
        }
        for (index, phone) in self.phone_numbers.iter().enumerate() {
            if phone.contact_id != self.id {
                return Err(ContactValidationError::ForeignPhoneNumber {
                    phone_id: phone.id,
                    owner: phone.contact_id,
                });
            }
            if self.phone_numbers[..index]
                .iter()
                .any(|earlier| earlier.id == phone.id)
            {
                return Err(ContactValidationError::DuplicatePhoneNumber(phone.id));
            }
        }
        Ok(())
    }

    /// Returns whether today (local calendar) is this contact's birthday.
    pub fn is_birthday(&self) -> bool {
        self.is_birthday_on(today())
    }

    /// Returns whether `day` shares month and day with `dob`, any year.
    pub fn is_birthday_on(&self, day: NaiveDate) -> bool {
        self.dob.month() == day.month() && self.dob.day() == day.day()
    }

    /// Display name, prefixed with the birthday marker on the birthday.
    pub fn formatted_name(&self) -> String {
        self.formatted_name_on(today())
    }

    /// Same as [`Contact::formatted_name`] for an explicit reference day.
    pub fn formatted_name_on(&self, day: NaiveDate) -> String {
        if self.is_birthday_on(day) {
            format!("{BIRTHDAY_MARKER}{}", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Attaches a new phone number to this contact and returns its id.
    pub fn add_phone_number(
        &mut self,
        number: impl Into<String>,
        kind: impl Into<String>,
    ) -> PhoneNumberId {
        let phone = PhoneNumber {
            id: Uuid::new_v4(),
            contact_id: self.id,
            number: number.into(),
            kind: kind.into(),
        };
        let id = phone.id;
        self.phone_numbers.push(phone);
        id
    }

    /// Removes phone numbers by position in `phone_numbers`.
    ///
    /// Positions refer to the collection before removal; out-of-range and
    /// repeated positions are ignored. Returns the removed rows.
    pub fn remove_phone_numbers(&mut self, positions: &[usize]) -> Vec<PhoneNumber> {
        let mut removed = Vec::new();
        let mut index = 0;
        self.phone_numbers.retain(|phone| {
            let keep = !positions.contains(&index);
            if !keep {
                removed.push(phone.clone());
            }
            index += 1;
            keep
        });
        removed
    }
}

impl Default for Contact {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds deterministic preview contacts.
///
/// Contact `i` is named `item i`, uses `test_i@mail.com`, was born `i` days
/// before `today` and owns three numbers labelled Mobile, Work and Home.
/// Favourites alternate, starting with `item 0`.
pub fn sample_contacts(count: usize, today: NaiveDate) -> Vec<Contact> {
    (0..count)
        .map(|i| {
            let mut contact = Contact::new();
            contact.name = format!("item {i}");
            contact.email = format!("test_{i}@mail.com");
            contact.is_favourite = i % 2 == 0;
            contact.dob = today
                .checked_sub_days(Days::new(i as u64))
                .unwrap_or(today);
            contact.notes = format!("This is a preview for item {i}");
            for (j, kind) in ["Mobile", "Work", "Home"].into_iter().enumerate() {
                contact.add_phone_number(format!("0700000{i}{j}"), kind);
            }
            contact
        })
        .collect()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
