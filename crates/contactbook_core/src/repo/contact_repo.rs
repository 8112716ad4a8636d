//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Fetch contacts through caller-supplied predicate and comparator.
//! - Commit a contact with its phone numbers in one transaction.
//!
//! # Invariants
//! - Write paths call `Contact::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `fetch_all` sorts stably over insertion order.

use crate::db::DbError;
use crate::model::contact::{Contact, ContactId, ContactValidationError, PhoneNumber};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const DOB_FORMAT: &str = "%Y-%m-%d";

const CONTACT_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    email,
    dob,
    notes,
    is_favourite
FROM contacts";

const PHONE_SELECT_SQL: &str = "SELECT
    uuid,
    contact_uuid,
    number,
    type
FROM phone_numbers";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    NotFound(ContactId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "contact store is missing required table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage collaborator for contacts.
///
/// Predicates and comparators passed in are pure; implementations may call
/// them any number of times in any order.
pub trait ContactRepository {
    /// Returns every contact accepted by `predicate`, ordered by
    /// `comparator`. Ties keep insertion order.
    fn fetch_all(
        &self,
        predicate: &dyn Fn(&Contact) -> bool,
        comparator: &dyn Fn(&Contact, &Contact) -> Ordering,
    ) -> RepoResult<Vec<Contact>>;

    /// Returns the stored copy of `id`, if any.
    fn exists(&self, id: ContactId) -> RepoResult<Option<Contact>>;

    /// Inserts or updates `contact` and replaces its phone-number set.
    ///
    /// Either everything is stored or nothing is.
    fn commit(&mut self, contact: &Contact) -> RepoResult<()>;

    /// Commits several contacts in one transaction.
    ///
    /// Every contact is validated before anything is written; a failure on
    /// any of them leaves the store unchanged.
    fn commit_all(&mut self, contacts: &[Contact]) -> RepoResult<()>;

    /// Deletes a contact and, by cascade, its phone numbers.
    fn delete_contact(&mut self, id: ContactId) -> RepoResult<()>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when the schema has not been applied.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        for table in ["contacts", "phone_numbers"] {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn fetch_all(
        &self,
        predicate: &dyn Fn(&Contact) -> bool,
        comparator: &dyn Fn(&Contact, &Contact) -> Ordering,
    ) -> RepoResult<Vec<Contact>> {
        let mut phones_by_contact = load_all_phone_numbers(self.conn)?;

        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            let uuid_text: String = row.get("uuid")?;
            let phone_numbers = phones_by_contact.remove(&uuid_text).unwrap_or_default();
            let contact = parse_contact_row(row, phone_numbers)?;
            if predicate(&contact) {
                contacts.push(contact);
            }
        }

        contacts.sort_by(|left, right| comparator(left, right));
        Ok(contacts)
    }

    fn exists(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let phone_numbers = load_phone_numbers_for(self.conn, id)?;
        Ok(Some(parse_contact_row(row, phone_numbers)?))
    }

    fn commit(&mut self, contact: &Contact) -> RepoResult<()> {
        self.commit_all(std::slice::from_ref(contact))
    }

    fn commit_all(&mut self, contacts: &[Contact]) -> RepoResult<()> {
        for contact in contacts {
            contact.validate()?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        for contact in contacts {
            write_contact(&tx, contact)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn delete_contact(&mut self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

/// Upserts one contact row and replaces its phone rows inside `tx`.
fn write_contact(tx: &Transaction<'_>, contact: &Contact) -> RepoResult<()> {
    let contact_uuid = contact.id.to_string();

    tx.execute(
        "INSERT INTO contacts (
            uuid,
            name,
            email,
            dob,
            notes,
            is_favourite
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT (uuid) DO UPDATE SET
            name = excluded.name,
            email = excluded.email,
            dob = excluded.dob,
            notes = excluded.notes,
            is_favourite = excluded.is_favourite,
            updated_at = (strftime('%s', 'now') * 1000);",
        params![
            contact_uuid.as_str(),
            contact.name.as_str(),
            contact.email.as_str(),
            contact.dob.format(DOB_FORMAT).to_string(),
            contact.notes.as_str(),
            bool_to_int(contact.is_favourite),
        ],
    )?;

    tx.execute(
        "DELETE FROM phone_numbers WHERE contact_uuid = ?1;",
        [contact_uuid.as_str()],
    )?;

    for (position, phone) in contact.phone_numbers.iter().enumerate() {
        tx.execute(
            "INSERT INTO phone_numbers (
                uuid,
                contact_uuid,
                number,
                type,
                position
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                phone.id.to_string(),
                contact_uuid.as_str(),
                phone.number.as_str(),
                phone.kind.as_str(),
                position as i64,
            ],
        )?;
    }

    Ok(())
}

fn parse_contact_row(row: &Row<'_>, phone_numbers: Vec<PhoneNumber>) -> RepoResult<Contact> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "contacts.uuid")?;

    let dob_text: String = row.get("dob")?;
    let dob = NaiveDate::parse_from_str(&dob_text, DOB_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{dob_text}` in contacts.dob"))
    })?;

    let is_favourite = match row.get::<_, i64>("is_favourite")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_favourite value `{other}` in contacts.is_favourite"
            )));
        }
    };

    let contact = Contact {
        id,
        name: row.get("name")?,
        email: row.get("email")?,
        dob,
        notes: row.get("notes")?,
        is_favourite,
        phone_numbers,
    };
    contact.validate()?;
    Ok(contact)
}

fn parse_phone_row(row: &Row<'_>) -> RepoResult<PhoneNumber> {
    let uuid_text: String = row.get("uuid")?;
    let contact_text: String = row.get("contact_uuid")?;
    Ok(PhoneNumber {
        id: parse_uuid(&uuid_text, "phone_numbers.uuid")?,
        contact_id: parse_uuid(&contact_text, "phone_numbers.contact_uuid")?,
        number: row.get("number")?,
        kind: row.get("type")?,
    })
}

fn load_all_phone_numbers(conn: &Connection) -> RepoResult<HashMap<String, Vec<PhoneNumber>>> {
    let mut stmt = conn.prepare(&format!(
        "{PHONE_SELECT_SQL} ORDER BY contact_uuid ASC, position ASC;"
    ))?;
    let mut rows = stmt.query([])?;
    let mut grouped: HashMap<String, Vec<PhoneNumber>> = HashMap::new();

    while let Some(row) = rows.next()? {
        let contact_text: String = row.get("contact_uuid")?;
        let phone = parse_phone_row(row)?;
        grouped.entry(contact_text).or_default().push(phone);
    }

    Ok(grouped)
}

fn load_phone_numbers_for(conn: &Connection, id: ContactId) -> RepoResult<Vec<PhoneNumber>> {
    let mut stmt = conn.prepare(&format!(
        "{PHONE_SELECT_SQL} WHERE contact_uuid = ?1 ORDER BY position ASC;"
    ))?;
    let mut rows = stmt.query([id.to_string()])?;
    let mut phones = Vec::new();

    while let Some(row) = rows.next()? {
        phones.push(parse_phone_row(row)?);
    }

    Ok(phones)
}

fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
