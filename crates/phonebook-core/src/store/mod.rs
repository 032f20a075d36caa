//! Collection Store
//!
//! SQLite-backed document collection of Person records. Each record is keyed
//! by an opaque identifier assigned at insert; listing follows insertion
//! order. The store knows nothing about duplicate names or client-side
//! rules - it only supports find-all, find-by-id, insert, update-by-id,
//! delete-by-id, and count.

mod error;

pub use error::{StoreError, StoreResult};

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::config::Config;
use crate::models::Person;

/// SQLite-backed collection of Person records
pub struct PersonStore {
    conn: Connection,
}

impl PersonStore {
    /// Open or create the store at the location given by `config`
    pub fn open(config: &Config) -> StoreResult<Self> {
        let path = config.sqlite_path();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(&path).map_err(|source| StoreError::Open {
            path: path.clone(),
            source,
        })?;

        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Get all persons in insertion order
    pub fn all(&self) -> StoreResult<Vec<Person>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, number FROM persons ORDER BY rowid")?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut persons = Vec::new();
        for row in rows {
            persons.push(hydrate(row?)?);
        }
        Ok(persons)
    }

    /// Get a person by id
    pub fn get(&self, id: Uuid) -> StoreResult<Option<Person>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, number FROM persons WHERE id = ?1")?;

        let mut rows = stmt.query_map(params![id.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        match rows.next() {
            Some(row) => Ok(Some(hydrate(row?)?)),
            None => Ok(None),
        }
    }

    /// Insert a new person, assigning a fresh id
    pub fn insert(&mut self, name: &str, number: &str) -> StoreResult<Person> {
        let person = Person::new(name, number);
        self.conn.execute(
            "INSERT INTO persons (id, name, number) VALUES (?1, ?2, ?3)",
            params![person.id.to_string(), person.name, person.number],
        )?;
        Ok(person)
    }

    /// Replace name and number for the given id
    ///
    /// Returns the updated person, or `None` if no record has that id.
    pub fn update(&mut self, id: Uuid, name: &str, number: &str) -> StoreResult<Option<Person>> {
        let changed = self.conn.execute(
            "UPDATE persons SET name = ?1, number = ?2 WHERE id = ?3",
            params![name, number, id.to_string()],
        )?;

        if changed == 0 {
            return Ok(None);
        }
        Ok(Some(Person::with_id(id, name, number)))
    }

    /// Delete a person by id
    ///
    /// Returns whether a record was actually removed.
    pub fn delete(&mut self, id: Uuid) -> StoreResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM persons WHERE id = ?1", params![id.to_string()])?;
        Ok(removed > 0)
    }

    /// Get the number of stored persons
    pub fn count(&self) -> StoreResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM persons", [], |row| row.get(0))?;
        Ok(count)
    }
}

/// Initialize the database schema
fn init_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS persons (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            number TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Convert a raw row into a Person
fn hydrate((id, name, number): (String, String, String)) -> StoreResult<Person> {
    let id = Uuid::parse_str(&id).map_err(|e| StoreError::Corrupt {
        details: format!("invalid person id '{}': {}", id, e),
    })?;
    Ok(Person::with_id(id, name, number))
}
