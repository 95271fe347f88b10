//! List store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the default item collection and named list documents.
//! - Seed the default collection exactly once when it is empty.
//!
//! # Invariants
//! - Read-modify-write of a list document runs inside one IMMEDIATE
//!   transaction, so concurrent writers never lose each other's items.
//! - Creating a list never overwrites an existing one with the same
//!   normalized name; the loser observes `StoreError::DuplicateKey`.
//! - Deleting an unknown item id is a no-op, not an error.

use crate::db::DbError;
use crate::model::list::{normalize_list_name, seed_items, Item, ItemId, List};
use log::{debug, info, warn};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error surfaced by list store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Backend connectivity or operation failure.
    Unavailable(DbError),
    /// No list exists under the given normalized name.
    NotFound(String),
    /// A list with the given normalized name already exists.
    DuplicateKey(String),
    /// Persisted rows could not be mapped back into domain records.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(err) => write!(f, "store unavailable: {err}"),
            Self::NotFound(name) => write!(f, "list not found: {name}"),
            Self::DuplicateKey(name) => write!(f, "list already exists: {name}"),
            Self::InvalidData(message) => write!(f, "invalid persisted list data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateKey(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Unavailable(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Unavailable(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Unavailable(DbError::Document(value))
    }
}

/// Persistence contract for the default collection and named lists.
///
/// Every `name` argument is normalized by the implementation before use.
pub trait ListStore {
    /// Returns all default items in insertion order.
    ///
    /// When the collection is empty the seed items are inserted and an empty
    /// vector is still returned; callers re-fetch to observe them.
    fn get_default_items(&self) -> StoreResult<Vec<Item>>;
    /// Inserts the seed items when the default collection is empty.
    ///
    /// Returns whether seeding happened.
    fn ensure_default_seeded(&self) -> StoreResult<bool>;
    fn get_list(&self, name: &str) -> StoreResult<Option<List>>;
    fn create_list(&self, name: &str, items: Vec<Item>) -> StoreResult<List>;
    fn add_item_to_default(&self, text: &str) -> StoreResult<Item>;
    fn add_item_to_list(&self, name: &str, text: &str) -> StoreResult<Item>;
    /// Returns whether an item was removed.
    fn delete_default_item(&self, id: ItemId) -> StoreResult<bool>;
    /// Returns whether an item was removed. A missing list removes nothing.
    fn delete_item_from_list(&self, name: &str, id: ItemId) -> StoreResult<bool>;
}

/// SQLite-backed list store.
pub struct SqliteListStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteListStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn write_transaction(&self) -> StoreResult<Transaction<'conn>> {
        Ok(Transaction::new_unchecked(
            self.conn,
            TransactionBehavior::Immediate,
        )?)
    }
}

impl ListStore for SqliteListStore<'_> {
    fn get_default_items(&self) -> StoreResult<Vec<Item>> {
        let items = load_default_items(self.conn)?;
        if items.is_empty() {
            self.ensure_default_seeded()?;
        }
        Ok(items)
    }

    fn ensure_default_seeded(&self) -> StoreResult<bool> {
        let tx = self.write_transaction()?;
        let count: i64 = tx.query_row("SELECT COUNT(*) FROM items;", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(false);
        }

        let seeds = seed_items();
        for item in &seeds {
            insert_default_item(&tx, item)?;
        }
        tx.commit()?;

        info!(
            "event=default_seed module=repo status=ok count={}",
            seeds.len()
        );
        Ok(true)
    }

    fn get_list(&self, name: &str) -> StoreResult<Option<List>> {
        load_list(self.conn, &normalize_list_name(name))
    }

    fn create_list(&self, name: &str, items: Vec<Item>) -> StoreResult<List> {
        let list = List::new(name, items);
        let document = serde_json::to_string(&list.items)?;

        let inserted = self.conn.execute(
            "INSERT INTO lists (id, name, items) VALUES (?1, ?2, ?3);",
            params![list.id.to_string(), list.name.as_str(), document],
        );
        match inserted {
            Ok(_) => {
                info!(
                    "event=list_create module=repo status=ok items={}",
                    list.items.len()
                );
                Ok(list)
            }
            Err(err) => {
                let err = DbError::from(err);
                if err.is_constraint_violation() {
                    warn!("event=list_create module=repo status=error error_code=duplicate_key");
                    return Err(StoreError::DuplicateKey(list.name));
                }
                Err(err.into())
            }
        }
    }

    fn add_item_to_default(&self, text: &str) -> StoreResult<Item> {
        let item = Item::new(text);
        insert_default_item(self.conn, &item)?;
        debug!("event=item_add module=repo status=ok target=default");
        Ok(item)
    }

    fn add_item_to_list(&self, name: &str, text: &str) -> StoreResult<Item> {
        let normalized = normalize_list_name(name);
        let tx = self.write_transaction()?;
        let Some(mut list) = load_list(&tx, &normalized)? else {
            return Err(StoreError::NotFound(normalized));
        };

        let item = Item::new(text);
        list.items.push(item.clone());
        save_list_items(&tx, &list)?;
        tx.commit()?;

        debug!("event=item_add module=repo status=ok target=list");
        Ok(item)
    }

    fn delete_default_item(&self, id: ItemId) -> StoreResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1;", [id.to_string()])?;
        debug!("event=item_delete module=repo status=ok target=default removed={removed}");
        Ok(removed > 0)
    }

    fn delete_item_from_list(&self, name: &str, id: ItemId) -> StoreResult<bool> {
        let normalized = normalize_list_name(name);
        let tx = self.write_transaction()?;
        let Some(mut list) = load_list(&tx, &normalized)? else {
            debug!("event=item_delete module=repo status=skip target=list reason=list_missing");
            return Ok(false);
        };

        let before = list.items.len();
        list.items.retain(|item| item.id != id);
        if list.items.len() == before {
            return Ok(false);
        }

        save_list_items(&tx, &list)?;
        tx.commit()?;
        debug!("event=item_delete module=repo status=ok target=list removed=1");
        Ok(true)
    }
}

fn load_default_items(conn: &Connection) -> StoreResult<Vec<Item>> {
    let mut stmt = conn.prepare("SELECT id, name FROM items ORDER BY seq ASC;")?;
    let mut rows = stmt.query([])?;
    let mut items = Vec::new();

    while let Some(row) = rows.next()? {
        let id_text: String = row.get("id")?;
        items.push(Item {
            id: parse_uuid(&id_text, "items.id")?,
            name: row.get("name")?,
        });
    }

    Ok(items)
}

fn insert_default_item(conn: &Connection, item: &Item) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO items (id, name) VALUES (?1, ?2);",
        params![item.id.to_string(), item.name.as_str()],
    )?;
    Ok(())
}

fn load_list(conn: &Connection, normalized_name: &str) -> StoreResult<Option<List>> {
    let row = conn
        .query_row(
            "SELECT id, name, items FROM lists WHERE name = ?1;",
            [normalized_name],
            |row| {
                Ok((
                    row.get::<_, String>("id")?,
                    row.get::<_, String>("name")?,
                    row.get::<_, String>("items")?,
                ))
            },
        )
        .optional()?;

    let Some((id_text, name, document)) = row else {
        return Ok(None);
    };

    let items: Vec<Item> = serde_json::from_str(&document).map_err(|err| {
        StoreError::InvalidData(format!("invalid items document for list `{name}`: {err}"))
    })?;

    Ok(Some(List {
        id: parse_uuid(&id_text, "lists.id")?,
        name,
        items,
    }))
}

fn save_list_items(conn: &Connection, list: &List) -> StoreResult<()> {
    let document = serde_json::to_string(&list.items)?;
    conn.execute(
        "UPDATE lists SET items = ?1 WHERE id = ?2;",
        params![document, list.id.to_string()],
    )?;
    Ok(())
}

fn parse_uuid(value: &str, column: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}
