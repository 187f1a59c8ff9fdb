// Record store: a narrow repository over the `books` table.
//
// `SqliteStore` opens its connection lazily. A failed open at startup is
// reported and every later call tries again, so each operation fails on its
// own instead of taking the whole program down.

use rusqlite::{params, Connection, OptionalExtension, Row};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::book::{Book, BookId, NewBook};
use crate::error::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS books (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        author TEXT NOT NULL,
        stars REAL NOT NULL
    );";

/// CRUD operations the handlers rely on.
pub trait BookStore {
    /// Insert a book and return the id the store assigned to it.
    fn insert(&mut self, book: &NewBook) -> Result<BookId>;

    /// Every book, ordered by author ascending.
    fn fetch_all(&mut self) -> Result<Vec<Book>>;

    fn fetch_by_id(&mut self, id: BookId) -> Result<Option<Book>>;

    /// Overwrite name, author and stars of `id`. Returns rows affected.
    fn update(&mut self, id: BookId, book: &NewBook) -> Result<usize>;

    /// Returns rows affected.
    fn delete(&mut self, id: BookId) -> Result<usize>;

    fn close(&mut self) -> Result<()>;
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

/// SQLite-backed store.
pub struct SqliteStore {
    location: Location,
    conn: Option<Connection>,
}

impl SqliteStore {
    /// Store backed by the database file at `path`. Nothing is opened until
    /// `connect` or the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SqliteStore {
            location: Location::File(path.into()),
            conn: None,
        }
    }

    /// Store opened eagerly.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut store = SqliteStore::new(path);
        store.connect()?;
        Ok(store)
    }

    /// Private in-memory database, gone once closed.
    pub fn in_memory() -> Result<Self> {
        let mut store = SqliteStore {
            location: Location::Memory,
            conn: None,
        };
        store.connect()?;
        Ok(store)
    }

    /// Open the connection now if it is not open yet.
    pub fn connect(&mut self) -> Result<()> {
        self.connection().map(|_| ())
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    fn connection(&mut self) -> Result<&mut Connection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => open_connection(&self.location)?,
        };
        Ok(self.conn.insert(conn))
    }
}

fn open_connection(location: &Location) -> Result<Connection> {
    let conn = match location {
        Location::File(path) => {
            create_parent_dir(path)?;
            debug!(path = %path.display(), "opening book database");
            Connection::open(path)?
        }
        Location::Memory => Connection::open_in_memory()?,
    };
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

fn create_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}

fn row_to_book(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        name: row.get(1)?,
        author: row.get(2)?,
        stars: row.get(3)?,
    })
}

impl BookStore for SqliteStore {
    fn insert(&mut self, book: &NewBook) -> Result<BookId> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO books (name, author, stars) VALUES (?1, ?2, ?3)",
            params![book.name, book.author, book.stars],
        )?;
        let id = conn.last_insert_rowid();
        info!(id, "book inserted");
        Ok(id)
    }

    fn fetch_all(&mut self) -> Result<Vec<Book>> {
        let conn = self.connection()?;
        let mut stmt =
            conn.prepare("SELECT id, name, author, stars FROM books ORDER BY author ASC, id ASC")?;
        let books = stmt
            .query_map([], row_to_book)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(books)
    }

    fn fetch_by_id(&mut self, id: BookId) -> Result<Option<Book>> {
        let book = self
            .connection()?
            .query_row(
                "SELECT id, name, author, stars FROM books WHERE id = ?1",
                params![id],
                row_to_book,
            )
            .optional()?;
        Ok(book)
    }

    fn update(&mut self, id: BookId, book: &NewBook) -> Result<usize> {
        let rows = self.connection()?.execute(
            "UPDATE books SET name = ?1, author = ?2, stars = ?3 WHERE id = ?4",
            params![book.name, book.author, book.stars, id],
        )?;
        info!(id, rows, "book updated");
        Ok(rows)
    }

    fn delete(&mut self, id: BookId) -> Result<usize> {
        let rows = self
            .connection()?
            .execute("DELETE FROM books WHERE id = ?1", params![id])?;
        info!(id, rows, "book deleted");
        Ok(rows)
    }

    fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, err)| err)?;
            debug!("book database closed");
        }
        Ok(())
    }
}
