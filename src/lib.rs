// Library root
// -----------
// A personal book log for the terminal. The binary (`main.rs`) wires these
// modules into the interactive menu.
//
// Module responsibilities:
// - `book`: the `Book` record and its half-step `Rating`.
// - `validate`: field validators the prompts run on each answer.
// - `cancel`: the cancellation channel multi-step handlers arm.
// - `store`: the `BookStore` repository and its SQLite implementation.
// - `prompt`: the `Prompter` seam and its `dialoguer` implementation.
// - `handlers`: Add, View, Update and Delete.
// - `ui`: the main menu loop and outcome printing.
// - `config`: optional JSON config file.
//
// Handlers only talk to the `BookStore` and `Prompter` traits, so tests can
// drive them with scripted answers and an in-memory database.
pub mod book;
pub mod cancel;
pub mod config;
pub mod error;
pub mod handlers;
pub mod prompt;
pub mod store;
pub mod ui;
pub mod validate;

pub use book::{Book, BookId, NewBook, Rating};
pub use cancel::CancelSignal;
pub use config::Config;
pub use error::StoreError;
pub use handlers::{BookLog, Outcome};
pub use prompt::{Prompter, TerminalPrompter, TextPrompt};
pub use store::{BookStore, SqliteStore};
