// Operation handlers: Add, View, Update and Delete.
//
// `BookLog` owns the store, the prompter and the cancellation channel. Each
// handler runs to completion and returns an `Outcome` for the menu to print.
// Store failures become `Outcome::StoreFailed`; only a broken terminal
// (an error from the prompter) is returned as `Err`.

use anyhow::{anyhow, Result};
use tracing::{debug, warn};

use crate::book::{Book, BookId, NewBook, Rating};
use crate::cancel::CancelSignal;
use crate::error::StoreError;
use crate::prompt::{Prompter, TextPrompt};
use crate::store::BookStore;
use crate::validate::{validate_id, validate_rating, validate_text};

/// What a handler did, ready to be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Added { id: BookId },
    Listed(Vec<Book>),
    Updated { id: BookId, rows: usize },
    Deleted { id: BookId, rows: usize },
    /// Holds the id exactly as the user typed it.
    NotFound { id: String },
    Cancelled,
    StoreFailed(String),
}

impl Outcome {
    /// One-line report. Listings only get their header here.
    pub fn message(&self) -> String {
        match self {
            Outcome::Added { id } => format!("Your book details have been saved with ID {id}"),
            Outcome::Listed(_) => "All books:".to_string(),
            Outcome::Updated { id, rows } => {
                format!("Book with ID {id} has been updated. Rows affected: {rows}")
            }
            Outcome::Deleted { id, rows } => {
                format!("Book with ID {id} has been deleted. Rows affected: {rows}")
            }
            Outcome::NotFound { id } => format!("No book found with ID {id}"),
            Outcome::Cancelled => "Cancelled, back to the menu.".to_string(),
            Outcome::StoreFailed(err) => format!("Something went wrong: {err}"),
        }
    }
}

/// Result of asking for an id: the book, or what to report instead.
enum Lookup {
    Found(Book),
    Done(Outcome),
}

fn store_failed(action: &str, err: StoreError) -> Outcome {
    warn!(action, error = %err, "store operation failed");
    Outcome::StoreFailed(err.to_string())
}

/// A session over one store and one prompter.
pub struct BookLog<S, P> {
    store: S,
    prompter: P,
    cancel: CancelSignal,
}

impl<S: BookStore, P: Prompter> BookLog<S, P> {
    pub fn new(store: S, prompter: P, cancel: CancelSignal) -> Self {
        BookLog {
            store,
            prompter,
            cancel,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn prompter_mut(&mut self) -> &mut P {
        &mut self.prompter
    }

    /// Shared handle to the cancellation channel, e.g. for a key listener.
    pub fn cancel_signal(&self) -> &CancelSignal {
        &self.cancel
    }

    /// Label with the cancel hint appended.
    fn label(&self, question: &str) -> String {
        format!("{question} ({} to cancel)", self.cancel.token())
    }

    /// Ask one question. `None` means the handler was cancelled, either by
    /// this answer or by a raise that happened before it.
    fn ask(&mut self, prompt: TextPrompt) -> Result<Option<String>> {
        if self.cancel.is_raised() {
            return Ok(None);
        }
        let answer = self.prompter.text(&prompt, &self.cancel)?;
        if self.cancel.intercept(&answer) {
            debug!(label = %prompt.label, "prompt cancelled");
            return Ok(None);
        }
        Ok(Some(answer))
    }

    fn ask_rating(&mut self, question: &str) -> Result<Option<Rating>> {
        let prompt = TextPrompt::new(self.label(question), validate_rating);
        match self.ask(prompt)? {
            Some(raw) => {
                let rating = raw
                    .parse::<Rating>()
                    .map_err(|err| anyhow!("prompter returned an unvalidated rating: {err}"))?;
                Ok(Some(rating))
            }
            None => Ok(None),
        }
    }

    /// Ask for an id and look the book up.
    fn find_book(&mut self, question: &str, action: &str) -> Result<Lookup> {
        let prompt = TextPrompt::new(self.label(question), validate_id);
        let Some(raw) = self.ask(prompt)? else {
            return Ok(Lookup::Done(Outcome::Cancelled));
        };
        // Digits too long for an id cannot name a stored book.
        let Ok(id) = raw.parse::<BookId>() else {
            return Ok(Lookup::Done(Outcome::NotFound { id: raw }));
        };
        match self.store.fetch_by_id(id) {
            Ok(Some(book)) => Ok(Lookup::Found(book)),
            Ok(None) => {
                debug!(id, action, "no book with id");
                Ok(Lookup::Done(Outcome::NotFound { id: id.to_string() }))
            }
            Err(err) => Ok(Lookup::Done(store_failed(action, err))),
        }
    }

    /// Collect name, author and stars, then insert a new book.
    pub fn add(&mut self) -> Result<Outcome> {
        let _armed = self.cancel.arm();

        let name_prompt = TextPrompt::new(self.label("What book did you read?"), validate_text);
        let Some(name) = self.ask(name_prompt)? else {
            return Ok(Outcome::Cancelled);
        };
        let author_prompt = TextPrompt::new(self.label("Name of the author?"), validate_text);
        let Some(author) = self.ask(author_prompt)? else {
            return Ok(Outcome::Cancelled);
        };
        let Some(stars) = self.ask_rating("Rate the book (1-5)")? else {
            return Ok(Outcome::Cancelled);
        };
        if self.cancel.is_raised() {
            return Ok(Outcome::Cancelled);
        }

        let book = NewBook { name, author, stars };
        match self.store.insert(&book) {
            Ok(id) => Ok(Outcome::Added { id }),
            Err(err) => Ok(store_failed("add", err)),
        }
    }

    /// List every book ordered by author.
    pub fn view(&mut self) -> Result<Outcome> {
        match self.store.fetch_all() {
            Ok(books) => Ok(Outcome::Listed(books)),
            Err(err) => Ok(store_failed("view", err)),
        }
    }

    /// Pick a book by id, then overwrite its fields.
    pub fn update(&mut self) -> Result<Outcome> {
        let _armed = self.cancel.arm();

        let question = "Enter the ID of the book you want to update:";
        let book = match self.find_book(question, "update")? {
            Lookup::Found(book) => book,
            Lookup::Done(outcome) => return Ok(outcome),
        };

        let name_prompt =
            TextPrompt::new(self.label("Update the name of the book:"), validate_text)
                .with_default(book.name.clone());
        let Some(name) = self.ask(name_prompt)? else {
            return Ok(Outcome::Cancelled);
        };
        let author_prompt =
            TextPrompt::new(self.label("Update the name of the author:"), validate_text)
                .with_default(book.author.clone());
        let Some(author) = self.ask(author_prompt)? else {
            return Ok(Outcome::Cancelled);
        };
        let Some(stars) = self.ask_rating("Enter the updated number of stars:")? else {
            return Ok(Outcome::Cancelled);
        };
        if self.cancel.is_raised() {
            return Ok(Outcome::Cancelled);
        }

        let changes = NewBook { name, author, stars };
        match self.store.update(book.id, &changes) {
            Ok(rows) => Ok(Outcome::Updated { id: book.id, rows }),
            Err(err) => Ok(store_failed("update", err)),
        }
    }

    /// Pick a book by id and remove it.
    pub fn delete(&mut self) -> Result<Outcome> {
        let _armed = self.cancel.arm();

        let question = "Enter the ID of the book you want to delete:";
        let book = match self.find_book(question, "delete")? {
            Lookup::Found(book) => book,
            Lookup::Done(outcome) => return Ok(outcome),
        };
        if self.cancel.is_raised() {
            return Ok(Outcome::Cancelled);
        }

        match self.store.delete(book.id) {
            Ok(rows) => Ok(Outcome::Deleted { id: book.id, rows }),
            Err(err) => Ok(store_failed("delete", err)),
        }
    }

    /// Close the store. Called once, on Exit.
    pub fn shutdown(&mut self) -> std::result::Result<(), StoreError> {
        self.store.close()
    }
}
