// Test doubles shared by the integration tests.
#![allow(dead_code)]

use anyhow::{anyhow, Result};
use std::collections::VecDeque;
use std::io;

use booklog_cli::{
    Book, BookId, BookStore, CancelSignal, NewBook, Prompter, SqliteStore, StoreError, TextPrompt,
};

/// One scripted keyboard answer.
#[derive(Debug, Clone)]
pub enum Step {
    /// Type this and press Enter. An empty string accepts the default.
    Type(&'static str),
    /// Raise the cancel signal from outside (like a key listener), then type.
    RaiseThenType(&'static str),
}

/// Prompter replaying a fixed script. Rejected answers are recorded and the
/// next step is used, like a real prompt asking again.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    steps: VecDeque<Step>,
    choices: VecDeque<usize>,
    pub labels: Vec<String>,
    pub defaults: Vec<Option<String>>,
    pub rejections: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        ScriptedPrompter {
            steps: steps.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn typing(answers: &[&'static str]) -> Self {
        Self::new(answers.iter().map(|a| Step::Type(*a)))
    }

    pub fn with_choices(mut self, choices: &[usize]) -> Self {
        self.choices = choices.iter().copied().collect();
        self
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&mut self, prompt: &TextPrompt, cancel: &CancelSignal) -> Result<String> {
        self.labels.push(prompt.label.clone());
        self.defaults.push(prompt.default.clone());
        loop {
            let step = self
                .steps
                .pop_front()
                .ok_or_else(|| anyhow!("script ran out at {:?}", prompt.label))?;
            let typed = match step {
                Step::Type(text) => text,
                Step::RaiseThenType(text) => {
                    cancel.raise();
                    text
                }
            };
            let answer = match (&prompt.default, typed.is_empty()) {
                (Some(default), true) => default.clone(),
                _ => typed.to_string(),
            };
            if cancel.matches(&answer) {
                return Ok(answer);
            }
            match (prompt.validator)(&answer) {
                Ok(()) => return Ok(answer),
                Err(message) => self.rejections.push(message.to_string()),
            }
        }
    }

    fn choice(&mut self, _label: &str, options: &[&str]) -> Result<usize> {
        let index = self
            .choices
            .pop_front()
            .ok_or_else(|| anyhow!("no menu choice left"))?;
        assert!(index < options.len());
        Ok(index)
    }
}

/// Store whose every operation fails.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub calls: usize,
}

impl FailingStore {
    fn fail<T>(&mut self) -> Result<T, StoreError> {
        self.calls += 1;
        Err(StoreError::Io(io::Error::new(io::ErrorKind::Other, "disk unplugged")))
    }
}

impl BookStore for FailingStore {
    fn insert(&mut self, _book: &NewBook) -> Result<BookId, StoreError> {
        self.fail()
    }
    fn fetch_all(&mut self) -> Result<Vec<Book>, StoreError> {
        self.fail()
    }
    fn fetch_by_id(&mut self, _id: BookId) -> Result<Option<Book>, StoreError> {
        self.fail()
    }
    fn update(&mut self, _id: BookId, _book: &NewBook) -> Result<usize, StoreError> {
        self.fail()
    }
    fn delete(&mut self, _id: BookId) -> Result<usize, StoreError> {
        self.fail()
    }
    fn close(&mut self) -> Result<(), StoreError> {
        self.fail()
    }
}

/// In-memory SQLite store that counts mutating calls and closes.
pub struct RecordingStore {
    pub inner: SqliteStore,
    pub mutations: usize,
    pub closes: usize,
}

impl RecordingStore {
    pub fn new() -> Self {
        RecordingStore {
            inner: SqliteStore::in_memory().expect("in-memory database"),
            mutations: 0,
            closes: 0,
        }
    }
}

impl BookStore for RecordingStore {
    fn insert(&mut self, book: &NewBook) -> Result<BookId, StoreError> {
        self.mutations += 1;
        self.inner.insert(book)
    }
    fn fetch_all(&mut self) -> Result<Vec<Book>, StoreError> {
        self.inner.fetch_all()
    }
    fn fetch_by_id(&mut self, id: BookId) -> Result<Option<Book>, StoreError> {
        self.inner.fetch_by_id(id)
    }
    fn update(&mut self, id: BookId, book: &NewBook) -> Result<usize, StoreError> {
        self.mutations += 1;
        self.inner.update(id, book)
    }
    fn delete(&mut self, id: BookId) -> Result<usize, StoreError> {
        self.mutations += 1;
        self.inner.delete(id)
    }
    fn close(&mut self) -> Result<(), StoreError> {
        self.closes += 1;
        self.inner.close()
    }
}

pub fn new_book(name: &str, author: &str, stars: f64) -> NewBook {
    NewBook {
        name: name.into(),
        author: author.into(),
        stars: stars.try_into().expect("valid rating"),
    }
}
