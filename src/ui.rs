// UI layer: the main menu loop and the printing of handler outcomes.
// Colors come from `crossterm`'s `Stylize`.

use anyhow::Result;
use crossterm::style::Stylize;
use tracing::{debug, warn};

use crate::handlers::{BookLog, Outcome};
use crate::prompt::Prompter;
use crate::store::BookStore;

/// Entries of the main menu, in the order they are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Update,
    Add,
    Delete,
    Exit,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::View,
        Action::Update,
        Action::Add,
        Action::Delete,
        Action::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::View => "View all books",
            Action::Update => "Update book",
            Action::Add => "Add a new book",
            Action::Delete => "Delete book",
            Action::Exit => "Exit",
        }
    }
}

/// Main interactive menu. Shows the menu, runs the chosen handler and comes
/// back, until the user picks "Exit"; then the store is closed.
pub fn main_menu<S: BookStore, P: Prompter>(app: &mut BookLog<S, P>) -> Result<()> {
    let labels: Vec<&str> = Action::ALL.iter().map(|action| action.label()).collect();
    loop {
        let index = app
            .prompter_mut()
            .choice("What would you like to do?", &labels)?;
        let Some(action) = Action::ALL.get(index).copied() else {
            warn!(index, "menu returned an unknown entry");
            continue;
        };
        debug!(?action, "menu selection");

        let outcome = match action {
            Action::View => app.view()?,
            Action::Update => app.update()?,
            Action::Add => {
                println!("{}", "Welcome to your private book log!".blue().bold());
                app.add()?
            }
            Action::Delete => app.delete()?,
            Action::Exit => {
                println!("{}", "Thank you for using our software!".on_magenta().bold());
                if let Err(err) = app.shutdown() {
                    warn!(error = %err, "closing the store failed");
                    println!("{}", format!("Could not close the book log: {err}").red());
                }
                return Ok(());
            }
        };
        render(&outcome);
    }
}

/// Print a handler outcome.
pub fn render(outcome: &Outcome) {
    let message = outcome.message();
    match outcome {
        Outcome::Listed(books) => {
            println!("{}", message.yellow().bold());
            if books.is_empty() {
                println!("{}", "(no books yet)".dim());
            }
            for book in books {
                println!("{book}");
            }
        }
        Outcome::NotFound { .. } | Outcome::StoreFailed(_) => println!("{}", message.red().bold()),
        Outcome::Cancelled => println!("{}", message.dim()),
        Outcome::Added { .. } | Outcome::Updated { .. } | Outcome::Deleted { .. } => {
            println!("{}", message.yellow().bold())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_order_is_fixed() {
        let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(
            labels,
            ["View all books", "Update book", "Add a new book", "Delete book", "Exit"]
        );
    }
}
