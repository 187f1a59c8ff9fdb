// Prompt engine seam. Handlers describe what they want to ask with a
// `TextPrompt`; a `Prompter` asks it and keeps asking until the validator
// accepts the answer. `TerminalPrompter` does this with `dialoguer`.

use anyhow::Result;
use dialoguer::{Input, Select};

use crate::cancel::CancelSignal;
use crate::validate::Validator;

/// One text question.
#[derive(Debug, Clone)]
pub struct TextPrompt {
    pub label: String,
    pub validator: Validator,
    /// Value returned when the user just presses Enter.
    pub default: Option<String>,
}

impl TextPrompt {
    pub fn new(label: impl Into<String>, validator: Validator) -> Self {
        TextPrompt {
            label: label.into(),
            validator,
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

pub trait Prompter {
    /// Ask `prompt` and return the first answer the validator accepts. The
    /// cancel token is always accepted while `cancel` is armed, so the caller
    /// can see it.
    fn text(&mut self, prompt: &TextPrompt, cancel: &CancelSignal) -> Result<String>;

    /// Let the user pick one of `options`; returns its index.
    fn choice(&mut self, label: &str, options: &[&str]) -> Result<usize>;
}

/// Interactive prompter for a real terminal.
///
/// Note: `Select` is keyboard-driven: arrow keys and Enter pick an option.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        TerminalPrompter
    }
}

impl Prompter for TerminalPrompter {
    fn text(&mut self, prompt: &TextPrompt, cancel: &CancelSignal) -> Result<String> {
        let validator = prompt.validator;
        let cancel = cancel.clone();

        let mut input = Input::<String>::new();
        input.with_prompt(prompt.label.as_str());
        if let Some(default) = &prompt.default {
            input.default(default.clone());
        }
        input.validate_with(move |value: &String| -> Result<(), &'static str> {
            if cancel.matches(value) {
                Ok(())
            } else {
                validator(value)
            }
        });
        Ok(input.interact_text()?)
    }

    fn choice(&mut self, label: &str, options: &[&str]) -> Result<usize> {
        let selection = Select::new()
            .with_prompt(label)
            .items(options)
            .default(0)
            .interact()?;
        Ok(selection)
    }
}
