// Field validators handed to the prompt engine. Each returns `Ok(())` or a
// fixed message the prompt shows before asking again.

use regex::Regex;
use std::sync::LazyLock;

pub const TEXT_REQUIRED: &str = "Please enter a name.";
pub const INVALID_RATING: &str = "Please enter a valid number";
pub const INVALID_ID: &str = "Please enter a valid ID number";

/// 1 to 4 with an optional `.0`/`.5`, or 5 with an optional `.0`.
static RATING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[1-4](?:\.[05])?|5(?:\.0)?)$").expect("rating pattern compiles")
});

static ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("id pattern compiles"));

/// Signature every field validator shares.
pub type Validator = fn(&str) -> Result<(), &'static str>;

/// Book name and author must not be empty.
pub fn validate_text(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        Err(TEXT_REQUIRED)
    } else {
        Ok(())
    }
}

pub fn validate_rating(value: &str) -> Result<(), &'static str> {
    if RATING.is_match(value) {
        Ok(())
    } else {
        Err(INVALID_RATING)
    }
}

/// Plain decimal digits: no sign, no fraction.
pub fn validate_id(value: &str) -> Result<(), &'static str> {
    if ID.is_match(value) {
        Ok(())
    } else {
        Err(INVALID_ID)
    }
}
