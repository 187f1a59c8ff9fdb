// Book model: the single entity the log persists.
// `Rating` keeps stars as a count of half steps so only the values
// 1, 1.5, ..., 5 can ever be represented.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::validate::validate_rating;

/// Identity assigned by the store on insert.
pub type BookId = i64;

/// A persisted book.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub author: String,
    pub stars: Rating,
}

/// Field values for an insert or an in-place update. Carries no id: only
/// the store hands those out.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub name: String,
    pub author: String,
    pub stars: Rating,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Author: {}, Stars: {}",
            self.id, self.name, self.author, self.stars
        )
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RatingError {
    #[error("{0:?} is not a valid rating")]
    Unparsable(String),

    #[error("{0} is not a half-step rating between 1 and 5")]
    OutOfDomain(f64),
}

/// Star rating in half steps from 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: Rating = Rating(2);
    pub const MAX: Rating = Rating(10);

    /// Numeric value of the rating, e.g. `4.5`.
    pub fn stars(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    /// Every value in the domain, lowest first.
    pub fn all() -> impl Iterator<Item = Rating> {
        (Self::MIN.0..=Self::MAX.0).map(Rating)
    }
}

impl TryFrom<f64> for Rating {
    type Error = RatingError;

    fn try_from(stars: f64) -> Result<Self, Self::Error> {
        let doubled = stars * 2.0;
        if doubled.fract() != 0.0 || !(2.0..=10.0).contains(&doubled) {
            return Err(RatingError::OutOfDomain(stars));
        }
        Ok(Rating(doubled as u8))
    }
}

impl FromStr for Rating {
    type Err = RatingError;

    /// Accepts exactly what the rating validator accepts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_rating(s).map_err(|_| RatingError::Unparsable(s.to_string()))?;
        let stars: f64 = s
            .parse()
            .map_err(|_| RatingError::Unparsable(s.to_string()))?;
        Rating::try_from(stars)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

impl ToSql for Rating {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.stars()))
    }
}

impl FromSql for Rating {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let stars = f64::column_result(value)?;
        Rating::try_from(stars).map_err(|err| FromSqlError::Other(Box::new(err)))
    }
}
