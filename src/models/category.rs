//! Expense categories
//!
//! The set of categories is closed: the entry form only ever offers these six.
//! Spanish labels (Comida, Transporte, ...) are accepted on input
//! so older exports keep importing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Housing,
    Medicine,
    Other,
}

impl Category {
    /// All categories in the order the entry form presents them
    pub fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Transport,
            Self::Entertainment,
            Self::Housing,
            Self::Medicine,
            Self::Other,
        ]
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Housing => "Housing",
            Self::Medicine => "Medicine",
            Self::Other => "Other",
        }
    }

    /// Spanish label, accepted as an alias when parsing
    pub fn legacy_label(&self) -> &'static str {
        match self {
            Self::Food => "Comida",
            Self::Transport => "Transporte",
            Self::Entertainment => "Entretenimiento",
            Self::Housing => "Vivienda",
            Self::Medicine => "Medicina",
            Self::Other => "Otros",
        }
    }

    /// Parse a category from free-form input
    ///
    /// Blank input is a distinct failure from an unrecognised name, so the
    /// entry form can tell "nothing selected" apart from a typo.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::BlankCategory);
        }

        Self::all()
            .iter()
            .copied()
            .find(|c| {
                c.name().eq_ignore_ascii_case(trimmed)
                    || c.legacy_label().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| ValidationError::UnknownCategory(trimmed.to_string()))
    }

    /// Parse a category and require it to be one of `offered`
    pub fn parse_offered(input: &str, offered: &[Category]) -> Result<Self, ValidationError> {
        let category = Self::parse(input)?;
        if offered.contains(&category) {
            Ok(category)
        } else {
            Err(ValidationError::CategoryNotOffered(category.name().to_string()))
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_categories() {
        let all = Category::all();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], Category::Food);
        assert_eq!(all[5], Category::Other);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(" TRANSPORT ".parse::<Category>().unwrap(), Category::Transport);
    }

    #[test]
    fn test_parse_legacy_labels() {
        assert_eq!(Category::parse("Comida").unwrap(), Category::Food);
        assert_eq!(Category::parse("vivienda").unwrap(), Category::Housing);
        assert_eq!(Category::parse("Otros").unwrap(), Category::Other);
    }

    #[test]
    fn test_parse_blank_and_unknown() {
        assert_eq!(Category::parse("   "), Err(ValidationError::BlankCategory));
        assert_eq!(
            Category::parse("Gadgets"),
            Err(ValidationError::UnknownCategory("Gadgets".into()))
        );
    }

    #[test]
    fn test_parse_offered() {
        let offered = [Category::Food, Category::Transport];
        assert_eq!(Category::parse_offered("comida", &offered), Ok(Category::Food));
        assert_eq!(
            Category::parse_offered("Housing", &offered),
            Err(ValidationError::CategoryNotOffered("Housing".into()))
        );
        assert_eq!(
            Category::parse_offered("Gadgets", &offered),
            Err(ValidationError::UnknownCategory("Gadgets".into()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Category::Entertainment.to_string(), "Entertainment");
    }
}
