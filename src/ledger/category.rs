use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Fixed set of spending categories. Declaration order is the display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Transport,
    Food,
    Accommodation,
    Activities,
    Shopping,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Transport,
        Category::Food,
        Category::Accommodation,
        Category::Activities,
        Category::Shopping,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Transport => "Transport",
            Category::Food => "Food",
            Category::Accommodation => "Accommodation",
            Category::Activities => "Activities",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                LedgerError::validation(format!(
                    "unknown category `{}` (expected one of: {})",
                    needle,
                    Category::ALL.map(|c| c.as_str()).join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(
            " ACCOMMODATION ".parse::<Category>().unwrap(),
            Category::Accommodation
        );
        assert!("Groceries".parse::<Category>().is_err());
    }

    #[test]
    fn serializes_as_plain_name() {
        let json = serde_json::to_string(&Category::Activities).unwrap();
        assert_eq!(json, "\"Activities\"");
    }
}
