//! Fixed set of expense categories.
//!
//! Only expense updates are checked against this set; creation stores the
//! category text as given.

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Food,
    Education,
    Entertainment,
}

impl Category {
    pub const ALL: [Category; 3] = [Self::Food, Self::Education, Self::Entertainment];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Education => "Education",
            Self::Entertainment => "Entertainment",
        }
    }

    /// Comma separated list of the accepted names, used in error messages.
    pub fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|category| category.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Food" => Ok(Self::Food),
            "Education" => Ok(Self::Education),
            "Entertainment" => Ok(Self::Entertainment),
            other => Err(EngineError::InvalidField(format!(
                "invalid category '{other}': allowed values are {}",
                Self::allowed()
            ))),
        }
    }
}
