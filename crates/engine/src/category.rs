use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Closed set of classifications an entry can carry.
///
/// The serialized literals are part of the persisted format. The Hebrew
/// labels written by the first version of the dashboard are accepted on read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(alias = "קבועים")]
    Fixed,
    #[serde(alias = "עסקי")]
    Business,
    #[serde(alias = "פרטי")]
    Personal,
    #[serde(alias = "מיסים")]
    Tax,
    #[serde(alias = "הכנסות")]
    Income,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Category::Fixed,
        Category::Business,
        Category::Personal,
        Category::Tax,
        Category::Income,
    ];

    /// Canonical label, identical to the persisted literal.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::Fixed => "Fixed",
            Category::Business => "Business",
            Category::Personal => "Personal",
            Category::Tax => "Tax",
            Category::Income => "Income",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EngineError::UnknownCategory(trimmed.to_string()))
    }
}

impl core::str::FromStr for Category {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::try_from(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_literals_are_stable() {
        assert_eq!(serde_json::to_string(&Category::Tax).unwrap(), "\"Tax\"");
        let legacy: Category = serde_json::from_str("\"מיסים\"").unwrap();
        assert_eq!(legacy, Category::Tax);
    }

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("business".parse::<Category>().unwrap(), Category::Business);
        assert_eq!(
            "rent".parse::<Category>(),
            Err(EngineError::UnknownCategory("rent".to_string()))
        );
    }
}
