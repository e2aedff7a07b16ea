use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest name the list accepts, in characters.
pub const MAX_NAME_CHARS: usize = 50;

pub const QUICK_ADD: [&str; 5] = ["Team A", "Team B", "Team C", "Winner", "Player 1"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name is empty")]
    Empty,
    #[error("name is longer than {max} characters", max = MAX_NAME_CHARS)]
    TooLong,
    #[error("`{0}` is already on the wheel")]
    Duplicate(String),
}

/// Ordered, duplicate-free list of names shown on the wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct NameList(Vec<String>);

impl NameList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Trim `raw` and append it. Duplicates are matched exactly, so "bob" and
    /// "Bob" may both appear.
    pub fn add(&mut self, raw: &str) -> Result<&str, NameError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(NameError::TooLong);
        }
        if self.contains(name) {
            return Err(NameError::Duplicate(name.to_string()));
        }
        self.0.push(name.to_string());
        Ok(&self.0[self.0.len() - 1])
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Quick-add suggestions not already present.
    pub fn available_suggestions(&self) -> impl Iterator<Item = &'static str> + '_ {
        QUICK_ADD.into_iter().filter(|s| !self.contains(s))
    }
}

impl Default for NameList {
    fn default() -> Self {
        Self(
            ["Alice", "Bob", "Charlie", "Diana"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }
}

impl<'a> TryFrom<Vec<&'a str>> for NameList {
    type Error = NameError;

    fn try_from(raw: Vec<&'a str>) -> Result<Self, Self::Error> {
        let mut list = NameList::new();
        for name in raw {
            list.add(name)?;
        }
        Ok(list)
    }
}

impl TryFrom<Vec<String>> for NameList {
    type Error = NameError;

    fn try_from(raw: Vec<String>) -> Result<Self, Self::Error> {
        let mut list = NameList::new();
        for name in &raw {
            list.add(name)?;
        }
        Ok(list)
    }
}

impl From<NameList> for Vec<String> {
    fn from(list: NameList) -> Self {
        list.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_appends_in_order() {
        let mut names = NameList::new();
        assert_eq!(names.add("  Alice "), Ok("Alice"));
        names.add("Bob").unwrap();
        assert_eq!(names.as_slice(), ["Alice", "Bob"]);
    }

    #[test]
    fn rejects_blank_long_and_duplicate() {
        let mut names = NameList::new();
        assert_eq!(names.add("   "), Err(NameError::Empty));
        assert_eq!(names.add(&"x".repeat(51)), Err(NameError::TooLong));
        assert!(names.add(&"x".repeat(50)).is_ok());
        names.add("Bob").unwrap();
        assert_eq!(names.add(" Bob"), Err(NameError::Duplicate("Bob".into())));
        // case-sensitive
        assert!(names.add("bob").is_ok());
    }

    #[test]
    fn remove_and_clear() {
        let mut names = NameList::default();
        assert_eq!(names.remove(1), Some("Bob".to_string()));
        assert_eq!(names.remove(9), None);
        assert_eq!(names.as_slice(), ["Alice", "Charlie", "Diana"]);
        names.clear();
        assert!(names.is_empty());
    }

    #[test]
    fn suggestions_skip_existing_names() {
        let mut names = NameList::new();
        names.add("Winner").unwrap();
        let left: Vec<_> = names.available_suggestions().collect();
        assert_eq!(left, ["Team A", "Team B", "Team C", "Player 1"]);
    }

    #[test]
    fn try_from_stops_at_first_bad_name() {
        assert!(NameList::try_from(vec!["a", "b"]).is_ok());
        assert_eq!(
            NameList::try_from(vec!["a", "a"]),
            Err(NameError::Duplicate("a".into()))
        );
    }

    #[test]
    fn deserializing_applies_insertion_rules() {
        let names: NameList = serde_json::from_str(r#"[" Ann ", "Ben"]"#).unwrap();
        assert_eq!(names.as_slice(), ["Ann", "Ben"]);
        assert!(serde_json::from_str::<NameList>(r#"["Ann", "Ann"]"#).is_err());
        assert_eq!(serde_json::to_string(&names).unwrap(), r#"["Ann","Ben"]"#);
    }
}
