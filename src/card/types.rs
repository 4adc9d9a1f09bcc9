use serde::{Deserialize, Serialize};
use std::fmt;

/// One distinct entry of a deck list: a card and how many copies it has
///
/// Fields are signed so malformed entries (negative cost, non-positive count)
/// survive deserialization and can be handled by the deck builder's policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSpec {
    pub cost: i32,
    pub name: String,
    pub count: i32,
}

impl CardSpec {
    pub fn new(cost: i32, name: impl Into<String>, count: i32) -> Self {
        CardSpec {
            cost,
            name: name.into(),
            count,
        }
    }

    /// A copy of this card with no count attached
    pub fn instance(&self) -> CardInstance {
        CardInstance {
            cost: self.cost,
            name: self.name.clone(),
        }
    }

    /// True when the entry can contribute cards to a deck
    pub fn is_well_formed(&self) -> bool {
        self.count > 0 && self.cost >= 0 && !self.name.is_empty()
    }
}

/// One physical copy of a card inside a simulated deck
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardInstance {
    pub cost: i32,
    pub name: String,
}

impl CardInstance {
    pub fn new(cost: i32, name: impl Into<String>) -> Self {
        CardInstance {
            cost,
            name: name.into(),
        }
    }
}

impl fmt::Display for CardInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.cost, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_drops_count() {
        let spec = CardSpec::new(3, "Storm Blast", 2);
        assert_eq!(spec.instance(), CardInstance::new(3, "Storm Blast"));
    }

    #[test]
    fn test_well_formed() {
        assert!(CardSpec::new(0, "Zero", 1).is_well_formed());
        assert!(!CardSpec::new(1, "None", 0).is_well_formed());
        assert!(!CardSpec::new(-1, "Negative", 2).is_well_formed());
        assert!(!CardSpec::new(1, "", 2).is_well_formed());
    }

    #[test]
    fn test_deserialize_spec() {
        let spec: CardSpec = serde_json::from_str(r#"{"cost":2,"name":"B","count":3}"#).unwrap();
        assert_eq!(spec, CardSpec::new(2, "B", 3));
    }

    #[test]
    fn test_display() {
        assert_eq!(CardInstance::new(7, "Kuon").to_string(), "(7) Kuon");
    }
}
