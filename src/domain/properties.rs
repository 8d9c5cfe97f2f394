//! Destination property model
//!
//! A destination record is a set of named, typed properties. The types mirror
//! what a Notion database column can hold; the adapter decides how they are
//! encoded on the wire. Natural-key lookups are expressed as a [`QueryFilter`]
//! of equality predicates over the same properties.

use std::collections::BTreeMap;

/// Typed value of a single destination property
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Title column (one per database)
    Title(String),
    /// Free text
    RichText(String),
    /// Number; `None` stores an empty cell
    Number(Option<f64>),
    /// Single select option
    Select(String),
    /// Date or date-time, optionally a range
    Date { start: String, end: Option<String> },
    /// Checkbox
    Checkbox(bool),
}

impl PropertyValue {
    /// Number property from a present value
    pub fn number(value: f64) -> Self {
        Self::Number(Some(value))
    }

    /// Date property without an end
    pub fn date(start: impl Into<String>) -> Self {
        Self::Date {
            start: start.into(),
            end: None,
        }
    }

    /// Date range property
    pub fn date_range(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::Date {
            start: start.into(),
            end: Some(end.into()),
        }
    }

    /// Textual content of title, text and select values
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Title(s) | Self::RichText(s) | Self::Select(s) => Some(s),
            _ => None,
        }
    }

    /// Number content, if this is a present number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => *n,
            _ => None,
        }
    }
}

/// Named properties of one destination record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    properties: BTreeMap<String, PropertyValue>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property, replacing any previous value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.properties.insert(name.into(), value);
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Page icon attached on creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    Emoji(String),
}

/// Equality condition of a single predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Date property equals the given `YYYY-MM-DD` day
    DateEquals(String),
    /// Title property equals the given text
    TitleEquals(String),
}

/// One equality predicate over a destination property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub property: String,
    pub condition: Condition,
}

impl Predicate {
    pub fn date_equals(property: impl Into<String>, day: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            condition: Condition::DateEquals(day.into()),
        }
    }

    pub fn title_equals(property: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            condition: Condition::TitleEquals(text.into()),
        }
    }
}

/// Conjunction of equality predicates identifying a record by its natural key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFilter {
    predicates: Vec<Predicate>,
}

impl QueryFilter {
    /// Filter with a single predicate
    pub fn single(predicate: Predicate) -> Self {
        Self {
            predicates: vec![predicate],
        }
    }

    /// Filter matching only when every predicate holds
    pub fn all(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Human-readable key, used in log lines
    pub fn describe(&self) -> String {
        self.predicates
            .iter()
            .map(|p| match &p.condition {
                Condition::DateEquals(v) | Condition::TitleEquals(v) => {
                    format!("{}={}", p.property, v)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
