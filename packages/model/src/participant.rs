//! Answer data: participant → interviews → answered items.

use crate::survey::PageSet;
use crate::translations::Translations;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub participant_code: String,
    pub sample_code: String,
    pub interviews: Vec<Interview>,
}

impl Participant {
    pub fn new(participant_code: impl Into<String>, sample_code: impl Into<String>) -> Self {
        Self {
            participant_code: participant_code.into(),
            sample_code: sample_code.into(),
            interviews: Vec::new(),
        }
    }

    pub fn with_interview(mut self, interview: Interview) -> Self {
        self.interviews.push(interview);
        self
    }

    /// Answered items across all interviews
    pub fn items(&self) -> impl Iterator<Item = &InterviewItem> {
        self.interviews.iter().flat_map(|i| i.items.iter())
    }
}

/// Answers scoped to one page set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub page_set: PageSet,
    pub items: Vec<InterviewItem>,
}

impl Interview {
    pub fn new(page_set: PageSet) -> Self {
        Self {
            page_set,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: InterviewItem) -> Self {
        self.items.push(item);
        self
    }
}

/// One answer tied to a field by variable name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewItem {
    pub variable_name: String,
    pub value: ItemValue,
    /// Rule name → violation message, filled by the rule engine
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
}

impl InterviewItem {
    pub fn new(variable_name: impl Into<String>, value: ItemValue) -> Self {
        Self {
            variable_name: variable_name.into(),
            value,
            messages: BTreeMap::new(),
        }
    }

    pub fn with_message(mut self, rule: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(rule.into(), message.into());
        self
    }

    pub fn violates(&self, rule: &str) -> bool {
        self.messages.contains_key(rule)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ItemValue {
    Missing,
    Text(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
    /// ISO-8601 calendar date
    Date(String),
    Many(Vec<String>),
    Translated(Translations),
}

impl ItemValue {
    pub fn is_answered(&self) -> bool {
        match self {
            ItemValue::Missing => false,
            ItemValue::Text(text) => !text.trim().is_empty(),
            _ => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ItemValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ItemValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_many(&self) -> Option<&[String]> {
        match self {
            ItemValue::Many(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_translations(&self) -> Option<&Translations> {
        match self {
            ItemValue::Translated(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_not_answered() {
        assert!(!ItemValue::Text("  ".into()).is_answered());
        assert!(!ItemValue::Missing.is_answered());
        assert!(ItemValue::Bool(false).is_answered());
    }

    #[test]
    fn test_violation_lookup() {
        let item = InterviewItem::new("AGE", ItemValue::Integer(3)).with_message("inRange", "too young");
        assert!(item.violates("inRange"));
        assert!(!item.violates("required"));
    }
}
