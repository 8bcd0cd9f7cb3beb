use crate::translations::Translations;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A field definition within a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageItem {
    pub variable_name: String,
    pub item_type: ItemType,
    pub wording: Translations,
    pub section: Option<Translations>,
    /// Structural-role tag, opaque outside the rendering layer
    pub role: Option<String>,
}

impl PageItem {
    pub fn new(variable_name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            variable_name: variable_name.into(),
            item_type,
            wording: Translations::new(),
            section: None,
            role: None,
        }
    }

    /// Whether the wording describes a table cell (`"row -> column"`)
    pub fn is_table_cell(&self) -> bool {
        self.wording
            .iter()
            .any(|(_, text)| text.contains(crate::translations::TABLE_SEPARATOR))
    }
}

/// Field types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ItemType {
    Text { length: usize },
    MultiLangText { length: usize },
    Integer,
    Real { decimals: u8 },
    Date,
    YesNo,
    Acknowledge,
    Info,
    Choice(ChoiceType),
}

impl ItemType {
    pub fn text() -> Self {
        ItemType::Text { length: 256 }
    }

    pub fn multi_lang_text() -> Self {
        ItemType::MultiLangText { length: 256 }
    }

    /// Type name as exposed in the insert-item type selector
    pub fn name(&self) -> &'static str {
        match self {
            ItemType::Text { .. } => "text",
            ItemType::MultiLangText { .. } => "mltext",
            ItemType::Integer => "integer",
            ItemType::Real { .. } => "real",
            ItemType::Date => "date",
            ItemType::YesNo => "yesno",
            ItemType::Acknowledge => "acknowledge",
            ItemType::Info => "info",
            ItemType::Choice(_) => "choice",
        }
    }

    /// Whether a field of this type collects an answer
    pub fn is_answerable(&self) -> bool {
        !matches!(self, ItemType::Info)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Multiplicity {
    One,
    Many,
}

/// Choice list with per-language labels aligned on `choices`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceType {
    pub multiplicity: Multiplicity,
    pub choices: Vec<String>,
    pub labels: BTreeMap<String, Vec<String>>,
}

impl ChoiceType {
    pub fn new(multiplicity: Multiplicity, choices: Vec<String>) -> Self {
        Self {
            multiplicity,
            choices,
            labels: BTreeMap::new(),
        }
    }

    pub fn with_labels(mut self, lang: impl Into<String>, labels: Vec<String>) -> Self {
        self.labels.insert(lang.into(), labels);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_serialization() {
        let ty = ItemType::Choice(
            ChoiceType::new(Multiplicity::One, vec!["up".into(), "down".into()])
                .with_labels("en", vec!["Up".into(), "Down".into()]),
        );
        let json = serde_json::to_string(&ty).unwrap();
        let back: ItemType = serde_json::from_str(&json).unwrap();
        assert_eq!(ty, back);
        assert_eq!(back.name(), "choice");
    }

    #[test]
    fn test_table_cell_detection() {
        let mut item = PageItem::new("AE_1", ItemType::text());
        assert!(!item.is_table_cell());
        item.wording = Translations::new().with("en", "Headache -> Severity");
        assert!(item.is_table_cell());
    }
}
