use serde::{Deserialize, Serialize};

/// Rule attached to a single field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum Rule {
    Required,
    Unique,
    InRange { min: i64, max: i64 },
    LetterCase { case: LetterCase },
    AllLanguages,
    /// Field shown only when `expression` holds
    Activation { expression: String },
    /// Raises a notification event when the field takes a critical value
    Critical { event: String },
}

impl Rule {
    /// Key under which the rule engine reports a violation of this rule
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Unique => "unique",
            Rule::InRange { .. } => "inRange",
            Rule::LetterCase { .. } => "letterCase",
            Rule::AllLanguages => "allLanguages",
            Rule::Activation { .. } => "activation",
            Rule::Critical { .. } => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LetterCase {
    Upper,
    Lower,
}

impl LetterCase {
    pub fn apply(&self, text: &str) -> String {
        match self {
            LetterCase::Upper => text.to_uppercase(),
            LetterCase::Lower => text.to_lowercase(),
        }
    }
}

/// A rule bound to the field it constrains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossRule {
    pub target: String,
    pub rule: Rule,
}

impl CrossRule {
    pub fn new(target: impl Into<String>, rule: Rule) -> Self {
        Self {
            target: target.into(),
            rule,
        }
    }
}
