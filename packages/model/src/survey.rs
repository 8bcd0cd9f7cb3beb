//! Survey schema: workflows → page sets → pages → fields, plus cross rules.
//!
//! Pages, page sets and workflows reference each other by code, never by
//! pointer: a page set lists page codes, a workflow lists page-set types.

use crate::item::PageItem;
use crate::rule::{CrossRule, Rule};
use crate::translations::Translations;
use serde::{Deserialize, Serialize};

/// Name of the workflow every participant role derives from
pub const MAIN_WORKFLOW: &str = "main";

/// Root schema value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub name: String,
    pub options: SurveyOptions,
    pub pages: Vec<Page>,
    pub page_sets: Vec<PageSet>,
    pub workflows: Vec<Workflow>,
    pub cross_rules: Vec<CrossRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyOptions {
    pub languages: Vec<String>,
    pub default_language: String,
    pub show_field_names: bool,
    pub interview_date_var: Option<String>,
}

impl Default for SurveyOptions {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string(), "fr".to_string()],
            default_language: "en".to_string(),
            show_field_names: false,
            interview_date_var: None,
        }
    }
}

/// Page; its code is `name.code()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub name: Translations,
    pub items: Vec<PageItem>,
}

impl Page {
    pub fn code(&self) -> &str {
        self.name.code()
    }
}

/// Page set; its type is `kind.code()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSet {
    pub kind: Translations,
    pub pages: Vec<String>,
    pub date_variable: Option<String>,
}

impl PageSet {
    pub fn type_name(&self) -> &str {
        self.kind.code()
    }
}

/// Sequencing of page-set types for one participant role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub name: String,
    pub info: Vec<String>,
    pub single: Vec<String>,
    pub many: Vec<String>,
    pub start_with: Vec<String>,
    pub end_with: Vec<String>,
    pub notifications: Vec<String>,
}

impl Workflow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Page-set types in sequence order, each listed once
    pub fn page_set_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();
        let lists = [&self.info, &self.start_with, &self.single, &self.many, &self.end_with];
        for list in lists {
            for t in list {
                if !types.contains(&t.as_str()) {
                    types.push(t.as_str());
                }
            }
        }
        types
    }

    pub fn contains(&self, page_set_type: &str) -> bool {
        self.page_set_types().contains(&page_set_type)
    }

    /// Drop `page_set_type` from every list
    pub fn remove(&mut self, page_set_type: &str) {
        for list in [
            &mut self.info,
            &mut self.single,
            &mut self.many,
            &mut self.start_with,
            &mut self.end_with,
        ] {
            list.retain(|t| t != page_set_type);
        }
    }
}

impl Survey {
    /// All fields in page order
    pub fn items(&self) -> impl Iterator<Item = &PageItem> {
        self.pages.iter().flat_map(|p| p.items.iter())
    }

    pub fn item(&self, variable_name: &str) -> Option<&PageItem> {
        self.items().find(|i| i.variable_name == variable_name)
    }

    pub fn page(&self, code: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.code() == code)
    }

    pub fn page_index(&self, code: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.code() == code)
    }

    pub fn page_set(&self, type_name: &str) -> Option<&PageSet> {
        self.page_sets.iter().find(|ps| ps.type_name() == type_name)
    }

    pub fn page_set_types(&self) -> Vec<&str> {
        self.page_sets.iter().map(PageSet::type_name).collect()
    }

    pub fn workflow(&self, name: &str) -> Option<&Workflow> {
        self.workflows.iter().find(|w| w.name == name)
    }

    /// The workflow named `main`, or the first one
    pub fn main_workflow(&self) -> Option<&Workflow> {
        self.workflow(MAIN_WORKFLOW).or_else(|| self.workflows.first())
    }

    /// Sorted, de-duplicated critical notification events
    pub fn critical_events(&self) -> Vec<String> {
        let mut events: Vec<String> = self
            .cross_rules
            .iter()
            .filter_map(|r| match &r.rule {
                Rule::Critical { event } => Some(event.clone()),
                _ => None,
            })
            .collect();
        events.sort();
        events.dedup();
        events
    }

    pub fn rules_for<'a>(&'a self, variable_name: &'a str) -> impl Iterator<Item = &'a Rule> {
        self.cross_rules
            .iter()
            .filter(move |r| r.target == variable_name)
            .map(|r| &r.rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_page_set_types_dedup() {
        let mut wf = Workflow::new("main");
        wf.info = vec!["INFO".into()];
        wf.single = vec!["INCL".into(), "END".into()];
        wf.many = vec!["FOLLOW".into()];
        wf.end_with = vec!["END".into()];
        assert_eq!(wf.page_set_types(), vec!["INFO", "INCL", "END", "FOLLOW"]);

        wf.remove("END");
        assert!(!wf.contains("END"));
        assert!(wf.end_with.is_empty());
    }
}
