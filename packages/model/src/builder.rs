//! # Survey Builder
//!
//! Mutable builders producing validated [`Survey`] values.
//!
//! ```rust
//! use formstudio_model::{ItemType, SurveyBuilder};
//!
//! let mut b = SurveyBuilder::new("demo");
//! b.page("INCL")
//!     .translate("en", "Inclusion")
//!     .question("AGE", ItemType::Integer)
//!     .wording("en", "Age")
//!     .required()
//!     .in_range(18, 99);
//! b.page_set("INCLUSION").pages(&["INCL"]);
//! b.workflow("main").single(&["INCLUSION"]);
//! let survey = b.build().unwrap();
//! assert_eq!(survey.items().count(), 1);
//! ```

use crate::error::ModelError;
use crate::item::{ItemType, PageItem};
use crate::rule::{CrossRule, LetterCase, Rule};
use crate::survey::{Page, PageSet, Survey, SurveyOptions, Workflow};
use crate::translations::Translations;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct SurveyBuilder {
    name: String,
    options: SurveyOptions,
    pages: Vec<PageBuilder>,
    page_sets: Vec<PageSetBuilder>,
    workflows: Vec<WorkflowBuilder>,
}

impl SurveyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: SurveyOptions::default(),
            pages: Vec::new(),
            page_sets: Vec::new(),
            workflows: Vec::new(),
        }
    }

    pub fn options(&mut self, options: SurveyOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Append a page and return its builder
    pub fn page(&mut self, code: impl Into<String>) -> &mut PageBuilder {
        self.pages.push(PageBuilder::new(code));
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn page_set(&mut self, type_name: impl Into<String>) -> &mut PageSetBuilder {
        self.page_sets.push(PageSetBuilder::new(type_name));
        let last = self.page_sets.len() - 1;
        &mut self.page_sets[last]
    }

    pub fn workflow(&mut self, name: impl Into<String>) -> &mut WorkflowBuilder {
        self.workflows.push(WorkflowBuilder(Workflow::new(name)));
        let last = self.workflows.len() - 1;
        &mut self.workflows[last]
    }

    pub fn pages(&self) -> &[PageBuilder] {
        &self.pages
    }

    /// Validate and produce the survey
    pub fn build(&self) -> Result<Survey, ModelError> {
        let mut pages = Vec::with_capacity(self.pages.len());
        let mut cross_rules = Vec::new();
        for builder in &self.pages {
            let (page, rules) = builder.build();
            pages.push(page);
            cross_rules.extend(rules);
        }

        let survey = Survey {
            name: self.name.clone(),
            options: self.options.clone(),
            pages,
            page_sets: self.page_sets.iter().map(PageSetBuilder::build).collect(),
            workflows: self.workflows.iter().map(|w| w.0.clone()).collect(),
            cross_rules,
        };
        validate(&survey)?;
        Ok(survey)
    }
}

/// Check the referential integrity of a survey
pub fn validate(survey: &Survey) -> Result<(), ModelError> {
    let mut codes = HashSet::new();
    let mut variables = HashSet::new();
    for page in &survey.pages {
        if page.code().is_empty() {
            return Err(ModelError::MissingPageCode);
        }
        if !codes.insert(page.code()) {
            return Err(ModelError::DuplicatePage(page.code().to_string()));
        }
        for item in &page.items {
            if !variables.insert(item.variable_name.as_str()) {
                return Err(ModelError::DuplicateVariable(item.variable_name.clone()));
            }
        }
    }

    let mut types = HashSet::new();
    for page_set in &survey.page_sets {
        if !types.insert(page_set.type_name()) {
            return Err(ModelError::DuplicatePageSet(page_set.type_name().to_string()));
        }
        if let Some(page) = page_set.pages.iter().find(|p| !codes.contains(p.as_str())) {
            return Err(ModelError::UnknownPage {
                page_set: page_set.type_name().to_string(),
                page: page.clone(),
            });
        }
    }

    let mut workflows = HashSet::new();
    for workflow in &survey.workflows {
        if !workflows.insert(workflow.name.as_str()) {
            return Err(ModelError::DuplicateWorkflow(workflow.name.clone()));
        }
        if let Some(t) = workflow
            .page_set_types()
            .into_iter()
            .find(|t| !types.contains(t))
        {
            return Err(ModelError::UnknownPageSet {
                workflow: workflow.name.clone(),
                page_set: t.to_string(),
            });
        }
    }

    if let Some(rule) = survey
        .cross_rules
        .iter()
        .find(|r| !variables.contains(r.target.as_str()))
    {
        return Err(ModelError::UnknownRuleTarget(rule.target.clone()));
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct PageBuilder {
    name: Translations,
    items: Vec<ItemBuilder>,
    section: Option<Translations>,
}

impl PageBuilder {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            name: Translations::code_only(code),
            items: Vec::new(),
            section: None,
        }
    }

    pub fn code(&self) -> &str {
        self.name.code()
    }

    pub fn translate(&mut self, lang: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.name.set(lang, text);
        self
    }

    /// Section applied to the questions added from now on
    pub fn start_section(&mut self, section: Option<Translations>) -> &mut Self {
        self.section = section;
        self
    }

    /// Append a question and return its builder
    pub fn question(
        &mut self,
        variable_name: impl Into<String>,
        item_type: ItemType,
    ) -> &mut ItemBuilder {
        let mut item = ItemBuilder::new(variable_name, item_type);
        item.item.section = self.section.clone();
        self.items.push(item);
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    pub fn items(&self) -> &[ItemBuilder] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The page with its items, and the rules attached to those items
    pub fn build(&self) -> (Page, Vec<CrossRule>) {
        let mut items = Vec::with_capacity(self.items.len());
        let mut rules = Vec::new();
        for builder in &self.items {
            let (item, item_rules) = builder.build();
            items.push(item);
            rules.extend(item_rules);
        }
        (
            Page {
                name: self.name.clone(),
                items,
            },
            rules,
        )
    }
}

#[derive(Debug, Clone)]
pub struct ItemBuilder {
    item: PageItem,
    rules: Vec<Rule>,
}

impl ItemBuilder {
    pub fn new(variable_name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            item: PageItem::new(variable_name, item_type),
            rules: Vec::new(),
        }
    }

    pub fn variable_name(&self) -> &str {
        &self.item.variable_name
    }

    pub fn wording(&mut self, lang: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.item.wording.set(lang, text);
        self
    }

    pub fn translations(&mut self, wording: Translations) -> &mut Self {
        self.item.wording = wording;
        self
    }

    pub fn section(&mut self, section: Option<Translations>) -> &mut Self {
        self.item.section = section;
        self
    }

    pub fn role(&mut self, role: impl Into<String>) -> &mut Self {
        self.item.role = Some(role.into());
        self
    }

    pub fn required(&mut self) -> &mut Self {
        self.rule(Rule::Required)
    }

    pub fn unique(&mut self) -> &mut Self {
        self.rule(Rule::Unique)
    }

    pub fn letter_case(&mut self, case: LetterCase) -> &mut Self {
        self.rule(Rule::LetterCase { case })
    }

    pub fn in_range(&mut self, min: i64, max: i64) -> &mut Self {
        self.rule(Rule::InRange { min, max })
    }

    pub fn all_languages(&mut self) -> &mut Self {
        self.rule(Rule::AllLanguages)
    }

    pub fn visible_when(&mut self, expression: impl Into<String>) -> &mut Self {
        self.rule(Rule::Activation {
            expression: expression.into(),
        })
    }

    pub fn critical(&mut self, event: impl Into<String>) -> &mut Self {
        self.rule(Rule::Critical {
            event: event.into(),
        })
    }

    pub fn rule(&mut self, rule: Rule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn build(&self) -> (PageItem, Vec<CrossRule>) {
        let rules = self
            .rules
            .iter()
            .map(|r| CrossRule::new(self.item.variable_name.clone(), r.clone()))
            .collect();
        (self.item.clone(), rules)
    }
}

#[derive(Debug, Clone)]
pub struct PageSetBuilder {
    page_set: PageSet,
}

impl PageSetBuilder {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            page_set: PageSet {
                kind: Translations::code_only(type_name),
                pages: Vec::new(),
                date_variable: None,
            },
        }
    }

    pub fn translate(&mut self, lang: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.page_set.kind.set(lang, text);
        self
    }

    pub fn pages(&mut self, pages: &[&str]) -> &mut Self {
        self.page_set.pages = pages.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn date_variable(&mut self, variable_name: impl Into<String>) -> &mut Self {
        self.page_set.date_variable = Some(variable_name.into());
        self
    }

    pub fn build(&self) -> PageSet {
        self.page_set.clone()
    }
}

#[derive(Debug, Clone)]
pub struct WorkflowBuilder(Workflow);

fn owned(types: &[&str]) -> Vec<String> {
    types.iter().map(|t| t.to_string()).collect()
}

impl WorkflowBuilder {
    pub fn info(&mut self, types: &[&str]) -> &mut Self {
        self.0.info = owned(types);
        self
    }

    pub fn single(&mut self, types: &[&str]) -> &mut Self {
        self.0.single = owned(types);
        self
    }

    pub fn many(&mut self, types: &[&str]) -> &mut Self {
        self.0.many = owned(types);
        self
    }

    pub fn start_with(&mut self, types: &[&str]) -> &mut Self {
        self.0.start_with = owned(types);
        self
    }

    pub fn end_with(&mut self, types: &[&str]) -> &mut Self {
        self.0.end_with = owned(types);
        self
    }

    pub fn notifications(&mut self, events: &[&str]) -> &mut Self {
        self.0.notifications = owned(events);
        self
    }
}
