//! # Structural Commands
//!
//! Two-phase edits of a survey and the answers collected for it.
//!
//! ## Protocol
//!
//! ```text
//! Unstarted ──start──▶ Staged ──apply──▶ Applied
//!                        │ ▲
//!                        └─┘ can_apply (read-only)
//! ```
//!
//! - `start` injects a parameter form (see [`crate::parts`]) into the
//!   survey at the command's insertion point and resynchronises the
//!   participant's page sets.
//! - `can_apply` checks that the form is still attached, that its
//!   mandatory fields are answered and that the rule engine reports no
//!   `required`, `unique` or `allLanguages` violation on them.
//! - `apply` resolves every parameter first, then drops the form, performs
//!   the edit and resynchronises page sets again. A failed `apply` changes
//!   nothing and leaves the command staged.
//!
//! `Null` accepts every call in any phase and changes nothing.
//!
//! A command is single-use. There is no rollback: an abandoned command is
//! discarded together with the adapters it was started on.
//!
//! ## Positions
//!
//! Pages, page sets, workflows and fields are addressed by index. Indices
//! passed to a command refer to the survey as it was before `start`.

mod delete;
mod insert;
mod params;
mod update;

use crate::adapters::{MutableParticipant, MutableSurvey};
use crate::config::StudioConfig;
use crate::errors::StudioError;
use crate::parts;
use crate::predicates::{all_answered, all_languages_set, all_required_set, all_unique_set};
use formstudio_model::{
    CrossRule, InterviewItem, Page, PageItem, PageSet, Rule, Survey, SurveyBuilder,
    SurveyOptions, Translations, Workflow,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Every structural edit, with the positions captured at `start`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum CommandKind {
    /// Remove `count` fields starting at `index`
    DeleteItem { page: usize, index: usize, count: usize },
    DeletePage { page: usize },
    /// Remove a page set and every interview collected with it
    DeletePageSet { page_set: usize },
    /// Remove a workflow; the form is shown on `page`
    DeleteWorkflow { workflow: usize, page: usize },
    /// Insert a new field at `index`
    InsertItem { page: usize, index: usize },
    /// Insert a new page after `page`, in the survey and in `page_set`
    InsertPage { page_set: usize, page: usize },
    InsertPageSet { page: usize },
    /// Copy the table line of `columns` cells starting at `index`
    InsertTableLine { page: usize, index: usize, columns: usize },
    InsertDerivedWorkflow { page: usize },
    UpdatePage { page: usize },
    UpdatePageSet { page_set: usize, page: usize },
    UpdateDerivedWorkflow { workflow: usize, page: usize },
    UpdateMainWorkflow { page: usize },
    UpdateSurveyOptions { page: usize },
    /// Add an existing page to `page_set`, after `page`
    IncludePage { page_set: usize, page: usize },
    /// Move the field at `index` one step up or down
    OrderItem { page: usize, index: usize },
    /// Inner command gated on an extra confirmation
    ApplyConfirmation(Box<CommandKind>),
    Null,
}

impl CommandKind {
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::DeleteItem { .. } => "delete-item",
            CommandKind::DeletePage { .. } => "delete-page",
            CommandKind::DeletePageSet { .. } => "delete-page-set",
            CommandKind::DeleteWorkflow { .. } => "delete-workflow",
            CommandKind::InsertItem { .. } => "insert-item",
            CommandKind::InsertPage { .. } => "insert-page",
            CommandKind::InsertPageSet { .. } => "insert-page-set",
            CommandKind::InsertTableLine { .. } => "insert-table-line",
            CommandKind::InsertDerivedWorkflow { .. } => "insert-derived-workflow",
            CommandKind::UpdatePage { .. } => "update-page",
            CommandKind::UpdatePageSet { .. } => "update-page-set",
            CommandKind::UpdateDerivedWorkflow { .. } => "update-derived-workflow",
            CommandKind::UpdateMainWorkflow { .. } => "update-main-workflow",
            CommandKind::UpdateSurveyOptions { .. } => "update-survey-options",
            CommandKind::IncludePage { .. } => "include-page",
            CommandKind::OrderItem { .. } => "order-item",
            CommandKind::ApplyConfirmation(_) => "apply-confirmation",
            CommandKind::Null => "null",
        }
    }

    /// Wrap in an extra confirmation step
    pub fn confirmed(self) -> Self {
        CommandKind::ApplyConfirmation(Box::new(self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unstarted,
    Staged,
    Applied,
}

/// Where the parameter form was injected
#[derive(Debug, Clone, PartialEq)]
pub struct Staging {
    pub page: usize,
    pub at: usize,
    /// Variable names of the injected fields
    pub fields: Vec<String>,
    /// Injected fields carrying a `required` rule
    pub mandatory: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Command {
    kind: CommandKind,
    phase: Phase,
    staging: Option<Staging>,
    config: StudioConfig,
}

impl Default for Command {
    fn default() -> Self {
        Self::new(CommandKind::Null)
    }
}

impl Command {
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            phase: Phase::Unstarted,
            staging: None,
            config: StudioConfig::default(),
        }
    }

    pub fn with_config(mut self, config: StudioConfig) -> Self {
        self.config = config;
        self
    }

    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn staging(&self) -> Option<&Staging> {
        self.staging.as_ref()
    }

    /// Inject the parameter form
    #[instrument(skip_all, fields(command = self.kind.name()))]
    pub fn start(
        &mut self,
        survey: &mut MutableSurvey,
        participant: &mut MutableParticipant,
    ) -> Result<(), StudioError> {
        if self.kind == CommandKind::Null {
            self.phase = Phase::Staged;
            return Ok(());
        }
        if self.phase != Phase::Unstarted {
            return Err(StudioError::AlreadyStarted);
        }

        if let Some((page, at)) = insertion_point(&self.kind, survey)? {
            let snapshot = survey.value();
            let section = section_at(&snapshot, page, at);
            let (items, rules) =
                build_fragment(&self.kind, &snapshot, &self.config, section.as_ref())?;

            if let Some(taken) = items.iter().find(|i| survey.contains_variable(&i.variable_name)) {
                return Err(StudioError::DuplicateName(taken.variable_name.clone()));
            }

            let staging = Staging {
                page,
                at,
                fields: items.iter().map(|i| i.variable_name.clone()).collect(),
                mandatory: rules
                    .iter()
                    .filter(|r| r.rule == Rule::Required)
                    .map(|r| r.target.clone())
                    .collect(),
            };
            debug!(page, at, fields = staging.fields.len(), "Injecting parameter form");

            survey.insert_items(page, at, items, rules)?;
            self.staging = Some(staging);
        }

        participant.update_page_sets(survey.page_sets());
        self.phase = Phase::Staged;
        Ok(())
    }

    /// Whether `apply` may run with these answers
    pub fn can_apply(&self, survey: &Survey, answers: &[InterviewItem]) -> bool {
        if self.kind == CommandKind::Null {
            return true;
        }
        if self.phase != Phase::Staged {
            return false;
        }
        let staging = match &self.staging {
            Some(staging) => staging,
            None => return true,
        };

        let fields: Vec<&str> = staging.fields.iter().map(String::as_str).collect();
        let mandatory: Vec<&str> = staging.mandatory.iter().map(String::as_str).collect();

        fields.iter().all(|f| survey.item(f).is_some())
            && all_answered(&mandatory, answers)
            && all_required_set(&fields, answers)
            && all_unique_set(&fields, answers)
            && all_languages_set(&fields, answers)
    }

    /// Perform the edit described by the answers
    #[instrument(skip_all, fields(command = self.kind.name()))]
    pub fn apply(
        &mut self,
        survey: &mut MutableSurvey,
        participant: &mut MutableParticipant,
        answers: &[InterviewItem],
    ) -> Result<(), StudioError> {
        if self.kind == CommandKind::Null {
            self.phase = Phase::Applied;
            return Ok(());
        }
        if self.phase != Phase::Staged {
            return Err(StudioError::NotStaged);
        }

        let fragment = self
            .staging
            .as_ref()
            .map(|s| s.fields.clone())
            .unwrap_or_default();
        let edit = {
            let ctx = Context {
                survey: &*survey,
                answers,
                config: &self.config,
                fragment: &fragment,
            };
            plan(&self.kind, &ctx)?
        };
        debug!(edit = edit.name(), "Resolved parameters");

        discard(survey, participant, &fragment)?;
        edit.run(survey, participant)?;
        participant.update_page_sets(survey.page_sets());

        self.phase = Phase::Applied;
        info!(dirty = ?survey.dirty(), "Applied structural edit");
        Ok(())
    }
}

fn page_len(survey: &MutableSurvey, page: usize) -> Result<usize, StudioError> {
    Ok(survey.page(page)?.items.len())
}

fn check_range(page: usize, index: usize, count: usize, len: usize) -> Result<(), StudioError> {
    if count == 0 {
        return Err(StudioError::InvalidParameter {
            name: "count".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    match index.checked_add(count) {
        Some(end) if end <= len => Ok(()),
        _ => Err(StudioError::ItemOutOfRange {
            page,
            index: index.saturating_add(count - 1),
        }),
    }
}

fn check_page_set(survey: &MutableSurvey, page_set: usize) -> Result<&PageSet, StudioError> {
    survey
        .page_sets()
        .get(page_set)
        .ok_or(StudioError::PageSetOutOfRange(page_set))
}

fn check_workflow(survey: &MutableSurvey, workflow: usize) -> Result<&Workflow, StudioError> {
    survey
        .workflows()
        .get(workflow)
        .ok_or(StudioError::WorkflowOutOfRange(workflow))
}

/// Page and position receiving the parameter form; `None` for `Null`
fn insertion_point(
    kind: &CommandKind,
    survey: &MutableSurvey,
) -> Result<Option<(usize, usize)>, StudioError> {
    let point = match kind {
        CommandKind::DeleteItem { page, index, count } => {
            check_range(*page, *index, *count, page_len(survey, *page)?)?;
            (*page, index + count)
        }
        CommandKind::DeletePage { page } => {
            survey.page(*page)?;
            (*page, 0)
        }
        CommandKind::DeletePageSet { page_set } => {
            let ps = check_page_set(survey, *page_set)?;
            match ps.pages.first() {
                Some(first) => {
                    let page = survey
                        .pages()
                        .iter()
                        .position(|p| p.code() == first)
                        .ok_or_else(|| formstudio_model::ModelError::UnknownPage {
                            page_set: ps.type_name().to_string(),
                            page: first.clone(),
                        })?;
                    (page, 0)
                }
                // A page set without pages shows the form at the end of the survey
                None => {
                    let last = survey
                        .pages()
                        .len()
                        .checked_sub(1)
                        .ok_or(StudioError::PageOutOfRange(0))?;
                    (last, page_len(survey, last)?)
                }
            }
        }
        CommandKind::DeleteWorkflow { workflow, page } => {
            check_workflow(survey, *workflow)?;
            survey.page(*page)?;
            (*page, 0)
        }
        CommandKind::InsertItem { page, index } => {
            let len = page_len(survey, *page)?;
            if *index > len {
                return Err(StudioError::ItemOutOfRange {
                    page: *page,
                    index: *index,
                });
            }
            (*page, *index)
        }
        CommandKind::InsertTableLine {
            page,
            index,
            columns,
        } => {
            check_range(*page, *index, *columns, page_len(survey, *page)?)?;
            (*page, index + columns)
        }
        CommandKind::OrderItem { page, index } => {
            check_range(*page, *index, 1, page_len(survey, *page)?)?;
            (*page, index + 1)
        }
        CommandKind::InsertPage { page_set, page }
        | CommandKind::UpdatePageSet { page_set, page }
        | CommandKind::IncludePage { page_set, page } => {
            check_page_set(survey, *page_set)?;
            (*page, page_len(survey, *page)?)
        }
        CommandKind::UpdateDerivedWorkflow { workflow, page } => {
            check_workflow(survey, *workflow)?;
            (*page, page_len(survey, *page)?)
        }
        CommandKind::InsertPageSet { page }
        | CommandKind::InsertDerivedWorkflow { page }
        | CommandKind::UpdatePage { page }
        | CommandKind::UpdateMainWorkflow { page }
        | CommandKind::UpdateSurveyOptions { page } => (*page, page_len(survey, *page)?),
        CommandKind::ApplyConfirmation(inner) => return insertion_point(inner, survey),
        CommandKind::Null => return Ok(None),
    };
    Ok(Some(point))
}

/// Section of the field just before `at`, else of the field at `at`
fn section_at(survey: &Survey, page: usize, at: usize) -> Option<Translations> {
    let items = &survey.pages.get(page)?.items;
    at.checked_sub(1)
        .and_then(|before| items.get(before))
        .or_else(|| items.get(at))
        .and_then(|item| item.section.clone())
}

/// The main workflow's index, and the workflow itself (empty if missing)
pub(crate) fn main_workflow(workflows: &[Workflow], name: &str) -> (Option<usize>, Workflow) {
    let index = workflows
        .iter()
        .position(|w| w.name == name)
        .or(if workflows.is_empty() { None } else { Some(0) });
    match index {
        Some(i) => (Some(i), workflows[i].clone()),
        None => (None, Workflow::new(name)),
    }
}

fn append_parts(
    kind: &CommandKind,
    builder: &mut SurveyBuilder,
    survey: &Survey,
    config: &StudioConfig,
    section: Option<&Translations>,
) -> Result<(), StudioError> {
    let name = kind.name();
    let (_, main) = main_workflow(&survey.workflows, &config.main_workflow);
    match kind {
        CommandKind::DeleteItem { .. } => {
            parts::delete_item(builder, name, section);
        }
        CommandKind::DeletePage { .. } => {
            parts::delete_page(builder, name, section);
        }
        CommandKind::DeletePageSet { .. } => {
            parts::delete_page_set(builder, name, section);
        }
        CommandKind::DeleteWorkflow { .. } => {
            parts::delete_workflow(builder, name, section);
        }
        CommandKind::InsertItem { .. } => {
            parts::insert_item(builder, name, section);
        }
        CommandKind::InsertPage { .. } => {
            parts::insert_page(builder, name, section);
        }
        CommandKind::InsertPageSet { .. } => {
            parts::insert_page_set(builder, name, survey, section);
        }
        CommandKind::InsertTableLine { .. } => {
            parts::insert_table_line(builder, name, section);
        }
        CommandKind::InsertDerivedWorkflow { .. } => {
            parts::insert_derived_workflow(builder, name, survey, &main, section);
        }
        CommandKind::UpdatePage { .. } => {
            parts::update_page(builder, name, section);
        }
        CommandKind::UpdatePageSet { .. } => {
            parts::update_page_set(builder, name, survey, section);
        }
        CommandKind::UpdateDerivedWorkflow { .. } => {
            parts::update_derived_workflow(builder, name, survey, &main, section);
        }
        CommandKind::UpdateMainWorkflow { .. } => {
            parts::update_main_workflow(builder, name, survey, &main, section);
        }
        CommandKind::UpdateSurveyOptions { .. } => {
            parts::update_survey_options(builder, name, &config.supported_languages, section);
        }
        CommandKind::IncludePage { page_set, .. } => {
            let ps = survey
                .page_sets
                .get(*page_set)
                .ok_or(StudioError::PageSetOutOfRange(*page_set))?;
            parts::include_page(builder, name, survey, ps, section);
        }
        CommandKind::OrderItem { .. } => {
            parts::order_item(builder, name, section);
        }
        CommandKind::ApplyConfirmation(inner) => {
            append_parts(inner, builder, survey, config, section)?;
            parts::apply_confirmation(builder, name, section);
        }
        CommandKind::Null => {}
    }
    Ok(())
}

/// Fields and rules of the command's parameter form
fn build_fragment(
    kind: &CommandKind,
    survey: &Survey,
    config: &StudioConfig,
    section: Option<&Translations>,
) -> Result<(Vec<PageItem>, Vec<CrossRule>), StudioError> {
    let mut builder = SurveyBuilder::new(kind.name());
    append_parts(kind, &mut builder, survey, config, section)?;

    let mut items = Vec::new();
    let mut rules = Vec::new();
    for page in builder.pages() {
        let (page, page_rules) = page.build();
        items.extend(page.items);
        rules.extend(page_rules);
    }
    Ok((items, rules))
}

/// Remove the parameter form and any answer given to it
fn discard(
    survey: &mut MutableSurvey,
    participant: &mut MutableParticipant,
    fragment: &[String],
) -> Result<(), StudioError> {
    for name in fragment {
        if let Some((page, index)) = survey.find_item(name) {
            survey.delete_item(page, index)?;
        }
        participant.delete_item(name);
    }
    Ok(())
}

/// Read-only view used while resolving parameters
pub(crate) struct Context<'a> {
    pub survey: &'a MutableSurvey,
    pub answers: &'a [InterviewItem],
    pub config: &'a StudioConfig,
    pub fragment: &'a [String],
}

impl<'a> Context<'a> {
    pub fn is_fragment(&self, variable_name: &str) -> bool {
        self.fragment.iter().any(|f| f == variable_name)
    }

    /// Fields of a page, parameter form excluded
    pub fn page_items(&self, page: usize) -> Result<Vec<&'a PageItem>, StudioError> {
        Ok(self
            .survey
            .page(page)?
            .items
            .iter()
            .filter(|i| !self.is_fragment(&i.variable_name))
            .collect())
    }

    /// Whether a survey field, parameter form excluded, has this name
    pub fn field_exists(&self, variable_name: &str) -> bool {
        !self.is_fragment(variable_name) && self.survey.contains_variable(variable_name)
    }

    pub fn variable_taken(&self, variable_name: &str) -> bool {
        self.field_exists(variable_name)
    }

    pub fn main_workflow(&self) -> (Option<usize>, Workflow) {
        main_workflow(self.survey.workflows(), &self.config.main_workflow)
    }
}

fn plan(kind: &CommandKind, ctx: &Context<'_>) -> Result<Edit, StudioError> {
    match kind {
        CommandKind::DeleteItem { page, index, count } => {
            delete::delete_items(ctx, *page, *index, *count)
        }
        CommandKind::DeletePage { page } => delete::delete_page(ctx, *page),
        CommandKind::DeletePageSet { page_set } => delete::delete_page_set(ctx, *page_set),
        CommandKind::DeleteWorkflow { workflow, .. } => delete::delete_workflow(ctx, *workflow),
        CommandKind::InsertItem { page, index } => insert::insert_item(ctx, *page, *index),
        CommandKind::InsertPage { page_set, page } => insert::insert_page(ctx, *page_set, *page),
        CommandKind::InsertPageSet { .. } => insert::insert_page_set(ctx),
        CommandKind::InsertTableLine {
            page,
            index,
            columns,
        } => insert::insert_table_line(ctx, *page, *index, *columns),
        CommandKind::InsertDerivedWorkflow { .. } => insert::insert_derived_workflow(ctx),
        CommandKind::UpdatePage { page } => update::update_page(ctx, *page),
        CommandKind::UpdatePageSet { page_set, .. } => update::update_page_set(ctx, *page_set),
        CommandKind::UpdateDerivedWorkflow { workflow, .. } => {
            update::update_derived_workflow(ctx, *workflow)
        }
        CommandKind::UpdateMainWorkflow { .. } => update::update_main_workflow(ctx),
        CommandKind::UpdateSurveyOptions { .. } => update::update_survey_options(ctx),
        CommandKind::IncludePage { page_set, page } => {
            update::include_page(ctx, *page_set, *page)
        }
        CommandKind::OrderItem { page, index } => update::order_item(ctx, *page, *index),
        CommandKind::ApplyConfirmation(inner) => plan(inner, ctx),
        CommandKind::Null => Ok(Edit::Nothing),
    }
}

/// A structural change with every parameter resolved
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Edit {
    Nothing,
    DeleteItems {
        page: usize,
        index: usize,
        count: usize,
    },
    DeletePage {
        page: usize,
    },
    DeletePageSet {
        page_set: usize,
    },
    InsertItems {
        page: usize,
        index: usize,
        items: Vec<PageItem>,
        rules: Vec<CrossRule>,
    },
    InsertPage {
        at: usize,
        page: Page,
        page_sets: Vec<PageSet>,
    },
    RenamePage {
        page: usize,
        name: Translations,
    },
    MoveItem {
        page: usize,
        from: usize,
        to: usize,
    },
    SetPageSets(Vec<PageSet>),
    AppendPageSet {
        page_set: PageSet,
        workflows: Vec<Workflow>,
    },
    SetWorkflows(Vec<Workflow>),
    SetOptions(SurveyOptions),
}

impl Edit {
    fn name(&self) -> &'static str {
        match self {
            Edit::Nothing => "nothing",
            Edit::DeleteItems { .. } => "delete-items",
            Edit::DeletePage { .. } => "delete-page",
            Edit::DeletePageSet { .. } => "delete-page-set",
            Edit::InsertItems { .. } => "insert-items",
            Edit::InsertPage { .. } => "insert-page",
            Edit::RenamePage { .. } => "rename-page",
            Edit::MoveItem { .. } => "move-item",
            Edit::SetPageSets(_) => "set-page-sets",
            Edit::AppendPageSet { .. } => "append-page-set",
            Edit::SetWorkflows(_) => "set-workflows",
            Edit::SetOptions(_) => "set-options",
        }
    }

    fn run(
        self,
        survey: &mut MutableSurvey,
        participant: &mut MutableParticipant,
    ) -> Result<(), StudioError> {
        match self {
            Edit::Nothing => {}
            Edit::DeleteItems { page, index, count } => {
                for _ in 0..count {
                    let removed = survey.delete_item(page, index)?;
                    participant.delete_item(&removed.variable_name);
                }
            }
            Edit::DeletePage { page } => {
                let removed = survey.delete_page(page)?;
                for item in &removed.items {
                    participant.delete_item(&item.variable_name);
                }
                let page_sets = survey
                    .page_sets()
                    .iter()
                    .cloned()
                    .map(|mut ps| {
                        ps.pages.retain(|code| code != removed.code());
                        ps
                    })
                    .collect();
                survey.update_page_sets(page_sets);
            }
            Edit::DeletePageSet { page_set } => {
                let mut page_sets = survey.page_sets().to_vec();
                if page_set >= page_sets.len() {
                    return Err(StudioError::PageSetOutOfRange(page_set));
                }
                let removed = page_sets.remove(page_set);
                let type_name = removed.type_name();
                participant.delete_interviews(type_name);
                let workflows = survey
                    .workflows()
                    .iter()
                    .cloned()
                    .map(|mut w| {
                        w.remove(type_name);
                        w
                    })
                    .collect();
                survey.update_page_sets(page_sets);
                survey.update_workflows(workflows);
            }
            Edit::InsertItems {
                page,
                index,
                items,
                rules,
            } => survey.insert_items(page, index, items, rules)?,
            Edit::InsertPage {
                at,
                page,
                page_sets,
            } => {
                survey.insert_page(at, page)?;
                survey.update_page_sets(page_sets);
            }
            Edit::RenamePage { page, name } => survey.update_page_name(page, name)?,
            Edit::MoveItem { page, from, to } => survey.move_item(page, from, to)?,
            Edit::SetPageSets(page_sets) => survey.update_page_sets(page_sets),
            Edit::AppendPageSet {
                page_set,
                workflows,
            } => {
                let mut page_sets = survey.page_sets().to_vec();
                page_sets.push(page_set);
                survey.update_page_sets(page_sets);
                survey.update_workflows(workflows);
            }
            Edit::SetWorkflows(workflows) => survey.update_workflows(workflows),
            Edit::SetOptions(options) => survey.update_options(options),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formstudio_model::{Interview, ItemType, ItemValue, Participant};

    fn fixture() -> (MutableSurvey, MutableParticipant) {
        let mut b = SurveyBuilder::new("s");
        {
            let page = b.page("P1");
            page.start_section(Some(Translations::new().with("en", "Vitals")));
            page.question("A", ItemType::text()).required();
            page.question("B", ItemType::YesNo);
        }
        b.page("P2").question("C", ItemType::Date);
        b.page_set("PS1").pages(&["P1"]);
        b.page_set("PS2").pages(&["P2"]);
        b.workflow("main").single(&["PS1"]).many(&["PS2"]);
        let survey = b.build().unwrap();

        let participant = Participant::new("001", "S").with_interview(
            Interview::new(survey.page_sets[0].clone())
                .with_item(InterviewItem::new("A", ItemValue::Text("x".into()))),
        );
        (MutableSurvey::new(survey), MutableParticipant::new(participant))
    }

    fn ack(name: &str) -> InterviewItem {
        InterviewItem::new(name, ItemValue::Bool(true))
    }

    #[test]
    fn test_phases() {
        let (mut survey, mut participant) = fixture();
        let mut command = Command::new(CommandKind::DeleteItem {
            page: 0,
            index: 1,
            count: 1,
        });
        assert_eq!(command.phase(), Phase::Unstarted);
        assert!(!command.can_apply(&survey.value(), &[]));
        assert_eq!(
            command.apply(&mut survey, &mut participant, &[]),
            Err(StudioError::NotStaged)
        );

        command.start(&mut survey, &mut participant).unwrap();
        assert_eq!(command.phase(), Phase::Staged);
        assert_eq!(
            command.start(&mut survey, &mut participant),
            Err(StudioError::AlreadyStarted)
        );

        command
            .apply(&mut survey, &mut participant, &[ack(parts::INFO_DELETION)])
            .unwrap();
        assert_eq!(command.phase(), Phase::Applied);
        assert!(!command.can_apply(&survey.value(), &[]));
    }

    #[test]
    fn test_fragment_inherits_section() {
        let (mut survey, mut participant) = fixture();
        let mut command = Command::new(CommandKind::DeleteItem {
            page: 0,
            index: 0,
            count: 1,
        });
        command.start(&mut survey, &mut participant).unwrap();

        let staging = command.staging().unwrap();
        assert_eq!((staging.page, staging.at), (0, 1));
        let injected = &survey.pages()[0].items[1];
        assert_eq!(injected.variable_name, parts::INFO_DELETION);
        assert_eq!(
            injected.section.as_ref().and_then(|s| s.get("en")),
            Some("Vitals")
        );
    }

    #[test]
    fn test_can_apply_requires_confirmation() {
        let (mut survey, mut participant) = fixture();
        let mut command = Command::new(CommandKind::DeletePage { page: 1 });
        command.start(&mut survey, &mut participant).unwrap();

        let value = survey.value();
        assert!(!command.can_apply(&value, &[]));
        assert!(!command.can_apply(
            &value,
            &[ack(parts::INFO_DELETION).with_message("required", "!")]
        ));
        assert!(command.can_apply(&value, &[ack(parts::INFO_DELETION)]));
    }

    #[test]
    fn test_can_apply_false_once_fragment_removed() {
        let (mut survey, mut participant) = fixture();
        let mut command = Command::new(CommandKind::DeletePage { page: 1 });
        command.start(&mut survey, &mut participant).unwrap();
        survey.delete_item(1, 0).unwrap();
        assert!(!command.can_apply(&survey.value(), &[ack(parts::INFO_DELETION)]));
    }

    #[test]
    fn test_out_of_range_start_leaves_survey_untouched() {
        let (mut survey, mut participant) = fixture();
        let mut command = Command::new(CommandKind::DeleteItem {
            page: 0,
            index: 1,
            count: 2,
        });
        assert_eq!(
            command.start(&mut survey, &mut participant),
            Err(StudioError::ItemOutOfRange { page: 0, index: 2 })
        );
        assert_eq!(command.phase(), Phase::Unstarted);
        assert!(!survey.dirty().any());
    }

    #[test]
    fn test_huge_positions_are_out_of_range() {
        let (mut survey, mut participant) = fixture();
        let mut command = Command::new(CommandKind::DeleteItem {
            page: 0,
            index: usize::MAX,
            count: 1,
        });
        assert_eq!(
            command.start(&mut survey, &mut participant),
            Err(StudioError::ItemOutOfRange {
                page: 0,
                index: usize::MAX
            })
        );

        let mut command = Command::new(CommandKind::InsertTableLine {
            page: 0,
            index: 1,
            columns: usize::MAX,
        });
        assert!(matches!(
            command.start(&mut survey, &mut participant),
            Err(StudioError::ItemOutOfRange { page: 0, .. })
        ));
        assert!(!survey.dirty().any());
    }

    #[test]
    fn test_null_command() {
        let (mut survey, mut participant) = fixture();
        let before = survey.value();
        let mut command = Command::default();
        command.start(&mut survey, &mut participant).unwrap();
        assert!(command.can_apply(&survey.value(), &[]));
        command.apply(&mut survey, &mut participant, &[]).unwrap();
        assert_eq!(survey.value(), before);
    }

    #[test]
    fn test_failed_apply_stays_staged() {
        let (mut survey, mut participant) = fixture();
        let mut command = Command::new(CommandKind::InsertItem { page: 0, index: 0 });
        command.start(&mut survey, &mut participant).unwrap();
        let staged = survey.value();

        let result = command.apply(&mut survey, &mut participant, &[]);
        assert_eq!(
            result,
            Err(StudioError::MissingParameter(parts::ITEM_VARIABLE_NAME.into()))
        );
        assert_eq!(command.phase(), Phase::Staged);
        assert_eq!(survey.value(), staged);
    }

    #[test]
    fn test_main_workflow_falls_back_to_first() {
        let workflows = vec![Workflow::new("home"), Workflow::new("INV")];
        assert_eq!(main_workflow(&workflows, "main").0, Some(0));
        assert_eq!(main_workflow(&workflows, "INV").0, Some(1));
        assert_eq!(main_workflow(&[], "main"), (None, Workflow::new("main")));
    }
}
