//! Update-in-place and selection commands.
//!
//! An unanswered optional field keeps the current value.

use super::{params, Context, Edit};
use crate::errors::StudioError;
use crate::parts::{
    DIRECTION_DOWN, DIRECTION_UP, INCLUDED_PAGE, ITEM_DIRECTION, PAGE_NAME, PAGE_SET_DATE_VAR,
    PAGE_SET_NAME, PAGE_SET_PAGES, SURVEY_DEFAULT_LANGUAGE, SURVEY_INTERVIEW_DATE_VAR,
    SURVEY_LANGUAGES, SURVEY_SHOW_FIELD_NAMES, WORKFLOW_MANY, WORKFLOW_NOTIFICATIONS,
    WORKFLOW_PAGE_SETS, WORKFLOW_SINGLE,
};
use formstudio_model::{SurveyOptions, Workflow};

fn invalid(name: &str, reason: impl Into<String>) -> StudioError {
    StudioError::InvalidParameter {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// `main` restricted to the `selected` page-set types, in main's order
pub(super) fn derived_workflow(
    main: &Workflow,
    name: &str,
    selected: &[String],
) -> Result<Workflow, StudioError> {
    if let Some(unknown) = selected.iter().find(|t| !main.contains(t)) {
        return Err(invalid(
            WORKFLOW_PAGE_SETS,
            format!("{} is not in workflow {}", unknown, main.name),
        ));
    }
    let keep = |list: &[String]| -> Vec<String> {
        list.iter().filter(|t| selected.contains(t)).cloned().collect()
    };
    Ok(Workflow {
        name: name.to_string(),
        info: keep(&main.info),
        single: keep(&main.single),
        many: keep(&main.many),
        start_with: keep(&main.start_with),
        end_with: keep(&main.end_with),
        notifications: Vec::new(),
    })
}

/// A field name answer, which must name an existing field
fn date_variable(ctx: &Context<'_>, variable_name: &str) -> Result<Option<String>, StudioError> {
    match params::optional_text(ctx.answers, variable_name) {
        Some(date) if !ctx.field_exists(&date) => {
            Err(invalid(variable_name, format!("unknown field {}", date)))
        }
        date => Ok(date),
    }
}

pub(super) fn update_page(ctx: &Context<'_>, page: usize) -> Result<Edit, StudioError> {
    let name = params::translations(ctx.answers, PAGE_NAME)
        .ok_or_else(|| StudioError::MissingParameter(PAGE_NAME.to_string()))?;
    let code = ctx.survey.page(page)?.code();
    Ok(Edit::RenamePage {
        page,
        name: name.with_code(code),
    })
}

pub(super) fn update_page_set(ctx: &Context<'_>, page_set: usize) -> Result<Edit, StudioError> {
    let mut page_sets = ctx.survey.page_sets().to_vec();
    let target = page_sets
        .get_mut(page_set)
        .ok_or(StudioError::PageSetOutOfRange(page_set))?;

    if let Some(name) = params::translations(ctx.answers, PAGE_SET_NAME) {
        target.kind = name.with_code(target.type_name());
    }

    let selected = params::selection(ctx.answers, PAGE_SET_PAGES);
    if !selected.is_empty() {
        if let Some(unknown) = selected
            .iter()
            .find(|code| !ctx.survey.pages().iter().any(|p| p.code() == code.as_str()))
        {
            return Err(invalid(PAGE_SET_PAGES, format!("unknown page {}", unknown)));
        }
        target.pages = ctx
            .survey
            .pages()
            .iter()
            .map(|p| p.code())
            .filter(|code| selected.iter().any(|s| s.as_str() == *code))
            .map(str::to_string)
            .collect();
    }

    if let Some(date) = date_variable(ctx, PAGE_SET_DATE_VAR)? {
        target.date_variable = Some(date);
    }

    Ok(Edit::SetPageSets(page_sets))
}

pub(super) fn update_derived_workflow(ctx: &Context<'_>, workflow: usize) -> Result<Edit, StudioError> {
    let (main_index, main) = ctx.main_workflow();
    if main_index == Some(workflow) {
        return Err(invalid("workflow", "the main workflow is not derived"));
    }

    let mut workflows = ctx.survey.workflows().to_vec();
    let target = workflows
        .get_mut(workflow)
        .ok_or(StudioError::WorkflowOutOfRange(workflow))?;
    if let Some(selected) = params::optional_selection(ctx.answers, WORKFLOW_PAGE_SETS) {
        let mut derived = derived_workflow(&main, &target.name, &selected)?;
        derived.notifications = std::mem::take(&mut target.notifications);
        *target = derived;
    }

    Ok(Edit::SetWorkflows(workflows))
}

pub(super) fn update_main_workflow(ctx: &Context<'_>) -> Result<Edit, StudioError> {
    let (index, mut main) = ctx.main_workflow();
    let single = params::selection(ctx.answers, WORKFLOW_SINGLE);
    let many = params::selection(ctx.answers, WORKFLOW_MANY);

    for (field, types) in [(WORKFLOW_SINGLE, &single), (WORKFLOW_MANY, &many)] {
        for t in types {
            if !ctx.survey.page_sets().iter().any(|ps| ps.type_name() == t.as_str()) {
                return Err(invalid(field, format!("unknown page set {}", t)));
            }
            if main.contains(t) {
                return Err(invalid(field, format!("{} is already in the workflow", t)));
            }
        }
    }
    if let Some(both) = single.iter().find(|t| many.contains(t)) {
        return Err(invalid(WORKFLOW_MANY, format!("{} is also filled once", both)));
    }

    main.single.extend(single);
    main.many.extend(many);
    if let Some(mut notifications) = params::optional_selection(ctx.answers, WORKFLOW_NOTIFICATIONS) {
        notifications.sort();
        notifications.dedup();
        main.notifications = notifications;
    }

    let mut workflows = ctx.survey.workflows().to_vec();
    match index {
        Some(i) => workflows[i] = main,
        None => workflows.push(main),
    }
    Ok(Edit::SetWorkflows(workflows))
}

pub(super) fn update_survey_options(ctx: &Context<'_>) -> Result<Edit, StudioError> {
    let languages = params::selection(ctx.answers, SURVEY_LANGUAGES);
    if languages.is_empty() {
        return Err(StudioError::MissingParameter(SURVEY_LANGUAGES.to_string()));
    }
    if let Some(unsupported) = languages
        .iter()
        .find(|l| !ctx.config.supported_languages.contains(l))
    {
        return Err(invalid(
            SURVEY_LANGUAGES,
            format!("unsupported language {}", unsupported),
        ));
    }
    let default_language = params::text(ctx.answers, SURVEY_DEFAULT_LANGUAGE)?;
    if !languages.contains(&default_language) {
        return Err(invalid(
            SURVEY_DEFAULT_LANGUAGE,
            format!("{} is not a survey language", default_language),
        ));
    }

    let current = ctx.survey.options();
    Ok(Edit::SetOptions(SurveyOptions {
        languages,
        default_language,
        show_field_names: params::optional_flag(ctx.answers, SURVEY_SHOW_FIELD_NAMES)
            .unwrap_or(current.show_field_names),
        interview_date_var: date_variable(ctx, SURVEY_INTERVIEW_DATE_VAR)?
            .or_else(|| current.interview_date_var.clone()),
    }))
}

pub(super) fn include_page(ctx: &Context<'_>, page_set: usize, page: usize) -> Result<Edit, StudioError> {
    let code = params::text(ctx.answers, INCLUDED_PAGE)?;
    if !ctx.survey.pages().iter().any(|p| p.code() == code) {
        return Err(invalid(INCLUDED_PAGE, format!("unknown page {}", code)));
    }
    let after = ctx.survey.page(page)?.code().to_string();

    let mut page_sets = ctx.survey.page_sets().to_vec();
    let target = page_sets
        .get_mut(page_set)
        .ok_or(StudioError::PageSetOutOfRange(page_set))?;
    if target.pages.contains(&code) {
        return Err(StudioError::DuplicateName(code));
    }
    let at = target
        .pages
        .iter()
        .position(|c| *c == after)
        .map(|i| i + 1)
        .unwrap_or(target.pages.len());
    target.pages.insert(at, code);

    Ok(Edit::SetPageSets(page_sets))
}

pub(super) fn order_item(ctx: &Context<'_>, page: usize, index: usize) -> Result<Edit, StudioError> {
    let direction = params::text(ctx.answers, ITEM_DIRECTION)?;
    let len = ctx.page_items(page)?.len();
    if index >= len {
        return Err(StudioError::ItemOutOfRange { page, index });
    }
    let to = match direction.as_str() {
        DIRECTION_UP if index > 0 => index - 1,
        DIRECTION_DOWN if index + 1 < len => index + 1,
        DIRECTION_UP | DIRECTION_DOWN => {
            return Err(invalid(ITEM_DIRECTION, format!("cannot move {}", direction)))
        }
        other => return Err(invalid(ITEM_DIRECTION, format!("unknown direction {}", other))),
    };
    Ok(Edit::MoveItem {
        page,
        from: index,
        to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_workflow_keeps_main_order() {
        let mut main = Workflow::new("main");
        main.info = vec!["INFO".into()];
        main.single = vec!["INCL".into(), "END".into()];
        main.many = vec!["FOLLOW".into()];

        let derived =
            derived_workflow(&main, "INV", &["END".into(), "INFO".into()]).unwrap();
        assert_eq!(derived.name, "INV");
        assert_eq!(derived.info, vec!["INFO"]);
        assert_eq!(derived.single, vec!["END"]);
        assert!(derived.many.is_empty());

        assert!(matches!(
            derived_workflow(&main, "INV", &["NOPE".into()]),
            Err(StudioError::InvalidParameter { .. })
        ));
    }
}
