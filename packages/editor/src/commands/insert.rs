use super::update::derived_workflow;
use super::{check_range, params, Context, Edit};
use crate::errors::StudioError;
use crate::parts::{
    ITEM_CHOICES, ITEM_REQUIRED, ITEM_TYPE, ITEM_VARIABLE_NAME, ITEM_WORDING, MODE_INFO,
    MODE_MANY, MODE_SINGLE, PAGE_CODE, PAGE_NAME, PAGE_SET_MODE, PAGE_SET_NAME, PAGE_SET_PAGES,
    PAGE_SET_TYPE, TABLE_LINE_PREFIX, TABLE_LINE_WORDING, WORKFLOW_NAME, WORKFLOW_PAGE_SETS,
};
use formstudio_model::{
    table_column, ChoiceType, CrossRule, ItemType, Multiplicity, Page, PageItem, PageSet, Rule,
    TABLE_SEPARATOR,
};

fn invalid(name: &str, reason: impl Into<String>) -> StudioError {
    StudioError::InvalidParameter {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Field type from an `insert_item` type code
pub(crate) fn item_type(code: &str, choices: Vec<String>) -> Result<ItemType, StudioError> {
    let multiplicity = match code {
        "text" => return Ok(ItemType::text()),
        "mltext" => return Ok(ItemType::multi_lang_text()),
        "integer" => return Ok(ItemType::Integer),
        "real" => return Ok(ItemType::Real { decimals: 2 }),
        "date" => return Ok(ItemType::Date),
        "yesno" => return Ok(ItemType::YesNo),
        "acknowledge" => return Ok(ItemType::Acknowledge),
        "info" => return Ok(ItemType::Info),
        "choice" => Multiplicity::One,
        "choices" => Multiplicity::Many,
        other => return Err(invalid(ITEM_TYPE, format!("unknown type {}", other))),
    };
    if choices.is_empty() {
        return Err(StudioError::MissingParameter(ITEM_CHOICES.to_string()));
    }
    Ok(ItemType::Choice(ChoiceType::new(multiplicity, choices)))
}

pub(super) fn insert_item(ctx: &Context<'_>, page: usize, index: usize) -> Result<Edit, StudioError> {
    let name = params::code(ctx.answers, ITEM_VARIABLE_NAME)?;
    if ctx.variable_taken(&name) {
        return Err(StudioError::DuplicateName(name));
    }
    let item_type = item_type(
        &params::text(ctx.answers, ITEM_TYPE)?,
        params::list(ctx.answers, ITEM_CHOICES),
    )?;

    let items = ctx.page_items(page)?;
    if index > items.len() {
        return Err(StudioError::ItemOutOfRange { page, index });
    }
    let neighbour = index
        .checked_sub(1)
        .and_then(|before| items.get(before))
        .or_else(|| items.get(index));

    let mut item = PageItem::new(name.clone(), item_type);
    item.wording = params::translations(ctx.answers, ITEM_WORDING).unwrap_or_default();
    item.section = neighbour.and_then(|n| n.section.clone());

    let rules = if params::flag(ctx.answers, ITEM_REQUIRED) {
        vec![CrossRule::new(name, Rule::Required)]
    } else {
        Vec::new()
    };

    Ok(Edit::InsertItems {
        page,
        index,
        items: vec![item],
        rules,
    })
}

pub(super) fn insert_page(ctx: &Context<'_>, page_set: usize, page: usize) -> Result<Edit, StudioError> {
    let code = params::code(ctx.answers, PAGE_CODE)?;
    if ctx.survey.pages().iter().any(|p| p.code() == code) {
        return Err(StudioError::DuplicateName(code));
    }
    let name = params::translations(ctx.answers, PAGE_NAME)
        .unwrap_or_default()
        .with_code(code.as_str());
    let after = ctx.survey.page(page)?.code().to_string();

    let mut page_sets = ctx.survey.page_sets().to_vec();
    let target = page_sets
        .get_mut(page_set)
        .ok_or(StudioError::PageSetOutOfRange(page_set))?;
    let at = target
        .pages
        .iter()
        .position(|c| *c == after)
        .map(|i| i + 1)
        .unwrap_or(target.pages.len());
    target.pages.insert(at, code);

    Ok(Edit::InsertPage {
        at: page + 1,
        page: Page {
            name,
            items: Vec::new(),
        },
        page_sets,
    })
}

pub(super) fn insert_page_set(ctx: &Context<'_>) -> Result<Edit, StudioError> {
    let type_name = params::code(ctx.answers, PAGE_SET_TYPE)?;
    if ctx
        .survey
        .page_sets()
        .iter()
        .any(|ps| ps.type_name() == type_name)
    {
        return Err(StudioError::DuplicateName(type_name));
    }
    let mode = params::text(ctx.answers, PAGE_SET_MODE)?;

    let selected = params::selection(ctx.answers, PAGE_SET_PAGES);
    if let Some(unknown) = selected
        .iter()
        .find(|code| !ctx.survey.pages().iter().any(|p| p.code() == code.as_str()))
    {
        return Err(invalid(PAGE_SET_PAGES, format!("unknown page {}", unknown)));
    }
    let pages = ctx
        .survey
        .pages()
        .iter()
        .map(|p| p.code())
        .filter(|code| selected.iter().any(|s| s.as_str() == *code))
        .map(str::to_string)
        .collect();

    let (index, mut main) = ctx.main_workflow();
    let list = match mode.as_str() {
        MODE_SINGLE => &mut main.single,
        MODE_MANY => &mut main.many,
        MODE_INFO => &mut main.info,
        other => return Err(invalid(PAGE_SET_MODE, format!("unknown mode {}", other))),
    };
    list.push(type_name.clone());

    let mut workflows = ctx.survey.workflows().to_vec();
    match index {
        Some(i) => workflows[i] = main,
        None => workflows.push(main),
    }

    let kind = params::translations(ctx.answers, PAGE_SET_NAME)
        .unwrap_or_default()
        .with_code(type_name.as_str());
    Ok(Edit::AppendPageSet {
        page_set: PageSet {
            kind,
            pages,
            date_variable: None,
        },
        workflows,
    })
}

pub(super) fn insert_table_line(
    ctx: &Context<'_>,
    page: usize,
    index: usize,
    columns: usize,
) -> Result<Edit, StudioError> {
    let row = params::translations(ctx.answers, TABLE_LINE_WORDING)
        .ok_or_else(|| StudioError::MissingParameter(TABLE_LINE_WORDING.to_string()))?;
    let prefix = params::code(ctx.answers, TABLE_LINE_PREFIX)?;

    let items = ctx.page_items(page)?;
    check_range(page, index, columns, items.len())?;
    let default_language = ctx.survey.options().default_language.as_str();

    let mut line = Vec::with_capacity(columns);
    let mut rules = Vec::new();
    for (n, cell) in items[index..index + columns].iter().enumerate() {
        let variable_name = format!("{}_{}", prefix, n + 1);
        if ctx.variable_taken(&variable_name) {
            return Err(StudioError::DuplicateName(variable_name));
        }

        let mut item = (*cell).clone();
        item.variable_name = variable_name.clone();
        item.wording = cell.wording.map_texts(|lang, text| {
            format!(
                "{}{}{}",
                row.translate(lang, default_language),
                TABLE_SEPARATOR,
                table_column(text)
            )
        });
        rules.extend(
            ctx.survey
                .cross_rules()
                .iter()
                .filter(|r| r.target == cell.variable_name)
                .map(|r| CrossRule::new(variable_name.clone(), r.rule.clone())),
        );
        line.push(item);
    }

    Ok(Edit::InsertItems {
        page,
        index: index + columns,
        items: line,
        rules,
    })
}

pub(super) fn insert_derived_workflow(ctx: &Context<'_>) -> Result<Edit, StudioError> {
    let name = params::code(ctx.answers, WORKFLOW_NAME)?;
    if ctx.survey.workflows().iter().any(|w| w.name == name) {
        return Err(StudioError::DuplicateName(name));
    }
    let (_, main) = ctx.main_workflow();
    let derived = derived_workflow(
        &main,
        &name,
        &params::selection(ctx.answers, WORKFLOW_PAGE_SETS),
    )?;

    let mut workflows = ctx.survey.workflows().to_vec();
    workflows.push(derived);
    Ok(Edit::SetWorkflows(workflows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_codes() {
        assert_eq!(item_type("date", vec![]).unwrap(), ItemType::Date);
        assert_eq!(
            item_type("choices", vec!["1".into(), "2".into()]).unwrap(),
            ItemType::Choice(ChoiceType::new(
                Multiplicity::Many,
                vec!["1".into(), "2".into()]
            ))
        );
        assert_eq!(
            item_type("choice", vec![]),
            Err(StudioError::MissingParameter(ITEM_CHOICES.into()))
        );
        assert!(matches!(
            item_type("blob", vec![]),
            Err(StudioError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_offered_type_codes_are_all_known() {
        for (code, _, _) in crate::parts::ITEM_TYPE_CODES {
            assert!(item_type(code, vec!["1".into()]).is_ok(), "{}", code);
        }
    }
}
