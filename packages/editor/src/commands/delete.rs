use super::{check_range, Context, Edit};
use crate::errors::StudioError;

pub(super) fn delete_items(
    ctx: &Context<'_>,
    page: usize,
    index: usize,
    count: usize,
) -> Result<Edit, StudioError> {
    check_range(page, index, count, ctx.page_items(page)?.len())?;
    Ok(Edit::DeleteItems { page, index, count })
}

pub(super) fn delete_page(ctx: &Context<'_>, page: usize) -> Result<Edit, StudioError> {
    ctx.survey.page(page)?;
    Ok(Edit::DeletePage { page })
}

pub(super) fn delete_page_set(ctx: &Context<'_>, page_set: usize) -> Result<Edit, StudioError> {
    if page_set >= ctx.survey.page_sets().len() {
        return Err(StudioError::PageSetOutOfRange(page_set));
    }
    Ok(Edit::DeletePageSet { page_set })
}

pub(super) fn delete_workflow(ctx: &Context<'_>, workflow: usize) -> Result<Edit, StudioError> {
    let mut workflows = ctx.survey.workflows().to_vec();
    if workflow >= workflows.len() {
        return Err(StudioError::WorkflowOutOfRange(workflow));
    }
    workflows.remove(workflow);
    Ok(Edit::SetWorkflows(workflows))
}
