//! # Mutable Graph Adapters
//!
//! In-place editable views over [`Survey`] and [`Participant`] values.
//!
//! An adapter owns copies of the aggregate's backing arrays and records
//! which of them changed. `value()` returns a fresh snapshot; nothing inside
//! the adapter is handed out mutably.
//!
//! Adapters do not keep the survey and participants consistent with each
//! other. Commands do.

use crate::errors::StudioError;
use formstudio_model::{
    CrossRule, Interview, InterviewItem, Page, PageItem, PageSet, Participant, Survey,
    SurveyOptions, Translations, Workflow,
};

/// Parts of a survey changed since the adapter was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dirty {
    pub items: bool,
    pub pages: bool,
    pub page_sets: bool,
    pub workflows: bool,
    pub options: bool,
}

impl Dirty {
    pub fn any(&self) -> bool {
        self.items || self.pages || self.page_sets || self.workflows || self.options
    }
}

/// Editable survey
#[derive(Debug, Clone)]
pub struct MutableSurvey {
    name: String,
    options: SurveyOptions,
    pages: Vec<Page>,
    page_sets: Vec<PageSet>,
    workflows: Vec<Workflow>,
    cross_rules: Vec<CrossRule>,
    dirty: Dirty,
}

impl From<Survey> for MutableSurvey {
    fn from(survey: Survey) -> Self {
        Self::new(survey)
    }
}

impl MutableSurvey {
    pub fn new(survey: Survey) -> Self {
        Self {
            name: survey.name,
            options: survey.options,
            pages: survey.pages,
            page_sets: survey.page_sets,
            workflows: survey.workflows,
            cross_rules: survey.cross_rules,
            dirty: Dirty::default(),
        }
    }

    /// Immutable snapshot of the current state
    pub fn value(&self) -> Survey {
        Survey {
            name: self.name.clone(),
            options: self.options.clone(),
            pages: self.pages.clone(),
            page_sets: self.page_sets.clone(),
            workflows: self.workflows.clone(),
            cross_rules: self.cross_rules.clone(),
        }
    }

    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &SurveyOptions {
        &self.options
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_sets(&self) -> &[PageSet] {
        &self.page_sets
    }

    pub fn workflows(&self) -> &[Workflow] {
        &self.workflows
    }

    pub fn cross_rules(&self) -> &[CrossRule] {
        &self.cross_rules
    }

    pub fn page(&self, page_index: usize) -> Result<&Page, StudioError> {
        self.pages
            .get(page_index)
            .ok_or(StudioError::PageOutOfRange(page_index))
    }

    pub fn item(&self, page_index: usize, index: usize) -> Result<&PageItem, StudioError> {
        self.page(page_index)?
            .items
            .get(index)
            .ok_or(StudioError::ItemOutOfRange {
                page: page_index,
                index,
            })
    }

    pub fn contains_variable(&self, variable_name: &str) -> bool {
        self.pages
            .iter()
            .flat_map(|p| p.items.iter())
            .any(|i| i.variable_name == variable_name)
    }

    /// Page and position of a field
    pub fn find_item(&self, variable_name: &str) -> Option<(usize, usize)> {
        self.pages.iter().enumerate().find_map(|(p, page)| {
            page.items
                .iter()
                .position(|i| i.variable_name == variable_name)
                .map(|i| (p, i))
        })
    }

    /// Splice `items` into a page at `at` and register their rules
    pub fn insert_items(
        &mut self,
        page_index: usize,
        at: usize,
        items: Vec<PageItem>,
        cross_rules: Vec<CrossRule>,
    ) -> Result<(), StudioError> {
        let page = self
            .pages
            .get_mut(page_index)
            .ok_or(StudioError::PageOutOfRange(page_index))?;
        if at > page.items.len() {
            return Err(StudioError::ItemOutOfRange {
                page: page_index,
                index: at,
            });
        }
        page.items.splice(at..at, items);
        self.cross_rules.extend(cross_rules);
        self.dirty.items = true;
        Ok(())
    }

    /// Remove one field and every rule targeting it
    pub fn delete_item(&mut self, page_index: usize, index: usize) -> Result<PageItem, StudioError> {
        self.item(page_index, index)?;
        let removed = self.pages[page_index].items.remove(index);
        self.cross_rules.retain(|r| r.target != removed.variable_name);
        self.dirty.items = true;
        Ok(removed)
    }

    /// Move a field within its page
    pub fn move_item(&mut self, page_index: usize, from: usize, to: usize) -> Result<(), StudioError> {
        self.item(page_index, from)?;
        self.item(page_index, to)?;
        let item = self.pages[page_index].items.remove(from);
        self.pages[page_index].items.insert(to, item);
        self.dirty.items = true;
        Ok(())
    }

    pub fn insert_page(&mut self, at: usize, page: Page) -> Result<(), StudioError> {
        if at > self.pages.len() {
            return Err(StudioError::PageOutOfRange(at));
        }
        self.pages.insert(at, page);
        self.dirty.pages = true;
        Ok(())
    }

    /// Remove a page with its fields and their rules
    pub fn delete_page(&mut self, page_index: usize) -> Result<Page, StudioError> {
        self.page(page_index)?;
        let removed = self.pages.remove(page_index);
        self.cross_rules
            .retain(|r| !removed.items.iter().any(|i| i.variable_name == r.target));
        self.dirty.pages = true;
        self.dirty.items = true;
        Ok(removed)
    }

    pub fn update_page_name(&mut self, page_index: usize, name: Translations) -> Result<(), StudioError> {
        let page = self
            .pages
            .get_mut(page_index)
            .ok_or(StudioError::PageOutOfRange(page_index))?;
        page.name = name;
        self.dirty.pages = true;
        Ok(())
    }

    pub fn update_page_sets(&mut self, page_sets: Vec<PageSet>) {
        self.page_sets = page_sets;
        self.dirty.page_sets = true;
    }

    pub fn update_workflows(&mut self, workflows: Vec<Workflow>) {
        self.workflows = workflows;
        self.dirty.workflows = true;
    }

    pub fn update_options(&mut self, options: SurveyOptions) {
        self.options = options;
        self.dirty.options = true;
    }
}

/// Editable participant
#[derive(Debug, Clone)]
pub struct MutableParticipant {
    participant_code: String,
    sample_code: String,
    interviews: Vec<Interview>,
    dirty: bool,
}

impl From<Participant> for MutableParticipant {
    fn from(participant: Participant) -> Self {
        Self::new(participant)
    }
}

impl MutableParticipant {
    pub fn new(participant: Participant) -> Self {
        Self {
            participant_code: participant.participant_code,
            sample_code: participant.sample_code,
            interviews: participant.interviews,
            dirty: false,
        }
    }

    pub fn value(&self) -> Participant {
        Participant {
            participant_code: self.participant_code.clone(),
            sample_code: self.sample_code.clone(),
            interviews: self.interviews.clone(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn participant_code(&self) -> &str {
        &self.participant_code
    }

    pub fn interviews(&self) -> &[Interview] {
        &self.interviews
    }

    /// Rebind every interview to the page set of the same type
    pub fn update_page_sets(&mut self, page_sets: &[PageSet]) {
        for interview in &mut self.interviews {
            if let Some(page_set) = page_sets
                .iter()
                .find(|ps| ps.type_name() == interview.page_set.type_name())
            {
                if interview.page_set != *page_set {
                    interview.page_set = page_set.clone();
                    self.dirty = true;
                }
            }
        }
    }

    /// Drop every answer to `variable_name`; returns how many were dropped
    pub fn delete_item(&mut self, variable_name: &str) -> usize {
        let mut removed = 0;
        for interview in &mut self.interviews {
            let before = interview.items.len();
            interview.items.retain(|i| i.variable_name != variable_name);
            removed += before - interview.items.len();
        }
        if removed > 0 {
            self.dirty = true;
        }
        removed
    }

    /// Drop every interview of a page-set type; returns how many were dropped
    pub fn delete_interviews(&mut self, page_set_type: &str) -> usize {
        let before = self.interviews.len();
        self.interviews
            .retain(|i| i.page_set.type_name() != page_set_type);
        let removed = before - self.interviews.len();
        if removed > 0 {
            self.dirty = true;
        }
        removed
    }

    /// Record an answer, replacing a previous answer to the same field
    pub fn answer(&mut self, interview_index: usize, item: InterviewItem) -> Result<(), StudioError> {
        let interview = self
            .interviews
            .get_mut(interview_index)
            .ok_or(StudioError::InterviewOutOfRange(interview_index))?;
        match interview
            .items
            .iter_mut()
            .find(|i| i.variable_name == item.variable_name)
        {
            Some(existing) => *existing = item,
            None => interview.items.push(item),
        }
        self.dirty = true;
        Ok(())
    }
}

/// Every interview's page set is one of the survey's page sets and every
/// answer references an existing field
pub fn is_consistent(survey: &Survey, participant: &Participant) -> bool {
    participant.interviews.iter().all(|interview| {
        survey.page_sets.contains(&interview.page_set)
            && interview
                .items
                .iter()
                .all(|item| survey.item(&item.variable_name).is_some())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use formstudio_model::{ItemType, ItemValue, SurveyBuilder};

    fn survey() -> Survey {
        let mut b = SurveyBuilder::new("s");
        {
            let page = b.page("P1");
            page.question("A", ItemType::text()).required();
            page.question("B", ItemType::YesNo);
        }
        b.page_set("PS").pages(&["P1"]);
        b.build().unwrap()
    }

    fn participant(survey: &Survey) -> Participant {
        Participant::new("001", "S1").with_interview(
            Interview::new(survey.page_sets[0].clone())
                .with_item(InterviewItem::new("A", ItemValue::Text("x".into())))
                .with_item(InterviewItem::new("B", ItemValue::Bool(true))),
        )
    }

    #[test]
    fn test_insert_and_delete_items() {
        let mut ms = MutableSurvey::new(survey());
        assert!(!ms.dirty().any());

        ms.insert_items(0, 1, vec![PageItem::new("C", ItemType::Date)], vec![])
            .unwrap();
        let names: Vec<_> = ms.pages()[0].items.iter().map(|i| i.variable_name.clone()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);
        assert!(ms.dirty().items);

        let removed = ms.delete_item(0, 0).unwrap();
        assert_eq!(removed.variable_name, "A");
        assert!(ms.cross_rules().is_empty());
    }

    #[test]
    fn test_insert_out_of_range() {
        let mut ms = MutableSurvey::new(survey());
        assert_eq!(
            ms.insert_items(3, 0, vec![], vec![]),
            Err(StudioError::PageOutOfRange(3))
        );
        assert_eq!(
            ms.insert_items(0, 5, vec![], vec![]),
            Err(StudioError::ItemOutOfRange { page: 0, index: 5 })
        );
    }

    #[test]
    fn test_participant_delete_item_and_consistency() {
        let s = survey();
        let mut mp = MutableParticipant::new(participant(&s));
        let mut ms = MutableSurvey::new(s);
        assert!(is_consistent(&ms.value(), &mp.value()));

        ms.delete_item(0, 0).unwrap();
        assert!(!is_consistent(&ms.value(), &mp.value()));

        assert_eq!(mp.delete_item("A"), 1);
        assert!(is_consistent(&ms.value(), &mp.value()));
    }

    #[test]
    fn test_update_page_sets_rebinds_interviews() {
        let s = survey();
        let mut mp = MutableParticipant::new(participant(&s));
        let mut ms = MutableSurvey::new(s);

        let mut page_sets = ms.page_sets().to_vec();
        page_sets[0].date_variable = Some("B".into());
        ms.update_page_sets(page_sets);
        assert!(!is_consistent(&ms.value(), &mp.value()));

        mp.update_page_sets(ms.page_sets());
        assert!(mp.is_dirty());
        assert!(is_consistent(&ms.value(), &mp.value()));
    }

    #[test]
    fn test_answer_replaces_previous() {
        let s = survey();
        let mut mp = MutableParticipant::new(participant(&s));
        mp.answer(0, InterviewItem::new("A", ItemValue::Text("y".into())))
            .unwrap();
        assert_eq!(mp.interviews()[0].items.len(), 2);
        assert_eq!(
            mp.interviews()[0].items[0].value,
            ItemValue::Text("y".into())
        );
        assert_eq!(
            mp.answer(4, InterviewItem::new("A", ItemValue::Missing)),
            Err(StudioError::InterviewOutOfRange(4))
        );
    }
}
