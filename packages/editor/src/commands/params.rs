//! Reading command parameters back out of fragment answers.

use crate::errors::StudioError;
use formstudio_model::{InterviewItem, ItemValue, LetterCase, Translations};

/// The answered value of a fragment field
pub(crate) fn answer<'a>(answers: &'a [InterviewItem], variable_name: &str) -> Option<&'a ItemValue> {
    answers
        .iter()
        .find(|item| item.variable_name == variable_name)
        .map(|item| &item.value)
        .filter(|value| value.is_answered())
}

pub(crate) fn optional_text(answers: &[InterviewItem], variable_name: &str) -> Option<String> {
    match answer(answers, variable_name)? {
        ItemValue::Text(text) => Some(text.trim().to_string()),
        ItemValue::Many(values) => values.first().cloned(),
        _ => None,
    }
}

pub(crate) fn text(answers: &[InterviewItem], variable_name: &str) -> Result<String, StudioError> {
    optional_text(answers, variable_name)
        .ok_or_else(|| StudioError::MissingParameter(variable_name.to_string()))
}

/// A mandatory code, upper-cased
pub(crate) fn code(answers: &[InterviewItem], variable_name: &str) -> Result<String, StudioError> {
    Ok(LetterCase::Upper.apply(&text(answers, variable_name)?))
}

pub(crate) fn translations(answers: &[InterviewItem], variable_name: &str) -> Option<Translations> {
    match answer(answers, variable_name)? {
        ItemValue::Translated(t) => Some(t.clone()),
        ItemValue::Text(text) => Some(Translations::new().with("en", text.as_str())),
        _ => None,
    }
}

/// Selected codes of a many-valued choice; `None` when unanswered
pub(crate) fn optional_selection(answers: &[InterviewItem], variable_name: &str) -> Option<Vec<String>> {
    match answer(answers, variable_name)? {
        ItemValue::Many(values) => Some(values.clone()),
        ItemValue::Text(text) => Some(vec![text.clone()]),
        _ => None,
    }
}

/// Selected codes of a many-valued choice; empty when unanswered
pub(crate) fn selection(answers: &[InterviewItem], variable_name: &str) -> Vec<String> {
    optional_selection(answers, variable_name).unwrap_or_default()
}

pub(crate) fn optional_flag(answers: &[InterviewItem], variable_name: &str) -> Option<bool> {
    answer(answers, variable_name).and_then(ItemValue::as_bool)
}

pub(crate) fn flag(answers: &[InterviewItem], variable_name: &str) -> bool {
    optional_flag(answers, variable_name).unwrap_or(false)
}

/// Comma-separated list, blanks dropped
pub(crate) fn list(answers: &[InterviewItem], variable_name: &str) -> Vec<String> {
    optional_text(answers, variable_name)
        .map(|text| {
            text.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_missing() {
        let answers = vec![InterviewItem::new("A", ItemValue::Text("  ".into()))];
        assert_eq!(
            text(&answers, "A"),
            Err(StudioError::MissingParameter("A".into()))
        );
    }

    #[test]
    fn test_code_is_upper_cased() {
        let answers = vec![InterviewItem::new("A", ItemValue::Text(" vs1 ".into()))];
        assert_eq!(code(&answers, "A").unwrap(), "VS1");
    }

    #[test]
    fn test_list_splits_and_trims() {
        let answers = vec![InterviewItem::new("A", ItemValue::Text("1, 2,,3 ".into()))];
        assert_eq!(list(&answers, "A"), vec!["1", "2", "3"]);
        assert!(list(&answers, "B").is_empty());
    }

    #[test]
    fn test_cleared_selection_differs_from_unanswered() {
        let answers = vec![InterviewItem::new("A", ItemValue::Many(Vec::new()))];
        assert_eq!(optional_selection(&answers, "A"), Some(Vec::new()));
        assert_eq!(optional_selection(&answers, "B"), None);
        assert_eq!(optional_flag(&answers, "B"), None);
    }
}
