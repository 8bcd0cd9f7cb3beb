//! Commit-gate predicates over rule-violation signals.
//!
//! The rule engine fills each answered item's message map; these functions
//! only look at which rule names are present.

use formstudio_model::InterviewItem;

/// Whether no answer to a field in `targets` carries a `rule` violation
pub fn satisfies(rule: &str, targets: &[&str], answers: &[InterviewItem]) -> bool {
    answers
        .iter()
        .filter(|item| targets.contains(&item.variable_name.as_str()))
        .all(|item| !item.violates(rule))
}

pub fn all_required_set(targets: &[&str], answers: &[InterviewItem]) -> bool {
    satisfies("required", targets, answers)
}

pub fn all_unique_set(targets: &[&str], answers: &[InterviewItem]) -> bool {
    satisfies("unique", targets, answers)
}

/// Checks the `"unique"` rule name, not a range rule
pub fn all_in_range_set(targets: &[&str], answers: &[InterviewItem]) -> bool {
    satisfies("unique", targets, answers)
}

pub fn all_languages_set(targets: &[&str], answers: &[InterviewItem]) -> bool {
    satisfies("allLanguages", targets, answers)
}

/// Whether every target has an answered item
pub fn all_answered(targets: &[&str], answers: &[InterviewItem]) -> bool {
    targets.iter().all(|target| {
        answers
            .iter()
            .any(|item| item.variable_name == *target && item.value.is_answered())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use formstudio_model::ItemValue;

    fn answer(name: &str) -> InterviewItem {
        InterviewItem::new(name, ItemValue::Text("x".into()))
    }

    #[test]
    fn test_empty_inputs_satisfy() {
        assert!(all_required_set(&[], &[answer("A").with_message("required", "!")]));
        assert!(all_required_set(&["A"], &[]));
        assert!(all_answered(&[], &[]));
    }

    #[test]
    fn test_violation_outside_targets_ignored() {
        let answers = vec![answer("A"), answer("B").with_message("required", "missing")];
        assert!(all_required_set(&["A"], &answers));
        assert!(!all_required_set(&["A", "B"], &answers));
    }

    #[test]
    fn test_in_range_checks_unique_key() {
        let answers = vec![answer("A").with_message("inRange", "too big")];
        assert!(all_in_range_set(&["A"], &answers));

        let answers = vec![answer("A").with_message("unique", "taken")];
        assert!(!all_in_range_set(&["A"], &answers));
        assert!(!all_unique_set(&["A"], &answers));
    }

    #[test]
    fn test_all_languages() {
        let answers = vec![answer("A").with_message("allLanguages", "fr missing")];
        assert!(!all_languages_set(&["A"], &answers));
        assert!(all_required_set(&["A"], &answers));
    }

    #[test]
    fn test_all_answered() {
        let answers = vec![
            answer("A"),
            InterviewItem::new("B", ItemValue::Missing),
        ];
        assert!(all_answered(&["A"], &answers));
        assert!(!all_answered(&["A", "B"], &answers));
        assert!(!all_answered(&["C"], &answers));
    }
}
