//! # Parameter Forms
//!
//! Each builder appends one throwaway page to a [`SurveyBuilder`]. The
//! page holds the fields a command needs to collect its parameters; the
//! command splices those fields into the live survey, lets the regular
//! rendering engine collect an interview, and reads the answers back by
//! variable name.
//!
//! ## Contract
//!
//! - Variable names below are read back by exact match. Renaming one is a
//!   breaking change.
//! - Every field carries English and French wording and a role tag.
//! - Builders are pure: the same arguments give structurally equal pages.
//! - Choices derived from the survey keep declaration order, except
//!   notification events which are sorted.

mod delete;
mod insert;
mod select;
mod update;

pub use delete::{delete_item, delete_page, delete_page_set, delete_workflow};
pub use insert::{
    insert_derived_workflow, insert_item, insert_page, insert_page_set, insert_table_line,
};
pub use select::{apply_confirmation, include_page, order_item};
pub use update::{
    update_derived_workflow, update_main_workflow, update_page, update_page_set,
    update_survey_options,
};

use formstudio_model::{ChoiceType, Multiplicity, Survey, Translations};

pub const INFO_DELETION: &str = "__INFO_DELETION__";

pub const ITEM_VARIABLE_NAME: &str = "__ITEM_VARIABLE_NAME__";
pub const ITEM_TYPE: &str = "__ITEM_TYPE__";
pub const ITEM_WORDING: &str = "__ITEM_WORDING__";
pub const ITEM_CHOICES: &str = "__ITEM_CHOICES__";
pub const ITEM_REQUIRED: &str = "__ITEM_REQUIRED__";
pub const ITEM_DIRECTION: &str = "__ITEM_DIRECTION__";

pub const PAGE_CODE: &str = "__PAGE_CODE__";
pub const PAGE_NAME: &str = "__PAGE_NAME__";
pub const INCLUDED_PAGE: &str = "__INCLUDED_PAGE__";

pub const PAGE_SET_TYPE: &str = "__PAGE_SET_TYPE__";
pub const PAGE_SET_NAME: &str = "__PAGE_SET_NAME__";
pub const PAGE_SET_PAGES: &str = "__PAGE_SET_PAGES__";
pub const PAGE_SET_MODE: &str = "__PAGE_SET_MODE__";
pub const PAGE_SET_DATE_VAR: &str = "__PAGE_SET_DATE_VAR__";

pub const TABLE_LINE_WORDING: &str = "__TABLE_LINE_WORDING__";
pub const TABLE_LINE_PREFIX: &str = "__TABLE_LINE_PREFIX__";

pub const WORKFLOW_NAME: &str = "__WORKFLOW_NAME__";
pub const WORKFLOW_PAGE_SETS: &str = "__WORKFLOW_PAGE_SETS__";
pub const WORKFLOW_SINGLE: &str = "__WORKFLOW_SINGLE__";
pub const WORKFLOW_MANY: &str = "__WORKFLOW_MANY__";
pub const WORKFLOW_NOTIFICATIONS: &str = "__WORKFLOW_NOTIFICATIONS__";

pub const SURVEY_LANGUAGES: &str = "__SURVEY_LANGUAGES__";
pub const SURVEY_DEFAULT_LANGUAGE: &str = "__SURVEY_DEFAULT_LANGUAGE__";
pub const SURVEY_SHOW_FIELD_NAMES: &str = "__SURVEY_SHOW_FIELD_NAMES__";
pub const SURVEY_INTERVIEW_DATE_VAR: &str = "__SURVEY_INTERVIEW_DATE_VAR__";

pub const APPLY: &str = "__APPLY__";

/// Structural-role tags read by the rendering layer
pub mod roles {
    /// The field configures the element being edited
    pub const TARGET: &str = "studio-target";
    /// Final confirmation
    pub const APPLY: &str = "studio-apply";
    /// Picks among existing schema elements
    pub const SELECTOR: &str = "studio-selector";
    /// Read-only notice
    pub const INFO: &str = "studio-info";
}

/// Page-set modes offered by `insert_page_set`
pub const MODE_SINGLE: &str = "single";
pub const MODE_MANY: &str = "many";
pub const MODE_INFO: &str = "info";

/// Directions offered by `order_item`
pub const DIRECTION_UP: &str = "up";
pub const DIRECTION_DOWN: &str = "down";

/// Field type codes offered by `insert_item`; `choices` is many-valued
pub const ITEM_TYPE_CODES: [(&str, &str, &str); 10] = [
    ("text", "Text", "Texte"),
    ("mltext", "Multilingual text", "Texte multilingue"),
    ("integer", "Integer", "Entier"),
    ("real", "Decimal", "Décimal"),
    ("date", "Date", "Date"),
    ("yesno", "Yes / No", "Oui / Non"),
    ("acknowledge", "Acknowledge", "Acquittement"),
    ("info", "Information", "Information"),
    ("choice", "Single choice", "Choix unique"),
    ("choices", "Multiple choice", "Choix multiple"),
];

/// English and French wording
pub(crate) fn wording(en: &str, fr: &str) -> Translations {
    Translations::new().with("en", en).with("fr", fr)
}

/// Code plus English and French labels
pub(crate) fn labelled(code: &str, en: &str, fr: &str) -> Translations {
    wording(en, fr).with_code(code)
}

/// Choice type built from translated names
///
/// `choices` holds each name's `__code__`; `labels` holds, for every
/// language, each name's translation in that language (falling back to
/// `fallback`), in the same order.
pub fn ml_choices<S: AsRef<str>>(
    multiplicity: Multiplicity,
    names: &[&Translations],
    languages: &[S],
    fallback: &str,
) -> ChoiceType {
    let codes = names.iter().map(|n| n.code().to_string()).collect();
    languages
        .iter()
        .fold(ChoiceType::new(multiplicity, codes), |choice, lang| {
            let lang = lang.as_ref();
            let labels = names.iter().map(|n| n.translate(lang, fallback)).collect();
            choice.with_labels(lang, labels)
        })
}

/// `ml_choices` over the survey's own languages
pub(crate) fn survey_choices(
    survey: &Survey,
    multiplicity: Multiplicity,
    names: &[&Translations],
) -> ChoiceType {
    ml_choices(
        multiplicity,
        names,
        &survey.options.languages,
        &survey.options.default_language,
    )
}

/// Names of the page sets of the given types, in the given order
pub(crate) fn page_set_names<'s>(survey: &'s Survey, types: &[&str]) -> Vec<&'s Translations> {
    types
        .iter()
        .filter_map(|t| survey.page_set(t))
        .map(|ps| &ps.kind)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use formstudio_model::SurveyBuilder;

    #[test]
    fn test_ml_choices_codes_and_labels() {
        let a = Translations::code_only("A").with("en", "Alpha").with("fr", "Alpha-fr");
        let b = Translations::code_only("B").with("en", "Beta");
        let choice = ml_choices(Multiplicity::Many, &[&a, &b], &["en", "fr"], "en");

        assert_eq!(choice.choices, vec!["A", "B"]);
        assert_eq!(choice.labels["en"], vec!["Alpha", "Beta"]);
        // "B" has no French text, the fallback language applies
        assert_eq!(choice.labels["fr"], vec!["Alpha-fr", "Beta"]);
    }

    #[test]
    fn test_every_fragment_field_is_tagged_and_bilingual() {
        let mut b = SurveyBuilder::new("parts");
        delete_item(&mut b, "P1", None);
        insert_item(&mut b, "P2", None);
        order_item(&mut b, "P3", None);
        apply_confirmation(&mut b, "P4", None);

        for page in b.pages() {
            let (page, _) = page.build();
            for item in page.items {
                assert!(item.role.is_some(), "{} has no role", item.variable_name);
                assert!(item.wording.has_all(&["en", "fr"]));
            }
        }
    }
}
