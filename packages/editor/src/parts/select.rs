use super::{
    labelled, ml_choices, roles, survey_choices, wording, APPLY, DIRECTION_DOWN, DIRECTION_UP,
    INCLUDED_PAGE, ITEM_DIRECTION,
};
use formstudio_model::{
    ItemType, Multiplicity, PageBuilder, PageSet, Survey, SurveyBuilder, Translations,
};

/// Pick one page not yet in `page_set`
pub fn include_page<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    survey: &Survey,
    page_set: &PageSet,
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    let candidates: Vec<&Translations> = survey
        .pages
        .iter()
        .filter(|p| !page_set.pages.iter().any(|code| code == p.code()))
        .map(|p| &p.name)
        .collect();

    let page = builder.page(name);
    page.start_section(section.cloned());
    page.question(
        INCLUDED_PAGE,
        ItemType::Choice(survey_choices(survey, Multiplicity::One, &candidates)),
    )
    .translations(wording("Page to include", "Page à inclure"))
    .role(roles::SELECTOR)
    .required();
    page
}

pub fn order_item<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    let directions = [
        labelled(DIRECTION_UP, "Move up", "Monter"),
        labelled(DIRECTION_DOWN, "Move down", "Descendre"),
    ];
    let directions: Vec<&Translations> = directions.iter().collect();

    let page = builder.page(name);
    page.start_section(section.cloned());
    page.question(
        ITEM_DIRECTION,
        ItemType::Choice(ml_choices(Multiplicity::One, &directions, &["en", "fr"], "en")),
    )
    .translations(wording("Direction", "Sens"))
    .role(roles::TARGET)
    .required();
    page
}

pub fn apply_confirmation<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    let page = builder.page(name);
    page.start_section(section.cloned());
    page.question(APPLY, ItemType::Acknowledge)
        .translations(wording("Apply the changes", "Appliquer les modifications"))
        .role(roles::APPLY)
        .required();
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_page_excludes_pages_already_in_set() {
        let mut b = SurveyBuilder::new("s");
        b.page("P1");
        b.page("P2");
        b.page("P3");
        b.page_set("PS").pages(&["P2"]);
        let survey = b.build().unwrap();

        let mut parts = SurveyBuilder::new("parts");
        let (page, _) =
            include_page(&mut parts, "INC", &survey, &survey.page_sets[0], None).build();
        match &page.items[0].item_type {
            ItemType::Choice(choice) => {
                assert_eq!(choice.multiplicity, Multiplicity::One);
                assert_eq!(choice.choices, vec!["P1", "P3"]);
            }
            other => panic!("unexpected type {:?}", other),
        }
    }
}
