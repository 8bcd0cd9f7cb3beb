use super::{
    ml_choices, page_set_names, roles, survey_choices, wording, PAGE_NAME, PAGE_SET_DATE_VAR,
    PAGE_SET_NAME, PAGE_SET_PAGES, SURVEY_DEFAULT_LANGUAGE, SURVEY_INTERVIEW_DATE_VAR,
    SURVEY_LANGUAGES, SURVEY_SHOW_FIELD_NAMES, WORKFLOW_MANY, WORKFLOW_NOTIFICATIONS,
    WORKFLOW_PAGE_SETS, WORKFLOW_SINGLE,
};
use formstudio_model::{
    ItemType, Multiplicity, PageBuilder, Survey, SurveyBuilder, Translations, Workflow,
};

pub fn update_page<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    let page = builder.page(name);
    page.start_section(section.cloned());
    page.question(PAGE_NAME, ItemType::multi_lang_text())
        .translations(wording("Page name", "Nom de la page"))
        .role(roles::TARGET)
        .all_languages();
    page
}

pub fn update_page_set<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    survey: &Survey,
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    let pages: Vec<&Translations> = survey.pages.iter().map(|p| &p.name).collect();

    let page = builder.page(name);
    page.start_section(section.cloned());
    page.question(PAGE_SET_NAME, ItemType::multi_lang_text())
        .translations(wording("Page set name", "Nom du formulaire"))
        .role(roles::TARGET)
        .all_languages();
    page.question(
        PAGE_SET_PAGES,
        ItemType::Choice(survey_choices(survey, Multiplicity::Many, &pages)),
    )
    .translations(wording("Pages", "Pages"))
    .role(roles::SELECTOR);
    page.question(PAGE_SET_DATE_VAR, ItemType::text())
        .translations(wording("Date variable", "Variable de date"))
        .role(roles::TARGET);
    page
}

pub fn update_derived_workflow<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    survey: &Survey,
    main: &Workflow,
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    let page_sets = page_set_names(survey, &main.page_set_types());

    let page = builder.page(name);
    page.start_section(section.cloned());
    page.question(
        WORKFLOW_PAGE_SETS,
        ItemType::Choice(survey_choices(survey, Multiplicity::Many, &page_sets)),
    )
    .translations(wording("Page sets", "Formulaires"))
    .role(roles::SELECTOR);
    page
}

pub fn update_main_workflow<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    survey: &Survey,
    main: &Workflow,
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    let unused: Vec<&str> = survey
        .page_set_types()
        .into_iter()
        .filter(|t| !main.contains(t))
        .collect();
    let unused = page_set_names(survey, &unused);

    let events: Vec<Translations> = survey
        .critical_events()
        .into_iter()
        .map(Translations::code_only)
        .collect();
    let events: Vec<&Translations> = events.iter().collect();

    let page = builder.page(name);
    page.start_section(section.cloned());
    page.question(
        WORKFLOW_SINGLE,
        ItemType::Choice(survey_choices(survey, Multiplicity::Many, &unused)),
    )
    .translations(wording("Page sets filled once", "Formulaires uniques"))
    .role(roles::SELECTOR);
    page.question(
        WORKFLOW_MANY,
        ItemType::Choice(survey_choices(survey, Multiplicity::Many, &unused)),
    )
    .translations(wording("Repeated page sets", "Formulaires répétés"))
    .role(roles::SELECTOR);
    page.question(
        WORKFLOW_NOTIFICATIONS,
        ItemType::Choice(survey_choices(survey, Multiplicity::Many, &events)),
    )
    .translations(wording("Notifications", "Notifications"))
    .role(roles::SELECTOR);
    page
}

pub fn update_survey_options<'a, S: AsRef<str>>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    languages: &[S],
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    let languages: Vec<Translations> = languages
        .iter()
        .map(|l| Translations::code_only(l.as_ref()))
        .collect();
    let languages: Vec<&Translations> = languages.iter().collect();
    let fragment_languages = ["en", "fr"];

    let page = builder.page(name);
    page.start_section(section.cloned());
    page.question(
        SURVEY_LANGUAGES,
        ItemType::Choice(ml_choices(
            Multiplicity::Many,
            &languages,
            &fragment_languages,
            "en",
        )),
    )
    .translations(wording("Languages", "Langues"))
    .role(roles::TARGET)
    .required();
    page.question(
        SURVEY_DEFAULT_LANGUAGE,
        ItemType::Choice(ml_choices(
            Multiplicity::One,
            &languages,
            &fragment_languages,
            "en",
        )),
    )
    .translations(wording("Default language", "Langue par défaut"))
    .role(roles::TARGET)
    .required();
    page.question(SURVEY_SHOW_FIELD_NAMES, ItemType::YesNo)
        .translations(wording("Show variable names", "Afficher les noms de variable"))
        .role(roles::TARGET);
    page.question(SURVEY_INTERVIEW_DATE_VAR, ItemType::text())
        .translations(wording("Interview date variable", "Variable de date d'entretien"))
        .role(roles::TARGET);
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices_of(page: &formstudio_model::Page, variable_name: &str) -> Vec<String> {
        match &page
            .items
            .iter()
            .find(|i| i.variable_name == variable_name)
            .unwrap()
            .item_type
        {
            ItemType::Choice(choice) => choice.choices.clone(),
            other => panic!("unexpected type {:?}", other),
        }
    }

    #[test]
    fn test_main_workflow_offers_unused_page_sets_and_sorted_events() {
        let mut b = SurveyBuilder::new("s");
        {
            let page = b.page("P1");
            page.question("A", ItemType::YesNo).critical("zeta");
            page.question("B", ItemType::YesNo).critical("alpha");
            page.question("C", ItemType::YesNo).critical("zeta");
        }
        b.page_set("INCL").pages(&["P1"]);
        b.page_set("AE").pages(&["P1"]);
        b.page_set("END").pages(&["P1"]);
        b.workflow("main").single(&["INCL"]);
        let survey = b.build().unwrap();
        let main = survey.main_workflow().unwrap().clone();

        let mut parts = SurveyBuilder::new("parts");
        let (page, _) = update_main_workflow(&mut parts, "UPD", &survey, &main, None).build();

        assert_eq!(choices_of(&page, WORKFLOW_SINGLE), vec!["AE", "END"]);
        assert_eq!(choices_of(&page, WORKFLOW_MANY), vec!["AE", "END"]);
        assert_eq!(choices_of(&page, WORKFLOW_NOTIFICATIONS), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_survey_options_offers_configured_languages() {
        let mut parts = SurveyBuilder::new("parts");
        let (page, _) =
            update_survey_options(&mut parts, "OPT", &["en", "fr", "nl"], None).build();
        assert_eq!(choices_of(&page, SURVEY_LANGUAGES), vec!["en", "fr", "nl"]);
        assert_eq!(choices_of(&page, SURVEY_DEFAULT_LANGUAGE), vec!["en", "fr", "nl"]);
    }
}
