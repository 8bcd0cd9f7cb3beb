use super::{
    labelled, ml_choices, page_set_names, roles, survey_choices, wording, ITEM_CHOICES,
    ITEM_REQUIRED, ITEM_TYPE, ITEM_TYPE_CODES, ITEM_VARIABLE_NAME, ITEM_WORDING, MODE_INFO,
    MODE_MANY, MODE_SINGLE, PAGE_CODE, PAGE_NAME, PAGE_SET_MODE, PAGE_SET_NAME, PAGE_SET_PAGES,
    PAGE_SET_TYPE, TABLE_LINE_PREFIX, TABLE_LINE_WORDING, WORKFLOW_NAME, WORKFLOW_PAGE_SETS,
};
use formstudio_model::{
    ItemType, LetterCase, Multiplicity, PageBuilder, Survey, SurveyBuilder, Translations, Workflow,
};

/// A mandatory upper-case code that must not collide with existing ones
fn code_question(page: &mut PageBuilder, variable_name: &str, wording: Translations) {
    page.question(variable_name, ItemType::text())
        .translations(wording)
        .role(roles::TARGET)
        .required()
        .unique()
        .letter_case(LetterCase::Upper);
}

fn translated_question(page: &mut PageBuilder, variable_name: &str, wording: Translations) {
    page.question(variable_name, ItemType::multi_lang_text())
        .translations(wording)
        .role(roles::TARGET)
        .all_languages();
}

pub fn insert_item<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    let types: Vec<Translations> = ITEM_TYPE_CODES
        .iter()
        .map(|(code, en, fr)| labelled(code, en, fr))
        .collect();
    let types: Vec<&Translations> = types.iter().collect();

    let page = builder.page(name);
    page.start_section(section.cloned());
    code_question(page, ITEM_VARIABLE_NAME, wording("Variable name", "Nom de variable"));
    page.question(
        ITEM_TYPE,
        ItemType::Choice(ml_choices(Multiplicity::One, &types, &["en", "fr"], "en")),
    )
    .translations(wording("Type", "Type"))
    .role(roles::TARGET)
    .required();
    translated_question(page, ITEM_WORDING, wording("Wording", "Libellé"));
    page.question(ITEM_CHOICES, ItemType::text())
        .translations(wording(
            "Choice codes, comma separated",
            "Codes des modalités, séparés par des virgules",
        ))
        .role(roles::TARGET)
        .visible_when(format!("{} in ['choice', 'choices']", ITEM_TYPE));
    page.question(ITEM_REQUIRED, ItemType::YesNo)
        .translations(wording("Required", "Obligatoire"))
        .role(roles::TARGET);
    page
}

pub fn insert_page<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    let page = builder.page(name);
    page.start_section(section.cloned());
    code_question(page, PAGE_CODE, wording("Page code", "Code de la page"));
    translated_question(page, PAGE_NAME, wording("Page name", "Nom de la page"));
    page
}

pub fn insert_page_set<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    survey: &Survey,
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    let pages: Vec<&Translations> = survey.pages.iter().map(|p| &p.name).collect();
    let modes = [
        labelled(MODE_SINGLE, "Once per participant", "Une fois par participant"),
        labelled(MODE_MANY, "Repeated", "Répété"),
        labelled(MODE_INFO, "Participant information", "Information participant"),
    ];
    let modes: Vec<&Translations> = modes.iter().collect();

    let page = builder.page(name);
    page.start_section(section.cloned());
    code_question(page, PAGE_SET_TYPE, wording("Page set code", "Code du formulaire"));
    translated_question(page, PAGE_SET_NAME, wording("Page set name", "Nom du formulaire"));
    page.question(
        PAGE_SET_PAGES,
        ItemType::Choice(survey_choices(survey, Multiplicity::Many, &pages)),
    )
    .translations(wording("Pages", "Pages"))
    .role(roles::SELECTOR);
    page.question(
        PAGE_SET_MODE,
        ItemType::Choice(ml_choices(Multiplicity::One, &modes, &["en", "fr"], "en")),
    )
    .translations(wording("Mode", "Mode"))
    .role(roles::TARGET)
    .required();
    page
}

pub fn insert_table_line<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    let page = builder.page(name);
    page.start_section(section.cloned());
    page.question(TABLE_LINE_WORDING, ItemType::multi_lang_text())
        .translations(wording("Line wording", "Libellé de la ligne"))
        .role(roles::TARGET)
        .required()
        .all_languages();
    code_question(
        page,
        TABLE_LINE_PREFIX,
        wording("Variable name prefix", "Préfixe des noms de variable"),
    );
    page
}

pub fn insert_derived_workflow<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    survey: &Survey,
    main: &Workflow,
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    let page_sets = page_set_names(survey, &main.page_set_types());

    let page = builder.page(name);
    page.start_section(section.cloned());
    code_question(page, WORKFLOW_NAME, wording("Participant role", "Rôle du participant"));
    page.question(
        WORKFLOW_PAGE_SETS,
        ItemType::Choice(survey_choices(survey, Multiplicity::Many, &page_sets)),
    )
    .translations(wording("Page sets", "Formulaires"))
    .role(roles::SELECTOR);
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use formstudio_model::Rule;

    fn survey() -> Survey {
        let mut b = SurveyBuilder::new("s");
        b.page("P1").translate("en", "First").translate("fr", "Première");
        b.page("P2").translate("en", "Second");
        b.page("P3");
        b.page_set("INCL").pages(&["P1"]);
        b.page_set("FOLLOW").pages(&["P2"]);
        b.page_set("UNUSED").pages(&["P3"]);
        b.workflow("main").single(&["INCL"]).many(&["FOLLOW"]);
        b.build().unwrap()
    }

    #[test]
    fn test_insert_item_fields() {
        let mut b = SurveyBuilder::new("parts");
        let (page, rules) = insert_item(&mut b, "INS", None).build();
        let names: Vec<_> = page.items.iter().map(|i| i.variable_name.as_str()).collect();
        assert_eq!(
            names,
            vec![ITEM_VARIABLE_NAME, ITEM_TYPE, ITEM_WORDING, ITEM_CHOICES, ITEM_REQUIRED]
        );

        let name_rules: Vec<_> = rules
            .iter()
            .filter(|r| r.target == ITEM_VARIABLE_NAME)
            .map(|r| r.rule.name())
            .collect();
        assert_eq!(name_rules, vec!["required", "unique", "letterCase"]);
        assert!(rules
            .iter()
            .any(|r| r.target == ITEM_WORDING && r.rule == Rule::AllLanguages));
    }

    #[test]
    fn test_insert_page_set_offers_pages_in_declaration_order() {
        let survey = survey();
        let mut b = SurveyBuilder::new("parts");
        let (page, _) = insert_page_set(&mut b, "INS", &survey, None).build();

        let pages = page
            .items
            .iter()
            .find(|i| i.variable_name == PAGE_SET_PAGES)
            .unwrap();
        match &pages.item_type {
            ItemType::Choice(choice) => {
                assert_eq!(choice.choices, vec!["P1", "P2", "P3"]);
                assert_eq!(choice.labels["fr"], vec!["Première", "Second", "P3"]);
            }
            other => panic!("unexpected type {:?}", other),
        }
    }

    #[test]
    fn test_insert_derived_workflow_offers_main_page_sets() {
        let survey = survey();
        let mut b = SurveyBuilder::new("parts");
        let main = survey.main_workflow().unwrap().clone();
        let (page, _) = insert_derived_workflow(&mut b, "INS", &survey, &main, None).build();

        match &page.items[1].item_type {
            ItemType::Choice(choice) => assert_eq!(choice.choices, vec!["INCL", "FOLLOW"]),
            other => panic!("unexpected type {:?}", other),
        }
    }

    #[test]
    fn test_builders_are_idempotent() {
        let survey = survey();
        let mut b = SurveyBuilder::new("parts");
        let first = insert_page_set(&mut b, "A", &survey, None).build();
        let second = insert_page_set(&mut b, "A", &survey, None).build();
        assert_eq!(first, second);
    }
}
