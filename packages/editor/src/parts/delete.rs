use super::{roles, wording, INFO_DELETION};
use formstudio_model::{ItemType, PageBuilder, SurveyBuilder, Translations};

fn deletion_notice<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    section: Option<&Translations>,
    notice: Translations,
) -> &'a mut PageBuilder {
    let page = builder.page(name);
    page.start_section(section.cloned());
    page.question(INFO_DELETION, ItemType::Acknowledge)
        .translations(notice)
        .role(roles::INFO)
        .required();
    page
}

pub fn delete_item<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    deletion_notice(
        builder,
        name,
        section,
        wording(
            "The items above and every answer collected for them will be deleted",
            "Les questions ci-dessus et toutes les réponses associées seront supprimées",
        ),
    )
}

pub fn delete_page<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    deletion_notice(
        builder,
        name,
        section,
        wording(
            "This page and every answer collected on it will be deleted",
            "Cette page et toutes les réponses associées seront supprimées",
        ),
    )
}

pub fn delete_page_set<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    deletion_notice(
        builder,
        name,
        section,
        wording(
            "This page set and every interview collected with it will be deleted",
            "Ce formulaire et tous les entretiens associés seront supprimés",
        ),
    )
}

pub fn delete_workflow<'a>(
    builder: &'a mut SurveyBuilder,
    name: &str,
    section: Option<&Translations>,
) -> &'a mut PageBuilder {
    deletion_notice(
        builder,
        name,
        section,
        wording(
            "This workflow will be deleted",
            "Ce circuit sera supprimé",
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use formstudio_model::{CrossRule, Rule};

    #[test]
    fn test_deletion_notice_is_required_acknowledge() {
        let mut b = SurveyBuilder::new("parts");
        let section = Translations::new().with("en", "Vitals");
        let (page, rules) = delete_page_set(&mut b, "DEL", Some(&section)).build();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].variable_name, INFO_DELETION);
        assert_eq!(page.items[0].item_type, ItemType::Acknowledge);
        assert_eq!(page.items[0].section, Some(section));
        assert_eq!(rules, vec![CrossRule::new(INFO_DELETION, Rule::Required)]);
    }
}
