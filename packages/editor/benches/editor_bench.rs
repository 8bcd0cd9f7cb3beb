use criterion::{black_box, criterion_group, criterion_main, Criterion};
use formstudio_editor::{parts, predicates, Command, CommandKind, MutableParticipant, MutableSurvey};
use formstudio_model::{
    Interview, InterviewItem, ItemType, ItemValue, Participant, Survey, SurveyBuilder,
};

fn survey(pages: usize, items_per_page: usize) -> Survey {
    let mut b = SurveyBuilder::new("bench");
    let mut codes = Vec::with_capacity(pages);
    for p in 0..pages {
        let code = format!("P{}", p);
        let page = b.page(code.as_str());
        for i in 0..items_per_page {
            page.question(format!("Q{}_{}", p, i), ItemType::Integer)
                .wording("en", format!("Question {} of page {}", i, p))
                .required();
        }
        codes.push(code);
    }
    let codes: Vec<&str> = codes.iter().map(String::as_str).collect();
    b.page_set("VISIT").pages(&codes);
    b.workflow("main").many(&["VISIT"]);
    b.build().unwrap()
}

fn participant(survey: &Survey) -> Participant {
    let interview = survey.items().fold(
        Interview::new(survey.page_sets[0].clone()),
        |interview, item| {
            interview.with_item(InterviewItem::new(
                item.variable_name.as_str(),
                ItemValue::Integer(1),
            ))
        },
    );
    Participant::new("001", "S1").with_interview(interview)
}

fn build_parameter_forms(c: &mut Criterion) {
    let survey = survey(10, 5);

    c.bench_function("build_insert_item_form", |b| {
        b.iter(|| {
            let mut builder = SurveyBuilder::new("fragment");
            parts::insert_item(&mut builder, "fragment", None);
            builder.pages()[0].build()
        })
    });

    c.bench_function("build_insert_page_set_form", |b| {
        b.iter(|| {
            let mut builder = SurveyBuilder::new("fragment");
            parts::insert_page_set(&mut builder, "fragment", black_box(&survey), None);
            builder.pages()[0].build()
        })
    });
}

fn evaluate_predicates(c: &mut Criterion) {
    let targets: Vec<String> = (0..20).map(|i| format!("F{}", i)).collect();
    let targets: Vec<&str> = targets.iter().map(String::as_str).collect();
    let answers: Vec<InterviewItem> = (0..200)
        .map(|i| {
            let item = InterviewItem::new(format!("F{}", i % 40), ItemValue::Text("x".into()));
            if i % 7 == 0 {
                item.with_message("allLanguages", "fr missing")
            } else {
                item
            }
        })
        .collect();

    c.bench_function("all_required_set", |b| {
        b.iter(|| predicates::all_required_set(black_box(&targets), black_box(&answers)))
    });

    c.bench_function("all_answered", |b| {
        b.iter(|| predicates::all_answered(black_box(&targets), black_box(&answers)))
    });
}

fn delete_item_cycle(c: &mut Criterion) {
    let survey = survey(20, 10);
    let participant = participant(&survey);
    let answers = vec![InterviewItem::new(
        parts::INFO_DELETION,
        ItemValue::Bool(true),
    )];

    c.bench_function("delete_item_cycle", |b| {
        b.iter(|| {
            let mut survey = MutableSurvey::new(survey.clone());
            let mut participant = MutableParticipant::new(participant.clone());
            let mut command = Command::new(CommandKind::DeleteItem {
                page: 10,
                index: 2,
                count: 3,
            });
            command.start(&mut survey, &mut participant).unwrap();
            command.apply(&mut survey, &mut participant, &answers).unwrap();
            survey.value()
        })
    });
}

criterion_group!(
    benches,
    build_parameter_forms,
    evaluate_predicates,
    delete_item_cycle
);
criterion_main!(benches);
