//! Benchmarks for the report renderers

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use numerology_report::compose::compose;
use numerology_report::layout::{FontLibrary, FontStyle, LineBreaker};
use numerology_report::render::project;
use numerology_report::{RecordingEngine, ReportConfig, ReportDataModel, ViewTree};

const RESPONSE_JSON: &str = r#"{
    "success": true,
    "name": "Asha Rao",
    "date_of_birth": "1992-05-14",
    "gender": "female",
    "driver": 5,
    "conductor": 4,
    "kua": 8,
    "loshu_grid": [
        [{"value": "44", "present": true, "count": 2}, {"value": "99", "present": true, "count": 2}, {"value": "2", "present": true, "count": 1}],
        [{"value": 3, "present": false, "count": 0}, {"value": "55", "present": true, "count": 2}, {"value": 7, "present": false, "count": 0}],
        [{"value": 8, "present": false, "count": 0}, {"value": "11", "present": true, "count": 2}, {"value": 6, "present": false, "count": 0}]
    ],
    "present_numbers": [1, 2, 4, 5, 9],
    "missing_numbers": [3, 6, 7, 8],
    "loshu_lines": {"all": [
        {"numbers": [4, 9, 2], "name": "Mental Plane", "description": "Sharp intellect and strong memory.", "type": "horizontal"}
    ]},
    "driver_compatibility": {"planet": "Mercury", "friends_raw": "1, 2, 3, 6", "non_friends_raw": "--------", "neutral_raw": "4, 5, 7, 8, 9"},
    "conductor_compatibility": {"planet": "Rahu", "friends_raw": "1, 5, 6, 7", "non_friends_raw": "2, 9", "neutral_raw": "3, 4, 8"},
    "lucky_numbers": [1, 5, 6],
    "bad_numbers": [2, 9],
    "neutral_numbers": [3, 4, 7, 8],
    "remedies_part1": [
        {"condition": "3 is missing", "remedy": "Keep a yellow handkerchief with you and respect your teachers and elders. Apply a tilak of turmeric on the forehead every Thursday."},
        {"condition": "6 is missing", "remedy": "Keep fresh flowers at home and wear light colours on Fridays."},
        {"condition": "7 is missing", "remedy": "Feed stray dogs and keep a small silver ball in your pocket."},
        {"condition": "8 is missing", "remedy": "Feed crows on Saturdays and donate black sesame."}
    ],
    "remedies_part2": [{"condition": "6 and 7 are both missing", "remedy": "Install a Shukra Yantra"}],
    "remedies_part3": [
        {"number": 3, "planet": "Jupiter", "remedies": ["Wear yellow on Thursdays", "Donate turmeric"]},
        {"number": 6, "planet": "Venus", "remedies": ["Use a silver glass for water"]}
    ],
    "luck_factors": [
        {"year": 2026, "date": "14/05/2026", "combination": "5,5", "luck_factor": "90%"},
        {"year": 2027, "date": "14/05/2027", "combination": "6,5", "luck_factor": "70%"},
        {"year": 2028, "date": "14/05/2028", "combination": "7,5", "luck_factor": "40%"}
    ],
    "name_analysis": null
}"#;

fn model() -> ReportDataModel {
    ReportDataModel::from_response(RESPONSE_JSON).expect("benchmark response parses")
}

fn bench_parse_response(c: &mut Criterion) {
    c.bench_function("parse_response", |b| {
        b.iter(|| ReportDataModel::from_response(black_box(RESPONSE_JSON)))
    });
}

fn bench_project_screen(c: &mut Criterion) {
    let model = model();
    c.bench_function("project_screen", |b| b.iter(|| project(black_box(&model))));
}

fn bench_apply_frame(c: &mut Criterion) {
    let frame = project(&model());
    c.bench_function("apply_frame", |b| {
        b.iter(|| {
            let mut tree = ViewTree::new();
            tree.apply(black_box(&frame))
        })
    });
}

fn bench_compose_document(c: &mut Criterion) {
    let model = model();
    let config = ReportConfig::default();
    c.bench_function("compose_document", |b| {
        b.iter(|| {
            let mut engine = RecordingEngine::new();
            compose(black_box(&model), &mut engine, &config)
        })
    });
}

fn bench_wrap_paragraph(c: &mut Criterion) {
    let fonts = FontLibrary::new();
    let text = "Keep a yellow handkerchief with you and respect your teachers and elders. ".repeat(8);
    c.bench_function("wrap_paragraph", |b| {
        let breaker = LineBreaker::new(&fonts);
        b.iter(|| breaker.wrap(black_box(&text), FontStyle::Normal, 10.0, 170.0))
    });
}

criterion_group!(
    benches,
    bench_parse_response,
    bench_project_screen,
    bench_apply_frame,
    bench_compose_document,
    bench_wrap_paragraph,
);
criterion_main!(benches);
