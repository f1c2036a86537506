//! 谓词评估性能基准测试
//!
//! 覆盖分段比较、各分词模式下的词项匹配，以及同义词数量对匹配的影响。

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::json;
use std::collections::HashMap;
use std::hint::black_box;
use tree_predicate::{
    Field, InputData, Operator, Predicate, TermAnalysis, TokenMode, term_matches,
    version_compare,
};

const SAMPLE_TEXT: &str = "Get your FREE gift today: free shipping, gratis samples and a \
                           free_trial for every order. Limited free offer!";

fn terms(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// 分段比较基准
fn bench_version_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("version_compare");

    group.bench_function("integers", |b| {
        b.iter(|| version_compare(black_box("1000"), black_box("500")))
    });

    group.bench_function("multi_part", |b| {
        b.iter(|| version_compare(black_box("2.10.1"), black_box("2.9.14")))
    });

    group.bench_function("special_forms", |b| {
        b.iter(|| version_compare(black_box("1.0.0rc2"), black_box("1.0.0beta7")))
    });

    group.finish();
}

/// 各分词模式下的词项匹配基准
fn bench_token_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_modes");

    let forms = terms(&["free", "gratis"]);
    let single = terms(&["free offer"]);

    let tokens_only = TermAnalysis::new(TokenMode::TokensOnly, false);
    let full_terms = TermAnalysis::new(TokenMode::FullTermsOnly, false);
    let all = TermAnalysis::new(TokenMode::All, false);
    let case_sensitive = TermAnalysis::new(TokenMode::TokensOnly, true);

    group.bench_function("tokens_only", |b| {
        b.iter(|| term_matches(black_box(SAMPLE_TEXT), black_box(&forms), &tokens_only))
    });

    group.bench_function("tokens_case_sensitive", |b| {
        b.iter(|| term_matches(black_box(SAMPLE_TEXT), black_box(&forms), &case_sensitive))
    });

    group.bench_function("full_terms_only", |b| {
        b.iter(|| term_matches(black_box(SAMPLE_TEXT), black_box(&single), &full_terms))
    });

    group.bench_function("all_full_term", |b| {
        b.iter(|| term_matches(black_box(SAMPLE_TEXT), black_box(&single), &all))
    });

    group.finish();
}

/// 同义词数量对匹配耗时的影响
fn bench_term_forms_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("term_forms_scaling");
    let options = TermAnalysis::default();

    for size in [1, 5, 20, 100].iter() {
        let forms: Vec<String> = std::iter::once("free".to_string())
            .chain((1..*size).map(|i| format!("form{}", i)))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| term_matches(black_box(SAMPLE_TEXT), black_box(&forms), &options))
        });
    }

    group.finish();
}

/// 完整谓词评估与规则渲染基准
fn bench_predicate(c: &mut Criterion) {
    let mut group = c.benchmark_group("predicate");

    let fields = HashMap::from([
        ("000000".to_string(), Field::new("age")),
        (
            "000001".to_string(),
            Field::new("subject").with_term_forms("free", ["gratis", "freebie"]),
        ),
    ]);
    let input = InputData::from_value(json!({"000000": 42, "000001": SAMPLE_TEXT}));

    let scalar = Predicate::new(Operator::Gte, "000000", 30);
    let text = Predicate::with_term(Operator::Gt, "000001", 2, "free");

    group.bench_function("apply_scalar", |b| {
        b.iter(|| scalar.apply(black_box(&input), black_box(&fields)))
    });

    group.bench_function("apply_term", |b| {
        b.iter(|| text.apply(black_box(&input), black_box(&fields)))
    });

    group.bench_function("to_rule_term", |b| {
        b.iter(|| text.to_rule(black_box(&fields), None))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_version_compare,
    bench_token_modes,
    bench_term_forms_scaling,
    bench_predicate,
);

criterion_main!(benches);
