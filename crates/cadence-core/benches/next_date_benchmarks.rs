use cadence_core::date::parse_date;
use cadence_core::recurrence::next_date;
use cadence_core::rule::RecurrenceRule;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_rule_parsing(c: &mut Criterion) {
    c.bench_function("parse_monthly_rule", |b| {
        b.iter(|| RecurrenceRule::parse(black_box("m 1,15,-1,-2 1,3,5,7,9,11")).unwrap())
    });
}

fn bench_next_date(c: &mut Criterion) {
    let now = parse_date("20240126").unwrap();
    let old_anchor = parse_date("19700101").unwrap();
    let rules = [
        ("daily", "d 3"),
        ("yearly", "y"),
        ("weekly", "w 2,4"),
        ("monthly", "m -1,15"),
        ("monthly_sparse", "m 29 2"),
    ];

    for (name, text) in rules {
        let rule = RecurrenceRule::parse(text).unwrap();
        c.bench_function(&format!("next_date_{}", name), |b| {
            b.iter(|| next_date(black_box(now), black_box(old_anchor), black_box(&rule)).unwrap())
        });
    }
}

fn bench_unsatisfiable_rule(c: &mut Criterion) {
    let now = parse_date("20240126").unwrap();
    let rule = RecurrenceRule::parse("m 31 2").unwrap();

    c.bench_function("next_date_unsatisfiable", |b| {
        b.iter(|| next_date(black_box(now), black_box(now), black_box(&rule)).is_err())
    });
}

criterion_group!(
    benches,
    bench_rule_parsing,
    bench_next_date,
    bench_unsatisfiable_rule
);
criterion_main!(benches);
