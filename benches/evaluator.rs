use criterion::{black_box, criterion_group, criterion_main, Criterion};

use holdem_equity::evaluator::evaluate;
use holdem_equity::range::parse_card;
use holdem_equity::CardSet;

fn seven_card_hand() -> CardSet {
    let mut m = CardSet::empty();
    for c in ["Ah", "Kh", "Qh", "Jh", "9h", "2c", "3d"] {
        m += parse_card(c).unwrap();
    }
    m
}

fn five_card_hand() -> CardSet {
    let mut m = CardSet::empty();
    for c in ["2c", "7h", "9s", "Jd", "Ah"] {
        m += parse_card(c).unwrap();
    }
    m
}

fn bench_evaluate(c: &mut Criterion) {
    let seven = seven_card_hand();
    let five = five_card_hand();
    c.bench_function("evaluate_7card", |b| b.iter(|| evaluate(black_box(seven))));
    c.bench_function("evaluate_5card", |b| b.iter(|| evaluate(black_box(five))));
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
