use criterion::{Criterion, criterion_group, criterion_main};
use minegrid_core::*;
use std::hint::black_box;

fn generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in [
        ("beginner", GameConfig::new(9, 9, 10).unwrap()),
        ("expert", GameConfig::new(16, 30, 99).unwrap()),
        ("dense", GameConfig::new(16, 16, 200).unwrap()),
    ] {
        let mut generator = RandomBoardGenerator::from_seed(0);
        group.bench_function(name, |b| {
            b.iter(|| generator.generate(black_box(config), (0, 0)).unwrap())
        });
    }
    group.finish();
}

fn flood_fill(c: &mut Criterion) {
    let config = GameConfig::new(Coord::MAX, Coord::MAX, 0).unwrap();
    c.bench_function("flood_fill_empty_board", |b| {
        b.iter(|| {
            let mut session = Session::new(config, 0).unwrap();
            black_box(session.reveal(0, 0).unwrap())
        })
    });
}

criterion_group!(benches, generation, flood_fill);
criterion_main!(benches);
