use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use heallink::{
    match_with_defaults, score, shared_interests, Catalog, GenderFilter, Gender, MatchFilter,
    Matcher, Profile, Role, Stage,
};

/// Deterministic synthetic mentor pool cycling through the built-in catalog.
fn synthetic_pool(size: usize) -> Vec<Profile> {
    let catalog = Catalog::default();
    (0..size)
        .map(|i| {
            let pick = |list: &[String], salt: usize| list[(i * 7 + salt) % list.len()].clone();
            let stage = Stage::ALL[i % Stage::ALL.len()];
            let gender = Gender::ALL[i % Gender::ALL.len()];
            Profile::new(format!("mentor{i}@bench.heallink.org"))
                .with_id(i as u64 + 1)
                .with_name(format!("Mentor {i}"))
                .with_age(25 + (i % 50) as u32)
                .with_gender(gender)
                .with_role(Role::Mentor)
                .with_procedure(pick(&catalog.procedures, 0))
                .with_stage(stage)
                .with_language(pick(&catalog.languages, 1))
                .with_hospital(pick(&catalog.hospitals, 2))
                .with_interests([pick(&catalog.interests, 3), pick(&catalog.interests, 5)])
                .with_availability([pick(&catalog.availability, 4)])
        })
        .collect()
}

fn seeker() -> Profile {
    Profile::new("seeker@bench.heallink.org")
        .with_name("Seeker")
        .with_age(40)
        .with_procedure("Liver transplant")
        .with_stage(Stage::PreOp)
        .with_language("English")
        .with_hospital("Mayo Clinic")
        .with_interests(["anime", "music", "travel"])
        .with_availability(["Evenings", "Weekends"])
        .with_intro("Benchmark seeker.")
}

/// Benchmark the pairwise scoring function
fn bench_score(c: &mut Criterion) {
    let seeker = seeker();
    let pool = synthetic_pool(64);

    c.bench_function("score_pair", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % pool.len();
            black_box(score(black_box(&seeker), black_box(&pool[i])))
        });
    });

    c.bench_function("shared_interests", |b| {
        b.iter(|| black_box(shared_interests(black_box(&seeker), black_box(&pool[3]))));
    });
}

/// Benchmark filtering and ranking over growing pools
fn bench_rank_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_scale");
    let seeker = seeker();
    let matcher = Matcher::default();
    let filter = MatchFilter::default();

    for &size in [100, 1_000, 10_000].iter() {
        let pool = synthetic_pool(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("pool_{size}"), |b| {
            b.iter(|| black_box(matcher.rank(&seeker, black_box(&pool), &filter, None)));
        });
    }

    group.finish();
}

/// Benchmark the full pipeline, including icebreakers, with and without facets
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let seeker = seeker();
    let pool = synthetic_pool(1_000);

    let filters = [
        ("unfiltered", MatchFilter::default()),
        (
            "gender_and_age",
            MatchFilter::default()
                .with_gender(GenderFilter::Only(Gender::Female))
                .with_age_range(Some(30), Some(60)),
        ),
        ("my_hospital_only", MatchFilter::default().my_hospital_only()),
    ];

    for (name, filter) in &filters {
        group.bench_function(*name, |b| {
            b.iter(|| {
                let hits = match_with_defaults(&seeker, black_box(&pool), filter)
                    .expect("seeker is complete");
                black_box(hits)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_score, bench_rank_scale, bench_pipeline);
criterion_main!(benches);
