use heallink::{
    match_with_defaults, rank_candidates, score, MatchFilter, Profile, Role, Stage,
};

fn pool() -> Vec<Profile> {
    (1..=30)
        .map(|i| {
            let procedure = if i % 3 == 0 { "Knee replacement" } else { "Heart bypass" };
            let stage = match i % 4 {
                0 => Stage::PreOp,
                1 => Stage::PostOpRecent,
                _ => Stage::PostOpEstablished,
            };
            Profile::new(format!("mentor{i}@example.com"))
                .with_id(i)
                .with_name(format!("Mentor {i}"))
                .with_age(30 + (i as u32 % 25))
                .with_role(Role::Mentor)
                .with_procedure(procedure)
                .with_stage(stage)
                .with_language(if i % 2 == 0 { "English" } else { "Spanish" })
                .with_interests(if i % 5 == 0 { vec!["music"] } else { vec!["travel"] })
                .with_availability(["Mornings"])
        })
        .collect()
}

fn seeker() -> Profile {
    Profile::new("seeker@example.com")
        .with_id(999)
        .with_name("Seeker")
        .with_age(50)
        .with_procedure("Knee replacement")
        .with_stage(Stage::PreOp)
        .with_language("English")
        .with_hospital("Mass General")
        .with_interests(["music", "travel"])
        .with_availability(["Mornings"])
        .with_intro("Knee surgery soon.")
}

#[test]
fn repeated_runs_produce_identical_rankings() {
    let pool = pool();
    let first = match_with_defaults(&seeker(), &pool, &MatchFilter::default()).unwrap();
    for _ in 0..10 {
        let again = match_with_defaults(&seeker(), &pool, &MatchFilter::default()).unwrap();
        assert_eq!(again, first);
    }
}

#[test]
fn ranking_is_sorted_and_capped() {
    let pool = pool();
    let seeker = seeker();
    let ranked = rank_candidates(&seeker, &pool, 9);
    assert_eq!(ranked.len(), 9);
    let scores: Vec<i32> = ranked.iter().map(|p| score(&seeker, p)).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(scores.iter().all(|s| *s > 0));
}

#[test]
fn equal_scores_keep_pool_order() {
    let pool = pool();
    let seeker = seeker();
    let ranked = rank_candidates(&seeker, &pool, pool.len());
    for pair in ranked.windows(2) {
        if score(&seeker, &pair[0]) == score(&seeker, &pair[1]) {
            assert!(pair[0].id < pair[1].id);
        }
    }
}

#[test]
fn pool_order_only_affects_ties() {
    let pool = pool();
    let mut reversed = pool.clone();
    reversed.reverse();
    let seeker = seeker();

    let forward: Vec<i32> = rank_candidates(&seeker, &pool, 9)
        .iter()
        .map(|p| score(&seeker, p))
        .collect();
    let backward: Vec<i32> = rank_candidates(&seeker, &reversed, 9)
        .iter()
        .map(|p| score(&seeker, p))
        .collect();
    assert_eq!(forward, backward);
}
