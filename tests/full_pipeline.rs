use heallink::{
    match_for_seeker, match_with_defaults, DirectoryConfig, GenderFilter, Gender,
    IcebreakerPolicy, MatchFilter, Matcher, Profile, Role, Stage, UserDirectory,
};

const SEED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/mentors.json");

fn seeded_mentors() -> Vec<Profile> {
    let directory = DirectoryConfig::default()
        .with_seed_path(SEED)
        .build()
        .expect("seed loads");
    directory.list_mentors().expect("mentors")
}

fn liver_seeker() -> Profile {
    Profile::new("sam@example.com")
        .with_id(100)
        .with_name("Sam")
        .with_age(34)
        .with_role(Role::Mentee)
        .with_procedure("Liver transplant")
        .with_stage(Stage::PreOp)
        .with_language("English")
        .with_hospital("Mayo Clinic")
        .with_interests(["anime", "music"])
        .with_availability(["Evenings"])
        .with_intro("Waiting on a transplant date.")
}

#[test]
fn seeded_directory_ranks_liver_mentors_first() {
    let mentors = seeded_mentors();
    assert_eq!(mentors.len(), 7);

    let hits = match_with_defaults(&liver_seeker(), &mentors, &MatchFilter::default()).unwrap();
    let ranked: Vec<(&str, i32)> = hits
        .iter()
        .map(|h| (h.mentor.name.as_str(), h.score))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("Alex R.", 199),
            ("Chris L.", 187),
            ("Taylor J.", 187),
            ("Evan S.", 165),
            ("Farah K.", 67),
            ("Bianca T.", 45),
            ("Dee P.", 45),
        ]
    );
    assert!(hits.iter().enumerate().all(|(i, h)| h.rank == i + 1));
}

#[test]
fn hits_carry_shared_interests_and_openers() {
    let hits = match_with_defaults(&liver_seeker(), &seeded_mentors(), &MatchFilter::default())
        .unwrap();

    let taylor = hits.iter().find(|h| h.mentor.name == "Taylor J.").unwrap();
    assert_eq!(taylor.shared_interests, vec!["anime".to_string()]);
    assert!(taylor.icebreaker.contains("anime"));

    let evan = hits.iter().find(|h| h.mentor.name == "Evan S.").unwrap();
    assert!(evan.shared_interests.is_empty());
    assert!(evan.icebreaker.starts_with("You share the Liver transplant journey"));
}

#[test]
fn my_hospital_only_narrows_to_the_seekers_hospital() {
    let filter = MatchFilter::default().my_hospital_only();
    let hits = match_with_defaults(&liver_seeker(), &seeded_mentors(), &filter).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].mentor.name, "Evan S.");
    assert_eq!(hits[0].score, 165);
}

#[test]
fn facets_combine() {
    let filter = MatchFilter::default()
        .with_gender(GenderFilter::Only(Gender::Female))
        .with_age_range(Some(40), None);
    let hits = match_with_defaults(&liver_seeker(), &seeded_mentors(), &filter).unwrap();
    let names: Vec<&str> = hits.iter().map(|h| h.mentor.name.as_str()).collect();
    assert_eq!(names, vec!["Farah K.", "Dee P."]);
}

#[test]
fn filters_that_exclude_everything_return_empty() {
    let filter = MatchFilter::default()
        .with_gender(GenderFilter::Only(Gender::Female))
        .my_hospital_only();
    let hits = match_with_defaults(&liver_seeker(), &seeded_mentors(), &filter).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn random_template_policy_addresses_the_mentor() {
    let icebreaker = IcebreakerPolicy::RandomTemplate.build();
    let hits = match_for_seeker(
        &liver_seeker(),
        &seeded_mentors(),
        &MatchFilter::default(),
        &Matcher::default(),
        icebreaker.as_ref(),
        Some(3),
    )
    .unwrap();
    assert_eq!(hits.len(), 3);
    for hit in &hits {
        assert!(hit.icebreaker.contains(&hit.mentor.name));
        assert!(hit.icebreaker.contains("Liver transplant"));
    }
}
