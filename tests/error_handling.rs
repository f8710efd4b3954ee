use std::io::Write;

use heallink::{
    match_for_seeker, ConfigLoadError, DirectoryConfig, DirectoryError, HealLinkConfig,
    MatchError, MatchFilter, Matcher, PipelineError, Profile, ProfileError, Stage,
    TableIcebreaker,
};

#[test]
fn incomplete_seeker_lists_missing_fields() {
    let seeker = Profile::new("half@example.com").with_name("Half");
    let err = match_for_seeker(
        &seeker,
        &[],
        &MatchFilter::default(),
        &Matcher::default(),
        &TableIcebreaker::default(),
        None,
    )
    .unwrap_err();

    match err {
        PipelineError::Profile(ProfileError::Incomplete { missing }) => {
            assert!(missing.contains(&"procedure"));
            assert!(!missing.contains(&"name"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn zero_limit_is_rejected_before_ranking() {
    let seeker = Profile::new("ok@example.com")
        .with_name("Ok")
        .with_age(30)
        .with_procedure("Mastectomy")
        .with_stage(Stage::PreOp)
        .with_language("English")
        .with_hospital("Johns Hopkins")
        .with_intro("Hi");
    let err = match_for_seeker(
        &seeker,
        &[],
        &MatchFilter::default(),
        &Matcher::default(),
        &TableIcebreaker::default(),
        Some(0),
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::Match(MatchError::InvalidConfig(_))));
    assert!(err.to_string().starts_with("matching failed"));
}

#[test]
fn unsupported_config_version() {
    let err = HealLinkConfig::from_yaml("version: \"2.0\"\n").unwrap_err();
    assert!(matches!(err, ConfigLoadError::UnsupportedVersion(v) if v == "2.0"));
}

#[test]
fn invalid_matcher_section_is_a_validation_error() {
    let yaml = "version: \"1.0\"\nmatcher:\n  max_results: 0\n";
    assert!(matches!(
        HealLinkConfig::from_yaml(yaml),
        Err(ConfigLoadError::Validation(_))
    ));
}

#[test]
fn malformed_yaml_and_missing_file() {
    assert!(matches!(
        HealLinkConfig::from_yaml("version: [unterminated"),
        Err(ConfigLoadError::YamlParse(_))
    ));
    assert!(matches!(
        HealLinkConfig::from_file("/no/such/heallink.yaml"),
        Err(ConfigLoadError::FileRead(_))
    ));
}

#[test]
fn seed_with_invalid_email_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"[{"email": "not-an-email"}]"#).unwrap();
    let err = DirectoryConfig::default()
        .with_seed_path(file.path())
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        DirectoryError::Seed(_) | DirectoryError::InvalidProfile(_)
    ));
}
