use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ProfileError;

/// Directory-assigned identifier. Absent until a profile is persisted.
pub type ProfileId = u64;

/// Ordered, duplicate-free set of tags.
///
/// Insertion order carries no meaning for matching; it is kept so that
/// "the first shared interest" is well defined for icebreakers.
pub type TagSet = IndexSet<String>;

/// Which side of matching a profile plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A patient facing a procedure. Every account starts here.
    #[default]
    Mentee,
    /// A past patient offering support. Only mentors are match candidates.
    Mentor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Mentee => "mentee",
            Role::Mentor => "mentor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse recovery timeline bucket.
///
/// Serialized with the labels the profile form shows; snake-case aliases are
/// accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Stage {
    PreOp,
    PostOpRecent,
    PostOpEstablished,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::PreOp, Stage::PostOpRecent, Stage::PostOpEstablished];

    pub fn label(&self) -> &'static str {
        match self {
            Stage::PreOp => "Before (pre-op)",
            Stage::PostOpRecent => "After (post-op < 6mo)",
            Stage::PostOpEstablished => "After (post-op ≥ 6mo)",
        }
    }

    /// `true` for both post-op buckets (labels starting with "After").
    pub fn is_post_op(&self) -> bool {
        matches!(self, Stage::PostOpRecent | Stage::PostOpEstablished)
    }

    pub fn is_pre_op(&self) -> bool {
        matches!(self, Stage::PreOp)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(stage) = Stage::ALL.iter().find(|st| st.label() == trimmed) {
            return Ok(*stage);
        }
        match trimmed.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "pre_op" | "preop" | "before" => Ok(Stage::PreOp),
            "post_op_recent" | "post_op_lt_6mo" => Ok(Stage::PostOpRecent),
            "post_op_established" | "post_op_gte_6mo" => Ok(Stage::PostOpEstablished),
            _ => Err(ProfileError::InvalidStage(s.to_string())),
        }
    }
}

impl TryFrom<String> for Stage {
    type Error = ProfileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Stage> for String {
    fn from(value: Stage) -> Self {
        value.label().to_string()
    }
}

/// Self-reported gender. Parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    Other,
    PreferNotToSay,
}

impl Gender {
    pub const ALL: [Gender; 5] = [
        Gender::Male,
        Gender::Female,
        Gender::NonBinary,
        Gender::Other,
        Gender::PreferNotToSay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::NonBinary => "non_binary",
            Gender::Other => "other",
            Gender::PreferNotToSay => "prefer_not_to_say",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::NonBinary => "Non-binary",
            Gender::Other => "Other",
            Gender::PreferNotToSay => "Prefer not to say",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "non_binary" | "nonbinary" => Ok(Gender::NonBinary),
            "other" => Ok(Gender::Other),
            "prefer_not_to_say" => Ok(Gender::PreferNotToSay),
            _ => Err(ProfileError::InvalidGender(s.to_string())),
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = ProfileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        value.as_str().to_string()
    }
}

/// Mentor or mentee profile.
///
/// Every field except `email` defaults when absent so that a signup payload
/// carrying only an email deserializes. `interests` and `availability` are
/// normalised on the way in, whichever constructor or deserializer is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProfileId>,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub procedure: String,
    #[serde(default)]
    pub stage: Option<Stage>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub hospital: String,
    #[serde(default, deserialize_with = "de_interests")]
    pub interests: TagSet,
    #[serde(default, deserialize_with = "de_availability")]
    pub availability: TagSet,
    #[serde(default)]
    pub intro: String,
    /// External metadata carried by mentor records; never computed here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl Profile {
    /// Minimal signup record: email only, role defaults to mentee.
    pub fn new(email: impl AsRef<str>) -> Self {
        Self {
            email: email.as_ref().trim().to_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: ProfileId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_procedure(mut self, procedure: impl Into<String>) -> Self {
        self.procedure = procedure.into();
        self
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    pub fn with_hospital(mut self, hospital: impl Into<String>) -> Self {
        self.hospital = hospital.into();
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.interests = interests
            .into_iter()
            .filter_map(|i| normalize_interest(i.as_ref()))
            .collect();
        self
    }

    pub fn with_availability<I, S>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.availability = slots
            .into_iter()
            .filter_map(|s| normalize_availability(s.as_ref()))
            .collect();
        self
    }

    pub fn with_intro(mut self, intro: impl Into<String>) -> Self {
        self.intro = intro.into();
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn is_mentor(&self) -> bool {
        self.role == Role::Mentor
    }
}

/// Trim and lowercase an interest tag. Blank tags are dropped.
pub fn normalize_interest(raw: &str) -> Option<String> {
    let tag = raw.trim().to_lowercase();
    (!tag.is_empty()).then_some(tag)
}

/// Trim an availability tag, preserving case. Blank tags are dropped.
pub fn normalize_availability(raw: &str) -> Option<String> {
    let tag = raw.trim();
    (!tag.is_empty()).then(|| tag.to_string())
}

/// Trim, lowercase, and sanity-check an email address.
///
/// Only the shape is checked: exactly one `@` with non-empty local and domain
/// parts and no embedded whitespace.
pub fn normalize_email(raw: &str) -> Result<String, ProfileError> {
    let email = raw.trim().to_lowercase();
    let mut parts = email.split('@');
    let valid = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        _ => false,
    };
    if valid {
        Ok(email)
    } else {
        Err(ProfileError::InvalidEmail(raw.to_string()))
    }
}

fn de_interests<'de, D>(deserializer: D) -> Result<TagSet, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw.iter().filter_map(|i| normalize_interest(i)).collect())
}

fn de_availability<'de, D>(deserializer: D) -> Result<TagSet, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw.iter().filter_map(|s| normalize_availability(s)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn interests_are_trimmed_lowercased_and_deduplicated() {
        let p = Profile::new("a@b.c").with_interests(["Anime ", "anime", "  ", "MUSIC"]);
        let tags: Vec<&str> = p.interests.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["anime", "music"]);
    }

    #[test]
    fn availability_keeps_case_but_drops_duplicates() {
        let p = Profile::new("a@b.c").with_availability(["Evenings", " Evenings", "Weekends"]);
        let tags: Vec<&str> = p.availability.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["Evenings", "Weekends"]);
    }

    #[test]
    fn stage_labels_round_trip() {
        for stage in Stage::ALL {
            assert_eq!(stage.label().parse::<Stage>().unwrap(), stage);
        }
        assert_eq!("pre_op".parse::<Stage>().unwrap(), Stage::PreOp);
        assert_eq!(
            "post-op established".parse::<Stage>().unwrap(),
            Stage::PostOpEstablished
        );
        assert!("recovering".parse::<Stage>().is_err());
    }

    #[test]
    fn post_op_matches_after_prefix() {
        for stage in Stage::ALL {
            assert_eq!(stage.is_post_op(), stage.label().starts_with("After"));
            assert_eq!(stage.is_pre_op(), stage.label().starts_with("Before"));
        }
    }

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("FEMALE".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("Non-binary".parse::<Gender>().unwrap(), Gender::NonBinary);
        assert_eq!(
            "prefer not to say".parse::<Gender>().unwrap(),
            Gender::PreferNotToSay
        );
        assert!("any".parse::<Gender>().is_err());
    }

    #[test]
    fn signup_payload_with_only_email_deserializes() {
        let p: Profile = serde_json::from_value(json!({ "email": "new@user.org" })).unwrap();
        assert_eq!(p.role, Role::Mentee);
        assert!(p.id.is_none());
        assert!(p.interests.is_empty());
        assert!(p.stage.is_none());
    }

    #[test]
    fn null_tag_lists_deserialize_as_empty() {
        let p: Profile = serde_json::from_value(json!({
            "email": "x@y.z",
            "interests": null,
            "availability": null,
        }))
        .unwrap();
        assert!(p.interests.is_empty());
        assert!(p.availability.is_empty());
    }

    #[test]
    fn deserialized_profile_is_normalised() {
        let p: Profile = serde_json::from_value(json!({
            "email": "m@x.org",
            "role": "mentor",
            "gender": "Female",
            "stage": "After (post-op < 6mo)",
            "interests": ["Reading", "reading", " travel "],
            "availability": ["Mornings"],
            "rating": 4.7,
        }))
        .unwrap();
        assert_eq!(p.role, Role::Mentor);
        assert_eq!(p.gender, Some(Gender::Female));
        assert_eq!(p.stage, Some(Stage::PostOpRecent));
        assert_eq!(p.interests.len(), 2);
        assert!(p.interests.contains("travel"));
        assert_eq!(p.rating, Some(4.7));
    }

    #[test]
    fn serialized_stage_uses_label() {
        let p = Profile::new("s@t.u").with_stage(Stage::PostOpEstablished);
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["stage"], "After (post-op ≥ 6mo)");
        assert!(v.get("id").is_none());
    }

    #[test]
    fn email_shape_is_checked() {
        assert_eq!(normalize_email(" Sam@Example.COM ").unwrap(), "sam@example.com");
        assert!(normalize_email("no-at-sign").is_err());
        assert!(normalize_email("two@@signs").is_err());
        assert!(normalize_email("@domain.only").is_err());
        assert!(normalize_email("local@").is_err());
        assert!(normalize_email("sp ace@x.y").is_err());
    }
}
