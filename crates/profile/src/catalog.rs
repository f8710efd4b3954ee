use serde::{Deserialize, Serialize};

use crate::types::{Gender, Stage};

const PROCEDURES: &[&str] = &[
    "Lung transplant",
    "Liver transplant",
    "Kidney transplant",
    "Knee replacement",
    "Heart bypass",
    "Mastectomy",
    "C-section",
    "Appendectomy",
];

const LANGUAGES: &[&str] = &["English", "Spanish", "French", "Chinese", "Arabic", "Hindi"];

const TIMEZONES: &[&str] = &[
    "America/New_York",
    "America/Chicago",
    "America/Denver",
    "America/Los_Angeles",
    "Europe/London",
    "Europe/Paris",
    "Asia/Tokyo",
    "Asia/Kolkata",
];

const AVAILABILITY: &[&str] = &["Mornings", "Afternoons", "Evenings", "Weekends"];

const HOSPITALS: &[&str] = &[
    "Mount Sinai Hospital",
    "NYU Langone",
    "Cleveland Clinic",
    "Mayo Clinic",
    "Mass General",
    "UCSF Medical Center",
    "Johns Hopkins",
    "Stanford Health Care",
];

const INTERESTS: &[&str] = &[
    "anime",
    "gaming",
    "music",
    "reading",
    "cooking",
    "fitness",
    "pets",
    "travel",
    "movies",
    "art",
    "photography",
    "gardening",
];

/// Option lists offered by the profile form.
///
/// Passed explicitly wherever membership matters; nothing in the workspace
/// reads these lists from a global. Lists missing from a serialized catalog
/// keep their built-in values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub procedures: Vec<String>,
    pub languages: Vec<String>,
    pub timezones: Vec<String>,
    pub availability: Vec<String>,
    pub hospitals: Vec<String>,
    pub interests: Vec<String>,
    /// Stage labels, derived from [`Stage`].
    pub stages: Vec<String>,
    /// Gender labels, derived from [`Gender`].
    pub genders: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn stage_labels() -> Vec<String> {
    Stage::ALL.iter().map(|s| s.label().to_string()).collect()
}

fn gender_labels() -> Vec<String> {
    Gender::ALL.iter().map(|g| g.label().to_string()).collect()
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            procedures: owned(PROCEDURES),
            languages: owned(LANGUAGES),
            timezones: owned(TIMEZONES),
            availability: owned(AVAILABILITY),
            hospitals: owned(HOSPITALS),
            interests: owned(INTERESTS),
            stages: stage_labels(),
            genders: gender_labels(),
        }
    }
}
