//! The user's application profile and the explicit per-section merge used
//! when a server-fetched profile is laid over the all-defaults skeleton.
//!
//! Every field has a documented default. The server may omit any field or
//! send `null`; [`ProfilePatch`] models that with `Option` throughout, and
//! each section's `merged` method fills gaps from the default instead of
//! letting absence leak into the working profile.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Returns a fresh collision-resistant identifier for a new list item.
#[must_use]
pub fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// Nested sections
// ---------------------------------------------------------------------------

/// Contact details. `full_name`, `email`, `phone_number` and `address` are
/// required before submission; everything defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: String,
    pub age: u32,
    pub gender: String,
    pub address: String,
    pub emergency_address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonalInfoPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub emergency_address: Option<String>,
}

impl PersonalInfo {
    /// Overlays the fields present in `patch`; absent fields keep `self`'s value.
    #[must_use]
    pub fn merged(self, patch: PersonalInfoPatch) -> Self {
        Self {
            full_name: patch.full_name.unwrap_or(self.full_name),
            email: patch.email.unwrap_or(self.email),
            phone_number: patch.phone_number.unwrap_or(self.phone_number),
            date_of_birth: patch.date_of_birth.unwrap_or(self.date_of_birth),
            age: patch.age.unwrap_or(self.age),
            gender: patch.gender.unwrap_or(self.gender),
            address: patch.address.unwrap_or(self.address),
            emergency_address: patch.emergency_address.unwrap_or(self.emergency_address),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherProfile {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialProfiles {
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
    pub other_profiles: Vec<OtherProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialProfilesPatch {
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
    pub other_profiles: Option<Vec<OtherProfile>>,
}

impl SocialProfiles {
    /// Overlays the fields present in `patch`; absent fields keep `self`'s value.
    #[must_use]
    pub fn merged(self, patch: SocialProfilesPatch) -> Self {
        Self {
            linkedin: patch.linkedin.unwrap_or(self.linkedin),
            github: patch.github.unwrap_or(self.github),
            portfolio: patch.portfolio.unwrap_or(self.portfolio),
            other_profiles: patch.other_profiles.unwrap_or(self.other_profiles),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalInfo {
    pub has_disabilities: bool,
    pub disability_details: String,
    pub requires_accommodations: bool,
    pub accommodation_details: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MedicalInfoPatch {
    pub has_disabilities: Option<bool>,
    pub disability_details: Option<String>,
    pub requires_accommodations: Option<bool>,
    pub accommodation_details: Option<String>,
}

impl MedicalInfo {
    /// Overlays the fields present in `patch`; absent fields keep `self`'s value.
    #[must_use]
    pub fn merged(self, patch: MedicalInfoPatch) -> Self {
        Self {
            has_disabilities: patch.has_disabilities.unwrap_or(self.has_disabilities),
            disability_details: patch.disability_details.unwrap_or(self.disability_details),
            requires_accommodations: patch
                .requires_accommodations
                .unwrap_or(self.requires_accommodations),
            accommodation_details: patch
                .accommodation_details
                .unwrap_or(self.accommodation_details),
        }
    }
}

/// Preferred working arrangement. Unrecognized wire values read as [`WorkMode::Any`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum WorkMode {
    Remote,
    Onsite,
    Hybrid,
    #[default]
    Any,
}

impl From<String> for WorkMode {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Remote" => WorkMode::Remote,
            "Onsite" => WorkMode::Onsite,
            "Hybrid" => WorkMode::Hybrid,
            _ => WorkMode::Any,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPreferences {
    pub work_mode: WorkMode,
    pub willing_to_relocate: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkPreferencesPatch {
    pub work_mode: Option<WorkMode>,
    pub willing_to_relocate: Option<bool>,
}

impl WorkPreferences {
    /// Overlays the fields present in `patch`; absent fields keep `self`'s value.
    #[must_use]
    pub fn merged(self, patch: WorkPreferencesPatch) -> Self {
        Self {
            work_mode: patch.work_mode.unwrap_or(self.work_mode),
            willing_to_relocate: patch.willing_to_relocate.unwrap_or(self.willing_to_relocate),
        }
    }
}

// ---------------------------------------------------------------------------
// Dynamic list sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub role: Option<String>,
    pub duration: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub duration: String,
    pub location: Option<String>,
    pub skills_used: Vec<String>,
    pub description: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
    pub grade: Option<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuing_organization: String,
    pub issue_date: String,
    pub expiry_date: Option<String>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub completion_date: String,
    pub skills_learned: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Award {
    pub id: String,
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtracurricularActivity {
    pub id: String,
    pub activity: String,
    pub role: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
}

/// Names one of the seven dynamic list sections of a [`UserProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListSection {
    Projects,
    WorkExperience,
    Education,
    Certifications,
    Courses,
    Awards,
    ExtracurricularActivities,
}

impl ListSection {
    pub const ALL: [ListSection; 7] = [
        ListSection::Projects,
        ListSection::WorkExperience,
        ListSection::Education,
        ListSection::Certifications,
        ListSection::Courses,
        ListSection::Awards,
        ListSection::ExtracurricularActivities,
    ];

    /// The field name used for this section on the wire.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            ListSection::Projects => "projects",
            ListSection::WorkExperience => "work_experience",
            ListSection::Education => "education",
            ListSection::Certifications => "certifications",
            ListSection::Courses => "courses",
            ListSection::Awards => "awards",
            ListSection::ExtracurricularActivities => "extracurricular_activities",
        }
    }
}

impl fmt::Display for ListSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for ListSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ListSection::ALL
            .into_iter()
            .find(|section| section.wire_name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = ListSection::ALL.iter().map(|s| s.wire_name()).collect();
                format!("unknown list section '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// An element of a dynamic list section, addressed by a stable identifier.
pub trait ListItem: Clone + Serialize + serde::de::DeserializeOwned {
    const SECTION: ListSection;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    fn items(profile: &UserProfile) -> &[Self];

    fn items_mut(profile: &mut UserProfile) -> &mut Vec<Self>;
}

impl ListItem for Project {
    const SECTION: ListSection = ListSection::Projects;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn items(profile: &UserProfile) -> &[Self] {
        &profile.projects
    }

    fn items_mut(profile: &mut UserProfile) -> &mut Vec<Self> {
        &mut profile.projects
    }
}

impl ListItem for WorkExperience {
    const SECTION: ListSection = ListSection::WorkExperience;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn items(profile: &UserProfile) -> &[Self] {
        &profile.work_experience
    }

    fn items_mut(profile: &mut UserProfile) -> &mut Vec<Self> {
        &mut profile.work_experience
    }
}

impl ListItem for Education {
    const SECTION: ListSection = ListSection::Education;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn items(profile: &UserProfile) -> &[Self] {
        &profile.education
    }

    fn items_mut(profile: &mut UserProfile) -> &mut Vec<Self> {
        &mut profile.education
    }
}

impl ListItem for Certification {
    const SECTION: ListSection = ListSection::Certifications;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn items(profile: &UserProfile) -> &[Self] {
        &profile.certifications
    }

    fn items_mut(profile: &mut UserProfile) -> &mut Vec<Self> {
        &mut profile.certifications
    }
}

impl ListItem for Course {
    const SECTION: ListSection = ListSection::Courses;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn items(profile: &UserProfile) -> &[Self] {
        &profile.courses
    }

    fn items_mut(profile: &mut UserProfile) -> &mut Vec<Self> {
        &mut profile.courses
    }
}

impl ListItem for Award {
    const SECTION: ListSection = ListSection::Awards;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn items(profile: &UserProfile) -> &[Self] {
        &profile.awards
    }

    fn items_mut(profile: &mut UserProfile) -> &mut Vec<Self> {
        &mut profile.awards
    }
}

impl ListItem for ExtracurricularActivity {
    const SECTION: ListSection = ListSection::ExtracurricularActivities;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn items(profile: &UserProfile) -> &[Self] {
        &profile.extracurricular_activities
    }

    fn items_mut(profile: &mut UserProfile) -> &mut Vec<Self> {
        &mut profile.extracurricular_activities
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// The complete application profile as held by the form and sent on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub personal_info: PersonalInfo,
    pub about_me: String,
    pub social_profiles: SocialProfiles,
    pub resume_url: String,
    pub resume_text: Option<String>,
    pub has_uploaded_resume: bool,
    pub skills: Vec<String>,
    pub experience_years: u32,
    /// One of `Entry`, `Mid`, `Senior`, `Lead`.
    pub experience_level: String,
    pub preferred_roles: Vec<String>,
    pub preferred_locations: Vec<String>,
    pub career_goals: String,
    pub projects: Vec<Project>,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub courses: Vec<Course>,
    pub awards: Vec<Award>,
    pub extracurricular_activities: Vec<ExtracurricularActivity>,
    pub medical_info: MedicalInfo,
    pub work_preferences: WorkPreferences,
}

/// A possibly partial profile as returned by `GET /api/profile`.
///
/// `null` and missing fields both deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
    pub user_id: Option<String>,
    pub personal_info: Option<PersonalInfoPatch>,
    pub about_me: Option<String>,
    pub social_profiles: Option<SocialProfilesPatch>,
    pub resume_url: Option<String>,
    pub resume_text: Option<String>,
    pub has_uploaded_resume: Option<bool>,
    pub skills: Option<Vec<String>>,
    pub experience_years: Option<u32>,
    pub experience_level: Option<String>,
    pub preferred_roles: Option<Vec<String>>,
    pub preferred_locations: Option<Vec<String>>,
    pub career_goals: Option<String>,
    pub projects: Option<Vec<Project>>,
    pub work_experience: Option<Vec<WorkExperience>>,
    pub education: Option<Vec<Education>>,
    pub certifications: Option<Vec<Certification>>,
    pub courses: Option<Vec<Course>>,
    pub awards: Option<Vec<Award>>,
    pub extracurricular_activities: Option<Vec<ExtracurricularActivity>>,
    pub medical_info: Option<MedicalInfoPatch>,
    pub work_preferences: Option<WorkPreferencesPatch>,
}

impl UserProfile {
    /// The all-defaults profile a new user starts from.
    #[must_use]
    pub fn skeleton() -> Self {
        Self {
            user_id: format!("user_{}", Utc::now().timestamp_millis()),
            personal_info: PersonalInfo::default(),
            about_me: String::new(),
            social_profiles: SocialProfiles::default(),
            resume_url: String::new(),
            resume_text: None,
            has_uploaded_resume: false,
            skills: Vec::new(),
            experience_years: 0,
            experience_level: "Entry".to_string(),
            preferred_roles: Vec::new(),
            preferred_locations: Vec::new(),
            career_goals: String::new(),
            projects: Vec::new(),
            work_experience: Vec::new(),
            education: Vec::new(),
            certifications: Vec::new(),
            courses: Vec::new(),
            awards: Vec::new(),
            extracurricular_activities: Vec::new(),
            medical_info: MedicalInfo::default(),
            work_preferences: WorkPreferences::default(),
        }
    }

    /// Lays `patch` over `self`.
    ///
    /// The four nested sections merge field by field; top-level fields are
    /// replaced wholesale when present. List items arriving without an id
    /// are given a fresh one so every element stays addressable.
    #[must_use]
    pub fn merged(self, patch: ProfilePatch) -> Self {
        Self {
            user_id: patch.user_id.unwrap_or(self.user_id),
            personal_info: self
                .personal_info
                .merged(patch.personal_info.unwrap_or_default()),
            about_me: patch.about_me.unwrap_or(self.about_me),
            social_profiles: self
                .social_profiles
                .merged(patch.social_profiles.unwrap_or_default()),
            resume_url: patch.resume_url.unwrap_or(self.resume_url),
            resume_text: patch.resume_text.or(self.resume_text),
            has_uploaded_resume: patch.has_uploaded_resume.unwrap_or(self.has_uploaded_resume),
            skills: patch.skills.unwrap_or(self.skills),
            experience_years: patch.experience_years.unwrap_or(self.experience_years),
            experience_level: patch.experience_level.unwrap_or(self.experience_level),
            preferred_roles: patch.preferred_roles.unwrap_or(self.preferred_roles),
            preferred_locations: patch.preferred_locations.unwrap_or(self.preferred_locations),
            career_goals: patch.career_goals.unwrap_or(self.career_goals),
            projects: with_ids(patch.projects.unwrap_or(self.projects)),
            work_experience: with_ids(patch.work_experience.unwrap_or(self.work_experience)),
            education: with_ids(patch.education.unwrap_or(self.education)),
            certifications: with_ids(patch.certifications.unwrap_or(self.certifications)),
            courses: with_ids(patch.courses.unwrap_or(self.courses)),
            awards: with_ids(patch.awards.unwrap_or(self.awards)),
            extracurricular_activities: with_ids(
                patch
                    .extracurricular_activities
                    .unwrap_or(self.extracurricular_activities),
            ),
            medical_info: self
                .medical_info
                .merged(patch.medical_info.unwrap_or_default()),
            work_preferences: self
                .work_preferences
                .merged(patch.work_preferences.unwrap_or_default()),
        }
    }

    /// Number of items currently in `section`.
    #[must_use]
    pub fn section_len(&self, section: ListSection) -> usize {
        match section {
            ListSection::Projects => self.projects.len(),
            ListSection::WorkExperience => self.work_experience.len(),
            ListSection::Education => self.education.len(),
            ListSection::Certifications => self.certifications.len(),
            ListSection::Courses => self.courses.len(),
            ListSection::Awards => self.awards.len(),
            ListSection::ExtracurricularActivities => self.extracurricular_activities.len(),
        }
    }
}

/// Gives every item a unique id: empty ids and repeats of an earlier id get
/// a fresh one.
fn with_ids<T: ListItem>(mut items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in &mut items {
        if item.id().is_empty() || !seen.insert(item.id().to_owned()) {
            let id = new_item_id();
            seen.insert(id.clone());
            item.set_id(id);
        }
    }
    items
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
