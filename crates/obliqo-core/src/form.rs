//! In-memory state for the profile editor.
//!
//! [`ProfileForm`] owns one [`UserProfile`] plus three free-text buffers that
//! hold the comma-separated renderings of `skills`, `preferred_roles` and
//! `preferred_locations` while they are being edited. The structured lists
//! are only re-derived from the buffers at submission time, so intermediate
//! input such as a trailing comma never corrupts them.
//!
//! Every operation builds the replacement value for the section it touches
//! and swaps it in whole; sibling fields and other list items are never
//! rewritten.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::cv::ExtractedCvData;
use crate::profile::{
    new_item_id, Award, Certification, Course, Education, ExtracurricularActivity, ListItem,
    ListSection, ProfilePatch, Project, UserProfile, WorkExperience,
};
use crate::text::{join_csv, split_csv};

/// Errors raised by field-name driven form edits and submission checks.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("unknown field '{field}' in {scope}")]
    UnknownField { scope: String, field: String },

    #[error("invalid value for {scope}.{field}: {source}")]
    InvalidValue {
        scope: String,
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {section} item: {source}")]
    InvalidTemplate {
        section: ListSection,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{0}' is a list section; use the list item operations instead")]
    ListSectionField(ListSection),

    #[error("item ids are assigned on creation and cannot be edited")]
    ImmutableId,

    #[error("required fields are empty: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),
}

/// Which part of the profile a scoped field update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldScope {
    PersonalInfo,
    SocialProfiles,
    MedicalInfo,
    WorkPreferences,
    TopLevel,
}

impl FieldScope {
    fn name(self) -> &'static str {
        match self {
            FieldScope::PersonalInfo => "personal_info",
            FieldScope::SocialProfiles => "social_profiles",
            FieldScope::MedicalInfo => "medical_info",
            FieldScope::WorkPreferences => "work_preferences",
            FieldScope::TopLevel => "profile",
        }
    }
}

impl From<&str> for FieldScope {
    /// Names of the four nested sections map to their scope; anything else
    /// is a top-level field.
    fn from(section: &str) -> Self {
        match section {
            "personal_info" => FieldScope::PersonalInfo,
            "social_profiles" => FieldScope::SocialProfiles,
            "medical_info" => FieldScope::MedicalInfo,
            "work_preferences" => FieldScope::WorkPreferences,
            _ => FieldScope::TopLevel,
        }
    }
}

impl fmt::Display for FieldScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Required inputs, checked before a save is attempted.
const REQUIRED_FIELDS: [&str; 10] = [
    "personal_info.full_name",
    "personal_info.email",
    "personal_info.phone_number",
    "personal_info.address",
    "about_me",
    "career_goals",
    "experience_level",
    "skills",
    "preferred_roles",
    "preferred_locations",
];

#[derive(Debug, Clone)]
pub struct ProfileForm {
    profile: UserProfile,
    skills_input: String,
    roles_input: String,
    locations_input: String,
    pending_extraction: Option<ExtractedCvData>,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileForm {
    /// A form holding the all-defaults skeleton profile and empty buffers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            profile: UserProfile::skeleton(),
            skills_input: String::new(),
            roles_input: String::new(),
            locations_input: String::new(),
            pending_extraction: None,
        }
    }

    #[must_use]
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    #[must_use]
    pub fn skills_input(&self) -> &str {
        &self.skills_input
    }

    #[must_use]
    pub fn roles_input(&self) -> &str {
        &self.roles_input
    }

    #[must_use]
    pub fn locations_input(&self) -> &str {
        &self.locations_input
    }

    /// The extracted CV payload waiting for the user to confirm autofill.
    #[must_use]
    pub fn pending_extraction(&self) -> Option<&ExtractedCvData> {
        self.pending_extraction.as_ref()
    }

    /// Installs a fetched profile. `None` means no profile exists yet and
    /// leaves the skeleton in place.
    pub fn load(&mut self, fetched: Option<ProfilePatch>) {
        let Some(patch) = fetched else {
            tracing::debug!("no stored profile; keeping defaults");
            return;
        };
        let skeleton = UserProfile::skeleton();
        self.profile = skeleton.merged(patch);
        self.refresh_buffers();
    }

    pub fn set_skills_input(&mut self, raw: impl Into<String>) {
        self.skills_input = raw.into();
    }

    pub fn set_roles_input(&mut self, raw: impl Into<String>) {
        self.roles_input = raw.into();
    }

    pub fn set_locations_input(&mut self, raw: impl Into<String>) {
        self.locations_input = raw.into();
    }

    /// Replaces one field, either inside a nested section or at the top level.
    ///
    /// # Errors
    ///
    /// - [`FormError::UnknownField`] if `field` does not exist in `scope`.
    /// - [`FormError::InvalidValue`] if `value` has the wrong shape.
    /// - [`FormError::ListSectionField`] for top-level list sections, which
    ///   are edited item by item.
    pub fn update_field(
        &mut self,
        scope: FieldScope,
        field: &str,
        value: Value,
    ) -> Result<(), FormError> {
        let scope_name = scope.name();
        match scope {
            FieldScope::PersonalInfo => {
                self.profile.personal_info =
                    replace_field(&self.profile.personal_info, scope_name, field, value)?;
            }
            FieldScope::SocialProfiles => {
                self.profile.social_profiles =
                    replace_field(&self.profile.social_profiles, scope_name, field, value)?;
            }
            FieldScope::MedicalInfo => {
                self.profile.medical_info =
                    replace_field(&self.profile.medical_info, scope_name, field, value)?;
            }
            FieldScope::WorkPreferences => {
                self.profile.work_preferences =
                    replace_field(&self.profile.work_preferences, scope_name, field, value)?;
            }
            FieldScope::TopLevel => {
                if let Ok(section) = field.parse::<ListSection>() {
                    return Err(FormError::ListSectionField(section));
                }
                self.profile = replace_field(&self.profile, scope_name, field, value)?;
                // Submission reads these lists from their buffers.
                match field {
                    "skills" => self.skills_input = join_csv(&self.profile.skills),
                    "preferred_roles" => {
                        self.roles_input = join_csv(&self.profile.preferred_roles);
                    }
                    "preferred_locations" => {
                        self.locations_input = join_csv(&self.profile.preferred_locations);
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Replaces `field` on the item of `section` whose id is `id`.
    ///
    /// Returns `Ok(false)` without touching the list when no item matches.
    ///
    /// # Errors
    ///
    /// - [`FormError::ImmutableId`] when `field` is `"id"`.
    /// - [`FormError::UnknownField`] / [`FormError::InvalidValue`] as for
    ///   [`ProfileForm::update_field`].
    pub fn update_item_field(
        &mut self,
        section: ListSection,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<bool, FormError> {
        match section {
            ListSection::Projects => self.patch_item::<Project>(id, field, value),
            ListSection::WorkExperience => self.patch_item::<WorkExperience>(id, field, value),
            ListSection::Education => self.patch_item::<Education>(id, field, value),
            ListSection::Certifications => self.patch_item::<Certification>(id, field, value),
            ListSection::Courses => self.patch_item::<Course>(id, field, value),
            ListSection::Awards => self.patch_item::<Award>(id, field, value),
            ListSection::ExtracurricularActivities => {
                self.patch_item::<ExtracurricularActivity>(id, field, value)
            }
        }
    }

    /// Appends an item built from a JSON `template` to `section` and returns
    /// its freshly generated id. Missing template fields take their defaults;
    /// any `id` in the template is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidTemplate`] if `template` does not describe
    /// an item of that section.
    pub fn add_item(&mut self, section: ListSection, template: Value) -> Result<String, FormError> {
        match section {
            ListSection::Projects => self.push_template::<Project>(template),
            ListSection::WorkExperience => self.push_template::<WorkExperience>(template),
            ListSection::Education => self.push_template::<Education>(template),
            ListSection::Certifications => self.push_template::<Certification>(template),
            ListSection::Courses => self.push_template::<Course>(template),
            ListSection::Awards => self.push_template::<Award>(template),
            ListSection::ExtracurricularActivities => {
                self.push_template::<ExtracurricularActivity>(template)
            }
        }
    }

    /// Removes the item of `section` whose id is `id`. Returns `false` when
    /// nothing matched.
    pub fn remove_item(&mut self, section: ListSection, id: &str) -> bool {
        match section {
            ListSection::Projects => self.remove::<Project>(id),
            ListSection::WorkExperience => self.remove::<WorkExperience>(id),
            ListSection::Education => self.remove::<Education>(id),
            ListSection::Certifications => self.remove::<Certification>(id),
            ListSection::Courses => self.remove::<Course>(id),
            ListSection::Awards => self.remove::<Award>(id),
            ListSection::ExtracurricularActivities => self.remove::<ExtracurricularActivity>(id),
        }
    }

    /// Typed counterpart of [`ProfileForm::add_item`].
    pub fn push_item<T: ListItem>(&mut self, mut template: T) -> String {
        let id = new_item_id();
        template.set_id(id.clone());
        let mut items = T::items(&self.profile).to_vec();
        items.push(template);
        *T::items_mut(&mut self.profile) = items;
        id
    }

    /// Typed counterpart of [`ProfileForm::update_item_field`]. The item's id
    /// is restored after `edit` runs, so it cannot be reassigned.
    pub fn update_item<T: ListItem>(&mut self, id: &str, edit: impl FnOnce(&mut T)) -> bool {
        let Some(pos) = find_item::<T>(&self.profile, id) else {
            return false;
        };
        let mut updated = T::items(&self.profile)[pos].clone();
        edit(&mut updated);
        updated.set_id(id.to_owned());
        T::items_mut(&mut self.profile)[pos] = updated;
        true
    }

    /// Typed counterpart of [`ProfileForm::remove_item`].
    pub fn remove<T: ListItem>(&mut self, id: &str) -> bool {
        if find_item::<T>(&self.profile, id).is_none() {
            return false;
        }
        let kept: Vec<T> = T::items(&self.profile)
            .iter()
            .filter(|item| item.id() != id)
            .cloned()
            .collect();
        *T::items_mut(&mut self.profile) = kept;
        true
    }

    /// Marks a successful CV upload on the profile.
    pub fn record_upload(&mut self, file_url: impl Into<String>) {
        self.profile.resume_url = file_url.into();
        self.profile.has_uploaded_resume = true;
    }

    /// Holds an extracted CV payload for a later, user-confirmed autofill.
    ///
    /// Payloads carrying an `error` are dropped. Returns whether the payload
    /// was staged.
    pub fn stage_extraction(&mut self, data: ExtractedCvData) -> bool {
        if data.is_usable() {
            self.pending_extraction = Some(data);
            true
        } else {
            tracing::info!(
                error = data.error.as_deref().unwrap_or_default(),
                "CV extraction failed; autofill unavailable"
            );
            self.pending_extraction = None;
            false
        }
    }

    pub fn discard_extraction(&mut self) {
        self.pending_extraction = None;
    }

    /// Merges the staged CV payload into the profile, once.
    ///
    /// Only present values overwrite: empty strings, an empty skill list and
    /// zero years of experience all keep the current value. Non-empty skills
    /// also regenerate the skills buffer. Returns `false` if nothing was
    /// staged.
    pub fn apply_autofill(&mut self) -> bool {
        let Some(data) = self.pending_extraction.take() else {
            return false;
        };

        let mut personal_info = self.profile.personal_info.clone();
        if let Some(extracted) = data.personal_info {
            overwrite_if_present(&mut personal_info.full_name, extracted.full_name);
            overwrite_if_present(&mut personal_info.email, extracted.email);
            overwrite_if_present(&mut personal_info.phone_number, extracted.phone_number);
        }

        let mut social_profiles = self.profile.social_profiles.clone();
        if let Some(extracted) = data.social_profiles {
            overwrite_if_present(&mut social_profiles.linkedin, extracted.linkedin);
            overwrite_if_present(&mut social_profiles.github, extracted.github);
        }

        self.profile.personal_info = personal_info;
        self.profile.social_profiles = social_profiles;

        if let Some(skills) = data.skills.filter(|s| !s.is_empty()) {
            self.skills_input = join_csv(&skills);
            self.profile.skills = skills;
        }
        if let Some(years) = data.experience_years.filter(|&y| y > 0) {
            self.profile.experience_years = years;
        }
        true
    }

    /// Checks the presence constraints that gate submission.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingRequired`] listing every blank field.
    pub fn validate_required(&self) -> Result<(), FormError> {
        let p = &self.profile;
        let values = [
            p.personal_info.full_name.as_str(),
            p.personal_info.email.as_str(),
            p.personal_info.phone_number.as_str(),
            p.personal_info.address.as_str(),
            p.about_me.as_str(),
            p.career_goals.as_str(),
            p.experience_level.as_str(),
            self.skills_input.as_str(),
            self.roles_input.as_str(),
            self.locations_input.as_str(),
        ];
        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingRequired(missing))
        }
    }

    /// The payload sent on save: the current profile with the three list
    /// fields derived from their buffers.
    #[must_use]
    pub fn submission(&self) -> UserProfile {
        let mut payload = self.profile.clone();
        payload.skills = split_csv(&self.skills_input);
        payload.preferred_roles = split_csv(&self.roles_input);
        payload.preferred_locations = split_csv(&self.locations_input);
        payload
    }

    /// Adopts a successfully saved payload as the current profile.
    pub fn commit(&mut self, saved: UserProfile) {
        self.profile = saved;
    }

    fn refresh_buffers(&mut self) {
        self.skills_input = join_csv(&self.profile.skills);
        self.roles_input = join_csv(&self.profile.preferred_roles);
        self.locations_input = join_csv(&self.profile.preferred_locations);
    }

    fn patch_item<T: ListItem>(
        &mut self,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<bool, FormError> {
        if field == "id" {
            return Err(FormError::ImmutableId);
        }
        let Some(pos) = find_item::<T>(&self.profile, id) else {
            return Ok(false);
        };
        let current = &T::items(&self.profile)[pos];
        let updated = replace_field(current, T::SECTION.wire_name(), field, value)?;
        T::items_mut(&mut self.profile)[pos] = updated;
        Ok(true)
    }

    fn push_template<T: ListItem>(&mut self, template: Value) -> Result<String, FormError> {
        let item: T = serde_json::from_value(template).map_err(|source| {
            FormError::InvalidTemplate {
                section: T::SECTION,
                source,
            }
        })?;
        Ok(self.push_item(item))
    }
}

/// Position of the item with `id`, logging when there is none.
fn find_item<T: ListItem>(profile: &UserProfile, id: &str) -> Option<usize> {
    let pos = T::items(profile).iter().position(|item| item.id() == id);
    if pos.is_none() {
        tracing::warn!(section = %T::SECTION, id, "no list item with this id");
    }
    pos
}

/// Returns a copy of `current` with `field` set to `value`, going through
/// the value's JSON form so field names match the wire names.
fn replace_field<T>(current: &T, scope: &str, field: &str, value: Value) -> Result<T, FormError>
where
    T: Serialize + DeserializeOwned,
{
    let invalid = |source| FormError::InvalidValue {
        scope: scope.to_owned(),
        field: field.to_owned(),
        source,
    };
    let Value::Object(mut object) = serde_json::to_value(current).map_err(invalid)? else {
        return Err(FormError::UnknownField {
            scope: scope.to_owned(),
            field: field.to_owned(),
        });
    };
    if !object.contains_key(field) {
        return Err(FormError::UnknownField {
            scope: scope.to_owned(),
            field: field.to_owned(),
        });
    }
    object.insert(field.to_owned(), value);
    serde_json::from_value(Value::Object(object)).map_err(invalid)
}

fn overwrite_if_present(slot: &mut String, extracted: Option<String>) {
    if let Some(value) = extracted.filter(|v| !v.is_empty()) {
        *slot = value;
    }
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
