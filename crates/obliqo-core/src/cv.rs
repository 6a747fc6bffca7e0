//! Best-effort profile data extracted from an uploaded CV.
//!
//! The upload endpoint returns whatever its parser managed to find; every
//! field is optional and an `error` field marks a failed extraction.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedPersonalInfo {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSocialProfiles {
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedCvData {
    pub personal_info: Option<ExtractedPersonalInfo>,
    pub social_profiles: Option<ExtractedSocialProfiles>,
    pub skills: Option<Vec<String>>,
    pub experience_years: Option<u32>,
    pub raw_text: Option<String>,
    pub error: Option<String>,
}

impl ExtractedCvData {
    /// `false` when the parser reported a failure; such payloads are never
    /// offered for autofill.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.error.is_none()
    }
}
