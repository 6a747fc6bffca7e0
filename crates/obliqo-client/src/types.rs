//! Request and response shapes for the Obliqo JSON API.
//!
//! Domain payloads (profiles, job matches, extracted CV data) live in
//! `obliqo_core`; this module only adds the endpoint envelopes.

use obliqo_core::{Decision, ExtractedCvData, JobMatch};
use serde::Deserialize;

/// Paging and filter parameters for `GET /api/jobs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobFeedQuery {
    pub page: u32,
    pub page_size: u32,
    pub decision: Option<Decision>,
}

impl Default for JobFeedQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
            decision: None,
        }
    }
}

/// Response of `GET /api/jobs`.
#[derive(Debug, Deserialize)]
pub struct JobFeedResponse {
    pub jobs: Vec<JobMatch>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Per-decision job counts in [`StatsResponse`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DecisionCounts {
    #[serde(rename = "Apply", default)]
    pub apply: u64,
    #[serde(rename = "Wait", default)]
    pub wait: u64,
    #[serde(rename = "Skip", default)]
    pub skip: u64,
    #[serde(rename = "Avoid", default)]
    pub avoid: u64,
}

impl DecisionCounts {
    #[must_use]
    pub fn get(&self, decision: Decision) -> u64 {
        match decision {
            Decision::Apply => self.apply,
            Decision::Wait => self.wait,
            Decision::Skip => self.skip,
            Decision::Avoid => self.avoid,
        }
    }
}

/// Response of `GET /api/stats`.
#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    pub total_jobs: u64,
    pub decisions: DecisionCounts,
    #[serde(default)]
    pub recommendation: String,
}

/// Acknowledgement of `POST /api/profile`. The server decides what to send,
/// so every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SaveProfileAck {
    pub message: Option<String>,
    pub user_id: Option<String>,
}

/// Response of `POST /api/upload-cv`.
#[derive(Debug, Deserialize)]
pub struct UploadCvResponse {
    #[serde(default)]
    pub message: String,
    pub filename: String,
    pub file_url: String,
    #[serde(default)]
    pub extracted_data: Option<ExtractedCvData>,
}

/// Response of `GET /`.
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub jobs_loaded: Option<u64>,
}
