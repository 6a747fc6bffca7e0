//! Normalization of job records into a single display model.
//!
//! Jobs arrive in one of two field-naming schemes: the older legacy shape
//! (`title`, `company`, `job_id`, `requirements`, ...) and the import-source
//! shape (`JobTitles`, `Company_Name`, `Skills` as a comma-joined string,
//! `Links`, `Stipend`). [`JobRecord::classify`] turns the raw wire value into
//! a tagged variant at the boundary and [`normalize_job`] is the only read
//! path used for display: import-source fields win, legacy fields fill in,
//! and fixed placeholders cover the rest.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::text::split_csv;

pub const UNTITLED_POSITION: &str = "Untitled Position";
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// A job exactly as the API sends it, carrying every optional field of both
/// schemas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "Company_Name", default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(rename = "JobTitles", default, skip_serializing_if = "Option::is_none")]
    pub job_titles: Option<String>,
    /// Comma-separated skill list.
    #[serde(rename = "Skills", default, skip_serializing_if = "Option::is_none")]
    pub skills_csv: Option<String>,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description_text: Option<String>,
    #[serde(rename = "Stipend", default, skip_serializing_if = "Option::is_none")]
    pub stipend: Option<String>,
    #[serde(rename = "Links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_required: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
    #[serde(default)]
    pub is_remote: bool,
}

/// Fields of the legacy job schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyJob {
    pub job_id: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub location: Option<String>,
    pub experience_required: Option<String>,
    pub posted_date: Option<String>,
    pub company_size: Option<String>,
    pub is_remote: bool,
}

/// Fields of the import-source schema, with any legacy fields that rode
/// along kept as fallbacks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedJob {
    pub company_name: Option<String>,
    pub job_titles: Option<String>,
    pub skills_csv: Option<String>,
    pub description: Option<String>,
    pub stipend: Option<String>,
    pub links: Option<String>,
    pub legacy: LegacyJob,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobRecord {
    Legacy(LegacyJob),
    Imported(ImportedJob),
}

/// The canonical view of a job used everywhere it is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedJob {
    pub id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub skills: Vec<String>,
    pub stipend: Option<String>,
    pub link: Option<String>,
    pub location: Option<String>,
    pub experience_required: Option<String>,
    pub posted_date: Option<String>,
    pub company_size: Option<String>,
    pub is_remote: bool,
}

/// Empty strings count as absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl JobRecord {
    /// Tags a raw job by schema. Any non-empty import-source field makes it
    /// [`JobRecord::Imported`].
    #[must_use]
    pub fn classify(job: Job) -> Self {
        let legacy = LegacyJob {
            job_id: present(job.job_id),
            title: present(job.title),
            company: present(job.company),
            description: present(job.description),
            requirements: job.requirements,
            location: present(job.location),
            experience_required: present(job.experience_required),
            posted_date: present(job.posted_date),
            company_size: present(job.company_size),
            is_remote: job.is_remote,
        };
        let imported = ImportedJob {
            company_name: present(job.company_name),
            job_titles: present(job.job_titles),
            skills_csv: present(job.skills_csv),
            description: present(job.description_text),
            stipend: present(job.stipend),
            links: present(job.links),
            legacy: LegacyJob::default(),
        };
        let has_import_fields = imported.company_name.is_some()
            || imported.job_titles.is_some()
            || imported.skills_csv.is_some()
            || imported.description.is_some()
            || imported.stipend.is_some()
            || imported.links.is_some();

        if has_import_fields {
            JobRecord::Imported(ImportedJob { legacy, ..imported })
        } else {
            JobRecord::Legacy(legacy)
        }
    }

    /// Resolves every display field according to the fallback policy.
    #[must_use]
    pub fn normalize(self) -> NormalizedJob {
        match self {
            JobRecord::Legacy(legacy) => from_parts(ImportedJob {
                legacy,
                ..ImportedJob::default()
            }),
            JobRecord::Imported(imported) => from_parts(imported),
        }
    }
}

fn from_parts(job: ImportedJob) -> NormalizedJob {
    let ImportedJob {
        company_name,
        job_titles,
        skills_csv,
        description,
        stipend,
        links,
        legacy,
    } = job;

    // Legacy id first, then the import-source link, then a random id.
    let id = legacy
        .job_id
        .or_else(|| links.clone())
        .unwrap_or_else(|| format!("job_{}", Uuid::new_v4()));

    let skills = match skills_csv {
        Some(csv) => split_csv(&csv),
        None => legacy.requirements.unwrap_or_default(),
    };

    NormalizedJob {
        id,
        title: job_titles
            .or(legacy.title)
            .unwrap_or_else(|| UNTITLED_POSITION.to_string()),
        company: company_name
            .or(legacy.company)
            .unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
        description: description.or(legacy.description).unwrap_or_default(),
        skills,
        stipend,
        link: links,
        location: legacy.location,
        experience_required: legacy.experience_required,
        posted_date: legacy.posted_date,
        company_size: legacy.company_size,
        is_remote: legacy.is_remote,
    }
}

/// Normalizes a raw job for display.
#[must_use]
pub fn normalize_job(job: &Job) -> NormalizedJob {
    JobRecord::classify(job.clone()).normalize()
}

#[cfg(test)]
#[path = "job_test.rs"]
mod tests;
