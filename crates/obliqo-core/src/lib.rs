pub mod app_config;
pub mod config;
pub mod cv;
pub mod feed;
pub mod form;
pub mod job;
pub mod job_match;
pub mod profile;
pub mod text;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use cv::{ExtractedCvData, ExtractedPersonalInfo, ExtractedSocialProfiles};
pub use feed::JobFeed;
pub use form::{FieldScope, FormError, ProfileForm};
pub use job::{normalize_job, ImportedJob, Job, JobRecord, LegacyJob, NormalizedJob};
pub use job_match::{Decision, ExplainabilityBreakdown, FitBand, JobMatch, ScoreCounter, SkillGap};
pub use profile::{
    new_item_id, Award, Certification, Course, Education, ExtracurricularActivity, ListItem,
    ListSection, MedicalInfo, OtherProfile, PersonalInfo, ProfilePatch, Project, SocialProfiles,
    UserProfile, WorkExperience, WorkMode, WorkPreferences,
};
pub use text::{join_csv, split_csv};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
