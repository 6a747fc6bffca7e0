pub mod client;
pub mod error;
pub mod session;
pub mod types;

pub use client::ObliqoClient;
pub use error::ClientError;
pub use session::ProfileSession;
pub use types::{
    DecisionCounts, HealthResponse, JobFeedQuery, JobFeedResponse, SaveProfileAck, StatsResponse,
    UploadCvResponse,
};
