//! HTTP client for the Obliqo REST API.
//!
//! Wraps `reqwest` with typed response deserialization and the API's error
//! convention: non-2xx responses carry a JSON body with a `detail` string,
//! which becomes the message of [`ClientError::Api`]. Calls are never
//! retried; callers decide what a failure means.

use std::path::Path;
use std::time::Duration;

use obliqo_core::{AppConfig, JobMatch, ProfilePatch, UserProfile};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::types::{
    HealthResponse, JobFeedQuery, JobFeedResponse, SaveProfileAck, StatsResponse,
    UploadCvResponse,
};

const GENERIC_FAILURE: &str = "API request failed";
const UPLOAD_FAILURE: &str = "Failed to upload CV";
const CV_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// Client for the Obliqo REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ObliqoClient {
    client: Client,
    base_url: Url,
}

impl ObliqoClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if the
    /// configured API URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so relative joins append to the base
        // path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: normalised,
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Checks that the API is reachable (`GET /`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the response shape is unexpected.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = self.endpoint("")?;
        self.send_json(self.client.get(url), "health", GENERIC_FAILURE)
            .await
    }

    /// Fetches the stored profile (`GET /api/profile`).
    ///
    /// The result is partial by nature; merge it onto a skeleton with
    /// [`UserProfile::merged`] or [`obliqo_core::ProfileForm::load`].
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status, including 404 when no
    ///   profile exists yet.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the response shape is unexpected.
    pub async fn get_profile(&self) -> Result<ProfilePatch, ClientError> {
        let url = self.endpoint("api/profile")?;
        self.send_json(self.client.get(url), "getProfile", GENERIC_FAILURE)
            .await
    }

    /// Saves the full profile (`POST /api/profile`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the acknowledgement is not JSON.
    pub async fn save_profile(&self, profile: &UserProfile) -> Result<SaveProfileAck, ClientError> {
        let url = self.endpoint("api/profile")?;
        self.send_json(
            self.client.post(url).json(profile),
            "saveProfile",
            GENERIC_FAILURE,
        )
        .await
    }

    /// Fetches one page of scored job matches (`GET /api/jobs`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status (e.g. no profile yet).
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the response shape is unexpected.
    pub async fn get_job_feed(&self, query: &JobFeedQuery) -> Result<JobFeedResponse, ClientError> {
        let mut url = self.endpoint("api/jobs")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &query.page.to_string());
            pairs.append_pair("page_size", &query.page_size.to_string());
            if let Some(decision) = query.decision {
                pairs.append_pair("decision_filter", decision.as_str());
            }
        }
        let context = format!("getJobFeed(page={})", query.page);
        self.send_json(self.client.get(url), &context, GENERIC_FAILURE)
            .await
    }

    /// Fetches a single job match (`GET /api/jobs/{id}`).
    ///
    /// `job_id` is percent-encoded as one path segment, so link-style ids
    /// containing slashes are safe.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status (e.g. 404 unknown job).
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the response shape is unexpected.
    pub async fn get_job_detail(&self, job_id: &str) -> Result<JobMatch, ClientError> {
        let url = self.job_detail_url(job_id)?;
        let context = format!("getJobDetail(id={job_id})");
        self.send_json(self.client.get(url), &context, GENERIC_FAILURE)
            .await
    }

    /// Fetches decision totals for the current profile (`GET /api/stats`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the response shape is unexpected.
    pub async fn get_stats(&self) -> Result<StatsResponse, ClientError> {
        let url = self.endpoint("api/stats")?;
        self.send_json(self.client.get(url), "getStats", GENERIC_FAILURE)
            .await
    }

    /// Uploads a CV as multipart field `file` (`POST /api/upload-cv`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::UnsupportedFileType`] if `filename` is not a PDF or
    ///   Word document; nothing is sent.
    /// - [`ClientError::Api`] on a non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the response shape is unexpected.
    pub async fn upload_cv(
        &self,
        filename: &str,
        contents: Vec<u8>,
    ) -> Result<UploadCvResponse, ClientError> {
        let mime = cv_mime_type(filename)?;
        let url = self.endpoint("api/upload-cv")?;
        let part = Part::bytes(contents)
            .file_name(filename.to_owned())
            .mime_str(mime)?;
        let form = Form::new().part("file", part);
        let context = format!("uploadCv(filename={filename})");
        self.send_json(self.client.post(url).multipart(form), &context, UPLOAD_FAILURE)
            .await
    }

    /// Reads `path` and uploads it with [`ObliqoClient::upload_cv`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if the file cannot be read, otherwise as
    /// for [`ObliqoClient::upload_cv`].
    pub async fn upload_cv_file(&self, path: &Path) -> Result<UploadCvResponse, ClientError> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ClientError::UnsupportedFileType(path.display().to_string()))?
            .to_owned();
        cv_mime_type(&filename)?;
        let contents = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::Io {
                path: path.display().to_string(),
                source,
            })?;
        self.upload_cv(&filename, contents).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    fn job_detail_url(&self, job_id: &str) -> Result<Url, ClientError> {
        let mut url = self.endpoint("api/jobs")?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_owned(),
            })?
            .pop_if_empty()
            .push(job_id);
        Ok(url)
    }

    /// Sends a request, maps non-2xx statuses to [`ClientError::Api`], and
    /// parses the body as JSON.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
        fallback: &str,
    ) -> Result<T, ClientError> {
        tracing::debug!(context, "sending API request");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(status, &body, fallback);
            tracing::warn!(
                context,
                status = status.as_u16(),
                message = %message,
                "API request failed"
            );
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|source| ClientError::Deserialize {
            context: context.to_owned(),
            source,
        })
    }
}

/// Extracts a human-readable message from an error response body.
///
/// A JSON `detail` string wins; a non-string `detail` (such as a validation
/// error list) is rendered as JSON; JSON without `detail` yields `fallback`;
/// a non-JSON body yields the status reason phrase.
pub(crate) fn error_message(status: StatusCode, body: &str, fallback: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(serde_json::Value::String(_) | serde_json::Value::Null) | None => {
                fallback.to_owned()
            }
            Some(other) => other.to_string(),
        },
        Err(_) => status
            .canonical_reason()
            .unwrap_or(fallback)
            .to_owned(),
    }
}

/// MIME type for an accepted CV file name, by extension.
fn cv_mime_type(filename: &str) -> Result<&'static str, ClientError> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| CV_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| ClientError::UnsupportedFileType(filename.to_owned()))?;
    Ok(match extension.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        _ => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    })
}
