//! Network-bound profile editing: drives a [`ProfileForm`] through load,
//! save, and CV upload against the API.

use std::path::Path;

use obliqo_core::ProfileForm;

use crate::client::ObliqoClient;
use crate::error::ClientError;
use crate::types::{SaveProfileAck, UploadCvResponse};

/// A profile editing session.
///
/// Owns the form state exclusively; each network call takes `&mut self`, so
/// at most one load, save, or upload can be in flight per session.
#[derive(Debug)]
pub struct ProfileSession {
    client: ObliqoClient,
    form: ProfileForm,
}

impl ProfileSession {
    #[must_use]
    pub fn new(client: ObliqoClient) -> Self {
        Self {
            client,
            form: ProfileForm::new(),
        }
    }

    #[must_use]
    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProfileForm {
        &mut self.form
    }

    #[must_use]
    pub fn into_form(self) -> ProfileForm {
        self.form
    }

    /// Loads the stored profile into the form.
    ///
    /// A failed fetch (404, network error, malformed body) means "no profile
    /// yet": it is logged and the form keeps its defaults. Returns whether a
    /// stored profile was found.
    pub async fn load(&mut self) -> bool {
        match self.client.get_profile().await {
            Ok(patch) => {
                self.form.load(Some(patch));
                tracing::info!(user_id = %self.form.profile().user_id, "loaded stored profile");
                true
            }
            Err(err) => {
                tracing::info!(error = %err, "no stored profile; starting from defaults");
                self.form.load(None);
                false
            }
        }
    }

    /// Validates and submits the form.
    ///
    /// On success the submitted payload becomes the form's profile. On
    /// failure the form is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Form`] if required fields are blank; nothing is sent.
    /// - Any error from [`ObliqoClient::save_profile`].
    pub async fn save(&mut self) -> Result<SaveProfileAck, ClientError> {
        self.form.validate_required()?;
        let payload = self.form.submission();
        let ack = self.client.save_profile(&payload).await?;
        tracing::info!(user_id = %payload.user_id, "profile saved");
        self.form.commit(payload);
        Ok(ack)
    }

    /// Uploads a CV. Any previously staged extraction is discarded first. On
    /// success the resume is recorded on the profile and usable extracted
    /// data is staged for [`ProfileSession::apply_autofill`].
    ///
    /// # Errors
    ///
    /// Any error from [`ObliqoClient::upload_cv`]; the uploaded-resume flag
    /// is left unchanged.
    pub async fn upload_cv(
        &mut self,
        filename: &str,
        contents: Vec<u8>,
    ) -> Result<UploadCvResponse, ClientError> {
        self.form.discard_extraction();
        let response = self.client.upload_cv(filename, contents).await?;
        self.accept_upload(&response);
        Ok(response)
    }

    /// Reads `path` and uploads it like [`ProfileSession::upload_cv`].
    ///
    /// # Errors
    ///
    /// Any error from [`ObliqoClient::upload_cv_file`].
    pub async fn upload_cv_file(&mut self, path: &Path) -> Result<UploadCvResponse, ClientError> {
        self.form.discard_extraction();
        let response = self.client.upload_cv_file(path).await?;
        self.accept_upload(&response);
        Ok(response)
    }

    /// Applies the staged CV data to the form. Returns `false` when nothing
    /// usable was staged.
    pub fn apply_autofill(&mut self) -> bool {
        self.form.apply_autofill()
    }

    fn accept_upload(&mut self, response: &UploadCvResponse) {
        tracing::info!(
            filename = %response.filename,
            file_url = %response.file_url,
            "CV uploaded"
        );
        self.form.record_upload(response.file_url.clone());
        if let Some(data) = response.extracted_data.clone() {
            self.form.stage_extraction(data);
        }
    }
}
