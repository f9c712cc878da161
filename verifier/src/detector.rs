use crate::io::{DetectionResponse, UploadedFile};
use reqwest::multipart::{Form, Part};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DetectorError {
    #[error("detection endpoint call failed: `{0}`")]
    Http(String),
}

impl From<reqwest::Error> for DetectorError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value.to_string())
    }
}

/// Do not wrap `CarDetector` in a [`Rc`] or [`Arc`]
/// because [`reqwest::Client`] uses an [`Arc`] internally.
#[derive(Clone)]
pub struct CarDetector {
    http: reqwest::Client,
    url: String,
}

pub trait DetectorExt {
    fn check_car(
        &self,
        file: &UploadedFile,
    ) -> impl Future<Output = Result<DetectionResponse, DetectorError>> + Send;
}

impl CarDetector {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl DetectorExt for CarDetector {
    /// One multipart `POST` per file. Any transport error or non-2xx status
    /// is collapsed into [`DetectorError::Http`]; the caller treats them all
    /// as "this file failed".
    async fn check_car(&self, file: &UploadedFile) -> Result<DetectionResponse, DetectorError> {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(&self.url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json::<DetectionResponse>()
            .await?;

        Ok(response)
    }
}
