use base64::Engine;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("photo payload is not valid base64: `{0}`")]
    Decode(#[from] base64::DecodeError),
    #[error("failed to write photo to disk: `{0}`")]
    Write(#[from] std::io::Error),
}

/// Where decoded annotated photos end up. Passed into the verifier as a
/// capability so tests can substitute their own sink.
pub trait ImageSinkExt {
    fn persist(&self, encoded: &str, original_name: &str) -> Result<PathBuf, PersistError>;
}

/// Writes photos under a public directory, one new file per call, named
/// `car_<timestamp>_<original filename>`. Files are only ever created.
pub struct PublicDirSink {
    dir: PathBuf,
}

impl PublicDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ImageSinkExt for PublicDirSink {
    fn persist(&self, encoded: &str, original_name: &str) -> Result<PathBuf, PersistError> {
        // data URIs carry a `data:image/...;base64,` prefix before the payload
        let payload = match encoded.split_once(',') {
            Some((_, payload)) => payload,
            None => encoded,
        };
        let bytes = base64::engine::general_purpose::STANDARD.decode(payload)?;

        std::fs::create_dir_all(&self.dir)?;
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_micros();
        let path = self.dir.join(format!("car_{timestamp}_{original_name}"));
        std::fs::write(&path, bytes)?;

        Ok(path)
    }
}
