use crate::detector::DetectorExt;
use crate::image::ImageSinkExt;
use crate::io::{FileFailure, FileOutcome, UploadedFile, VerifyReport};
use tracing::{debug, error, instrument, warn};

/// Folds a set of uploaded photos into one [`VerifyReport`] by asking the
/// detection endpoint about each file in turn. Both collaborators are
/// capabilities so transport and filesystem stay out of the core.
pub struct CarVerifier<D: DetectorExt, S: ImageSinkExt> {
    detector: D,
    sink: S,
    batch_size: usize,
}

impl<D, S> CarVerifier<D, S>
where
    D: DetectorExt + Send + Sync,
    S: ImageSinkExt + Send + Sync,
{
    pub fn new(detector: D, sink: S, batch_size: usize) -> Self {
        Self {
            detector,
            sink,
            batch_size: batch_size.max(1),
        }
    }

    /// Files are grouped into `batch_size` chunks but still checked strictly
    /// one at a time; the grouping is a seam for future parallel dispatch,
    /// not a concurrency unit. A failing file never aborts the rest.
    #[instrument(skip(self, files), fields(file_count = files.len()))]
    pub async fn verify(&self, files: &[UploadedFile]) -> VerifyReport {
        let mut outcomes = Vec::with_capacity(files.len());
        for batch in files.chunks(self.batch_size) {
            for file in batch {
                outcomes.push(self.check_file(file).await);
            }
        }

        VerifyReport::from_outcomes(outcomes)
    }

    async fn check_file(&self, file: &UploadedFile) -> FileOutcome {
        if file.bytes.is_empty() {
            debug!(file_name = %file.file_name, "skipping file without payload");
            return FileOutcome::Skipped;
        }

        let response = match self.detector.check_car(file).await {
            Ok(response) => response,
            Err(e) => {
                error!(file_name = %file.file_name, error = %e, "detection endpoint call failed");
                return FileOutcome::Failed {
                    failure: FileFailure::Remote(e.to_string()),
                    detections: vec![],
                    photo: None,
                };
            }
        };

        // the call itself succeeded, so a persist failure clears the verdict
        // but keeps the detections and photo the endpoint already returned
        if let Some(encoded) = &response.photo {
            if let Err(e) = self.sink.persist(encoded, &file.file_name) {
                warn!(file_name = %file.file_name, error = %e, "could not persist annotated photo");
                return FileOutcome::Failed {
                    failure: FileFailure::Persist(e.to_string()),
                    detections: response.detections.unwrap_or_default(),
                    photo: response.photo,
                };
            }
        }

        FileOutcome::Checked {
            detections: response.detections.unwrap_or_default(),
            photo: response.photo,
        }
    }
}
