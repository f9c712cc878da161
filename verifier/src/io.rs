use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::bytes::Bytes;

pub type Base64Blob = String;

/// Sentinel returned as `photo` when no response ever carried an image.
pub const NO_PHOTO: &str = "null";

/// One uploaded photo, owned by the request and dropped after processing.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub bytes: Bytes,
    pub file_name: String,
    pub content_type: String,
}

/// One issue the detection endpoint found on a photo. The verifier never
/// looks inside, it only concatenates these across files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class: String,
    pub confidence: f64,
}

/// Per-file answer from the detection endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionResponse {
    /// Per-file verdict of the endpoint itself. The verifier derives its own
    /// verdict from the detection list, so this is carried but not read.
    pub ok: bool,
    pub photo: Option<Base64Blob>,
    pub detections: Option<Vec<Detection>>,
}

#[derive(Debug, Clone, Error)]
pub enum FileFailure {
    #[error("detection endpoint call failed: `{0}`")]
    Remote(String),
    #[error("annotated photo could not be persisted: `{0}`")]
    Persist(String),
}

/// What happened to a single file, tagged so the aggregate can be derived
/// instead of mutated inline. A failed file still carries whatever the
/// endpoint managed to return before the failure: a persist failure comes
/// after a successful call, so its detections and photo are kept.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    Skipped,
    Failed {
        failure: FileFailure,
        detections: Vec<Detection>,
        photo: Option<Base64Blob>,
    },
    Checked {
        detections: Vec<Detection>,
        photo: Option<Base64Blob>,
    },
}

/// Aggregated verdict over a whole upload set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyReport {
    pub ok: bool,
    pub photo: Base64Blob,
    pub detections: Vec<Detection>,
}

impl VerifyReport {
    /// Folds per-file outcomes in processing order. `ok` clears on any
    /// failure or any non-empty detection list and never comes back;
    /// skipped files leave the report untouched. `photo` is the last one
    /// any file produced, failed files included. Detections are
    /// concatenated as-is, no dedup, no reordering.
    pub fn from_outcomes(outcomes: Vec<FileOutcome>) -> Self {
        let mut ok = true;
        let mut photo = None;
        let mut detections = Vec::new();

        for outcome in outcomes {
            match outcome {
                FileOutcome::Skipped => {}
                FileOutcome::Failed {
                    detections: found,
                    photo: annotated,
                    ..
                } => {
                    ok = false;
                    detections.extend(found);
                    if let Some(encoded) = annotated {
                        photo = Some(encoded);
                    }
                }
                FileOutcome::Checked {
                    detections: found,
                    photo: annotated,
                } => {
                    if !found.is_empty() {
                        ok = false;
                        detections.extend(found);
                    }
                    if let Some(encoded) = annotated {
                        photo = Some(encoded);
                    }
                }
            }
        }

        Self {
            ok,
            photo: photo.unwrap_or_else(|| NO_PHOTO.to_owned()),
            detections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(confidence: f64) -> Detection {
        Detection {
            class: "scratch".to_owned(),
            confidence,
        }
    }

    #[test]
    fn empty_outcomes_keep_ok_and_sentinel() {
        let report = VerifyReport::from_outcomes(vec![]);
        assert!(report.ok);
        assert_eq!(report.photo, NO_PHOTO);
        assert!(report.detections.is_empty());
    }

    #[test]
    fn skipped_files_do_not_touch_the_report() {
        let report = VerifyReport::from_outcomes(vec![FileOutcome::Skipped, FileOutcome::Skipped]);
        assert!(report.ok);
        assert_eq!(report.photo, NO_PHOTO);
        assert!(report.detections.is_empty());
    }

    #[test]
    fn any_failure_clears_ok_for_good() {
        let report = VerifyReport::from_outcomes(vec![
            FileOutcome::Failed {
                failure: FileFailure::Remote("connection refused".to_owned()),
                detections: vec![],
                photo: None,
            },
            FileOutcome::Checked {
                detections: vec![],
                photo: None,
            },
        ]);
        assert!(!report.ok);
        assert!(report.detections.is_empty());
    }

    #[test]
    fn failed_outcome_keeps_what_the_endpoint_returned() {
        let report = VerifyReport::from_outcomes(vec![FileOutcome::Failed {
            failure: FileFailure::Persist("read-only fs".to_owned()),
            detections: vec![scratch(0.99)],
            photo: Some("data:image/jpeg;base64,AAA=".to_owned()),
        }]);

        assert!(!report.ok);
        assert_eq!(report.detections, vec![scratch(0.99)]);
        assert_eq!(report.photo, "data:image/jpeg;base64,AAA=");
    }

    #[test]
    fn detections_concatenate_in_processing_order() {
        let report = VerifyReport::from_outcomes(vec![
            FileOutcome::Checked {
                detections: vec![scratch(0.91), scratch(0.95)],
                photo: None,
            },
            FileOutcome::Checked {
                detections: vec![scratch(0.91)],
                photo: None,
            },
        ]);
        assert!(!report.ok);
        assert_eq!(
            report.detections,
            vec![scratch(0.91), scratch(0.95), scratch(0.91)]
        );
    }

    #[test]
    fn last_photo_wins() {
        let report = VerifyReport::from_outcomes(vec![
            FileOutcome::Checked {
                detections: vec![],
                photo: Some("first".to_owned()),
            },
            FileOutcome::Checked {
                detections: vec![],
                photo: Some("second".to_owned()),
            },
            FileOutcome::Checked {
                detections: vec![],
                photo: None,
            },
        ]);
        assert!(report.ok);
        assert_eq!(report.photo, "second");
    }

    #[test]
    fn detection_response_deserializes_from_endpoint_json() {
        let body = r#"{
            "ok": false,
            "photo": "data:image/jpeg;base64,AAA=",
            "detections": [{"class": "scratch", "confidence": 0.97}]
        }"#;
        let response: DetectionResponse = serde_json::from_str(body).unwrap();
        assert!(!response.ok);
        assert_eq!(
            response.photo.as_deref(),
            Some("data:image/jpeg;base64,AAA=")
        );
        assert_eq!(response.detections, Some(vec![scratch(0.97)]));
    }

    #[test]
    fn detection_response_fields_are_optional() {
        let response: DetectionResponse = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(response.ok);
        assert_eq!(response.photo, None);
        assert_eq!(response.detections, None);
    }
}
