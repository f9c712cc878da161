use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct VerifyResponse {
    pub ok: bool,
    #[schema(example = "data:image/jpeg;base64,...")]
    pub photo: String,
    pub detections: Vec<Detection>,
}

#[derive(Serialize, ToSchema)]
pub struct Detection {
    pub class: String,
    pub confidence: f64,
}

impl From<verifier::io::VerifyReport> for VerifyResponse {
    fn from(value: verifier::io::VerifyReport) -> Self {
        Self {
            ok: value.ok,
            photo: value.photo,
            detections: value.detections.into_iter().map(|x| x.into()).collect(),
        }
    }
}

impl From<verifier::io::Detection> for Detection {
    fn from(value: verifier::io::Detection) -> Self {
        Self {
            class: value.class,
            confidence: value.confidence,
        }
    }
}
