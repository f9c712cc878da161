use crate::domain::VerifyResponse;
use crate::error::{ApiError, ErrorResponse};
use axum::Json;
use axum::extract::{Multipart, State};
use std::sync::Arc;
use verifier::detector::CarDetector;
use verifier::image::PublicDirSink;
use verifier::io::UploadedFile;
use verifier::verify::CarVerifier;

pub type Verifier = CarVerifier<CarDetector, PublicDirSink>;

#[utoipa::path(
    post,
    path = "/car-verif",
    tag = "car verification",
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "One or more car photo files"),
    responses(
        (status = 200, description = "Returns the aggregated verdict over all uploaded photos", body = VerifyResponse),
        (status = 400, description = "Returns an error when the multipart body is malformed", body = ErrorResponse)
    )
)]
pub async fn verify(
    State(verifier): State<Arc<Verifier>>,
    mut multipart: Multipart,
) -> Result<Json<VerifyResponse>, ApiError> {
    let mut files = Vec::new();
    // field names are not constrained, every file part is taken as-is
    while let Some(field) = multipart.next_field().await? {
        let file_name = field.file_name().unwrap_or_default().to_owned();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();
        let bytes = field.bytes().await?;
        files.push(UploadedFile {
            bytes,
            file_name,
            content_type,
        });
    }

    let report = verifier.verify(&files).await;
    Ok(Json(report.into()))
}
