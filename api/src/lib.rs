use utoipa::OpenApi;

pub mod domain;
pub mod error;
pub mod routes;

#[derive(OpenApi)]
#[openapi(paths(crate::routes::car_verif::verify))]
pub struct Docs;
