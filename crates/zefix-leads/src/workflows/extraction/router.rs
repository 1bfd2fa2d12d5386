use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Local;

use super::{ExtractionRequest, ExtractionResponse, ExtractionService};
use crate::error::AppError;
use crate::workflows::registry::RegistryClient;

/// Router builder exposing the extraction endpoint at `/`.
pub fn extraction_router<C>(service: Arc<ExtractionService<C>>) -> Router
where
    C: RegistryClient + 'static,
{
    Router::new()
        .route("/", post(extract_handler::<C>).options(preflight_handler))
        .layer(middleware::map_response(allow_any_origin))
        .with_state(service)
}

/// Stamp `Access-Control-Allow-Origin: *` on every response.
pub async fn allow_any_origin(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

pub(crate) async fn preflight_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

/// The body is decoded by hand so that malformed JSON reaches the caller as
/// the same error envelope as any other failure.
pub(crate) async fn extract_handler<C>(
    State(service): State<Arc<ExtractionService<C>>>,
    body: Bytes,
) -> Result<Json<ExtractionResponse>, AppError>
where
    C: RegistryClient + 'static,
{
    let request = ExtractionRequest::from_body(&body)?;
    let today = Local::now().date_naive();
    let output = service.run(request, today).await?;
    Ok(Json(output.into_response_body()))
}
