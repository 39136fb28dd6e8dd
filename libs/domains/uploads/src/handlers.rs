use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{
    Actor, AppError, UuidPath,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, PayloadTooLargeResponse,
        UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::UploadResult;
use crate::models::Upload;
use crate::repository::UploadRepository;
use crate::service::UploadService;
use crate::storage::FileStorage;

pub const TAG: &str = "Uploads";

/// Multipart form with a single `file` part
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[derive(OpenApi)]
#[openapi(
    paths(upload_file, list_uploads, get_upload, download_upload, stream_upload, delete_upload),
    components(
        schemas(Upload, UploadForm),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            PayloadTooLargeResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "File uploads"))
)]
pub struct ApiDoc;

type SharedService<R, S> = Arc<UploadService<R, S>>;

pub fn router<R, S>(service: UploadService<R, S>) -> Router
where
    R: UploadRepository + 'static,
    S: FileStorage + 'static,
{
    // Room for the multipart envelope around the file itself
    let body_limit = service.max_bytes() + 64 * 1024;

    Router::new()
        .route("/", get(list_uploads).post(upload_file))
        .route("/{id}", get(get_upload).delete(delete_upload))
        .route("/{id}/download", get(download_upload))
        .route("/{id}/stream", get(stream_upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(Arc::new(service))
}

/// Upload a file
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File stored", body = Upload),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_file<R: UploadRepository, S: FileStorage>(
    State(service): State<SharedService<R, S>>,
    actor: Actor,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let upload = service
            .upload(
                Some(actor.user_id),
                &file_name,
                content_type.as_deref(),
                &bytes,
            )
            .await?;
        return Ok((StatusCode::CREATED, Json(upload)));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}

/// List uploads, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Uploads", body = Vec<Upload>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_uploads<R: UploadRepository, S: FileStorage>(
    State(service): State<SharedService<R, S>>,
) -> UploadResult<Json<Vec<Upload>>> {
    Ok(Json(service.list().await?))
}

/// Upload metadata
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Upload ID")),
    responses(
        (status = 200, description = "Upload found", body = Upload),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_upload<R: UploadRepository, S: FileStorage>(
    State(service): State<SharedService<R, S>>,
    UuidPath(id): UuidPath,
) -> UploadResult<Json<Upload>> {
    Ok(Json(service.get(id).await?))
}

/// Download as an attachment under its original name
#[utoipa::path(
    get,
    path = "/{id}/download",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Upload ID")),
    responses(
        (status = 200, description = "File contents", content_type = "application/octet-stream"),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn download_upload<R: UploadRepository, S: FileStorage>(
    State(service): State<SharedService<R, S>>,
    UuidPath(id): UuidPath,
) -> UploadResult<Response> {
    let (upload, bytes) = service.download(id).await?;
    let disposition = format!("attachment; filename=\"{}\"", upload.name.replace('"', "_"));
    Ok(file_response(&upload.content_type, Some(&disposition), bytes))
}

/// Serve inline, e.g. as an `<img>` source
#[utoipa::path(
    get,
    path = "/{id}/stream",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Upload ID")),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn stream_upload<R: UploadRepository, S: FileStorage>(
    State(service): State<SharedService<R, S>>,
    UuidPath(id): UuidPath,
) -> UploadResult<Response> {
    let (upload, bytes) = service.download(id).await?;
    Ok(file_response(&upload.content_type, None, bytes))
}

/// Soft-delete an upload (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Upload ID")),
    responses(
        (status = 204, description = "Upload deleted"),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_upload<R: UploadRepository, S: FileStorage>(
    State(service): State<SharedService<R, S>>,
    actor: Actor,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, AppError> {
    actor.require_admin()?;
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn file_response(content_type: &str, disposition: Option<&str>, bytes: Vec<u8>) -> Response {
    let content_type = HeaderValue::from_str(content_type)
        .unwrap_or(HeaderValue::from_static("application/octet-stream"));

    let mut response = (StatusCode::OK, bytes).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type);
    if let Some(value) = disposition.and_then(|d| HeaderValue::from_str(d).ok()) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    response
}
