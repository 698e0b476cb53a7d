use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::DocumentService;
use super::extract::{DocumentKind, extract_text};
use crate::config::AppConfig;
use crate::errors::CourseSystemError;
use crate::middlewares::RequireJWT;
use crate::models::ErrorCode;
use crate::models::{ApiResponse, documents::responses::UploadDocumentResponse};
use crate::services::permissions::ensure_course_ownership;

pub async fn handle_upload(
    service: &DocumentService,
    request: &HttpRequest,
    course_id: i64,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    let storage = service.get_storage(request);

    let user = match RequireJWT::extract_user(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user",
            )));
        }
    };

    // 仅课程所有者可上传资料
    if let Err(resp) = ensure_course_ownership(&storage, &user, course_id).await {
        return Ok(resp);
    }

    // 课程专属目录 {upload.dir}/course_{course_id}
    let course_dir: PathBuf = Path::new(&config.upload.dir).join(format!("course_{course_id}"));
    if !course_dir.exists()
        && let Err(e) = fs::create_dir_all(&course_dir)
    {
        tracing::error!("{}", CourseSystemError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "创建上传目录失败",
            )),
        );
    }

    let mut original_name = String::new();
    let mut file_uploaded = false;
    let mut mime_type = String::new();
    let mut file_path = PathBuf::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == "file" {
            if file_uploaded {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::MultifileUploadNotAllowed,
                    "Only one file can be uploaded at a time",
                )));
            }
            file_uploaded = true;

            original_name = content_disposition
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string())
                .unwrap_or_default();

            // 提取扩展名并校验
            let extension = Path::new(&original_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_lowercase())
                .unwrap_or_default();

            let allowed = allowed_types
                .iter()
                .any(|t| t.trim_start_matches('.').to_lowercase() == extension)
                && DocumentKind::from_extension(&extension).is_some();
            if !allowed {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    "File type not allowed",
                )));
            }

            // MIME 类型仅作记录
            mime_type = field
                .content_type()
                .map(|ct| ct.to_string())
                .unwrap_or_default();

            let stored_name = format!(
                "{}-{}.{extension}",
                chrono::Utc::now().timestamp(),
                Uuid::new_v4()
            );
            file_path = course_dir.join(&stored_name);
            let mut f = match File::create(&file_path) {
                Ok(file) => file,
                Err(e) => {
                    tracing::error!("{}", CourseSystemError::file_operation(format!("{e}")));
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::<()>::error_empty(ErrorCode::FileUploadFailed, "文件创建失败"),
                    ));
                }
            };

            let mut total_size: usize = 0;
            while let Some(chunk) = field.next().await {
                let data = chunk?;
                total_size += data.len();
                if total_size > max_size {
                    let _ = fs::remove_file(&file_path);
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileSizeExceeded,
                        "File size exceeds the limit",
                    )));
                }
                f.write_all(&data)?;
            }
        }
    }

    if !file_uploaded {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Missing file field",
        )));
    }

    // 文本抽取是同步 CPU/IO 操作，放到阻塞线程池
    let extract_path = file_path.clone();
    let content = match tokio::task::spawn_blocking(move || extract_text(&extract_path)).await {
        Ok(content) => content,
        Err(e) => {
            tracing::error!("Text extraction task failed: {}", e);
            format!("文本抽取失败: {e}")
        }
    };

    let filepath_str = file_path.to_string_lossy().to_string();
    match storage
        .create_document(
            course_id,
            &original_name,
            &filepath_str,
            Some(&mime_type).filter(|s| !s.is_empty()).map(|s| s.as_str()),
            Some(content.as_str()),
        )
        .await
    {
        Ok(document) => {
            tracing::info!(
                "Document {} uploaded to course {} by user {}",
                original_name,
                course_id,
                user.id
            );
            let content_length = content.chars().count();
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UploadDocumentResponse {
                    document,
                    content_length,
                },
                "Document uploaded successfully",
            )))
        }
        Err(e) => {
            tracing::error!("Failed to save document record: {}", e);
            let _ = fs::remove_file(&file_path);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Failed to save document",
                )),
            )
        }
    }
}
