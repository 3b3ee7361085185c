use actix_multipart::{Field, Multipart};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{error, info};
use uuid::Uuid;

use super::MaterialService;
use crate::config::AppConfig;
use crate::errors::PrepEaseError;
use crate::models::materials::entities::MaterialFileType;
use crate::models::materials::requests::NewMaterial;
use crate::models::materials::responses::MaterialResponse;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    ai_client_from_request, bad_request, current_user, find_course, internal_error,
    require_course_teacher,
};
use crate::try_respond;
use crate::utils::validate_magic_bytes;

// 文本字段的最大字节数
const MAX_TEXT_FIELD: usize = 1024;

/// 已写入磁盘的上传文件
struct StoredUpload {
    original_name: String,
    stored_name: String,
    file_type: MaterialFileType,
}

pub async fn handle_upload(
    service: &MaterialService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let config = AppConfig::get();
    let upload_dir = Path::new(&config.upload.dir);

    // 确保上传目录存在
    if let Err(e) = tokio::fs::create_dir_all(upload_dir).await {
        error!("{}", PrepEaseError::file_operation(format!("{e}")));
        return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::FileUploadFailed,
            "Failed to prepare upload directory",
        )));
    }

    let mut course_id: Option<String> = None;
    let mut title: Option<String> = None;
    let mut upload: Option<StoredUpload> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        match name.as_str() {
            "course_id" | "title" => {
                let value = match read_text_field(&mut field).await {
                    Ok(value) => value,
                    Err(response) => {
                        if let Some(stored) = &upload {
                            remove_upload(upload_dir, &stored.stored_name).await;
                        }
                        return Ok(response);
                    }
                };
                if name == "course_id" {
                    course_id = Some(value);
                } else {
                    title = Some(value);
                }
            }
            "file" => {
                if let Some(previous) = &upload {
                    remove_upload(upload_dir, &previous.stored_name).await;
                    return Ok(bad_request(
                        ErrorCode::MultifileUploadNotAllowed,
                        "Only one file can be uploaded at a time",
                    ));
                }
                upload = Some(try_respond!(
                    store_file(
                        &mut field,
                        upload_dir,
                        &config.upload.allowed_types,
                        config.upload.max_size,
                    )
                    .await
                ));
            }
            _ => {}
        }
    }

    let Some(upload) = upload else {
        return Ok(bad_request(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        ));
    };

    // 之后任何失败都要清理已写入的文件
    let response = register_material(service, request, &user, course_id, title, &upload).await;
    if !response.status().is_success() {
        remove_upload(upload_dir, &upload.stored_name).await;
    }
    Ok(response)
}

async fn register_material(
    service: &MaterialService,
    request: &HttpRequest,
    user: &User,
    course_id: Option<String>,
    title: Option<String>,
    upload: &StoredUpload,
) -> HttpResponse {
    let Some(course_id) = course_id.and_then(|raw| raw.trim().parse::<i64>().ok()) else {
        return bad_request(ErrorCode::BadRequest, "A valid course_id is required");
    };
    let title = title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| default_title(&upload.original_name));
    if title.chars().count() > 200 {
        return bad_request(
            ErrorCode::BadRequest,
            "Title length must be between 1 and 200 characters",
        );
    }

    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(response) => return response,
    };
    if let Err(response) = find_course(&storage, course_id).await {
        return response;
    }
    if let Err(response) = require_course_teacher(&storage, course_id, user).await {
        return response;
    }
    let ai = match ai_client_from_request(request) {
        Ok(ai) => ai,
        Err(response) => return response,
    };

    let material = match storage
        .create_material(NewMaterial {
            course_id,
            uploaded_by: user.id,
            title,
            file_name: upload.original_name.clone(),
            stored_name: upload.stored_name.clone(),
            file_type: upload.file_type,
        })
        .await
    {
        Ok(material) => material,
        Err(e) => return internal_error("Failed to save material", e),
    };

    info!(
        "Material {} uploaded to course {} by user {}",
        material.id, course_id, user.id
    );

    if let Err(e) = service.pipeline(storage, ai).start(material.clone()).await {
        // 资料记录已保存，可通过 reprocess 重试
        error!("Failed to start processing material {}: {e}", material.id);
    }

    HttpResponse::Created().json(ApiResponse::success(
        MaterialResponse { material },
        "Material uploaded, processing started",
    ))
}

async fn read_text_field(field: &mut Field) -> Result<String, HttpResponse> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| bad_request(ErrorCode::BadRequest, format!("{e}")))?;
        bytes.extend_from_slice(&data);
        if bytes.len() > MAX_TEXT_FIELD {
            return Err(bad_request(ErrorCode::BadRequest, "Form field is too long"));
        }
    }
    String::from_utf8(bytes)
        .map_err(|_| bad_request(ErrorCode::BadRequest, "Form field must be valid UTF-8"))
}

/// 校验扩展名、魔术字节与大小并写入磁盘
async fn store_file(
    field: &mut Field,
    upload_dir: &Path,
    allowed_types: &[String],
    max_size: usize,
) -> Result<StoredUpload, HttpResponse> {
    let original_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .map(|s| s.to_string())
        .unwrap_or_default();

    let extension = Path::new(&original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default();

    let file_type = match MaterialFileType::from_extension(&extension) {
        Some(file_type) if allowed_types.iter().any(|t| t.to_lowercase() == extension) => file_type,
        _ => {
            return Err(bad_request(
                ErrorCode::FileTypeNotAllowed,
                "File type not allowed",
            ));
        }
    };

    let stored_name = format!(
        "{}-{}{}",
        chrono::Utc::now().timestamp(),
        Uuid::new_v4(),
        file_type.extension()
    );
    let file_path = upload_dir.join(&stored_name);
    let mut file = tokio::fs::File::create(&file_path).await.map_err(|e| {
        error!("{}", PrepEaseError::file_operation(format!("{e}")));
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::FileUploadFailed,
            "Failed to create file",
        ))
    })?;

    let mut total_size: usize = 0;
    let mut first_chunk = true;
    let rejected = |code: ErrorCode, msg: &str| bad_request(code, msg.to_string());

    while let Some(chunk) = field.next().await {
        let data = match chunk {
            Ok(data) => data,
            Err(e) => {
                let _ = tokio::fs::remove_file(&file_path).await;
                return Err(bad_request(ErrorCode::FileUploadFailed, format!("{e}")));
            }
        };

        // 第一个 chunk 时验证魔术字节
        if first_chunk {
            first_chunk = false;
            if !validate_magic_bytes(&data, file_type) {
                let _ = tokio::fs::remove_file(&file_path).await;
                return Err(rejected(
                    ErrorCode::FileTypeNotAllowed,
                    "File content does not match its extension",
                ));
            }
        }

        total_size += data.len();
        if total_size > max_size {
            let _ = tokio::fs::remove_file(&file_path).await;
            return Err(rejected(
                ErrorCode::FileSizeExceeded,
                "File size exceeds the limit",
            ));
        }

        if let Err(e) = file.write_all(&data).await {
            error!("{}", PrepEaseError::file_operation(format!("{e}")));
            let _ = tokio::fs::remove_file(&file_path).await;
            return Err(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                "Failed to write file",
            )));
        }
    }

    if total_size == 0 {
        let _ = tokio::fs::remove_file(&file_path).await;
        return Err(rejected(ErrorCode::FileUploadFailed, "Uploaded file is empty"));
    }
    if let Err(e) = file.flush().await {
        error!("{}", PrepEaseError::file_operation(format!("{e}")));
    }

    Ok(StoredUpload {
        original_name,
        stored_name,
        file_type,
    })
}

pub(crate) async fn remove_upload(upload_dir: &Path, stored_name: &str) {
    if let Err(e) = tokio::fs::remove_file(upload_dir.join(stored_name)).await {
        tracing::warn!("Failed to remove uploaded file {stored_name}: {e}");
    }
}

/// 未填写标题时使用去掉扩展名的文件名
fn default_title(original_name: &str) -> String {
    Path::new(original_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("Untitled material")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_title() {
        assert_eq!(default_title("lecture-01.pdf"), "lecture-01");
        assert_eq!(default_title("notes.v2.md"), "notes.v2");
        assert_eq!(default_title(""), "Untitled material");
    }
}
