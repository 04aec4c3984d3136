use axum::body::Bytes;
use axum::extract::Multipart;
use mogost_common::ToolkitError;
use tracing::debug;

use crate::error::ServerResult;

/// A file part of a multipart request, held in memory only
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

/// Drain a multipart body and keep the file parts named `field_name`, in order.
/// Parts without a file name are plain form fields and are skipped.
pub async fn collect_files(
    mut multipart: Multipart,
    field_name: &str,
) -> ServerResult<Vec<UploadedFile>> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(field_name) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field.bytes().await.map_err(upload_error)?;
        debug!("Received upload {} ({} bytes)", file_name, data.len());
        files.push(UploadedFile { file_name, data });
    }

    Ok(files)
}

fn upload_error(err: axum::extract::multipart::MultipartError) -> crate::ServerError {
    debug!("Multipart read failed: {}", err);
    ToolkitError::Upload("failed to retrieve uploaded files".to_string()).into()
}
