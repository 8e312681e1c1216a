//! Reads user-picked documents for analysis.

use std::path::Path;

use vitalis_core::error::{Result, VitalisError};
use vitalis_core::generation::DocumentUpload;

/// Extensions accepted by the analysis upload.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

/// Infers the MIME type from a filename extension.
fn infer_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}

/// Loads a PDF or image file. The media type comes from the extension only.
pub async fn load_document(path: &Path) -> Result<DocumentUpload> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(VitalisError::validation(format!(
            "Unsupported file type '{}'. Upload a PDF, JPG, JPEG or PNG file.",
            path.display()
        )));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| VitalisError::io(format!("Failed to read {}: {e}", path.display())))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::debug!(file = %file_name, size = bytes.len(), "loaded upload");
    Ok(DocumentUpload::new(file_name, infer_mime_type(path), bytes))
}
