//! File type allow-list for certificate uploads.

use super::upload::UploadError;

/// Extensions accepted for certificate images, lowercase with leading dot.
pub const ALLOWED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];

/// Lowercased extension of `file_name` including the dot, e.g. `".png"`.
///
/// Only the last path component is considered, so client-supplied paths
/// like `C:\scans\cert.PNG` resolve to `".png"`.
pub fn extension_of(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let (_, ext) = base.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(format!(".{}", ext.to_lowercase()))
}

/// The allowed extension of `file_name`, or [`UploadError::InvalidFileType`].
pub fn validate_extension(file_name: &str) -> Result<String, UploadError> {
    match extension_of(file_name) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(ext),
        other => Err(UploadError::InvalidFileType { extension: other }),
    }
}
