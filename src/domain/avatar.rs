use std::fmt;

use serde::Serialize;

/// Multipart field name the avatar endpoint expects.
pub const AVATAR_FIELD: &str = "avatar";

const FALLBACK_FILE_NAME: &str = "avatar.jpg";

/// Where a new avatar image comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureSource {
    Camera,
    Library,
}

impl fmt::Display for CaptureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureSource::Camera => f.write_str("camera"),
            CaptureSource::Library => f.write_str("library"),
        }
    }
}

/// Single completion event of a capture attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureResult {
    Cancelled,
    Errored(String),
    Success { uri: String, file_name: String },
}

impl CaptureResult {
    pub fn success(uri: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self::Success {
            uri: uri.into(),
            file_name: file_name.into(),
        }
    }
}

/// A binary part of a multipart request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePart {
    pub uri: String,
    #[serde(rename = "name")]
    pub file_name: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

/// Multipart request carrying exactly one image part named [`AVATAR_FIELD`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    field: &'static str,
    part: ImagePart,
}

impl AvatarUpload {
    /// Builds the upload request from a successful capture.
    ///
    /// An empty file name falls back to the last path segment of the uri.
    pub fn from_capture(uri: impl Into<String>, file_name: impl Into<String>) -> Self {
        let uri = uri.into();
        let mut file_name = file_name.into();
        if file_name.trim().is_empty() {
            file_name = uri
                .rsplit('/')
                .next()
                .filter(|segment| !segment.is_empty() && segment.contains('.'))
                .unwrap_or(FALLBACK_FILE_NAME)
                .to_string();
        }
        let content_type = image_content_type(&file_name).to_string();

        Self {
            field: AVATAR_FIELD,
            part: ImagePart {
                uri,
                file_name,
                content_type,
            },
        }
    }

    pub fn field(&self) -> &str {
        self.field
    }

    pub fn part(&self) -> &ImagePart {
        &self.part
    }

    pub fn file_name(&self) -> &str {
        &self.part.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.part.content_type
    }
}

/// Maps a file extension to an `image/*` type. Unknown extensions are sent as JPEG.
fn image_content_type(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" | "heif" => "image/heic",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_uses_avatar_field_and_capture_name() {
        let upload = AvatarUpload::from_capture("file:///tmp/photo.jpg", "photo.jpg");
        assert_eq!(upload.field(), "avatar");
        assert_eq!(upload.file_name(), "photo.jpg");
        assert_eq!(upload.content_type(), "image/jpeg");
        assert_eq!(upload.part().uri, "file:///tmp/photo.jpg");
    }

    #[test]
    fn test_content_type_follows_extension() {
        assert_eq!(AvatarUpload::from_capture("u", "shot.PNG").content_type(), "image/png");
        assert_eq!(AvatarUpload::from_capture("u", "noext").content_type(), "image/jpeg");
    }

    #[test]
    fn test_missing_file_name_falls_back() {
        let from_uri = AvatarUpload::from_capture("content://media/IMG_01.heic", "");
        assert_eq!(from_uri.file_name(), "IMG_01.heic");
        assert_eq!(from_uri.content_type(), "image/heic");

        let fallback = AvatarUpload::from_capture("content://media/42", " ");
        assert_eq!(fallback.file_name(), "avatar.jpg");
    }
}
