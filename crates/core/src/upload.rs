//! Acceptance rules for prospect source documents.
//!
//! A file is accepted when its extension is on the allow-list OR its
//! declared MIME type is; the two signals are alternatives, so a spoofed
//! or missing MIME type does not block a well-named file and vice versa.

use crate::error::CoreError;

/// Maximum accepted upload size.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Extensions accepted for prospect documents (lowercase, no dot).
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "zip", "ppt", "pptx"];

/// Broad category of an uploaded prospect document.
///
/// Stored in `prospects.file_type`; both PowerPoint extensions collapse
/// into [`FileKind::Ppt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Zip,
    Ppt,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Zip => "zip",
            FileKind::Ppt => "ppt",
        }
    }

    /// Classify by file extension (without the dot, any case).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "zip" => Some(FileKind::Zip),
            "ppt" | "pptx" => Some(FileKind::Ppt),
            _ => None,
        }
    }

    /// Classify by declared MIME type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(FileKind::Pdf),
            "application/zip" | "application/x-zip-compressed" => Some(FileKind::Zip),
            "application/vnd.ms-powerpoint"
            | "application/vnd.openxmlformats-officedocument.presentationml.presentation" => {
                Some(FileKind::Ppt)
            }
            _ => None,
        }
    }

    /// Parse the value persisted in `prospects.file_type`.
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "pdf" => Some(FileKind::Pdf),
            "zip" => Some(FileKind::Zip),
            "ppt" => Some(FileKind::Ppt),
            _ => None,
        }
    }
}

/// Validate an upload before anything is stored.
///
/// Checks size first, then classifies by extension with the MIME type as
/// a fallback. Returns the resolved [`FileKind`] on acceptance.
pub fn validate_upload(
    file_name: &str,
    mime: Option<&str>,
    size_bytes: u64,
) -> Result<FileKind, CoreError> {
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(format!(
            "File exceeds the 50MB upload limit ({size_bytes} bytes)"
        )));
    }

    let by_extension = file_name
        .rsplit_once('.')
        .and_then(|(_, ext)| FileKind::from_extension(ext));

    let by_mime = mime.and_then(FileKind::from_mime);

    by_extension.or(by_mime).ok_or_else(|| {
        CoreError::Validation(format!(
            "Unsupported file type for '{file_name}'; accepted: PDF, ZIP, PPT/PPTX"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_by_extension_without_mime() {
        assert_eq!(
            validate_upload("brochure.pdf", None, 1024).unwrap(),
            FileKind::Pdf
        );
        assert_eq!(
            validate_upload("assets.ZIP", None, 1024).unwrap(),
            FileKind::Zip
        );
        assert_eq!(
            validate_upload("deck.pptx", None, 1024).unwrap(),
            FileKind::Ppt
        );
    }

    #[test]
    fn accepts_by_mime_without_extension() {
        assert_eq!(
            validate_upload("brochure", Some("application/pdf"), 1024).unwrap(),
            FileKind::Pdf
        );
        assert_eq!(
            validate_upload("archive", Some("application/x-zip-compressed"), 1024).unwrap(),
            FileKind::Zip
        );
    }

    #[test]
    fn extension_wins_over_spoofed_mime() {
        // A misdeclared MIME type must not block a well-named file.
        assert_eq!(
            validate_upload("brochure.pdf", Some("application/octet-stream"), 1024).unwrap(),
            FileKind::Pdf
        );
    }

    #[test]
    fn octet_stream_alone_is_not_enough() {
        let err = validate_upload("payload", Some("application/octet-stream"), 1024);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_unknown_extension_and_mime() {
        let err = validate_upload("malware.exe", Some("application/x-msdownload"), 1024)
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
    }

    #[test]
    fn rejects_oversized_upload() {
        let err = validate_upload("brochure.pdf", None, MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert!(err.to_string().contains("50MB"));
    }

    #[test]
    fn accepts_exactly_at_the_limit() {
        assert!(validate_upload("brochure.pdf", None, MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn both_powerpoint_extensions_collapse_to_ppt() {
        assert_eq!(FileKind::from_extension("ppt"), Some(FileKind::Ppt));
        assert_eq!(FileKind::from_extension("pptx"), Some(FileKind::Ppt));
        assert_eq!(FileKind::Ppt.as_str(), "ppt");
    }
}
