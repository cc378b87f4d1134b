//! Binary payloads: print artifacts, photos and scan uploads.

use std::path::Path;

/// A binary response body with enough metadata to save it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub file_name: String,
}

impl Download {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Which portal's print endpoint to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintScope {
    #[default]
    Admin,
    Hr,
}

impl PrintScope {
    pub(crate) fn prefix(&self) -> &'static str {
        match self {
            PrintScope::Admin => "admin",
            PrintScope::Hr => "hr",
        }
    }
}

/// Gate scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    Exit,
    Return,
}

impl ScanKind {
    pub(crate) fn endpoint(&self) -> &'static str {
        match self {
            ScanKind::Exit => "scan-exit",
            ScanKind::Return => "scan-return",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanKind::Exit => "exit",
            ScanKind::Return => "return",
        }
    }
}

/// Photo attached to an exit/return scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ScanImage {
    /// Build an upload, guessing the content type from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_image_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read an image from disk.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "capture.jpg".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

fn guess_image_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// File name from a `Content-Disposition` header, if it names a usable one.
///
/// An RFC 5987 `filename*` value wins over a plain `filename`. Names that
/// reduce to nothing, `.` or `..` once directories are stripped are ignored.
pub(crate) fn disposition_file_name(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;
    for part in header.split(';').map(str::trim) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.eq_ignore_ascii_case("filename*") {
            extended = decode_ext_value(value.trim());
        } else if key.eq_ignore_ascii_case("filename") {
            plain = Some(value.trim().trim_matches('"').to_string());
        }
    }
    extended
        .as_deref()
        .and_then(safe_file_name)
        .or_else(|| plain.as_deref().and_then(safe_file_name))
}

/// `UTF-8'lang'percent-encoded` to text. Other charsets are not supported.
fn decode_ext_value(value: &str) -> Option<String> {
    let mut fields = value.splitn(3, '\'');
    let charset = fields.next()?;
    let _lang = fields.next()?;
    let encoded = fields.next()?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }

    let raw = encoded.as_bytes();
    let mut bytes = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'%' {
            let hex = raw.get(i + 1..i + 3)?;
            if !hex.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            let hex = std::str::from_utf8(hex).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            bytes.push(raw[i]);
            i += 1;
        }
    }
    String::from_utf8(bytes).ok()
}

fn safe_file_name(value: &str) -> Option<String> {
    // Never let the server pick a directory.
    let name = value.rsplit(['/', '\\']).next().unwrap_or(value).trim();
    match name {
        "" | "." | ".." => None,
        _ => Some(name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(ScanImage::new("gate.JPG", vec![]).content_type, "image/jpeg");
        assert_eq!(ScanImage::new("gate.png", vec![]).content_type, "image/png");
        assert_eq!(ScanImage::new("gate", vec![]).content_type, "application/octet-stream");
    }

    #[test]
    fn disposition_file_name_is_extracted() {
        assert_eq!(
            disposition_file_name(r#"attachment; filename="GP-2025-0001.pdf""#).as_deref(),
            Some("GP-2025-0001.pdf")
        );
        assert_eq!(
            disposition_file_name("inline; filename=pass.pdf").as_deref(),
            Some("pass.pdf")
        );
        assert_eq!(
            disposition_file_name(r#"attachment; filename="../../etc/passwd""#).as_deref(),
            Some("passwd")
        );
        assert_eq!(disposition_file_name("inline"), None);
    }

    #[test]
    fn dot_names_are_rejected() {
        assert_eq!(disposition_file_name(r#"attachment; filename="..""#), None);
        assert_eq!(disposition_file_name("attachment; filename=."), None);
        assert_eq!(disposition_file_name(r#"attachment; filename="reports/..""#), None);
        assert_eq!(disposition_file_name(r#"attachment; filename="""#), None);
    }

    #[test]
    fn extended_file_name_is_decoded_and_preferred() {
        assert_eq!(
            disposition_file_name("attachment; filename*=UTF-8''r%C3%A9sum%C3%A9.pdf").as_deref(),
            Some("résumé.pdf")
        );
        assert_eq!(
            disposition_file_name(
                "attachment; filename=\"fallback.pdf\"; filename*=utf-8'en'GP%20001.pdf"
            )
            .as_deref(),
            Some("GP 001.pdf")
        );
        // An unusable extended name falls back to the plain one.
        assert_eq!(
            disposition_file_name("attachment; filename=\"pass.pdf\"; filename*=UTF-8''..")
                .as_deref(),
            Some("pass.pdf")
        );
        assert_eq!(
            disposition_file_name("attachment; filename*=ISO-8859-1''caf%E9.pdf"),
            None
        );
        assert_eq!(disposition_file_name("attachment; filename*=UTF-8''bad%zz"), None);
    }
}
