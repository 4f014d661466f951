/// Image types accepted by the upload endpoint, with the extension used
/// when the client sends no usable file name.
const ALLOWED_TYPES: [(&str, &str); 5] = [
    ("image/jpeg", ".jpg"),
    ("image/jpg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/webp", ".webp"),
];

/// Extensions a stored image may carry. Anything else would be served from
/// the public directory under a non-image type.
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Check an upload before anything touches the disk. Returns the default
/// extension for the content type.
pub fn validate_upload(content_type: &str, len: usize, max_bytes: usize) -> Result<&'static str, String> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    let Some((_, ext)) = ALLOWED_TYPES.iter().find(|(t, _)| *t == mime) else {
        return Err("Unsupported file type. Allowed: JPEG, PNG, GIF, WebP".to_string());
    };
    if len == 0 {
        return Err("File is empty".to_string());
    }
    if len > max_bytes {
        return Err(format!("File is too large. Maximum size: {} MB", max_bytes / (1024 * 1024)));
    }
    Ok(ext)
}

/// Extension of the client's file name, lowercased with the leading dot,
/// if it is one of [`IMAGE_EXTENSIONS`].
fn safe_extension(original_name: &str) -> Option<String> {
    let base = original_name.rsplit(['/', '\\']).next()?;
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    let ext = ext.to_ascii_lowercase();
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    Some(format!(".{ext}"))
}

/// `<millis>-<random><ext>`; the extension comes from the client's file
/// name when it is safe, otherwise from the content type.
pub fn stored_file_name(
    original_name: Option<&str>,
    default_ext: &str,
    millis: i64,
    random: &str,
) -> String {
    let ext = original_name
        .and_then(safe_extension)
        .unwrap_or_else(|| default_ext.to_string());
    format!("{millis}-{random}{ext}")
}

/// Public URL of a stored image.
pub fn image_url(file_name: &str) -> String {
    format!("/images/{file_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_image_types() {
        assert_eq!(validate_upload("image/png", 10, MAX_UPLOAD_BYTES), Ok(".png"));
        assert_eq!(validate_upload("image/JPEG; charset=binary", 10, MAX_UPLOAD_BYTES), Ok(".jpg"));
    }

    #[test]
    fn rejects_other_types_empty_and_oversized() {
        assert!(validate_upload("application/pdf", 10, MAX_UPLOAD_BYTES).is_err());
        assert!(validate_upload("image/svg+xml", 10, MAX_UPLOAD_BYTES).is_err());
        assert!(validate_upload("image/png", 0, MAX_UPLOAD_BYTES).is_err());
        let err = validate_upload("image/png", MAX_UPLOAD_BYTES + 1, MAX_UPLOAD_BYTES).unwrap_err();
        assert!(err.contains("10 MB"), "{err}");
    }

    #[test]
    fn file_name_keeps_safe_client_extension() {
        let name = stored_file_name(Some("Photo.JPEG"), ".jpg", 1769357436952, "ab12");
        assert_eq!(name, "1769357436952-ab12.jpeg");
    }

    #[test]
    fn file_name_ignores_unsafe_extensions() {
        for bad in [
            "../../etc/passwd",
            "x.p/hp",
            "noext",
            ".hidden",
            "a.toolongext",
            "a.ph p",
            "x.html",
            "x.svg",
            "x.HTM",
            "photo.png.js",
        ] {
            let name = stored_file_name(Some(bad), ".png", 1, "r");
            assert_eq!(name, "1-r.png", "for {bad}");
        }
        assert_eq!(stored_file_name(None, ".gif", 1, "r"), "1-r.gif");
    }

    #[test]
    fn url_points_under_images() {
        assert_eq!(image_url("1-r.png"), "/images/1-r.png");
    }
}
