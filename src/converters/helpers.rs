use base64::{Engine as _, engine::general_purpose::STANDARD};

/// MIME type assumed for images that arrive already base64-encoded.
pub const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn data_url(mime_type: &str, base64: &str) -> String {
    format!("data:{};base64,{}", mime_type, base64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_mime() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("image/svg+xml"));
        assert!(!is_image_mime("text/plain"));
        assert!(!is_image_mime("application/octet-stream"));
        assert!(!is_image_mime("IMAGE/PNG"));
        assert!(!is_image_mime(""));
    }

    #[test]
    fn test_data_url() {
        let encoded = encode_base64(b"\x89PNG");
        assert_eq!(encoded, "iVBORw==");
        assert_eq!(data_url("image/png", &encoded), "data:image/png;base64,iVBORw==");
    }
}
