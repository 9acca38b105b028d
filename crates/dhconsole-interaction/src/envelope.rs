//! Decoding of the base64 `message` field of command responses.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use dhconsole_core::{ConsoleError, Result};

/// Base64-decodes `message` and reads the bytes as UTF-8.
///
/// Invalid sequences become U+FFFD instead of failing the whole response.
pub fn decode_message(message: &str) -> Result<String> {
    let bytes = BASE64_STANDARD
        .decode(message.trim())
        .map_err(|e| ConsoleError::protocol(0, format!("Undecodable response message: {e}")))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multibyte_text_survives() {
        let text = "主线任务 1000101\nПривет สวัสดี Tiếng Việt";
        let encoded = BASE64_STANDARD.encode(text.as_bytes());
        assert_eq!(decode_message(&encoded).unwrap(), text);
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(decode_message("").unwrap(), "");
    }

    #[test]
    fn test_invalid_base64() {
        assert!(decode_message("not base64!").unwrap_err().is_protocol());
    }
}
