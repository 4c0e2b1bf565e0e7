//! WOFF2 encoding for subsetted web fonts.
//!
//! Wraps the `ttf2woff2` encoder at maximal Brotli quality and knows which
//! code points must be kept out of a subset before encoding.
//!
//! # Example
//!
//! ```no_run
//! use hanzi_font_woff2::convert_to_woff2;
//!
//! let sfnt_data: &[u8] = &[];
//! let woff2_data = convert_to_woff2(sfnt_data).unwrap();
//! ```

use anyhow::{Result, anyhow, bail};
use ttf2woff2::{BrotliQuality, encode};

/// Codepoints known to cause WOFF2 OTS validation errors.
///
/// U+F8FF (Apple logo) references `.notdef` as a composite component,
/// which Chrome's OTS parser rejects during WOFF2 decompression.
pub const PROBLEMATIC_CODEPOINTS: &[u32] = &[0xF8FF];

/// sfnt version tags accepted as encoder input.
const SFNT_VERSIONS: &[[u8; 4]] = &[[0x00, 0x01, 0x00, 0x00], *b"OTTO", *b"true"];

/// Returns `true` if `c` may be requested in a subset destined for WOFF2.
pub fn is_encodable(c: char) -> bool {
    !PROBLEMATIC_CODEPOINTS.contains(&(c as u32))
}

/// Converts TrueType or CFF-flavored OpenType data to WOFF2.
///
/// The default Brotli quality of the encoder is its maximum (11).
pub fn convert_to_woff2(data: &[u8]) -> Result<Vec<u8>> {
    let Some(version) = data.get(..4) else {
        bail!("Font data too short ({} bytes)", data.len());
    };
    if !SFNT_VERSIONS.iter().any(|v| v == version) {
        bail!("Unsupported sfnt version {version:02X?}");
    }

    encode(data, BrotliQuality::default()).map_err(|e| anyhow!("WOFF2 encoding failed: {e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problematic_codepoints() {
        assert!(PROBLEMATIC_CODEPOINTS.contains(&0xF8FF));
        assert!(!is_encodable('\u{F8FF}'));
        assert!(is_encodable('測'));
    }

    #[test]
    fn test_rejects_truncated_data() {
        let err = convert_to_woff2(&[0x00, 0x01]).unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_rejects_non_sfnt_data() {
        let err = convert_to_woff2(b"wOF2\x00\x01\x00\x00").unwrap_err();
        assert!(err.to_string().contains("Unsupported sfnt version"));
    }
}
