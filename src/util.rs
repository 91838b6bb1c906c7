//! Shared helpers for decoding archived page bytes.

use std::borrow::Cow;

/// Decode raw page bytes to text.
///
/// Tries UTF-8 first (handles BOM automatically via encoding_rs) and
/// falls back to Windows-1252, which covers most pre-Unicode archive
/// dumps. Uses `Cow<str>` to avoid allocation when the input is valid
/// UTF-8.
pub(crate) fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}
