use std::borrow::Cow;

/// Interpret `raw` as UTF-8, replacing every invalid sequence with U+FFFD.
///
/// Valid input is borrowed unchanged; this never fails.
pub fn normalize(raw: &[u8]) -> Cow<'_, str> {
    let text = String::from_utf8_lossy(raw);
    if let Cow::Owned(_) = text {
        tracing::debug!(
            "Repaired invalid UTF-8 in response body ({} bytes)",
            raw.len()
        );
    }
    text
}
