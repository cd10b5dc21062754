use bytes::Bytes;

use crate::log;

const SLASH: Bytes = Bytes::from_static(b"/");

/// Extract path from request target.
///
/// If the input starts with `http://` or `https://`, the scheme and everything up to the next
/// `/` is dropped. Any other input is returned as is. Empty result is replaced with `/`.
///
/// This is not a URI parser: scheme match is case sensitive, and userinfo or IPv6 host are not
/// recognized. A query that directly follows the authority is dropped along with it.
///
/// # Examples
///
/// ```
/// use urlcodec::path::extract_path;
/// assert_eq!(extract_path(b"http://example.com:8080/path"), "/path");
/// assert_eq!(extract_path(b"http://example.com"), "/");
/// assert_eq!(extract_path(b"/path"), "/path");
/// assert_eq!(extract_path(b""), "/");
/// ```
pub fn extract_path(bytes: &[u8]) -> Bytes {
    match strip_authority(bytes) {
        [] => SLASH,
        path => Bytes::copy_from_slice(path),
    }
}

/// Extract path from request target as [`Bytes`], see [`extract_path`].
///
/// The returned bytes is a shallow slice of the input.
pub fn extract_path_from(bytes: Bytes) -> Bytes {
    match strip_authority(&bytes) {
        [] => SLASH,
        path => bytes.slice_ref(path),
    }
}

fn strip_authority(bytes: &[u8]) -> &[u8] {
    let Some(rest) = bytes
        .strip_prefix(b"http://")
        .or_else(|| bytes.strip_prefix(b"https://"))
    else {
        return bytes;
    };

    let path = match rest.iter().position(|e| *e == b'/') {
        Some(nth) => &rest[nth..],
        None => &rest[rest.len()..],
    };

    log::trace!("authority stripped from request target, {} bytes left", path.len());

    path
}

#[test]
fn test_strip_authority() {
    assert_eq!(strip_authority(b"https://example.com/a/b?c"), b"/a/b?c");
    assert_eq!(strip_authority(b"http://a/"), b"/");
    assert_eq!(strip_authority(b"http://"), b"");
    assert_eq!(strip_authority(b"http://example.com?q=1"), b"");

    // literal prefix only
    assert_eq!(strip_authority(b"HTTP://example.com/a"), b"HTTP://example.com/a");
    assert_eq!(strip_authority(b"ftp://example.com/a"), b"ftp://example.com/a");
    assert_eq!(strip_authority(b"http:/example.com/a"), b"http:/example.com/a");
}
