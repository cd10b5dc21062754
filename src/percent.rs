//! Percent encoding primitives.
//!
//! Encoding always emits uppercase hex digits. Decoding is total: a `%` that is not followed by
//! two hex digits is copied as is, and the output is never longer than the input.
use bytes::{Bytes, BytesMut};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode, percent_encode};
use std::borrow::Cow;

use crate::{error::DecodeError, log, matches};

/// unreserved = ALPHA / DIGIT / "-" / "_" / "." / "~"
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// unreserved / ":" / "@" / "&" / "=" / "+" / "$" / ","
const PATH_SEGMENT: &AsciiSet = &QUERY
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b',');

/// Set of bytes that is left unescaped when encoding.
///
/// ASCII letters and digits are always unreserved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EncodeSet {
    /// Query key or value, `-`, `_`, `.` and `~` are unreserved.
    Query,
    /// Single path segment, in addition to [`EncodeSet::Query`], `:`, `@`, `&`, `=`, `+`, `$`
    /// and `,` are unreserved.
    PathSegment,
}

impl EncodeSet {
    /// Returns the set of bytes that gets escaped.
    #[inline]
    pub const fn ascii_set(self) -> &'static AsciiSet {
        match self {
            Self::Query => QUERY,
            Self::PathSegment => PATH_SEGMENT,
        }
    }
}

// ===== Encode =====

/// Percent encode `bytes`.
///
/// # Examples
///
/// ```
/// use urlcodec::percent::{encode, EncodeSet};
/// assert_eq!(encode(b"a b/c", EncodeSet::Query), "a%20b%2Fc");
/// assert_eq!(encode(b"a:b", EncodeSet::PathSegment), "a:b");
/// ```
pub fn encode(bytes: &[u8], set: EncodeSet) -> Bytes {
    let mut buf = BytesMut::with_capacity(bytes.len());
    encode_into(&mut buf, bytes, set);
    buf.freeze()
}

/// Percent encode `bytes` by appending to `buf`.
pub fn encode_into(buf: &mut BytesMut, bytes: &[u8], set: EncodeSet) {
    for chunk in percent_encode(bytes, set.ascii_set()) {
        buf.extend_from_slice(chunk.as_bytes());
    }
}

// ===== Decode =====

/// Percent decode `bytes`.
///
/// If `plus_to_space` is `true`, `+` is decoded into space, otherwise it is copied as is.
///
/// # Examples
///
/// ```
/// use urlcodec::percent::decode;
/// assert_eq!(decode(b"a%20b+c", true), "a b c");
/// assert_eq!(decode(b"a%20b+c", false), "a b+c");
/// assert_eq!(decode(b"100%", false), "100%");
/// ```
pub fn decode(bytes: &[u8], plus_to_space: bool) -> Bytes {
    match decode_cow(bytes, plus_to_space) {
        Cow::Borrowed(ok) => Bytes::copy_from_slice(ok),
        Cow::Owned(ok) => Bytes::from(ok),
    }
}

/// Percent decode `part` of `source`.
///
/// If `part` does not require decoding, the returned bytes is a shallow slice of `source`.
///
/// # Panics
///
/// `part` must be a subslice of `source`, otherwise this function will panic.
pub fn decode_shared(source: &Bytes, part: &[u8], plus_to_space: bool) -> Bytes {
    match decode_cow(part, plus_to_space) {
        Cow::Borrowed(ok) => source.slice_ref(ok),
        Cow::Owned(ok) => Bytes::from(ok),
    }
}

/// Percent decode `bytes` and require the result to be valid UTF-8.
///
/// # Errors
///
/// Returns [`Err`] if decoded bytes is not valid UTF-8.
pub fn decode_str(bytes: &[u8], plus_to_space: bool) -> Result<String, DecodeError> {
    match decode_cow(bytes, plus_to_space) {
        Cow::Borrowed(ok) => match std::str::from_utf8(ok) {
            Ok(ok) => Ok(ok.to_owned()),
            Err(err) => Err(DecodeError::from_utf8(&err)),
        },
        Cow::Owned(ok) => match String::from_utf8(ok) {
            Ok(ok) => Ok(ok),
            Err(err) => Err(DecodeError::from_utf8(&err.utf8_error())),
        },
    }
}

/// Percent decode `bytes`, invalid UTF-8 sequence is replaced with `U+FFFD`.
pub fn decode_lossy(bytes: &[u8], plus_to_space: bool) -> String {
    match decode_cow(bytes, plus_to_space) {
        Cow::Borrowed(ok) => lossy(ok),
        Cow::Owned(ok) => match String::from_utf8(ok) {
            Ok(ok) => ok,
            Err(err) => lossy(err.as_bytes()),
        },
    }
}

/// Convert bytes to `String`, invalid UTF-8 sequence is replaced with `U+FFFD`.
pub(crate) fn lossy(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(ok) => ok.to_owned(),
        Cow::Owned(ok) => {
            log::debug!("invalid utf8 replaced in {} bytes", bytes.len());
            ok
        }
    }
}

fn decode_cow(bytes: &[u8], plus_to_space: bool) -> Cow<'_, [u8]> {
    if !matches::needs_decode(bytes, plus_to_space) {
        return Cow::Borrowed(bytes);
    }

    let mut buf = Vec::with_capacity(bytes.len());

    if plus_to_space {
        // `+` is not a hex digit, so it never belongs to a triplet
        let mut runs = bytes.split(|e| *e == b'+');
        if let Some(run) = runs.next() {
            buf.extend(percent_decode(run));
        }
        for run in runs {
            buf.push(b' ');
            buf.extend(percent_decode(run));
        }
    } else {
        buf.extend(percent_decode(bytes));
    }

    Cow::Owned(buf)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_encode_query() {
        assert_eq!(encode(b"", EncodeSet::Query), "");
        assert_eq!(encode(b"AZaz09-_.~", EncodeSet::Query), "AZaz09-_.~");
        assert_eq!(encode(b"a b", EncodeSet::Query), "a%20b");
        assert_eq!(encode(b"a+b=c&d", EncodeSet::Query), "a%2Bb%3Dc%26d");
        assert_eq!(encode(b":@$,", EncodeSet::Query), "%3A%40%24%2C");
        assert_eq!(encode("é".as_bytes(), EncodeSet::Query), "%C3%A9");
    }

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode(b"-_.~:@&=+$,", EncodeSet::PathSegment), "-_.~:@&=+$,");
        assert_eq!(encode(b"a/b", EncodeSet::PathSegment), "a%2Fb");
        assert_eq!(encode(b"a?b#c", EncodeSet::PathSegment), "a%3Fb%23c");
        assert_eq!(encode(b"a b", EncodeSet::PathSegment), "a%20b");
    }

    #[test]
    fn test_encode_uppercase() {
        assert_eq!(encode(&[0xFF], EncodeSet::Query), "%FF");
        assert_eq!(encode(&[0xab, 0x0a], EncodeSet::PathSegment), "%AB%0A");
    }

    #[test]
    fn test_encode_into() {
        let mut buf = BytesMut::from(&b"/"[..]);
        encode_into(&mut buf, b"a b", EncodeSet::PathSegment);
        encode_into(&mut buf, b"/", EncodeSet::PathSegment);
        assert_eq!(&buf[..], b"/a%20b%2F");
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(b"", true), "");
        assert_eq!(decode(b"plain", true), "plain");
        assert_eq!(decode(b"a%20b", false), "a b");
        assert_eq!(decode(b"%e9%C3%a9", false), &b"\xe9\xc3\xa9"[..]);
        assert_eq!(decode(b"a+b", true), "a b");
        assert_eq!(decode(b"a+b", false), "a+b");
        assert_eq!(decode(b"%2B+", true), "+ ");
    }

    #[test]
    fn test_decode_malformed() {
        assert_eq!(decode(b"%", false), "%");
        assert_eq!(decode(b"100%", false), "100%");
        assert_eq!(decode(b"%2", false), "%2");
        assert_eq!(decode(b"%zz", false), "%zz");
        assert_eq!(decode(b"%2g", false), "%2g");
        assert_eq!(decode(b"%%41", false), "%A");
        assert_eq!(decode(b"%+41", true), "% 41");
    }

    #[test]
    fn test_decode_plus_runs() {
        assert_eq!(decode(b"+", true), " ");
        assert_eq!(decode(b"++a++", true), "  a  ");
        assert_eq!(decode(b"%2+%41++%", true), "%2 A  %");
        assert_eq!(decode(b"%4+1", true), "%4 1");
        assert_eq!(decode(b"a+%2B+b", true), "a + b");

        let Cow::Owned(buf) = decode_cow(b"a+b%20c", true) else {
            panic!("expected decoded buffer");
        };
        assert_eq!(buf, b"a b c");
    }

    #[test]
    fn test_decode_never_grows() {
        for input in [&b"%"[..], b"%%%", b"%4", b"%41%", b"++%2b", b"\xff%ff"] {
            assert!(decode(input, true).len() <= input.len());
            assert!(decode(input, false).len() <= input.len());
        }
    }

    #[test]
    fn test_decode_inverts_encode() {
        let inputs: [&[u8]; 5] = [b"", b"hello world", b"a/b?c#d%e", b"\x00\x7f\x80\xff", "日本".as_bytes()];
        for input in inputs {
            for set in [EncodeSet::Query, EncodeSet::PathSegment] {
                assert_eq!(decode(&encode(input, set), false), input);
            }
        }
    }

    #[test]
    fn test_decode_shared() {
        let source = Bytes::from_static(b"key=value&a%20b");
        let plain = decode_shared(&source, &source[4..9], true);
        assert_eq!(plain, "value");
        assert_eq!(plain.as_ptr(), source[4..].as_ptr());

        let escaped = decode_shared(&source, &source[10..], true);
        assert_eq!(escaped, "a b");
    }

    #[test]
    fn test_decode_str() {
        assert_eq!(decode_str(b"caf%C3%A9", false).unwrap(), "café");
        assert_eq!(decode_str(b"plain", false).unwrap(), "plain");
        assert_eq!(
            decode_str(b"ab%FF", false),
            Err(DecodeError::Utf8 { valid_up_to: 2 })
        );
        assert_eq!(
            decode_str(b"a\xff", false),
            Err(DecodeError::Utf8 { valid_up_to: 1 })
        );
    }

    #[test]
    fn test_decode_lossy() {
        assert_eq!(decode_lossy(b"caf%C3%A9", false), "café");
        assert_eq!(decode_lossy(b"a%FFb", false), "a\u{FFFD}b");
        assert_eq!(decode_lossy(b"a\xffb", false), "a\u{FFFD}b");
    }
}
