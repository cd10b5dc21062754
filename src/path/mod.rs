//! URI path.
//!
//! Path is represented as decoded text segments. Each segment is percent encoded independently,
//! so a segment may contain `/` which is escaped as `%2F` on the wire.
//!
//! ```not_rust
//!   /over/the%20re?name=ferret
//!    \__/ \______/ \_________/
//!     |      |          |
//!  segment segment    query
//! ```
//!
//! `+` is never decoded into space in path segments.
use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    error::DecodeError,
    percent::{self, EncodeSet},
    query::Query,
};

mod target;

pub use target::{extract_path, extract_path_from};

/// Decoded path segments.
///
/// # Examples
///
/// ```
/// use urlcodec::path::Path;
/// let path = Path::decode("/users/john%20doe");
/// assert_eq!(path.segments(), ["users", "john doe"]);
/// assert_eq!(path.encode(), "/users/john%20doe");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

/// Decoded path segments and query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathAndQuery {
    path: Path,
    query: Query,
}

// ===== Path =====

impl Path {
    /// Create new empty path.
    #[inline]
    pub const fn new() -> Self {
        Self { segments: Vec::new() }
    }

    /// Decode path segments.
    ///
    /// Both `""` and `"/"` results in empty path. Invalid UTF-8 sequence is replaced with
    /// `U+FFFD`.
    #[inline]
    pub fn decode<A: AsRef<[u8]>>(bytes: A) -> Self {
        Self { segments: decode_segments(bytes.as_ref()) }
    }

    /// Decode path segments, rejecting invalid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] on the first decoded segment that is not valid UTF-8. The reported
    /// `valid_up_to` is relative to that decoded segment, not to the input.
    pub fn try_decode<A: AsRef<[u8]>>(bytes: A) -> Result<Self, DecodeError> {
        let segments = split_segments(bytes.as_ref())
            .map(|e| percent::decode_str(e, false))
            .collect::<Result<_, _>>()?;
        Ok(Self { segments })
    }

    /// Encode path segments, empty path results in empty bytes.
    #[inline]
    pub fn encode(&self) -> Bytes {
        encode_segments(&self.segments)
    }

    /// Returns path segments.
    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if path has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over segments.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.segments.iter()
    }

    /// Consume self into segments.
    #[inline]
    pub fn into_segments(self) -> Vec<String> {
        self.segments
    }
}

impl From<Vec<String>> for Path {
    #[inline]
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    #[inline]
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { segments: iter.into_iter().map(Into::into).collect() }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

// ===== PathAndQuery =====

impl PathAndQuery {
    /// Create new [`PathAndQuery`].
    #[inline]
    pub const fn new(path: Path, query: Query) -> Self {
        Self { path, query }
    }

    /// Decode path and query, split at the first `?`.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlcodec::path::PathAndQuery;
    /// let target = PathAndQuery::decode("/search/all?q=a+b");
    /// assert_eq!(target.path().segments(), ["search", "all"]);
    /// assert_eq!(target.query().get("q").unwrap().value(), Some(&b"a b"[..]));
    /// ```
    pub fn decode<A: AsRef<[u8]>>(bytes: A) -> Self {
        let (path, query) = decode_path(bytes.as_ref());
        Self { path, query }
    }

    /// Encode path followed by query, see [`encode_path`].
    #[inline]
    pub fn encode(&self) -> Bytes {
        encode_path(&self.path.segments, &self.query)
    }

    /// Returns the path.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the query.
    #[inline]
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Consume self into path and query.
    #[inline]
    pub fn into_parts(self) -> (Path, Query) {
        (self.path, self.query)
    }
}

// ===== Codec =====

/// Encode path segments.
///
/// Each segment is prefixed with `/` and percent encoded independently. Empty segments results
/// in empty bytes, not `/`.
///
/// # Examples
///
/// ```
/// use urlcodec::path::encode_segments;
/// assert_eq!(encode_segments(["foo", "bar"]), "/foo/bar");
/// assert_eq!(encode_segments(["foo bar", "baz/bin"]), "/foo%20bar/baz%2Fbin");
/// assert_eq!(encode_segments::<_, &str>([]), "");
/// ```
pub fn encode_segments<I, S>(segments: I) -> Bytes
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buf = BytesMut::new();
    encode_segments_into(&mut buf, segments);
    buf.freeze()
}

/// Decode path segments.
///
/// `""` and `"/"` results in no segments. Otherwise a single leading `/` is dropped and the rest
/// is split on every `/`.
pub fn decode_segments(bytes: &[u8]) -> Vec<String> {
    split_segments(bytes)
        .map(|e| percent::decode_lossy(e, false))
        .collect()
}

/// Encode path segments followed by query.
///
/// Empty query contributes nothing, otherwise it is prefixed with `?`.
pub fn encode_path<I, S>(segments: I, query: &Query) -> Bytes
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buf = BytesMut::new();
    encode_segments_into(&mut buf, segments);
    query.render_into(&mut buf, true);
    buf.freeze()
}

/// Decode path and query, split at the first `?`.
pub fn decode_path(bytes: &[u8]) -> (Path, Query) {
    let (path, query) = match bytes.iter().position(|e| *e == b'?') {
        Some(nth) => bytes.split_at(nth),
        None => (bytes, &bytes[bytes.len()..]),
    };
    (Path::decode(path), Query::parse(query))
}

fn encode_segments_into<I, S>(buf: &mut BytesMut, segments: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for segment in segments {
        buf.put_u8(b'/');
        percent::encode_into(buf, segment.as_ref().as_bytes(), EncodeSet::PathSegment);
    }
}

fn split_segments(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    let bytes = match bytes {
        [] | [b'/'] => None,
        [b'/', rest @ ..] => Some(rest),
        _ => Some(bytes),
    };
    bytes
        .into_iter()
        .flat_map(|e| e.split(|e| *e == b'/'))
}

// ===== Formatting =====

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // encoded bytes is always ASCII
        f.write_str(&String::from_utf8_lossy(&self.encode()))
    }
}

impl std::fmt::Display for PathAndQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.encode()))
    }
}
