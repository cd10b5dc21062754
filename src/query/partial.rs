use bytes::{BufMut, Bytes, BytesMut};

use super::{Query, items, render_with};
use crate::percent::{self, EncodeSet};

/// Chunk of a [`PartialEscapeQueryItem`] value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EscapeItem {
    /// Bytes that will be percent encoded.
    Escaped(Bytes),
    /// Bytes that will be copied as is.
    ///
    /// No validation is performed, caller must ensure the bytes is safe to be put in a query.
    Literal(Bytes),
}

/// Single query key and value composed of [`EscapeItem`] chunks.
///
/// Empty chunks means no value, the item is rendered without `=`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartialEscapeQueryItem {
    key: Bytes,
    value: Vec<EscapeItem>,
}

/// Query string where parts of a value can skip percent encoding.
///
/// This is useful when a character outside the query unreserved set must reach the receiver
/// unescaped, e.g. `:` or `+` in search syntax.
///
/// There is no parser, escaped and literal chunks cannot be told apart once rendered.
///
/// # Examples
///
/// ```
/// use urlcodec::query::{EscapeItem, PartialEscapeQuery, PartialEscapeQueryItem};
/// let query = PartialEscapeQuery::from(vec![PartialEscapeQueryItem::new(
///     "q",
///     vec![
///         EscapeItem::literal("is:open+"),
///         EscapeItem::escaped("label:a b"),
///     ],
/// )]);
/// assert_eq!(query.render(true), "?q=is:open+label%3Aa%20b");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PartialEscapeQuery {
    items: Vec<PartialEscapeQueryItem>,
}

items!(PartialEscapeQuery, PartialEscapeQueryItem);

impl PartialEscapeQuery {
    /// Render query into bytes.
    ///
    /// Key is always percent encoded, value chunks are concatenated in order without separator.
    /// `?` rule is the same as [`Query::render`].
    pub fn render(&self, prepend_question_mark: bool) -> Bytes {
        let mut buf = BytesMut::new();
        render_with(
            &mut buf,
            &self.items,
            prepend_question_mark,
            PartialEscapeQueryItem::render_into,
        );
        buf.freeze()
    }

    /// Returns the first item with given key.
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<&PartialEscapeQueryItem> {
        self.items.iter().find(|e| e.key == key.as_ref())
    }
}

impl PartialEscapeQueryItem {
    /// Create new [`PartialEscapeQueryItem`].
    #[inline]
    pub fn new<K: Into<Bytes>>(key: K, value: Vec<EscapeItem>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Returns the unescaped key.
    #[inline]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Returns value chunks.
    #[inline]
    pub fn value(&self) -> &[EscapeItem] {
        &self.value
    }

    /// Returns `true` if the item is rendered with `=`.
    #[inline]
    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }

    fn render_into(&self, buf: &mut BytesMut) {
        percent::encode_into(buf, &self.key, EncodeSet::Query);
        if self.value.is_empty() {
            return;
        }
        buf.put_u8(b'=');
        for chunk in &self.value {
            chunk.render_into(buf);
        }
    }
}

impl EscapeItem {
    /// Create new [`EscapeItem::Escaped`].
    #[inline]
    pub fn escaped<B: Into<Bytes>>(bytes: B) -> Self {
        Self::Escaped(bytes.into())
    }

    /// Create new [`EscapeItem::Literal`].
    #[inline]
    pub fn literal<B: Into<Bytes>>(bytes: B) -> Self {
        Self::Literal(bytes.into())
    }

    /// Returns the unescaped bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Escaped(ok) | Self::Literal(ok) => &ok[..],
        }
    }

    /// Returns `true` if this is [`EscapeItem::Literal`].
    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    fn render_into(&self, buf: &mut BytesMut) {
        match self {
            Self::Escaped(bytes) => percent::encode_into(buf, bytes, EncodeSet::Query),
            Self::Literal(bytes) => buf.extend_from_slice(bytes),
        }
    }
}

// ===== Conversion =====

impl From<&Query> for PartialEscapeQuery {
    /// Present value becomes single [`EscapeItem::Escaped`] chunk, absent value becomes no chunk.
    ///
    /// Rendering the result gives the same bytes as [`Query::render`].
    fn from(value: &Query) -> Self {
        value
            .iter()
            .map(|e| PartialEscapeQueryItem {
                key: e.key.clone(),
                value: match &e.value {
                    Some(value) => vec![EscapeItem::Escaped(value.clone())],
                    None => Vec::new(),
                },
            })
            .collect()
    }
}

impl From<Query> for PartialEscapeQuery {
    #[inline]
    fn from(value: Query) -> Self {
        Self::from(&value)
    }
}
