//! Query string.
//!
//! A query is an ordered list of key and optional value pairs. Order is significant and
//! duplicate keys are preserved, so all query types here are backed by a `Vec` instead of a map.
//!
//! ```not_rust
//! ?key1=value1&key2&key3=value3
//!  \__/ \____/ \__/ \__/ \____/
//!   |     |     |    |     |
//!  key  value  key  key  value
//!             (no value)
//! ```
//!
//! - [`Query`] raw bytes, value may be absent
//! - [`QueryText`] lossy UTF-8 view of [`Query`]
//! - [`SimpleQuery`] raw bytes, value is always present
//! - [`PartialEscapeQuery`] render only, value may contain unescaped chunks
use bytes::{BufMut, Bytes, BytesMut};

use crate::percent::{self, EncodeSet};

mod parser;
mod text;
mod simple;
mod partial;

pub use text::{QueryText, QueryTextItem};
pub use simple::{SimpleQuery, SimpleQueryItem};
pub use partial::{EscapeItem, PartialEscapeQuery, PartialEscapeQueryItem};

/// Single query key and optional value.
///
/// Absent value, `key`, is distinct from empty value, `key=`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryItem {
    key: Bytes,
    value: Option<Bytes>,
}

/// Query string as raw bytes.
///
/// # Examples
///
/// ```
/// use urlcodec::query::Query;
/// let query = Query::parse("?q=rust+lang&page=2&debug");
/// assert_eq!(query.len(), 3);
/// assert_eq!(query.get("q").unwrap().value(), Some(&b"rust lang"[..]));
/// assert_eq!(query.get("debug").unwrap().value(), None);
/// assert_eq!(query.render(true), "?q=rust%20lang&page=2&debug");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query {
    items: Vec<QueryItem>,
}

// ===== Items =====

macro_rules! items {
    ($ty:ident, $item:ident) => {
        impl $ty {
            /// Create new empty query.
            #[inline]
            pub const fn new() -> Self {
                Self { items: Vec::new() }
            }

            /// Returns the number of items, including duplicate keys.
            #[inline]
            pub fn len(&self) -> usize {
                self.items.len()
            }

            /// Returns `true` if query contains no items.
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.items.is_empty()
            }

            /// Returns items in order.
            #[inline]
            pub fn items(&self) -> &[$item] {
                &self.items
            }

            /// Returns an iterator over items in order.
            #[inline]
            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.items.iter()
            }

            /// Consume self into items.
            #[inline]
            pub fn into_items(self) -> Vec<$item> {
                self.items
            }
        }

        impl From<Vec<$item>> for $ty {
            #[inline]
            fn from(items: Vec<$item>) -> Self {
                Self { items }
            }
        }

        impl FromIterator<$item> for $ty {
            #[inline]
            fn from_iter<I: IntoIterator<Item = $item>>(iter: I) -> Self {
                Self { items: iter.into_iter().collect() }
            }
        }

        impl IntoIterator for $ty {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<$item>;

            #[inline]
            fn into_iter(self) -> Self::IntoIter {
                self.items.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $ty {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            #[inline]
            fn into_iter(self) -> Self::IntoIter {
                self.items.iter()
            }
        }
    };
}

pub(crate) use items;

items!(Query, QueryItem);

// ===== Query =====

impl Query {
    /// Parse query by copying from slice reference.
    ///
    /// Leading `?` is ignored, both `&` and `;` are accepted as separator. This function never
    /// fails, malformed percent encoding is kept as is.
    ///
    /// If the input is owned [`Bytes`], consider using [`Query::parse_from`].
    #[inline]
    pub fn parse<A: AsRef<[u8]>>(bytes: A) -> Self {
        Self::parse_from(Bytes::copy_from_slice(bytes.as_ref()))
    }

    /// Parse query from [`Bytes`].
    ///
    /// Key or value that does not contains escaped bytes is shallow sliced from the input.
    #[inline]
    pub fn parse_from<B: Into<Bytes>>(bytes: B) -> Self {
        Self { items: parser::parse(&bytes.into()) }
    }

    /// Render query into percent encoded bytes.
    ///
    /// If `prepend_question_mark` is `true` and the query is not empty, the result is prefixed
    /// with `?`. Empty query always renders into empty bytes.
    pub fn render(&self, prepend_question_mark: bool) -> Bytes {
        let mut buf = BytesMut::new();
        self.render_into(&mut buf, prepend_question_mark);
        buf.freeze()
    }

    pub(crate) fn render_into(&self, buf: &mut BytesMut, prepend_question_mark: bool) {
        render_with(buf, &self.items, prepend_question_mark, QueryItem::render_into);
    }

    /// Returns the first item with given key.
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<&QueryItem> {
        self.items.iter().find(|e| e.key == key.as_ref())
    }

    /// Returns all items with given key, in order.
    pub fn get_all<K: AsRef<[u8]>>(&self, key: K) -> impl Iterator<Item = &QueryItem> {
        self.items.iter().filter(move |e| e.key == key.as_ref())
    }

    /// Returns `true` if query contains given key.
    #[inline]
    pub fn contains_key<K: AsRef<[u8]>>(&self, key: K) -> bool {
        self.get(key).is_some()
    }
}

// ===== QueryItem =====

impl QueryItem {
    /// Create new [`QueryItem`].
    #[inline]
    pub fn new<K: Into<Bytes>, V: Into<Bytes>>(key: K, value: Option<V>) -> Self {
        Self {
            key: key.into(),
            value: value.map(Into::into),
        }
    }

    /// Create new [`QueryItem`] with present value.
    #[inline]
    pub fn pair<K: Into<Bytes>, V: Into<Bytes>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Create new [`QueryItem`] without value.
    #[inline]
    pub fn key_only<K: Into<Bytes>>(key: K) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// Returns the decoded key.
    #[inline]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Returns the decoded value, [`None`] if there is no `=` in the item.
    #[inline]
    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }

    /// Returns `true` if the item has value, including empty value.
    #[inline]
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Consume self into key and value.
    #[inline]
    pub fn into_parts(self) -> (Bytes, Option<Bytes>) {
        (self.key, self.value)
    }

    fn render_into(&self, buf: &mut BytesMut) {
        percent::encode_into(buf, &self.key, EncodeSet::Query);
        if let Some(value) = &self.value {
            buf.put_u8(b'=');
            percent::encode_into(buf, value, EncodeSet::Query);
        }
    }
}

impl<K: Into<Bytes>, V: Into<Bytes>> From<(K, Option<V>)> for QueryItem {
    #[inline]
    fn from((key, value): (K, Option<V>)) -> Self {
        Self::new(key, value)
    }
}

// ===== Render =====

/// Join rendered items with `&`.
pub(crate) fn render_with<T>(
    buf: &mut BytesMut,
    items: &[T],
    prepend_question_mark: bool,
    mut render_item: impl FnMut(&T, &mut BytesMut),
) {
    let Some((first, rest)) = items.split_first() else {
        return;
    };

    if prepend_question_mark {
        buf.put_u8(b'?');
    }

    render_item(first, buf);
    for item in rest {
        buf.put_u8(b'&');
        render_item(item, buf);
    }
}

// ===== Formatting =====

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // rendered bytes is always ASCII
        f.write_str(&String::from_utf8_lossy(&self.render(false)))
    }
}

#[cfg(test)]
mod test;
