use bytes::Bytes;

use super::{Query, QueryItem, items};
use crate::{error::DecodeError, percent::lossy};

/// Single query key and optional value as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryTextItem {
    key: String,
    value: Option<String>,
}

/// Query string as text.
///
/// Converting from [`Query`] never fails, invalid UTF-8 sequence is replaced with `U+FFFD`. Use
/// [`Query::try_to_text`] to reject invalid UTF-8 instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryText {
    items: Vec<QueryTextItem>,
}

items!(QueryText, QueryTextItem);

impl QueryText {
    /// Parse query into text, see [`Query::parse`].
    #[inline]
    pub fn parse<A: AsRef<[u8]>>(bytes: A) -> Self {
        Query::parse(bytes).to_text()
    }

    /// Render query into percent encoded bytes, see [`Query::render`].
    #[inline]
    pub fn render(&self, prepend_question_mark: bool) -> Bytes {
        self.to_query().render(prepend_question_mark)
    }

    /// Convert into raw bytes [`Query`].
    pub fn to_query(&self) -> Query {
        self.items
            .iter()
            .map(|e| QueryItem {
                key: Bytes::copy_from_slice(e.key.as_bytes()),
                value: e.value.as_ref().map(|e| Bytes::copy_from_slice(e.as_bytes())),
            })
            .collect()
    }

    /// Returns the first item with given key.
    pub fn get(&self, key: &str) -> Option<&QueryTextItem> {
        self.items.iter().find(|e| e.key == key)
    }

    /// Returns all items with given key, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a QueryTextItem> {
        self.items.iter().filter(move |e| e.key == key)
    }
}

impl QueryTextItem {
    /// Create new [`QueryTextItem`].
    #[inline]
    pub fn new<K: Into<String>, V: Into<String>>(key: K, value: Option<V>) -> Self {
        Self {
            key: key.into(),
            value: value.map(Into::into),
        }
    }

    /// Create new [`QueryTextItem`] with present value.
    #[inline]
    pub fn pair<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Create new [`QueryTextItem`] without value.
    #[inline]
    pub fn key_only<K: Into<String>>(key: K) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// Returns the key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value.
    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Consume self into key and value.
    #[inline]
    pub fn into_parts(self) -> (String, Option<String>) {
        (self.key, self.value)
    }
}

// ===== Query =====

impl Query {
    /// Convert into text, invalid UTF-8 sequence is replaced with `U+FFFD`.
    pub fn to_text(&self) -> QueryText {
        self.items
            .iter()
            .map(|e| QueryTextItem {
                key: lossy(&e.key),
                value: e.value.as_deref().map(lossy),
            })
            .collect()
    }

    /// Convert into text.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if any key or value is not valid UTF-8.
    pub fn try_to_text(&self) -> Result<QueryText, DecodeError> {
        self.items
            .iter()
            .map(|e| -> Result<QueryTextItem, DecodeError> {
                Ok(QueryTextItem {
                    key: utf8(&e.key)?,
                    value: e.value.as_deref().map(utf8).transpose()?,
                })
            })
            .collect()
    }
}

fn utf8(bytes: &[u8]) -> Result<String, DecodeError> {
    match std::str::from_utf8(bytes) {
        Ok(ok) => Ok(ok.to_owned()),
        Err(err) => Err(DecodeError::from_utf8(&err)),
    }
}

// ===== Conversion =====

impl From<&Query> for QueryText {
    #[inline]
    fn from(value: &Query) -> Self {
        value.to_text()
    }
}

impl From<Query> for QueryText {
    #[inline]
    fn from(value: Query) -> Self {
        value.to_text()
    }
}

impl From<QueryText> for Query {
    fn from(value: QueryText) -> Self {
        value
            .items
            .into_iter()
            .map(|e| QueryItem {
                key: Bytes::from(e.key),
                value: e.value.map(Bytes::from),
            })
            .collect()
    }
}

impl From<&QueryText> for Query {
    #[inline]
    fn from(value: &QueryText) -> Self {
        value.to_query()
    }
}
