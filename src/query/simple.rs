use bytes::Bytes;

use super::{Query, QueryItem, items};

/// Single query key and value, where value is always present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleQueryItem {
    key: Bytes,
    value: Bytes,
}

/// Query string where every item has a value.
///
/// Item without value is treated as empty value, so `key` and `key=` are indistinguishable.
///
/// # Examples
///
/// ```
/// use urlcodec::query::SimpleQuery;
/// let query = SimpleQuery::parse("a=1&b");
/// assert_eq!(query.get("b"), Some(&b""[..]));
/// assert_eq!(query.render(false), "a=1&b=");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SimpleQuery {
    items: Vec<SimpleQueryItem>,
}

items!(SimpleQuery, SimpleQueryItem);

impl SimpleQuery {
    /// Parse query by copying from slice reference, see [`Query::parse`].
    #[inline]
    pub fn parse<A: AsRef<[u8]>>(bytes: A) -> Self {
        Self::from(Query::parse(bytes))
    }

    /// Parse query from [`Bytes`], see [`Query::parse_from`].
    #[inline]
    pub fn parse_from<B: Into<Bytes>>(bytes: B) -> Self {
        Self::from(Query::parse_from(bytes))
    }

    /// Render query into percent encoded bytes, see [`Query::render`].
    ///
    /// Every item is rendered with `=`, including empty value.
    #[inline]
    pub fn render(&self, prepend_question_mark: bool) -> Bytes {
        self.to_query().render(prepend_question_mark)
    }

    /// Convert from [`Query`], absent value is replaced with empty bytes.
    pub fn from_query(query: &Query) -> Self {
        query
            .iter()
            .map(|e| SimpleQueryItem {
                key: e.key.clone(),
                value: e.value.clone().unwrap_or_default(),
            })
            .collect()
    }

    /// Convert into [`Query`], every value is present.
    pub fn to_query(&self) -> Query {
        self.items
            .iter()
            .map(|e| QueryItem {
                key: e.key.clone(),
                value: Some(e.value.clone()),
            })
            .collect()
    }

    /// Returns the value of the first item with given key.
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<&[u8]> {
        self.items
            .iter()
            .find(|e| e.key == key.as_ref())
            .map(|e| &e.value[..])
    }

    /// Returns all values with given key, in order.
    pub fn get_all<K: AsRef<[u8]>>(&self, key: K) -> impl Iterator<Item = &[u8]> {
        self.items
            .iter()
            .filter(move |e| e.key == key.as_ref())
            .map(|e| &e.value[..])
    }
}

impl SimpleQueryItem {
    /// Create new [`SimpleQueryItem`].
    #[inline]
    pub fn new<K: Into<Bytes>, V: Into<Bytes>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns the decoded key.
    #[inline]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Returns the decoded value.
    #[inline]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Consume self into key and value.
    #[inline]
    pub fn into_parts(self) -> (Bytes, Bytes) {
        (self.key, self.value)
    }
}

// ===== Conversion =====

impl From<Query> for SimpleQuery {
    fn from(value: Query) -> Self {
        value
            .into_iter()
            .map(|e| SimpleQueryItem {
                key: e.key,
                value: e.value.unwrap_or_default(),
            })
            .collect()
    }
}

impl From<&Query> for SimpleQuery {
    #[inline]
    fn from(value: &Query) -> Self {
        Self::from_query(value)
    }
}

impl From<SimpleQuery> for Query {
    fn from(value: SimpleQuery) -> Self {
        value
            .items
            .into_iter()
            .map(|e| QueryItem {
                key: e.key,
                value: Some(e.value),
            })
            .collect()
    }
}

impl From<&SimpleQuery> for Query {
    #[inline]
    fn from(value: &SimpleQuery) -> Self {
        value.to_query()
    }
}

impl<K: Into<Bytes>, V: Into<Bytes>> From<(K, V)> for SimpleQueryItem {
    #[inline]
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}
