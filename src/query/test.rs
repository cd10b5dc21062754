use bytes::Bytes;

use super::{
    EscapeItem, PartialEscapeQuery, PartialEscapeQueryItem, Query, QueryItem, QueryText,
    QueryTextItem, SimpleQuery, SimpleQueryItem,
};
use crate::error::DecodeError;

const fn is_send_sync<T: Send + Sync>() { }
const _: () = {
    is_send_sync::<Query>();
    is_send_sync::<QueryText>();
    is_send_sync::<SimpleQuery>();
    is_send_sync::<PartialEscapeQuery>();
};

fn query(items: &[(&'static str, Option<&'static str>)]) -> Query {
    items.iter().map(|&(k, v)| QueryItem::new(k, v)).collect()
}

#[test]
fn test_parse() {
    assert_eq!(
        Query::parse("key1=value1&key2=value2"),
        query(&[("key1", Some("value1")), ("key2", Some("value2"))]),
    );
    assert_eq!(
        Query::parse("key1&key2=value2"),
        query(&[("key1", None), ("key2", Some("value2"))]),
    );
    assert_eq!(
        Query::parse("?a=1;b=2&c"),
        query(&[("a", Some("1")), ("b", Some("2")), ("c", None)]),
    );
}

#[test]
fn test_parse_empty() {
    assert!(Query::parse("").is_empty());
    assert!(Query::parse("?").is_empty());
    assert_eq!(Query::parse("a="), query(&[("a", Some(""))]));
    assert_eq!(Query::parse("="), query(&[("", Some(""))]));

    // every separator delimit a token
    assert_eq!(Query::parse("a&"), query(&[("a", None), ("", None)]));
    assert_eq!(Query::parse("?a;"), query(&[("a", None), ("", None)]));
    assert_eq!(Query::parse("a&&b"), query(&[("a", None), ("", None), ("b", None)]));
    assert_eq!(Query::parse("&"), query(&[("", None), ("", None)]));
    assert_eq!(Query::parse("&a"), query(&[("", None), ("a", None)]));
}

#[test]
fn test_parse_first_equal() {
    assert_eq!(Query::parse("a=b=c"), query(&[("a", Some("b=c"))]));
    assert_eq!(Query::parse("a==%3D"), query(&[("a", Some("=="))]));
}

#[test]
fn test_parse_decode() {
    assert_eq!(
        Query::parse("q=rust+lang%21&a%2Bb=%2B"),
        query(&[("q", Some("rust lang!")), ("a+b", Some("+"))]),
    );
    assert_eq!(Query::parse("p=100%&x=%zz"), query(&[("p", Some("100%")), ("x", Some("%zz"))]));

    // only the first `?` is dropped
    assert_eq!(Query::parse("??a"), query(&[("?a", None)]));
}

#[test]
fn test_parse_duplicate_keys() {
    let query = Query::parse("a=1&b=2&a=3&a");
    assert_eq!(query.len(), 4);
    assert_eq!(query.get("a").unwrap().value(), Some(&b"1"[..]));

    let all = query.get_all("a").map(QueryItem::value).collect::<Vec<_>>();
    assert_eq!(all, [Some(&b"1"[..]), Some(&b"3"[..]), None]);

    assert!(query.contains_key("b"));
    assert!(!query.contains_key("c"));
}

#[test]
fn test_parse_from_shared() {
    let bytes = Bytes::from_static(b"?key=value&k%20=v");
    let query = Query::parse_from(bytes.clone());
    let first = &query.items()[0];
    assert_eq!(first.key().as_ptr(), bytes[1..].as_ptr());
    assert_eq!(first.value().unwrap().as_ptr(), bytes[5..].as_ptr());
    assert_eq!(query.items()[1].key(), b"k ");
}

#[test]
fn test_render() {
    let q = query(&[("key1", Some("value1")), ("key2", None), ("key3", Some(""))]);
    assert_eq!(q.render(false), "key1=value1&key2&key3=");
    assert_eq!(q.render(true), "?key1=value1&key2&key3=");
    assert_eq!(q.to_string(), "key1=value1&key2&key3=");

    let q = query(&[("a b", Some("c&d=e")), ("~-_.", Some("+/?"))]);
    assert_eq!(q.render(false), "a%20b=c%26d%3De&~-_.=%2B%2F%3F");
}

#[test]
fn test_render_empty() {
    assert_eq!(Query::new().render(true), "");
    assert_eq!(Query::new().render(false), "");
}

#[test]
fn test_render_uppercase() {
    let q = Query::from(vec![QueryItem::pair(&b"\xff"[..], &b"\xab"[..])]);
    assert_eq!(q.render(false), "%FF=%AB");
}

#[test]
fn test_roundtrip() {
    let cases = [
        query(&[]),
        query(&[("a", None)]),
        query(&[("a", Some(""))]),
        query(&[("a b", Some("c+d")), ("a b", None), ("é", Some("日本"))]),
        query(&[("k", Some("?&;=%#"))]),
        query(&[("a", None), ("", None)]),
        query(&[("", None), ("a", None)]),
        query(&[("", Some("")), ("", None)]),
    ];
    for q in cases {
        assert_eq!(Query::parse(q.render(true)), q);
        assert_eq!(Query::parse(q.render(false)), q);
    }
}

// ===== QueryText =====

#[test]
fn test_text() {
    let text = Query::parse("name=caf%C3%A9&flag").to_text();
    assert_eq!(
        text,
        QueryText::from(vec![QueryTextItem::pair("name", "café"), QueryTextItem::key_only("flag")]),
    );
    assert_eq!(text.get("name").unwrap().value(), Some("café"));
    assert_eq!(text.render(false), "name=caf%C3%A9&flag");
    assert_eq!(Query::from(text), query(&[("name", Some("café")), ("flag", None)]));
}

#[test]
fn test_text_lossy() {
    let q = Query::parse("a%FF=b%C3");
    let text = QueryText::from(&q);
    let item = &text.items()[0];
    assert_eq!(item.key(), "a\u{FFFD}");
    assert_eq!(item.value(), Some("b\u{FFFD}"));

    assert_eq!(q.try_to_text(), Err(DecodeError::Utf8 { valid_up_to: 1 }));
    assert!(Query::parse("a=b").try_to_text().is_ok());
}

#[test]
fn test_text_roundtrip() {
    let text = QueryText::from(vec![
        QueryTextItem::pair("q", "a b+c"),
        QueryTextItem::new("x", None::<String>),
    ]);
    assert_eq!(QueryText::parse(text.render(true)), text);
    assert_eq!(Query::from(&text).to_text(), text);
}

// ===== SimpleQuery =====

#[test]
fn test_simple() {
    let simple = SimpleQuery::parse("a=1&b&c=");
    assert_eq!(
        simple,
        SimpleQuery::from(vec![
            SimpleQueryItem::new("a", "1"),
            SimpleQueryItem::new("b", ""),
            SimpleQueryItem::new("c", ""),
        ]),
    );
    assert_eq!(simple.get("b"), Some(&b""[..]));
    assert_eq!(simple.get("d"), None);
    assert_eq!(simple.render(true), "?a=1&b=&c=");

    let q = Query::from(simple);
    assert!(q.iter().all(QueryItem::has_value));
}

#[test]
fn test_simple_from_query() {
    let q = query(&[("a", None), ("a", Some("x"))]);
    let simple = SimpleQuery::from_query(&q);
    assert_eq!(simple.get_all("a").collect::<Vec<_>>(), [&b""[..], &b"x"[..]]);
    assert_eq!(simple, SimpleQuery::from(q));
}

// ===== PartialEscapeQuery =====

#[test]
fn test_partial_escape() {
    let q = PartialEscapeQuery::from(vec![
        PartialEscapeQueryItem::new(
            "q",
            vec![
                EscapeItem::escaped("a b"),
                EscapeItem::literal("+:"),
                EscapeItem::escaped(":"),
                EscapeItem::literal("%zz"),
            ],
        ),
        PartialEscapeQueryItem::new("flag", vec![]),
        PartialEscapeQueryItem::new("k y", vec![EscapeItem::escaped("")]),
    ]);
    assert_eq!(q.render(false), "q=a%20b+:%3A%zz&flag&k%20y=");
    assert_eq!(q.render(true), "?q=a%20b+:%3A%zz&flag&k%20y=");
    assert!(!q.get("flag").unwrap().has_value());
    assert!(q.get("q").unwrap().value()[1].is_literal());
}

#[test]
fn test_partial_escape_empty() {
    assert_eq!(PartialEscapeQuery::new().render(true), "");
}

#[test]
fn test_partial_escape_from_query() {
    let q = query(&[("a", Some("1 2")), ("b", None), ("c", Some(""))]);
    let partial = PartialEscapeQuery::from(&q);
    assert_eq!(partial.render(true), q.render(true));
}
