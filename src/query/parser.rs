use bytes::Bytes;

use super::QueryItem;
use crate::{matches, percent};

/// ```not_rust
/// query   = [ "?" ] [ item *( ( "&" / ";" ) item ) ]
/// item    = key [ "=" value ]
/// ```
///
/// Only the first `=` delimit key and value, the rest belongs to value. Every separator delimit
/// a token, so a trailing separator produces an item with empty key and no value. Empty input
/// produces no item.
pub(crate) fn parse(value: &Bytes) -> Vec<QueryItem> {
    let mut bytes = &value[..];

    if let [b'?', rest @ ..] = bytes {
        bytes = rest;
    }

    let mut items = Vec::new();

    if bytes.is_empty() {
        return items;
    }

    loop {
        match bytes.iter().position(|e| matches::is_query_delim(*e)) {
            Some(nth) => {
                items.push(parse_item(value, &bytes[..nth]));
                bytes = &bytes[nth + 1..];
            }
            None => {
                items.push(parse_item(value, bytes));
                return items;
            }
        }
    }
}

fn parse_item(value: &Bytes, token: &[u8]) -> QueryItem {
    match matches::split_once(token, b'=') {
        Some((key, val)) => QueryItem {
            key: percent::decode_shared(value, key, true),
            value: Some(percent::decode_shared(value, val, true)),
        },
        None => QueryItem {
            key: percent::decode_shared(value, token, true),
            value: None,
        },
    }
}
