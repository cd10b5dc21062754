use urlcodec::{
    path,
    query::{EscapeItem, PartialEscapeQuery, PartialEscapeQueryItem},
};

/// Build a search url where the search syntax `is:` and `+` must stay unescaped.
fn main() {
    env_logger::init();

    let terms = std::env::args().skip(1).collect::<Vec<_>>();

    let mut value = vec![EscapeItem::literal("is:open")];
    for term in terms {
        value.push(EscapeItem::literal("+"));
        value.push(EscapeItem::escaped(term));
    }

    let query = PartialEscapeQuery::from(vec![
        PartialEscapeQueryItem::new("q", value),
        PartialEscapeQueryItem::new("sort", vec![EscapeItem::escaped("created desc")]),
    ]);

    let mut target = path::encode_segments(["repos", "search"]).to_vec();
    target.extend_from_slice(&query.render(true));

    println!("{}", String::from_utf8_lossy(&target));
}
