use urlcodec::{
    path::{self, PathAndQuery},
    query::QueryText,
};

/// Decode request targets given as arguments.
///
/// ```not_rust
/// RUST_LOG=trace cargo run -p example -- 'http://example.com/a%20b/c?q=x+y&flag'
/// ```
fn main() {
    env_logger::init();

    for arg in std::env::args().skip(1) {
        let target = PathAndQuery::decode(path::extract_path(arg.as_bytes()));
        log::info!("decoded {arg:?}");

        println!("> {arg}");
        for segment in target.path() {
            println!("  segment {segment:?}");
        }
        for item in &QueryText::from(target.query()) {
            match item.value() {
                Some(value) => println!("  query   {:?} = {value:?}", item.key()),
                None => println!("  query   {:?}", item.key()),
            }
        }
        println!("< {target}");
    }
}
