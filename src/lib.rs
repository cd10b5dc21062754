//! URI Path and Query Codec
//!
//! Convert between the wire bytes of a request target path and query, and their structured form.
//!
//! - [`percent`] percent encoding primitives
//! - [`query`] query string tokenizer and renderer
//! - [`path`] path segments and request target path extraction
//!
//! Decoding never fails. Malformed percent encoding is kept as is, and invalid UTF-8 is replaced
//! with `U+FFFD` when text is required.
//!
//! # Examples
//!
//! ```
//! use urlcodec::{path::{self, PathAndQuery}, query::Query};
//!
//! let target = path::extract_path(b"http://example.com/search/all%20items?q=a+b");
//! let target = PathAndQuery::decode(target);
//!
//! assert_eq!(target.path().segments(), ["search", "all items"]);
//! assert_eq!(target.query(), &Query::parse("q=a%20b"));
//! assert_eq!(target.encode(), "/search/all%20items?q=a%20b");
//! ```
#![warn(missing_debug_implementations)]

mod log;
mod matches;

pub mod percent;
pub mod query;
pub mod path;
pub mod error;

pub use error::DecodeError;
pub use path::{Path, PathAndQuery};
pub use query::Query;
