//! Provider-neutral plumbing shared by both clients
//!
//! - `table`: row-oriented tables, decoders and the left join
//! - `cache`: per-client request cache
//! - `http`: HTTP client construction and table fetching

pub mod cache;
pub mod http;
pub mod table;

pub use cache::{FetchOutcome, RequestCache};
pub use http::{bearer_header_map, build_client, fetch_table};
pub use table::{decode_csv_table, decode_json_table, Table};
