mod http;

pub use http::{build_client, HttpEntityApi};
