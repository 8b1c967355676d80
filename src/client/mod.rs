//! HTTP client for fetching source documents.

mod http;

pub use http::HttpClient;
