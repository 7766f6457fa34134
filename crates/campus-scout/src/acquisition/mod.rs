//! Plain HTTP acquisition for the text search providers.

pub mod http_client;

pub use http_client::{HttpClient, HttpResponse};
