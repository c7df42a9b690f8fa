//! Networking layer: blocking HTTP client for the graph server.

mod fetch;

pub use fetch::SearchClient;
