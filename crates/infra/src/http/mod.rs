//! reqwest-backed HTTP client

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
