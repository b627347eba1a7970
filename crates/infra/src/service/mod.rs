//! Typed JSON clients for authenticated services

pub mod client;

pub use client::ServiceClient;
