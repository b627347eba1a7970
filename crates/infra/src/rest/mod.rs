//! REST client and the reqwest transport behind it

pub mod client;
pub mod transport;

pub use client::RestClient;
pub use transport::ReqwestTransport;
