//! reqwest-backed Detect transport

pub mod client;

pub use client::{HttpClient, HttpClientBuilder, DEFAULT_USER_AGENT};
