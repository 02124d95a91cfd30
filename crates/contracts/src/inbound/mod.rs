//! Inbound adapters translating contract types for delivery frameworks.

pub mod http;
