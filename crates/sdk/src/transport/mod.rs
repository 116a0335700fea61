//! Transport layer for the Zeus SDK.

pub mod http;

pub use http::{HttpTransport, Params, RawResponse};
