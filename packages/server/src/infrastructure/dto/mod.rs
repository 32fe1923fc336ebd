//! Data transfer objects.

pub mod http;
