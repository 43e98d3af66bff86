#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Item resolvers backed by a fixed catalog or the game server.

pub mod catalog;
pub mod http;
pub mod retry;

pub use catalog::StaticItemResolver;
pub use http::{HttpItemResolver, parse_description};
pub use retry::retry_with_backoff;
