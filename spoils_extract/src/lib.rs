#![warn(
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

//! Resource delta extraction from game response text.
//!
//! This crate turns the narrative markup the game returns after an action
//! into a [`ResourceGain`](spoils_core::ResourceGain), and folds such gains
//! into a [`CharacterState`](spoils_core::CharacterState).

pub mod aggregate;
pub mod extractors;
pub mod markup;
pub mod patterns;
pub mod reconcile;
pub mod resolver;

pub use aggregate::{GainExtractor, build};
pub use extractors::SEVERAL;
pub use markup::{labeled_value, parse_float, parse_int, results_panel};
pub use patterns::{Pattern, PatternName, PatternRegistry, get_or_compile};
pub use reconcile::{SharedCharacterState, apply};
pub use resolver::CachingResolver;
