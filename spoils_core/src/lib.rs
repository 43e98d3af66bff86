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

//! Domain types shared by the extraction engine, the resolvers and the CLI.
//!
//! A game response is reduced to a [`ResourceGain`], which can then be folded
//! into a caller-owned [`CharacterState`].

pub mod error;
pub mod gain;
pub mod item;
pub mod stat;
pub mod state;

pub use error::{BuildError, ExtractError, PatternError, ResolveError};
pub use gain::{EffectGrant, ResourceGain, ResourceGainBuilder};
pub use item::{Item, ItemQuantity, ItemResolver};
pub use stat::Stat;
pub use state::{CharacterState, StatValue};
