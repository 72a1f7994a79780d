//! Catalog entities, vector math, and prompt assembly for cause matching.
//!
//! Nothing in this crate performs I/O; storage and providers live in sibling crates.

pub mod cards;
pub mod preview;
pub mod profile;
pub mod prompt;
pub mod result;
pub mod vector;

mod error;

pub use cards::{ResultCard, result_cards};
pub use error::{Error, Result};
pub use preview::render_preview;
pub use profile::Profile;
pub use prompt::{ProfileBlock, Prompt, build_prompt};
pub use result::{RankedProfile, RetrievalResult};
