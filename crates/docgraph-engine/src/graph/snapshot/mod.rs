//! # Snapshot Testing Support
//!
//! Utilities for testing the outline builder via structural checks and
//! compact outline comparisons.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts a built graph to a stable `Snap` listing, one
//!   line per node in depth-first order
//! - **`invariants`**: Structural checks (reading-order chain, parent/child
//!   symmetry, sibling addresses, governing headings)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
