//! Circuit snapshot representation and topology analysis.
//!
//! This module provides the per-tick [`Circuit`] snapshot the host builds
//! from its editing state, the [`Connectivity`] analysis that finds nodes,
//! components and reference nodes, and element validation.

mod connectivity;
mod graph;
mod types;
mod validate;

pub use connectivity::Connectivity;
pub use graph::Circuit;
pub use types::*;
pub use validate::{check_unique_ids, validate_circuit};
