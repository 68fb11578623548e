//! Domain layer: the forest model and its invariant-preserving logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no
//! config loading) and never logs.

pub mod error;
pub mod node;
pub mod tree;

pub use error::{DomainError, DomainResult};
pub use node::{NodeId, Person, PersonRecord, VIRTUAL_ROOT_ID};
pub use tree::{FamilyTree, DEFAULT_ROOT_LABEL};
