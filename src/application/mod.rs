//! Application layer: use cases around the forest manager
//!
//! Persistence (load-mutate-save) and the action surface that maps
//! caller requests onto domain operations.

pub mod actions;
pub mod error;
pub mod store;

pub use actions::{apply, Action};
pub use error::{ApplicationError, ApplicationResult};
pub use store::TreeStore;
