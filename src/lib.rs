//! kintree: a mutable, rooted forest of labeled persons.
//!
//! Structural edit operations (insert, rename, attach, move, delete
//! subtree), read-only traversal queries, and a flat JSON record
//! format for persistence. The domain layer owns all algorithmic
//! content; application and CLI layers are thin callers around it.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{FamilyTree, NodeId, Person, PersonRecord, VIRTUAL_ROOT_ID};
