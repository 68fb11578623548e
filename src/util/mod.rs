//! Shared helpers (test setup)

pub mod testing;
