//! Repository Module
//!
//! Data access layer for the control plane.
//! The execution repository is read-only (the job engine owns those rows);
//! the parameter-set repository also carries the optimistic-locking write path.

pub mod execution;
pub mod parameter_set;

// Re-export for convenience
pub use execution as execution_repository;
pub use parameter_set as parameter_set_repository;
