//! Service Module
//!
//! Business logic layer for the control plane.
//! Services orchestrate between repositories and contain domain logic.

pub mod batch;
pub mod chain;
pub mod execution;
pub mod parameters;
pub mod validation;

// Re-export for convenience
pub use execution as execution_service;
pub use parameters as parameter_service;
