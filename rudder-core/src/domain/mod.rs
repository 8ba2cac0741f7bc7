//! Core domain types
//!
//! This module contains the core domain structures used across Rudder services.
//! These types describe execution state owned by the external job engine and the
//! read models derived from it; Rudder never mutates execution records itself.

pub mod batch;
pub mod execution;
pub mod parameter;
pub mod registry;
