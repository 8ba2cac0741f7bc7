//! Rudder Core
//!
//! Core types and abstractions for the Rudder job-engine control plane.
//!
//! This crate contains:
//! - Domain types: Core business entities (ExecutionNode, BatchProgress, ParameterSet, etc.)
//! - DTOs: Data transfer objects for the control API

pub mod domain;
pub mod dto;
