//! Data Transfer Objects for the control API
//!
//! Request payloads shared between the control service and its clients.
//! Query results reuse the domain types directly.

pub mod parameter;
