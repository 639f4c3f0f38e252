//! Integration test utilities for the club server
//!
//! This crate provides helpers for running end-to-end scenarios through the
//! service layer, over the in-memory store and, when configured, PostgreSQL.

pub mod helpers;
pub mod fixtures;

pub use helpers::*;
pub use fixtures::*;
