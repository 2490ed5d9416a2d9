//! Shared utilities for the realm authentication database.
//!
//! This crate provides common functionality used across all other crates:
//! - Session key encoding and token generation
//! - Common validation logic

pub mod crypto;
pub mod validation;
