//! Domain layer for the realm authentication database.
//!
//! This crate contains the domain models (accounts, their unlock and
//! currency collections, realm servers and server messages).

pub mod models;
