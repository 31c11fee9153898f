//! hullkit CLI library.
//!
//! This crate provides the command implementations behind the `hullkit`
//! binary and the user preferences they share.

pub mod commands;
pub mod config;
