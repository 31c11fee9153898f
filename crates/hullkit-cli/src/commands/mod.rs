//! CLI command implementations

pub mod config;
pub mod decompose;
pub mod doctor;
pub mod rename;
pub mod select;
