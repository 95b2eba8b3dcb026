//! # leafdb Configuration Module
//!
//! Compile-time layout constants live in [`constants`]. They describe the file
//! format, so they are grouped here with compile-time checks rather than spread
//! across the modules that use them.
//!
//! Runtime settings (file path, page ceiling) are supplied through
//! [`TableBuilder`](crate::table::TableBuilder).
//!
//! ## Module Organization
//!
//! - [`constants`]: Record, page, and node layout values with dependency documentation

pub mod constants;
pub use constants::*;
